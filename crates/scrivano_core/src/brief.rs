//! The enrichment brief produced by the prompt enhancement stage.

use crate::GenerationRequest;
use serde::{Deserialize, Serialize};

/// Keyword, audience, and context suggestions for a bare topic.
///
/// Produced by the metadata-suggestion endpoint before a request is even
/// submitted; the caller can feed the fields straight into a
/// [`GenerationRequest`]. Like the enrichment brief, suggestions are always
/// produced: collaborator trouble degrades to a deterministic template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataSuggestion {
    /// Suggested SEO keywords
    pub keywords: Vec<String>,
    /// Who the article should be written for
    pub target_audience: String,
    /// Key points the article should cover
    pub additional_context: String,
}

impl MetadataSuggestion {
    /// Template suggestions when the collaborator replied but nothing
    /// parseable came back.
    pub fn degraded(topic: &str) -> Self {
        let t = topic.to_lowercase();
        Self {
            keywords: vec![
                t.clone(),
                format!("{} guide", t),
                format!("{} tutorial", t),
                format!("best practices {}", t),
                format!("{} tips", t),
            ],
            target_audience: format!(
                "Readers interested in {} who want to learn more about this subject",
                topic
            ),
            additional_context: format!(
                "This blog will cover the fundamentals and key aspects of {}, providing valuable insights and practical information.",
                topic
            ),
        }
    }

    /// Minimal suggestions when the collaborator call itself failed.
    pub fn fallback(topic: &str) -> Self {
        let t = topic.to_lowercase();
        Self {
            keywords: vec![t.clone(), format!("{} guide", t), format!("learn {}", t)],
            target_audience: format!("Readers interested in {}", topic),
            additional_context: format!("Explore key concepts and insights about {}.", topic),
        }
    }
}

/// SEO research insights gathered during enhancement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoInsights {
    /// Current search trend summary
    pub search_trends: String,
    /// How competing content covers the topic
    pub competitive_landscape: String,
    /// Coverage gaps worth exploiting
    pub opportunities: String,
}

/// Enrichment output used to steer content generation.
///
/// Always produced: either parsed from the enrichment collaborator's reply or
/// built deterministically from the original request when the collaborator
/// fails or returns unparseable text. Transient; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedBrief {
    /// Primary title suggestion
    pub enhanced_title: String,
    /// Alternate title candidates
    pub title_alternatives: Vec<String>,
    /// Expanded keyword list; always a superset of the original keywords
    pub enhanced_keywords: Vec<String>,
    /// Research insights
    pub seo_insights: SeoInsights,
    /// Points the article should cover
    pub key_points_to_cover: Vec<String>,
    /// Recommended section structure
    pub recommended_structure: Vec<String>,
    /// Trending angles or hooks
    pub trending_angles: Vec<String>,
    /// Questions the target audience is asking
    pub targeted_questions: Vec<String>,
    /// Free-text context carried into generation
    pub additional_context: String,
}

impl EnhancedBrief {
    /// Deterministic fallback used when the enrichment call itself fails.
    ///
    /// Echoes the original topic and keywords so generation can proceed;
    /// enhancement failure never stops the pipeline.
    pub fn fallback(request: &GenerationRequest) -> Self {
        Self {
            enhanced_title: request.topic.clone(),
            title_alternatives: vec![request.topic.clone()],
            enhanced_keywords: request.keywords.clone(),
            seo_insights: SeoInsights {
                search_trends: "Enhancement failed, using original request".to_string(),
                competitive_landscape: "N/A".to_string(),
                opportunities: "N/A".to_string(),
            },
            key_points_to_cover: request.keywords.clone(),
            recommended_structure: vec![
                "Introduction".to_string(),
                "Main Content".to_string(),
                "Conclusion".to_string(),
            ],
            trending_angles: Vec::new(),
            targeted_questions: Vec::new(),
            additional_context: request.additional_context.clone().unwrap_or_default(),
        }
    }

    /// Degraded brief used when the collaborator replied but no parseable
    /// structure could be extracted. The raw reply is preserved as context.
    pub fn degraded(request: &GenerationRequest, raw_reply: &str) -> Self {
        Self {
            enhanced_title: request.topic.clone(),
            title_alternatives: vec![request.topic.clone()],
            enhanced_keywords: request.keywords.clone(),
            seo_insights: SeoInsights {
                search_trends: raw_reply.chars().take(200).collect(),
                competitive_landscape: "See full analysis".to_string(),
                opportunities: "Enhanced by AI research".to_string(),
            },
            key_points_to_cover: request
                .keywords
                .iter()
                .map(|k| format!("Cover {} in detail", k))
                .collect(),
            recommended_structure: vec![
                "Introduction".to_string(),
                "Main Sections".to_string(),
                "Conclusion".to_string(),
            ],
            trending_angles: vec!["Current industry trends".to_string()],
            targeted_questions: vec![
                format!("What is {}?", request.topic),
                format!("How does {} work?", request.topic),
            ],
            additional_context: raw_reply.to_string(),
        }
    }

    /// Ensure the keyword list still contains every original keyword.
    ///
    /// Collaborators are asked to return a superset but do not always comply;
    /// missing originals are appended in their submitted order.
    pub fn restore_original_keywords(&mut self, request: &GenerationRequest) {
        for keyword in &request.keywords {
            if !self.enhanced_keywords.contains(keyword) {
                self.enhanced_keywords.push(keyword.clone());
            }
        }
    }
}
