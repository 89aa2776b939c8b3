//! The durable generation artifact: the parsed blog article.

use crate::RequestId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Terminal status of a generation artifact.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GenerationStatus {
    /// The artifact was produced successfully
    Completed,
    /// The producing stage failed terminally
    Failed,
}

/// One body section of an article.
///
/// Order indices are contiguous and monotonic starting at 0, matching the
/// sequence the sections appeared in the generated text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleSection {
    /// Section heading, heading markers stripped
    pub heading: String,
    /// Section body text
    pub content: String,
    /// Zero-based position within the article
    pub order: usize,
}

/// SEO metadata attached to an article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleMetadata {
    /// Keywords the article targets
    pub keywords: Vec<String>,
    /// Intended readership, if specified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_audience: Option<String>,
    /// The highest-priority keyword
    pub primary_keyword: String,
    /// Short description for search snippets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_description: Option<String>,
}

/// Structured, persisted generated document.
///
/// Created once by the generation stage and never mutated thereafter.
/// `word_count` is computed from the entire raw generated text, not the sum
/// of the structured parts; the two may diverge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogArticle {
    /// Article title
    pub title: String,
    /// Opening prose before the first section, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub introduction: Option<String>,
    /// Body sections in order
    pub sections: Vec<ArticleSection>,
    /// Closing prose, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<String>,
    /// SEO metadata
    pub metadata: ArticleMetadata,
    /// Terminal status
    pub status: GenerationStatus,
    /// When generation finished
    pub generated_at: DateTime<Utc>,
    /// Whitespace-token count of the entire raw generated text
    pub word_count: usize,
}

impl BlogArticle {
    /// Concatenate title, introduction, sections, and conclusion into one
    /// text blob suitable for speech synthesis.
    pub fn narration_text(&self) -> String {
        let mut text = format!("{}\n\n", self.title);
        if let Some(introduction) = &self.introduction {
            text.push_str(introduction);
            text.push_str("\n\n");
        }
        for section in &self.sections {
            text.push_str(&section.heading);
            text.push('\n');
            text.push_str(&section.content);
            text.push_str("\n\n");
        }
        if let Some(conclusion) = &self.conclusion {
            text.push_str(conclusion);
        }
        text
    }
}

/// Persistence envelope for an article in the blog namespace.
///
/// Carries the raw generated text alongside the parsed structure so both
/// remain reproducible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredArticle {
    /// Request this article belongs to
    pub id: RequestId,
    /// The parsed article
    pub article: BlogArticle,
    /// Terminal status of the generation stage
    pub status: GenerationStatus,
    /// When the envelope was written
    pub generated_at: DateTime<Utc>,
    /// The raw generated text, unparsed
    pub full_content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article() -> BlogArticle {
        BlogArticle {
            title: "Title".to_string(),
            introduction: Some("Intro.".to_string()),
            sections: vec![
                ArticleSection {
                    heading: "First".to_string(),
                    content: "Body one.".to_string(),
                    order: 0,
                },
                ArticleSection {
                    heading: "Second".to_string(),
                    content: "Body two.".to_string(),
                    order: 1,
                },
            ],
            conclusion: Some("Wrap up.".to_string()),
            metadata: ArticleMetadata {
                keywords: vec!["x".to_string()],
                target_audience: None,
                primary_keyword: "x".to_string(),
                seo_description: None,
            },
            status: GenerationStatus::Completed,
            generated_at: Utc::now(),
            word_count: 12,
        }
    }

    #[test]
    fn test_narration_text_order() {
        let text = article().narration_text();
        let title_pos = text.find("Title").unwrap();
        let intro_pos = text.find("Intro.").unwrap();
        let first_pos = text.find("First").unwrap();
        let conclusion_pos = text.find("Wrap up.").unwrap();
        assert!(title_pos < intro_pos);
        assert!(intro_pos < first_pos);
        assert!(first_pos < conclusion_pos);
    }

    #[test]
    fn test_stored_article_round_trips_camel_case() {
        let stored = StoredArticle {
            id: RequestId::mint(),
            article: article(),
            status: GenerationStatus::Completed,
            generated_at: Utc::now(),
            full_content: "# Title\n\nIntro.".to_string(),
        };
        let json = serde_json::to_value(&stored).unwrap();
        assert!(json.get("fullContent").is_some());
        assert!(json["article"].get("wordCount").is_some());
        let back: StoredArticle = serde_json::from_value(json).unwrap();
        assert_eq!(back, stored);
    }
}
