//! Content-generation stage.
//!
//! Builds the article prompt from the enrichment brief, calls the content
//! collaborator, parses the reply, and persists the article. Unlike
//! enhancement, a collaborator failure here is fatal for the request: nothing
//! is persisted and the synthesis stage is never triggered.

use crate::{GenerateJob, SynthesisJob, parser::parse_article};
use chrono::Utc;
use scrivano_core::{
    EnhancedBrief, GenerationOptions, GenerationRequest, GenerationStatus, StoredArticle,
};
use scrivano_error::{ScrivanoError, ScrivanoResult, StoreError, StoreErrorKind};
use scrivano_interface::{ContentDriver, ContentStore, Namespace};
use std::sync::Arc;

/// The generation stage worker.
pub struct GenerateStage {
    driver: Arc<dyn ContentDriver>,
    store: Arc<dyn ContentStore>,
}

impl GenerateStage {
    /// Create a stage backed by the given collaborator and store.
    pub fn new(driver: Arc<dyn ContentDriver>, store: Arc<dyn ContentStore>) -> Self {
        Self { driver, store }
    }

    /// Process one job: generate, parse, persist, and trigger synthesis.
    ///
    /// # Errors
    ///
    /// Returns error when the collaborator call or the store write fails. The
    /// caller logs and drops the request; pollers see "not found".
    #[tracing::instrument(skip(self, job), fields(id = %job.id, title = %job.brief.enhanced_title))]
    pub async fn process(&self, job: GenerateJob) -> ScrivanoResult<SynthesisJob> {
        let GenerateJob {
            id,
            request,
            brief,
            options,
        } = job;

        let prompt = generation_prompt(&brief, &request, &options);
        let full_content = self
            .driver
            .generate_text(&prompt)
            .await
            .map_err(ScrivanoError::from)?;

        tracing::info!(
            content_len = full_content.len(),
            word_count = full_content.split_whitespace().count(),
            "Received generated content"
        );

        let parsed = parse_article(&full_content, &brief, &request);
        if parsed.used_fallback {
            tracing::warn!("Generated text had no title line, using fallback title");
        }

        let stored = StoredArticle {
            id: id.clone(),
            article: parsed.article,
            status: GenerationStatus::Completed,
            generated_at: Utc::now(),
            full_content,
        };

        let payload = serde_json::to_value(&stored).map_err(|e| {
            ScrivanoError::from(StoreError::new(StoreErrorKind::Encode(e.to_string())))
        })?;
        self.store.put(Namespace::Blog, &id, payload).await?;

        tracing::info!(
            section_count = stored.article.sections.len(),
            word_count = stored.article.word_count,
            "Article stored"
        );
        Ok(SynthesisJob { id })
    }
}

/// Build the article-writing prompt from the brief, the original request, and
/// the effective options.
fn generation_prompt(
    brief: &EnhancedBrief,
    request: &GenerationRequest,
    options: &GenerationOptions,
) -> String {
    let per_section = options.word_count / options.section_count.max(1);
    let bullets = |items: &[String]| {
        items
            .iter()
            .map(|item| format!("- {}", item))
            .collect::<Vec<_>>()
            .join("\n")
    };
    let numbered = |items: &[String]| {
        items
            .iter()
            .enumerate()
            .map(|(i, item)| format!("{}. {}", i + 1, item))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let mut prompt = format!(
        "You are an expert blog writer and content creator. Generate a \
         comprehensive, SEO-optimized blog article using the research and \
         insights provided.\n\n\
         **Enhanced Content Brief:**\n\n\
         **Title Options:**\n\
         - Primary: {}\n\
         - Alternatives: {}\n\n\
         **SEO Research Insights:**\n\
         - Search Trends: {}\n\
         - Competitive Landscape: {}\n\
         - Opportunities: {}\n\n\
         **Enhanced Keywords (USE THESE):**\n{}\n\n\
         **Key Points to Cover:**\n{}\n\n\
         **Recommended Structure:**\n{}\n\n\
         **Trending Angles:**\n{}\n\n\
         **Questions to Answer:**\n{}\n\n\
         **Additional Context:**\n{}\n",
        brief.enhanced_title,
        brief.title_alternatives.join(" | "),
        brief.seo_insights.search_trends,
        brief.seo_insights.competitive_landscape,
        brief.seo_insights.opportunities,
        bullets(&brief.enhanced_keywords),
        bullets(&brief.key_points_to_cover),
        numbered(&brief.recommended_structure),
        bullets(&brief.trending_angles),
        bullets(&brief.targeted_questions),
        brief.additional_context,
    );

    if let Some(audience) = &request.target_audience {
        prompt.push_str(&format!("\n- Target Audience: {}\n", audience));
    }
    if let Some(context) = &request.additional_context {
        prompt.push_str(&format!("- User Notes: {}\n", context));
    }

    prompt.push_str(&format!(
        "\n---\n\n\
         **Writing Guidelines:**\n\
         - Tone: {}\n\
         - Style: {}\n\
         - Target Word Count: {} words\n\
         - Number of Main Sections: {}\n\n\
         **Structure Requirements:**\n",
        options.tone, options.style, options.word_count, options.section_count,
    ));
    if options.include_intro {
        prompt.push_str(
            "1. Write an engaging introduction (100-200 words) that hooks the \
             reader and previews the value\n",
        );
    }
    prompt.push_str(&format!(
        "2. Create {} main sections, each with a clear SEO-friendly heading \
         (## format) and well-developed content ({}-{} words), incorporating \
         the enhanced keywords naturally and answering the targeted questions\n",
        options.section_count,
        per_section,
        per_section + 100,
    ));
    if options.include_conclusion {
        prompt.push_str(
            "3. Write a strong conclusion (100-200 words) that summarizes key \
             takeaways\n",
        );
    } else {
        prompt.push_str("3. End with the final section\n");
    }

    prompt.push_str(&format!(
        "\n**Output Format:**\n\
         Generate the complete blog article in Markdown format with:\n\
         - Main title (# H1)\n\
         {}- {} main sections (## H2 headings)\n\
         {}- Natural keyword integration and professional formatting\n\n\
         Generate the article now:",
        if options.include_intro {
            "- Introduction\n"
        } else {
            ""
        },
        options.section_count,
        if options.include_conclusion {
            "- Conclusion\n"
        } else {
            ""
        },
    ));

    prompt
}
