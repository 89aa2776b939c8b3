//! Topic metadata suggestion.
//!
//! Stands apart from the staged pipeline: callers use it before submitting a
//! request, to turn a bare topic into keyword, audience, and context
//! suggestions they can edit and send back through intake. Synchronous from
//! the caller's point of view, and like enhancement it always produces a
//! usable result.

use crate::{extract_json, parse_json};
use scrivano_core::MetadataSuggestion;
use scrivano_error::{ScrivanoError, ScrivanoResult, ValidationError, ValidationErrorKind};
use scrivano_interface::ContentDriver;
use std::sync::Arc;

/// Minimum topic length accepted for suggestions.
const MIN_TOPIC_LEN: usize = 3;

/// Metadata-suggestion service over the content collaborator.
#[derive(Clone)]
pub struct Suggest {
    driver: Arc<dyn ContentDriver>,
}

impl Suggest {
    /// Wrap the given collaborator.
    pub fn new(driver: Arc<dyn ContentDriver>) -> Self {
        Self { driver }
    }

    /// Suggest keywords, audience, and context for a topic.
    ///
    /// Collaborator trouble never surfaces: an unparseable reply degrades to
    /// a template suggestion and a failed call falls back to a minimal one.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a topic shorter than three characters.
    #[tracing::instrument(skip(self))]
    pub async fn suggest(&self, topic: &str) -> ScrivanoResult<MetadataSuggestion> {
        let topic = topic.trim();
        if topic.chars().count() < MIN_TOPIC_LEN {
            return Err(ScrivanoError::from(ValidationError::new(
                ValidationErrorKind::TopicTooShort(MIN_TOPIC_LEN),
            )));
        }

        let suggestion = match self.driver.generate_text(&suggestion_prompt(topic)).await {
            Ok(reply) => {
                tracing::info!(reply_len = reply.len(), "Received suggestion reply");
                match extract_json(&reply).and_then(|json| parse_json::<MetadataSuggestion>(&json))
                {
                    Ok(suggestion) => suggestion,
                    Err(e) => {
                        tracing::warn!(error = %e, "Unparseable suggestion reply, degrading");
                        MetadataSuggestion::degraded(topic)
                    }
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Suggestion call failed, using fallback");
                MetadataSuggestion::fallback(topic)
            }
        };

        tracing::info!(
            keyword_count = suggestion.keywords.len(),
            "Metadata suggestions ready"
        );
        Ok(suggestion)
    }
}

/// Build the metadata-suggestion prompt for a topic.
fn suggestion_prompt(topic: &str) -> String {
    format!(
        "You are an expert content strategist and SEO specialist. Generate blog \
         metadata for the following topic:\n\n\
         **Topic**: \"{}\"\n\n\
         Provide the following in JSON format:\n\
         1. **keywords**: An array of 5-8 relevant keywords that would help with \
         SEO and content creation\n\
         2. **targetAudience**: A concise description of who would benefit from \
         reading this blog (1-2 sentences)\n\
         3. **additionalContext**: Brief context or key points that should be \
         covered in the blog (2-3 sentences)\n\n\
         **Output Format** (JSON only, no markdown):\n\
         {{\n\
           \"keywords\": [\"keyword1\", \"keyword2\", \"keyword3\", \"keyword4\", \"keyword5\"],\n\
           \"targetAudience\": \"Description of the target audience\",\n\
           \"additionalContext\": \"Key context and points to cover in the blog\"\n\
         }}\n\n\
         Respond with ONLY the JSON object, no additional text.",
        topic
    )
}
