//! Prompt-enhancement stage.
//!
//! Asks the content collaborator for an SEO research brief and degrades
//! gracefully when the reply is unusable. This stage never stops a request:
//! whatever happens, a [`GenerateJob`] goes out the other side.

use crate::{EnhanceJob, GenerateJob, extract_json, parse_json};
use scrivano_core::EnhancedBrief;
use scrivano_interface::ContentDriver;
use std::sync::Arc;

/// The enhancement stage worker.
pub struct EnhanceStage {
    driver: Arc<dyn ContentDriver>,
}

impl EnhanceStage {
    /// Create a stage backed by the given collaborator.
    pub fn new(driver: Arc<dyn ContentDriver>) -> Self {
        Self { driver }
    }

    /// Process one job, always producing a generation job.
    ///
    /// Degradation ladder:
    /// 1. reply contains parseable JSON → strict brief;
    /// 2. reply exists but no structure could be extracted → degraded brief
    ///    carrying the raw reply as context;
    /// 3. the collaborator call failed → deterministic fallback brief built
    ///    from the request alone.
    #[tracing::instrument(skip(self, job), fields(id = %job.id))]
    pub async fn process(&self, job: EnhanceJob) -> GenerateJob {
        let EnhanceJob { id, request } = job;
        let prompt = enhancement_prompt(&request);

        let mut brief = match self.driver.generate_text(&prompt).await {
            Ok(reply) => {
                tracing::info!(reply_len = reply.len(), "Received enhancement reply");
                match extract_json(&reply).and_then(|json| parse_json::<EnhancedBrief>(&json)) {
                    Ok(brief) => brief,
                    Err(e) => {
                        tracing::warn!(error = %e, "Unparseable enhancement reply, degrading");
                        EnhancedBrief::degraded(&request, &reply)
                    }
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Enhancement call failed, using fallback brief");
                EnhancedBrief::fallback(&request)
            }
        };

        brief.restore_original_keywords(&request);
        tracing::info!(
            keyword_count = brief.enhanced_keywords.len(),
            "Prompt enhancement completed"
        );

        let options = request.effective_options();
        GenerateJob {
            id,
            request,
            brief,
            options,
        }
    }
}

/// Build the SEO-strategist prompt for a request.
fn enhancement_prompt(request: &scrivano_core::GenerationRequest) -> String {
    let mut prompt = format!(
        "You are an expert SEO and content strategist. Your task is to enhance \
         and optimize a blog content request.\n\n\
         **Original Request:**\n\
         - Topic: {}\n\
         - Keywords: {}\n",
        request.topic,
        request.keywords.join(", ")
    );
    if let Some(audience) = &request.target_audience {
        prompt.push_str(&format!("- Target Audience: {}\n", audience));
    }
    if let Some(context) = &request.additional_context {
        prompt.push_str(&format!("- Additional Context: {}\n", context));
    }
    prompt.push_str(
        "\n**Your Tasks:**\n\
         1. Research the topic: current trends, popular related questions, \
         competitive content and gaps in coverage, SEO opportunities.\n\
         2. Enhance the keyword list with high-value related keywords and \
         long-tail variations. Include every original keyword.\n\
         3. Provide strategic insights: standout angles, data and examples to \
         include, questions the target audience is asking.\n\
         4. Create an enhanced content brief: optimized title suggestions \
         (3-5 options), enhanced keyword list, key points to cover, \
         recommended content structure, trending angles or hooks.\n\n\
         **Output Format:**\n\
         Output ONLY valid JSON with this structure:\n\
         {\n\
           \"enhancedTitle\": \"string\",\n\
           \"titleAlternatives\": [\"string\"],\n\
           \"enhancedKeywords\": [\"string\"],\n\
           \"seoInsights\": {\n\
             \"searchTrends\": \"string\",\n\
             \"competitiveLandscape\": \"string\",\n\
             \"opportunities\": \"string\"\n\
           },\n\
           \"keyPointsToCover\": [\"string\"],\n\
           \"recommendedStructure\": [\"string\"],\n\
           \"trendingAngles\": [\"string\"],\n\
           \"targetedQuestions\": [\"string\"],\n\
           \"additionalContext\": \"string\"\n\
         }",
    );
    prompt
}
