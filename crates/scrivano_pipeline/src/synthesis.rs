//! Speech-synthesis stage.
//!
//! Terminal stage of the pipeline. Loads the persisted article, narrates it
//! through the speech collaborator under a retry policy, and records exactly
//! one artifact in the tts namespace: a clip on success, a failure marker
//! otherwise. Nothing propagates past the stage boundary; a missing audio
//! artifact can only mean the stage has not finished yet.

use crate::{RetryPolicy, SynthesisJob};
use chrono::Utc;
use scrivano_core::{AudioArtifact, AudioClip, AudioFailure, GenerationStatus, RequestId, StoredArticle};
use scrivano_error::{CollaboratorError, PipelineError, PipelineErrorKind, ScrivanoResult};
use scrivano_interface::{ContentStore, Namespace, SpeechDriver};
use std::sync::Arc;

/// The synthesis stage worker.
pub struct SynthesisStage {
    driver: Arc<dyn SpeechDriver>,
    store: Arc<dyn ContentStore>,
    policy: RetryPolicy,
}

impl SynthesisStage {
    /// Create a stage backed by the given collaborator, store, and policy.
    pub fn new(
        driver: Arc<dyn SpeechDriver>,
        store: Arc<dyn ContentStore>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            driver,
            store,
            policy,
        }
    }

    /// Process one job, always leaving an artifact behind.
    #[tracing::instrument(skip(self, job), fields(id = %job.id))]
    pub async fn process(&self, job: SynthesisJob) {
        let id = job.id;

        let article = match self.load_article(&id).await {
            Ok(article) => article,
            Err(e) => {
                tracing::error!(error = %e, "Article unavailable for synthesis");
                self.record_failure(&id, &e.to_string()).await;
                return;
            }
        };

        tracing::info!(
            title = %article.article.title,
            section_count = article.article.sections.len(),
            "Article retrieved, generating speech"
        );

        let narration = article.article.narration_text();
        match self.synthesize_with_retry(&narration).await {
            Ok(audio) => {
                let clip = AudioClip {
                    request_id: id.clone(),
                    audio_data: audio.audio_data,
                    format: audio.format,
                    sample_rate: audio.sample_rate,
                    channels: audio.channels,
                    generated_at: Utc::now(),
                    article_title: article.article.title.clone(),
                };
                tracing::info!(
                    audio_len = clip.audio_data.len(),
                    sample_rate = clip.sample_rate,
                    "Speech synthesized"
                );
                self.record(&id, AudioArtifact::Ready(clip)).await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Speech synthesis failed terminally");
                self.record_failure(&id, &e.to_string()).await;
            }
        }
    }

    async fn load_article(&self, id: &RequestId) -> ScrivanoResult<StoredArticle> {
        let value = self.store.get(Namespace::Blog, id).await?.ok_or_else(|| {
            PipelineError::new(PipelineErrorKind::MissingArticle(id.to_string()))
        })?;
        let stored: StoredArticle = serde_json::from_value(value).map_err(|e| {
            PipelineError::new(PipelineErrorKind::IncompleteArticle {
                id: id.to_string(),
                reason: e.to_string(),
            })
        })?;
        if stored.article.title.is_empty() {
            return Err(PipelineError::new(PipelineErrorKind::IncompleteArticle {
                id: id.to_string(),
                reason: "article has no title".to_string(),
            })
            .into());
        }
        Ok(stored)
    }

    /// Call the speech collaborator under the retry policy.
    ///
    /// Transient failures back off and retry up to the attempt bound; the
    /// first permanent failure, or exhaustion, returns the last error.
    async fn synthesize_with_retry(
        &self,
        narration: &str,
    ) -> Result<scrivano_core::SpeechAudio, CollaboratorError> {
        let max_attempts = self.policy.max_attempts();
        let mut attempt = 1;
        loop {
            match self.driver.synthesize(narration).await {
                Ok(audio) => return Ok(audio),
                Err(e) => {
                    if self.policy.is_transient(&e) && attempt < max_attempts {
                        let delay = self.policy.delay_for(attempt);
                        tracing::warn!(
                            attempt,
                            max_attempts,
                            delay_ms = delay.as_millis() as u64,
                            error = %e,
                            "Transient synthesis failure, backing off"
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }
                    return Err(e);
                }
            }
        }
    }

    async fn record_failure(&self, id: &RequestId, error: &str) {
        let failure = AudioFailure {
            request_id: id.clone(),
            error: error.to_string(),
            status: GenerationStatus::Failed,
            generated_at: Utc::now(),
        };
        self.record(id, AudioArtifact::Failed(failure)).await;
    }

    /// Write the artifact. The cell is write-once; a second write means two
    /// synthesis runs raced for one request and is logged, not propagated.
    async fn record(&self, id: &RequestId, artifact: AudioArtifact) {
        let payload = match serde_json::to_value(&artifact) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!(id = %id, error = %e, "Audio artifact unserializable");
                return;
            }
        };
        if let Err(e) = self.store.put(Namespace::Tts, id, payload).await {
            tracing::error!(id = %id, error = %e, "Failed to store audio artifact");
        }
    }
}
