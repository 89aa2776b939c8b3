//! Request intake: validation, identifier minting, and pipeline hand-off.

use crate::EnhanceJob;
use scrivano_core::{GenerationRequest, RequestId};
use scrivano_error::{PipelineError, PipelineErrorKind, ScrivanoError, ScrivanoResult};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// Synchronous acknowledgement returned by intake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeAck {
    /// Identifier for polling the result
    pub id: RequestId,
    /// Always "accepted"
    pub status: String,
    /// Human-readable hint for the caller
    pub message: String,
}

/// Entry point of the pipeline.
///
/// Holds the sender side of the enhancement channel. Submission is
/// fire-and-forget: once the job is enqueued the caller gets an
/// acknowledgement immediately and learns the outcome by polling.
#[derive(Debug, Clone)]
pub struct Intake {
    enhance_tx: mpsc::Sender<EnhanceJob>,
}

impl Intake {
    /// Wrap the enhancement channel sender.
    pub fn new(enhance_tx: mpsc::Sender<EnhanceJob>) -> Self {
        Self { enhance_tx }
    }

    /// Validate and accept a request.
    ///
    /// Validation failure is synchronous and mints no identifier; nothing
    /// reaches the pipeline. The hand-off never waits on downstream stages:
    /// when the enhancement queue is at capacity the request is rejected
    /// instead of queued, so the caller always gets an answer immediately.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a rejected request, or a pipeline error
    /// when the enhancement stage is saturated or no longer running.
    #[tracing::instrument(skip(self, request), fields(topic = %request.topic))]
    pub async fn submit(&self, request: GenerationRequest) -> ScrivanoResult<IntakeAck> {
        request.validate().map_err(ScrivanoError::from)?;

        let id = RequestId::mint();
        tracing::info!(id = %id, keywords = request.keywords.len(), "Accepted generation request");

        self.enhance_tx
            .try_send(EnhanceJob {
                id: id.clone(),
                request,
            })
            .map_err(|e| match e {
                TrySendError::Full(_) => {
                    PipelineError::new(PipelineErrorKind::QueueFull("enhance".to_string()))
                }
                TrySendError::Closed(_) => {
                    PipelineError::new(PipelineErrorKind::ChannelClosed("enhance".to_string()))
                }
            })?;

        Ok(IntakeAck {
            id,
            status: "accepted".to_string(),
            message: "Content generation started. Poll /api/content/{id} for the result."
                .to_string(),
        })
    }
}
