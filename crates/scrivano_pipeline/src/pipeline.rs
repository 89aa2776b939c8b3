//! Pipeline assembly: channels, workers, and handles.

use crate::{
    EnhanceJob, EnhanceStage, GenerateJob, GenerateStage, Intake, Retrieval, RetryPolicy,
    Suggest, SynthesisJob, SynthesisStage,
};
use scrivano_interface::{ContentDriver, ContentStore, SpeechDriver};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Per-stage channel capacity. Senders suspend when a stage falls this far
/// behind, which is the only backpressure in the system.
const CHANNEL_CAPACITY: usize = 64;

/// A running pipeline.
///
/// Owns the worker tasks; dropping the handle closes intake, after which each
/// worker drains its queue and exits in stage order.
pub struct Pipeline {
    intake: Intake,
    retrieval: Retrieval,
    suggest: Suggest,
    workers: Vec<JoinHandle<()>>,
}

impl Pipeline {
    /// Wire the stages together and spawn one worker per stage.
    ///
    /// Stage N holds the sender for stage N+1, so channel closure cascades
    /// forward on shutdown. Each channel has a single consumer; requests
    /// within a stage are processed strictly in arrival order.
    pub fn start(
        content_driver: Arc<dyn ContentDriver>,
        speech_driver: Arc<dyn SpeechDriver>,
        store: Arc<dyn ContentStore>,
        policy: RetryPolicy,
    ) -> Self {
        let (enhance_tx, enhance_rx) = mpsc::channel::<EnhanceJob>(CHANNEL_CAPACITY);
        let (generate_tx, generate_rx) = mpsc::channel::<GenerateJob>(CHANNEL_CAPACITY);
        let (synthesis_tx, synthesis_rx) = mpsc::channel::<SynthesisJob>(CHANNEL_CAPACITY);

        let enhance = EnhanceStage::new(content_driver.clone());
        let generate = GenerateStage::new(content_driver.clone(), store.clone());
        let synthesis = SynthesisStage::new(speech_driver, store.clone(), policy);
        let suggest = Suggest::new(content_driver);

        let workers = vec![
            tokio::spawn(enhance_worker(enhance, enhance_rx, generate_tx)),
            tokio::spawn(generate_worker(generate, generate_rx, synthesis_tx)),
            tokio::spawn(synthesis_worker(synthesis, synthesis_rx)),
        ];

        Self {
            intake: Intake::new(enhance_tx),
            retrieval: Retrieval::new(store),
            suggest,
            workers,
        }
    }

    /// The intake handle for submitting requests.
    pub fn intake(&self) -> &Intake {
        &self.intake
    }

    /// The retrieval handle for reading results.
    pub fn retrieval(&self) -> &Retrieval {
        &self.retrieval
    }

    /// The metadata-suggestion handle.
    pub fn suggest(&self) -> &Suggest {
        &self.suggest
    }

    /// Close intake and wait for all in-flight requests to drain.
    pub async fn shutdown(self) {
        let Self {
            intake, workers, ..
        } = self;
        drop(intake);
        for worker in workers {
            if let Err(e) = worker.await {
                tracing::error!(error = %e, "Stage worker panicked");
            }
        }
        tracing::info!("Pipeline drained");
    }
}

async fn enhance_worker(
    stage: EnhanceStage,
    mut rx: mpsc::Receiver<EnhanceJob>,
    tx: mpsc::Sender<GenerateJob>,
) {
    while let Some(job) = rx.recv().await {
        let out = stage.process(job).await;
        if tx.send(out).await.is_err() {
            tracing::warn!("Generation stage gone, stopping enhancement worker");
            return;
        }
    }
    tracing::debug!("Enhancement worker drained");
}

async fn generate_worker(
    stage: GenerateStage,
    mut rx: mpsc::Receiver<GenerateJob>,
    tx: mpsc::Sender<SynthesisJob>,
) {
    while let Some(job) = rx.recv().await {
        let id = job.id.clone();
        match stage.process(job).await {
            Ok(out) => {
                if tx.send(out).await.is_err() {
                    tracing::warn!("Synthesis stage gone, stopping generation worker");
                    return;
                }
            }
            // Fatal for this request: nothing was stored and synthesis never
            // fires, so pollers keep seeing "not found"
            Err(e) => {
                tracing::error!(id = %id, error = %e, "Content generation failed");
            }
        }
    }
    tracing::debug!("Generation worker drained");
}

async fn synthesis_worker(stage: SynthesisStage, mut rx: mpsc::Receiver<SynthesisJob>) {
    while let Some(job) = rx.recv().await {
        stage.process(job).await;
    }
    tracing::debug!("Synthesis worker drained");
}
