//! Read side of the pipeline: progressive result retrieval.
//!
//! Results become visible in two steps: the article appears first, the audio
//! artifact later (or never, when synthesis failed). Retrieval is pure read;
//! repeating a call never changes stored state.

use scrivano_core::{AudioArtifact, AudioClip, AudioFailure, RequestId, StoredArticle};
use scrivano_error::ScrivanoResult;
use scrivano_interface::{ContentStore, Namespace};
use serde_json::Value as JsonValue;
use std::sync::Arc;

/// Audio lookup outcome, kept distinct so callers can map absence, failure,
/// and success to different responses.
#[derive(Debug, Clone)]
pub enum AudioFetch {
    /// Synthesis has not finished (or never ran)
    Absent,
    /// Synthesis failed terminally
    Failed(AudioFailure),
    /// Synthesis succeeded
    Ready(AudioClip),
}

/// Store-backed result reader.
#[derive(Clone)]
pub struct Retrieval {
    store: Arc<dyn ContentStore>,
}

impl Retrieval {
    /// Wrap the given store.
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    /// Fetch the article payload for a request, if generated yet.
    ///
    /// When a success audio artifact also exists its payload is merged in as
    /// an `audio` field; a failure artifact is logged and omitted, so the
    /// response is indistinguishable from audio-still-pending except by the
    /// audio endpoint.
    ///
    /// # Errors
    ///
    /// Returns error only for store access failures; an unknown id is `None`.
    #[tracing::instrument(skip(self), fields(id = %id))]
    pub async fn fetch_content(&self, id: &RequestId) -> ScrivanoResult<Option<JsonValue>> {
        let Some(mut payload) = self.store.get(Namespace::Blog, id).await? else {
            tracing::debug!("Content not found");
            return Ok(None);
        };

        match self.fetch_audio(id).await? {
            AudioFetch::Ready(clip) => {
                if let Ok(audio) = serde_json::to_value(&clip)
                    && let Some(map) = payload.as_object_mut()
                {
                    map.insert("audio".to_string(), audio);
                }
            }
            AudioFetch::Failed(failure) => {
                tracing::warn!(error = %failure.error, "Audio synthesis failed for request");
            }
            AudioFetch::Absent => {}
        }

        Ok(Some(payload))
    }

    /// Fetch the parsed article, when present.
    ///
    /// # Errors
    ///
    /// Returns error for store access failures or an unreadable stored payload.
    pub async fn fetch_article(&self, id: &RequestId) -> ScrivanoResult<Option<StoredArticle>> {
        let Some(payload) = self.store.get(Namespace::Blog, id).await? else {
            return Ok(None);
        };
        let stored = serde_json::from_value(payload).map_err(|e| {
            scrivano_error::StoreError::new(scrivano_error::StoreErrorKind::Decode(e.to_string()))
        })?;
        Ok(Some(stored))
    }

    /// Fetch the audio artifact state for a request.
    ///
    /// # Errors
    ///
    /// Returns error for store access failures or an unreadable artifact.
    #[tracing::instrument(skip(self), fields(id = %id))]
    pub async fn fetch_audio(&self, id: &RequestId) -> ScrivanoResult<AudioFetch> {
        let Some(payload) = self.store.get(Namespace::Tts, id).await? else {
            return Ok(AudioFetch::Absent);
        };
        let artifact: AudioArtifact = serde_json::from_value(payload).map_err(|e| {
            scrivano_error::StoreError::new(scrivano_error::StoreErrorKind::Decode(e.to_string()))
        })?;
        Ok(match artifact {
            AudioArtifact::Ready(clip) => AudioFetch::Ready(clip),
            AudioArtifact::Failed(failure) => AudioFetch::Failed(failure),
        })
    }
}
