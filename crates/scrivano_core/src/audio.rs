//! Speech synthesis artifacts.

use crate::{GenerationStatus, RequestId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw synthesis output from a speech collaborator.
///
/// The payload is base64-encoded 16-bit PCM, mono, as delivered by the
/// provider; no container header is attached at this point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechAudio {
    /// Base64-encoded raw audio
    pub audio_data: String,
    /// Encoding tag, e.g. "pcm"
    pub format: String,
    /// Samples per second
    pub sample_rate: u32,
    /// Channel count (1 = mono)
    pub channels: u16,
}

/// Successfully synthesized audio, persisted in the tts namespace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioClip {
    /// Request this audio belongs to
    pub request_id: RequestId,
    /// Base64-encoded raw audio
    pub audio_data: String,
    /// Encoding tag, e.g. "pcm"
    pub format: String,
    /// Samples per second
    pub sample_rate: u32,
    /// Channel count (1 = mono)
    pub channels: u16,
    /// When synthesis finished
    pub generated_at: DateTime<Utc>,
    /// Title of the narrated article, denormalized for convenience
    pub article_title: String,
}

/// A recorded synthesis failure, persisted in the tts namespace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioFailure {
    /// Request the failure belongs to
    pub request_id: RequestId,
    /// The terminal error message
    pub error: String,
    /// Always [`GenerationStatus::Failed`]
    pub status: GenerationStatus,
    /// When the failure was recorded
    pub generated_at: DateTime<Utc>,
}

/// Persisted speech-synthesis result or failure marker.
///
/// Exactly one of these two shapes exists per request at any time, written
/// exactly once by the synthesis stage. Serialized untagged so the wire shape
/// matches the stored JSON: a success carries `audioData`, a failure carries
/// `error`/`status`.
///
/// # Examples
///
/// ```
/// use scrivano_core::{AudioArtifact, AudioFailure, GenerationStatus, RequestId};
///
/// let artifact = AudioArtifact::Failed(AudioFailure {
///     request_id: RequestId::mint(),
///     error: "overloaded".to_string(),
///     status: GenerationStatus::Failed,
///     generated_at: chrono::Utc::now(),
/// });
/// assert!(artifact.clip().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AudioArtifact {
    /// Synthesis succeeded
    Ready(AudioClip),
    /// Synthesis failed terminally
    Failed(AudioFailure),
}

impl AudioArtifact {
    /// The clip, if synthesis succeeded.
    pub fn clip(&self) -> Option<&AudioClip> {
        match self {
            AudioArtifact::Ready(clip) => Some(clip),
            AudioArtifact::Failed(_) => None,
        }
    }

    /// The failure record, if synthesis failed.
    pub fn failure(&self) -> Option<&AudioFailure> {
        match self {
            AudioArtifact::Ready(_) => None,
            AudioArtifact::Failed(failure) => Some(failure),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untagged_round_trip_discriminates_shapes() {
        let clip = AudioArtifact::Ready(AudioClip {
            request_id: RequestId::mint(),
            audio_data: "AAAA".to_string(),
            format: "pcm".to_string(),
            sample_rate: 24_000,
            channels: 1,
            generated_at: Utc::now(),
            article_title: "Title".to_string(),
        });
        let json = serde_json::to_value(&clip).unwrap();
        assert!(json.get("audioData").is_some());
        let back: AudioArtifact = serde_json::from_value(json).unwrap();
        assert!(back.clip().is_some());

        let failure = AudioArtifact::Failed(AudioFailure {
            request_id: RequestId::mint(),
            error: "rate limit".to_string(),
            status: GenerationStatus::Failed,
            generated_at: Utc::now(),
        });
        let json = serde_json::to_value(&failure).unwrap();
        assert_eq!(json["status"], "failed");
        let back: AudioArtifact = serde_json::from_value(json).unwrap();
        assert!(back.failure().is_some());
    }
}
