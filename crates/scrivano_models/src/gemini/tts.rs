//! Google Gemini speech-synthesis client.
//!
//! The TTS preview models require `responseModalities: ["AUDIO"]` plus a
//! speech config block, neither of which the `gemini-rust` builder exposes,
//! so this client speaks to the `generateContent` endpoint directly over
//! reqwest.

use async_trait::async_trait;
use base64::Engine;
use serde::Deserialize;
use std::env;
use tracing::instrument;

use scrivano_core::SpeechAudio;
use scrivano_error::{CollaboratorError, CollaboratorErrorKind};
use scrivano_interface::SpeechDriver;

use super::GeminiResult;

const DEFAULT_TTS_MODEL: &str = "gemini-2.5-flash-preview-tts";
const DEFAULT_VOICE: &str = "Kore";
const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// The preview models emit 16-bit PCM at a fixed rate, mono.
const TTS_SAMPLE_RATE: u32 = 24_000;
const TTS_CHANNELS: u16 = 1;

/// Client for Gemini speech synthesis.
pub struct GeminiTtsClient {
    http: reqwest::Client,
    api_key: String,
    model_name: String,
    voice_name: String,
}

impl std::fmt::Debug for GeminiTtsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiTtsClient")
            .field("model_name", &self.model_name)
            .field("voice_name", &self.voice_name)
            .finish_non_exhaustive()
    }
}

/// Response envelope for a speech `generateContent` call.
///
/// Only the path down to the inline audio payload is modeled; the rest of the
/// envelope is ignored.
#[derive(Debug, Deserialize)]
struct SpeechResponse {
    #[serde(default)]
    candidates: Vec<SpeechCandidate>,
}

#[derive(Debug, Deserialize)]
struct SpeechCandidate {
    content: Option<SpeechContent>,
}

#[derive(Debug, Deserialize)]
struct SpeechContent {
    #[serde(default)]
    parts: Vec<SpeechPart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpeechPart {
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
struct InlineData {
    /// Base64-encoded PCM samples
    data: String,
}

impl SpeechResponse {
    /// Pull the first inline audio payload out of the envelope.
    fn into_audio_data(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .find_map(|part| part.inline_data)
            .map(|inline| inline.data)
    }
}

impl GeminiTtsClient {
    /// Create a client with the default model and voice.
    ///
    /// Reads the API key from the `GEMINI_API_KEY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns error if the key is missing.
    #[instrument(name = "gemini_tts_new")]
    pub fn new() -> GeminiResult<Self> {
        Self::with_voice(DEFAULT_TTS_MODEL, DEFAULT_VOICE)
    }

    /// Create a client with a specific model and prebuilt voice.
    #[instrument(name = "gemini_tts_with_voice")]
    pub fn with_voice(model_name: &str, voice_name: &str) -> GeminiResult<Self> {
        let api_key = env::var("GEMINI_API_KEY")
            .map_err(|_| CollaboratorError::new(CollaboratorErrorKind::MissingApiKey))?;

        Ok(Self {
            http: reqwest::Client::new(),
            api_key,
            model_name: model_name.to_string(),
            voice_name: voice_name.to_string(),
        })
    }

    fn request_body(&self, text: &str) -> serde_json::Value {
        serde_json::json!({
            "contents": [{ "parts": [{ "text": text }] }],
            "generationConfig": {
                "responseModalities": ["AUDIO"],
                "speechConfig": {
                    "voiceConfig": {
                        "prebuiltVoiceConfig": { "voiceName": self.voice_name }
                    }
                }
            }
        })
    }
}

#[async_trait]
impl SpeechDriver for GeminiTtsClient {
    #[instrument(name = "gemini_synthesize", skip(self, text), fields(model = %self.model_name, voice = %self.voice_name, text_len = text.len()))]
    async fn synthesize(&self, text: &str) -> Result<SpeechAudio, CollaboratorError> {
        if text.trim().is_empty() {
            return Err(CollaboratorError::new(CollaboratorErrorKind::ApiRequest(
                "cannot synthesize empty text".to_string(),
            )));
        }

        let url = format!("{}/{}:generateContent", API_BASE, self.model_name);
        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&self.request_body(text))
            .send()
            .await
            .map_err(|e| {
                CollaboratorError::new(CollaboratorErrorKind::ApiRequest(e.to_string()))
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CollaboratorError::new(CollaboratorErrorKind::HttpError {
                status_code: status.as_u16(),
                message,
            }));
        }

        let envelope: SpeechResponse = response.json().await.map_err(|e| {
            CollaboratorError::new(CollaboratorErrorKind::ApiRequest(e.to_string()))
        })?;

        let audio_data = envelope.into_audio_data().ok_or_else(|| {
            CollaboratorError::new(CollaboratorErrorKind::EmptyResponse(
                "no audio data received from the Gemini TTS API".to_string(),
            ))
        })?;

        // Reject payloads that would fail to decode at serving time
        base64::engine::general_purpose::STANDARD
            .decode(&audio_data)
            .map_err(|e| {
                CollaboratorError::new(CollaboratorErrorKind::Base64Decode(e.to_string()))
            })?;

        tracing::debug!(audio_len = audio_data.len(), "Received synthesized audio");
        Ok(SpeechAudio {
            audio_data,
            format: "pcm".to_string(),
            sample_rate: TTS_SAMPLE_RATE,
            channels: TTS_CHANNELS,
        })
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn voice_name(&self) -> &str {
        &self.voice_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_extracts_inline_audio() {
        let json = serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [{ "inlineData": { "data": "AAAA" } }]
                }
            }]
        });
        let envelope: SpeechResponse = serde_json::from_value(json).unwrap();
        assert_eq!(envelope.into_audio_data().as_deref(), Some("AAAA"));
    }

    #[test]
    fn test_envelope_without_audio_is_none() {
        let json = serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "not audio" }] }
            }]
        });
        let envelope: SpeechResponse = serde_json::from_value(json).unwrap();
        assert!(envelope.into_audio_data().is_none());

        let empty: SpeechResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(empty.into_audio_data().is_none());
    }
}
