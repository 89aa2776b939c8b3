//! Shared mock collaborators for pipeline integration tests.

use async_trait::async_trait;
use scrivano_core::SpeechAudio;
use scrivano_error::{CollaboratorError, CollaboratorErrorKind};
use scrivano_interface::{ContentDriver, SpeechDriver};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tokio::sync::Semaphore;

/// A canned article reply with a title, two sections, and a conclusion.
pub fn article_markdown() -> String {
    "\
# Mock Article Title

This is the introduction paragraph.

## First Section

Body of the first section.

## Second Section

Body of the second section.

## Conclusion

Closing thoughts on the topic.
"
    .to_string()
}

/// A canned enhancement brief in the shape the stage asks for.
pub fn brief_json() -> String {
    r#"{
        "enhancedTitle": "Mock Enhanced Title",
        "titleAlternatives": ["Alt One"],
        "enhancedKeywords": ["alpha", "beta", "gamma"],
        "seoInsights": {
            "searchTrends": "up and to the right",
            "competitiveLandscape": "crowded",
            "opportunities": "long tail"
        },
        "keyPointsToCover": ["point one"],
        "recommendedStructure": ["Introduction", "Body", "Conclusion"],
        "trendingAngles": ["angle"],
        "targetedQuestions": ["why?"],
        "additionalContext": "context"
    }"#
    .to_string()
}

/// Content driver that answers enhancement and generation prompts separately.
///
/// The two stages share one driver, so replies are routed by sniffing the
/// prompt preamble rather than by call order; interleaved requests stay
/// deterministic.
pub struct MockContentDriver {
    enhancement_reply: Result<String, String>,
    generation_reply: Result<String, String>,
    pub calls: AtomicU32,
}

impl MockContentDriver {
    pub fn new(
        enhancement_reply: Result<String, String>,
        generation_reply: Result<String, String>,
    ) -> Self {
        Self {
            enhancement_reply,
            generation_reply,
            calls: AtomicU32::new(0),
        }
    }

    /// Both stages succeed with canned replies.
    pub fn happy() -> Self {
        Self::new(Ok(brief_json()), Ok(article_markdown()))
    }
}

#[async_trait]
impl ContentDriver for MockContentDriver {
    async fn generate_text(&self, prompt: &str) -> Result<String, CollaboratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let reply = if prompt.contains("SEO and content strategist") {
            &self.enhancement_reply
        } else {
            &self.generation_reply
        };
        reply.clone().map_err(|message| {
            CollaboratorError::new(CollaboratorErrorKind::ApiRequest(message))
        })
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-content"
    }
}

/// A small decodable base64 payload standing in for PCM samples.
pub const MOCK_AUDIO_B64: &str = "AAAAAAAAAAA=";

pub fn mock_audio() -> SpeechAudio {
    SpeechAudio {
        audio_data: MOCK_AUDIO_B64.to_string(),
        format: "pcm".to_string(),
        sample_rate: 24_000,
        channels: 1,
    }
}

/// Speech driver driven by a script of outcomes.
///
/// Outcomes are consumed front to back; once the script runs dry every call
/// succeeds with [`mock_audio`]. An optional gate (a zero-permit semaphore)
/// holds synthesis until the test releases it.
pub struct MockSpeechDriver {
    script: Mutex<VecDeque<Result<SpeechAudio, String>>>,
    pub calls: AtomicU32,
    gate: Option<Arc<Semaphore>>,
}

impl MockSpeechDriver {
    pub fn scripted(outcomes: Vec<Result<SpeechAudio, String>>) -> Self {
        Self {
            script: Mutex::new(outcomes.into()),
            calls: AtomicU32::new(0),
            gate: None,
        }
    }

    pub fn happy() -> Self {
        Self::scripted(Vec::new())
    }

    /// Always fail with the given message.
    pub fn failing(message: &str, times: u32) -> Self {
        Self::scripted((0..times).map(|_| Err(message.to_string())).collect())
    }

    pub fn gated(gate: Arc<Semaphore>) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            calls: AtomicU32::new(0),
            gate: Some(gate),
        }
    }
}

#[async_trait]
impl SpeechDriver for MockSpeechDriver {
    async fn synthesize(&self, _text: &str) -> Result<SpeechAudio, CollaboratorError> {
        if let Some(gate) = &self.gate {
            let permit = gate.acquire().await.map_err(|_| {
                CollaboratorError::new(CollaboratorErrorKind::ApiRequest(
                    "gate closed".to_string(),
                ))
            })?;
            permit.forget();
        }
        self.calls.fetch_add(1, Ordering::SeqCst);
        let outcome = self.script.lock().unwrap().pop_front();
        match outcome {
            Some(Ok(audio)) => Ok(audio),
            Some(Err(message)) => Err(CollaboratorError::new(
                CollaboratorErrorKind::ApiRequest(message),
            )),
            None => Ok(mock_audio()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn voice_name(&self) -> &str {
        "mock-voice"
    }
}
