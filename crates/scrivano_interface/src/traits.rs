//! Trait definitions for external AI collaborators.

use async_trait::async_trait;
use scrivano_core::SpeechAudio;
use scrivano_error::CollaboratorError;

/// Core trait for text-generating collaborators.
///
/// Both the enhancement stage and the generation stage speak to a
/// `ContentDriver`: a structured prompt goes in, free text comes out. The
/// reply carries no schema guarantee; callers are responsible for best-effort
/// extraction.
#[async_trait]
pub trait ContentDriver: Send + Sync {
    /// Generate free text from a prompt.
    ///
    /// # Errors
    ///
    /// Returns a [`CollaboratorError`] when the underlying call fails. Whether
    /// that failure halts the pipeline depends on the calling stage.
    async fn generate_text(&self, prompt: &str) -> Result<String, CollaboratorError>;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gemini-2.5-pro").
    fn model_name(&self) -> &str;
}

/// Trait for speech-synthesis collaborators.
///
/// Text in, raw audio out. Errors carry provider-specific messages; the
/// synthesis stage classifies transience by matching message substrings
/// against its retry policy.
#[async_trait]
pub trait SpeechDriver: Send + Sync {
    /// Synthesize speech for the given text.
    ///
    /// # Errors
    ///
    /// Returns a [`CollaboratorError`] when the call fails or delivers no
    /// audio payload.
    async fn synthesize(&self, text: &str) -> Result<SpeechAudio, CollaboratorError>;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;

    /// Voice identifier used for synthesis (e.g., "Kore").
    fn voice_name(&self) -> &str;
}
