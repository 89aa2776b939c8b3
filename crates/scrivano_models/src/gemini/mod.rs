//! Google Gemini API client implementations.
//!
//! - [`GeminiClient`] - REST API client for text generation
//! - [`GeminiTtsClient`] - speech synthesis against the TTS preview models

mod client;
mod tts;

pub use client::GeminiClient;
pub use tts::GeminiTtsClient;

/// Result type for Gemini operations.
pub type GeminiResult<T> = Result<T, scrivano_error::CollaboratorError>;
