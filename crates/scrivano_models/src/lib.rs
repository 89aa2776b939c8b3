//! Gemini collaborator clients for the Scrivano content pipeline.
//!
//! Two clients back the pipeline's collaborator traits:
//! - [`GeminiClient`] implements `ContentDriver` over the Gemini REST API via
//!   `gemini-rust`, used by the enhancement and generation stages.
//! - [`GeminiTtsClient`] implements `SpeechDriver` by calling the Gemini
//!   speech-preview endpoint directly, since the SDK does not expose speech
//!   generation config.
//!
//! Both read their API key from the `GEMINI_API_KEY` environment variable.
//!
//! # Example
//!
//! ```no_run
//! use scrivano_models::GeminiClient;
//! use scrivano_interface::ContentDriver;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GeminiClient::new()?;
//! let reply = client.generate_text("Suggest three blog titles about Rust.").await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod gemini;

pub use gemini::{GeminiClient, GeminiTtsClient};
