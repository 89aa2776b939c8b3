//! Scrivano - AI Blog Generation Pipeline
//!
//! Scrivano turns a topic and a handful of keywords into a structured,
//! SEO-optimized blog article with a narrated audio version, driving Google
//! Gemini through a staged asynchronous pipeline.
//!
//! # Features
//!
//! - **Staged Pipeline**: intake, prompt enhancement, content generation, and
//!   speech synthesis as independent channel-fed workers
//! - **Graceful Degradation**: enhancement failures fall back to the original
//!   request; synthesis failures still deliver the article
//! - **Progressive Results**: the article becomes readable before its audio
//!   finishes; a poller distinguishes complete from article-only outcomes
//! - **Deterministic Parsing**: generated markdown becomes a structured
//!   article with ordered sections, never erroring on malformed output
//! - **HTTP Surface**: submit, poll, and download endpoints over axum
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use scrivano::{
//!     GeminiClient, GeminiTtsClient, GenerationRequest, MemoryStore, Pipeline, RetryPolicy,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pipeline = Pipeline::start(
//!         Arc::new(GeminiClient::new()?),
//!         Arc::new(GeminiTtsClient::new()?),
//!         Arc::new(MemoryStore::new()),
//!         RetryPolicy::default(),
//!     );
//!
//!     let ack = pipeline
//!         .intake()
//!         .submit(GenerationRequest {
//!             topic: "Async Rust in production".to_string(),
//!             keywords: vec!["rust".to_string(), "tokio".to_string()],
//!             target_audience: None,
//!             additional_context: None,
//!             options: None,
//!         })
//!         .await?;
//!     println!("Poll /api/content/{}", ack.id);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Scrivano is organized as a workspace with focused crates:
//!
//! - `scrivano_core` - Core data types (requests, briefs, articles, audio)
//! - `scrivano_interface` - Collaborator and store trait definitions
//! - `scrivano_error` - Error types
//! - `scrivano_store` - Keyed store backends (memory, filesystem)
//! - `scrivano_models` - Gemini collaborator clients
//! - `scrivano_pipeline` - The staged pipeline itself
//! - `scrivano_server` - HTTP surface, configuration, and the poller
//!
//! This crate (`scrivano`) re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use scrivano_core::{
    ArticleMetadata, ArticleSection, AudioArtifact, AudioClip, AudioFailure, BlogArticle,
    EnhancedBrief, FormattingOptions, GenerationOptions, GenerationRequest, GenerationStatus,
    MetadataSuggestion, RequestId, SeoInsights, SpeechAudio, StoredArticle, Style, Tone,
    init_telemetry, shutdown_telemetry,
};
pub use scrivano_error::{
    CollaboratorError, CollaboratorErrorKind, ConfigError, JsonError, PipelineError,
    PipelineErrorKind, ScrivanoError, ScrivanoErrorKind, ScrivanoResult, StoreError,
    StoreErrorKind, TransientError, ValidationError, ValidationErrorKind,
};
pub use scrivano_interface::{ContentDriver, ContentStore, Namespace, SpeechDriver};
pub use scrivano_models::{GeminiClient, GeminiTtsClient};
pub use scrivano_pipeline::{
    AudioFetch, EnhanceJob, GenerateJob, Intake, IntakeAck, ParsedArticle, Pipeline, Retrieval,
    RetryPolicy, Suggest, SynthesisJob, parse_article,
};
pub use scrivano_server::{AppState, ContentPoller, PollOutcome, ScrivanoConfig, create_router, encode_wav};
pub use scrivano_store::{FileStore, MemoryStore};
