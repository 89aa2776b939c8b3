//! Core data types for the Scrivano content pipeline.
//!
//! This crate provides the foundation data types used across all Scrivano
//! interfaces: the user-submitted generation request, the enrichment brief,
//! the parsed article, and the audio artifact.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod article;
mod audio;
mod brief;
mod request;
mod telemetry;

pub use article::{
    ArticleMetadata, ArticleSection, BlogArticle, GenerationStatus, StoredArticle,
};
pub use audio::{AudioArtifact, AudioClip, AudioFailure, SpeechAudio};
pub use brief::{EnhancedBrief, MetadataSuggestion, SeoInsights};
pub use request::{
    FormattingOptions, GenerationOptions, GenerationOptionsBuilder, GenerationRequest,
    GenerationRequestBuilder, RequestId, Style, Tone,
};
pub use telemetry::{init_telemetry, shutdown_telemetry};
