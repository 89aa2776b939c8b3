//! Staged content-generation pipeline for Scrivano.
//!
//! Requests flow through three asynchronous stages after intake:
//!
//! 1. **Enhancement** - enrich the request into an SEO brief (never fatal);
//! 2. **Generation** - write and parse the article, persist it (fatal on
//!    collaborator failure);
//! 3. **Synthesis** - narrate the article to audio under a retry policy,
//!    always recording an artifact.
//!
//! Each stage is a single-consumer worker fed by a bounded channel; the
//! [`Pipeline`] wires them together. Results are read back through
//! [`Retrieval`], which exposes the progressive-completion model: the article
//! appears before its audio. [`Suggest`] sits beside the stages and proposes
//! request metadata for a bare topic.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod enhance;
mod extract;
mod generate;
mod intake;
mod messages;
mod parser;
mod pipeline;
mod retrieval;
mod retry;
mod suggest;
mod synthesis;

pub use enhance::EnhanceStage;
pub use extract::{extract_json, parse_json};
pub use generate::GenerateStage;
pub use intake::{Intake, IntakeAck};
pub use messages::{EnhanceJob, GenerateJob, SynthesisJob};
pub use parser::{ParsedArticle, parse_article};
pub use pipeline::Pipeline;
pub use retrieval::{AudioFetch, Retrieval};
pub use retry::RetryPolicy;
pub use suggest::Suggest;
pub use synthesis::SynthesisStage;
