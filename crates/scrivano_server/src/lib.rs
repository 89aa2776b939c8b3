//! HTTP surface and runtime for the Scrivano content pipeline.
//!
//! Four endpoints over the pipeline:
//! - `POST /api/generate-content` accepts a request and returns the polling id;
//! - `POST /api/suggest-blog-metadata` suggests keywords, audience, and
//!   context for a bare topic;
//! - `GET /api/content/:id` returns the article, with audio merged in once
//!   synthesized;
//! - `GET /api/audio/:id` streams the narration as a WAV download.
//!
//! [`ContentPoller`] is the matching client: it polls the content endpoint
//! and distinguishes complete, article-only, and timed-out results.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod poller;
mod routes;
mod wav;

pub use config::{ModelsSection, RetrySection, ScrivanoConfig, ServerSection, StoreSection};
pub use poller::{ContentPoller, PollOutcome};
pub use routes::{AppState, create_router};
pub use wav::encode_wav;
