//! Error types for the Scrivano content pipeline.
//!
//! This crate provides the foundation error types used throughout the Scrivano
//! workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern for clean error handling:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use scrivano_error::{ScrivanoResult, JsonError};
//!
//! fn decode() -> ScrivanoResult<String> {
//!     Err(JsonError::new("unexpected end of input"))?
//! }
//!
//! match decode() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod collaborator;
mod config;
mod error;
mod json;
mod pipeline;
mod store;
mod validation;

pub use collaborator::{CollaboratorError, CollaboratorErrorKind, TransientError};
pub use config::ConfigError;
pub use error::{ScrivanoError, ScrivanoErrorKind, ScrivanoResult};
pub use json::JsonError;
pub use pipeline::{PipelineError, PipelineErrorKind};
pub use store::{StoreError, StoreErrorKind};
pub use validation::{ValidationError, ValidationErrorKind};
