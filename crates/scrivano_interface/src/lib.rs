//! Trait definitions for Scrivano collaborators and the keyed store.
//!
//! The pipeline treats its external AI services and its persistence layer as
//! opaque collaborators behind these traits. Provider implementations live in
//! `scrivano_models`; store implementations live in `scrivano_store`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod store;
mod traits;

pub use store::{ContentStore, Namespace};
pub use traits::{ContentDriver, SpeechDriver};
