//! Keyed store implementations for the Scrivano content pipeline.
//!
//! Two backends of the [`scrivano_interface::ContentStore`] trait:
//! an in-process map for tests and single-node deployments, and a
//! JSON-file-per-cell filesystem store for state that must survive restarts.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod filesystem;
mod memory;

pub use filesystem::FileStore;
pub use memory::MemoryStore;
