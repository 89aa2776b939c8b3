//! The keyed store trait.

use async_trait::async_trait;
use scrivano_core::RequestId;
use scrivano_error::StoreError;
use serde_json::Value as JsonValue;

/// Logical partition of the keyed store.
///
/// The article and audio artifacts live in separate namespaces so article
/// retrieval is never blocked by audio failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Namespace {
    /// Persisted articles
    Blog,
    /// Persisted audio artifacts and failure markers
    Tts,
}

/// Trait for pluggable keyed stores.
///
/// State is partitioned by `(namespace, id)`. Each cell is written by exactly
/// one stage, exactly once; no stage re-reads-and-updates a cell it wrote, so
/// implementations only need atomic put/get per key, not transactions. There
/// is no delete and no listing.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Write a value into a cell.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the cell was already written or the value
    /// could not be stored.
    async fn put(
        &self,
        namespace: Namespace,
        id: &RequestId,
        value: JsonValue,
    ) -> Result<(), StoreError>;

    /// Read a cell, returning `None` when nothing has been written yet.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] only for backend failures; an absent cell is
    /// not an error.
    async fn get(
        &self,
        namespace: Namespace,
        id: &RequestId,
    ) -> Result<Option<JsonValue>, StoreError>;
}
