//! In-memory keyed store.

use async_trait::async_trait;
use scrivano_core::RequestId;
use scrivano_error::{StoreError, StoreErrorKind};
use scrivano_interface::{ContentStore, Namespace};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Thread-safe in-process keyed store.
///
/// Cells are partitioned by `(namespace, id)` and write-once: a second put to
/// the same cell is rejected rather than overwriting. Because every cell has
/// exactly one writer, a plain mutex-guarded map suffices; no compare-and-swap
/// discipline is needed.
///
/// # Examples
///
/// ```
/// use scrivano_store::MemoryStore;
/// use scrivano_interface::{ContentStore, Namespace};
/// use scrivano_core::RequestId;
/// use serde_json::json;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let store = MemoryStore::new();
/// let id = RequestId::mint();
///
/// store.put(Namespace::Blog, &id, json!({"title": "T"})).await?;
/// let value = store.get(Namespace::Blog, &id).await?;
/// assert!(value.is_some());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    cells: Arc<Mutex<HashMap<(Namespace, RequestId), JsonValue>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of written cells across all namespaces.
    pub fn len(&self) -> usize {
        self.cells.lock().expect("store mutex poisoned").len()
    }

    /// Whether no cell has been written yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn put(
        &self,
        namespace: Namespace,
        id: &RequestId,
        value: JsonValue,
    ) -> Result<(), StoreError> {
        let mut cells = self.cells.lock().map_err(|e| {
            StoreError::new(StoreErrorKind::Io(format!("store mutex poisoned: {}", e)))
        })?;
        if cells.contains_key(&(namespace, id.clone())) {
            return Err(StoreError::new(StoreErrorKind::AlreadyWritten {
                namespace: namespace.to_string(),
                id: id.to_string(),
            }));
        }
        tracing::debug!(namespace = %namespace, id = %id, "Writing store cell");
        cells.insert((namespace, id.clone()), value);
        Ok(())
    }

    async fn get(
        &self,
        namespace: Namespace,
        id: &RequestId,
    ) -> Result<Option<JsonValue>, StoreError> {
        let cells = self.cells.lock().map_err(|e| {
            StoreError::new(StoreErrorKind::Io(format!("store mutex poisoned: {}", e)))
        })?;
        Ok(cells.get(&(namespace, id.clone())).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_absent_cell_reads_none() {
        let store = MemoryStore::new();
        let id = RequestId::mint();
        assert!(store.get(Namespace::Blog, &id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_namespaces_are_partitioned() {
        let store = MemoryStore::new();
        let id = RequestId::mint();
        store
            .put(Namespace::Blog, &id, json!({"kind": "article"}))
            .await
            .unwrap();

        assert!(store.get(Namespace::Blog, &id).await.unwrap().is_some());
        assert!(store.get(Namespace::Tts, &id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_cells_are_write_once() {
        let store = MemoryStore::new();
        let id = RequestId::mint();
        store.put(Namespace::Tts, &id, json!(1)).await.unwrap();

        let err = store.put(Namespace::Tts, &id, json!(2)).await.unwrap_err();
        assert!(matches!(err.kind, StoreErrorKind::AlreadyWritten { .. }));

        // First write is preserved
        let value = store.get(Namespace::Tts, &id).await.unwrap().unwrap();
        assert_eq!(value, json!(1));
    }
}
