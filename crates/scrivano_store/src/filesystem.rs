//! Filesystem-backed keyed store.

use async_trait::async_trait;
use scrivano_core::RequestId;
use scrivano_error::{StoreError, StoreErrorKind};
use scrivano_interface::{ContentStore, Namespace};
use serde_json::Value as JsonValue;
use std::path::{Path, PathBuf};

/// Keyed store persisting one JSON file per cell.
///
/// Layout: `{base}/{namespace}/{id}.json`. Writes go through a temp file and
/// rename so a crash never leaves a half-written cell visible. Cells remain
/// write-once: a put against an existing file is rejected.
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    /// Create a filesystem store rooted at `base_path`.
    ///
    /// Creates the namespace directories if they do not exist.
    ///
    /// # Errors
    ///
    /// Returns error if a directory cannot be created.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let base_path = base_path.into();
        for namespace in [Namespace::Blog, Namespace::Tts] {
            let dir = base_path.join(namespace.to_string());
            std::fs::create_dir_all(&dir).map_err(|e| {
                StoreError::new(StoreErrorKind::Io(format!("{}: {}", dir.display(), e)))
            })?;
        }
        tracing::info!(path = %base_path.display(), "Created filesystem store");
        Ok(Self { base_path })
    }

    fn cell_path(&self, namespace: Namespace, id: &RequestId) -> PathBuf {
        self.base_path
            .join(namespace.to_string())
            .join(format!("{}.json", id))
    }

    fn write_atomic(path: &Path, contents: &str) -> Result<(), StoreError> {
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, contents).map_err(|e| {
            StoreError::new(StoreErrorKind::Io(format!("{}: {}", tmp.display(), e)))
        })?;
        std::fs::rename(&tmp, path).map_err(|e| {
            StoreError::new(StoreErrorKind::Io(format!("{}: {}", path.display(), e)))
        })
    }
}

#[async_trait]
impl ContentStore for FileStore {
    #[tracing::instrument(skip(self, value), fields(namespace = %namespace, id = %id))]
    async fn put(
        &self,
        namespace: Namespace,
        id: &RequestId,
        value: JsonValue,
    ) -> Result<(), StoreError> {
        let path = self.cell_path(namespace, id);
        if path.exists() {
            return Err(StoreError::new(StoreErrorKind::AlreadyWritten {
                namespace: namespace.to_string(),
                id: id.to_string(),
            }));
        }

        let contents = serde_json::to_string_pretty(&value)
            .map_err(|e| StoreError::new(StoreErrorKind::Encode(e.to_string())))?;
        Self::write_atomic(&path, &contents)?;
        tracing::debug!(path = %path.display(), "Wrote store cell");
        Ok(())
    }

    async fn get(
        &self,
        namespace: Namespace,
        id: &RequestId,
    ) -> Result<Option<JsonValue>, StoreError> {
        let path = self.cell_path(namespace, id);
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path).map_err(|e| {
            StoreError::new(StoreErrorKind::Io(format!("{}: {}", path.display(), e)))
        })?;
        let value = serde_json::from_str(&contents)
            .map_err(|e| StoreError::new(StoreErrorKind::Decode(e.to_string())))?;
        Ok(Some(value))
    }
}
