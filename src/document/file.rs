//! JSON configuration document on disk.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;

use super::{DocumentError, DocumentTransformer, Transform, TransformRegistry};

/// A JSON document transformed in place.
///
/// Every [`apply`](DocumentTransformer::apply) reads the file, runs the
/// transform on the parsed tree and writes the result back.
///
/// # Atomic Writes
///
/// The new content is written to `{path}.tmp` and renamed over `{path}`,
/// so a failed transform or an interrupted write never leaves a partially
/// updated document behind.
#[derive(Debug, Clone)]
pub struct FileDocument {
    path: PathBuf,
    registry: Arc<TransformRegistry>,
}

impl FileDocument {
    /// Creates a handle on the document at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, registry: Arc<TransformRegistry>) -> Self {
        Self {
            path: path.into(),
            registry,
        }
    }

    /// Returns the path to the document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the document.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Read`] or [`DocumentError::Parse`].
    pub fn load(&self) -> Result<Value, DocumentError> {
        Self::load_blocking(&self.path)
    }

    fn load_blocking(path: &Path) -> Result<Value, DocumentError> {
        let content = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| DocumentError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn apply_blocking(
        path: &Path,
        registry: &TransformRegistry,
        transform: &Transform,
    ) -> Result<(), DocumentError> {
        let mut document = Self::load_blocking(path)?;
        registry.apply(&mut document, transform)?;

        let content = serde_json::to_string_pretty(&document).map_err(DocumentError::Serialize)?;
        let write_error = |source| DocumentError::Write {
            path: path.to_path_buf(),
            source,
        };

        // document.json -> document.json.tmp
        let temp_path = PathBuf::from(format!("{}.tmp", path.display()));
        std::fs::write(&temp_path, content).map_err(write_error)?;
        std::fs::rename(&temp_path, path).map_err(write_error)?;
        Ok(())
    }
}

impl DocumentTransformer for FileDocument {
    async fn apply(&self, transform: &Transform) -> Result<(), DocumentError> {
        let path = self.path.clone();
        let registry = Arc::clone(&self.registry);
        let transform = transform.clone();

        tokio::task::spawn_blocking(move || Self::apply_blocking(&path, &registry, &transform))
            .await
            .map_err(|e| DocumentError::Aborted(e.to_string()))?
    }
}
