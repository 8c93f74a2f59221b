//! Error types for offline documents.

use std::path::PathBuf;

use thiserror::Error;

/// Failure raised by a transform body against the located subtree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// The subtree locator matched nothing in the document.
    #[error("Subtree '{locator}' not found in document")]
    SubtreeNotFound {
        /// The JSON pointer that was looked up
        locator: String,
    },

    /// The resource already exists and replacement was not requested.
    #[error("Resource '{kind}={name}' already exists under '{locator}'")]
    AlreadyExists {
        /// The subtree the resource lives in
        locator: String,
        /// The resource type
        kind: String,
        /// The resource name
        name: String,
    },

    /// A parameter the transform needs was not supplied.
    #[error("Missing transform parameter '{0}'")]
    MissingParameter(&'static str),

    /// The document does not have the expected shape at the subtree.
    #[error("Unexpected document structure at '{locator}': {reason}")]
    Malformed {
        /// Where the problem was found
        locator: String,
        /// What was wrong
        reason: String,
    },
}

/// Error type for document-transform operations.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// No transform is registered under the identifier.
    #[error("Transform '{0}' not found")]
    TransformNotFound(String),

    /// The transform failed to apply.
    #[error("Transform '{id}' failed: {source}")]
    Transform {
        /// Transform identifier
        id: String,
        /// What went wrong
        #[source]
        source: TransformError,
    },

    /// Failed to read the document.
    #[error("Failed to read document '{}': {source}", path.display())]
    Read {
        /// Path to the document
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON.
    #[error("Failed to parse document '{}': {source}", path.display())]
    Parse {
        /// Path to the document
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// Failed to write the document back.
    #[error("Failed to write document '{}': {source}", path.display())]
    Write {
        /// Path to the document
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize the document.
    #[error("Failed to serialize document: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The blocking document task did not complete.
    #[error("Document task aborted: {0}")]
    Aborted(String),
}

impl DocumentError {
    /// Returns true if the transform refused to overwrite an existing resource.
    #[must_use]
    pub const fn is_duplicate(&self) -> bool {
        matches!(
            self,
            Self::Transform {
                source: TransformError::AlreadyExists { .. },
                ..
            }
        )
    }
}
