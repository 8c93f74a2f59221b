//! In-memory document for testing.

use std::sync::Mutex;

use serde_json::Value;

use super::{DocumentError, DocumentTransformer, Transform, TransformRegistry};

/// Mock implementation of [`DocumentTransformer`] over an in-memory tree.
#[derive(Debug)]
pub struct MemoryDocument {
    document: Mutex<Value>,
    registry: TransformRegistry,
    applied: Mutex<Vec<Transform>>,
}

impl MemoryDocument {
    /// Creates a document with the given content and transforms.
    #[must_use]
    pub fn new(document: Value, registry: TransformRegistry) -> Self {
        Self {
            document: Mutex::new(document),
            registry,
            applied: Mutex::new(Vec::new()),
        }
    }

    /// A copy of the current document.
    #[must_use]
    pub fn snapshot(&self) -> Value {
        self.document.lock().unwrap().clone()
    }

    /// Every transform passed to `apply`, successful or not.
    #[must_use]
    pub fn applied(&self) -> Vec<Transform> {
        self.applied.lock().unwrap().clone()
    }
}

impl DocumentTransformer for MemoryDocument {
    async fn apply(&self, transform: &Transform) -> Result<(), DocumentError> {
        self.applied.lock().unwrap().push(transform.clone());
        let mut document = self.document.lock().unwrap();
        self.registry.apply(&mut document, transform)
    }
}
