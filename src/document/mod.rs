//! Offline configuration documents.
//!
//! This module provides:
//! - Named, parameterized structural transforms ([`Transform`], [`Parameters`])
//! - The transform lookup table ([`TransformRegistry`]) and the generic
//!   resource insert ([`add_resource`])
//! - The document collaborator contract ([`DocumentTransformer`])
//! - A JSON document on disk rewritten atomically per transform ([`FileDocument`])
//!
//! # Document layout
//!
//! The document mirrors the configuration tree: the node at
//! `/subsystem=elytron/key-store=ks` lives at `doc["subsystem"]["elytron"]["key-store"]["ks"]`,
//! and a subtree locator is the JSON pointer of an [`Address`](crate::Address).

mod error;
mod file;
mod registry;
mod transform;

#[cfg(test)]
pub mod mock;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

use std::future::Future;

pub use error::{DocumentError, TransformError};
pub use file::FileDocument;
pub use registry::{NAME_PARAMETER, REPLACE_PARAMETER, TransformFn, TransformRegistry, add_resource};
pub use transform::{Parameters, Transform};

/// Applies structural transforms to an offline configuration document.
///
/// The handle is owned by the caller for the lifetime of a batch.
pub trait DocumentTransformer: Send + Sync {
    /// Locates the transform's subtree and applies the named transform to it.
    ///
    /// # Errors
    ///
    /// - [`DocumentError::TransformNotFound`] if the identifier is unknown
    /// - [`DocumentError::Transform`] if the transform fails on this document
    /// - I/O variants if the document cannot be read or written
    fn apply(
        &self,
        transform: &Transform,
    ) -> impl Future<Output = Result<(), DocumentError>> + Send;
}
