//! Configuration commands and the idempotent upsert protocol.
//!
//! This module provides:
//! - The contract every configuration change implements ([`Command`])
//! - The shared upsert sequence against either backend ([`apply_live`], [`apply_offline`])
//! - Ordered batch execution against exactly one backend ([`Dispatcher`], [`Backend`])
//!
//! # Upsert
//!
//! Against a live session a command runs
//! `START -> (replace? REMOVE_IF_EXISTS -> RELOAD_IF_REQUIRED) -> ADD -> DONE`.
//! Against an offline document the same intent is one named transform whose
//! `replace-existing` parameter selects insert or replace.
//! Nothing is retried and nothing is rolled back: a removal stays removed if
//! the following add fails.

mod dispatch;
mod error;
mod upsert;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

use std::fmt;

pub use dispatch::{Backend, Dispatcher};
pub use error::{BackendError, BatchError, CommandError, Step, ValidationError};
pub use upsert::{apply_live, apply_offline};

use crate::Address;
use crate::document::{NAME_PARAMETER, REPLACE_PARAMETER, Transform};
use crate::values::ValueSet;

/// A validated, immutable configuration change.
///
/// Implementors only describe the change; the upsert sequence itself lives in
/// [`apply_live`] and [`apply_offline`] so that every command follows it
/// identically. The same command may be applied any number of times, against
/// either backend.
pub trait Command: fmt::Debug + Send + Sync {
    /// The resource type, e.g. `"security-domain"`.
    fn kind(&self) -> &'static str;

    /// The node this command creates.
    fn address(&self) -> Address;

    /// The attributes of the node, built fresh on every call.
    fn values(&self) -> ValueSet;

    /// Whether an existing node is removed and recreated.
    fn replace_existing(&self) -> bool;

    /// The offline equivalent of this command, if it has one.
    fn offline(&self) -> Option<Transform> {
        None
    }
}

/// Builds the standard "insert named resource" transform for `command`.
///
/// The transform is located at the parent of the command's address and
/// receives the leaf name, every attribute, and the replace flag. Returns
/// `None` for a top-level address, which has no parent subtree.
#[must_use]
pub fn add_transform<C: Command + ?Sized>(id: &str, command: &C) -> Option<Transform> {
    let address = command.address();
    let parent = address.parent()?;

    Some(
        Transform::new(id, parent)
            .parameter(NAME_PARAMETER, Some(address.leaf().name()))
            .values(&command.values())
            .parameter(REPLACE_PARAMETER, Some(command.replace_existing())),
    )
}
