//! Live management sessions.
//!
//! This module provides:
//! - The structural operations a command needs from a running server ([`ManagementSession`])
//! - The reload collaborator ([`Administration`])
//! - An HTTP transport abstraction ([`HttpClient`], [`ReqwestClient`])
//! - The JSON management protocol client ([`HttpManagementClient`])
//!
//! Timeouts and retries, if any, live in the transport. Commands treat each
//! call here as a single blocking step.

mod client;
mod error;
mod http;
mod management;

#[cfg(test)]
pub mod mock;

use std::future::Future;

pub use client::ReqwestClient;
pub use error::{HttpError, SessionError};
pub use http::{HttpClient, HttpRequest, HttpResponse};
pub use management::{HttpManagementClient, ReloadPolicy};

use crate::Address;
use crate::values::{AttributeValue, ValueSet};

/// Structural operations against a running server.
///
/// The session is owned by the caller for the lifetime of a batch and is
/// never used for concurrent structural changes.
pub trait ManagementSession: Send + Sync {
    /// Returns true if a node exists at `address`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Transport`] if the server cannot be reached.
    fn exists(&self, address: &Address) -> impl Future<Output = Result<bool, SessionError>> + Send;

    /// Creates a node at `address` with the given attributes.
    ///
    /// # Errors
    ///
    /// - [`SessionError::DuplicateResource`] if the node already exists
    /// - [`SessionError::InvalidAttributes`] if the server rejects a value
    fn add(
        &self,
        address: &Address,
        values: &ValueSet,
    ) -> impl Future<Output = Result<(), SessionError>> + Send;

    /// Removes the node at `address` if it exists.
    ///
    /// Returns whether a node was removed. A missing node is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal itself fails.
    fn remove_if_exists(
        &self,
        address: &Address,
    ) -> impl Future<Output = Result<bool, SessionError>> + Send;

    /// Reads one attribute of the node at `address`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotFound`] if the node or attribute is undefined.
    fn query(
        &self,
        address: &Address,
        attribute: &str,
    ) -> impl Future<Output = Result<AttributeValue, SessionError>> + Send;
}

/// Administrative reload collaborator.
pub trait Administration: Send + Sync {
    /// Commits pending structural changes by reloading the server if it
    /// reports that a reload is required. No-op otherwise.
    ///
    /// Returns whether a reload was performed.
    ///
    /// # Errors
    ///
    /// Returns an error if the reload fails or does not complete.
    fn reload_if_required(&self) -> impl Future<Output = Result<bool, SessionError>> + Send;

    /// Forces a full reload and waits for the server to come back.
    ///
    /// # Errors
    ///
    /// Returns an error if the reload fails or does not complete.
    fn reload(&self) -> impl Future<Output = Result<(), SessionError>> + Send;
}
