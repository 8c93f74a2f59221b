//! Error types for live management sessions.

use std::time::Duration;

use thiserror::Error;

use crate::Address;

/// Error type for the HTTP transport underneath a session.
///
/// Describes what went wrong on the wire without dictating recovery.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// and connections dropped while the server restarts.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,

    /// The management endpoint URL is invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Error type for operations against a live management session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The target node already exists.
    #[error("Duplicate resource {address}")]
    DuplicateResource {
        /// Address of the existing node
        address: Address,
    },

    /// The server rejected one or more attribute values.
    #[error("Invalid attributes for {address}: {detail}")]
    InvalidAttributes {
        /// Address of the rejected node
        address: Address,
        /// Server failure description
        detail: String,
    },

    /// The node or attribute does not exist.
    #[error("Attribute '{attribute}' not found at {address}")]
    NotFound {
        /// Address that was queried
        address: Address,
        /// Attribute that was queried
        attribute: String,
    },

    /// The server reported a failed outcome for another reason.
    #[error("Operation '{operation}' failed on {target}: {detail}")]
    Failed {
        /// Operation name, e.g. `remove`
        operation: String,
        /// Rendered address, `/` for the root
        target: String,
        /// Server failure description
        detail: String,
    },

    /// The server could not be reached (BackendUnavailable).
    #[error("Management endpoint unavailable: {0}")]
    Transport(#[from] HttpError),

    /// The response could not be understood.
    #[error("Unexpected management response: {0}")]
    Protocol(String),

    /// The server did not come back to `running` after a reload.
    #[error("Server did not finish reloading within {}s", .0.as_secs())]
    ReloadTimeout(Duration),
}

impl SessionError {
    /// Returns true for [`SessionError::DuplicateResource`].
    #[must_use]
    pub const fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateResource { .. })
    }
}
