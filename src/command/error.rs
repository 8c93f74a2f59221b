//! Error types for commands.

use std::fmt;

use thiserror::Error;

use crate::Address;
use crate::document::DocumentError;
use crate::session::SessionError;

/// Builder-time validation failure.
///
/// Raised by `build()` before any backend is contacted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The resource name is empty.
    #[error("Name of the {resource} must be specified")]
    MissingName {
        /// The resource type being built
        resource: &'static str,
    },

    /// A required field was not set.
    #[error("'{field}' must be specified")]
    Missing {
        /// The field name
        field: &'static str,
    },

    /// A required field was set to an empty value.
    #[error("'{field}' must not be empty")]
    Empty {
        /// The field name
        field: &'static str,
    },

    /// A field lacks its mandatory literal prefix.
    #[error("'{field}' must start with '{prefix}'")]
    MissingPrefix {
        /// The field name
        field: &'static str,
        /// The required prefix
        prefix: &'static str,
    },

    /// Two mutually exclusive options were both set.
    #[error("'{first}' cannot be combined with '{second}'")]
    Conflict {
        /// The option set first
        first: &'static str,
        /// The conflicting option
        second: &'static str,
    },

    /// The credential reference does not select exactly one mode.
    #[error("Invalid credential reference: {0}")]
    Credential(String),
}

/// The protocol step a command failed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Removing the existing node before a replace.
    Remove,
    /// Reloading after the removal.
    Reload,
    /// Creating the node (or applying the offline transform).
    Add,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Remove => "remove",
            Self::Reload => "reload",
            Self::Add => "add",
        })
    }
}

/// The collaborator error behind a failed step.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Live session failure.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Offline document failure.
    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// Error type for applying a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The command has no offline representation.
    #[error("Command '{command}' for {address} cannot be applied to an offline document")]
    Unsupported {
        /// The command kind
        command: &'static str,
        /// The target address
        address: Address,
    },

    /// A backend call failed.
    #[error("Step '{step}' failed for {address}: {source}")]
    Failed {
        /// The target address
        address: Address,
        /// The step that failed
        step: Step,
        /// The collaborator's error
        #[source]
        source: BackendError,
    },
}

impl CommandError {
    /// Returns true if the target already existed and replacement was not requested.
    #[must_use]
    pub const fn is_duplicate(&self) -> bool {
        match self {
            Self::Failed {
                source: BackendError::Session(err),
                ..
            } => err.is_duplicate(),
            Self::Failed {
                source: BackendError::Document(err),
                ..
            } => err.is_duplicate(),
            Self::Unsupported { .. } => false,
        }
    }

    /// The step that failed, if a backend was contacted.
    #[must_use]
    pub const fn step(&self) -> Option<Step> {
        match self {
            Self::Failed { step, .. } => Some(*step),
            Self::Unsupported { .. } => None,
        }
    }
}

/// A command failure within a batch.
#[derive(Debug, Error)]
#[error("Command #{index} ({command}) failed: {source}")]
pub struct BatchError {
    /// Zero-based position of the failed command in the batch
    pub index: usize,
    /// The command kind
    pub command: &'static str,
    /// What went wrong
    #[source]
    pub source: CommandError,
}
