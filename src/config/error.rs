//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

use crate::address::ParseAddressError;
use crate::command::ValidationError;

/// Error type for configuration operations.
///
/// Covers errors from parsing, validation, and file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the batch file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the batch file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML batch file.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write the batch file (for init command).
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the batch file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Missing required field that must be provided by CLI or batch file.
    #[error("Missing required field: {field}. {hint}")]
    MissingRequired {
        /// Name of the missing field
        field: &'static str,
        /// Hint for how to provide the value
        hint: &'static str,
    },

    /// Both a management endpoint and a document were given by one source.
    #[error("Both url and document are set in the {source_name}; choose one target")]
    ConflictingTarget {
        /// Where the conflict was found ("command line" or "config file")
        source_name: &'static str,
    },

    /// The operation needs a running server.
    #[error("'{operation}' requires a management url, not an offline document")]
    LiveOnly {
        /// The requested operation
        operation: &'static str,
    },

    /// Invalid URL provided.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The invalid URL string
        url: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Invalid node address.
    #[error(transparent)]
    InvalidAddress(#[from] ParseAddressError),

    /// Invalid duration value (zero or too large).
    #[error("Invalid duration for {field}: {reason}")]
    InvalidDuration {
        /// Name of the field
        field: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// Invalid header format.
    #[error("Invalid header format '{value}': expected 'Key=Value' or 'Key: Value'")]
    InvalidHeader {
        /// The invalid header string
        value: String,
    },

    /// Invalid header name.
    #[error("Invalid header name '{name}': {reason}")]
    InvalidHeaderName {
        /// The invalid header name
        name: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Invalid header value.
    #[error("Invalid header value for '{name}': {reason}")]
    InvalidHeaderValue {
        /// The header name
        name: String,
        /// Reason for invalidity
        reason: String,
    },

    /// A batch entry failed its builder validation.
    #[error("Invalid command #{index} ({kind}): {source}")]
    InvalidCommand {
        /// Zero-based position in the batch file
        index: usize,
        /// The entry's `kind`
        kind: &'static str,
        /// What the builder rejected
        #[source]
        source: ValidationError,
    },
}

/// Well-known field names for `MissingRequired` errors.
///
/// Use these constants for compile-time safety when matching field names.
pub mod field {
    /// The target (url or document) field.
    pub const TARGET: &str = "target";
}

impl ConfigError {
    /// Creates a `MissingRequired` error for a required field.
    #[must_use]
    pub const fn missing(field: &'static str, hint: &'static str) -> Self {
        Self::MissingRequired { field, hint }
    }
}
