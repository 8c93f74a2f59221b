//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::defaults;

/// elytron-ops: idempotent security subsystem configuration
///
/// Applies a batch of configuration commands to a running server over its
/// management API, or to an offline configuration document.
#[derive(Debug, Parser)]
#[command(name = "elytron-ops")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run (default: apply)
    #[command(subcommand)]
    pub action: Option<Action>,

    /// Path to the batch file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Management endpoint of a running server
    #[arg(long, global = true, value_name = "URL")]
    pub url: Option<String>,

    /// Offline configuration document to rewrite
    #[arg(long, global = true, value_name = "PATH")]
    pub document: Option<PathBuf>,

    /// HTTP headers in 'Key=Value' or 'Key: Value' format (can be specified multiple times)
    #[arg(long = "header", value_name = "K=V", global = true)]
    pub headers: Vec<String>,

    /// Bearer token for the Authorization header
    #[arg(long, global = true)]
    pub bearer: Option<String>,

    /// Seconds to wait for the server to come back after a reload
    #[arg(long = "reload-timeout", value_name = "SECS", global = true)]
    pub reload_timeout: Option<u64>,

    /// Log each command's address and attributes without applying it
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for elytron-ops
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Action {
    /// Apply every command in the batch file
    Apply,

    /// Generate a batch file template
    Init {
        /// Output path for the batch file
        #[arg(long, short, default_value = defaults::CONFIG_FILE)]
        output: PathBuf,
    },

    /// Read one attribute from a running server
    Query {
        /// Node address, e.g. /subsystem=elytron/key-store=ks
        #[arg(long)]
        address: String,

        /// Attribute name
        #[arg(long)]
        attribute: String,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.action, Some(Action::Init { .. }))
    }

    /// Returns the address and attribute of a query command.
    #[must_use]
    pub fn query(&self) -> Option<(&str, &str)> {
        match &self.action {
            Some(Action::Query { address, attribute }) => {
                Some((address.as_str(), attribute.as_str()))
            }
            _ => None,
        }
    }
}
