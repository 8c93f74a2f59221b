//! Configuration layer for elytron-ops.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Action`])
//! - TOML batch file parsing ([`TomlConfig`], [`CommandEntry`])
//! - Validated configuration ([`ValidatedConfig`], [`Target`])
//! - Batch template generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML batch file** - Values from the `[target]` and `[reload]` sections
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! # Target Selection
//!
//! A batch runs against exactly one backend: a management endpoint (`url`)
//! or an offline document (`document`). If the CLI names either one, the
//! CLI alone decides the target and the file's `[target]` choice is ignored.
//! Naming both in the same source is an error, as is naming neither.
//!
//! Headers merge: file headers first, then CLI headers, then the bearer token.
//!
//! # Commands
//!
//! Commands come only from the batch file. Each `[[command]]` entry is run
//! through its builder while loading, so an invalid command is reported with
//! its position before any backend is contacted.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod validated_tests;

pub use cli::{Action, Cli};
pub use error::{ConfigError, field};
pub use toml::{CommandEntry, TomlConfig, default_config_template};
pub use validated::{Query, Target, ValidatedConfig, write_default_config};
