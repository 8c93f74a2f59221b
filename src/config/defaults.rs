//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Default batch file name written by `init`.
pub const CONFIG_FILE: &str = "elytron-ops.toml";

/// Default time to wait for a reload to finish, in seconds.
pub const RELOAD_TIMEOUT_SECS: u64 = 60;

/// Default pause between server state reads during a reload, in seconds.
pub const RELOAD_POLL_INTERVAL_SECS: u64 = 1;

/// Default reload timeout as Duration.
#[must_use]
pub const fn reload_timeout() -> Duration {
    Duration::from_secs(RELOAD_TIMEOUT_SECS)
}

/// Default reload poll interval as Duration.
#[must_use]
pub const fn reload_poll_interval() -> Duration {
    Duration::from_secs(RELOAD_POLL_INTERVAL_SECS)
}
