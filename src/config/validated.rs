//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use http::HeaderMap;
use http::header::{AUTHORIZATION, HeaderName, HeaderValue};
use url::Url;

use crate::Address;
use crate::command::Command;
use crate::session::ReloadPolicy;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// The backend a batch runs against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A running server's management endpoint.
    Live {
        /// Endpoint URL
        url: Url,
        /// Headers sent with every request
        headers: HeaderMap,
    },
    /// An offline configuration document.
    Offline {
        /// Path to the document
        document: PathBuf,
    },
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Live { url, .. } => write!(f, "live {url}"),
            Self::Offline { document } => write!(f, "offline {}", document.display()),
        }
    }
}

/// A single attribute read requested on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// Node to read from
    pub address: Address,
    /// Attribute to read
    pub attribute: String,
}

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs, including every command of the batch,
/// and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Backend selection (required)
    pub target: Target,

    /// How long to wait for reloads
    pub reload: ReloadPolicy,

    /// Commands in application order
    pub commands: Vec<Box<dyn Command>>,

    /// Attribute read requested instead of applying the batch
    pub query: Option<Query>,

    /// Dry-run mode (log commands without applying them)
    pub dry_run: bool,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ target: {}, commands: {}, reload_timeout: {}s, dry_run: {} }}",
            self.target,
            self.commands.len(),
            self.reload.timeout.as_secs(),
            self.dry_run,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No target is given, or one source names both `url` and `document`
    /// - The URL, a header or the query address is invalid
    /// - A duration is zero
    /// - A query is requested against an offline document
    /// - A batch command fails its builder validation
    pub fn from_raw(cli: &Cli, toml: Option<TomlConfig>) -> Result<Self, ConfigError> {
        let target = Self::resolve_target(cli, toml.as_ref())?;
        let reload = Self::resolve_reload(cli, toml.as_ref())?;

        let query = cli
            .query()
            .map(|(address, attribute)| {
                if matches!(target, Target::Offline { .. }) {
                    return Err(ConfigError::LiveOnly { operation: "query" });
                }
                Ok(Query {
                    address: address.parse()?,
                    attribute: attribute.to_string(),
                })
            })
            .transpose()?;

        let commands = toml
            .map(|t| t.commands)
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                let kind = entry.kind();
                entry
                    .build()
                    .map_err(|source| ConfigError::InvalidCommand {
                        index,
                        kind,
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            target,
            reload,
            commands,
            query,
            dry_run: cli.dry_run,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional batch file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The batch file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml)
    }

    fn resolve_target(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Target, ConfigError> {
        let (url, document, source_name) = if cli.url.is_some() || cli.document.is_some() {
            (cli.url.as_deref(), cli.document.as_deref(), "command line")
        } else {
            let target = toml.map(|t| &t.target);
            (
                target.and_then(|t| t.url.as_deref()),
                target.and_then(|t| t.document.as_deref()),
                "config file",
            )
        };

        match (url, document) {
            (Some(_), Some(_)) => Err(ConfigError::ConflictingTarget { source_name }),
            (Some(url), None) => Ok(Target::Live {
                url: parse_url(url)?,
                headers: Self::resolve_headers(cli, toml)?,
            }),
            (None, Some(document)) => Ok(Target::Offline {
                document: document.to_path_buf(),
            }),
            (None, None) => Err(ConfigError::missing(
                field::TARGET,
                "Use --url or --document, or set target.url or target.document in config file",
            )),
        }
    }

    fn resolve_headers(cli: &Cli, toml: Option<&TomlConfig>) -> Result<HeaderMap, ConfigError> {
        let mut headers = HeaderMap::new();

        // TOML first so CLI entries override
        if let Some(toml) = toml {
            for (name, value) in &toml.target.headers {
                headers.insert(parse_header_name(name)?, parse_header_value(name, value)?);
            }
        }

        for header_str in &cli.headers {
            let (name, value) = parse_header_string(header_str)?;
            headers.insert(parse_header_name(&name)?, parse_header_value(&name, &value)?);
        }

        let bearer = cli
            .bearer
            .as_deref()
            .or_else(|| toml.and_then(|t| t.target.bearer.as_deref()));

        if let Some(token) = bearer {
            let auth_value = format!("Bearer {token}");
            headers.insert(AUTHORIZATION, parse_header_value("Authorization", &auth_value)?);
        }

        Ok(headers)
    }

    fn resolve_reload(cli: &Cli, toml: Option<&TomlConfig>) -> Result<ReloadPolicy, ConfigError> {
        let reload = toml.map(|t| &t.reload);

        // Priority: CLI explicit > TOML > default
        let timeout = cli
            .reload_timeout
            .or_else(|| reload.and_then(|r| r.timeout))
            .unwrap_or(defaults::RELOAD_TIMEOUT_SECS);
        let poll_interval = reload
            .and_then(|r| r.poll_interval)
            .unwrap_or(defaults::RELOAD_POLL_INTERVAL_SECS);

        let timeout = positive_secs("reload.timeout", timeout)?;
        let poll_interval = positive_secs("reload.poll_interval", poll_interval)?;
        if poll_interval > timeout {
            return Err(ConfigError::InvalidDuration {
                field: "reload.poll_interval",
                reason: format!(
                    "must not exceed reload.timeout ({}s)",
                    timeout.as_secs()
                ),
            });
        }

        Ok(ReloadPolicy::new()
            .with_timeout(timeout)
            .with_poll_interval(poll_interval))
    }
}

/// Writes the batch file template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn parse_url(url: &str) -> Result<Url, ConfigError> {
    let parsed = Url::parse(url).map_err(|e| ConfigError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(ConfigError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}

fn positive_secs(field: &'static str, seconds: u64) -> Result<Duration, ConfigError> {
    if seconds == 0 {
        return Err(ConfigError::InvalidDuration {
            field,
            reason: "must be greater than 0".to_string(),
        });
    }
    Ok(Duration::from_secs(seconds))
}

fn parse_header_string(s: &str) -> Result<(String, String), ConfigError> {
    // "Key=Value" first, then "Key: Value"
    if let Some((name, value)) = s.split_once('=') {
        return Ok((name.trim().to_string(), value.trim().to_string()));
    }

    if let Some((name, value)) = s.split_once(':') {
        return Ok((name.trim().to_string(), value.trim().to_string()));
    }

    Err(ConfigError::InvalidHeader {
        value: s.to_string(),
    })
}

fn parse_header_name(name: &str) -> Result<HeaderName, ConfigError> {
    name.parse::<HeaderName>()
        .map_err(|e| ConfigError::InvalidHeaderName {
            name: name.to_string(),
            reason: e.to_string(),
        })
}

fn parse_header_value(name: &str, value: &str) -> Result<HeaderValue, ConfigError> {
    HeaderValue::from_str(value).map_err(|e| ConfigError::InvalidHeaderValue {
        name: name.to_string(),
        reason: e.to_string(),
    })
}
