//! TOML batch file parsing.
//!
//! Defines the structure of the batch file with serde. Command entries
//! deserialize straight into the command builders, keyed by the server's
//! attribute names.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::command::{Command, ValidationError};
use crate::elytron::{
    AddAuthenticationConfigurationBuilder, AddClientSslContextBuilder, AddCredentialStoreBuilder,
    AddCustomRealmBuilder, AddFilesystemRealmBuilder, AddHttpAuthenticationFactoryBuilder,
    AddSecurityDomainBuilder, AddX500AttributePrincipalDecoderBuilder,
};

use super::ConfigError;

/// Root structure of the batch file.
///
/// All sections are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Backend selection
    #[serde(default)]
    pub target: TargetSection,

    /// Reload waiting behavior
    #[serde(default)]
    pub reload: ReloadSection,

    /// Commands in application order
    #[serde(default, rename = "command")]
    pub commands: Vec<CommandEntry>,
}

/// Backend selection section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetSection {
    /// Management endpoint URL
    pub url: Option<String>,

    /// Offline configuration document path
    pub document: Option<PathBuf>,

    /// HTTP headers as key-value pairs
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Bearer token for Authorization header
    pub bearer: Option<String>,
}

/// Reload waiting section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReloadSection {
    /// Reload timeout in seconds
    pub timeout: Option<u64>,

    /// Pause between server state reads in seconds
    pub poll_interval: Option<u64>,
}

/// One `[[command]]` entry, tagged by resource type.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum CommandEntry {
    /// `kind = "authentication-configuration"`
    AuthenticationConfiguration(AddAuthenticationConfigurationBuilder),
    /// `kind = "client-ssl-context"`
    ClientSslContext(AddClientSslContextBuilder),
    /// `kind = "credential-store"`
    CredentialStore(AddCredentialStoreBuilder),
    /// `kind = "custom-realm"`
    CustomRealm(AddCustomRealmBuilder),
    /// `kind = "filesystem-realm"`
    FilesystemRealm(AddFilesystemRealmBuilder),
    /// `kind = "http-authentication-factory"`
    HttpAuthenticationFactory(AddHttpAuthenticationFactoryBuilder),
    /// `kind = "security-domain"`
    SecurityDomain(AddSecurityDomainBuilder),
    /// `kind = "x500-attribute-principal-decoder"`
    #[serde(rename = "x500-attribute-principal-decoder")]
    X500AttributePrincipalDecoder(AddX500AttributePrincipalDecoderBuilder),
}

impl CommandEntry {
    /// The entry's `kind` tag.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::AuthenticationConfiguration(_) => "authentication-configuration",
            Self::ClientSslContext(_) => "client-ssl-context",
            Self::CredentialStore(_) => "credential-store",
            Self::CustomRealm(_) => "custom-realm",
            Self::FilesystemRealm(_) => "filesystem-realm",
            Self::HttpAuthenticationFactory(_) => "http-authentication-factory",
            Self::SecurityDomain(_) => "security-domain",
            Self::X500AttributePrincipalDecoder(_) => "x500-attribute-principal-decoder",
        }
    }

    /// Runs the entry through its builder.
    ///
    /// # Errors
    ///
    /// Returns the builder's [`ValidationError`].
    pub fn build(self) -> Result<Box<dyn Command>, ValidationError> {
        let command: Box<dyn Command> = match self {
            Self::AuthenticationConfiguration(b) => Box::new(b.build()?),
            Self::ClientSslContext(b) => Box::new(b.build()?),
            Self::CredentialStore(b) => Box::new(b.build()?),
            Self::CustomRealm(b) => Box::new(b.build()?),
            Self::FilesystemRealm(b) => Box::new(b.build()?),
            Self::HttpAuthenticationFactory(b) => Box::new(b.build()?),
            Self::SecurityDomain(b) => Box::new(b.build()?),
            Self::X500AttributePrincipalDecoder(b) => Box::new(b.build()?),
        };
        Ok(command)
    }
}

impl TomlConfig {
    /// Loads the batch file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses a batch from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a batch file template with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# elytron-ops batch file
#
# Commands run in the order listed. A failure stops the batch; commands
# already applied stay applied.

[target]
# Exactly one of url / document (CLI --url / --document override both)
# url = "http://localhost:9990/management"
# document = "standalone.json"

# HTTP headers sent with every management request
# [target.headers]
# X-Custom-Header = "value"

# Bearer token for Authorization header
# bearer = "your-token-here"

[reload]
# Seconds to wait for the server after a reload (default: 60)
# timeout = 60

# Seconds between server state reads while waiting (default: 1)
# poll_interval = 1

# Every command accepts `replace-existing = true` to remove and recreate
# an existing resource instead of failing.

# [[command]]
# kind = "filesystem-realm"
# name = "app-realm"
# path = "app-realm"
# relative-to = "jboss.server.config.dir"

# [[command]]
# kind = "security-domain"
# name = "app-domain"
# default-realm = "app-realm"
# realms = [{ realm = "app-realm" }]

# [[command]]
# kind = "x500-attribute-principal-decoder"
# name = "cn-decoder"
# oid = "2.5.4.3"
# maximum-segments = 1
# required-oids = ["2.5.4.3"]

# [[command]]
# kind = "credential-store"
# name = "store"
# uri = "cr-store://test/store.jceks?create=true"
# credential-reference = { clear-text = "secret" }
"#
    .to_string()
}
