//! `client-ssl-context` resources.

use serde::Deserialize;

use crate::Address;
use crate::command::{Command, ValidationError, add_transform};
use crate::document::Transform;
use crate::values::ValueSet;

use super::{check_name, resource};

pub(super) const KIND: &str = "client-ssl-context";
pub(super) const TRANSFORM: &str = "add-client-ssl-context";

/// Adds an SSL context for outbound connections.
#[derive(Debug, Clone)]
pub struct AddClientSslContext {
    name: String,
    cipher_suite_filter: Option<String>,
    maximum_session_cache_size: Option<u32>,
    session_timeout: Option<u32>,
    key_managers: Option<String>,
    trust_managers: Option<String>,
    protocols: Vec<String>,
    providers: Option<String>,
    provider_name: Option<String>,
    replace_existing: bool,
}

impl AddClientSslContext {
    /// Starts building a context called `name`.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> AddClientSslContextBuilder {
        AddClientSslContextBuilder {
            name: name.into(),
            ..AddClientSslContextBuilder::default()
        }
    }
}

impl Command for AddClientSslContext {
    fn kind(&self) -> &'static str {
        KIND
    }

    fn address(&self) -> Address {
        resource(KIND, &self.name)
    }

    fn values(&self) -> ValueSet {
        ValueSet::empty()
            .and_optional("cipher-suite-filter", self.cipher_suite_filter.as_deref())
            .and_optional("maximum-session-cache-size", self.maximum_session_cache_size)
            .and_optional("session-timeout", self.session_timeout)
            .and_optional("key-managers", self.key_managers.as_deref())
            .and_optional("trust-managers", self.trust_managers.as_deref())
            .and_list_optional("protocols", &self.protocols)
            .and_optional("providers", self.providers.as_deref())
            .and_optional("provider-name", self.provider_name.as_deref())
    }

    fn replace_existing(&self) -> bool {
        self.replace_existing
    }

    fn offline(&self) -> Option<Transform> {
        add_transform(TRANSFORM, self)
    }
}

/// Builder for [`AddClientSslContext`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct AddClientSslContextBuilder {
    name: String,
    cipher_suite_filter: Option<String>,
    maximum_session_cache_size: Option<u32>,
    session_timeout: Option<u32>,
    key_managers: Option<String>,
    trust_managers: Option<String>,
    protocols: Vec<String>,
    providers: Option<String>,
    provider_name: Option<String>,
    replace_existing: bool,
}

impl AddClientSslContextBuilder {
    /// Sets the cipher suite filter, e.g. `DEFAULT`.
    #[must_use]
    pub fn cipher_suite_filter(mut self, filter: impl Into<String>) -> Self {
        self.cipher_suite_filter = Some(filter.into());
        self
    }

    /// Sets the maximum number of cached SSL sessions.
    #[must_use]
    pub const fn maximum_session_cache_size(mut self, size: u32) -> Self {
        self.maximum_session_cache_size = Some(size);
        self
    }

    /// Sets the session timeout in seconds.
    #[must_use]
    pub const fn session_timeout(mut self, seconds: u32) -> Self {
        self.session_timeout = Some(seconds);
        self
    }

    /// Names the key manager.
    #[must_use]
    pub fn key_managers(mut self, name: impl Into<String>) -> Self {
        self.key_managers = Some(name.into());
        self
    }

    /// Names the trust manager.
    #[must_use]
    pub fn trust_managers(mut self, name: impl Into<String>) -> Self {
        self.trust_managers = Some(name.into());
        self
    }

    /// Appends enabled protocols, keeping their order.
    #[must_use]
    pub fn protocols<I, S>(mut self, protocols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.protocols.extend(protocols.into_iter().map(Into::into));
        self
    }

    /// Names the provider source.
    #[must_use]
    pub fn providers(mut self, providers: impl Into<String>) -> Self {
        self.providers = Some(providers.into());
        self
    }

    /// Selects one provider by name.
    #[must_use]
    pub fn provider_name(mut self, name: impl Into<String>) -> Self {
        self.provider_name = Some(name.into());
        self
    }

    /// Removes and recreates an existing context.
    #[must_use]
    pub const fn replace_existing(mut self) -> Self {
        self.replace_existing = true;
        self
    }

    /// Validates and builds the command.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingName`] for an empty name.
    pub fn build(self) -> Result<AddClientSslContext, ValidationError> {
        check_name(&self.name, KIND)?;

        Ok(AddClientSslContext {
            name: self.name,
            cipher_suite_filter: self.cipher_suite_filter,
            maximum_session_cache_size: self.maximum_session_cache_size,
            session_timeout: self.session_timeout,
            key_managers: self.key_managers,
            trust_managers: self.trust_managers,
            protocols: self.protocols,
            providers: self.providers,
            provider_name: self.provider_name,
            replace_existing: self.replace_existing,
        })
    }
}
