//! `http-authentication-factory` resources.

use serde::Deserialize;

use crate::Address;
use crate::command::{Command, ValidationError};
use crate::values::ValueSet;

use super::{Mechanism, check_name, required, resource};

const KIND: &str = "http-authentication-factory";

/// Adds an HTTP authentication factory.
///
/// Live only.
#[derive(Debug, Clone)]
pub struct AddHttpAuthenticationFactory {
    name: String,
    security_domain: String,
    http_server_mechanism_factory: String,
    mechanism_configurations: Vec<Mechanism>,
    replace_existing: bool,
}

impl AddHttpAuthenticationFactory {
    /// Starts building a factory called `name`.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> AddHttpAuthenticationFactoryBuilder {
        AddHttpAuthenticationFactoryBuilder {
            name: name.into(),
            ..AddHttpAuthenticationFactoryBuilder::default()
        }
    }
}

impl Command for AddHttpAuthenticationFactory {
    fn kind(&self) -> &'static str {
        KIND
    }

    fn address(&self) -> Address {
        resource(KIND, &self.name)
    }

    fn values(&self) -> ValueSet {
        ValueSet::empty()
            .and("security-domain", &self.security_domain)
            .and("http-server-mechanism-factory", &self.http_server_mechanism_factory)
            .and_list_optional(
                "mechanism-configurations",
                self.mechanism_configurations.iter().map(Mechanism::values),
            )
    }

    fn replace_existing(&self) -> bool {
        self.replace_existing
    }
}

/// Builder for [`AddHttpAuthenticationFactory`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct AddHttpAuthenticationFactoryBuilder {
    name: String,
    security_domain: Option<String>,
    http_server_mechanism_factory: Option<String>,
    mechanism_configurations: Vec<Mechanism>,
    replace_existing: bool,
}

impl AddHttpAuthenticationFactoryBuilder {
    /// Sets the security domain backing the factory.
    #[must_use]
    pub fn security_domain(mut self, domain: impl Into<String>) -> Self {
        self.security_domain = Some(domain.into());
        self
    }

    /// Sets the HTTP server mechanism factory.
    #[must_use]
    pub fn http_server_mechanism_factory(mut self, factory: impl Into<String>) -> Self {
        self.http_server_mechanism_factory = Some(factory.into());
        self
    }

    /// Appends mechanism configuration entries, keeping their order.
    #[must_use]
    pub fn mechanism_configurations(
        mut self,
        mechanisms: impl IntoIterator<Item = Mechanism>,
    ) -> Self {
        self.mechanism_configurations.extend(mechanisms);
        self
    }

    /// Removes and recreates an existing factory.
    #[must_use]
    pub const fn replace_existing(mut self) -> Self {
        self.replace_existing = true;
        self
    }

    /// Validates and builds the command.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for an empty name, a missing security
    /// domain or mechanism factory, or a mechanism realm without a name.
    pub fn build(self) -> Result<AddHttpAuthenticationFactory, ValidationError> {
        check_name(&self.name, KIND)?;
        let security_domain = required("security-domain", self.security_domain)?;
        let http_server_mechanism_factory =
            required("http-server-mechanism-factory", self.http_server_mechanism_factory)?;
        self.mechanism_configurations
            .iter()
            .try_for_each(Mechanism::validate)?;

        Ok(AddHttpAuthenticationFactory {
            name: self.name,
            security_domain,
            http_server_mechanism_factory,
            mechanism_configurations: self.mechanism_configurations,
            replace_existing: self.replace_existing,
        })
    }
}
