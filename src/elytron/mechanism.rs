//! Mechanism configuration entries of authentication factories.

use serde::Deserialize;

use crate::command::ValidationError;
use crate::values::ValueSet;

/// Per-realm overrides within a [`Mechanism`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct MechanismRealm {
    realm_name: String,
    pre_realm_principal_transformer: Option<String>,
    post_realm_principal_transformer: Option<String>,
    final_principal_transformer: Option<String>,
    realm_mapper: Option<String>,
}

impl MechanismRealm {
    /// Creates an entry for the realm presented to the client.
    #[must_use]
    pub fn new(realm_name: impl Into<String>) -> Self {
        Self {
            realm_name: realm_name.into(),
            ..Self::default()
        }
    }

    /// Sets the pre-realm principal transformer.
    #[must_use]
    pub fn pre_realm_principal_transformer(mut self, name: impl Into<String>) -> Self {
        self.pre_realm_principal_transformer = Some(name.into());
        self
    }

    /// Sets the post-realm principal transformer.
    #[must_use]
    pub fn post_realm_principal_transformer(mut self, name: impl Into<String>) -> Self {
        self.post_realm_principal_transformer = Some(name.into());
        self
    }

    /// Sets the final principal transformer.
    #[must_use]
    pub fn final_principal_transformer(mut self, name: impl Into<String>) -> Self {
        self.final_principal_transformer = Some(name.into());
        self
    }

    /// Sets the realm mapper.
    #[must_use]
    pub fn realm_mapper(mut self, name: impl Into<String>) -> Self {
        self.realm_mapper = Some(name.into());
        self
    }

    pub(super) fn validate(&self) -> Result<(), ValidationError> {
        if self.realm_name.is_empty() {
            return Err(ValidationError::Missing { field: "realm-name" });
        }
        Ok(())
    }

    pub(super) fn values(&self) -> ValueSet {
        ValueSet::empty()
            .and("realm-name", &self.realm_name)
            .and_optional(
                "pre-realm-principal-transformer",
                self.pre_realm_principal_transformer.as_deref(),
            )
            .and_optional(
                "post-realm-principal-transformer",
                self.post_realm_principal_transformer.as_deref(),
            )
            .and_optional(
                "final-principal-transformer",
                self.final_principal_transformer.as_deref(),
            )
            .and_optional("realm-mapper", self.realm_mapper.as_deref())
    }
}

/// One entry of a factory's `mechanism-configurations`.
///
/// Every field is optional; an entry with nothing set still selects the
/// factory defaults for all mechanisms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Mechanism {
    mechanism_name: Option<String>,
    host_name: Option<String>,
    protocol: Option<String>,
    pre_realm_principal_transformer: Option<String>,
    post_realm_principal_transformer: Option<String>,
    final_principal_transformer: Option<String>,
    realm_mapper: Option<String>,
    credential_security_factory: Option<String>,
    mechanism_realm_configurations: Vec<MechanismRealm>,
}

impl Mechanism {
    /// Creates an empty entry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the entry to one mechanism, e.g. `BASIC`.
    #[must_use]
    pub fn mechanism_name(mut self, name: impl Into<String>) -> Self {
        self.mechanism_name = Some(name.into());
        self
    }

    /// Sets the host name the mechanism is presented for.
    #[must_use]
    pub fn host_name(mut self, host: impl Into<String>) -> Self {
        self.host_name = Some(host.into());
        self
    }

    /// Sets the protocol the mechanism is presented for.
    #[must_use]
    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    /// Sets the pre-realm principal transformer.
    #[must_use]
    pub fn pre_realm_principal_transformer(mut self, name: impl Into<String>) -> Self {
        self.pre_realm_principal_transformer = Some(name.into());
        self
    }

    /// Sets the post-realm principal transformer.
    #[must_use]
    pub fn post_realm_principal_transformer(mut self, name: impl Into<String>) -> Self {
        self.post_realm_principal_transformer = Some(name.into());
        self
    }

    /// Sets the final principal transformer.
    #[must_use]
    pub fn final_principal_transformer(mut self, name: impl Into<String>) -> Self {
        self.final_principal_transformer = Some(name.into());
        self
    }

    /// Sets the realm mapper.
    #[must_use]
    pub fn realm_mapper(mut self, name: impl Into<String>) -> Self {
        self.realm_mapper = Some(name.into());
        self
    }

    /// Sets the credential security factory.
    #[must_use]
    pub fn credential_security_factory(mut self, name: impl Into<String>) -> Self {
        self.credential_security_factory = Some(name.into());
        self
    }

    /// Appends a per-realm override.
    #[must_use]
    pub fn realm(mut self, realm: MechanismRealm) -> Self {
        self.mechanism_realm_configurations.push(realm);
        self
    }

    pub(super) fn validate(&self) -> Result<(), ValidationError> {
        self.mechanism_realm_configurations
            .iter()
            .try_for_each(MechanismRealm::validate)
    }

    pub(super) fn values(&self) -> ValueSet {
        ValueSet::empty()
            .and_optional("mechanism-name", self.mechanism_name.as_deref())
            .and_optional("host-name", self.host_name.as_deref())
            .and_optional("protocol", self.protocol.as_deref())
            .and_optional(
                "pre-realm-principal-transformer",
                self.pre_realm_principal_transformer.as_deref(),
            )
            .and_optional(
                "post-realm-principal-transformer",
                self.post_realm_principal_transformer.as_deref(),
            )
            .and_optional(
                "final-principal-transformer",
                self.final_principal_transformer.as_deref(),
            )
            .and_optional("realm-mapper", self.realm_mapper.as_deref())
            .and_optional(
                "credential-security-factory",
                self.credential_security_factory.as_deref(),
            )
            .and_list_optional(
                "mechanism-realm-configurations",
                self.mechanism_realm_configurations.iter().map(MechanismRealm::values),
            )
    }
}
