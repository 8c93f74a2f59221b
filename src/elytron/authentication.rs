//! `authentication-configuration` resources of the authentication client.

use serde::Deserialize;

use crate::Address;
use crate::command::{Command, ValidationError};
use crate::values::ValueSet;

use super::{CredentialReference, Property, check_name, exclusive, properties, resource};

const KIND: &str = "authentication-configuration";

/// The identity an authentication configuration presents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationIdentity {
    /// Authenticate as a named principal.
    AuthenticationName(String),
    /// Authenticate anonymously.
    Anonymous,
    /// Use the current identity of a security domain.
    SecurityDomain(String),
}

impl AuthenticationIdentity {
    fn apply(&self, values: ValueSet) -> ValueSet {
        match self {
            Self::AuthenticationName(name) => values.and("authentication-name", name),
            Self::Anonymous => values.and("anonymous", true),
            Self::SecurityDomain(domain) => values.and("security-domain", domain),
        }
    }
}

/// Which SASL mechanisms may be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MechanismPolicy {
    /// Any mechanism the server offers.
    AllowAll,
    /// Only the listed mechanisms.
    AllowSasl(Vec<String>),
}

impl MechanismPolicy {
    fn apply(&self, values: ValueSet) -> ValueSet {
        match self {
            Self::AllowAll => values.and("allow-all-mechanisms", true),
            Self::AllowSasl(mechanisms) => {
                values.and_list_optional("allow-sasl-mechanisms", mechanisms)
            }
        }
    }
}

/// Adds an authentication configuration for outbound connections.
///
/// Live only.
#[derive(Debug, Clone)]
pub struct AddAuthenticationConfiguration {
    name: String,
    credential_reference: CredentialReference,
    identity: Option<AuthenticationIdentity>,
    mechanism_policy: Option<MechanismPolicy>,
    // Explicit `false` only; `true` lives in `identity` / `mechanism_policy`
    anonymous: Option<bool>,
    allow_all_mechanisms: Option<bool>,
    extends: Option<String>,
    authorization_name: Option<String>,
    host: Option<String>,
    protocol: Option<String>,
    port: Option<u16>,
    realm: Option<String>,
    forbid_sasl_mechanisms: Vec<String>,
    mechanism_properties: Vec<Property>,
    replace_existing: bool,
}

impl AddAuthenticationConfiguration {
    /// Starts building a configuration called `name`.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> AddAuthenticationConfigurationBuilder {
        AddAuthenticationConfigurationBuilder {
            name: name.into(),
            ..AddAuthenticationConfigurationBuilder::default()
        }
    }

    /// The identity mode, if one was chosen.
    #[must_use]
    pub const fn identity(&self) -> Option<&AuthenticationIdentity> {
        self.identity.as_ref()
    }

    /// The mechanism policy, if one was chosen.
    #[must_use]
    pub const fn mechanism_policy(&self) -> Option<&MechanismPolicy> {
        self.mechanism_policy.as_ref()
    }
}

impl Command for AddAuthenticationConfiguration {
    fn kind(&self) -> &'static str {
        KIND
    }

    fn address(&self) -> Address {
        resource(KIND, &self.name)
    }

    fn values(&self) -> ValueSet {
        let mut values = ValueSet::empty()
            .and("credential-reference", self.credential_reference.values())
            .and_optional("extends", self.extends.as_deref())
            .and_optional("authorization-name", self.authorization_name.as_deref())
            .and_optional("host", self.host.as_deref())
            .and_optional("protocol", self.protocol.as_deref())
            .and_optional("port", self.port)
            .and_optional("realm", self.realm.as_deref());
        if let Some(identity) = &self.identity {
            values = identity.apply(values);
        }
        if let Some(policy) = &self.mechanism_policy {
            values = policy.apply(values);
        }
        values
            .and_optional("anonymous", self.anonymous)
            .and_optional("allow-all-mechanisms", self.allow_all_mechanisms)
            .and_list_optional("forbid-sasl-mechanisms", &self.forbid_sasl_mechanisms)
            .and_object_optional("mechanism-properties", properties(&self.mechanism_properties))
    }

    fn replace_existing(&self) -> bool {
        self.replace_existing
    }
}

/// Builder for [`AddAuthenticationConfiguration`].
///
/// Conflicting identity and mechanism options may all be set here; `build()`
/// rejects the combination.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct AddAuthenticationConfigurationBuilder {
    name: String,
    credential_reference: Option<CredentialReference>,
    authentication_name: Option<String>,
    anonymous: Option<bool>,
    security_domain: Option<String>,
    allow_all_mechanisms: Option<bool>,
    allow_sasl_mechanisms: Vec<String>,
    extends: Option<String>,
    authorization_name: Option<String>,
    host: Option<String>,
    protocol: Option<String>,
    port: Option<u16>,
    realm: Option<String>,
    forbid_sasl_mechanisms: Vec<String>,
    mechanism_properties: Vec<Property>,
    replace_existing: bool,
}

impl AddAuthenticationConfigurationBuilder {
    /// Sets the credential presented.
    #[must_use]
    pub fn credential_reference(mut self, reference: CredentialReference) -> Self {
        self.credential_reference = Some(reference);
        self
    }

    /// Authenticates as the named principal.
    #[must_use]
    pub fn authentication_name(mut self, name: impl Into<String>) -> Self {
        self.authentication_name = Some(name.into());
        self
    }

    /// Authenticates anonymously when `true`.
    ///
    /// An explicit `false` is sent as is and selects no identity.
    #[must_use]
    pub const fn anonymous(mut self, anonymous: bool) -> Self {
        self.anonymous = Some(anonymous);
        self
    }

    /// Uses the current identity of a security domain.
    #[must_use]
    pub fn security_domain(mut self, domain: impl Into<String>) -> Self {
        self.security_domain = Some(domain.into());
        self
    }

    /// Allows every mechanism the server offers when `true`.
    ///
    /// An explicit `false` is sent as is and selects no policy.
    #[must_use]
    pub const fn allow_all_mechanisms(mut self, allow: bool) -> Self {
        self.allow_all_mechanisms = Some(allow);
        self
    }

    /// Appends SASL mechanisms to the allow-list.
    #[must_use]
    pub fn allow_sasl_mechanisms<I, S>(mut self, mechanisms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allow_sasl_mechanisms.extend(mechanisms.into_iter().map(Into::into));
        self
    }

    /// Appends SASL mechanisms that must never be used.
    #[must_use]
    pub fn forbid_sasl_mechanisms<I, S>(mut self, mechanisms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.forbid_sasl_mechanisms.extend(mechanisms.into_iter().map(Into::into));
        self
    }

    /// Inherits from another authentication configuration.
    #[must_use]
    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.extends = Some(parent.into());
        self
    }

    /// Sets the name to authorize as after authentication.
    #[must_use]
    pub fn authorization_name(mut self, name: impl Into<String>) -> Self {
        self.authorization_name = Some(name.into());
        self
    }

    /// Overrides the destination host.
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Overrides the destination protocol.
    #[must_use]
    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    /// Overrides the destination port.
    #[must_use]
    pub const fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets the realm name presented to the server.
    #[must_use]
    pub fn realm(mut self, realm: impl Into<String>) -> Self {
        self.realm = Some(realm.into());
        self
    }

    /// Adds one mechanism property.
    #[must_use]
    pub fn mechanism_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.mechanism_properties.push(Property::new(name, value));
        self
    }

    /// Removes and recreates an existing configuration.
    #[must_use]
    pub const fn replace_existing(mut self) -> Self {
        self.replace_existing = true;
        self
    }

    /// Validates and builds the command.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for an empty name, a missing credential
    /// reference, more than one identity option, or both mechanism policies.
    pub fn build(self) -> Result<AddAuthenticationConfiguration, ValidationError> {
        check_name(&self.name, KIND)?;
        let credential_reference = self
            .credential_reference
            .ok_or(ValidationError::Missing {
                field: "credential-reference",
            })?;

        let authentication_name = self.authentication_name.filter(|s| !s.is_empty());
        let security_domain = self.security_domain.filter(|s| !s.is_empty());
        let anonymous = self.anonymous == Some(true);
        let allow_all_mechanisms = self.allow_all_mechanisms == Some(true);
        exclusive(
            ("authentication-name", authentication_name.is_some()),
            ("anonymous", anonymous),
        )?;
        exclusive(
            ("authentication-name", authentication_name.is_some()),
            ("security-domain", security_domain.is_some()),
        )?;
        exclusive(
            ("anonymous", anonymous),
            ("security-domain", security_domain.is_some()),
        )?;
        exclusive(
            ("allow-all-mechanisms", allow_all_mechanisms),
            ("allow-sasl-mechanisms", !self.allow_sasl_mechanisms.is_empty()),
        )?;

        let identity = match (authentication_name, anonymous, security_domain) {
            (Some(name), ..) => Some(AuthenticationIdentity::AuthenticationName(name)),
            (None, true, _) => Some(AuthenticationIdentity::Anonymous),
            (None, false, Some(domain)) => Some(AuthenticationIdentity::SecurityDomain(domain)),
            (None, false, None) => None,
        };
        let mechanism_policy = if allow_all_mechanisms {
            Some(MechanismPolicy::AllowAll)
        } else if self.allow_sasl_mechanisms.is_empty() {
            None
        } else {
            Some(MechanismPolicy::AllowSasl(self.allow_sasl_mechanisms))
        };

        Ok(AddAuthenticationConfiguration {
            name: self.name,
            credential_reference,
            identity,
            mechanism_policy,
            anonymous: self.anonymous.filter(|a| !a),
            allow_all_mechanisms: self.allow_all_mechanisms.filter(|a| !a),
            extends: self.extends,
            authorization_name: self.authorization_name,
            host: self.host,
            protocol: self.protocol,
            port: self.port,
            realm: self.realm,
            forbid_sasl_mechanisms: self.forbid_sasl_mechanisms,
            mechanism_properties: self.mechanism_properties,
            replace_existing: self.replace_existing,
        })
    }
}
