//! `security-domain` resources.

use serde::Deserialize;

use crate::Address;
use crate::command::{Command, ValidationError};
use crate::values::ValueSet;

use super::{check_name, required, resource};

const KIND: &str = "security-domain";

/// A realm participating in a security domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Realm {
    realm: String,
    principal_transformer: Option<String>,
    role_decoder: Option<String>,
}

impl Realm {
    /// References the realm called `realm`.
    #[must_use]
    pub fn new(realm: impl Into<String>) -> Self {
        Self {
            realm: realm.into(),
            ..Self::default()
        }
    }

    /// Sets the principal transformer applied for this realm.
    #[must_use]
    pub fn principal_transformer(mut self, name: impl Into<String>) -> Self {
        self.principal_transformer = Some(name.into());
        self
    }

    /// Sets the role decoder applied for this realm.
    #[must_use]
    pub fn role_decoder(mut self, name: impl Into<String>) -> Self {
        self.role_decoder = Some(name.into());
        self
    }

    fn values(&self) -> ValueSet {
        ValueSet::empty()
            .and("realm", &self.realm)
            .and_optional("principal-transformer", self.principal_transformer.as_deref())
            .and_optional("role-decoder", self.role_decoder.as_deref())
    }
}

/// Adds a security domain.
///
/// Live only.
#[derive(Debug, Clone)]
pub struct AddSecurityDomain {
    name: String,
    default_realm: String,
    realms: Vec<Realm>,
    permission_mapper: Option<String>,
    role_mapper: Option<String>,
    pre_realm_principal_transformer: Option<String>,
    post_realm_principal_transformer: Option<String>,
    trusted_security_domains: Vec<String>,
    outflow_security_domains: Vec<String>,
    replace_existing: bool,
}

impl AddSecurityDomain {
    /// Starts building a domain called `name`.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> AddSecurityDomainBuilder {
        AddSecurityDomainBuilder {
            name: name.into(),
            ..AddSecurityDomainBuilder::default()
        }
    }
}

impl Command for AddSecurityDomain {
    fn kind(&self) -> &'static str {
        KIND
    }

    fn address(&self) -> Address {
        resource(KIND, &self.name)
    }

    fn values(&self) -> ValueSet {
        ValueSet::empty()
            .and("default-realm", &self.default_realm)
            .and_list_optional("realms", self.realms.iter().map(Realm::values))
            .and_optional("permission-mapper", self.permission_mapper.as_deref())
            .and_optional("role-mapper", self.role_mapper.as_deref())
            .and_optional(
                "pre-realm-principal-transformer",
                self.pre_realm_principal_transformer.as_deref(),
            )
            .and_optional(
                "post-realm-principal-transformer",
                self.post_realm_principal_transformer.as_deref(),
            )
            .and_list_optional("trusted-security-domains", &self.trusted_security_domains)
            .and_list_optional("outflow-security-domains", &self.outflow_security_domains)
    }

    fn replace_existing(&self) -> bool {
        self.replace_existing
    }
}

/// Builder for [`AddSecurityDomain`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct AddSecurityDomainBuilder {
    name: String,
    default_realm: Option<String>,
    realms: Vec<Realm>,
    permission_mapper: Option<String>,
    role_mapper: Option<String>,
    pre_realm_principal_transformer: Option<String>,
    post_realm_principal_transformer: Option<String>,
    trusted_security_domains: Vec<String>,
    outflow_security_domains: Vec<String>,
    replace_existing: bool,
}

impl AddSecurityDomainBuilder {
    /// Sets the realm used when none is selected.
    #[must_use]
    pub fn default_realm(mut self, realm: impl Into<String>) -> Self {
        self.default_realm = Some(realm.into());
        self
    }

    /// Appends realms, keeping their order.
    #[must_use]
    pub fn realms(mut self, realms: impl IntoIterator<Item = Realm>) -> Self {
        self.realms.extend(realms);
        self
    }

    /// Sets the permission mapper.
    #[must_use]
    pub fn permission_mapper(mut self, name: impl Into<String>) -> Self {
        self.permission_mapper = Some(name.into());
        self
    }

    /// Sets the role mapper.
    #[must_use]
    pub fn role_mapper(mut self, name: impl Into<String>) -> Self {
        self.role_mapper = Some(name.into());
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

    /// Appends domains whose identities are trusted.
    #[must_use]
    pub fn trusted_security_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.trusted_security_domains.extend(domains.into_iter().map(Into::into));
        self
    }

    /// Appends domains identities flow out to.
    #[must_use]
    pub fn outflow_security_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.outflow_security_domains.extend(domains.into_iter().map(Into::into));
        self
    }

    /// Removes and recreates an existing domain.
    #[must_use]
    pub const fn replace_existing(mut self) -> Self {
        self.replace_existing = true;
        self
    }

    /// Validates and builds the command.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for an empty name, a missing default
    /// realm, no realms, or a realm entry without a name.
    pub fn build(self) -> Result<AddSecurityDomain, ValidationError> {
        check_name(&self.name, KIND)?;
        let default_realm = required("default-realm", self.default_realm)?;
        if self.realms.is_empty() {
            return Err(ValidationError::Missing { field: "realms" });
        }
        if self.realms.iter().any(|r| r.realm.is_empty()) {
            return Err(ValidationError::Empty { field: "realm" });
        }

        Ok(AddSecurityDomain {
            name: self.name,
            default_realm,
            realms: self.realms,
            permission_mapper: self.permission_mapper,
            role_mapper: self.role_mapper,
            pre_realm_principal_transformer: self.pre_realm_principal_transformer,
            post_realm_principal_transformer: self.post_realm_principal_transformer,
            trusted_security_domains: self.trusted_security_domains,
            outflow_security_domains: self.outflow_security_domains,
            replace_existing: self.replace_existing,
        })
    }
}
