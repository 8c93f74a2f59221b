//! Commands for the `elytron` security subsystem.
//!
//! Each command is produced by a builder that gathers optional settings and
//! validates them once in `build()`. Builders also deserialize from a batch
//! file entry, using the server's attribute names as keys.

mod authentication;
mod credential;
mod credential_store;
mod domain;
mod http;
mod mapper;
mod mechanism;
mod realm;
mod tls;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

use serde::Deserialize;

pub use authentication::{
    AddAuthenticationConfiguration, AddAuthenticationConfigurationBuilder, AuthenticationIdentity,
    MechanismPolicy,
};
pub use credential::{CredentialReference, CredentialReferenceBuilder};
pub use credential_store::{
    AddCredentialStore, AddCredentialStoreBuilder, CREDENTIAL_STORE_URI_PREFIX,
};
pub use domain::{AddSecurityDomain, AddSecurityDomainBuilder, Realm};
pub use http::{AddHttpAuthenticationFactory, AddHttpAuthenticationFactoryBuilder};
pub use mapper::{AddX500AttributePrincipalDecoder, AddX500AttributePrincipalDecoderBuilder};
pub use mechanism::{Mechanism, MechanismRealm};
pub use realm::{
    AddCustomRealm, AddCustomRealmBuilder, AddFilesystemRealm, AddFilesystemRealmBuilder,
};
pub use tls::{AddClientSslContext, AddClientSslContextBuilder};

use crate::Address;
use crate::command::ValidationError;
use crate::document::{TransformRegistry, add_resource};
use crate::values::ValueSet;

/// Name of the subsystem every command here targets.
pub const SUBSYSTEM: &str = "elytron";

/// Transforms for every command with an offline form.
#[must_use]
pub fn offline_transforms() -> TransformRegistry {
    TransformRegistry::new()
        .with(tls::TRANSFORM, add_resource(tls::KIND))
        .with(mapper::TRANSFORM, add_resource(mapper::KIND))
}

/// A named `key = value` pair inside a nested property group.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Property {
    /// Property name
    pub name: String,
    /// Property value
    pub value: String,
}

impl Property {
    /// Creates a property.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

fn resource(kind: &str, name: &str) -> Address {
    Address::subsystem(SUBSYSTEM).and(kind, name)
}

fn properties(properties: &[Property]) -> Option<ValueSet> {
    Some(
        properties
            .iter()
            .map(|p| (p.name.as_str(), p.value.as_str()))
            .collect(),
    )
}

fn check_name(name: &str, resource: &'static str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::MissingName { resource });
    }
    Ok(())
}

fn required(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    match value {
        None => Err(ValidationError::Missing { field }),
        Some(v) if v.is_empty() => Err(ValidationError::Empty { field }),
        Some(v) => Ok(v),
    }
}

fn exclusive(
    first: (&'static str, bool),
    second: (&'static str, bool),
) -> Result<(), ValidationError> {
    if first.1 && second.1 {
        return Err(ValidationError::Conflict {
            first: first.0,
            second: second.0,
        });
    }
    Ok(())
}
