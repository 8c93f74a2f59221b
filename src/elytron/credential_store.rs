//! `credential-store` resources.

use serde::Deserialize;

use crate::Address;
use crate::command::{Command, ValidationError};
use crate::values::ValueSet;

use super::{CredentialReference, check_name, required, resource};

const KIND: &str = "credential-store";

/// Scheme every credential store URI must use.
pub const CREDENTIAL_STORE_URI_PREFIX: &str = "cr-store://";

/// Adds a credential store.
///
/// Live only.
#[derive(Debug, Clone)]
pub struct AddCredentialStore {
    name: String,
    uri: String,
    credential_reference: CredentialReference,
    store_type: Option<String>,
    providers: Option<String>,
    provider_name: Option<String>,
    other_providers: Option<String>,
    relative_to: Option<String>,
    create: Option<bool>,
    modifiable: Option<bool>,
    replace_existing: bool,
}

impl AddCredentialStore {
    /// Starts building a store called `name`.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> AddCredentialStoreBuilder {
        AddCredentialStoreBuilder {
            name: name.into(),
            ..AddCredentialStoreBuilder::default()
        }
    }
}

impl Command for AddCredentialStore {
    fn kind(&self) -> &'static str {
        KIND
    }

    fn address(&self) -> Address {
        resource(KIND, &self.name)
    }

    fn values(&self) -> ValueSet {
        ValueSet::empty()
            .and("uri", &self.uri)
            .and("credential-reference", self.credential_reference.values())
            .and_optional("type", self.store_type.as_deref())
            .and_optional("providers", self.providers.as_deref())
            .and_optional("provider-name", self.provider_name.as_deref())
            .and_optional("other-providers", self.other_providers.as_deref())
            .and_optional("relative-to", self.relative_to.as_deref())
            .and_optional("create", self.create)
            .and_optional("modifiable", self.modifiable)
    }

    fn replace_existing(&self) -> bool {
        self.replace_existing
    }
}

/// Builder for [`AddCredentialStore`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct AddCredentialStoreBuilder {
    name: String,
    uri: Option<String>,
    credential_reference: Option<CredentialReference>,
    #[serde(rename = "type")]
    store_type: Option<String>,
    providers: Option<String>,
    provider_name: Option<String>,
    other_providers: Option<String>,
    relative_to: Option<String>,
    create: Option<bool>,
    modifiable: Option<bool>,
    replace_existing: bool,
}

impl AddCredentialStoreBuilder {
    /// Sets the store location, e.g. `cr-store://test/cs.jceks?create=true`.
    #[must_use]
    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Sets the credential protecting the store.
    #[must_use]
    pub fn credential_reference(mut self, reference: CredentialReference) -> Self {
        self.credential_reference = Some(reference);
        self
    }

    /// Sets the store implementation type.
    #[must_use]
    pub fn store_type(mut self, store_type: impl Into<String>) -> Self {
        self.store_type = Some(store_type.into());
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

    /// Names the providers used for everything except the store itself.
    #[must_use]
    pub fn other_providers(mut self, providers: impl Into<String>) -> Self {
        self.other_providers = Some(providers.into());
        self
    }

    /// Sets the base path the URI is resolved against.
    #[must_use]
    pub fn relative_to(mut self, path: impl Into<String>) -> Self {
        self.relative_to = Some(path.into());
        self
    }

    /// Creates the backing file if it does not exist.
    #[must_use]
    pub const fn create(mut self, create: bool) -> Self {
        self.create = Some(create);
        self
    }

    /// Allows modifying the store.
    #[must_use]
    pub const fn modifiable(mut self, modifiable: bool) -> Self {
        self.modifiable = Some(modifiable);
        self
    }

    /// Removes and recreates an existing store.
    #[must_use]
    pub const fn replace_existing(mut self) -> Self {
        self.replace_existing = true;
        self
    }

    /// Validates and builds the command.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for an empty name, a missing or empty
    /// URI, a URI without the `cr-store://` scheme, or a missing credential
    /// reference.
    pub fn build(self) -> Result<AddCredentialStore, ValidationError> {
        check_name(&self.name, KIND)?;
        let uri = required("uri", self.uri)?;
        if !uri.starts_with(CREDENTIAL_STORE_URI_PREFIX) {
            return Err(ValidationError::MissingPrefix {
                field: "uri",
                prefix: CREDENTIAL_STORE_URI_PREFIX,
            });
        }
        let credential_reference = self
            .credential_reference
            .ok_or(ValidationError::Missing {
                field: "credential-reference",
            })?;

        Ok(AddCredentialStore {
            name: self.name,
            uri,
            credential_reference,
            store_type: self.store_type,
            providers: self.providers,
            provider_name: self.provider_name,
            other_providers: self.other_providers,
            relative_to: self.relative_to,
            create: self.create,
            modifiable: self.modifiable,
            replace_existing: self.replace_existing,
        })
    }
}
