//! Credential references shared by several resources.

use serde::Deserialize;

use crate::command::ValidationError;
use crate::values::ValueSet;

/// Where a secret comes from.
///
/// Exactly one supply mode is active; the builder rejects every other
/// combination.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "CredentialReferenceBuilder")]
pub enum CredentialReference {
    /// The secret itself.
    ClearText(String),
    /// An alias looked up in a credential store.
    Store {
        /// Credential store name
        store: String,
        /// Alias within the store
        alias: String,
        /// Credential type, if the store holds several
        credential_type: Option<String>,
    },
    /// A reference resolved outside the server configuration.
    External {
        /// Credential type
        credential_type: String,
    },
}

impl CredentialReference {
    /// Starts building a reference.
    #[must_use]
    pub fn builder() -> CredentialReferenceBuilder {
        CredentialReferenceBuilder::default()
    }

    /// Shorthand for a clear-text reference.
    #[must_use]
    pub fn clear_text(secret: impl Into<String>) -> Self {
        Self::ClearText(secret.into())
    }

    /// The `credential-reference` attribute value.
    #[must_use]
    pub fn values(&self) -> ValueSet {
        match self {
            Self::ClearText(secret) => ValueSet::empty().and("clear-text", secret),
            Self::Store {
                store,
                alias,
                credential_type,
            } => ValueSet::empty()
                .and("store", store)
                .and("alias", alias)
                .and_optional("type", credential_type.as_deref()),
            Self::External { credential_type } => ValueSet::empty().and("type", credential_type),
        }
    }
}

/// Gathers credential settings before validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct CredentialReferenceBuilder {
    clear_text: Option<String>,
    store: Option<String>,
    alias: Option<String>,
    #[serde(rename = "type")]
    credential_type: Option<String>,
}

impl CredentialReferenceBuilder {
    /// Supplies the secret directly.
    #[must_use]
    pub fn clear_text(mut self, secret: impl Into<String>) -> Self {
        self.clear_text = Some(secret.into());
        self
    }

    /// Names the credential store holding the secret.
    #[must_use]
    pub fn store(mut self, store: impl Into<String>) -> Self {
        self.store = Some(store.into());
        self
    }

    /// Names the alias within the store.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Sets the credential type.
    #[must_use]
    pub fn credential_type(mut self, credential_type: impl Into<String>) -> Self {
        self.credential_type = Some(credential_type.into());
        self
    }

    /// Validates the settings.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Credential`] unless exactly one supply mode
    /// is fully specified.
    pub fn build(self) -> Result<CredentialReference, ValidationError> {
        let present = |v: Option<String>| v.filter(|s| !s.is_empty());
        let invalid = |reason: &str| Err(ValidationError::Credential(reason.to_string()));

        match (
            present(self.clear_text),
            present(self.store),
            present(self.alias),
            present(self.credential_type),
        ) {
            (Some(secret), None, None, None) => Ok(CredentialReference::ClearText(secret)),
            (Some(_), ..) => invalid("clear-text cannot be combined with store, alias or type"),
            (None, Some(store), Some(alias), credential_type) => Ok(CredentialReference::Store {
                store,
                alias,
                credential_type,
            }),
            (None, None, Some(_), _) => invalid("alias requires a store"),
            (None, Some(_), None, _) => invalid("store requires an alias"),
            (None, None, None, Some(credential_type)) => {
                Ok(CredentialReference::External { credential_type })
            }
            (None, None, None, None) => {
                invalid("one of clear-text, store with alias, or type must be specified")
            }
        }
    }
}

impl TryFrom<CredentialReferenceBuilder> for CredentialReference {
    type Error = ValidationError;

    fn try_from(builder: CredentialReferenceBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}
