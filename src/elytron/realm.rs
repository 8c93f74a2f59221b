//! Security realm resources.

use serde::Deserialize;

use crate::Address;
use crate::command::{Command, ValidationError};
use crate::values::ValueSet;

use super::{Property, check_name, properties, required, resource};

const CUSTOM_KIND: &str = "custom-realm";
const FILESYSTEM_KIND: &str = "filesystem-realm";

/// Adds a realm implemented by a class from a server module.
///
/// Live only.
#[derive(Debug, Clone)]
pub struct AddCustomRealm {
    name: String,
    class_name: String,
    module: Option<String>,
    configuration: Vec<Property>,
    replace_existing: bool,
}

impl AddCustomRealm {
    /// Starts building a realm called `name`.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> AddCustomRealmBuilder {
        AddCustomRealmBuilder {
            name: name.into(),
            ..AddCustomRealmBuilder::default()
        }
    }
}

impl Command for AddCustomRealm {
    fn kind(&self) -> &'static str {
        CUSTOM_KIND
    }

    fn address(&self) -> Address {
        resource(CUSTOM_KIND, &self.name)
    }

    fn values(&self) -> ValueSet {
        ValueSet::empty()
            .and("class-name", &self.class_name)
            .and_optional("module", self.module.as_deref())
            .and_object_optional("configuration", properties(&self.configuration))
    }

    fn replace_existing(&self) -> bool {
        self.replace_existing
    }
}

/// Builder for [`AddCustomRealm`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct AddCustomRealmBuilder {
    name: String,
    class_name: Option<String>,
    module: Option<String>,
    configuration: Vec<Property>,
    replace_existing: bool,
}

impl AddCustomRealmBuilder {
    /// Sets the fully qualified implementation class.
    #[must_use]
    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Sets the module the class is loaded from.
    #[must_use]
    pub fn module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    /// Adds one configuration property passed to the implementation.
    #[must_use]
    pub fn configuration(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.configuration.push(Property::new(name, value));
        self
    }

    /// Removes and recreates an existing realm.
    #[must_use]
    pub const fn replace_existing(mut self) -> Self {
        self.replace_existing = true;
        self
    }

    /// Validates and builds the command.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for an empty name or a missing class name.
    pub fn build(self) -> Result<AddCustomRealm, ValidationError> {
        check_name(&self.name, CUSTOM_KIND)?;
        let class_name = required("class-name", self.class_name)?;

        Ok(AddCustomRealm {
            name: self.name,
            class_name,
            module: self.module,
            configuration: self.configuration,
            replace_existing: self.replace_existing,
        })
    }
}

/// Adds a realm storing identities as files in a directory.
///
/// Live only.
#[derive(Debug, Clone)]
pub struct AddFilesystemRealm {
    name: String,
    path: String,
    relative_to: Option<String>,
    levels: Option<u32>,
    replace_existing: bool,
}

impl AddFilesystemRealm {
    /// Starts building a realm called `name`.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> AddFilesystemRealmBuilder {
        AddFilesystemRealmBuilder {
            name: name.into(),
            ..AddFilesystemRealmBuilder::default()
        }
    }
}

impl Command for AddFilesystemRealm {
    fn kind(&self) -> &'static str {
        FILESYSTEM_KIND
    }

    fn address(&self) -> Address {
        resource(FILESYSTEM_KIND, &self.name)
    }

    fn values(&self) -> ValueSet {
        ValueSet::empty()
            .and("path", &self.path)
            .and_optional("relative-to", self.relative_to.as_deref())
            .and_optional("levels", self.levels)
    }

    fn replace_existing(&self) -> bool {
        self.replace_existing
    }
}

/// Builder for [`AddFilesystemRealm`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct AddFilesystemRealmBuilder {
    name: String,
    path: Option<String>,
    relative_to: Option<String>,
    levels: Option<u32>,
    replace_existing: bool,
}

impl AddFilesystemRealmBuilder {
    /// Sets the directory holding the identities.
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the base path `path` is resolved against.
    #[must_use]
    pub fn relative_to(mut self, base: impl Into<String>) -> Self {
        self.relative_to = Some(base.into());
        self
    }

    /// Sets the directory hashing depth.
    #[must_use]
    pub const fn levels(mut self, levels: u32) -> Self {
        self.levels = Some(levels);
        self
    }

    /// Removes and recreates an existing realm.
    #[must_use]
    pub const fn replace_existing(mut self) -> Self {
        self.replace_existing = true;
        self
    }

    /// Validates and builds the command.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for an empty name or a missing path.
    pub fn build(self) -> Result<AddFilesystemRealm, ValidationError> {
        check_name(&self.name, FILESYSTEM_KIND)?;
        let path = required("path", self.path)?;

        Ok(AddFilesystemRealm {
            name: self.name,
            path,
            relative_to: self.relative_to,
            levels: self.levels,
            replace_existing: self.replace_existing,
        })
    }
}
