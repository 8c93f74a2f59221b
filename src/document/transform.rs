//! Transform requests handed to a document collaborator.

use std::fmt;

use crate::Address;
use crate::values::ValueSet;

/// Ordered named parameters of a [`Transform`].
///
/// Only present values are stored: passing `None` to
/// [`Parameters::with`] records nothing, so a transform never sees a
/// parameter for unset configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    entries: Vec<(String, String)>,
}

impl Parameters {
    /// Creates an empty parameter list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Sets a parameter unless `value` is `None`. A later value for the same
    /// name replaces the earlier one in place.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: Option<impl fmt::Display>) -> Self {
        if let Some(value) = value {
            let name = name.into();
            let value = value.to_string();
            match self.entries.iter_mut().find(|(n, _)| *n == name) {
                Some(slot) => slot.1 = value,
                None => self.entries.push((name, value)),
            }
        }
        self
    }

    /// Adds every attribute of a payload.
    ///
    /// Lists of scalars are flattened to one space-delimited string;
    /// nested groups are passed as compact JSON.
    #[must_use]
    pub fn with_values(self, values: &ValueSet) -> Self {
        values
            .iter()
            .fold(self, |params, (name, value)| {
                params.with(name, Some(value.to_parameter()))
            })
    }

    /// Returns the value of a parameter, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if the parameter is present and equals `true`.
    #[must_use]
    pub fn flag(&self, name: &str) -> bool {
        self.get(name) == Some("true")
    }

    /// `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A named structural transform to apply at a subtree of a document.
///
/// # Example
///
/// ```
/// use elytron_ops::Address;
/// use elytron_ops::document::Transform;
///
/// let transform = Transform::new("add-client-ssl-context", Address::subsystem("elytron"))
///     .parameter("name", Some("client"))
///     .parameter("protocols", None::<&str>);
///
/// assert_eq!(transform.locator().to_pointer(), "/subsystem/elytron");
/// assert_eq!(transform.parameters().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transform {
    id: String,
    locator: Address,
    parameters: Parameters,
}

impl Transform {
    /// Creates a transform with no parameters.
    #[must_use]
    pub fn new(id: impl Into<String>, locator: Address) -> Self {
        Self {
            id: id.into(),
            locator,
            parameters: Parameters::new(),
        }
    }

    /// Sets one parameter; `None` is omitted.
    #[must_use]
    pub fn parameter(mut self, name: impl Into<String>, value: Option<impl fmt::Display>) -> Self {
        self.parameters = self.parameters.with(name, value);
        self
    }

    /// Adds every attribute of a payload as parameters.
    #[must_use]
    pub fn values(mut self, values: &ValueSet) -> Self {
        self.parameters = self.parameters.with_values(values);
        self
    }

    /// The transform identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The address of the subtree the transform operates on.
    #[must_use]
    pub const fn locator(&self) -> &Address {
        &self.locator
    }

    /// The transform parameters.
    #[must_use]
    pub const fn parameters(&self) -> &Parameters {
        &self.parameters
    }
}
