//! Ordered attribute payload builder.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::{AttributeValue, Scalar};

/// Ordered mapping from attribute name to [`AttributeValue`].
///
/// Built by chaining the `and*` methods. The `*_optional` family is the
/// only place that decides between omitting and including an attribute:
/// a `None`, an empty string, an empty list or an empty nested set leaves
/// the attribute out of the payload entirely.
///
/// # Setting a name twice
///
/// Last write wins. The attribute keeps the position of its first
/// insertion, so the payload order stays reproducible.
///
/// # Example
///
/// ```
/// use elytron_ops::ValueSet;
///
/// let joiner: Option<&str> = None;
/// let values = ValueSet::empty()
///     .and("oid", "2.5.4.3")
///     .and_optional("joiner", joiner)
///     .and_optional("start-segment", Some(1))
///     .and_list_optional("required-oids", ["1.2", "3.4"]);
///
/// assert_eq!(values.names().collect::<Vec<_>>(), ["oid", "start-segment", "required-oids"]);
/// assert!(!values.contains("joiner"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueSet {
    entries: Vec<(String, AttributeValue)>,
}

impl ValueSet {
    /// Creates a set with no attributes.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Sets a required attribute.
    #[must_use]
    pub fn and(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.insert(name.into(), value.into());
        self
    }

    /// Sets a scalar attribute unless `value` is `None` or an empty string.
    #[must_use]
    pub fn and_optional<T: Into<Scalar>>(self, name: impl Into<String>, value: Option<T>) -> Self {
        match value.map(Into::into) {
            Some(scalar) if !scalar.is_empty_text() => self.and(name, scalar),
            _ => self,
        }
    }

    /// Sets an ordered list attribute unless the list is empty.
    ///
    /// Element order is preserved.
    #[must_use]
    pub fn and_list_optional<I>(self, name: impl Into<String>, list: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<AttributeValue>,
    {
        let items: Vec<AttributeValue> = list.into_iter().map(Into::into).collect();
        if items.is_empty() {
            return self;
        }
        self.and(name, AttributeValue::List(items))
    }

    /// Embeds a nested set unless it is `None` or has no attributes.
    #[must_use]
    pub fn and_object_optional(self, name: impl Into<String>, nested: Option<Self>) -> Self {
        match nested {
            Some(set) if !set.is_empty() => self.and(name, AttributeValue::Nested(set)),
            _ => self,
        }
    }

    fn insert(&mut self, name: String, value: AttributeValue) {
        if let Some(slot) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    /// Returns the value of an attribute, if set.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Returns true if the attribute is set.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no attribute is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Attribute names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<AttributeValue>> FromIterator<(K, V)> for ValueSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |set, (k, v)| set.and(k, v))
    }
}

/// Serializes as a JSON object whose keys follow insertion order.
impl Serialize for ValueSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
