//! Attribute value variants.

use std::fmt;

use serde::{Serialize, Serializer};

use super::ValueSet;

/// A primitive attribute value.
///
/// Numbers and booleans render in their natural textual form
/// (`12345`, `true`); no coercion happens between kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scalar {
    /// A string value.
    Text(String),
    /// An integer value.
    Int(i64),
    /// A boolean value.
    Bool(bool),
}

impl Scalar {
    /// Returns the text if this is a [`Scalar::Text`].
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Int(_) | Self::Bool(_) => None,
        }
    }

    /// Returns true for an empty [`Scalar::Text`].
    #[must_use]
    pub fn is_empty_text(&self) -> bool {
        matches!(self, Self::Text(s) if s.is_empty())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(s) => serializer.serialize_str(s),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Bool(b) => serializer.serialize_bool(*b),
        }
    }
}

/// A value stored in a [`ValueSet`].
///
/// There is no "absent" variant: absence is expressed by the attribute
/// not being in the set at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    /// A primitive value.
    Scalar(Scalar),
    /// An ordered list of values.
    List(Vec<AttributeValue>),
    /// A nested attribute group.
    Nested(ValueSet),
}

impl AttributeValue {
    /// Returns the scalar if this is a [`AttributeValue::Scalar`].
    #[must_use]
    pub const fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(s) => Some(s),
            Self::List(_) | Self::Nested(_) => None,
        }
    }

    /// Returns the elements if this is a [`AttributeValue::List`].
    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            Self::Scalar(_) | Self::Nested(_) => None,
        }
    }

    /// Returns the nested set if this is a [`AttributeValue::Nested`].
    #[must_use]
    pub const fn as_nested(&self) -> Option<&ValueSet> {
        match self {
            Self::Nested(set) => Some(set),
            Self::Scalar(_) | Self::List(_) => None,
        }
    }

    /// Renders the value as a single parameter string.
    ///
    /// Lists whose elements are all scalars are joined by a single space;
    /// anything containing a nested group is rendered as compact JSON.
    #[must_use]
    pub fn to_parameter(&self) -> String {
        match self {
            Self::Scalar(s) => s.to_string(),
            Self::List(items) if items.iter().all(|i| i.as_scalar().is_some()) => items
                .iter()
                .map(Self::to_parameter)
                .collect::<Vec<_>>()
                .join(" "),
            Self::List(_) | Self::Nested(_) => {
                // String keys and plain scalars only, so serialization cannot fail
                serde_json::to_string(self).unwrap_or_default()
            }
        }
    }

    /// Converts a JSON value read back from a backend.
    ///
    /// Returns `None` for `null`, which backends use for "undefined".
    #[must_use]
    pub fn from_json(value: serde_json::Value) -> Option<Self> {
        use serde_json::Value;

        match value {
            Value::Null => None,
            Value::Bool(b) => Some(Self::Scalar(Scalar::Bool(b))),
            Value::Number(n) => Some(Self::Scalar(
                n.as_i64()
                    .map_or_else(|| Scalar::Text(n.to_string()), Scalar::Int),
            )),
            Value::String(s) => Some(Self::Scalar(Scalar::Text(s))),
            Value::Array(items) => Some(Self::List(
                items.into_iter().filter_map(Self::from_json).collect(),
            )),
            Value::Object(map) => Some(Self::Nested(
                map.into_iter()
                    .filter_map(|(k, v)| Self::from_json(v).map(|v| (k, v)))
                    .collect(),
            )),
        }
    }
}

impl Serialize for AttributeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Scalar(s) => s.serialize(serializer),
            Self::List(items) => items.serialize(serializer),
            Self::Nested(set) => set.serialize(serializer),
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(s) => write!(f, "{s}"),
            Self::List(_) | Self::Nested(_) => {
                let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

impl From<Scalar> for AttributeValue {
    fn from(scalar: Scalar) -> Self {
        Self::Scalar(scalar)
    }
}

impl From<ValueSet> for AttributeValue {
    fn from(set: ValueSet) -> Self {
        Self::Nested(set)
    }
}

macro_rules! scalar_from {
    ($($ty:ty => |$v:ident| $conv:expr;)*) => {
        $(
            impl From<$ty> for Scalar {
                fn from($v: $ty) -> Self {
                    $conv
                }
            }

            impl From<$ty> for AttributeValue {
                fn from(value: $ty) -> Self {
                    Self::Scalar(Scalar::from(value))
                }
            }
        )*
    };
}

scalar_from! {
    String => |v| Self::Text(v);
    &str => |v| Self::Text(v.to_string());
    &String => |v| Self::Text(v.clone());
    i64 => |v| Self::Int(v);
    i32 => |v| Self::Int(i64::from(v));
    u32 => |v| Self::Int(i64::from(v));
    u16 => |v| Self::Int(i64::from(v));
    bool => |v| Self::Bool(v);
}
