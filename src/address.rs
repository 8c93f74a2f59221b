//! Addresses naming a node in the configuration tree.
//!
//! An [`Address`] is an ordered path of `(type, name)` segments, e.g.
//! `/subsystem=elytron/http-authentication-factory=my-factory`. It is a
//! plain value: it carries no behavior toward a backend beyond being
//! rendered into that backend's path representation.

use std::fmt;
use std::str::FromStr;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use thiserror::Error;

/// One `(type, name)` step of an [`Address`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Segment {
    kind: String,
    name: String,
}

impl Segment {
    /// The segment type, e.g. `subsystem`.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The segment name, e.g. `elytron`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Immutable, non-empty path identifying one configuration node.
///
/// # Equality
///
/// Two addresses are equal iff their segment sequences match exactly.
///
/// # Example
///
/// ```
/// use elytron_ops::Address;
///
/// let factory = Address::subsystem("elytron").and("http-authentication-factory", "web");
/// assert_eq!(
///     factory.to_string(),
///     "/subsystem=elytron/http-authentication-factory=web"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address {
    segments: Vec<Segment>,
}

impl Address {
    /// Creates a single-segment address.
    ///
    /// # Panics
    ///
    /// Panics if `kind` or `name` is empty. Command builders reject empty
    /// names before any address is computed.
    #[must_use]
    pub fn root(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            segments: vec![segment(kind.into(), name.into())],
        }
    }

    /// Shorthand for `Address::root("subsystem", name)`.
    #[must_use]
    pub fn subsystem(name: impl Into<String>) -> Self {
        Self::root("subsystem", name)
    }

    /// Returns a new address with one more segment appended.
    ///
    /// The receiver is left untouched.
    ///
    /// # Panics
    ///
    /// Panics if `kind` or `name` is empty.
    #[must_use]
    pub fn and(&self, kind: impl Into<String>, name: impl Into<String>) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(segment(kind.into(), name.into()));
        Self { segments }
    }

    /// The segments from root to leaf.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The last segment, naming the node itself.
    #[must_use]
    pub fn leaf(&self) -> &Segment {
        // Non-empty by construction.
        &self.segments[self.segments.len() - 1]
    }

    /// The address of the parent node, or `None` for a single-segment address.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.segments.len() < 2 {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// Renders the address as an RFC 6901 JSON pointer over the document
    /// tree layout `doc[type][name]...`.
    ///
    /// ```
    /// use elytron_ops::Address;
    ///
    /// assert_eq!(Address::subsystem("elytron").to_pointer(), "/subsystem/elytron");
    /// ```
    #[must_use]
    pub fn to_pointer(&self) -> String {
        let mut pointer = String::new();
        for segment in &self.segments {
            pointer.push('/');
            pointer.push_str(&escape_pointer_token(&segment.kind));
            pointer.push('/');
            pointer.push_str(&escape_pointer_token(&segment.name));
        }
        pointer
    }
}

fn segment(kind: String, name: String) -> Segment {
    assert!(!kind.is_empty(), "address segment type must not be empty");
    assert!(!name.is_empty(), "address segment name must not be empty");
    Segment { kind, name }
}

fn escape_pointer_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "/{}={}", segment.kind, segment.name)?;
        }
        Ok(())
    }
}

/// Serializes to the management protocol form: `[{"type": "name"}, ...]`.
impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.segments.len()))?;
        for segment in &self.segments {
            seq.serialize_element(&SegmentEntry(segment))?;
        }
        seq.end()
    }
}

struct SegmentEntry<'a>(&'a Segment);

impl Serialize for SegmentEntry<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.0.kind, &self.0.name)?;
        map.end()
    }
}

/// Error returned when parsing an address string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid address '{input}': {reason}")]
pub struct ParseAddressError {
    /// The rejected input
    pub input: String,
    /// Reason for rejection
    pub reason: &'static str,
}

impl FromStr for Address {
    type Err = ParseAddressError;

    /// Parses `/type=name/type=name`. The leading slash is optional.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason| ParseAddressError {
            input: s.to_string(),
            reason,
        };

        let trimmed = s.strip_prefix('/').unwrap_or(s);
        if trimmed.is_empty() {
            return Err(invalid("address must have at least one segment"));
        }

        let mut segments = Vec::new();
        for part in trimmed.split('/') {
            let (kind, name) = part
                .split_once('=')
                .ok_or_else(|| invalid("segment must be 'type=name'"))?;
            if kind.is_empty() || name.is_empty() {
                return Err(invalid("segment type and name must not be empty"));
            }
            segments.push(Segment {
                kind: kind.to_string(),
                name: name.to_string(),
            });
        }

        Ok(Self { segments })
    }
}
