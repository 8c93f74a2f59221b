//! `x500-attribute-principal-decoder` resources.

use serde::Deserialize;

use crate::Address;
use crate::command::{Command, ValidationError, add_transform};
use crate::document::Transform;
use crate::values::ValueSet;

use super::{check_name, required, resource};

pub(super) const KIND: &str = "x500-attribute-principal-decoder";
pub(super) const TRANSFORM: &str = "add-x500-attribute-principal-decoder";

/// Adds a principal decoder that builds a name from X.500 attributes.
#[derive(Debug, Clone)]
pub struct AddX500AttributePrincipalDecoder {
    name: String,
    oid: String,
    joiner: Option<String>,
    start_segment: Option<u32>,
    maximum_segments: Option<u32>,
    reverse: Option<bool>,
    required_oids: Vec<String>,
    replace_existing: bool,
}

impl AddX500AttributePrincipalDecoder {
    /// Starts building a decoder called `name`.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> AddX500AttributePrincipalDecoderBuilder {
        AddX500AttributePrincipalDecoderBuilder {
            name: name.into(),
            ..AddX500AttributePrincipalDecoderBuilder::default()
        }
    }
}

impl Command for AddX500AttributePrincipalDecoder {
    fn kind(&self) -> &'static str {
        KIND
    }

    fn address(&self) -> Address {
        resource(KIND, &self.name)
    }

    fn values(&self) -> ValueSet {
        ValueSet::empty()
            .and("oid", &self.oid)
            .and_optional("joiner", self.joiner.as_deref())
            .and_optional("start-segment", self.start_segment)
            .and_optional("maximum-segments", self.maximum_segments)
            .and_optional("reverse", self.reverse)
            .and_list_optional("required-oids", &self.required_oids)
    }

    fn replace_existing(&self) -> bool {
        self.replace_existing
    }

    fn offline(&self) -> Option<Transform> {
        add_transform(TRANSFORM, self)
    }
}

/// Builder for [`AddX500AttributePrincipalDecoder`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct AddX500AttributePrincipalDecoderBuilder {
    name: String,
    oid: Option<String>,
    joiner: Option<String>,
    start_segment: Option<u32>,
    maximum_segments: Option<u32>,
    reverse: Option<bool>,
    required_oids: Vec<String>,
    replace_existing: bool,
}

impl AddX500AttributePrincipalDecoderBuilder {
    /// Sets the OID of the attribute to decode, e.g. `2.5.4.3` for CN.
    #[must_use]
    pub fn oid(mut self, oid: impl Into<String>) -> Self {
        self.oid = Some(oid.into());
        self
    }

    /// Sets the string placed between decoded segments.
    #[must_use]
    pub fn joiner(mut self, joiner: impl Into<String>) -> Self {
        self.joiner = Some(joiner.into());
        self
    }

    /// Sets the index of the first attribute value used.
    #[must_use]
    pub const fn start_segment(mut self, start: u32) -> Self {
        self.start_segment = Some(start);
        self
    }

    /// Limits the number of attribute values used.
    #[must_use]
    pub const fn maximum_segments(mut self, maximum: u32) -> Self {
        self.maximum_segments = Some(maximum);
        self
    }

    /// Processes attribute values in reverse order.
    #[must_use]
    pub const fn reverse(mut self, reverse: bool) -> Self {
        self.reverse = Some(reverse);
        self
    }

    /// Appends OIDs that must be present for the decoder to match.
    #[must_use]
    pub fn required_oids<I, S>(mut self, oids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_oids.extend(oids.into_iter().map(Into::into));
        self
    }

    /// Removes and recreates an existing decoder.
    #[must_use]
    pub const fn replace_existing(mut self) -> Self {
        self.replace_existing = true;
        self
    }

    /// Validates and builds the command.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for an empty name or a missing OID.
    pub fn build(self) -> Result<AddX500AttributePrincipalDecoder, ValidationError> {
        check_name(&self.name, KIND)?;
        let oid = required("oid", self.oid)?;

        Ok(AddX500AttributePrincipalDecoder {
            name: self.name,
            oid,
            joiner: self.joiner,
            start_segment: self.start_segment,
            maximum_segments: self.maximum_segments,
            reverse: self.reverse,
            required_oids: self.required_oids,
            replace_existing: self.replace_existing,
        })
    }
}
