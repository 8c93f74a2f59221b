//! Transform lookup and the generic resource insert.

use std::collections::HashMap;
use std::fmt;

use serde_json::{Map, Value};

use super::{DocumentError, Parameters, Transform, TransformError};

/// Parameter carrying the resource name for [`add_resource`].
pub const NAME_PARAMETER: &str = "name";

/// Parameter requesting replacement of an existing resource for [`add_resource`].
pub const REPLACE_PARAMETER: &str = "replace-existing";

/// A transform body: mutates the located subtree using the parameters.
pub type TransformFn =
    Box<dyn Fn(&mut Map<String, Value>, &Parameters) -> Result<(), TransformError> + Send + Sync>;

/// Transforms keyed by identifier.
#[derive(Default)]
pub struct TransformRegistry {
    transforms: HashMap<String, TransformFn>,
}

impl fmt::Debug for TransformRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<_> = self.transforms.keys().collect();
        ids.sort();
        f.debug_struct("TransformRegistry").field("ids", &ids).finish()
    }
}

impl TransformRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a transform, replacing any previous one with the same id.
    #[must_use]
    pub fn with(mut self, id: impl Into<String>, transform: TransformFn) -> Self {
        self.transforms.insert(id.into(), transform);
        self
    }

    /// Returns true if a transform is registered under `id`.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.transforms.contains_key(id)
    }

    /// Applies `transform` to an in-memory document.
    ///
    /// The document is left untouched when an error is returned.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::TransformNotFound`] for an unknown id and
    /// [`DocumentError::Transform`] when the transform body fails.
    pub fn apply(&self, document: &mut Value, transform: &Transform) -> Result<(), DocumentError> {
        let body = self
            .transforms
            .get(transform.id())
            .ok_or_else(|| DocumentError::TransformNotFound(transform.id().to_string()))?;

        let fail = |source| DocumentError::Transform {
            id: transform.id().to_string(),
            source,
        };

        let locator = transform.locator().to_pointer();
        let subtree = document
            .pointer_mut(&locator)
            .ok_or_else(|| {
                fail(TransformError::SubtreeNotFound {
                    locator: locator.clone(),
                })
            })?
            .as_object_mut()
            .ok_or_else(|| {
                fail(TransformError::Malformed {
                    locator: locator.clone(),
                    reason: "subtree is not an object".to_string(),
                })
            })?;

        // Work on a copy so a failing body cannot leave a half-applied subtree.
        let mut staged = subtree.clone();
        body(&mut staged, transform.parameters())
            .map_err(|err| match err {
                TransformError::AlreadyExists { kind, name, .. } => TransformError::AlreadyExists {
                    locator: locator.clone(),
                    kind,
                    name,
                },
                other => other,
            })
            .map_err(fail)?;
        *subtree = staged;

        tracing::debug!(id = transform.id(), locator = %locator, "Applied document transform");
        Ok(())
    }
}

/// Builds the transform that inserts a `kind` resource into the subtree.
///
/// Reads [`NAME_PARAMETER`] (required) and [`REPLACE_PARAMETER`]; every other
/// parameter becomes a string attribute of the new resource. Parameters are
/// flat strings, so numbers and booleans land in the document in their textual
/// form (`"12345"`, `"true"`) and nested groups as their JSON encoding. An existing
/// resource with the same name is replaced wholesale when replacement is
/// requested and rejected otherwise.
#[must_use]
pub fn add_resource(kind: &'static str) -> TransformFn {
    Box::new(move |subtree, params| {
        let name = params
            .get(NAME_PARAMETER)
            .ok_or(TransformError::MissingParameter(NAME_PARAMETER))?;

        let container = subtree
            .entry(kind)
            .or_insert_with(|| Value::Object(Map::new()))
            .as_object_mut()
            .ok_or_else(|| TransformError::Malformed {
                locator: kind.to_string(),
                reason: "resource container is not an object".to_string(),
            })?;

        if container.contains_key(name) && !params.flag(REPLACE_PARAMETER) {
            return Err(TransformError::AlreadyExists {
                locator: String::new(),
                kind: kind.to_string(),
                name: name.to_string(),
            });
        }

        let attributes: Map<String, Value> = params
            .iter()
            .filter(|(n, _)| *n != NAME_PARAMETER && *n != REPLACE_PARAMETER)
            .map(|(n, v)| (n.to_string(), Value::String(v.to_string())))
            .collect();

        container.insert(name.to_string(), Value::Object(attributes));
        Ok(())
    })
}
