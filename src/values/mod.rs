//! Transport-neutral attribute payloads.
//!
//! This module provides:
//! - Primitive and composite attribute values ([`Scalar`], [`AttributeValue`])
//! - The ordered payload builder every command uses ([`ValueSet`])

mod set;
mod value;

#[cfg(test)]
#[path = "set_tests.rs"]
mod tests;

pub use set::ValueSet;
pub use value::{AttributeValue, Scalar};
