//! Mapping rules: "rename this source field to this target's leaf name".

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::path::FieldPath;

/// A single (source, target) pair.
///
/// Only the leaf segment of `target` drives the rename; the rest of the
/// target path describes where the field is meant to go and is informational.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MappingRule {
    /// Path of the field in the source object.
    pub source: FieldPath,
    /// Path of the field in the target object.
    pub target: FieldPath,
}

impl MappingRule {
    pub fn new(source: impl Into<FieldPath>, target: impl Into<FieldPath>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Key the source field is renamed to.
    pub fn output_key(&self) -> &str {
        self.target.leaf()
    }
}

impl fmt::Display for MappingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

/// Serialized form of a rule list, as exchanged with files and tools.
///
/// Unknown keys are rejected so a misspelt `rules` key is an error rather
/// than an empty rule list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MappingDocument {
    #[serde(default)]
    pub rules: Vec<MappingRule>,
}

impl MappingDocument {
    pub fn new(rules: Vec<MappingRule>) -> Self {
        Self { rules }
    }
}
