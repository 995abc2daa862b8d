//! Dot-joined field paths.
//!
//! A [`FieldPath`] locates a value inside a nested JSON object. Paths are kept
//! in their rendered, dot-joined form and compared textually, so a root key
//! named `"a.b"` and the nested key `b` under `a` denote the same path.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator between path segments.
pub const SEPARATOR: char = '.';

/// Location of a field inside a nested object, e.g. `user.name`.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPath(String);

impl FieldPath {
    /// The empty path, i.e. the top level of an object.
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Parse a dot-joined path. Any text is accepted.
    pub fn parse(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Path of `key` nested under `parent` (or at the top level when `None`).
    pub fn under(parent: Option<&FieldPath>, key: &str) -> Self {
        match parent {
            Some(parent) => parent.child(key),
            None => Self(key.to_string()),
        }
    }

    /// Extend this path by one key.
    pub fn child(&self, key: &str) -> Self {
        if self.0.is_empty() {
            Self(key.to_string())
        } else {
            Self(format!("{}{SEPARATOR}{key}", self.0))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Final segment of the path; the whole path when it has no separator.
    pub fn leaf(&self) -> &str {
        self.0.rsplit(SEPARATOR).next().unwrap_or_default()
    }

    /// Path without its final segment, or `None` for single-segment paths.
    pub fn parent(&self) -> Option<FieldPath> {
        self.0
            .rsplit_once(SEPARATOR)
            .map(|(head, _)| FieldPath(head.to_string()))
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(SEPARATOR).filter(|_| !self.0.is_empty())
    }

    /// Number of segments. The root has depth 0.
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    /// True when `self` is a strict ancestor of `other`.
    pub fn is_ancestor_of(&self, other: &FieldPath) -> bool {
        if self.is_root() {
            return !other.is_root();
        }
        other
            .0
            .strip_prefix(self.0.as_str())
            .is_some_and(|rest| rest.starts_with(SEPARATOR))
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldPath {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<String> for FieldPath {
    fn from(value: String) -> Self {
        Self::parse(value)
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for FieldPath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for FieldPath {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for FieldPath {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
