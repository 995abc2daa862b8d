//! Error types for the mapping data model.

use thiserror::Error;

/// Errors raised when inputs do not have the shape the mapper expects.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ModelError {
    /// A JSON value that must be an object was something else.
    #[error("{what} must be a JSON object, found {found}")]
    NotAnObject {
        /// What was being read (e.g. "target", "source record 3").
        what: String,
        /// JSON type that was found instead.
        found: &'static str,
    },

    /// A colour string is not of the form `#RRGGBB`.
    #[error("invalid colour '{0}', expected #RRGGBB")]
    InvalidColor(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
