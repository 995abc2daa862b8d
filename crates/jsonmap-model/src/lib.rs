//! Data model for the JSON field mapper.
//!
//! - [`FieldPath`]: dot-joined location of a field inside a nested object
//! - [`MappingRule`]: a (source, target) rename pair
//! - geometry ([`Point`], [`Rect`], [`Color`]) and panel [`Role`]
//! - input shape checks for source records and the target object

#![deny(unsafe_code)]

pub mod display;
pub mod error;
pub mod geometry;
pub mod input;
pub mod path;
pub mod rule;

pub use error::{ModelError, Result};
pub use geometry::{Color, Point, Rect, Role};
pub use input::{Object, expect_object, json_type_name, source_records};
pub use path::FieldPath;
pub use rule::{MappingDocument, MappingRule};
