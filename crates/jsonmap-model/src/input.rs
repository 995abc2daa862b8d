//! Shape checks for the source and target documents.
//!
//! Providers hand the mapper a source array of same-shaped objects and a
//! single target object. These helpers turn loosely typed JSON into the
//! object maps the mapper works on.

use serde_json::{Map, Value};

use crate::error::{ModelError, Result};

/// A JSON object with its key order preserved.
pub type Object = Map<String, Value>;

/// Name of a JSON value's type, for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Require `value` to be an object.
pub fn expect_object(value: Value, what: &str) -> Result<Object> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(ModelError::NotAnObject {
            what: what.to_string(),
            found: json_type_name(&other),
        }),
    }
}

/// Source records: an array of objects, or a single object taken as one record.
pub fn source_records(value: Value) -> Result<Vec<Object>> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| expect_object(item, &format!("source record {idx}")))
            .collect(),
        Value::Object(map) => Ok(vec![map]),
        other => Err(ModelError::NotAnObject {
            what: "source".to_string(),
            found: json_type_name(&other),
        }),
    }
}
