//! JSON text for display.
//!
//! Integral floats such as `1.0` print as `1`, matching how a browser front
//! end shows the same value. Stored and submitted values are not touched.

use serde_json::{Number, Value};

/// Largest magnitude below which every integral `f64` is exact.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Copy of `value` with integral floats turned into integers.
pub fn normalize_numbers(value: &Value) -> Value {
    match value {
        Value::Number(number) => Value::Number(integral(number).unwrap_or_else(|| number.clone())),
        Value::Array(items) => Value::Array(items.iter().map(normalize_numbers).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, item)| (key.clone(), normalize_numbers(item)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Compact display text of `value`.
pub fn compact(value: &Value) -> String {
    normalize_numbers(value).to_string()
}

/// Indented display text of `values` as a JSON array.
pub fn pretty(values: &[Value]) -> serde_json::Result<String> {
    let normalized: Vec<Value> = values.iter().map(normalize_numbers).collect();
    serde_json::to_string_pretty(&normalized)
}

#[allow(clippy::cast_possible_truncation)]
fn integral(number: &Number) -> Option<Number> {
    if !number.is_f64() {
        return None;
    }
    let float = number.as_f64()?;
    if float.fract() == 0.0 && float.abs() < MAX_EXACT_INTEGER {
        Some(Number::from(float as i64))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn integral_floats_print_as_integers() {
        let value: Value = serde_json::from_str(r#"{"a": 1.0, "b": [2.0, -0.0], "c": 1.5}"#).unwrap();
        assert_eq!(compact(&value), r#"{"a":1,"b":[2,0],"c":1.5}"#);
    }

    #[test]
    fn other_values_are_unchanged() {
        let value = json!({"s": "1.0", "n": null, "i": 7, "big": 1e300});
        assert_eq!(normalize_numbers(&value), value);
    }

    #[test]
    fn key_order_is_kept() {
        let value: Value = serde_json::from_str(r#"{"z": 1.0, "a": 2}"#).unwrap();
        assert_eq!(compact(&value), r#"{"z":1,"a":2}"#);
    }

    #[test]
    fn pretty_uses_two_space_indent() {
        let text = pretty(&[json!({"a": 3.0})]).unwrap();
        assert_eq!(text, "[\n  {\n    \"a\": 3\n  }\n]");
    }
}
