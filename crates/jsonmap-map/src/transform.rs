//! Recursive rename pass over a JSON object.
//!
//! A rule renames a field in place: the value stays at the nesting depth of
//! its source field and only the key changes to the target's leaf segment.
//! Arrays are carried over as-is and never descended into.

use std::collections::HashMap;

use serde_json::{Map, Value};

use jsonmap_model::{FieldPath, MappingRule, Object};

/// First rule for each source path, in rule order.
struct RuleIndex<'a> {
    first: HashMap<&'a str, &'a MappingRule>,
}

impl<'a> RuleIndex<'a> {
    fn new(rules: impl IntoIterator<Item = &'a MappingRule>) -> Self {
        let mut first = HashMap::new();
        for rule in rules {
            first.entry(rule.source.as_str()).or_insert(rule);
        }
        Self { first }
    }

    fn output_key<'k>(&self, path: &FieldPath, key: &'k str) -> &'k str
    where
        'a: 'k,
    {
        match self.first.get(path.as_str()) {
            Some(&rule) => rule.output_key(),
            None => key,
        }
    }
}

/// Return a renamed copy of `node`.
///
/// `parent` is the path of `node` itself (`None` at the top level). Keys keep
/// their order; when two keys rename to the same output key, the later value
/// replaces the earlier one at the earlier key's position.
pub fn apply_mapping<'a>(
    node: &Object,
    rules: impl IntoIterator<Item = &'a MappingRule>,
    parent: Option<&FieldPath>,
) -> Object {
    let index = RuleIndex::new(rules);
    rename_object(node, &index, parent)
}

fn rename_object(node: &Object, index: &RuleIndex<'_>, parent: Option<&FieldPath>) -> Object {
    let mut out = Map::with_capacity(node.len());
    for (key, value) in node {
        let full = FieldPath::under(parent, key);
        let output_key = index.output_key(&full, key).to_string();
        let output = match value {
            Value::Object(child) => Value::Object(rename_object(child, index, Some(&full))),
            other => other.clone(),
        };
        out.insert(output_key, output);
    }
    out
}

/// Rename an arbitrary value. Non-objects are returned unchanged.
pub fn apply_to_value<'a>(value: &Value, rules: impl IntoIterator<Item = &'a MappingRule>) -> Value {
    match value {
        Value::Object(node) => Value::Object(apply_mapping(node, rules, None)),
        other => other.clone(),
    }
}

/// Rename every source record; this is what gets persisted.
pub fn apply_to_records<'a>(
    records: &[Object],
    rules: impl IntoIterator<Item = &'a MappingRule>,
) -> Vec<Value> {
    let index = RuleIndex::new(rules);
    records
        .iter()
        .map(|record| Value::Object(rename_object(record, &index, None)))
        .collect()
}
