use serde_json::{Map, Value};
use tracing::trace;

/// Deep-merges global defaults, chart-type defaults and user options.
///
/// Right-biased: for every key, the most specific layer that defines it wins.
/// Objects merge recursively, arrays and scalars are replaced wholesale, and
/// absent keys never override. A layer that is not an object (for example
/// `Value::Null` for "no user options") contributes nothing.
#[must_use]
pub fn merge_options(global_defaults: &Value, type_defaults: &Value, user_options: &Value) -> Value {
    let mut merged = Value::Object(Map::new());
    for layer in [global_defaults, type_defaults, user_options] {
        if layer.is_object() {
            deep_merge_into(&mut merged, layer);
        } else {
            trace!(kind = ?value_kind(layer), "skipping non-object option layer");
        }
    }
    merged
}

/// Merges `source` into `target` in place with right-biased semantics.
///
/// Values are cloned out of `source`, so later mutation of the result never
/// leaks back into a defaults layer.
pub fn deep_merge_into(target: &mut Value, source: &Value) {
    match (target, source) {
        (Value::Object(target_map), Value::Object(source_map)) => {
            for (key, source_value) in source_map {
                match target_map.get_mut(key) {
                    Some(existing) if existing.is_object() && source_value.is_object() => {
                        deep_merge_into(existing, source_value);
                    }
                    _ => {
                        target_map.insert(key.clone(), source_value.clone());
                    }
                }
            }
        }
        (target, source) => *target = source.clone(),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
