//! JSON interop for engine values.
//!
//! Host data arrives as JSON and results leave as JSON; this module bridges
//! [`Value`] and `serde_json::Value` in both directions. `Missing`
//! round-trips as JSON `null`, the closest host-model notion of absence.

use std::collections::HashMap;

use crate::value::Value;

/// Converts a JSON value into an engine value.
pub fn from_json_value(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Missing,
        serde_json::Value::Bool(b) => Value::Boolean(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else {
                Value::Float(n.as_f64().unwrap_or(0.0))
            }
        }
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(items) => {
            Value::Array(items.into_iter().map(from_json_value).collect())
        }
        serde_json::Value::Object(map) => {
            let mut object = HashMap::new();
            for (k, v) in map {
                object.insert(k, from_json_value(v));
            }
            Value::Object(object)
        }
    }
}

/// Converts an engine value into a JSON value.
///
/// Non-finite floats have no JSON representation and become `null`.
pub fn to_json_value(value: &Value) -> serde_json::Value {
    match value {
        Value::Missing => serde_json::Value::Null,
        Value::Boolean(b) => serde_json::Value::Bool(*b),
        Value::Integer(n) => serde_json::Value::Number((*n).into()),
        Value::Float(n) => serde_json::Number::from_f64(*n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Array(items) => serde_json::Value::Array(items.iter().map(to_json_value).collect()),
        Value::Object(map) => {
            // sort keys for deterministic output
            let mut keys: Vec<_> = map.keys().collect();
            keys.sort();
            let mut object = serde_json::Map::new();
            for k in keys {
                object.insert(k.clone(), to_json_value(&map[k]));
            }
            serde_json::Value::Object(object)
        }
    }
}

/// Compact JSON rendering of a value.
pub fn to_json(value: &Value) -> String {
    to_json_value(value).to_string()
}

/// Pretty JSON rendering of a value, 2-space indented.
pub fn to_json_pretty(value: &Value) -> String {
    serde_json::to_string_pretty(&to_json_value(value)).unwrap_or_else(|_| "null".to_string())
}
