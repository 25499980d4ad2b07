//! JSON interop at the pipeline boundary.
//!
//! Upstream records arrive as JSON objects; converted records leave as JSON
//! objects whose field order follows the record descriptor (`serde_json` is
//! built with `preserve_order`).

use serde_json::{Map, Number, Value};

use crate::error::Result;
use crate::value::{Container, InputValue, OutputValue};

/// Build an input value from parsed JSON.
///
/// Integers that fit `i64` become `Int64`, every other number `Float64`.
/// Objects become named-field containers.
pub fn input_from_json(value: &Value) -> InputValue {
    match value {
        Value::Null => InputValue::Null,
        Value::Bool(b) => InputValue::Bool(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => InputValue::Int64(i),
            None => InputValue::Float64(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => InputValue::Text(s.clone()),
        Value::Array(items) => InputValue::Sequence(items.iter().map(input_from_json).collect()),
        Value::Object(map) => InputValue::Container(
            map.iter()
                .map(|(k, v)| (k.clone(), input_from_json(v)))
                .collect::<Container>(),
        ),
    }
}

/// Parse JSON text into an input value.
pub fn input_from_json_str(json: &str) -> Result<InputValue> {
    let value: Value = serde_json::from_str(json)?;
    Ok(input_from_json(&value))
}

/// Render an input value as JSON. Used for the textual form of compound values.
pub fn input_to_json(value: &InputValue) -> Value {
    match value {
        InputValue::Null => Value::Null,
        InputValue::Bool(b) => Value::Bool(*b),
        InputValue::Int64(n) => Value::Number((*n).into()),
        InputValue::Float64(f) => float_to_json(*f),
        InputValue::Bytes(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
        InputValue::Text(s) => Value::String(s.clone()),
        InputValue::Sequence(items) => Value::Array(items.iter().map(input_to_json).collect()),
        InputValue::Mapping(entries) => Value::Object(
            entries
                .iter()
                .map(|(k, v)| (k.clone(), input_to_json(v)))
                .collect::<Map<_, _>>(),
        ),
        InputValue::Container(container) => Value::Object(
            container
                .as_map()
                .iter()
                .map(|(k, v)| (k.clone(), input_to_json(v)))
                .collect::<Map<_, _>>(),
        ),
    }
}

impl OutputValue {
    /// JSON form of a converted value.
    ///
    /// Bytes map to a string with one code point per byte (U+0000..U+00FF),
    /// the target system's JSON encoding for bytes. Non-finite floats have no
    /// JSON form and become null.
    pub fn to_json(&self) -> Value {
        match self {
            OutputValue::Null => Value::Null,
            OutputValue::Boolean(b) => Value::Bool(*b),
            OutputValue::Int(n) | OutputValue::Long(n) => Value::Number((*n).into()),
            OutputValue::Float(f) | OutputValue::Double(f) => float_to_json(*f),
            OutputValue::Bytes(bytes) => Value::String(bytes.iter().map(|&b| char::from(b)).collect()),
            OutputValue::String(s) => Value::String(s.clone()),
            OutputValue::Array(items) => Value::Array(items.iter().map(OutputValue::to_json).collect()),
            OutputValue::Map(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect::<Map<_, _>>(),
            ),
            OutputValue::Record(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect::<Map<_, _>>(),
            ),
        }
    }
}

fn float_to_json(f: f64) -> Value {
    Number::from_f64(f).map_or(Value::Null, Value::Number)
}
