//! Input and output value models.
//!
//! [`InputValue`] is whatever the upstream pipeline produced: its shape is only
//! known once inspected. [`OutputValue`] is shaped by the descriptor it was
//! converted against and mirrors the target type system's kinds.

use std::collections::BTreeMap;
use std::fmt;

/// A dynamically shaped value produced upstream.
#[derive(Debug, Clone, PartialEq)]
pub enum InputValue {
    Null,
    Bool(bool),
    Int64(i64),
    Float64(f64),
    Bytes(Vec<u8>),
    Text(String),
    Sequence(Vec<InputValue>),
    Mapping(BTreeMap<String, InputValue>),
    /// A nested named-field record.
    Container(Container),
}

/// Runtime shape of an [`InputValue`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Null,
    Bool,
    Int64,
    Float64,
    Bytes,
    Text,
    Sequence,
    Mapping,
    Container,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Shape::Null => "null",
            Shape::Bool => "bool",
            Shape::Int64 => "int64",
            Shape::Float64 => "float64",
            Shape::Bytes => "bytes",
            Shape::Text => "text",
            Shape::Sequence => "sequence",
            Shape::Mapping => "mapping",
            Shape::Container => "container",
        };
        f.write_str(name)
    }
}

/// A named-field record of input values.
///
/// Field lookup goes through [`crate::FieldAccessor`]; iteration order is by
/// field name and carries no meaning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Container {
    fields: BTreeMap<String, InputValue>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<InputValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Store `value` under `name`, returning the previous value if any.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<InputValue>,
    ) -> Option<InputValue> {
        self.fields.insert(name.into(), value.into())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn as_map(&self) -> &BTreeMap<String, InputValue> {
        &self.fields
    }
}

impl FromIterator<(String, InputValue)> for Container {
    fn from_iter<I: IntoIterator<Item = (String, InputValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl InputValue {
    pub fn shape(&self) -> Shape {
        match self {
            InputValue::Null => Shape::Null,
            InputValue::Bool(_) => Shape::Bool,
            InputValue::Int64(_) => Shape::Int64,
            InputValue::Float64(_) => Shape::Float64,
            InputValue::Bytes(_) => Shape::Bytes,
            InputValue::Text(_) => Shape::Text,
            InputValue::Sequence(_) => Shape::Sequence,
            InputValue::Mapping(_) => Shape::Mapping,
            InputValue::Container(_) => Shape::Container,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, InputValue::Null)
    }

    /// Textual representation of the value, or `None` for null.
    ///
    /// Text is returned unchanged, so stringifying twice is the same as
    /// stringifying once. Floats always carry a fractional part (`1.0`), bytes
    /// are decoded as lossy UTF-8 and compound values render as compact JSON.
    pub fn stringify(&self) -> Option<String> {
        let text = match self {
            InputValue::Null => return None,
            InputValue::Bool(b) => b.to_string(),
            InputValue::Int64(n) => n.to_string(),
            InputValue::Float64(f) => format!("{f:?}"),
            InputValue::Bytes(bytes) => String::from_utf8_lossy(bytes).into_owned(),
            InputValue::Text(s) => s.clone(),
            compound => crate::json::input_to_json(compound).to_string(),
        };
        Some(text)
    }
}

impl From<bool> for InputValue {
    fn from(b: bool) -> Self {
        InputValue::Bool(b)
    }
}

impl From<i32> for InputValue {
    fn from(n: i32) -> Self {
        InputValue::Int64(n.into())
    }
}

impl From<i64> for InputValue {
    fn from(n: i64) -> Self {
        InputValue::Int64(n)
    }
}

impl From<f64> for InputValue {
    fn from(f: f64) -> Self {
        InputValue::Float64(f)
    }
}

impl From<&str> for InputValue {
    fn from(s: &str) -> Self {
        InputValue::Text(s.to_string())
    }
}

impl From<String> for InputValue {
    fn from(s: String) -> Self {
        InputValue::Text(s)
    }
}

impl From<Vec<InputValue>> for InputValue {
    fn from(items: Vec<InputValue>) -> Self {
        InputValue::Sequence(items)
    }
}

impl From<BTreeMap<String, InputValue>> for InputValue {
    fn from(entries: BTreeMap<String, InputValue>) -> Self {
        InputValue::Mapping(entries)
    }
}

impl From<Container> for InputValue {
    fn from(container: Container) -> Self {
        InputValue::Container(container)
    }
}

impl<T: Into<InputValue>> From<Option<T>> for InputValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(InputValue::Null, Into::into)
    }
}

/// A converted value, shaped by the descriptor branch it matched.
///
/// Scalars carry the source payload unchanged: `Int` and `Float` are not
/// narrowed here. Narrowing belongs to the sink's encoder.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputValue {
    Null,
    Boolean(bool),
    Int(i64),
    Long(i64),
    Float(f64),
    Double(f64),
    Bytes(Vec<u8>),
    String(String),
    Array(Vec<OutputValue>),
    Map(BTreeMap<String, OutputValue>),
    /// Fields in descriptor declaration order.
    Record(Vec<(String, OutputValue)>),
}

impl OutputValue {
    pub fn is_null(&self) -> bool {
        matches!(self, OutputValue::Null)
    }

    /// Look up a field of a record value.
    pub fn field(&self, name: &str) -> Option<&OutputValue> {
        match self {
            OutputValue::Record(fields) => fields
                .iter()
                .find(|(field, _)| field == name)
                .map(|(_, value)| value),
            _ => None,
        }
    }
}

impl From<OutputValue> for InputValue {
    fn from(value: OutputValue) -> Self {
        match value {
            OutputValue::Null => InputValue::Null,
            OutputValue::Boolean(b) => InputValue::Bool(b),
            OutputValue::Int(n) | OutputValue::Long(n) => InputValue::Int64(n),
            OutputValue::Float(f) | OutputValue::Double(f) => InputValue::Float64(f),
            OutputValue::Bytes(bytes) => InputValue::Bytes(bytes),
            OutputValue::String(s) => InputValue::Text(s),
            OutputValue::Array(items) => {
                InputValue::Sequence(items.into_iter().map(Into::into).collect())
            }
            OutputValue::Map(entries) => InputValue::Mapping(
                entries.into_iter().map(|(k, v)| (k, v.into())).collect(),
            ),
            OutputValue::Record(fields) => InputValue::Container(
                fields.into_iter().map(|(k, v)| (k, v.into())).collect(),
            ),
        }
    }
}
