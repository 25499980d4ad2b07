//! Target type descriptors.
//!
//! A [`TypeDescriptor`] is a fully resolved, finite tree describing the shape a
//! converted value must take. Descriptors are built by the caller (directly, via
//! [`crate::avro`], or by deserializing descriptor JSON) and are only read by
//! the transcoder.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TranscodeError};

/// The recursively defined shape of a target value.
///
/// Union branches are tried in declaration order. `Enum` and `Fixed` are
/// expressible in the target type system but are not transcodable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TypeDescriptor {
    Null,
    Boolean,
    Int,
    Long,
    Float,
    Double,
    Bytes,
    String,
    Array {
        items: Box<TypeDescriptor>,
    },
    Map {
        values: Box<TypeDescriptor>,
    },
    Record {
        name: String,
        fields: Vec<FieldDescriptor>,
    },
    Union {
        branches: Vec<TypeDescriptor>,
    },
    Enum {
        name: String,
        symbols: Vec<String>,
    },
    Fixed {
        name: String,
        size: usize,
    },
}

/// A named field of a record descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(rename = "schema")]
    pub descriptor: TypeDescriptor,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, descriptor: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            descriptor,
        }
    }
}

/// Flat tag of a descriptor, used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Null,
    Boolean,
    Int,
    Long,
    Float,
    Double,
    Bytes,
    String,
    Array,
    Map,
    Record,
    Union,
    Enum,
    Fixed,
}

impl TypeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TypeKind::Null => "null",
            TypeKind::Boolean => "boolean",
            TypeKind::Int => "int",
            TypeKind::Long => "long",
            TypeKind::Float => "float",
            TypeKind::Double => "double",
            TypeKind::Bytes => "bytes",
            TypeKind::String => "string",
            TypeKind::Array => "array",
            TypeKind::Map => "map",
            TypeKind::Record => "record",
            TypeKind::Union => "union",
            TypeKind::Enum => "enum",
            TypeKind::Fixed => "fixed",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TypeDescriptor {
    pub fn array(items: TypeDescriptor) -> Self {
        TypeDescriptor::Array {
            items: Box::new(items),
        }
    }

    pub fn map(values: TypeDescriptor) -> Self {
        TypeDescriptor::Map {
            values: Box::new(values),
        }
    }

    pub fn record(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        TypeDescriptor::Record {
            name: name.into(),
            fields,
        }
    }

    pub fn union(branches: Vec<TypeDescriptor>) -> Self {
        TypeDescriptor::Union { branches }
    }

    /// `union<null, inner>`, the target system's spelling of an optional value.
    pub fn nullable(inner: TypeDescriptor) -> Self {
        TypeDescriptor::Union {
            branches: vec![TypeDescriptor::Null, inner],
        }
    }

    pub fn kind(&self) -> TypeKind {
        match self {
            TypeDescriptor::Null => TypeKind::Null,
            TypeDescriptor::Boolean => TypeKind::Boolean,
            TypeDescriptor::Int => TypeKind::Int,
            TypeDescriptor::Long => TypeKind::Long,
            TypeDescriptor::Float => TypeKind::Float,
            TypeDescriptor::Double => TypeKind::Double,
            TypeDescriptor::Bytes => TypeKind::Bytes,
            TypeDescriptor::String => TypeKind::String,
            TypeDescriptor::Array { .. } => TypeKind::Array,
            TypeDescriptor::Map { .. } => TypeKind::Map,
            TypeDescriptor::Record { .. } => TypeKind::Record,
            TypeDescriptor::Union { .. } => TypeKind::Union,
            TypeDescriptor::Enum { .. } => TypeKind::Enum,
            TypeDescriptor::Fixed { .. } => TypeKind::Fixed,
        }
    }

    /// True for a union with a `null` branch.
    pub fn is_nullable(&self) -> bool {
        match self {
            TypeDescriptor::Union { branches } => branches
                .iter()
                .any(|b| matches!(b, TypeDescriptor::Null)),
            _ => false,
        }
    }

    /// Check the structural invariants of the whole tree:
    ///
    /// - a union has at most one `null` branch and does not directly contain
    ///   another union;
    /// - field names are unique within a record.
    pub fn validate(&self) -> Result<()> {
        match self {
            TypeDescriptor::Array { items } => items.validate(),
            TypeDescriptor::Map { values } => values.validate(),
            TypeDescriptor::Record { name, fields } => {
                let mut seen = HashSet::new();
                for field in fields {
                    if !seen.insert(field.name.as_str()) {
                        return Err(TranscodeError::InvalidDescriptor(format!(
                            "record {name} declares field '{}' more than once",
                            field.name
                        )));
                    }
                    field.descriptor.validate()?;
                }
                Ok(())
            }
            TypeDescriptor::Union { branches } => {
                let nulls = branches
                    .iter()
                    .filter(|b| matches!(b, TypeDescriptor::Null))
                    .count();
                if nulls > 1 {
                    return Err(TranscodeError::InvalidDescriptor(format!(
                        "{self} has {nulls} null branches"
                    )));
                }
                for branch in branches {
                    if matches!(branch, TypeDescriptor::Union { .. }) {
                        return Err(TranscodeError::InvalidDescriptor(format!(
                            "{self} directly contains another union"
                        )));
                    }
                    branch.validate()?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Array { items } => write!(f, "array<{items}>"),
            TypeDescriptor::Map { values } => write!(f, "map<{values}>"),
            TypeDescriptor::Record { name, fields } => {
                write!(f, "record {name} {{")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, " {}: {}", field.name, field.descriptor)?;
                }
                if fields.is_empty() {
                    f.write_str("}")
                } else {
                    f.write_str(" }")
                }
            }
            TypeDescriptor::Union { branches } => {
                f.write_str("union<")?;
                for (i, branch) in branches.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{branch}")?;
                }
                f.write_str(">")
            }
            TypeDescriptor::Enum { name, symbols } => {
                write!(f, "enum {name} {{{}}}", symbols.join(", "))
            }
            TypeDescriptor::Fixed { name, size } => write!(f, "fixed {name}({size})"),
            scalar => f.write_str(scalar.kind().as_str()),
        }
    }
}
