//! Error types for transcoding and descriptor import.

use std::fmt;

use thiserror::Error;

use crate::descriptor::TypeKind;
use crate::value::Shape;

/// One step from a parent value into a child value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// A named field of a record.
    Field(String),
    /// A position in an array.
    Index(usize),
    /// A key of a map.
    Key(String),
}

/// Location of a failing leaf relative to the value handed to the transcoder.
///
/// Renders as `orders[1].sku` or `attrs["color"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path(Vec<PathSegment>);

impl Path {
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    fn push_front(&mut self, segment: PathSegment) {
        self.0.insert(0, segment);
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if i == 0 => f.write_str(name)?,
                PathSegment::Field(name) => write!(f, ".{name}")?,
                PathSegment::Index(idx) => write!(f, "[{idx}]")?,
                PathSegment::Key(key) => write!(f, "[{key:?}]")?,
            }
        }
        Ok(())
    }
}

/// Errors that can occur while transcoding a value or importing a descriptor.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TranscodeError {
    /// A declared record field has no value in the input container.
    #[error("field not found: {field}")]
    FieldNotFound { field: String },

    /// The descriptor names a kind the transcoder does not convert (enum, fixed,
    /// recursive named references, unmapped logical types).
    #[error("field type {kind} is not supported")]
    UnsupportedType { kind: String },

    /// No branch of a non-nullable union accepted the value.
    #[error("unable to determine union type: no branch of union<{}> matched", join_kinds(.branches))]
    IndeterminateUnion { branches: Vec<TypeKind> },

    /// Strict resolution only: more than one union branch accepted the value.
    #[error("ambiguous union: branches {matched:?} of union<{}> all matched", join_kinds(.branches))]
    AmbiguousUnion {
        branches: Vec<TypeKind>,
        matched: Vec<usize>,
    },

    /// The input value's runtime shape cannot be converted to the descriptor kind.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: TypeKind, found: Shape },

    /// A descriptor tree violates a structural invariant, or schema text was rejected.
    #[error("invalid descriptor: {0}")]
    InvalidDescriptor(String),

    /// Input text was not valid JSON.
    #[error("JSON parse error: {0}")]
    Json(String),

    /// A nested array element, map value or record field failed to convert.
    #[error("at {path}: {source}")]
    Element {
        path: Path,
        source: Box<TranscodeError>,
    },
}

impl TranscodeError {
    /// Annotate this error with the segment leading to it. Successive calls
    /// from outer levels accumulate into a single path.
    pub fn at(self, segment: PathSegment) -> Self {
        match self {
            TranscodeError::Element { mut path, source } => {
                path.push_front(segment);
                TranscodeError::Element { path, source }
            }
            other => TranscodeError::Element {
                path: Path(vec![segment]),
                source: Box::new(other),
            },
        }
    }

    /// The innermost error, with any path annotation stripped.
    pub fn root_cause(&self) -> &TranscodeError {
        match self {
            TranscodeError::Element { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Location of the failing leaf, if the failure was nested.
    pub fn path(&self) -> Option<&Path> {
        match self {
            TranscodeError::Element { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Fatal errors abort union trial instead of counting as a branch mismatch.
    pub fn is_fatal(&self) -> bool {
        matches!(self.root_cause(), TranscodeError::UnsupportedType { .. })
    }
}

fn join_kinds(kinds: &[TypeKind]) -> String {
    kinds
        .iter()
        .map(|k| k.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<apache_avro::Error> for TranscodeError {
    fn from(err: apache_avro::Error) -> Self {
        TranscodeError::InvalidDescriptor(err.to_string())
    }
}

impl From<serde_json::Error> for TranscodeError {
    fn from(err: serde_json::Error) -> Self {
        TranscodeError::Json(err.to_string())
    }
}

/// Convenience alias used throughout record-transcode.
pub type Result<T> = std::result::Result<T, TranscodeError>;
