//! Schema-directed conversion of input values into target-shaped output values.
//!
//! The walk is driven by the descriptor, not the value:
//!
//! - **Scalars** pass through unchanged when the input has the matching runtime
//!   shape (`boolean` ← bool, `int`/`long` ← int64, `float`/`double` ← float64,
//!   `bytes` ← bytes). No numeric coercion happens.
//! - **String** stringifies any non-null input.
//! - **Null** always yields null.
//! - **Array** and **Map** convert every element/value recursively; the first
//!   failure aborts the whole collection.
//! - **Union** resolves by trial conversion, see [`UnionPolicy`].
//! - **Record** projects the declared fields out of a container, in declared
//!   order. Undeclared input fields are ignored.
//!
//! Conversion is a pure function of `(descriptor, value)`: nothing is cached and
//! nothing is shared between calls, so records of a batch can be converted on
//! any number of threads.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::accessor::FieldAccessor;
use crate::descriptor::{FieldDescriptor, TypeDescriptor, TypeKind};
use crate::error::{PathSegment, Result, TranscodeError};
use crate::policy::UnionPolicy;
use crate::value::{InputValue, OutputValue};

/// Convert `value` into the shape described by `descriptor`, resolving unions
/// with [`UnionPolicy::FIRST_MATCH`].
///
/// # Example
/// ```
/// use record_transcode::{transcode, Container, FieldDescriptor, OutputValue, TypeDescriptor};
///
/// let descriptor = TypeDescriptor::record(
///     "user",
///     vec![
///         FieldDescriptor::new("id", TypeDescriptor::Long),
///         FieldDescriptor::new("email", TypeDescriptor::nullable(TypeDescriptor::String)),
///     ],
/// );
/// let input = Container::new().with("id", 7i64).with("email", "a@b.c").with("extra", true);
///
/// let out = transcode(&descriptor, &input.into()).unwrap();
/// assert_eq!(
///     out,
///     OutputValue::Record(vec![
///         ("id".to_string(), OutputValue::Long(7)),
///         ("email".to_string(), OutputValue::String("a@b.c".to_string())),
///     ])
/// );
/// ```
pub fn transcode(descriptor: &TypeDescriptor, value: &InputValue) -> Result<OutputValue> {
    Transcoder::default().transcode(descriptor, value)
}

/// A transcoder bound to a union resolution policy. Cheap to copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Transcoder {
    policy: UnionPolicy,
}

impl Transcoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: UnionPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> UnionPolicy {
        self.policy
    }

    /// Convert `value` into the shape described by `descriptor`.
    pub fn transcode(&self, descriptor: &TypeDescriptor, value: &InputValue) -> Result<OutputValue> {
        match descriptor {
            TypeDescriptor::Null => Ok(OutputValue::Null),
            TypeDescriptor::String => value
                .stringify()
                .map(OutputValue::String)
                .ok_or_else(|| mismatch(TypeKind::String, value)),
            TypeDescriptor::Array { items } => self.convert_array(items, value),
            TypeDescriptor::Map { values } => self.convert_map(values, value),
            TypeDescriptor::Record { fields, .. } => match value {
                InputValue::Container(container) => self.transcode_fields(fields, container),
                other => Err(mismatch(TypeKind::Record, other)),
            },
            TypeDescriptor::Union { branches } => self.convert_union(branches, value),
            TypeDescriptor::Enum { .. } | TypeDescriptor::Fixed { .. } => {
                Err(TranscodeError::UnsupportedType {
                    kind: descriptor.kind().to_string(),
                })
            }
            scalar => pass_through(scalar, value),
        }
    }

    /// Project `fields` out of `source`, converting each value against its
    /// declared descriptor. The output lists fields in declaration order.
    ///
    /// A declared field missing from `source` fails with
    /// [`TranscodeError::FieldNotFound`]; there is no default substitution.
    pub fn transcode_fields<A>(&self, fields: &[FieldDescriptor], source: &A) -> Result<OutputValue>
    where
        A: FieldAccessor + ?Sized,
    {
        let mut out = Vec::with_capacity(fields.len());
        for field in fields {
            let value = source
                .get(&field.name)
                .ok_or_else(|| TranscodeError::FieldNotFound {
                    field: field.name.clone(),
                })?;
            let converted = self
                .transcode(&field.descriptor, value)
                .map_err(|e| e.at(PathSegment::Field(field.name.clone())))?;
            out.push((field.name.clone(), converted));
        }
        Ok(OutputValue::Record(out))
    }

    fn convert_array(&self, items: &TypeDescriptor, value: &InputValue) -> Result<OutputValue> {
        let InputValue::Sequence(elements) = value else {
            return Err(mismatch(TypeKind::Array, value));
        };
        elements
            .iter()
            .enumerate()
            .map(|(idx, element)| {
                self.transcode(items, element)
                    .map_err(|e| e.at(PathSegment::Index(idx)))
            })
            .collect::<Result<Vec<_>>>()
            .map(OutputValue::Array)
    }

    /// Keys are copied verbatim. A container is accepted as a map of its fields.
    fn convert_map(&self, values: &TypeDescriptor, value: &InputValue) -> Result<OutputValue> {
        let entries = match value {
            InputValue::Mapping(entries) => entries,
            InputValue::Container(container) => container.as_map(),
            other => return Err(mismatch(TypeKind::Map, other)),
        };
        entries
            .iter()
            .map(|(key, entry)| {
                let converted = self
                    .transcode(values, entry)
                    .map_err(|e| e.at(PathSegment::Key(key.clone())))?;
                Ok((key.clone(), converted))
            })
            .collect::<Result<BTreeMap<_, _>>>()
            .map(OutputValue::Map)
    }

    /// Resolve a union by trial conversion.
    ///
    /// 1. A null value resolves to null if any branch is `null`, wherever that
    ///    branch is declared.
    /// 2. Non-null branches are tried in declaration order. Under
    ///    `FIRST_MATCH` the first success wins; with `reject_ambiguous` every
    ///    branch is tried and a second success is an error.
    /// 3. If nothing matched, a nullable union resolves to null when
    ///    `null_fallback` is set. Otherwise resolution fails.
    ///
    /// Fatal errors (unsupported descriptor kinds) escape immediately instead
    /// of counting as a mismatch. With `reject_ambiguous`, so does ambiguity
    /// detected inside a branch.
    fn convert_union(&self, branches: &[TypeDescriptor], value: &InputValue) -> Result<OutputValue> {
        let nullable = branches
            .iter()
            .any(|branch| matches!(branch, TypeDescriptor::Null));
        if nullable && value.is_null() {
            return Ok(OutputValue::Null);
        }

        let mut resolved = None;
        let mut matched = Vec::new();
        for (idx, branch) in branches.iter().enumerate() {
            if matches!(branch, TypeDescriptor::Null) {
                continue;
            }
            match self.transcode(branch, value) {
                Ok(converted) => {
                    if !self.policy.reject_ambiguous {
                        return Ok(converted);
                    }
                    matched.push(idx);
                    if resolved.is_none() {
                        resolved = Some(converted);
                    }
                }
                Err(err) if self.escapes_trial(&err) => return Err(err),
                Err(err) => {
                    trace!(branch = %branch.kind(), error = %err, "union branch rejected value");
                }
            }
        }

        if let Some(converted) = resolved {
            if matched.len() > 1 {
                return Err(TranscodeError::AmbiguousUnion {
                    branches: branch_kinds(branches),
                    matched,
                });
            }
            return Ok(converted);
        }

        if nullable && self.policy.null_fallback {
            debug!(
                shape = %value.shape(),
                "no union branch accepted the value; resolving to null"
            );
            return Ok(OutputValue::Null);
        }

        Err(TranscodeError::IndeterminateUnion {
            branches: branch_kinds(branches),
        })
    }

    fn escapes_trial(&self, err: &TranscodeError) -> bool {
        err.is_fatal()
            || (self.policy.reject_ambiguous
                && matches!(err.root_cause(), TranscodeError::AmbiguousUnion { .. }))
    }
}

fn pass_through(descriptor: &TypeDescriptor, value: &InputValue) -> Result<OutputValue> {
    match (descriptor, value) {
        (TypeDescriptor::Boolean, InputValue::Bool(b)) => Ok(OutputValue::Boolean(*b)),
        (TypeDescriptor::Int, InputValue::Int64(n)) => Ok(OutputValue::Int(*n)),
        (TypeDescriptor::Long, InputValue::Int64(n)) => Ok(OutputValue::Long(*n)),
        (TypeDescriptor::Float, InputValue::Float64(f)) => Ok(OutputValue::Float(*f)),
        (TypeDescriptor::Double, InputValue::Float64(f)) => Ok(OutputValue::Double(*f)),
        (TypeDescriptor::Bytes, InputValue::Bytes(bytes)) => Ok(OutputValue::Bytes(bytes.clone())),
        (descriptor, value) => Err(mismatch(descriptor.kind(), value)),
    }
}

fn mismatch(expected: TypeKind, value: &InputValue) -> TranscodeError {
    TranscodeError::TypeMismatch {
        expected,
        found: value.shape(),
    }
}

fn branch_kinds(branches: &[TypeDescriptor]) -> Vec<TypeKind> {
    branches.iter().map(TypeDescriptor::kind).collect()
}
