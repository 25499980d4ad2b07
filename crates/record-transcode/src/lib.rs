//! # record-transcode
//!
//! Schema-directed transcoder from self-describing upstream records to values
//! shaped for an Avro-typed sink.
//!
//! The two type systems overlap but differ: the target spells optionality as a
//! union with a `null` branch, and its unions carry no discriminant, so the
//! branch a value belongs to is found by trial conversion at runtime.
//!
//! ## Quick start
//!
//! ```rust
//! use record_transcode::{descriptor_from_avro_str, input_from_json_str, transcode};
//!
//! let descriptor = descriptor_from_avro_str(
//!     r#"{"type":"record","name":"user","fields":[
//!         {"name":"id","type":"long"},
//!         {"name":"email","type":["null","string"]}
//!     ]}"#,
//! )
//! .unwrap();
//! let record = input_from_json_str(r#"{"id":7,"email":null,"ignored":true}"#).unwrap();
//!
//! let out = transcode(&descriptor, &record).unwrap();
//! assert_eq!(out.to_json().to_string(), r#"{"id":7,"email":null}"#);
//! ```
//!
//! ## Modules
//!
//! - [`descriptor`] — `TypeDescriptor` tree of the target type system
//! - [`value`] — `InputValue` (upstream shapes) and `OutputValue` (target shapes)
//! - [`accessor`] — `FieldAccessor`, read-only field projection
//! - [`policy`] — `UnionPolicy`, how unions pick a branch
//! - [`transcoder`] — the recursive conversion
//! - [`json`] — JSON in and out at the pipeline boundary
//! - [`avro`] — descriptors from Avro schemas
//! - [`error`] — `TranscodeError` and failure paths

pub mod accessor;
pub mod avro;
pub mod descriptor;
pub mod error;
pub mod json;
pub mod policy;
pub mod transcoder;
pub mod value;

pub use accessor::FieldAccessor;
pub use avro::{descriptor_from_avro, descriptor_from_avro_str};
pub use descriptor::{FieldDescriptor, TypeDescriptor, TypeKind};
pub use error::{Path, PathSegment, TranscodeError};
pub use json::{input_from_json, input_from_json_str};
pub use policy::UnionPolicy;
pub use transcoder::{transcode, Transcoder};
pub use value::{Container, InputValue, OutputValue, Shape};
