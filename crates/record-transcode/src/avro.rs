//! Import of Avro schemas as target descriptors.
//!
//! Schema text is parsed and resolved by `apache-avro`; this module only maps
//! the resolved tree onto [`TypeDescriptor`]. Logical types fold onto their
//! physical type. A named type reused elsewhere in the schema is inlined at
//! every use. A reference back into a record that is still being expanded is
//! rejected: descriptors are finite trees and recursive types are not
//! supported.

use std::collections::HashMap;

use apache_avro::schema::{Name, SchemaKind};
use apache_avro::Schema;

use crate::descriptor::{FieldDescriptor, TypeDescriptor};
use crate::error::{Result, TranscodeError};

/// Parse Avro schema JSON and map it to a descriptor.
pub fn descriptor_from_avro_str(schema: &str) -> Result<TypeDescriptor> {
    let schema = Schema::parse_str(schema)?;
    descriptor_from_avro(&schema)
}

/// Map a resolved Avro schema to a descriptor.
pub fn descriptor_from_avro(schema: &Schema) -> Result<TypeDescriptor> {
    let mut names = HashMap::new();
    collect_named(schema, &mut names);
    Importer {
        names,
        expanding: Vec::new(),
    }
    .import(schema)
}

/// Register every named type (record, enum, fixed) declared in `schema`.
fn collect_named<'s>(schema: &'s Schema, names: &mut HashMap<Name, &'s Schema>) {
    match schema {
        Schema::Record(record) => {
            names.insert(record.name.clone(), schema);
            for field in &record.fields {
                collect_named(&field.schema, names);
            }
        }
        Schema::Enum(enum_schema) => {
            names.insert(enum_schema.name.clone(), schema);
        }
        Schema::Fixed(fixed) => {
            names.insert(fixed.name.clone(), schema);
        }
        Schema::Array(array) => collect_named(&array.items, names),
        Schema::Map(map) => collect_named(&map.types, names),
        Schema::Union(union) => {
            for variant in union.variants() {
                collect_named(variant, names);
            }
        }
        _ => {}
    }
}

struct Importer<'s> {
    names: HashMap<Name, &'s Schema>,
    /// Records whose fields are currently being imported, outermost first.
    expanding: Vec<Name>,
}

impl<'s> Importer<'s> {
    fn import(&mut self, schema: &'s Schema) -> Result<TypeDescriptor> {
        let descriptor = match schema {
            Schema::Null => TypeDescriptor::Null,
            Schema::Boolean => TypeDescriptor::Boolean,
            Schema::Int | Schema::Date | Schema::TimeMillis => TypeDescriptor::Int,
            Schema::Long
            | Schema::TimeMicros
            | Schema::TimestampMillis
            | Schema::TimestampMicros
            | Schema::TimestampNanos
            | Schema::LocalTimestampMillis
            | Schema::LocalTimestampMicros
            | Schema::LocalTimestampNanos => TypeDescriptor::Long,
            Schema::Float => TypeDescriptor::Float,
            Schema::Double => TypeDescriptor::Double,
            Schema::Bytes => TypeDescriptor::Bytes,
            Schema::String | Schema::Uuid => TypeDescriptor::String,
            Schema::Array(array) => TypeDescriptor::array(self.import(&array.items)?),
            Schema::Map(map) => TypeDescriptor::map(self.import(&map.types)?),
            Schema::Union(union) => TypeDescriptor::union(
                union
                    .variants()
                    .iter()
                    .map(|variant| self.import(variant))
                    .collect::<Result<Vec<_>>>()?,
            ),
            Schema::Record(record) => {
                self.expanding.push(record.name.clone());
                let fields = record
                    .fields
                    .iter()
                    .map(|field| {
                        Ok(FieldDescriptor::new(
                            field.name.clone(),
                            self.import(&field.schema)?,
                        ))
                    })
                    .collect::<Result<Vec<_>>>();
                self.expanding.pop();
                TypeDescriptor::record(record.name.name.clone(), fields?)
            }
            Schema::Enum(enum_schema) => TypeDescriptor::Enum {
                name: enum_schema.name.name.clone(),
                symbols: enum_schema.symbols.clone(),
            },
            Schema::Fixed(fixed) => TypeDescriptor::Fixed {
                name: fixed.name.name.clone(),
                size: fixed.size,
            },
            Schema::Ref { name } => {
                if self.expanding.contains(name) {
                    return Err(TranscodeError::UnsupportedType {
                        kind: format!("recursive reference to {}", name.name),
                    });
                }
                let target = self.names.get(name).copied().ok_or_else(|| {
                    TranscodeError::InvalidDescriptor(format!(
                        "unknown named type '{}'",
                        name.name
                    ))
                })?;
                return self.import(target);
            }
            other => {
                return Err(TranscodeError::UnsupportedType {
                    kind: format!("{:?}", SchemaKind::from(other)).to_lowercase(),
                })
            }
        };
        Ok(descriptor)
    }
}
