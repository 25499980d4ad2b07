//! Read-only field projection over named-field containers.

use std::collections::BTreeMap;

use crate::value::{Container, InputValue};

/// Fetches the stored value of a named field.
///
/// Implementations must be side-effect free. A field present with a null
/// value returns `Some(&InputValue::Null)`; `None` means the field does not
/// exist.
pub trait FieldAccessor {
    fn get(&self, field: &str) -> Option<&InputValue>;
}

impl FieldAccessor for Container {
    fn get(&self, field: &str) -> Option<&InputValue> {
        self.as_map().get(field)
    }
}

impl FieldAccessor for BTreeMap<String, InputValue> {
    fn get(&self, field: &str) -> Option<&InputValue> {
        BTreeMap::get(self, field)
    }
}

impl<A: FieldAccessor + ?Sized> FieldAccessor for &A {
    fn get(&self, field: &str) -> Option<&InputValue> {
        (**self).get(field)
    }
}
