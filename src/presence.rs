//! Field presence classification.

use crate::field::FieldDefinition;
use crate::types::Operation;

/// How strictly a field must be present in a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Presence {
    /// Present, non-null and, for strings, non-empty.
    Required,
    /// Present; null only when the field is nullable.
    Defined,
    /// Unconstrained.
    Optional,
}

/// True if the field carries a `required` test, or if `operation` is create
/// and the field is tagged `required_on_create`.
pub fn is_required(field: &FieldDefinition, operation: Operation) -> bool {
    if operation == Operation::Create && field.meta.required_on_create {
        return true;
    }
    field.has_test("required")
}

/// True if the field carries a `defined` test. `required_on_create` does not
/// apply here.
pub fn is_defined(field: &FieldDefinition, _operation: Operation) -> bool {
    field.has_test("defined")
}

/// Classify a field, using only its declared tests when no operation applies.
pub fn classify(field: &FieldDefinition, operation: Option<Operation>) -> Presence {
    let (required, defined) = match operation {
        Some(op) => (is_required(field, op), is_defined(field, op)),
        None => (field.has_test("required"), field.has_test("defined")),
    };
    if required {
        Presence::Required
    } else if defined {
        Presence::Defined
    } else {
        Presence::Optional
    }
}
