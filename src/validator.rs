//! Payload validation against generated schemas.
//!
//! Structure (types, literals, presence) is checked by the `jsonschema`
//! crate against the JSON Schema an [`ObjectSchema`](crate::ObjectSchema)
//! renders. Named predicate tests, which JSON Schema cannot express, are
//! then run over the same payload. Every failure from both passes is
//! collected before returning.

use jsonschema::error::ValidationErrorKind;
use serde_json::{Map, Value};

use crate::error::{SchemaError, ValidateError};
use crate::field::{FieldDefinition, FieldMap};

/// Validate a payload against a JSON Schema and a field map's named tests.
///
/// # Errors
///
/// Returns `ValidateError::Schema` if the schema does not compile, or
/// `ValidateError::Invalid` with every violation found.
pub fn validate(schema: &Value, fields: &FieldMap, payload: &Value) -> Result<(), ValidateError> {
    let mut errors = structural_errors(schema, payload)?;
    if let Value::Object(record) = payload {
        check_field_tests(fields, record, "", &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidateError::Invalid { errors })
    }
}

/// Validate a payload against a JSON Schema only.
///
/// # Errors
///
/// Returns `ValidateError::Schema` if the schema does not compile, or
/// `ValidateError::Invalid` if the payload doesn't match.
pub fn validate_against_schema(schema: &Value, payload: &Value) -> Result<(), ValidateError> {
    let errors = structural_errors(schema, payload)?;
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidateError::Invalid { errors })
    }
}

fn structural_errors(schema: &Value, payload: &Value) -> Result<Vec<SchemaError>, ValidateError> {
    let validator = jsonschema::validator_for(schema).map_err(|e| ValidateError::Schema {
        message: e.to_string(),
    })?;

    let errors = validator
        .iter_errors(payload)
        .map(|e| {
            let mut path = e.instance_path.to_string();
            // Point missing-property errors at the property, not its parent.
            if let ValidationErrorKind::Required { property } = &e.kind {
                if let Some(name) = property.as_str() {
                    path = format!("{}/{}", path, escape_pointer(name));
                }
            }
            SchemaError {
                path,
                message: e.to_string(),
            }
        })
        .collect();
    Ok(errors)
}

/// Run named predicate tests for every present field, recursing into
/// array elements and nested objects.
pub fn check_field_tests(
    fields: &FieldMap,
    record: &Map<String, Value>,
    path: &str,
    errors: &mut Vec<SchemaError>,
) {
    for (name, field) in fields.iter() {
        let Some(value) = record.get(name) else {
            continue;
        };
        let field_path = format!("{}/{}", path, escape_pointer(name));
        check_value(field, value, &field_path, errors);
    }
}

fn check_value(field: &FieldDefinition, value: &Value, path: &str, errors: &mut Vec<SchemaError>) {
    // Type mismatches and nulls are reported by the structural pass.
    if value.is_null() || !field.primitive.accepts(value) {
        return;
    }

    let label = display_path(path);
    for test in field.tests.iter().filter(|t| !t.is_presence()) {
        if !test.check(value) {
            errors.push(SchemaError {
                path: path.to_string(),
                message: test.message(&label, value),
            });
        }
    }

    match value {
        Value::Array(items) => {
            if let Some(inner) = &field.inner {
                for (i, item) in items.iter().enumerate() {
                    check_value(inner, item, &format!("{}/{}", path, i), errors);
                }
            }
        }
        Value::Object(nested) => {
            if let Some(props) = &field.properties {
                check_field_tests(props, nested, path, errors);
            }
        }
        _ => {}
    }
}

/// Escape a key for use as a JSON Pointer segment (RFC 6901).
pub fn escape_pointer(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

/// `/address/line1` -> `address.line1`
fn display_path(pointer: &str) -> String {
    pointer.trim_start_matches('/').replace('/', ".")
}
