//! Ready-made field definitions for common logical types.
//!
//! Text-like helpers default to `""` and accept the empty string in their
//! format test, so an unset field still validates.

use serde_json::{json, Value};

use crate::field::{FieldDefinition, FieldTest, FieldType};

pub fn boolean_default_false() -> FieldDefinition {
    FieldDefinition::boolean()
        .default_value(false)
        .field_type(FieldType::Boolean)
}

pub fn boolean_default_true() -> FieldDefinition {
    FieldDefinition::boolean()
        .default_value(true)
        .field_type(FieldType::Boolean)
}

/// Nullable boolean defaulting to `null`.
pub fn boolean_default_unset() -> FieldDefinition {
    FieldDefinition::boolean()
        .nullable()
        .default_value(Value::Null)
        .field_type(FieldType::Boolean)
}

/// A field that only ever holds `value` and cannot be updated.
pub fn constant(value: impl Into<Value>) -> FieldDefinition {
    let value = value.into();
    let field_type = match value {
        Value::String(_) => FieldType::ShortText,
        Value::Number(_) => FieldType::FloatingPointNumber,
        _ => FieldType::Boolean,
    };
    FieldDefinition::mixed()
        .one_of([value.clone()])
        .default_value(value)
        .can_update(false)
        .field_type(field_type)
}

pub fn date() -> FieldDefinition {
    FieldDefinition::string()
        .test(FieldTest::IsDate { allow_empty: true })
        .default_value("")
        .field_type(FieldType::Date)
}

pub fn domain() -> FieldDefinition {
    FieldDefinition::string()
        .test(FieldTest::IsDomain { allow_empty: true })
        .default_value("")
        .field_type(FieldType::Domain)
}

pub fn email_address() -> FieldDefinition {
    FieldDefinition::string()
        .test(FieldTest::IsEmailAddress { allow_empty: true })
        .default_value("")
        .field_type(FieldType::EmailAddress)
}

pub fn file_path() -> FieldDefinition {
    FieldDefinition::string()
        .test(FieldTest::IsFilePath { allow_empty: true })
        .default_value("")
        .field_type(FieldType::File)
}

pub fn floating_point_number() -> FieldDefinition {
    FieldDefinition::number()
        .default_value(0)
        .field_type(FieldType::FloatingPointNumber)
}

pub fn integer() -> FieldDefinition {
    FieldDefinition::number()
        .test(FieldTest::IsInteger)
        .default_value(0)
        .field_type(FieldType::Integer)
}

/// Timestamp defaulting to the moment defaults are materialised.
pub fn now() -> FieldDefinition {
    FieldDefinition::string()
        .test(FieldTest::IsDate { allow_empty: false })
        .default_now()
        .field_type(FieldType::Date)
}

pub fn percentage() -> FieldDefinition {
    FieldDefinition::number()
        .default_value(0)
        .field_type(FieldType::Percentage)
}

pub fn short_text() -> FieldDefinition {
    FieldDefinition::string()
        .default_value("")
        .field_type(FieldType::ShortText)
}

pub fn long_text() -> FieldDefinition {
    FieldDefinition::string()
        .default_value("")
        .field_type(FieldType::LongText)
}

pub fn url() -> FieldDefinition {
    FieldDefinition::string()
        .test(FieldTest::IsUrl { allow_empty: true })
        .default_value("")
        .field_type(FieldType::Url)
}

pub fn usd() -> FieldDefinition {
    FieldDefinition::number()
        .default_value(0)
        .field_type(FieldType::Usd)
}

/// Array of `inner`, defaulting to empty.
pub fn list(inner: FieldDefinition) -> FieldDefinition {
    FieldDefinition::array(inner)
        .default_value(json!([]))
        .field_type(FieldType::List)
}

/// Primary key with a freshly generated default.
pub fn id(prefix: &str) -> FieldDefinition {
    FieldDefinition::string()
        .default_id(prefix)
        .test(FieldTest::IsDocumentId {
            prefixes: vec![prefix.to_string()],
            allow_empty: false,
        })
        .label("Unique ID")
        .can_update(false)
        .primary_key()
        .field_type(FieldType::Id)
}

/// Optional reference to a document in one of `resources`.
pub fn id_ref<S: AsRef<str>>(prefixes: &[S], resources: &[S]) -> FieldDefinition {
    FieldDefinition::string()
        .default_value("")
        .test(document_id(prefixes, true))
        .resources(resources.iter().map(|r| r.as_ref().to_string()))
        .field_type(FieldType::ForeignKey)
}

/// List of references to documents in `resources`.
pub fn id_refs<S: AsRef<str>>(prefixes: &[S], resources: &[S]) -> FieldDefinition {
    FieldDefinition::array(FieldDefinition::string().defined().test(document_id(prefixes, false)))
        .default_value(json!([]))
        .defined()
        .resources(resources.iter().map(|r| r.as_ref().to_string()))
        .field_type(FieldType::ForeignKeys)
}

fn document_id<S: AsRef<str>>(prefixes: &[S], allow_empty: bool) -> FieldTest {
    FieldTest::IsDocumentId {
        prefixes: prefixes.iter().map(|p| p.as_ref().to_string()).collect(),
        allow_empty,
    }
}
