//! Object schemas: a field map rendered to JSON Schema and validated.

use std::collections::BTreeMap;

use serde_json::{json, Map, Value};

use crate::error::ValidateError;
use crate::field::{FieldDefinition, FieldMap, FieldSpec, Primitive};
use crate::presence::{classify, Presence};
use crate::types::{Operation, Record};
use crate::validator;

/// A compiled object schema over an ordered field map.
///
/// Presence is read from each field's declared tests. Fields promoted for
/// creation carry `defined`, so a create schema demands them without
/// rejecting empty strings or, on nullable fields, null.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectSchema {
    fields: FieldMap,
    operation: Option<Operation>,
}

impl ObjectSchema {
    pub fn new(fields: FieldMap) -> Self {
        Self {
            fields,
            operation: None,
        }
    }

    pub fn for_operation(fields: FieldMap, operation: Operation) -> Self {
        Self {
            fields,
            operation: Some(operation),
        }
    }

    /// The field map this schema was built from.
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    pub fn operation(&self) -> Option<Operation> {
        self.operation
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.names().collect()
    }

    pub fn presence(&self, name: &str) -> Option<Presence> {
        self.fields
            .get(name)
            .map(|field| classify(field, None))
    }

    /// Fields a payload must contain.
    pub fn required_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(_, field)| classify(field, None) != Presence::Optional)
            .map(|(name, _)| name)
            .collect()
    }

    /// Every field's default, freshly materialised. Fields without a default
    /// are absent from the record.
    pub fn default_record(&self) -> Record {
        self.fields.default_record()
    }

    /// Render as a standard JSON Schema document.
    pub fn json_schema(&self) -> Value {
        object_json_schema(&self.fields)
    }

    /// Validate a payload, collecting every violation.
    ///
    /// # Errors
    ///
    /// Returns `ValidateError::Invalid` with one `SchemaError` per failure.
    pub fn validate(&self, payload: &Value) -> Result<(), ValidateError> {
        validator::validate(&self.json_schema(), &self.fields, payload)
    }

    /// Describe the requested fields, skipping keys this schema lacks.
    pub fn field_specs<S: AsRef<str>>(&self, keys: &[S]) -> BTreeMap<String, FieldSpec> {
        keys.iter()
            .filter_map(|key| {
                let key = key.as_ref();
                self.fields.get(key).map(|f| (key.to_string(), f.describe()))
            })
            .collect()
    }
}

fn object_json_schema(fields: &FieldMap) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for (name, field) in fields.iter() {
        let presence = classify(field, None);
        if presence != Presence::Optional {
            required.push(Value::String(name.to_string()));
        }
        properties.insert(name.to_string(), field_json_schema(field, presence));
    }

    let mut schema = Map::new();
    schema.insert("type".to_string(), json!("object"));
    schema.insert("properties".to_string(), Value::Object(properties));
    if !required.is_empty() {
        schema.insert("required".to_string(), Value::Array(required));
    }
    Value::Object(schema)
}

fn field_json_schema(field: &FieldDefinition, presence: Presence) -> Value {
    let mut schema = Map::new();
    let allow_null = field.nullable && presence != Presence::Required;

    if let Some(json_type) = field.primitive.json_type() {
        let type_value = if allow_null {
            json!([json_type, "null"])
        } else {
            json!(json_type)
        };
        schema.insert("type".to_string(), type_value);
    }

    if !field.one_of.is_empty() {
        let mut allowed = field.one_of.clone();
        if allow_null && !allowed.contains(&Value::Null) {
            allowed.push(Value::Null);
        }
        schema.insert("enum".to_string(), Value::Array(allowed));
    }

    let mut rejected = Vec::new();
    if presence == Presence::Required && field.primitive == Primitive::Mixed {
        rejected.push(json!({ "type": "null" }));
    }
    if !field.not_one_of.is_empty() {
        rejected.push(json!({ "enum": field.not_one_of }));
    }
    match rejected.len() {
        0 => {}
        1 => {
            schema.insert("not".to_string(), rejected.remove(0));
        }
        _ => {
            schema.insert("not".to_string(), json!({ "anyOf": rejected }));
        }
    }

    if presence == Presence::Required && field.primitive == Primitive::String {
        schema.insert("minLength".to_string(), json!(1));
    }

    if let Some(default) = field.static_default() {
        schema.insert("default".to_string(), default.clone());
    }

    if let Some(title) = field.meta.label.as_ref().and_then(|l| l.get("en")) {
        schema.insert("title".to_string(), json!(title));
    }

    if let Some(inner) = &field.inner {
        schema.insert(
            "items".to_string(),
            field_json_schema(inner, classify(inner, None)),
        );
    }

    if let Some(props) = &field.properties {
        if let Value::Object(nested) = object_json_schema(props) {
            schema.extend(nested.into_iter().filter(|(key, _)| key != "type"));
        }
    }

    Value::Object(schema)
}
