//! Core types shared by the schema compiler and merge operators.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A persisted entity record: a flat, ordered JSON object.
pub type Record = Map<String, Value>;

/// Fields removed from the create-parameter projection.
pub const CREATE_MASK: &[&str] = &[
    "_archived",
    "_date_created",
    "_date_last_modified",
    "_deleted",
    "_object",
];

/// Fields removed from the update-parameter projection.
pub const UPDATE_MASK: &[&str] = &["_object", "_id", "_date_created"];

/// Default database partition identifier.
pub const DEFAULT_DATABASE_ID: &str = "(default)";

/// Returns the JSON type name for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Write operation a projection is derived for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
}

impl Operation {
    /// Returns the field mask for this operation.
    pub fn mask(&self) -> &'static [&'static str] {
        match self {
            Operation::Create => CREATE_MASK,
            Operation::Update => UPDATE_MASK,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Update => "update",
        }
    }
}

/// Flavor of entity being compiled.
///
/// Both kinds share the same masks. They differ in who `_created_by` points
/// at and in whether creation stamps timestamps explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    #[default]
    Object,
    Resource,
}

impl EntityKind {
    /// Identifier prefix accepted by `_created_by`.
    pub fn creator_prefix(&self) -> &'static str {
        match self {
            EntityKind::Object => "acct",
            EntityKind::Resource => "usr",
        }
    }

    /// Collection `_created_by` references.
    pub fn creator_resource(&self) -> &'static str {
        match self {
            EntityKind::Object => "user_account",
            EntityKind::Resource => "user",
        }
    }

    /// Whether `merge_create_params` stamps `_date_created` and
    /// `_date_last_modified` itself instead of relying on defaults.
    pub fn stamps_timestamps(&self) -> bool {
        matches!(self, EntityKind::Resource)
    }
}

/// Visibility of a field in a derived projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    /// Keep the field with its declared presence tests.
    #[default]
    Include,
    /// Remove the field from the projection.
    Omit,
    /// Keep the field and make it mandatory.
    Required,
    /// Keep the field with all presence tests stripped.
    Optional,
}
