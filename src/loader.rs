//! Entity definition loading from files and strings.
//!
//! A definition document looks like:
//!
//! ```json
//! {
//!   "kind": "resource",
//!   "id_prefix": "wdgt",
//!   "plural": "widgets",
//!   "required_on_create": ["name"],
//!   "fields": {
//!     "_object": { "type": "string", "default": { "kind": "static", "value": "widget" } },
//!     "color": { "type": "string", "default": { "kind": "static", "value": "blue" } }
//!   }
//! }
//! ```

use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::LoadError;
use crate::field::{FieldDefinition, FieldMap};
use crate::spec::{SchemaSpec, SpecConfig};

/// Load a definition from a file path.
///
/// # Errors
///
/// Returns `LoadError::FileNotFound` if the file doesn't exist,
/// `LoadError::InvalidJson` if it isn't valid JSON, or a definition error.
pub fn load_definition(path: &Path) -> Result<SpecConfig, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| LoadError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), bytes = content.len(), "loading entity definition");
    load_definition_str(&content)
}

/// Load a definition from a JSON string.
///
/// # Errors
///
/// Returns `LoadError::InvalidJson` if the string isn't valid JSON,
/// `LoadError::InvalidField` naming the first malformed field, or
/// `LoadError::InvalidDefinition` for any other shape error.
pub fn load_definition_str(content: &str) -> Result<SpecConfig, LoadError> {
    let mut document: Value =
        serde_json::from_str(content).map_err(|source| LoadError::InvalidJson { source })?;

    // Fields are parsed one at a time so errors can name the field.
    let fields = match document.as_object_mut().and_then(|o| o.remove("fields")) {
        Some(Value::Object(raw)) => parse_fields(raw)?,
        Some(_) => {
            return Err(LoadError::InvalidDefinition {
                source: serde::de::Error::custom("`fields` must be an object"),
            });
        }
        None => FieldMap::new(),
    };

    let mut config: SpecConfig = serde_json::from_value(document)
        .map_err(|source| LoadError::InvalidDefinition { source })?;
    config.fields = fields;

    debug!(
        id_prefix = %config.id_prefix,
        fields = config.fields.len(),
        "parsed entity definition"
    );
    Ok(config)
}

/// Load and compile a definition file.
///
/// # Errors
///
/// Returns any load error, or `LoadError::Config` if compilation fails.
pub fn load_spec(path: &Path) -> Result<SchemaSpec, LoadError> {
    Ok(load_definition(path)?.compile()?)
}

/// Parse and compile a definition string.
///
/// # Errors
///
/// Returns any load error, or `LoadError::Config` if compilation fails.
pub fn load_spec_str(content: &str) -> Result<SchemaSpec, LoadError> {
    Ok(load_definition_str(content)?.compile()?)
}

fn parse_fields(raw: serde_json::Map<String, Value>) -> Result<FieldMap, LoadError> {
    raw.into_iter()
        .map(|(name, value)| {
            serde_json::from_value::<FieldDefinition>(value)
                .map(|field| (name.clone(), field))
                .map_err(|source| LoadError::InvalidField {
                    field: name,
                    source,
                })
        })
        .collect()
}
