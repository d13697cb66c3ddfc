//! Error types for schema compilation, identifiers, loading and validation.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal configuration errors raised while compiling a schema spec.
///
/// These describe a broken entity definition, never bad user input, and
/// must not be swallowed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("field `_object` has no default: entity type discriminant is missing")]
    MissingTypeDiscriminant,

    #[error("field `_object` default must be a non-empty string, got {actual}")]
    InvalidTypeDiscriminant { actual: String },

    #[error("{mask} mask references unknown field `{field}`")]
    UnknownMaskField { mask: &'static str, field: String },

    #[error("required-on-create field `{field}` is not declared")]
    UnknownRequiredField { field: String },

    #[error("enum default \"{value}\" is not a member")]
    UnknownEnumDefault { value: String },

    #[error("cannot build enum pattern: {message}")]
    InvalidEnumPattern { message: String },

    #[error("id prefix must not be empty")]
    EmptyIdPrefix,
}

/// Errors from document identifier compression and checked parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("invalid document id \"{value}\": {reason}")]
    InvalidIdentifier { value: String, reason: String },
}

/// Errors while loading entity definitions.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid definition: {source}")]
    InvalidDefinition {
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid field `{field}`: {source}")]
    InvalidField {
        field: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors during payload validation.
#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("generated schema rejected by validator: {message}")]
    Schema { message: String },

    #[error("validation failed with {} error(s)", errors.len())]
    Invalid { errors: Vec<SchemaError> },
}

impl ValidateError {
    /// Returns the collected field errors, empty for schema failures.
    pub fn errors(&self) -> &[SchemaError] {
        match self {
            ValidateError::Invalid { errors } => errors,
            ValidateError::Schema { .. } => &[],
        }
    }
}

/// Single validation error with path context.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SchemaError {
    /// JSON Pointer (RFC 6901) to the invalid field.
    pub path: String,
    /// Human-readable error message.
    pub message: String,
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}
