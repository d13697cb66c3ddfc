//! Definition linting - static checks the compiler does not enforce.
//!
//! | Code | Severity | Check |
//! |------|----------|-------|
//! | `E001` | error | `select_one` default is not one of its options |
//! | `E002` | error | definition file cannot be loaded |
//! | `E003` | error | definition does not compile |
//! | `W001` | warning | custom `server_managed` field is writable through create or update |
//! | `W002` | warning | foreign-key field declares no `resources` |
//! | `W003` | warning | required-on-create field also has a static default |

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::field::{FieldDefinition, FieldType};
use crate::loader::load_definition;
use crate::spec::{base_fields, SpecConfig};
use crate::types::{CREATE_MASK, UPDATE_MASK};

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A single diagnostic message from linting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: String,
    /// JSON Pointer to the offending field (e.g. "/fields/owner").
    pub path: String,
    pub message: String,
}

impl Diagnostic {
    fn error(code: &str, path: String, message: String) -> Self {
        Self {
            severity: Severity::Error,
            code: code.to_string(),
            path,
            message,
        }
    }

    fn warning(code: &str, path: String, message: String) -> Self {
        Self {
            severity: Severity::Warning,
            code: code.to_string(),
            path,
            message,
        }
    }
}

/// Result of linting a definition file.
#[derive(Debug, Clone, Serialize)]
pub struct FileResult {
    pub file: PathBuf,
    pub status: FileStatus,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

/// Status of a linted file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Ok,
    Error,
    Warning,
}

/// Lint a definition.
///
/// Only caller-declared fields are inspected; base fields are known good.
pub fn lint(config: &SpecConfig) -> Vec<Diagnostic> {
    let base = base_fields(config.kind, &config.id_prefix);
    let mut diagnostics = Vec::new();

    for (name, field) in config.fields.iter() {
        if base.contains(name) {
            continue;
        }
        let path = format!("/fields/{}", crate::validator::escape_pointer(name));
        check_field(name, field, &path, config, &mut diagnostics);
    }

    diagnostics
}

/// Lint a definition file: load it, lint it, and try to compile it.
pub fn lint_file(file: &Path) -> FileResult {
    let config = match load_definition(file) {
        Ok(c) => c,
        Err(e) => {
            return FileResult {
                file: file.to_path_buf(),
                status: FileStatus::Error,
                diagnostics: vec![Diagnostic::error(
                    "E002",
                    "/".to_string(),
                    format!("cannot load definition: {}", e),
                )],
            };
        }
    };

    let mut diagnostics = lint(&config);
    if let Err(e) = config.compile() {
        diagnostics.push(Diagnostic::error("E003", "/".to_string(), e.to_string()));
    }

    let has_errors = diagnostics.iter().any(|d| d.severity == Severity::Error);
    let has_warnings = diagnostics.iter().any(|d| d.severity == Severity::Warning);

    let status = if has_errors {
        FileStatus::Error
    } else if has_warnings {
        FileStatus::Warning
    } else {
        FileStatus::Ok
    };

    FileResult {
        file: file.to_path_buf(),
        status,
        diagnostics,
    }
}

fn check_field(
    name: &str,
    field: &FieldDefinition,
    path: &str,
    config: &SpecConfig,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let masked = CREATE_MASK.contains(&name) || UPDATE_MASK.contains(&name);
    if field.meta.server_managed && !masked {
        diagnostics.push(Diagnostic::warning(
            "W001",
            path.to_string(),
            format!("server-managed field `{}` is not masked from client input", name),
        ));
    }

    let is_reference = matches!(
        field.meta.field_type,
        Some(FieldType::ForeignKey | FieldType::ForeignKeys)
    ) || field.has_test("is_document_id")
        || field.inner.as_ref().is_some_and(|i| i.has_test("is_document_id"));
    if is_reference && field.meta.resources.is_empty() && !field.meta.primary_key {
        diagnostics.push(Diagnostic::warning(
            "W002",
            path.to_string(),
            format!("reference field `{}` declares no resources", name),
        ));
    }

    if field.meta.field_type == Some(FieldType::SelectOne) {
        if let Some(default) = field.static_default() {
            if !default.is_null() && !field.one_of.contains(default) {
                diagnostics.push(Diagnostic::error(
                    "E001",
                    format!("{}/default", path),
                    format!("default {} of `{}` is not one of its options", default, name),
                ));
            }
        }
    }

    let required = config.required_on_create.iter().any(|r| r == name);
    if required && field.static_default().is_some() {
        diagnostics.push(Diagnostic::warning(
            "W003",
            path.to_string(),
            format!("`{}` is required on create but has a default", name),
        ));
    }
}
