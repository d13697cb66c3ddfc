//! Projection: derive per-operation field maps from an entity field map.
//!
//! Each field gets a [`Visibility`] for an [`Operation`]:
//! - masked fields are `Omit`ted
//! - on create, fields that must be supplied are `Required`
//! - on update, every field is `Optional`
//! - everything else is `Include`d unchanged

use tracing::debug;

use crate::error::ConfigError;
use crate::field::{FieldDefinition, FieldMap};
use crate::presence::is_required;
use crate::types::{Operation, Visibility};

/// Visibility of a single field for an operation.
pub fn get_visibility(name: &str, field: &FieldDefinition, operation: Operation) -> Visibility {
    if operation.mask().contains(&name) {
        return Visibility::Omit;
    }
    match operation {
        Operation::Create if is_required(field, operation) => Visibility::Required,
        Operation::Create => Visibility::Include,
        Operation::Update => Visibility::Optional,
    }
}

/// Project a field map for an operation.
///
/// # Errors
///
/// Returns `ConfigError::UnknownMaskField` if the operation's mask names a
/// field the map does not declare.
pub fn project(fields: &FieldMap, operation: Operation) -> Result<FieldMap, ConfigError> {
    check_mask(operation, fields)?;

    let projected: FieldMap = fields
        .iter()
        .filter_map(|(name, field)| match get_visibility(name, field, operation) {
            Visibility::Omit => None,
            // Promoted fields must be present but keep their own null and
            // empty-string rules.
            Visibility::Required => Some((name, field.clone().required_on_create())),
            Visibility::Optional => Some((name, field.clone().optional())),
            Visibility::Include => Some((name, field.clone())),
        })
        .collect();

    debug!(
        operation = operation.as_str(),
        fields = projected.len(),
        omitted = fields.len() - projected.len(),
        "projected field map"
    );
    Ok(projected)
}

/// Every masked name must be a declared field.
pub fn check_mask(operation: Operation, fields: &FieldMap) -> Result<(), ConfigError> {
    match operation.mask().iter().find(|name| !fields.contains(name)) {
        Some(missing) => Err(ConfigError::UnknownMaskField {
            mask: operation.as_str(),
            field: (*missing).to_string(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presence::{classify, Presence};
    use crate::types::{CREATE_MASK, UPDATE_MASK};

    fn entity_fields() -> FieldMap {
        let mut fields: FieldMap = CREATE_MASK
            .iter()
            .chain(UPDATE_MASK)
            .map(|name| (*name, FieldDefinition::string().defined()))
            .collect();
        fields.insert("title", FieldDefinition::string().required_on_create());
        fields.insert("notes", FieldDefinition::string().default_value(""));
        fields
    }

    // === Visibility ===

    #[test]
    fn masked_fields_are_omitted() {
        let field = FieldDefinition::string();
        assert_eq!(get_visibility("_object", &field, Operation::Create), Visibility::Omit);
        assert_eq!(get_visibility("_object", &field, Operation::Update), Visibility::Omit);
        assert_eq!(get_visibility("_id", &field, Operation::Create), Visibility::Include);
        assert_eq!(get_visibility("_id", &field, Operation::Update), Visibility::Omit);
    }

    #[test]
    fn create_marks_required_fields() {
        let field = FieldDefinition::string().required_on_create();
        assert_eq!(get_visibility("title", &field, Operation::Create), Visibility::Required);
        assert_eq!(get_visibility("title", &field, Operation::Update), Visibility::Optional);
    }

    // === Projection ===

    #[test]
    fn create_projection_drops_create_mask() {
        let projected = project(&entity_fields(), Operation::Create).unwrap();
        for name in CREATE_MASK {
            assert!(!projected.contains(name), "{name} leaked into create");
        }
        assert!(projected.contains("_id"));
        assert_eq!(
            classify(projected.get("title").unwrap(), Some(Operation::Create)),
            Presence::Required
        );
        // The promoted field is rendered with `defined`, not `required`.
        let title = projected.get("title").unwrap();
        assert!(title.has_test("defined"));
        assert!(!title.has_test("required"));
        assert_eq!(classify(title, None), Presence::Defined);
    }

    #[test]
    fn update_projection_is_all_optional() {
        let projected = project(&entity_fields(), Operation::Update).unwrap();
        for name in UPDATE_MASK {
            assert!(!projected.contains(name), "{name} leaked into update");
        }
        assert!(projected.contains("_archived"));
        for (name, field) in projected.iter() {
            assert_eq!(
                classify(field, Some(Operation::Update)),
                Presence::Optional,
                "{name} kept a presence test"
            );
        }
    }

    #[test]
    fn projection_keeps_order_and_defaults() {
        let projected = project(&entity_fields(), Operation::Update).unwrap();
        let names: Vec<_> = projected.names().collect();
        assert_eq!(names.last(), Some(&"notes"));
        assert_eq!(
            projected.get("notes").unwrap().static_default(),
            Some(&serde_json::json!(""))
        );
    }

    #[test]
    fn unknown_mask_field_fails_fast() {
        let fields = FieldMap::new().with("name", FieldDefinition::string());
        let err = project(&fields, Operation::Create).unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownMaskField {
                mask: "create",
                field: "_archived".into(),
            }
        );
    }
}
