//! Entity Schema
//!
//! Compile entity field definitions into validated, immutable schema bundles.
//!
//! A caller declares an entity's fields once. Compilation merges them over a
//! fixed base field set (`_id`, `_object`, audit timestamps, lifecycle flags,
//! `name`, `category`, `description`) and derives:
//!
//! - the full entity schema and its default record
//! - a create-parameter schema (server-managed fields masked out, required
//!   fields enforced)
//! - an update-parameter schema (identity fields masked out, everything optional)
//! - REST naming (endpoint, collection id) from the entity's type name
//! - merge operators that never write a value the caller did not supply
//!
//! # Example
//!
//! ```
//! use entity_schema::{fields, EntityKind, FieldDefinition, Params, SpecConfig};
//! use serde_json::json;
//!
//! let spec = SpecConfig::new(EntityKind::Resource, "wdgt")
//!     .field("_object", fields::constant("widgetPart"))
//!     .field("color", FieldDefinition::string().default_value("blue"))
//!     .required_on_create(["name"])
//!     .compile()
//!     .unwrap();
//!
//! assert_eq!(spec.endpoint(), "widget-parts");
//!
//! let record = spec.merge_create_params(
//!     Params::new().set("name", "Sprocket").absent("color"),
//! );
//! assert_eq!(record["name"], "Sprocket");
//! assert_eq!(record["color"], "blue");
//!
//! // Identity fields are masked from updates.
//! let updated = spec.merge_update_params(&record, Params::new().set("_id", "other"));
//! assert_eq!(updated["_id"], record["_id"]);
//!
//! // `name` must be supplied on create.
//! assert!(spec.validate_create(&json!({ "color": "red" })).is_err());
//! ```
//!
//! # Projections
//!
//! | Projection | Masked fields | Presence |
//! |------------|---------------|----------|
//! | create | `_archived`, `_date_created`, `_date_last_modified`, `_deleted`, `_object` | required-on-create fields must be present |
//! | update | `_object`, `_id`, `_date_created` | every field optional |

mod enumeration;
mod error;
mod field;
pub mod fields;
pub mod formats;
pub mod id;
mod linter;
mod loader;
mod merge;
mod presence;
mod projection;
mod schema;
mod spec;
mod types;
mod validator;

pub use enumeration::{sentence_case, EnumHandle};
pub use error::{ConfigError, IdError, LoadError, SchemaError, ValidateError};
pub use field::{
    DefaultValue, FieldDefinition, FieldMap, FieldMeta, FieldSpec, FieldTest, FieldType,
    LocalizedText, Primitive,
};
pub use linter::{lint, lint_file, Diagnostic, FileResult, FileStatus, Severity};
pub use loader::{load_definition, load_definition_str, load_spec, load_spec_str};
pub use merge::{FieldInput, Params};
pub use presence::{classify, is_defined, is_required, Presence};
pub use projection::{get_visibility, project};
pub use schema::ObjectSchema;
pub use spec::{base_fields, compile, SchemaSpec, SpecConfig};
pub use types::{
    EntityKind, Operation, Record, Visibility, CREATE_MASK, DEFAULT_DATABASE_ID, UPDATE_MASK,
};
pub use validator::{validate, validate_against_schema};
