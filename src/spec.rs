//! Schema spec compilation.
//!
//! A [`SpecConfig`] names an entity's fields, the fields callers must supply
//! on create, and its identifier prefix. Compiling it merges the fields over
//! the base field set every entity carries and derives an immutable
//! [`SchemaSpec`] bundle: entity, create, create-required and update
//! schemas, their defaults, field-name enums, REST naming, and the merge
//! operators.

use std::collections::BTreeMap;

use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::enumeration::EnumHandle;
use crate::error::{ConfigError, ValidateError};
use crate::field::{DefaultValue, FieldDefinition, FieldMap, FieldTest, FieldType};
use crate::fields;
use crate::id;
use crate::merge::{self, Params};
use crate::projection::project;
use crate::schema::ObjectSchema;
use crate::types::{json_type_name, EntityKind, Operation, Record, DEFAULT_DATABASE_ID};

/// Inputs for compiling one entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecConfig {
    #[serde(default)]
    pub kind: EntityKind,
    pub id_prefix: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plural: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_id: Option<String>,
    #[serde(default)]
    pub required_on_create: Vec<String>,
    #[serde(default)]
    pub fields: FieldMap,
}

impl SpecConfig {
    pub fn new(kind: EntityKind, id_prefix: impl Into<String>) -> Self {
        Self {
            kind,
            id_prefix: id_prefix.into(),
            ..Self::default()
        }
    }

    /// Declare a field, replacing a base field of the same name.
    pub fn field(mut self, name: impl Into<String>, field: FieldDefinition) -> Self {
        self.fields.insert(name, field);
        self
    }

    pub fn fields<K, I>(mut self, fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, FieldDefinition)>,
    {
        for (name, field) in fields {
            self.fields.insert(name, field);
        }
        self
    }

    pub fn required_on_create<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_on_create.extend(names.into_iter().map(Into::into));
        self
    }

    /// Override the plural used for the endpoint and collection id.
    pub fn plural(mut self, plural: impl Into<String>) -> Self {
        self.plural = Some(plural.into());
        self
    }

    pub fn database_id(mut self, database_id: impl Into<String>) -> Self {
        self.database_id = Some(database_id.into());
        self
    }

    /// Base fields overlaid with the declared fields, before promotion.
    pub fn merged_fields(&self) -> FieldMap {
        let mut merged = base_fields(self.kind, &self.id_prefix);
        for (name, field) in self.fields.iter() {
            merged.insert(name, field.clone());
        }
        merged
    }

    /// # Errors
    ///
    /// See [`compile`].
    pub fn compile(&self) -> Result<SchemaSpec, ConfigError> {
        compile(self)
    }
}

/// The fields every entity carries.
///
/// `_object` has no default: each entity redeclares it with its type name.
pub fn base_fields(kind: EntityKind, id_prefix: &str) -> FieldMap {
    FieldMap::new()
        .with("_archived", fields::boolean_default_false())
        .with(
            "_created_by",
            FieldDefinition::string()
                .default_value("")
                .test(FieldTest::IsDocumentId {
                    prefixes: vec![kind.creator_prefix().to_string()],
                    allow_empty: true,
                })
                .can_update(false)
                .server_managed()
                .resources([kind.creator_resource()])
                .field_type(FieldType::ForeignKey),
        )
        .with(
            "_date_created",
            fields::now().can_update(false).server_managed(),
        )
        .with("_date_last_modified", fields::now().server_managed())
        .with("_deleted", fields::boolean_default_false())
        .with("_id", fields::id(id_prefix).defined())
        .with(
            "_object",
            FieldDefinition::string()
                .defined()
                .can_update(false)
                .server_managed(),
        )
        .with("category", FieldDefinition::string().defined())
        .with("description", fields::long_text())
        .with(
            "name",
            FieldDefinition::string()
                .defined()
                .field_type(FieldType::ShortText),
        )
}

/// Compile a config into a schema bundle.
///
/// # Errors
///
/// Returns `ConfigError` when the id prefix is empty, a required-on-create
/// name is not a declared field, `_object` lacks a non-empty string default,
/// or a mask names an undeclared field.
pub fn compile(config: &SpecConfig) -> Result<SchemaSpec, ConfigError> {
    if config.id_prefix.is_empty() {
        return Err(ConfigError::EmptyIdPrefix);
    }

    let merged = config.merged_fields();
    if let Some(unknown) = config
        .required_on_create
        .iter()
        .find(|name| !merged.contains(name))
    {
        return Err(ConfigError::UnknownRequiredField {
            field: unknown.clone(),
        });
    }

    let required_fields_enum = EnumHandle::new(config.required_on_create.iter().cloned())?;
    let entity_fields = merged.map_fields(|name, field| {
        if required_fields_enum.is_member(name) {
            field.required_on_create()
        } else {
            field
        }
    });

    let name = type_discriminant(&entity_fields)?;
    let create_fields = project(&entity_fields, Operation::Create)?;
    let update_fields = project(&entity_fields, Operation::Update)?;
    let create_required_fields = entity_fields.only(required_fields_enum.members());

    let plural = config
        .plural
        .clone()
        .unwrap_or_else(|| format!("{}s", name));
    let endpoint = plural.to_case(Case::Kebab);

    let spec = SchemaSpec {
        kind: config.kind,
        id_prefix: config.id_prefix.clone(),
        database_id: config
            .database_id
            .clone()
            .unwrap_or_else(|| DEFAULT_DATABASE_ID.to_string()),
        endpoint,
        collection_id: plural.clone(),
        plural,
        entity_fields_enum: EnumHandle::new(entity_fields.names())?,
        create_fields_enum: EnumHandle::new(create_fields.names())?,
        update_fields_enum: EnumHandle::new(update_fields.names())?,
        required_fields_enum,
        entity_defaults: entity_fields.default_record(),
        create_defaults: create_fields.default_record(),
        update_defaults: update_fields.default_record(),
        entity_schema: ObjectSchema::new(entity_fields),
        create_schema: ObjectSchema::for_operation(create_fields, Operation::Create),
        create_required_schema: ObjectSchema::for_operation(
            create_required_fields,
            Operation::Create,
        ),
        update_schema: ObjectSchema::for_operation(update_fields, Operation::Update),
        name,
    };

    debug!(
        entity = %spec.name,
        endpoint = %spec.endpoint,
        entity_fields = spec.entity_fields_enum.len(),
        create_fields = spec.create_fields_enum.len(),
        update_fields = spec.update_fields_enum.len(),
        required_on_create = spec.required_fields_enum.len(),
        "compiled schema spec"
    );
    Ok(spec)
}

fn type_discriminant(fields: &FieldMap) -> Result<String, ConfigError> {
    let default = fields.get("_object").and_then(|f| f.default.as_ref());
    match default {
        None => Err(ConfigError::MissingTypeDiscriminant),
        Some(DefaultValue::Static {
            value: Value::String(s),
        }) if !s.is_empty() => Ok(s.clone()),
        Some(DefaultValue::Static { value }) => Err(ConfigError::InvalidTypeDiscriminant {
            actual: match value {
                Value::String(_) => "empty string".to_string(),
                other => json_type_name(other).to_string(),
            },
        }),
        Some(DefaultValue::Now) => Err(ConfigError::InvalidTypeDiscriminant {
            actual: "generated timestamp".to_string(),
        }),
        Some(DefaultValue::DocumentId { .. }) => Err(ConfigError::InvalidTypeDiscriminant {
            actual: "generated document id".to_string(),
        }),
    }
}

/// The compiled, immutable bundle for one entity.
#[derive(Debug, Clone)]
pub struct SchemaSpec {
    kind: EntityKind,
    name: String,
    id_prefix: String,
    plural: String,
    endpoint: String,
    collection_id: String,
    database_id: String,
    entity_schema: ObjectSchema,
    create_schema: ObjectSchema,
    create_required_schema: ObjectSchema,
    update_schema: ObjectSchema,
    entity_defaults: Record,
    create_defaults: Record,
    update_defaults: Record,
    entity_fields_enum: EnumHandle,
    create_fields_enum: EnumHandle,
    update_fields_enum: EnumHandle,
    required_fields_enum: EnumHandle,
}

impl SchemaSpec {
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// The entity type name, taken from `_object`'s default.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id_prefix(&self) -> &str {
        &self.id_prefix
    }

    pub fn plural(&self) -> &str {
        &self.plural
    }

    /// Kebab-cased plural, e.g. `testResources` -> `test-resources`.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn collection_id(&self) -> &str {
        &self.collection_id
    }

    pub fn database_id(&self) -> &str {
        &self.database_id
    }

    pub fn entity_schema(&self) -> &ObjectSchema {
        &self.entity_schema
    }

    pub fn create_schema(&self) -> &ObjectSchema {
        &self.create_schema
    }

    pub fn create_required_schema(&self) -> &ObjectSchema {
        &self.create_required_schema
    }

    pub fn update_schema(&self) -> &ObjectSchema {
        &self.update_schema
    }

    pub fn entity_shape(&self) -> &FieldMap {
        self.entity_schema.fields()
    }

    pub fn create_shape(&self) -> &FieldMap {
        self.create_schema.fields()
    }

    pub fn update_shape(&self) -> &FieldMap {
        self.update_schema.fields()
    }

    /// Entity defaults as materialised at compile time.
    pub fn default_record(&self) -> &Record {
        &self.entity_defaults
    }

    pub fn create_defaults(&self) -> &Record {
        &self.create_defaults
    }

    pub fn update_defaults(&self) -> &Record {
        &self.update_defaults
    }

    pub fn entity_fields(&self) -> &EnumHandle {
        &self.entity_fields_enum
    }

    pub fn create_fields(&self) -> &EnumHandle {
        &self.create_fields_enum
    }

    pub fn update_fields(&self) -> &EnumHandle {
        &self.update_fields_enum
    }

    pub fn required_fields(&self) -> &EnumHandle {
        &self.required_fields_enum
    }

    /// Build a new entity record from freshly materialised defaults and
    /// `params`. Resource entities get both timestamps stamped.
    pub fn merge_create_params(&self, params: impl Into<Params>) -> Record {
        merge::merge_create(
            self.entity_schema.default_record(),
            self.create_schema.fields(),
            params.into(),
            self.kind.stamps_timestamps(),
        )
    }

    /// Apply `params` to `prev`. Only update-projection fields are written.
    pub fn merge_update_params(&self, prev: &Record, params: impl Into<Params>) -> Record {
        merge::merge_update(prev, self.update_schema.fields(), params.into())
    }

    pub fn generate_id(&self) -> String {
        id::generate(&self.id_prefix)
    }

    /// A fresh identifier for each key.
    pub fn id_map<I, S>(&self, keys: I) -> BTreeMap<String, String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        keys.into_iter()
            .map(|k| (k.into(), self.generate_id()))
            .collect()
    }

    /// # Errors
    ///
    /// Returns every violation of the entity schema.
    pub fn validate_entity(&self, payload: &Value) -> Result<(), ValidateError> {
        self.entity_schema.validate(payload)
    }

    /// # Errors
    ///
    /// Returns every violation of the create schema.
    pub fn validate_create(&self, payload: &Value) -> Result<(), ValidateError> {
        self.create_schema.validate(payload)
    }

    /// # Errors
    ///
    /// Returns every violation of the update schema.
    pub fn validate_update(&self, payload: &Value) -> Result<(), ValidateError> {
        self.update_schema.validate(payload)
    }
}
