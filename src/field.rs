//! Field definitions: a primitive shape plus defaults, tests and metadata.
//!
//! Metadata is a closed structure read by form builders and lints; it never
//! changes how a value validates, with the single exception of
//! `required_on_create`, which the presence classifier consults.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::formats;
use crate::id;

/// Primitive shape of a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    #[default]
    String,
    Number,
    Boolean,
    Array,
    Object,
    /// Any JSON value.
    Mixed,
}

impl Primitive {
    /// JSON Schema `type` keyword, `None` for mixed.
    pub fn json_type(&self) -> Option<&'static str> {
        match self {
            Primitive::String => Some("string"),
            Primitive::Number => Some("number"),
            Primitive::Boolean => Some("boolean"),
            Primitive::Array => Some("array"),
            Primitive::Object => Some("object"),
            Primitive::Mixed => None,
        }
    }

    /// Whether a non-null value has this shape.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Primitive::String => value.is_string(),
            Primitive::Number => value.is_number(),
            Primitive::Boolean => value.is_boolean(),
            Primitive::Array => value.is_array(),
            Primitive::Object => value.is_object(),
            Primitive::Mixed => true,
        }
    }
}

/// Logical domain type of a field, independent of its primitive shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    AddressField,
    Boolean,
    Date,
    DateTime,
    Domain,
    Duration,
    EmailAddress,
    File,
    FileList,
    FloatingPointNumber,
    ForeignKey,
    ForeignKeys,
    Id,
    Integer,
    InternationalPhoneNumber,
    Interval,
    List,
    LongText,
    MarkdownText,
    Percentage,
    RecurrenceRule,
    RichText,
    SelectMany,
    SelectOne,
    SensitiveText,
    ShortText,
    TimeZone,
    UnitedStatesPhoneNumber,
    Url,
    Usd,
}

/// How a field's default is produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DefaultValue {
    /// A fixed JSON value.
    Static { value: Value },
    /// The current UTC timestamp at materialisation time.
    Now,
    /// A fresh document identifier with the given prefix.
    DocumentId { prefix: String },
}

impl DefaultValue {
    /// Produce the default. Generated variants yield a new value each call.
    pub fn materialize(&self) -> Value {
        match self {
            DefaultValue::Static { value } => value.clone(),
            DefaultValue::Now => Value::String(formats::utc_now()),
            DefaultValue::DocumentId { prefix } => Value::String(id::generate(prefix)),
        }
    }
}

/// Named test attached to a field.
///
/// `defined` and `required` are presence tests and are read by the
/// presence classifier. Every other test is a predicate over a present,
/// well-typed value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum FieldTest {
    Defined,
    Required,
    IsDate {
        #[serde(default)]
        allow_empty: bool,
    },
    IsDateYmd {
        #[serde(default)]
        allow_empty: bool,
    },
    IsDomain {
        #[serde(default)]
        allow_empty: bool,
    },
    IsEmailAddress {
        #[serde(default)]
        allow_empty: bool,
    },
    IsUrl {
        #[serde(default)]
        allow_empty: bool,
    },
    IsFilePath {
        #[serde(default)]
        allow_empty: bool,
    },
    IsInteger,
    IsDocumentId {
        prefixes: Vec<String>,
        #[serde(default)]
        allow_empty: bool,
    },
}

impl FieldTest {
    pub fn name(&self) -> &'static str {
        match self {
            FieldTest::Defined => "defined",
            FieldTest::Required => "required",
            FieldTest::IsDate { .. } => "is_date",
            FieldTest::IsDateYmd { .. } => "is_date_ymd",
            FieldTest::IsDomain { .. } => "is_domain",
            FieldTest::IsEmailAddress { .. } => "is_email_address",
            FieldTest::IsUrl { .. } => "is_url",
            FieldTest::IsFilePath { .. } => "is_file_path",
            FieldTest::IsInteger => "is_integer",
            FieldTest::IsDocumentId { .. } => "is_document_id",
        }
    }

    pub fn is_presence(&self) -> bool {
        matches!(self, FieldTest::Defined | FieldTest::Required)
    }

    /// Run the predicate. Presence tests always pass here.
    pub fn check(&self, value: &Value) -> bool {
        let string_test = |allow_empty: bool, pred: fn(&str) -> bool| match value.as_str() {
            Some("") => allow_empty,
            Some(s) => pred(s),
            None => false,
        };
        match self {
            FieldTest::Defined | FieldTest::Required => true,
            FieldTest::IsDate { allow_empty } => string_test(*allow_empty, formats::is_utc_date),
            FieldTest::IsDateYmd { allow_empty } => string_test(*allow_empty, formats::is_date_ymd),
            FieldTest::IsDomain { allow_empty } => string_test(*allow_empty, formats::is_web_domain),
            FieldTest::IsEmailAddress { allow_empty } => {
                string_test(*allow_empty, formats::is_email_address)
            }
            FieldTest::IsUrl { allow_empty } => string_test(*allow_empty, formats::is_web_url),
            FieldTest::IsFilePath { allow_empty } => string_test(*allow_empty, formats::is_file_path),
            FieldTest::IsInteger => formats::is_integer(value),
            FieldTest::IsDocumentId {
                prefixes,
                allow_empty,
            } => match value.as_str() {
                Some(s) if *allow_empty => id::validate_or_empty(prefixes.as_slice(), s),
                Some(s) => id::validate(prefixes.as_slice(), s),
                None => false,
            },
        }
    }

    /// Failure message with the field path and offending value interpolated.
    pub fn message(&self, path: &str, value: &Value) -> String {
        let shown = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        match self {
            FieldTest::Defined => format!("{} must be defined", path),
            FieldTest::Required => format!("{} is a required field", path),
            FieldTest::IsDate { .. } => format!("{} is not a UTC date", path),
            FieldTest::IsDateYmd { .. } => format!("{} is not a YYYY-MM-DD date", path),
            FieldTest::IsDomain { .. } => format!("{} is not a domain", path),
            FieldTest::IsEmailAddress { .. } => format!("{} is not an email address", path),
            FieldTest::IsUrl { .. } => format!("{} is not a url", path),
            FieldTest::IsFilePath { .. } => format!("{} is not a file path", path),
            FieldTest::IsInteger => format!("{} is not an integer", path),
            FieldTest::IsDocumentId { .. } => format!("{} is not a document ID: {}", path, shown),
        }
    }
}

/// Plain or per-locale text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocalizedText {
    Plain(String),
    Localized(BTreeMap<String, String>),
}

impl LocalizedText {
    /// Text for a locale, falling back to `en`, then to the plain text.
    pub fn get(&self, locale: &str) -> Option<&str> {
        match self {
            LocalizedText::Plain(s) => Some(s),
            LocalizedText::Localized(map) => map
                .get(locale)
                .or_else(|| map.get("en"))
                .map(String::as_str),
        }
    }
}

impl From<&str> for LocalizedText {
    fn from(s: &str) -> Self {
        LocalizedText::Plain(s.to_string())
    }
}

/// Descriptive metadata attached to a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldMeta {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub field_type: Option<FieldType>,
    /// Whether update operations may modify the field.
    pub can_update: bool,
    /// Set only by the system, never by client input.
    pub server_managed: bool,
    pub primary_key: bool,
    pub unique_key: bool,
    pub pii: bool,
    pub required_on_create: bool,
    /// Collections a foreign-key field may reference.
    pub resources: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<LocalizedText>,
    pub label_by_enum_option: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_tooltip_user_text: Option<LocalizedText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_message_user_text: Option<LocalizedText>,
    pub extensions: BTreeMap<String, String>,
}

impl Default for FieldMeta {
    fn default() -> Self {
        Self {
            field_type: None,
            can_update: true,
            server_managed: false,
            primary_key: false,
            unique_key: false,
            pii: false,
            required_on_create: false,
            resources: Vec::new(),
            label: None,
            label_by_enum_option: BTreeMap::new(),
            label_tooltip_user_text: None,
            label_message_user_text: None,
            extensions: BTreeMap::new(),
        }
    }
}

/// A field: primitive validator plus default, constraints, tests and metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    #[serde(rename = "type")]
    pub primitive: Primitive,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue>,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub one_of: Vec<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub not_one_of: Vec<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tests: Vec<FieldTest>,
    /// Element definition for arrays.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner: Option<Box<FieldDefinition>>,
    /// Nested fields for objects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<FieldMap>,
    #[serde(default)]
    pub meta: FieldMeta,
}

impl FieldDefinition {
    pub fn new(primitive: Primitive) -> Self {
        Self {
            primitive,
            default: None,
            nullable: false,
            one_of: Vec::new(),
            not_one_of: Vec::new(),
            tests: Vec::new(),
            inner: None,
            properties: None,
            meta: FieldMeta::default(),
        }
    }

    pub fn string() -> Self {
        Self::new(Primitive::String)
    }

    pub fn number() -> Self {
        Self::new(Primitive::Number)
    }

    pub fn boolean() -> Self {
        Self::new(Primitive::Boolean)
    }

    pub fn mixed() -> Self {
        Self::new(Primitive::Mixed)
    }

    pub fn array(inner: FieldDefinition) -> Self {
        let mut field = Self::new(Primitive::Array);
        field.inner = Some(Box::new(inner));
        field
    }

    pub fn object(properties: FieldMap) -> Self {
        let mut field = Self::new(Primitive::Object);
        field.properties = Some(properties);
        field
    }

    // --- builders ---

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(DefaultValue::Static {
            value: value.into(),
        });
        self
    }

    pub fn default_now(mut self) -> Self {
        self.default = Some(DefaultValue::Now);
        self
    }

    pub fn default_id(mut self, prefix: impl Into<String>) -> Self {
        self.default = Some(DefaultValue::DocumentId {
            prefix: prefix.into(),
        });
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn one_of<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.one_of = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn not_one_of<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.not_one_of = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn test(mut self, test: FieldTest) -> Self {
        self.tests.push(test);
        self
    }

    /// Value must be present (null allowed only if nullable).
    pub fn defined(self) -> Self {
        self.presence(FieldTest::Defined)
    }

    /// Value must be present, non-null and, for strings, non-empty.
    pub fn required(self) -> Self {
        self.presence(FieldTest::Required)
    }

    /// Strip every presence test.
    pub fn optional(mut self) -> Self {
        self.tests.retain(|t| !t.is_presence());
        self
    }

    /// Make the field mandatory for creation and tag it as such.
    pub fn required_on_create(mut self) -> Self {
        self.meta.required_on_create = true;
        self.defined()
    }

    fn presence(mut self, test: FieldTest) -> Self {
        if !self.has_test(test.name()) {
            self.tests.push(test);
        }
        self
    }

    pub fn meta(mut self, meta: FieldMeta) -> Self {
        self.meta = meta;
        self
    }

    pub fn field_type(mut self, field_type: FieldType) -> Self {
        self.meta.field_type = Some(field_type);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.meta.label = Some(LocalizedText::Plain(label.into()));
        self
    }

    pub fn can_update(mut self, can_update: bool) -> Self {
        self.meta.can_update = can_update;
        self
    }

    pub fn server_managed(mut self) -> Self {
        self.meta.server_managed = true;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.meta.primary_key = true;
        self
    }

    pub fn unique_key(mut self) -> Self {
        self.meta.unique_key = true;
        self
    }

    pub fn pii(mut self) -> Self {
        self.meta.pii = true;
        self
    }

    pub fn resources<I, S>(mut self, resources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.meta.resources = resources.into_iter().map(Into::into).collect();
        self
    }

    // --- queries ---

    pub fn has_test(&self, name: &str) -> bool {
        self.tests.iter().any(|t| t.name() == name)
    }

    /// The default as a fixed value, if it is static.
    pub fn static_default(&self) -> Option<&Value> {
        match &self.default {
            Some(DefaultValue::Static { value }) => Some(value),
            _ => None,
        }
    }

    /// Produce this field's default, walking nested object fields when the
    /// object itself declares none.
    pub fn materialize_default(&self) -> Option<Value> {
        match (&self.default, &self.properties) {
            (Some(default), _) => Some(default.materialize()),
            (None, Some(props)) => {
                let record = props.default_record();
                (!record.is_empty()).then_some(Value::Object(record))
            }
            (None, None) => None,
        }
    }

    /// Reflective description for form builders.
    pub fn describe(&self) -> FieldSpec {
        FieldSpec {
            primitive: self.primitive,
            default: self.materialize_default(),
            nullable: self.nullable,
            one_of: self.one_of.clone(),
            not_one_of: self.not_one_of.clone(),
            tests: self.tests.iter().map(|t| t.name().to_string()).collect(),
            label: self
                .meta
                .label
                .as_ref()
                .and_then(|l| l.get("en"))
                .map(String::from),
            meta: self.meta.clone(),
            inner: self.inner.as_ref().map(|i| Box::new(i.describe())),
        }
    }
}

/// Snapshot of a field for UI consumers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSpec {
    #[serde(rename = "type")]
    pub primitive: Primitive,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    pub nullable: bool,
    pub one_of: Vec<Value>,
    pub not_one_of: Vec<Value>,
    pub tests: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub meta: FieldMeta,
    #[serde(rename = "innerType", skip_serializing_if = "Option::is_none")]
    pub inner: Option<Box<FieldSpec>>,
}

/// Ordered mapping of field name to definition.
///
/// Inserting an existing name replaces the definition in place, keeping
/// the original position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldMap {
    entries: Vec<(String, FieldDefinition)>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, field: FieldDefinition) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = field,
            None => self.entries.push((name, field)),
        }
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, field: FieldDefinition) -> Self {
        self.insert(name, field);
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldDefinition> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, f)| f)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldDefinition)> {
        self.entries.iter().map(|(n, f)| (n.as_str(), f))
    }

    /// Copy without the named fields.
    pub fn without(&self, names: &[&str]) -> FieldMap {
        self.entries
            .iter()
            .filter(|(n, _)| !names.contains(&n.as_str()))
            .cloned()
            .collect()
    }

    /// Copy restricted to the named fields, in this map's order.
    pub fn only<S: AsRef<str>>(&self, names: &[S]) -> FieldMap {
        self.entries
            .iter()
            .filter(|(n, _)| names.iter().any(|k| k.as_ref() == n))
            .cloned()
            .collect()
    }

    /// Rewrite every definition through `f`.
    pub fn map_fields(
        self,
        mut f: impl FnMut(&str, FieldDefinition) -> FieldDefinition,
    ) -> FieldMap {
        self.entries
            .into_iter()
            .map(|(n, field)| {
                let field = f(&n, field);
                (n, field)
            })
            .collect()
    }

    /// Default record: every field with a default, in order.
    pub fn default_record(&self) -> crate::types::Record {
        self.entries
            .iter()
            .filter_map(|(n, f)| f.materialize_default().map(|v| (n.clone(), v)))
            .collect()
    }
}

impl<K: Into<String>> FromIterator<(K, FieldDefinition)> for FieldMap {
    fn from_iter<T: IntoIterator<Item = (K, FieldDefinition)>>(iter: T) -> Self {
        let mut map = FieldMap::new();
        for (name, field) in iter {
            map.insert(name, field);
        }
        map
    }
}

impl Serialize for FieldMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, field) in &self.entries {
            map.serialize_entry(name, field)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FieldMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FieldMapVisitor;

        impl<'de> Visitor<'de> for FieldMapVisitor {
            type Value = FieldMap;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of field name to field definition")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<FieldMap, A::Error> {
                let mut map = FieldMap::new();
                while let Some((name, field)) = access.next_entry::<String, FieldDefinition>()? {
                    map.insert(name, field);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(FieldMapVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builders_compose() {
        let field = FieldDefinition::string()
            .default_value("")
            .field_type(FieldType::ShortText)
            .label("Name")
            .defined();
        assert_eq!(field.static_default(), Some(&json!("")));
        assert!(field.has_test("defined"));
        assert_eq!(field.meta.field_type, Some(FieldType::ShortText));
        assert!(field.meta.can_update);
    }

    #[test]
    fn presence_tests_are_not_duplicated() {
        let field = FieldDefinition::string().defined().defined().required();
        assert_eq!(field.tests.len(), 2);
        let field = field.optional();
        assert!(field.tests.is_empty());
    }

    #[test]
    fn required_on_create_tags_meta() {
        let field = FieldDefinition::string().required_on_create();
        assert!(field.meta.required_on_create);
        assert!(field.has_test("defined"));
    }

    #[test]
    fn generated_defaults_are_fresh() {
        let field = FieldDefinition::string().default_id("usr");
        let a = field.materialize_default().unwrap();
        let b = field.materialize_default().unwrap();
        assert_ne!(a, b);
        assert!(id::validate(&["usr"], a.as_str().unwrap()));
        assert_eq!(field.static_default(), None);
    }

    #[test]
    fn nested_object_default_walks_fields() {
        let field = FieldDefinition::object(
            FieldMap::new()
                .with("a", FieldDefinition::string().default_value("x"))
                .with("b", FieldDefinition::number()),
        );
        assert_eq!(field.materialize_default(), Some(json!({"a": "x"})));

        let empty = FieldDefinition::object(FieldMap::new().with("b", FieldDefinition::number()));
        assert_eq!(empty.materialize_default(), None);
    }

    #[test]
    fn document_id_test() {
        let test = FieldTest::IsDocumentId {
            prefixes: vec!["usr".into()],
            allow_empty: true,
        };
        assert!(test.check(&json!("")));
        assert!(test.check(&json!("usr_4wCSYDmd7Mt6jO7gR1VKdM")));
        assert!(!test.check(&json!("acct_4wCSYDmd7Mt6jO7gR1VKdM")));
        assert_eq!(
            test.message("_created_by", &json!("nope")),
            "_created_by is not a document ID: nope"
        );
    }

    #[test]
    fn string_tests_respect_allow_empty() {
        assert!(FieldTest::IsUrl { allow_empty: true }.check(&json!("")));
        assert!(!FieldTest::IsUrl { allow_empty: false }.check(&json!("")));
        assert!(!FieldTest::IsUrl { allow_empty: true }.check(&json!(3)));
    }

    #[test]
    fn field_map_keeps_order_and_replaces_in_place() {
        let mut map = FieldMap::new()
            .with("b", FieldDefinition::string())
            .with("a", FieldDefinition::string());
        map.insert("b", FieldDefinition::number());
        assert_eq!(map.names().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(map.get("b").unwrap().primitive, Primitive::Number);

        assert_eq!(map.without(&["b"]).names().collect::<Vec<_>>(), vec!["a"]);
        assert_eq!(map.only(&["a", "zzz"]).len(), 1);
    }

    #[test]
    fn field_map_serde_preserves_order() {
        let json = json!({
            "zeta": { "type": "string", "default": { "kind": "static", "value": "" } },
            "alpha": { "type": "boolean", "tests": [{ "name": "defined" }] },
            "created": { "type": "string", "default": { "kind": "now" } }
        });
        let map: FieldMap = serde_json::from_value(json).unwrap();
        assert_eq!(map.names().collect::<Vec<_>>(), vec!["zeta", "alpha", "created"]);
        assert!(map.get("alpha").unwrap().has_test("defined"));
        assert_eq!(map.get("created").unwrap().default, Some(DefaultValue::Now));

        let back = serde_json::to_value(&map).unwrap();
        let keys: Vec<_> = back.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "created"]);
    }

    #[test]
    fn meta_defaults_from_json() {
        let meta: FieldMeta = serde_json::from_value(json!({ "type": "id" })).unwrap();
        assert!(meta.can_update);
        assert_eq!(meta.field_type, Some(FieldType::Id));
    }

    #[test]
    fn localized_text_fallback() {
        let text: LocalizedText =
            serde_json::from_value(json!({ "en": "Name", "es": "Nombre" })).unwrap();
        assert_eq!(text.get("es"), Some("Nombre"));
        assert_eq!(text.get("fr"), Some("Name"));
        assert_eq!(LocalizedText::from("Hi").get("es"), Some("Hi"));
    }

    #[test]
    fn describe_reports_inner_type() {
        let spec = FieldDefinition::array(FieldDefinition::string().defined())
            .default_value(json!([]))
            .describe();
        assert_eq!(spec.default, Some(json!([])));
        assert_eq!(spec.inner.unwrap().tests, vec!["defined".to_string()]);
    }
}
