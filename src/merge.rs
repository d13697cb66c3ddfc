//! Merge operators: overlay typed partial input onto a base record.
//!
//! Inputs are [`Params`], where every key carries a [`FieldInput`] saying
//! whether a value was supplied, explicitly cleared, or not supplied at all.
//! Keys that were not supplied never reach the output, so a merged record
//! only ever holds concrete JSON values.
//!
//! Merging is shallow: a `Set` object value replaces the stored object
//! wholesale.

use serde_json::{Map, Value};
use tracing::{debug, trace, warn};

use crate::field::FieldMap;
use crate::formats::utc_now;
use crate::types::{Operation, Record};

/// Caller input for a single field.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FieldInput {
    /// No value supplied. The key is dropped.
    #[default]
    Absent,
    /// Explicit clear. The field goes back to its schema default, or is
    /// removed when it has none.
    Clear,
    /// Write this value.
    Set(Value),
}

impl FieldInput {
    pub fn is_absent(&self) -> bool {
        matches!(self, FieldInput::Absent)
    }
}

impl From<Value> for FieldInput {
    fn from(value: Value) -> Self {
        FieldInput::Set(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for FieldInput {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => FieldInput::Set(v.into()),
            None => FieldInput::Absent,
        }
    }
}

/// Ordered partial input for a merge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: Vec<(String, FieldInput)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the input for `name`.
    pub fn insert(&mut self, name: impl Into<String>, input: FieldInput) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = input,
            None => self.entries.push((name, input)),
        }
    }

    pub fn set(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, FieldInput::Set(value.into()));
        self
    }

    pub fn clear(mut self, name: impl Into<String>) -> Self {
        self.insert(name, FieldInput::Clear);
        self
    }

    pub fn absent(mut self, name: impl Into<String>) -> Self {
        self.insert(name, FieldInput::Absent);
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldInput> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, i)| i)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldInput)> {
        self.entries.iter().map(|(n, i)| (n.as_str(), i))
    }
}

impl<K: Into<String>> FromIterator<(K, FieldInput)> for Params {
    fn from_iter<T: IntoIterator<Item = (K, FieldInput)>>(iter: T) -> Self {
        let mut params = Params::new();
        for (name, input) in iter {
            params.insert(name, input);
        }
        params
    }
}

impl From<Map<String, Value>> for Params {
    fn from(map: Map<String, Value>) -> Self {
        map.into_iter()
            .map(|(k, v)| (k, FieldInput::Set(v)))
            .collect()
    }
}

impl IntoIterator for Params {
    type Item = (String, FieldInput);
    type IntoIter = std::vec::IntoIter<(String, FieldInput)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Overlay `params` onto `base`, accepting only fields of `allowed`.
///
/// `Absent` inputs and keys outside `allowed` are dropped. `Clear` resets a
/// field to a fresh copy of its default.
pub fn overlay(base: Record, allowed: &FieldMap, params: Params, operation: Operation) -> Record {
    let mut record = base;

    for (name, input) in params {
        let Some(field) = allowed.get(&name) else {
            if input.is_absent() {
                trace!(field = %name, "skipped absent input");
                continue;
            }
            if operation.mask().contains(&name.as_str()) {
                debug!(field = %name, operation = operation.as_str(), "dropped masked field");
            } else {
                warn!(field = %name, operation = operation.as_str(), "dropped unknown field");
            }
            continue;
        };

        match input {
            FieldInput::Absent => trace!(field = %name, "skipped absent input"),
            FieldInput::Clear => match field.materialize_default() {
                Some(default) => {
                    record.insert(name, default);
                }
                None => {
                    record.remove(&name);
                }
            },
            FieldInput::Set(value) => {
                record.insert(name, value);
            }
        }
    }

    record
}

/// Build a create record: `defaults` overlaid with `params`, restricted to
/// the create projection. With `stamp_timestamps`, both audit timestamps
/// are set to the current time.
pub fn merge_create(
    defaults: Record,
    create_fields: &FieldMap,
    params: Params,
    stamp_timestamps: bool,
) -> Record {
    let mut record = overlay(defaults, create_fields, params, Operation::Create);
    if stamp_timestamps {
        let now = utc_now();
        record.insert("_date_created".to_string(), Value::String(now.clone()));
        record.insert("_date_last_modified".to_string(), Value::String(now));
    }
    record
}

/// Build an updated record: `prev` overlaid with `params`, restricted to
/// the update projection.
pub fn merge_update(prev: &Record, update_fields: &FieldMap, params: Params) -> Record {
    overlay(prev.clone(), update_fields, params, Operation::Update)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldDefinition;
    use serde_json::json;

    fn allowed() -> FieldMap {
        FieldMap::new()
            .with("name", FieldDefinition::string().defined())
            .with("description", FieldDefinition::string().default_value(""))
            .with("tags", FieldDefinition::array(FieldDefinition::string()))
    }

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn params_replace_in_place() {
        let params = Params::new().set("a", 1).absent("b").set("a", 2);
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("a"), Some(&FieldInput::Set(json!(2))));
        assert_eq!(params.iter().map(|(n, _)| n).collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn field_input_from_option() {
        assert_eq!(FieldInput::from(None::<String>), FieldInput::Absent);
        assert_eq!(FieldInput::from(Some("x")), FieldInput::Set(json!("x")));
    }

    #[test]
    fn params_from_json_map_sets_everything() {
        let params = Params::from(record(json!({ "name": "a", "tags": null })));
        assert_eq!(params.get("tags"), Some(&FieldInput::Set(Value::Null)));
    }

    #[test]
    fn absent_keys_never_reach_output() {
        let base = record(json!({ "description": "" }));
        let params = Params::new()
            .set("name", "Test")
            .absent("description")
            .absent("tags");
        let merged = overlay(base, &allowed(), params, Operation::Create);
        assert_eq!(Value::Object(merged), json!({ "description": "", "name": "Test" }));
    }

    #[test]
    fn clear_resets_to_default_or_removes() {
        let base = record(json!({ "name": "old", "description": "old", "tags": ["a"] }));
        let params = Params::new().clear("description").clear("tags");
        let merged = overlay(base, &allowed(), params, Operation::Update);
        assert_eq!(Value::Object(merged), json!({ "name": "old", "description": "" }));
    }

    #[test]
    fn unknown_and_masked_keys_are_dropped() {
        let params = Params::new().set("_object", "x").set("bogus", 1).set("name", "n");
        let merged = overlay(Record::new(), &allowed(), params, Operation::Update);
        assert_eq!(Value::Object(merged), json!({ "name": "n" }));
    }

    #[test]
    fn create_stamps_timestamps_when_asked() {
        let merged = merge_create(Record::new(), &allowed(), Params::new(), true);
        assert_eq!(merged["_date_created"], merged["_date_last_modified"]);
        assert!(crate::formats::is_utc_date(merged["_date_created"].as_str().unwrap()));

        let merged = merge_create(Record::new(), &allowed(), Params::new(), false);
        assert!(!merged.contains_key("_date_created"));
    }

    #[test]
    fn update_is_shallow() {
        let fields = FieldMap::new().with(
            "address",
            FieldDefinition::object(
                FieldMap::new()
                    .with("line1", FieldDefinition::string())
                    .with("city", FieldDefinition::string()),
            ),
        );
        let prev = record(json!({ "address": { "line1": "1 Main", "city": "Austin" } }));
        let params = Params::new().set("address", json!({ "city": "Dallas" }));
        let merged = merge_update(&prev, &fields, params);
        assert_eq!(merged["address"], json!({ "city": "Dallas" }));
        assert_eq!(prev["address"]["line1"], "1 Main");
    }
}
