//! Closed string enums with membership checks and field constructors.
//!
//! ```
//! use entity_schema::EnumHandle;
//!
//! let status = EnumHandle::new(["draft", "in_review", "published"]).unwrap();
//! assert!(status.is_member("draft"));
//! assert!(!status.is_member("Draft"));
//! assert_eq!(status.default_value(), Some("draft"));
//! assert_eq!(status.label("in_review"), Some("In review".to_string()));
//! ```

use std::collections::{BTreeMap, HashSet};

use convert_case::{Case, Casing};
use regex::{Regex, RegexBuilder};

use crate::error::ConfigError;
use crate::field::{DefaultValue, FieldDefinition, FieldType};

/// A de-duplicated, ordered set of string literals.
#[derive(Debug, Clone)]
pub struct EnumHandle {
    members: Vec<String>,
    lookup: HashSet<String>,
    default_value: Option<String>,
    regex: Option<Regex>,
}

impl EnumHandle {
    /// Build an enum whose default is the first member.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnumPattern` if the match pattern
    /// cannot be compiled (only possible for pathologically large sets).
    pub fn new<I, S>(members: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let members: Vec<String> = members
            .into_iter()
            .map(Into::into)
            .filter(|m| seen.insert(m.clone()))
            .collect();

        let regex = if members.is_empty() {
            None
        } else {
            let pattern = members
                .iter()
                .map(|m| regex::escape(m))
                .collect::<Vec<_>>()
                .join("|");
            let compiled = RegexBuilder::new(&pattern)
                .case_insensitive(true)
                .build()
                .map_err(|e| ConfigError::InvalidEnumPattern {
                    message: e.to_string(),
                })?;
            Some(compiled)
        };

        Ok(Self {
            default_value: members.first().cloned(),
            lookup: seen,
            members,
            regex,
        })
    }

    /// Build an enum with an explicit default.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownEnumDefault` if `default` is not a member.
    pub fn with_default<I, S>(members: I, default: &str) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut handle = Self::new(members)?;
        if !handle.is_member(default) {
            return Err(ConfigError::UnknownEnumDefault {
                value: default.to_string(),
            });
        }
        handle.default_value = Some(default.to_string());
        Ok(handle)
    }

    pub fn members(&self) -> &[String] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Exact, case-sensitive membership.
    pub fn is_member(&self, candidate: &str) -> bool {
        self.lookup.contains(candidate)
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    /// Case-insensitive alternation over the members, `None` when empty.
    pub fn regex(&self) -> Option<&Regex> {
        self.regex.as_ref()
    }

    /// Sentence-case label for a member.
    pub fn label(&self, member: &str) -> Option<String> {
        self.is_member(member).then(|| sentence_case(member))
    }

    /// Labels for every member, keyed by member.
    pub fn labels(&self) -> BTreeMap<String, String> {
        self.members
            .iter()
            .map(|m| (m.clone(), sentence_case(m)))
            .collect()
    }

    /// `select_one` field with the enum default.
    pub fn field_with_default(&self) -> FieldDefinition {
        let mut field = self.select_one();
        field.default = self.default_value.as_ref().map(|d| DefaultValue::Static {
            value: d.clone().into(),
        });
        field
    }

    /// `select_one` field that must be present.
    pub fn defined_field(&self) -> FieldDefinition {
        self.select_one().defined()
    }

    /// `select_one` field with no presence constraint.
    pub fn optional_field(&self) -> FieldDefinition {
        self.select_one()
    }

    /// Replace the generated labels of a field built from this enum.
    pub fn with_labels(
        &self,
        mut field: FieldDefinition,
        labels: impl IntoIterator<Item = (String, String)>,
    ) -> FieldDefinition {
        field.meta.label_by_enum_option.extend(labels);
        field
    }

    fn select_one(&self) -> FieldDefinition {
        let mut field = FieldDefinition::mixed()
            .one_of(self.members.iter().cloned())
            .field_type(FieldType::SelectOne);
        field.meta.label_by_enum_option = self.labels();
        field
    }
}

/// `in_review` -> `In review`, `activeUser` -> `Active user`.
pub fn sentence_case(s: &str) -> String {
    let lower = s.to_case(Case::Lower);
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dedupes_preserving_first_occurrence() {
        let e = EnumHandle::new(["b", "a", "b", "c", "a"]).unwrap();
        assert_eq!(e.members(), &["b", "a", "c"]);
        assert_eq!(e.default_value(), Some("b"));
    }

    #[test]
    fn membership_is_case_sensitive() {
        let e = EnumHandle::new(["create", "update"]).unwrap();
        assert!(e.is_member("create"));
        assert!(!e.is_member("Create"));
        assert!(!e.is_member("delete"));
        assert!(!e.is_member(""));
    }

    #[test]
    fn regex_is_case_insensitive() {
        let e = EnumHandle::new(["usd", "a.b"]).unwrap();
        let re = e.regex().unwrap();
        assert!(re.is_match("price in USD"));
        assert!(re.is_match("a.b"));
        assert!(!re.is_match("axb"));
    }

    #[test]
    fn empty_enum() {
        let e = EnumHandle::new(Vec::<String>::new()).unwrap();
        assert!(e.is_empty());
        assert!(e.regex().is_none());
        assert_eq!(e.default_value(), None);
        assert_eq!(e.field_with_default().default, None);
    }

    #[test]
    fn explicit_default_must_be_member() {
        let e = EnumHandle::with_default(["a", "b"], "b").unwrap();
        assert_eq!(e.default_value(), Some("b"));

        let err = EnumHandle::with_default(["a", "b"], "c").unwrap_err();
        assert_eq!(err, ConfigError::UnknownEnumDefault { value: "c".into() });
    }

    #[test]
    fn schema_helpers() {
        let e = EnumHandle::new(["short_text", "long_text"]).unwrap();

        let with_default = e.field_with_default();
        assert_eq!(with_default.static_default(), Some(&json!("short_text")));
        assert_eq!(with_default.one_of, vec![json!("short_text"), json!("long_text")]);
        assert_eq!(with_default.meta.field_type, Some(FieldType::SelectOne));
        assert_eq!(
            with_default.meta.label_by_enum_option.get("long_text"),
            Some(&"Long text".to_string())
        );

        assert!(e.defined_field().has_test("defined"));
        assert!(e.optional_field().tests.is_empty());
        assert_eq!(e.optional_field().default, None);
    }

    #[test]
    fn labels_can_be_overridden() {
        let e = EnumHandle::new(["usd", "eur"]).unwrap();
        let field = e.with_labels(e.defined_field(), [("usd".to_string(), "US Dollar".to_string())]);
        assert_eq!(field.meta.label_by_enum_option["usd"], "US Dollar");
        assert_eq!(field.meta.label_by_enum_option["eur"], "Eur");
    }

    #[test]
    fn sentence_case_examples() {
        assert_eq!(sentence_case("in_review"), "In review");
        assert_eq!(sentence_case("activeUser"), "Active user");
        assert_eq!(sentence_case(""), "");
    }
}
