//! Field-level validation results
//!
//! A field carries a set of named rule violations rather than a single
//! scalar error, so several rules (length, required, async uniqueness)
//! can be in force at once. Merge and removal never disturb unrelated
//! flags.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Rule names shared between synchronous draft validation and the
/// asynchronous uniqueness check.
pub mod rules {
    /// Set when the backend reports the identifier as already taken.
    pub const ID_VALIDATION: &str = "idValidation";
    pub const REQUIRED: &str = "required";
    pub const MIN_LENGTH: &str = "minlength";
    pub const MAX_LENGTH: &str = "maxlength";
}

/// Ordered mapping of rule name to violation detail for one field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Value>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a single rule flag, keeping every other flag.
    pub fn set(&mut self, rule: &str, detail: Value) {
        self.0.insert(rule.to_string(), detail);
    }

    /// Remove a single rule flag; other flags are untouched.
    pub fn clear(&mut self, rule: &str) {
        self.0.remove(rule);
    }

    pub fn contains(&self, rule: &str) -> bool {
        self.0.contains_key(rule)
    }

    pub fn get(&self, rule: &str) -> Option<&Value> {
        self.0.get(rule)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The "no errors" state is `None`, not an empty map, matching form
    /// semantics where a clean field has a null error object.
    pub fn into_option(self) -> Option<Self> {
        if self.0.is_empty() {
            None
        } else {
            Some(self)
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn set_merges_without_clobbering_existing_flags() {
        let mut errors = FieldErrors::new();
        errors.set(rules::REQUIRED, json!(true));
        errors.set(rules::ID_VALIDATION, json!(true));

        assert!(errors.contains(rules::REQUIRED));
        assert!(errors.contains(rules::ID_VALIDATION));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn clear_removes_only_the_named_rule() {
        let mut errors = FieldErrors::new();
        errors.set(rules::REQUIRED, json!(true));
        errors.set(rules::ID_VALIDATION, json!(true));

        errors.clear(rules::ID_VALIDATION);

        assert!(errors.contains(rules::REQUIRED));
        assert!(!errors.contains(rules::ID_VALIDATION));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn empty_set_collapses_to_none() {
        let mut errors = FieldErrors::new();
        errors.set(rules::ID_VALIDATION, json!(true));
        errors.clear(rules::ID_VALIDATION);
        assert!(errors.into_option().is_none());
    }

    #[test]
    fn non_empty_set_survives_into_option() {
        let mut errors = FieldErrors::new();
        errors.set(rules::MIN_LENGTH, json!({ "requiredLength": 3 }));
        let kept = errors.into_option().unwrap();
        assert!(kept.contains(rules::MIN_LENGTH));
    }

    #[test]
    fn serializes_as_plain_rule_map() {
        let mut errors = FieldErrors::new();
        errors.set(rules::ID_VALIDATION, json!(true));
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            json!({ "idValidation": true })
        );
    }
}
