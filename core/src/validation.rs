//! Declarative checks on submitted form fields.
//!
//! A `Schema` is a list of `FieldRule`s evaluated synchronously against a
//! `FormData`. Failures are split into form-level messages and per-field
//! messages keyed by field name, the shape the error display consumes.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::form::FormData;

/// Minimum number of characters accepted in a comment body.
pub const COMMENT_BODY_MIN_CHARS: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationErrors {
    pub form_errors: Vec<String>,
    pub field_errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn form(message: impl Into<String>) -> Self {
        Self {
            form_errors: vec![message.into()],
            field_errors: BTreeMap::new(),
        }
    }

    pub fn add_field(&mut self, field: &str, message: impl Into<String>) {
        self.field_errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn field(&self, field: &str) -> &[String] {
        self.field_errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.form_errors.is_empty() && self.field_errors.is_empty()
    }
}

/// A required string field with a minimum length in characters.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub name: &'static str,
    pub required_message: &'static str,
    pub min_chars: usize,
    pub too_short_message: &'static str,
}

impl FieldRule {
    fn check(&self, form: &FormData, errors: &mut ValidationErrors) {
        match form.get(self.name) {
            None => errors.add_field(self.name, self.required_message),
            Some(value) if value.chars().count() < self.min_chars => {
                errors.add_field(self.name, self.too_short_message)
            }
            Some(_) => {}
        }
    }
}

#[derive(Debug, Clone)]
pub struct Schema {
    rules: Vec<FieldRule>,
}

impl Schema {
    pub fn new(rules: Vec<FieldRule>) -> Self {
        Self { rules }
    }

    /// Schema for the comment update form.
    pub fn comment() -> Self {
        Self::new(vec![FieldRule {
            name: "body",
            required_message: "Message is required",
            min_chars: COMMENT_BODY_MIN_CHARS,
            too_short_message: "Message is too short",
        }])
    }

    pub fn validate(&self, form: &FormData) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        for rule in &self.rules {
            rule.check(form, &mut errors);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> FormData {
        pairs.iter().copied().collect()
    }

    #[test]
    fn short_body_is_rejected() {
        let errors = Schema::comment()
            .validate(&form(&[("body", "hi")]))
            .unwrap_err();
        assert_eq!(errors.field("body"), ["Message is too short"]);
        assert!(errors.form_errors.is_empty());
    }

    #[test]
    fn empty_body_is_too_short_and_missing_body_is_required() {
        let empty = Schema::comment().validate(&form(&[("body", "")])).unwrap_err();
        assert_eq!(empty.field("body"), ["Message is too short"]);

        let missing = Schema::comment()
            .validate(&form(&[("intent", "comment")]))
            .unwrap_err();
        assert_eq!(missing.field("body"), ["Message is required"]);
    }

    #[test]
    fn boundary_length_counts_characters_not_bytes() {
        assert!(Schema::comment().validate(&form(&[("body", "hello")])).is_ok());
        assert!(Schema::comment().validate(&form(&[("body", "héllo")])).is_ok());
        assert!(Schema::comment().validate(&form(&[("body", "hell")])).is_err());
        // four characters, eight bytes
        assert!(Schema::comment().validate(&form(&[("body", "ありがと")])).is_err());
    }

    #[test]
    fn errors_serialize_in_camel_case() {
        let mut errors = ValidationErrors::form("Failed!");
        errors.add_field("body", "Message is too short");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["formErrors"][0], "Failed!");
        assert_eq!(json["fieldErrors"]["body"][0], "Message is too short");
    }
}
