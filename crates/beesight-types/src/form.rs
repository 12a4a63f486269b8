use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Field name to messages, as the backend reports validation failures and as
/// the forms report their own checks.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn require(&mut self, field: &str, value: &str, message: &str) {
        if value.trim().is_empty() {
            self.add(field, message);
        }
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn first(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(|m| m.first()).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// Outcome of a create/update/delete submitted from a form. Validation
/// failures travel here as data so the form can show them per field.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ActionReport {
    pub success: bool,
    pub message: Option<String>,
    pub errors: ValidationErrors,
}

impl ActionReport {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            errors: ValidationErrors::new(),
        }
    }

    pub fn rejected(message: Option<String>, errors: ValidationErrors) -> Self {
        Self {
            success: false,
            message,
            errors,
        }
    }

    pub fn invalid(errors: ValidationErrors) -> Self {
        Self::rejected(Some("Please correct the highlighted fields.".into()), errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_flags_blank_values() {
        let mut errors = ValidationErrors::new();
        errors.require("name", "  ", "Name is required");
        errors.require("prefix", "AB", "Prefix is required");
        assert_eq!(errors.first("name"), Some("Name is required"));
        assert_eq!(errors.get("prefix"), None);
        assert!(errors.clone().into_result().is_err());
    }

    #[test]
    fn empty_message_lists_count_as_valid() {
        let errors: ValidationErrors = serde_json::from_str(r#"{"name":[]}"#).unwrap();
        assert!(errors.is_empty());
    }
}
