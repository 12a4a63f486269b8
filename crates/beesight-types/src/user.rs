use serde::{Deserialize, Serialize};

use crate::de;
use crate::form::ValidationErrors;

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct User {
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub user_id: String,
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub name: String,
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub email: String,
}

/// The signed-in operator, as `GET /user` reports it.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct CurrentUser {
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub id: String,
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub login_id: String,
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub name: String,
}

impl CurrentUser {
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.login_id
        } else {
            &self.name
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct UserForm {
    pub name: String,
    pub login_id: String,
    pub password: String,
}

impl UserForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("name", &self.name, "User name is required");
        errors.require("login_id", &self.login_id, "Login ID is required");
        errors.require("password", &self.password, "Password is required");
        errors.into_result()
    }
}

pub fn validate_login(login_id: &str, password: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    errors.require("login_id", login_id, "Login ID is required");
    errors.require("password", password, "Password is required");
    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_user_ids_decode() {
        let user: User = serde_json::from_str(r#"{"user_id":42,"name":"Kim","email":null}"#).unwrap();
        assert_eq!(user.user_id, "42");
        assert_eq!(user.email, "");
    }

    #[test]
    fn display_name_falls_back_to_login() {
        let user = CurrentUser {
            login_id: "admin".into(),
            ..Default::default()
        };
        assert_eq!(user.display_name(), "admin");
    }

    #[test]
    fn login_requires_both_fields() {
        let errors = validate_login("", " ").unwrap_err();
        assert!(errors.first("login_id").is_some());
        assert!(errors.first("password").is_some());
        assert!(validate_login("a", "b").is_ok());
    }

    #[test]
    fn user_form_requires_all_fields() {
        let form = UserForm {
            name: "n".into(),
            ..Default::default()
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.first("name").is_none());
        assert!(errors.first("login_id").is_some());
    }
}
