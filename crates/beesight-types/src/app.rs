use serde::{Deserialize, Serialize};

use crate::de;
use crate::form::ValidationErrors;

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct App {
    #[serde(deserialize_with = "de::i64_lenient")]
    pub app_id: i64,
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub name: String,
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub status: String,
    #[serde(default)]
    pub licenses: Vec<AppLicense>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct AppLicense {
    #[serde(deserialize_with = "de::i64_lenient")]
    pub license_id: i64,
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub name: String,
}

impl App {
    pub fn license_ids_label(&self) -> Option<String> {
        if self.licenses.is_empty() {
            return None;
        }
        Some(
            self.licenses
                .iter()
                .map(|l| l.license_id.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}

pub const APP_STATUSES: &[&str] = &["active", "inactive"];

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AppForm {
    pub name: String,
    pub version: String,
    pub status: String,
    pub description: String,
    pub license_ids: Vec<i64>,
}

impl Default for AppForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            version: String::new(),
            status: "active".into(),
            description: String::new(),
            license_ids: Vec::new(),
        }
    }
}

impl From<&App> for AppForm {
    fn from(app: &App) -> Self {
        Self {
            name: app.name.clone(),
            version: app.version.clone(),
            status: if app.status.is_empty() {
                "active".into()
            } else {
                app.status.clone()
            },
            description: app.description.clone().unwrap_or_default(),
            license_ids: app.licenses.iter().map(|l| l.license_id).collect(),
        }
    }
}

impl AppForm {
    /// Checks or unchecks a license, keeping ids unique and in click order.
    pub fn toggle_license(&mut self, license_id: i64, checked: bool) {
        let present = self.license_ids.contains(&license_id);
        if checked && !present {
            self.license_ids.push(license_id);
        } else if !checked && present {
            self.license_ids.retain(|id| *id != license_id);
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("name", &self.name, "App name is required");
        errors.require("version", &self.version, "Version is required");
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_keeps_ids_unique() {
        let mut form = AppForm::default();
        form.toggle_license(3, true);
        form.toggle_license(1, true);
        form.toggle_license(3, true);
        assert_eq!(form.license_ids, vec![3, 1]);
        form.toggle_license(3, false);
        form.toggle_license(8, false);
        assert_eq!(form.license_ids, vec![1]);
    }

    #[test]
    fn edit_form_takes_license_ids() {
        let app: App = serde_json::from_str(
            r#"{"app_id":"12","name":"Viewer","version":"2.1","description":null,"status":"",
                "licenses":[{"license_id":4,"name":"Maps"},{"license_id":6,"name":"OCR"}]}"#,
        )
        .unwrap();
        assert_eq!(app.app_id, 12);
        assert_eq!(app.license_ids_label().as_deref(), Some("4, 6"));
        let form = AppForm::from(&app);
        assert_eq!(form.license_ids, vec![4, 6]);
        assert_eq!(form.status, "active");
    }

    #[test]
    fn requires_name_and_version() {
        let errors = AppForm::default().validate().unwrap_err();
        assert!(errors.first("name").is_some());
        assert!(errors.first("version").is_some());
    }
}
