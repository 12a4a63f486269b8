use serde::{Deserialize, Serialize};

use crate::de;
use crate::form::ValidationErrors;

/// Row of the project listing.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Project {
    #[serde(deserialize_with = "de::i64_lenient")]
    pub project_id: i64,
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub name: String,
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub api_key: String,
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub status: String,
    #[serde(default, deserialize_with = "de::u32_lenient")]
    pub activated_count: u32,
    #[serde(default, deserialize_with = "de::u32_lenient")]
    pub terminal_limit: u32,
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub open_at: String,
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub close_at: String,
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub description: String,
}

impl Project {
    /// Case-insensitive substring match on the project name.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        query.is_empty() || self.name.to_lowercase().contains(&query.to_lowercase())
    }
}

pub fn filter_projects(projects: &[Project], query: &str) -> Vec<Project> {
    projects.iter().filter(|p| p.matches(query)).cloned().collect()
}

/// Full project record from `GET /projects/:id`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ProjectDetail {
    #[serde(default, deserialize_with = "de::opt_i64_lenient")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "de::opt_i64_lenient")]
    pub project_id: Option<i64>,
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub name: String,
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub customer_code: String,
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub api_key: String,
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub password: String,
    #[serde(default, deserialize_with = "de::u32_lenient")]
    pub terminal_limit: u32,
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub open_at: String,
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub close_at: String,
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub status: String,
    #[serde(rename = "type", default, deserialize_with = "de::string_lenient")]
    pub kind: String,
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub prefix: String,
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub description: String,
    #[serde(default, deserialize_with = "de::u32_lenient")]
    pub activated_count: u32,
}

impl ProjectDetail {
    pub fn key(&self) -> Option<i64> {
        self.project_id.or(self.id)
    }
}

pub const PROJECT_STATUSES: &[&str] = &["active", "inactive", "closed"];

/// Application category codes the backend stores in `type`.
pub const PROJECT_KINDS: &[(&str, &str)] = &[
    ("1", "sales"),
    ("2", "rent"),
    ("3", "demo"),
    ("4", "development"),
];

/// Create/update payload for a project.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ProjectForm {
    pub name: String,
    pub customer_code: String,
    pub api_key: String,
    pub password: String,
    pub terminal_limit: u32,
    pub open_at: String,
    pub close_at: String,
    pub status: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub prefix: String,
    pub description: String,
}

impl Default for ProjectForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            customer_code: String::new(),
            api_key: String::new(),
            password: String::new(),
            terminal_limit: 3,
            open_at: "2025-01-01".into(),
            close_at: "2025-12-31".into(),
            status: "active".into(),
            kind: "1".into(),
            prefix: String::new(),
            description: String::new(),
        }
    }
}

impl From<&ProjectDetail> for ProjectForm {
    fn from(detail: &ProjectDetail) -> Self {
        Self {
            name: detail.name.clone(),
            customer_code: detail.customer_code.clone(),
            api_key: detail.api_key.clone(),
            password: detail.password.clone(),
            terminal_limit: detail.terminal_limit,
            open_at: crate::date_part(&detail.open_at).to_string(),
            close_at: crate::date_part(&detail.close_at).to_string(),
            status: if detail.status.is_empty() {
                "active".into()
            } else {
                detail.status.clone()
            },
            kind: if detail.kind.is_empty() {
                "1".into()
            } else {
                detail.kind.clone()
            },
            prefix: detail.prefix.clone(),
            description: detail.description.clone(),
        }
    }
}

impl ProjectForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("name", &self.name, "Project name is required");
        errors.require("customer_code", &self.customer_code, "Customer code is required");
        errors.require("api_key", &self.api_key, "API key is required");
        errors.require("password", &self.password, "Authentication password is required");
        if self.terminal_limit < 1 {
            errors.add("terminal_limit", "Terminal limit must be 1 or more");
        }
        errors.require("open_at", &self.open_at, "Start date is required");
        errors.require("prefix", &self.prefix, "Terminal prefix is required");
        // ISO dates compare correctly as strings.
        if !self.open_at.is_empty() && !self.close_at.is_empty() && self.close_at < self.open_at {
            errors.add("close_at", "End date must not be before the start date");
        }
        errors.into_result()
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Terminal {
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub terminal_id: String,
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub name: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub project_name: String,
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub serial_no: String,
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub os: String,
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub os_ver: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub app: Option<TerminalApp>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct TerminalApp {
    #[serde(default, deserialize_with = "de::i64_lenient")]
    pub app_id: i64,
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(id: i64, name: &str) -> Project {
        Project {
            project_id: id,
            name: name.into(),
            ..Default::default()
        }
    }

    #[test]
    fn filter_is_case_insensitive() {
        let list = vec![project(1, "Alpha Retail"), project(2, "beta"), project(3, "ALPHA demo")];
        let hits: Vec<i64> = filter_projects(&list, "alpha").iter().map(|p| p.project_id).collect();
        assert_eq!(hits, vec![1, 3]);
        assert_eq!(filter_projects(&list, "").len(), 3);
    }

    #[test]
    fn default_form_needs_identity_fields() {
        let errors = ProjectForm::default().validate().unwrap_err();
        for field in ["name", "customer_code", "api_key", "password", "prefix"] {
            assert!(errors.first(field).is_some(), "{field} should be required");
        }
        assert!(errors.first("terminal_limit").is_none());
    }

    #[test]
    fn rejects_zero_limit_and_inverted_period() {
        let form = ProjectForm {
            name: "p".into(),
            customer_code: "c".into(),
            api_key: "k".into(),
            password: "pw".into(),
            prefix: "T".into(),
            terminal_limit: 0,
            open_at: "2025-06-01".into(),
            close_at: "2025-01-01".into(),
            ..Default::default()
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.first("terminal_limit").is_some());
        assert!(errors.first("close_at").is_some());
    }

    #[test]
    fn detail_prefills_form_with_dates_only() {
        let detail: ProjectDetail = serde_json::from_str(
            r#"{"id":7,"name":"P","customer_code":"C1","api_key":"K","password":"pw",
                "terminal_limit":"5","open_at":"2025-01-01 00:00:00","close_at":null,
                "status":"inactive","type":2,"prefix":"PX","description":null,"activated_count":1}"#,
        )
        .unwrap();
        assert_eq!(detail.key(), Some(7));
        let form = ProjectForm::from(&detail);
        assert_eq!(form.open_at, "2025-01-01");
        assert_eq!(form.close_at, "");
        assert_eq!(form.kind, "2");
        assert_eq!(form.terminal_limit, 5);
        assert_eq!(form.status, "inactive");
    }

    #[test]
    fn payload_uses_type_key() {
        let json = serde_json::to_value(ProjectForm::default()).unwrap();
        assert_eq!(json["type"], "1");
        assert_eq!(json["terminal_limit"], 3);
    }
}
