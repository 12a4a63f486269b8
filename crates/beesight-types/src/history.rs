use serde::{Deserialize, Serialize};

use crate::de;

/// One authentication attempt by a terminal.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct AuthHistory {
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub auth_history_id: String,
    #[serde(default, deserialize_with = "de::i64_lenient")]
    pub project_id: i64,
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub project_name: String,
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub api_key: String,
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub terminal_id: String,
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub terminal_name: String,
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub serial_no: String,
    #[serde(default)]
    pub mac_address: Option<String>,
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub action: String,
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub result: String,
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub auth_msg: String,
    #[serde(default, deserialize_with = "de::i64_lenient")]
    pub app_id: i64,
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub app_name: String,
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub app_version: String,
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub authenticate_at: String,
}

impl AuthHistory {
    pub fn app_label(&self) -> String {
        if self.app_version.is_empty() {
            self.app_name.clone()
        } else {
            format!("{} v{}", self.app_name, self.app_version)
        }
    }
}

/// Query for `GET /auth/histories` and the listing endpoints that share its
/// `page` / `search` / `limit` parameters.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl ListQuery {
    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page.max(1)),
            ..Default::default()
        }
    }

    pub fn with_search(mut self, search: &str) -> Self {
        let search = search.trim();
        self.search = (!search.is_empty()).then(|| search.to_string());
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_search_is_omitted() {
        let query = ListQuery::page(0).with_search("   ");
        assert_eq!(query.page, Some(1));
        assert_eq!(query.search, None);
        let json = serde_json::to_value(&query).unwrap();
        assert!(json.get("search").is_none());
    }

    #[test]
    fn app_label_includes_version() {
        let record = AuthHistory {
            app_name: "Viewer".into(),
            app_version: "1.2".into(),
            ..Default::default()
        };
        assert_eq!(record.app_label(), "Viewer v1.2");
    }
}
