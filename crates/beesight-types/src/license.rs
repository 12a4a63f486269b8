use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::de;
use crate::form::ValidationErrors;

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct License {
    #[serde(deserialize_with = "de::i64_lenient")]
    pub license_id: i64,
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub name: String,
    #[serde(default)]
    pub license_key: Value,
    #[serde(default, deserialize_with = "de::i64_lenient")]
    pub used: i64,
    #[serde(default, deserialize_with = "de::i64_lenient")]
    pub limit: i64,
    #[serde(default)]
    pub expire_at: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub supplier: Option<Supplier>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Supplier {
    #[serde(default, deserialize_with = "de::opt_i64_lenient")]
    pub suppliers_id: Option<i64>,
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub suppliers_name: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

impl License {
    /// Decodes `license_key`, which arrives as a pair array, a JSON-encoded
    /// string of either shape, or a plain object.
    pub fn key_pairs(&self) -> Vec<KeyValue> {
        key_pairs(&self.license_key)
    }

    pub fn supplier_label(&self) -> String {
        match &self.supplier {
            Some(Supplier {
                suppliers_id: Some(id),
                suppliers_name,
            }) => format!("{id}:{suppliers_name}"),
            Some(s) => s.suppliers_name.clone(),
            None => String::new(),
        }
    }
}

pub fn key_pairs(value: &Value) -> Vec<KeyValue> {
    match value {
        Value::Array(items) => items.iter().filter_map(pair_from_item).collect(),
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| KeyValue {
                key: k.clone(),
                value: scalar_text(v),
            })
            .collect(),
        Value::String(raw) if raw.trim().is_empty() => Vec::new(),
        Value::String(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(inner @ (Value::Array(_) | Value::Object(_))) => key_pairs(&inner),
            _ => vec![KeyValue {
                key: "license_key".into(),
                value: raw.clone(),
            }],
        },
        _ => Vec::new(),
    }
}

fn pair_from_item(item: &Value) -> Option<KeyValue> {
    let obj = item.as_object()?;
    Some(KeyValue {
        key: obj.get("key").map(scalar_text).unwrap_or_default(),
        value: obj.get("value").map(scalar_text).unwrap_or_default(),
    })
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Create/update payload for a license.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct LicenseForm {
    pub name: String,
    pub supplier_id: Option<i64>,
    pub limit: i64,
    pub used: i64,
    pub expire_at: Option<String>,
    pub description: String,
    pub license_key: Vec<KeyValue>,
}

impl From<&License> for LicenseForm {
    fn from(license: &License) -> Self {
        Self {
            name: license.name.clone(),
            supplier_id: license.supplier.as_ref().and_then(|s| s.suppliers_id),
            limit: license.limit,
            used: license.used,
            expire_at: license
                .expire_at
                .as_deref()
                .map(crate::date_part)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
            description: license.description.clone().unwrap_or_default(),
            license_key: license.key_pairs(),
        }
    }
}

impl LicenseForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("name", &self.name, "License name is required");
        if self.limit < 0 {
            errors.add("limit", "Limit must not be negative");
        }
        if self.used < 0 {
            errors.add("used", "Used count must not be negative");
        }
        if self.license_key.iter().any(|kv| kv.key.trim().is_empty()) {
            errors.add("license_key", "Every license key row needs a key");
        }
        errors.into_result()
    }
}
