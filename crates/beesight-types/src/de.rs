//! Lenient field decoders. The backend is not consistent about sending
//! numbers as numbers or strings as strings, and uses `null` freely.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::form::ValidationErrors;

/// Key for messages the backend sent without naming a field.
pub const GENERAL_ERRORS: &str = "_";

pub fn string_lenient<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

pub fn u32_lenient<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => match n.as_u64() {
            Some(v) => u32::try_from(v).unwrap_or(0),
            None => n
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= f64::from(u32::MAX))
                .map(|f| f as u32)
                .unwrap_or(0),
        },
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

pub fn i64_lenient<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_i64().unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

pub fn opt_i64_lenient<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// The envelope's `errors` member. A field map becomes field errors; `[]`,
/// `{}` and `null` mean none; a bare message or a list of messages is kept
/// under [`GENERAL_ERRORS`].
pub fn validation_errors_lenient<'de, D>(deserializer: D) -> Result<Option<ValidationErrors>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let mut errors = ValidationErrors::new();
    match value {
        Some(Value::Object(map)) => {
            for (field, messages) in map {
                for message in messages_of(messages) {
                    errors.add(&field, message);
                }
            }
        }
        Some(other) => {
            for message in messages_of(other) {
                errors.add(GENERAL_ERRORS, message);
            }
        }
        None => {}
    }
    Ok((!errors.is_empty()).then_some(errors))
}

fn messages_of(value: Value) -> Vec<String> {
    match value {
        Value::Null => Vec::new(),
        Value::String(s) if s.trim().is_empty() => Vec::new(),
        Value::String(s) => vec![s],
        Value::Array(items) => items.into_iter().flat_map(messages_of).collect(),
        Value::Object(map) => map.into_iter().flat_map(|(_, v)| messages_of(v)).collect(),
        other => vec![other.to_string()],
    }
}
