//! Forgiving field decoders for model-produced documents.
//!
//! Model output routinely puts numbers where strings belong, strings where
//! lists belong, and `null` everywhere. Each decoder here accepts whatever
//! arrives and coerces it to the declared type, falling back to the type's
//! default instead of failing.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;

// ============================================================================
// Value helpers
// ============================================================================

/// Render a scalar as text; lists are joined with newlines
pub fn as_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.trim().to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::Array(items) => items
            .iter()
            .map(as_text)
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n"),
        Value::Object(_) => value.to_string(),
    }
}

/// Non-negative integer from a number or from the first digits of a string
pub fn as_int(value: &Value) -> Option<u32> {
    match value {
        Value::Number(number) => number
            .as_u64()
            .or_else(|| number.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .and_then(|n| u32::try_from(n).ok()),
        Value::String(text) => extract_int(text),
        _ => None,
    }
}

/// First run of ASCII digits in `text` ("about 5 days" -> 5)
pub fn extract_int(text: &str) -> Option<u32> {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

fn as_bool(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map(|n| n != 0.0).unwrap_or(false),
        Value::String(text) => matches!(
            text.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "y" | "1"
        ),
        _ => false,
    }
}

fn as_text_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(as_text)
            .filter(|text| !text.is_empty())
            .collect(),
        Value::String(text) => text
            .split([',', '\n'])
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(String::from)
            .collect(),
        Value::Null => Vec::new(),
        other => vec![as_text(other)],
    }
}

// ============================================================================
// Field deserializers
// ============================================================================

pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(as_text(&Value::deserialize(deserializer)?))
}

pub fn string_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(as_text_list(&Value::deserialize(deserializer)?))
}

pub fn int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(as_int(&Value::deserialize(deserializer)?).unwrap_or_default())
}

pub fn opt_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    Ok(as_int(&Value::deserialize(deserializer)?))
}

pub fn boolean<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(as_bool(&Value::deserialize(deserializer)?))
}

/// Map of name to hours; entries without a number count as zero
pub fn int_map<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<String, u32>, D::Error> {
    let map = match Value::deserialize(deserializer)? {
        Value::Object(map) => map
            .into_iter()
            .map(|(key, value)| (key, as_int(&value).unwrap_or_default()))
            .collect(),
        _ => BTreeMap::new(),
    };
    Ok(map)
}

/// Map of category to names (tech stack)
pub fn string_list_map<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<String, Vec<String>>, D::Error> {
    let map = match Value::deserialize(deserializer)? {
        Value::Object(map) => map
            .into_iter()
            .map(|(key, value)| (key, as_text_list(&value)))
            .collect(),
        // A flat list is kept under a single category
        Value::Array(items) => {
            let names = as_text_list(&Value::Array(items));
            if names.is_empty() {
                BTreeMap::new()
            } else {
                BTreeMap::from([("Other".to_string(), names)])
            }
        }
        _ => BTreeMap::new(),
    };
    Ok(map)
}

/// Nested object; anything that does not decode becomes the default value
pub fn object<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    if !value.is_object() {
        return Ok(T::default());
    }
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// List of objects; elements that fail to decode are dropped
pub fn seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(decode_items(Value::deserialize(deserializer)?))
}

/// Decode each element of an array value, skipping the ones that fail
pub fn decode_items<T: DeserializeOwned>(value: Value) -> Vec<T> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        Value::Null => Vec::new(),
        single => serde_json::from_value(single).ok().into_iter().collect(),
    }
}
