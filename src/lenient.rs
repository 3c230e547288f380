//! Lenient scalar deserialization.
//!
//! Generated JSON and hand-edited form files both mix numbers and strings
//! freely (`"dc": 16` vs `"dc": "16"`, `power_level: 7` vs `power_level: "7"`).
//! Models also hand back lists or small objects where a sentence was asked
//! for. These helpers accept any of that and normalize it to text, so one odd
//! field never costs the whole response.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Seq(Vec<Value>),
    Other(Value),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Str(s) => s,
            Scalar::Int(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
            Scalar::Seq(items) => join_values(&items),
            Scalar::Other(value) => value_text(&value),
        }
    }

    /// List entries; a lone value counts as a one-entry list.
    fn into_items(self) -> Vec<String> {
        match self {
            Scalar::Seq(items) => items
                .iter()
                .filter(|v| !v.is_null())
                .map(value_text)
                .collect(),
            other => vec![other.into_text()],
        }
    }
}

/// Strings stay unquoted, arrays are joined with ", ", objects are compact JSON.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => join_values(items),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn join_values(items: &[Value]) -> String {
    items
        .iter()
        .filter(|v| !v.is_null())
        .map(value_text)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Deserialize an optional scalar into `Option<String>`.
///
/// `null` and a missing field both become `None`. Use together with
/// `#[serde(default)]`.
pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Scalar>::deserialize(deserializer)?;
    Ok(value.map(Scalar::into_text))
}

/// Deserialize a list into `Vec<String>`; `null` becomes empty and a single
/// value becomes a one-entry list.
pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Scalar>::deserialize(deserializer)?;
    Ok(value.map(Scalar::into_items).unwrap_or_default())
}
