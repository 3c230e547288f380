//! Ability data model.
//!
//! `AbilitySpec` is whatever the generator produced for one ability. Every
//! field is optional because the generator is a free-text model, not a strict
//! API; missing values render as [`PLACEHOLDER`] instead of failing.

use crate::lenient;
use crate::prompt::PowerLevel;
use serde::{Deserialize, Serialize};

/// Shown wherever a field was not provided.
pub const PLACEHOLDER: &str = "-";

/// Table-top mechanics for a single ability.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mechanics {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub action_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub range: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub target: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub save: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub dc: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub damage: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub effect: Option<String>,
}

/// One generated ability.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilitySpec {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub role: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub summary: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub description: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub combo_logic: Option<String>,

    /// `null` and a missing object both deserialize to empty mechanics; any
    /// other non-object value is kept as the effect text.
    #[serde(default, deserialize_with = "mechanics_or_default")]
    pub mechanics: Mechanics,
}

fn mechanics_or_default<'de, D>(deserializer: D) -> Result<Mechanics, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(Mechanics::default()),
        Some(value @ serde_json::Value::Object(_)) => {
            Mechanics::deserialize(value).map_err(serde::de::Error::custom)
        }
        Some(other) => Ok(Mechanics {
            effect: Some(lenient::value_text(&other)).filter(|t| !t.trim().is_empty()),
            ..Mechanics::default()
        }),
    }
}

impl AbilitySpec {
    /// Name to show for the ability at `index` (0-based).
    pub fn display_name(&self, index: usize) -> String {
        match non_blank(&self.name) {
            Some(name) => name.to_string(),
            None => format!("Ability {}", index + 1),
        }
    }
}

/// Returns the trimmed value, or `None` for missing/blank text.
pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Returns the value or the placeholder dash.
pub fn or_dash(value: &Option<String>) -> &str {
    non_blank(value).unwrap_or(PLACEHOLDER)
}

/// A named, persisted snapshot of generated abilities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilitySet {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub abilities: Vec<AbilitySpec>,
    #[serde(default)]
    pub power_level: PowerLevel,
}
