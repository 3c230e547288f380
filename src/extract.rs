//! Ability payload extraction from generated text.
//!
//! The generator is asked for bare JSON but routinely wraps it in Markdown
//! fences, prefixes a stray `json` token, or adds commentary around it.
//! Extraction strips that noise, slices from the first `{` to the last `}`
//! and parses the slice.

use crate::ability::AbilitySpec;
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;
use thiserror::Error;

/// Opening fence with an optional language tag, e.g. "```json".
static OPENING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```[A-Za-z0-9_+.-]*[ \t]*\r?\n?").expect("Invalid opening fence regex"));

/// Closing fence at the very end of the text.
static CLOSING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n?```\s*$").expect("Invalid closing fence regex"));

/// A bare language hint with no fence, e.g. "json\n{...}".
static BARE_HINT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^json\b\s*").expect("Invalid language hint regex"));

/// Why no abilities could be recovered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// No `{ ... }` span in the text.
    #[error("no structured payload found in the response")]
    NoPayload,

    /// A `{ ... }` span exists but is not valid JSON.
    #[error("structured payload could not be parsed: {0}")]
    InvalidJson(String),

    /// Valid JSON, but without an `abilities` array.
    #[error("structured payload has no \"abilities\" list")]
    MissingAbilities,
}

#[derive(Deserialize)]
struct Payload {
    abilities: Option<Vec<AbilitySpec>>,
}

/// Strip fences and hints, then return the `{ ... }` slice.
pub fn extract_payload(raw: &str) -> Result<&str, ExtractError> {
    let mut text = raw.trim();

    if let Some(m) = OPENING_FENCE.find(text) {
        text = &text[m.end()..];
        if let Some(m) = CLOSING_FENCE.find(text) {
            text = &text[..m.start()];
        }
        text = text.trim();
    }

    if let Some(m) = BARE_HINT.find(text) {
        text = &text[m.end()..];
    }

    let start = text.find('{').ok_or(ExtractError::NoPayload)?;
    let end = text.rfind('}').ok_or(ExtractError::NoPayload)?;
    if end < start {
        return Err(ExtractError::NoPayload);
    }

    Ok(&text[start..=end])
}

/// Recover the ordered ability list from raw generated text.
pub fn parse_abilities(raw: &str) -> Result<Vec<AbilitySpec>, ExtractError> {
    let slice = extract_payload(raw)?;

    let payload: Payload =
        serde_json::from_str(slice).map_err(|e| ExtractError::InvalidJson(e.to_string()))?;

    payload.abilities.ok_or(ExtractError::MissingAbilities)
}
