//! Model allow-list.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// System instructions sent with every direct provider call.
pub const SYSTEM_PROMPT: &str = "You are a creative DM assistant for a One Piece-inspired DnD campaign. \
You build devil-fruit-based abilities that are cinematic AND easy to use at the table.";

/// Models the endpoint is allowed to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ModelName {
    #[default]
    #[serde(rename = "gpt-4.1-mini")]
    Gpt41Mini,
    #[serde(rename = "gpt-4.1")]
    Gpt41,
    #[serde(rename = "gpt-5.1")]
    Gpt51,
}

impl ModelName {
    pub const ALL: [ModelName; 3] = [Self::Gpt41Mini, Self::Gpt41, Self::Gpt51];

    /// Parse a model identifier from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == s.trim())
    }

    /// Resolve against the allow-list, substituting the default for anything else.
    pub fn from_str_or_default(s: &str) -> Self {
        Self::from_str(s).unwrap_or_else(|| {
            if !s.trim().is_empty() {
                warn!(requested = s, fallback = %Self::default(), "model not allowed, using default");
            }
            Self::default()
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gpt41Mini => "gpt-4.1-mini",
            Self::Gpt41 => "gpt-4.1",
            Self::Gpt51 => "gpt-5.1",
        }
    }
}

impl fmt::Display for ModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
