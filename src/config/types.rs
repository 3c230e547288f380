//! Configuration types and defaults for fruitforge.
//!
//! This module defines enums, constants, and default value functions
//! used by the Config struct.

use serde::{Deserialize, Serialize};

/// Which generation backend to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// The app's own `/api/generate` endpoint (default).
    #[default]
    Proxy,
    /// The provider's Responses API, called directly with an API key.
    Openai,
}

// Default value functions for serde
pub(crate) fn default_endpoint() -> String {
    "http://localhost:3000/api/generate".to_string()
}
pub(crate) fn default_openai_base_url() -> String {
    "https://api.openai.com".to_string()
}
pub(crate) fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}
pub(crate) fn default_model() -> String {
    "gpt-4.1-mini".to_string()
}
pub(crate) fn default_timeout_secs() -> u64 {
    120
}
pub(crate) fn default_export_file() -> String {
    crate::export::DEFAULT_EXPORT_FILE.to_string()
}
