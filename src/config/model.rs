//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Configuration for fruitforge.
///
/// This struct represents the contents of `<home>/config.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Backend settings
    // =========================================================================
    /// Which backend receives generation requests.
    #[serde(default)]
    pub backend: BackendKind,

    /// URL of the proxy endpoint (used when `backend: proxy`).
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Base URL of the provider API (used when `backend: openai`).
    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,

    /// Name of the environment variable holding the provider API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    // =========================================================================
    // Request settings
    // =========================================================================
    /// Model used when neither the form nor `--model` names one.
    /// Values outside the allow-list fall back to `gpt-4.1-mini`.
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    // =========================================================================
    // Output settings
    // =========================================================================
    /// Default file name for `export`, relative to the current directory.
    #[serde(default = "default_export_file")]
    pub export_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            endpoint: default_endpoint(),
            openai_base_url: default_openai_base_url(),
            api_key_env: default_api_key_env(),
            default_model: default_model(),
            timeout_secs: default_timeout_secs(),
            export_file: default_export_file(),
        }
    }
}
