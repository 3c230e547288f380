//! Config loading, validation, and utility operations.

use super::model::Config;
use crate::client::ModelName;
use crate::error::{ForgeError, Result};
use std::path::Path;

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(ForgeError::UserError)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            ForgeError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load config, treating a missing file as all defaults.
    ///
    /// A file that exists but fails to parse or validate is still an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty file means all defaults.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| ForgeError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            ForgeError::UserError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `timeout_secs` must be positive
    /// - `endpoint` and `openai_base_url` must be non-empty
    /// - `api_key_env` must be non-empty
    ///
    /// `default_model` is not validated here: unknown models are replaced
    /// with the default at request time.
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(ForgeError::UserError(
                "config validation failed: timeout_secs must be greater than 0".to_string(),
            ));
        }

        for (field, value) in [
            ("endpoint", &self.endpoint),
            ("openai_base_url", &self.openai_base_url),
            ("api_key_env", &self.api_key_env),
        ] {
            if value.trim().is_empty() {
                return Err(ForgeError::UserError(format!(
                    "config validation failed: {} must not be empty",
                    field
                )));
            }
        }

        Ok(())
    }

    /// The configured default model, resolved against the allow-list.
    pub fn model(&self) -> ModelName {
        ModelName::from_str_or_default(&self.default_model)
    }
}
