//! Generation client.
//!
//! Sends one prompt to a text-generation backend and recovers the ability
//! list from whatever text comes back. Two backends are provided:
//!
//! - [`ProxyBackend`]: the app's own `/api/generate` endpoint
//!   (`{prompt, model}` in, `{result}` or `{error}` out)
//! - [`OpenAiBackend`]: the provider's Responses API called directly
//!
//! Nothing here touches session state; callers decide how to merge the
//! outcome. There is no retry.

mod model;
mod openai;
mod proxy;

pub use model::{ModelName, SYSTEM_PROMPT};
pub use openai::OpenAiBackend;
pub use proxy::ProxyBackend;

use crate::ability::AbilitySpec;
use crate::config::{BackendKind, Config};
use crate::extract::{ExtractError, parse_abilities};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Why a generate or reroll request produced no abilities.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// Missing or blank prompt; rejected before any network call.
    #[error("Missing or invalid prompt")]
    InvalidPrompt,

    /// The request could not be completed (connect, timeout, body read).
    #[error("Request failed: {0}")]
    Transport(String),

    /// The endpoint answered with a failure.
    #[error("Error from API: {message}")]
    Upstream {
        status: Option<u16>,
        message: String,
    },

    /// The endpoint answered but the text held no usable payload.
    #[error("{source}")]
    Extraction {
        source: ExtractError,
        /// Generated text, verbatim, for manual inspection.
        raw: String,
    },
}

impl GenerationError {
    /// Raw generated text, when the failure happened after a response arrived.
    pub fn raw_text(&self) -> Option<&str> {
        match self {
            GenerationError::Extraction { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

/// One submission to the generation endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    prompt_text: String,
    model: ModelName,
}

impl GenerationRequest {
    /// Validate the prompt and resolve the model against the allow-list.
    ///
    /// An unknown model is replaced with the default rather than rejected.
    pub fn new(prompt_text: impl Into<String>, model: &str) -> Result<Self, GenerationError> {
        let prompt_text = prompt_text.into();
        if prompt_text.trim().is_empty() {
            return Err(GenerationError::InvalidPrompt);
        }
        Ok(Self {
            prompt_text,
            model: ModelName::from_str_or_default(model),
        })
    }

    pub fn prompt_text(&self) -> &str {
        &self.prompt_text
    }

    pub fn model(&self) -> ModelName {
        self.model
    }
}

/// A text generator reachable over the network.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Send the request and return the raw generated text.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;
}

/// Call the backend once and extract abilities from the response.
pub async fn run_generation(
    backend: &dyn GenerationBackend,
    request: &GenerationRequest,
) -> Result<Vec<AbilitySpec>, GenerationError> {
    info!(model = %request.model(), prompt_len = request.prompt_text().len(), "sending generation request");

    let raw = backend.generate(request).await?;
    debug!(response_len = raw.len(), "generation response received");

    match parse_abilities(&raw) {
        Ok(abilities) => {
            info!(count = abilities.len(), "extracted abilities");
            Ok(abilities)
        }
        Err(source) => {
            warn!(error = %source, "could not extract abilities from response");
            Err(GenerationError::Extraction { source, raw })
        }
    }
}

/// Build the backend selected in the config.
pub fn backend_from_config(
    config: &Config,
) -> Result<Box<dyn GenerationBackend>, GenerationError> {
    let timeout = Duration::from_secs(config.timeout_secs);
    Ok(match config.backend {
        BackendKind::Proxy => Box::new(ProxyBackend::new(&config.endpoint, timeout)?),
        BackendKind::Openai => Box::new(OpenAiBackend::new(
            &config.openai_base_url,
            std::env::var(&config.api_key_env).ok(),
            timeout,
        )?),
    })
}

/// Shared HTTP client construction.
pub(crate) fn http_client(timeout: Duration) -> Result<reqwest::Client, GenerationError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| GenerationError::Transport(format!("failed to build HTTP client: {}", e)))
}

/// Map a reqwest transport failure to a message.
pub(crate) fn transport_error(err: reqwest::Error) -> GenerationError {
    if err.is_timeout() {
        GenerationError::Transport(format!("request timed out: {}", err))
    } else {
        GenerationError::Transport(err.to_string())
    }
}
