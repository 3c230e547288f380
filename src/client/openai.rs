//! Direct Responses API backend.
//!
//! Does what the app's proxy does server-side: sends the fixed DM-assistant
//! system prompt plus the user prompt, then digs the generated text out of
//! whichever response shape comes back.

use super::model::SYSTEM_PROMPT;
use super::{GenerationBackend, GenerationError, GenerationRequest, http_client, transport_error};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Calls `POST {base}/v1/responses` with a bearer key.
#[derive(Clone)]
pub struct OpenAiBackend {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    input: [InputMessage<'a>; 2],
}

#[derive(Serialize)]
struct InputMessage<'a> {
    role: &'a str,
    content: &'a str,
}

impl OpenAiBackend {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, GenerationError> {
        Ok(Self {
            client: http_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }
}

#[async_trait]
impl GenerationBackend for OpenAiBackend {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| GenerationError::Upstream {
            status: None,
            message: "OPENAI_ERROR: missing API key".to_string(),
        })?;

        let body = ResponsesRequest {
            model: request.model().as_str(),
            input: [
                InputMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                InputMessage {
                    role: "user",
                    content: request.prompt_text(),
                },
            ],
        };

        let response = self
            .client
            .post(format!("{}/v1/responses", self.base_url))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        debug!(status = status.as_u16(), "provider responded");

        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            let message = body
                .pointer("/error/message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            return Err(GenerationError::Upstream {
                status: Some(status.as_u16()),
                message: format!("OPENAI_ERROR: {}", message),
            });
        }

        let body: Value = response.json().await.map_err(transport_error)?;
        Ok(output_text(&body))
    }
}

/// Pull generated text out of a Responses API body.
///
/// Joins the `output_text` parts of every `message` item in `output`, skipping
/// `reasoning` and tool items. A top-level `output_text` string (added by SDK
/// wrappers and some gateways) wins when present. With no text anywhere the
/// whole body is pretty-printed so extraction can report it.
fn output_text(body: &Value) -> String {
    if let Some(text) = body.get("output_text").and_then(Value::as_str)
        && !text.is_empty()
    {
        return text.to_string();
    }

    let parts: Vec<&str> = body
        .get("output")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter(|item| item_type(item).is_none_or(|t| t == "message"))
        .filter_map(|item| item.get("content").and_then(Value::as_array))
        .flatten()
        .filter(|part| item_type(part).is_none_or(|t| t == "output_text" || t == "text"))
        .filter_map(part_text)
        .collect();

    if !parts.is_empty() {
        return parts.concat();
    }

    serde_json::to_string_pretty(body).unwrap_or_default()
}

fn item_type(value: &Value) -> Option<&str> {
    value.get("type").and_then(Value::as_str)
}

/// `text` is a plain string on the wire; older payloads wrap it as `{value}`.
fn part_text(part: &Value) -> Option<&str> {
    let text = part.get("text")?;
    text.as_str()
        .or_else(|| text.get("value").and_then(Value::as_str))
}
