//! Backend for the app's own generation endpoint.

use super::{GenerationBackend, GenerationError, GenerationRequest, http_client, transport_error};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// POSTs `{prompt, model}` and reads `{result}` / `{error}`.
#[derive(Clone)]
pub struct ProxyBackend {
    client: Client,
    endpoint: String,
}

#[derive(Serialize)]
struct ProxyRequest<'a> {
    prompt: &'a str,
    model: &'a str,
}

#[derive(Deserialize, Default)]
struct ProxyResponse {
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ProxyBackend {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, GenerationError> {
        Ok(Self {
            client: http_client(timeout)?,
            endpoint: endpoint.to_string(),
        })
    }
}

#[async_trait]
impl GenerationBackend for ProxyBackend {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let body = ProxyRequest {
            prompt: request.prompt_text(),
            model: request.model().as_str(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        debug!(status = status.as_u16(), endpoint = %self.endpoint, "proxy responded");

        if !status.is_success() {
            // The error body is optional; fall back to the status code.
            let parsed: ProxyResponse = response.json().await.unwrap_or_default();
            let message = parsed
                .error
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            return Err(GenerationError::Upstream {
                status: Some(status.as_u16()),
                message,
            });
        }

        let parsed: ProxyResponse = response.json().await.map_err(transport_error)?;
        Ok(parsed.result.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn backend_for(server: &MockServer) -> ProxyBackend {
        ProxyBackend::new(&format!("{}/api/generate", server.uri()), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn sends_prompt_and_model() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .and(body_json(json!({"prompt": "Create 3 abilities", "model": "gpt-4.1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": "{\"abilities\":[]}"})))
            .expect(1)
            .mount(&server)
            .await;

        let req = GenerationRequest::new("Create 3 abilities", "gpt-4.1").unwrap();
        let text = backend_for(&server).generate(&req).await.unwrap();
        assert_eq!(text, "{\"abilities\":[]}");
    }

    #[tokio::test]
    async fn unknown_model_is_sent_as_default() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_json(json!({"prompt": "p", "model": "gpt-4.1-mini"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": "ok"})))
            .expect(1)
            .mount(&server)
            .await;

        let req = GenerationRequest::new("p", "claude-who").unwrap();
        assert_eq!(backend_for(&server).generate(&req).await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn missing_result_is_empty_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let req = GenerationRequest::new("p", "gpt-4.1").unwrap();
        assert_eq!(backend_for(&server).generate(&req).await.unwrap(), "");
    }

    #[tokio::test]
    async fn server_error_message_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(json!({"error": "OPENAI_ERROR: quota exceeded"})),
            )
            .mount(&server)
            .await;

        let req = GenerationRequest::new("p", "gpt-4.1").unwrap();
        let err = backend_for(&server).generate(&req).await.unwrap_err();
        assert_eq!(
            err,
            GenerationError::Upstream {
                status: Some(500),
                message: "OPENAI_ERROR: quota exceeded".into(),
            }
        );
    }

    #[tokio::test]
    async fn status_code_is_used_without_error_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not json"))
            .mount(&server)
            .await;

        let req = GenerationRequest::new("p", "gpt-4.1").unwrap();
        let err = backend_for(&server).generate(&req).await.unwrap_err();
        assert_eq!(
            err,
            GenerationError::Upstream {
                status: Some(404),
                message: "HTTP 404".into(),
            }
        );
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_transport_error() {
        let backend = ProxyBackend::new("http://127.0.0.1:9/api/generate", Duration::from_secs(2)).unwrap();
        let req = GenerationRequest::new("p", "gpt-4.1").unwrap();
        let err = backend.generate(&req).await.unwrap_err();
        assert!(matches!(err, GenerationError::Transport(_)));
    }

    #[tokio::test]
    async fn slow_endpoint_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"result": "late"}))
                    .set_delay(Duration::from_millis(1500)),
            )
            .mount(&server)
            .await;

        let backend = ProxyBackend::new(&server.uri(), Duration::from_millis(200)).unwrap();
        let req = GenerationRequest::new("p", "gpt-4.1").unwrap();
        match backend.generate(&req).await {
            Err(GenerationError::Transport(msg)) => assert!(msg.contains("timed out")),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
