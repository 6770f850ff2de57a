//! OpenRouter chat transport adapter
//!
//! reqwest-backed implementation of the
//! [`ChatTransport`](explainer_application::ChatTransport) port. One
//! invocation performs exactly one bounded HTTP call; failures are
//! classified into the permanent/transient taxonomy the orchestrator
//! drives on.

use crate::openrouter::protocol::{
    CompletionRequest, embedded_error_message, is_no_endpoints_message,
};
use async_trait::async_trait;
use explainer_application::{ChatReply, ChatTransport, TransportError};
use explainer_domain::{ChatPayload, Model};
use std::time::Duration;
use tracing::debug;

/// Default OpenRouter API base URL.
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Credential and attribution headers for the OpenRouter API.
#[derive(Debug, Clone)]
pub struct OpenRouterCredentials {
    pub api_key: String,
    /// Optional `HTTP-Referer` attribution header.
    pub referer: Option<String>,
    /// Optional `X-Title` attribution header.
    pub title: Option<String>,
}

/// HTTP adapter for the OpenRouter chat-completion endpoint.
pub struct OpenRouterTransport {
    client: reqwest::Client,
    base_url: String,
    credentials: OpenRouterCredentials,
}

impl OpenRouterTransport {
    pub fn new(credentials: OpenRouterCredentials) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, credentials)
    }

    /// Point the transport at a different endpoint (tests, proxies).
    pub fn with_base_url(base_url: impl Into<String>, credentials: OpenRouterCredentials) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
            credentials,
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl ChatTransport for OpenRouterTransport {
    async fn complete(
        &self,
        model: &Model,
        payload: &ChatPayload,
        timeout: Duration,
    ) -> Result<ChatReply, TransportError> {
        let request = CompletionRequest::new(model, payload);

        let mut builder = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.credentials.api_key)
            .timeout(timeout)
            .json(&request);
        if let Some(referer) = &self.credentials.referer {
            builder = builder.header("HTTP-Referer", referer);
        }
        if let Some(title) = &self.credentials.title {
            builder = builder.header("X-Title", title);
        }

        debug!(model = %model, "Issuing upstream call");

        let response = builder
            .send()
            .await
            .map_err(|error| classify_reqwest_error(error, timeout))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|error| classify_reqwest_error(error, timeout))?;

        if !(200..300).contains(&status) {
            return Err(classify_status(model, status, &text));
        }

        let body: serde_json::Value = serde_json::from_str(&text)
            .map_err(|error| TransportError::Protocol(format!("invalid JSON: {error}")))?;

        // Some failures arrive inside a 200 body.
        if let Some(message) = embedded_error_message(&body) {
            if is_no_endpoints_message(&message) {
                return Err(TransportError::ModelUnavailable {
                    model: model.to_string(),
                    reason: message,
                });
            }
            return Err(TransportError::UpstreamStatus { status, message });
        }

        Ok(ChatReply {
            model: model.clone(),
            body,
        })
    }
}

fn classify_reqwest_error(error: reqwest::Error, timeout: Duration) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout(timeout)
    } else {
        TransportError::Network(error.to_string())
    }
}

/// Map an error status + body to the permanent/transient taxonomy.
///
/// 404 and 403 mean the identifier is not servable for this key; the
/// "no endpoints" body marker means the same regardless of status.
fn classify_status(model: &Model, status: u16, body: &str) -> TransportError {
    if status == 404 || status == 403 || is_no_endpoints_message(body) {
        return TransportError::ModelUnavailable {
            model: model.to_string(),
            reason: format!("HTTP {status}: {}", preview(body)),
        };
    }
    TransportError::UpstreamStatus {
        status,
        message: preview(body).to_string(),
    }
}

/// Bound an error-body preview without splitting a UTF-8 boundary.
fn preview(body: &str) -> &str {
    const MAX_BYTES: usize = 200;
    let body = body.trim();
    if body.len() <= MAX_BYTES {
        return body;
    }
    let mut end = MAX_BYTES;
    while end > 0 && !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn credentials() -> OpenRouterCredentials {
        OpenRouterCredentials {
            api_key: "test-key".to_string(),
            referer: Some("http://localhost:3000".to_string()),
            title: Some("Code Explainer".to_string()),
        }
    }

    fn model() -> Model {
        "mistralai/devstral-small-2505:free".parse().unwrap()
    }

    fn payload() -> ChatPayload {
        ChatPayload::from_user_prompt("Explain this")
    }

    async fn complete(server: &MockServer) -> Result<ChatReply, TransportError> {
        let transport = OpenRouterTransport::with_base_url(server.uri(), credentials());
        transport
            .complete(&model(), &payload(), Duration::from_secs(5))
            .await
    }

    #[tokio::test]
    async fn test_success_returns_raw_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(header("HTTP-Referer", "http://localhost:3000"))
            .and(header("X-Title", "Code Explainer"))
            .and(body_partial_json(json!({
                "model": "mistralai/devstral-small-2505:free",
                "messages": [{"role": "user", "content": "Explain this"}],
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"content": "It returns 0."}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reply = complete(&server).await.unwrap();
        assert_eq!(reply.model, model());
        assert_eq!(
            reply.body["choices"][0]["message"]["content"],
            "It returns 0."
        );
    }

    #[tokio::test]
    async fn test_404_is_model_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error": {"message": "No endpoints found for mistralai/devstral-small-2505:free"}
            })))
            .mount(&server)
            .await;

        let error = complete(&server).await.unwrap_err();
        assert!(matches!(error, TransportError::ModelUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_403_is_model_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .mount(&server)
            .await;

        let error = complete(&server).await.unwrap_err();
        assert!(matches!(error, TransportError::ModelUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_500_is_transient_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
            .mount(&server)
            .await;

        let error = complete(&server).await.unwrap_err();
        assert!(!error.is_permanent());
        match error {
            TransportError::UpstreamStatus { status, .. } => assert_eq!(status, 500),
            other => panic!("Expected UpstreamStatus, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_no_endpoints_body_is_unavailable_regardless_of_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_json(json!({
                "error": {"message": "No endpoints found matching your data policy"}
            })))
            .mount(&server)
            .await;

        let error = complete(&server).await.unwrap_err();
        assert!(error.is_permanent());
    }

    #[tokio::test]
    async fn test_200_with_embedded_no_endpoints_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error": {"code": 404, "message": "No endpoints found"}
            })))
            .mount(&server)
            .await;

        let error = complete(&server).await.unwrap_err();
        assert!(matches!(error, TransportError::ModelUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_200_with_other_embedded_error_is_transient() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error": {"code": 429, "message": "Rate limit exceeded"}
            })))
            .mount(&server)
            .await;

        let error = complete(&server).await.unwrap_err();
        assert!(!error.is_permanent());
    }

    #[tokio::test]
    async fn test_non_json_success_body_is_protocol_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
            .mount(&server)
            .await;

        let error = complete(&server).await.unwrap_err();
        assert!(matches!(error, TransportError::Protocol(_)));
    }

    #[tokio::test]
    async fn test_slow_upstream_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_millis(500))
                    .set_body_json(json!({"choices": []})),
            )
            .mount(&server)
            .await;

        let transport = OpenRouterTransport::with_base_url(server.uri(), credentials());
        let error = transport
            .complete(&model(), &payload(), Duration::from_millis(50))
            .await
            .unwrap_err();

        assert!(matches!(error, TransportError::Timeout(_)));
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let long = "あ".repeat(100); // 300 bytes
        let cut = preview(&long);
        assert!(cut.len() <= 200);
        assert!(cut.chars().all(|c| c == 'あ'));
    }
}
