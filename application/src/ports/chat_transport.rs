//! Chat transport port
//!
//! Defines the interface for issuing a single bounded chat-completion
//! call against the upstream provider. The fallback orchestrator owns
//! candidate ordering, retries, and backoff; an implementation performs
//! exactly one attempt per invocation.

use async_trait::async_trait;
use explainer_domain::{ChatPayload, Model};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during a single upstream call
#[derive(Error, Debug)]
pub enum TransportError {
    /// The upstream signalled that this model is not currently servable:
    /// HTTP 404, HTTP 403, or a body indicating no endpoints exist for it.
    /// Permanent for the model — retrying it wastes the budget.
    #[error("Model not available: {model}: {reason}")]
    ModelUnavailable { model: String, reason: String },

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Upstream returned HTTP {status}: {message}")]
    UpstreamStatus { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed upstream response: {0}")]
    Protocol(String),
}

impl TransportError {
    /// Permanent errors abandon the current model immediately; everything
    /// else is presumed transient and retried within the budget.
    pub fn is_permanent(&self) -> bool {
        matches!(self, TransportError::ModelUnavailable { .. })
    }
}

/// A successful raw reply from the upstream endpoint
///
/// Carries the model that actually served the request so the caller can
/// report which candidate won.
#[derive(Debug, Clone)]
pub struct ChatReply {
    pub model: Model,
    /// Raw response body; content extraction happens at the call site.
    pub body: serde_json::Value,
}

/// Port for one bounded upstream chat-completion call
///
/// Implementations (adapters) live in the infrastructure layer. Tests
/// inject scripted fakes to drive the orchestrator without network I/O.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn complete(
        &self,
        model: &Model,
        payload: &ChatPayload,
        timeout: Duration,
    ) -> Result<ChatReply, TransportError>;
}
