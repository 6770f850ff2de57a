//! Explain Code use case.
//!
//! Validates the inbound snippet, builds the explanation prompt, runs the
//! fallback orchestrator, and extracts the explanation text from the raw
//! reply. Validation failures never reach the transport.

use crate::orchestrator::{CallPolicy, FallbackOrchestrator, OrchestratorError};
use crate::ports::chat_transport::ChatTransport;
use crate::ports::exchange_logger::{ExchangeEvent, ExchangeLogger, NoExchangeLogger};
use explainer_domain::{
    ChatPayload, CodeSnippet, DomainError, Language, Model, PromptTemplate, extract_text,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during explanation.
#[derive(Error, Debug)]
pub enum ExplainError {
    /// Inbound contract violation — reported synchronously, never retried.
    #[error(transparent)]
    Invalid(#[from] DomainError),

    /// The orchestrator failed terminally (no candidate produced a reply).
    #[error(transparent)]
    Upstream(#[from] OrchestratorError),

    /// The winning model replied 2xx but carried no extractable text.
    /// Distinct from a network failure.
    #[error("Model returned no usable content")]
    EmptyContent,
}

/// Input for the [`ExplainCodeUseCase`].
#[derive(Debug, Clone)]
pub struct ExplainInput {
    /// Raw submitted code, validated into a [`CodeSnippet`].
    pub code: String,
    /// Language tag for the prompt's code fence; defaults to `cpp`.
    pub language: Option<String>,
}

/// A successful explanation.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Markdown explanation text.
    pub markdown: String,
    /// The candidate model that produced it.
    pub model: Model,
}

/// Use case for explaining a pasted snippet.
pub struct ExplainCodeUseCase {
    orchestrator: FallbackOrchestrator,
    policy: CallPolicy,
    exchange_logger: Arc<dyn ExchangeLogger>,
}

impl ExplainCodeUseCase {
    pub fn new(transport: Arc<dyn ChatTransport>, policy: CallPolicy) -> Self {
        Self {
            orchestrator: FallbackOrchestrator::new(transport),
            policy,
            exchange_logger: Arc::new(NoExchangeLogger),
        }
    }

    /// Create with an exchange logger.
    pub fn with_exchange_logger(mut self, logger: Arc<dyn ExchangeLogger>) -> Self {
        self.exchange_logger = logger;
        self
    }

    /// Execute the explanation flow.
    pub async fn execute(&self, input: ExplainInput) -> Result<Explanation, ExplainError> {
        let snippet = CodeSnippet::new(input.code)?;
        let language: Language = match input.language.as_deref() {
            Some(tag) => tag.parse().unwrap_or_default(),
            None => Language::default(),
        };

        info!(language = %language, chars = snippet.chars(), "Explaining snippet");

        // Built once, immutable across every candidate attempt.
        let payload =
            ChatPayload::from_user_prompt(PromptTemplate::explanation(&language, &snippet));

        let reply = self.orchestrator.call(&payload, &self.policy).await?;
        let markdown = extract_text(&reply.body).ok_or(ExplainError::EmptyContent)?;

        debug!(model = %reply.model, bytes = markdown.len(), "Explanation extracted");

        self.exchange_logger.log(ExchangeEvent::new(
            "explain",
            serde_json::json!({
                "language": language.as_str(),
                "code_chars": snippet.chars(),
                "model": reply.model.as_str(),
                "bytes": markdown.len(),
            }),
        ));

        Ok(Explanation {
            markdown,
            model: reply.model,
        })
    }
}
