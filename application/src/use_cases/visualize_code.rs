//! Visualize Code use case.
//!
//! Same flow as [`ExplainCodeUseCase`](super::explain_code::ExplainCodeUseCase)
//! with an image output modality: the payload requests an image and the
//! reply is probed for a URL or base64 image instead of text.

use crate::orchestrator::{CallPolicy, FallbackOrchestrator, OrchestratorError};
use crate::ports::chat_transport::ChatTransport;
use crate::ports::exchange_logger::{ExchangeEvent, ExchangeLogger, NoExchangeLogger};
use explainer_domain::{
    ChatPayload, CodeSnippet, DomainError, Language, Modality, Model, PromptTemplate,
    extract_image,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during visualization.
#[derive(Error, Debug)]
pub enum VisualizeError {
    #[error(transparent)]
    Invalid(#[from] DomainError),

    #[error(transparent)]
    Upstream(#[from] OrchestratorError),

    /// The winning model replied 2xx but none of the known image field
    /// locations held anything.
    #[error("Model returned no image")]
    EmptyContent,
}

/// Input for the [`VisualizeCodeUseCase`].
#[derive(Debug, Clone)]
pub struct VisualizeInput {
    pub code: String,
    pub language: Option<String>,
}

/// A successful visualization.
#[derive(Debug, Clone)]
pub struct Visualization {
    /// Image URL or `data:` URI, exactly as extracted from the reply.
    pub image: String,
    pub model: Model,
}

/// Use case for rendering a diagram of a pasted snippet.
pub struct VisualizeCodeUseCase {
    orchestrator: FallbackOrchestrator,
    policy: CallPolicy,
    exchange_logger: Arc<dyn ExchangeLogger>,
}

impl VisualizeCodeUseCase {
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

    /// Execute the visualization flow.
    pub async fn execute(&self, input: VisualizeInput) -> Result<Visualization, VisualizeError> {
        let snippet = CodeSnippet::new(input.code)?;
        let language: Language = match input.language.as_deref() {
            Some(tag) => tag.parse().unwrap_or_default(),
            None => Language::default(),
        };

        info!(language = %language, chars = snippet.chars(), "Visualizing snippet");

        let payload =
            ChatPayload::from_user_prompt(PromptTemplate::visualization(&language, &snippet))
                .with_modalities(vec![Modality::Image]);

        let reply = self.orchestrator.call(&payload, &self.policy).await?;
        let image = extract_image(&reply.body).ok_or(VisualizeError::EmptyContent)?;

        debug!(model = %reply.model, bytes = image.len(), "Image extracted");

        self.exchange_logger.log(ExchangeEvent::new(
            "visualize",
            serde_json::json!({
                "language": language.as_str(),
                "code_chars": snippet.chars(),
                "model": reply.model.as_str(),
                "bytes": image.len(),
            }),
        ));

        Ok(Visualization {
            image,
            model: reply.model,
        })
    }
}
