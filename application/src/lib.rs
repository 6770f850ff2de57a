//! Application layer for code-explainer
//!
//! This crate contains the use cases, port definitions, and the upstream
//! call orchestrator. It depends only on the domain layer; all I/O goes
//! through the ports defined here.

pub mod orchestrator;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use orchestrator::{CallPolicy, FallbackOrchestrator, OrchestratorError};
pub use ports::{
    chat_transport::{ChatReply, ChatTransport, TransportError},
    exchange_logger::{ExchangeEvent, ExchangeLogger, NoExchangeLogger},
};
pub use use_cases::explain_code::{ExplainCodeUseCase, ExplainError, ExplainInput, Explanation};
pub use use_cases::visualize_code::{
    VisualizeCodeUseCase, VisualizeError, VisualizeInput, Visualization,
};
