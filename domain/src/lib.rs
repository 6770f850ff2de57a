//! Domain layer for code-explainer
//!
//! This crate contains the core value objects and pure logic of the
//! gateway. It has no dependencies on infrastructure or presentation
//! concerns and performs no I/O.
//!
//! # Core Concepts
//!
//! ## Candidate models
//!
//! Every inbound request is served by an ordered list of candidate
//! OpenRouter models. The list is policy, not data: the first model to
//! produce a successful reply wins and later entries are never consulted.
//!
//! ## Payload immutability
//!
//! A [`ChatPayload`] is assembled exactly once per inbound request. The
//! call orchestrator substitutes each candidate model into it; the payload
//! itself never changes between attempts.

pub mod chat;
pub mod completion;
pub mod core;
pub mod prompt;

// Re-export commonly used types
pub use chat::{ChatPayload, Message, Modality, Role};
pub use completion::{extract_image, extract_text};
pub use core::{
    error::DomainError,
    language::Language,
    model::Model,
    snippet::{CodeSnippet, MAX_SNIPPET_CHARS},
};
pub use prompt::PromptTemplate;
