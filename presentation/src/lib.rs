//! Presentation layer for code-explainer
//!
//! This crate contains the HTTP surface (router, handlers, DTOs, and
//! error-to-status mapping) and the CLI definition consumed by the
//! server binary.

pub mod cli;
pub mod http;

// Re-export commonly used types
pub use cli::Cli;
pub use http::{AppState, build_router};
