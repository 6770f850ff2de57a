//! Request and response bodies for the gateway API

use explainer_domain::Model;
use serde::{Deserialize, Serialize};

/// Inbound body for `POST /explain` and `POST /visualize`
#[derive(Debug, Deserialize)]
pub struct CodeRequest {
    pub code: String,
    /// Defaults to `cpp` downstream when absent.
    pub language: Option<String>,
}

/// 200 body for `POST /explain`
#[derive(Debug, Serialize)]
pub struct ExplainResponse {
    pub success: bool,
    pub explanation: String,
    pub model: Model,
}

/// 200 body for `POST /visualize`
#[derive(Debug, Serialize)]
pub struct VisualizeResponse {
    pub success: bool,
    /// Image URL or `data:` URI.
    pub image: String,
    pub meta: VisualizeMeta,
}

#[derive(Debug, Serialize)]
pub struct VisualizeMeta {
    pub model: Model,
}

/// 200 body for `GET /health`
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}

/// Error body shared by all failure responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
