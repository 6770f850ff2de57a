//! Request handlers for the gateway API

use crate::http::AppState;
use crate::http::dto::{
    CodeRequest, ExplainResponse, HealthResponse, VisualizeMeta, VisualizeResponse,
};
use crate::http::error::ApiError;
use axum::Json;
use axum::extract::State;
use explainer_application::{ExplainInput, Explanation, VisualizeInput, Visualization};

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
    })
}

/// `POST /explain`
pub async fn explain(
    State(state): State<AppState>,
    Json(request): Json<CodeRequest>,
) -> Result<Json<ExplainResponse>, ApiError> {
    let input = ExplainInput {
        code: request.code,
        language: request.language,
    };

    let explanation: Explanation = if state.detach_on_disconnect {
        // Finish the upstream exchange even if the client goes away. An
        // aborted handler future would drop the call mid-flight and waste
        // the billed attempt.
        let use_case = state.explain.clone();
        tokio::spawn(async move { use_case.execute(input).await })
            .await
            .map_err(|join_error| ApiError::Internal(join_error.to_string()))??
    } else {
        state.explain.execute(input).await?
    };

    Ok(Json(ExplainResponse {
        success: true,
        explanation: explanation.markdown,
        model: explanation.model,
    }))
}

/// `POST /visualize`
pub async fn visualize(
    State(state): State<AppState>,
    Json(request): Json<CodeRequest>,
) -> Result<Json<VisualizeResponse>, ApiError> {
    let input = VisualizeInput {
        code: request.code,
        language: request.language,
    };

    let visualization: Visualization = if state.detach_on_disconnect {
        let use_case = state.visualize.clone();
        tokio::spawn(async move { use_case.execute(input).await })
            .await
            .map_err(|join_error| ApiError::Internal(join_error.to_string()))??
    } else {
        state.visualize.execute(input).await?
    };

    Ok(Json(VisualizeResponse {
        success: true,
        image: visualization.image,
        meta: VisualizeMeta {
            model: visualization.model,
        },
    }))
}
