//! Wire types for the OpenRouter chat-completion endpoint

use explainer_domain::{ChatPayload, Message, Modality, Model};
use serde::Serialize;
use serde_json::Value;

/// Outbound request body: the immutable per-request payload with one
/// candidate model substituted in.
#[derive(Debug, Serialize)]
pub struct CompletionRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [Message],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modalities: Option<&'a [Modality]>,
}

impl<'a> CompletionRequest<'a> {
    pub fn new(model: &'a Model, payload: &'a ChatPayload) -> Self {
        Self {
            model: model.as_str(),
            messages: payload.messages(),
            modalities: payload.modalities(),
        }
    }
}

/// Peek at an error object embedded in a response body.
///
/// OpenRouter reports some failures inside a 200 body as
/// `{"error": {"code": ..., "message": ...}}`. Such a body must not reach
/// content extraction as if it were a reply.
pub fn embedded_error_message(body: &Value) -> Option<String> {
    let error = body.get("error")?;
    if error.is_null() {
        return None;
    }
    Some(
        error
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .unwrap_or_else(|| error.to_string()),
    )
}

/// Check whether an upstream error message is the "no endpoints" marker
/// for a model that is not currently servable.
pub fn is_no_endpoints_message(message: &str) -> bool {
    message.to_ascii_lowercase().contains("no endpoints")
}
