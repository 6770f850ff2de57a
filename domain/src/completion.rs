//! Content extraction from raw upstream replies
//!
//! The upstream response shape varies by model and modality, so extraction
//! is an ordered list of known field locations tried in sequence; the first
//! non-empty hit wins. The lists encode observed upstream quirks, not a
//! stable contract — keep them short.

use serde_json::Value;

type Extractor = fn(&Value) -> Option<String>;

/// Field locations for explanation text, in priority order:
/// `choices[0].message.content` as a plain string, the same field as an
/// array of text parts, then the legacy `choices[0].text`.
const TEXT_EXTRACTORS: &[Extractor] = &[content_string, content_parts, legacy_text];

/// Field locations for a generated image, in priority order:
/// `choices[0].message.images[0]` carrying `image_url.url`, `url`, or
/// `b64_json` (wrapped into a data URI).
const IMAGE_EXTRACTORS: &[Extractor] = &[image_url_nested, image_url_flat, image_b64];

/// Extract explanation text from a raw chat-completion reply.
///
/// Returns `None` when no location yields non-empty text; the caller
/// reports that as a distinct empty-content failure, not a network error.
pub fn extract_text(body: &Value) -> Option<String> {
    TEXT_EXTRACTORS
        .iter()
        .find_map(|extract| extract(body).filter(|s| !s.trim().is_empty()))
}

/// Extract an image URL or data URI from a raw chat-completion reply.
pub fn extract_image(body: &Value) -> Option<String> {
    IMAGE_EXTRACTORS
        .iter()
        .find_map(|extract| extract(body).filter(|s| !s.trim().is_empty()))
}

fn message(body: &Value) -> Option<&Value> {
    body.get("choices")?.get(0)?.get("message")
}

fn content_string(body: &Value) -> Option<String> {
    message(body)?
        .get("content")?
        .as_str()
        .map(str::to_owned)
}

fn content_parts(body: &Value) -> Option<String> {
    let parts = message(body)?.get("content")?.as_array()?;
    let texts: Vec<&str> = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();
    if texts.is_empty() {
        None
    } else {
        Some(texts.join("\n"))
    }
}

fn legacy_text(body: &Value) -> Option<String> {
    body.get("choices")?
        .get(0)?
        .get("text")?
        .as_str()
        .map(str::to_owned)
}

fn first_image(body: &Value) -> Option<&Value> {
    message(body)?.get("images")?.get(0)
}

fn image_url_nested(body: &Value) -> Option<String> {
    first_image(body)?
        .get("image_url")?
        .get("url")?
        .as_str()
        .map(str::to_owned)
}

fn image_url_flat(body: &Value) -> Option<String> {
    first_image(body)?.get("url")?.as_str().map(str::to_owned)
}

fn image_b64(body: &Value) -> Option<String> {
    first_image(body)?
        .get("b64_json")?
        .as_str()
        .map(|b64| format!("data:image/png;base64,{b64}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_content_string() {
        let body = json!({"choices": [{"message": {"content": "It returns 0."}}]});
        assert_eq!(extract_text(&body), Some("It returns 0.".to_string()));
    }

    #[test]
    fn test_content_parts() {
        let body = json!({"choices": [{"message": {"content": [
            {"type": "text", "text": "Part one."},
            {"type": "text", "text": "Part two."}
        ]}}]});
        assert_eq!(extract_text(&body), Some("Part one.\nPart two.".to_string()));
    }

    #[test]
    fn test_legacy_text_field() {
        let body = json!({"choices": [{"text": "Legacy completion."}]});
        assert_eq!(extract_text(&body), Some("Legacy completion.".to_string()));
    }

    #[test]
    fn test_empty_content_falls_through_to_none() {
        let body = json!({"choices": [{"message": {"content": "   "}}]});
        assert_eq!(extract_text(&body), None);
    }

    #[test]
    fn test_no_choices_is_none() {
        assert_eq!(extract_text(&json!({})), None);
        assert_eq!(extract_text(&json!({"choices": []})), None);
    }

    #[test]
    fn test_image_url_nested() {
        let body = json!({"choices": [{"message": {"images": [
            {"image_url": {"url": "https://img.example/diagram.png"}}
        ]}}]});
        assert_eq!(
            extract_image(&body),
            Some("https://img.example/diagram.png".to_string())
        );
    }

    #[test]
    fn test_image_url_flat() {
        let body = json!({"choices": [{"message": {"images": [
            {"url": "https://img.example/flat.png"}
        ]}}]});
        assert_eq!(
            extract_image(&body),
            Some("https://img.example/flat.png".to_string())
        );
    }

    #[test]
    fn test_image_b64_becomes_data_uri() {
        let body = json!({"choices": [{"message": {"images": [
            {"b64_json": "aGVsbG8="}
        ]}}]});
        assert_eq!(
            extract_image(&body),
            Some("data:image/png;base64,aGVsbG8=".to_string())
        );
    }

    #[test]
    fn test_nested_url_wins_over_b64() {
        let body = json!({"choices": [{"message": {"images": [{
            "image_url": {"url": "https://img.example/a.png"},
            "b64_json": "aGVsbG8="
        }]}}]});
        assert_eq!(
            extract_image(&body),
            Some("https://img.example/a.png".to_string())
        );
    }

    #[test]
    fn test_text_reply_has_no_image() {
        let body = json!({"choices": [{"message": {"content": "prose"}}]});
        assert_eq!(extract_image(&body), None);
    }
}
