//! Pulls the generated text out of a provider response.
//!
//! The provider's response schema differs between models and invocation
//! methods, so the body is inspected as a generic [`Value`] by an ordered
//! list of extractors. The first one that yields non-empty text wins.

use serde_json::Value;

pub const NO_CONTENT: &str = "No content returned from model.";

type Extractor = fn(&Value) -> Option<String>;

const EXTRACTORS: &[Extractor] = &[
    candidate_output_string,
    candidate_output_first_string,
    candidate_output_first_content,
    candidate_output_first_text,
    candidate_content_parts_text,
    top_level_output,
    top_level_text,
];

/// Returns the model's text, falling back to the serialized body and then to
/// [`NO_CONTENT`]. Null and the empty string count as no body at all.
pub fn extract_text(body: &Value) -> String {
    match body {
        Value::Null => return NO_CONTENT.to_string(),
        Value::String(s) if s.trim().is_empty() => return NO_CONTENT.to_string(),
        _ => {}
    }
    EXTRACTORS
        .iter()
        .find_map(|extract| extract(body))
        .or_else(|| serde_json::to_string(body).ok().filter(|s| !s.is_empty()))
        .unwrap_or_else(|| NO_CONTENT.to_string())
}

fn first_candidate(body: &Value) -> Option<&Value> {
    body.get("candidates")?.get(0)
}

fn first_output_item(body: &Value) -> Option<&Value> {
    first_candidate(body)?.get("output")?.as_array()?.first()
}

fn non_empty_str(value: &Value) -> Option<String> {
    value.as_str().filter(|s| !s.is_empty()).map(str::to_string)
}

/// Strings as-is; structured values rendered as JSON text.
fn any_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => serde_json::to_string(other).ok(),
    }
}

fn candidate_output_string(body: &Value) -> Option<String> {
    non_empty_str(first_candidate(body)?.get("output")?)
}

fn candidate_output_first_string(body: &Value) -> Option<String> {
    non_empty_str(first_output_item(body)?)
}

fn candidate_output_first_content(body: &Value) -> Option<String> {
    any_text(first_output_item(body)?.get("content")?)
}

fn candidate_output_first_text(body: &Value) -> Option<String> {
    any_text(first_output_item(body)?.get("text")?)
}

fn candidate_content_parts_text(body: &Value) -> Option<String> {
    non_empty_str(first_candidate(body)?.pointer("/content/parts/0/text")?)
}

fn top_level_output(body: &Value) -> Option<String> {
    non_empty_str(body.get("output")?)
}

fn top_level_text(body: &Value) -> Option<String> {
    non_empty_str(body.get("text")?)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn candidate_output_string() {
        let body = json!({ "candidates": [{ "output": "x" }] });
        assert_eq!(extract_text(&body), "x");
    }

    #[test]
    fn candidate_output_list_of_strings() {
        let body = json!({ "candidates": [{ "output": ["first", "second"] }] });
        assert_eq!(extract_text(&body), "first");
    }

    #[test]
    fn candidate_output_list_with_content_or_text() {
        let body = json!({ "candidates": [{ "output": [{ "content": "from content" }] }] });
        assert_eq!(extract_text(&body), "from content");

        let body = json!({ "candidates": [{ "output": [{ "text": "from text" }] }] });
        assert_eq!(extract_text(&body), "from text");
    }

    #[test]
    fn content_wins_over_text_in_output_items() {
        let body = json!({ "candidates": [{ "output": [{ "content": "c", "text": "t" }] }] });
        assert_eq!(extract_text(&body), "c");
    }

    #[test]
    fn structured_output_content_is_rendered_as_json() {
        let body = json!({ "candidates": [{ "output": [{ "content": { "a": 1 } }] }] });
        assert_eq!(extract_text(&body), r#"{"a":1}"#);
    }

    #[test]
    fn generate_content_shape() {
        let body = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "y" }], "role": "model" },
                "finishReason": "STOP"
            }]
        });
        assert_eq!(extract_text(&body), "y");
    }

    #[test]
    fn candidate_shapes_beat_top_level_fields() {
        let body = json!({
            "candidates": [{ "content": { "parts": [{ "text": "nested" }] } }],
            "output": "top",
            "text": "top text"
        });
        assert_eq!(extract_text(&body), "nested");
    }

    #[test]
    fn empty_candidate_output_falls_through() {
        let body = json!({
            "candidates": [{ "output": "", "content": { "parts": [{ "text": "y" }] } }]
        });
        assert_eq!(extract_text(&body), "y");
    }

    #[test]
    fn top_level_output_then_text() {
        assert_eq!(extract_text(&json!({ "output": "o", "text": "t" })), "o");
        assert_eq!(extract_text(&json!({ "text": "t" })), "t");
    }

    #[test]
    fn unshaped_body_is_serialized() {
        assert_eq!(extract_text(&json!({})), "{}");
        assert_eq!(
            extract_text(&json!({ "promptFeedback": { "blockReason": "SAFETY" } })),
            r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#
        );
    }

    #[test]
    fn null_body_yields_sentinel() {
        assert_eq!(extract_text(&Value::Null), NO_CONTENT);
    }

    #[test]
    fn empty_string_body_yields_sentinel() {
        assert_eq!(extract_text(&json!("")), NO_CONTENT);
        assert_eq!(extract_text(&json!("   ")), NO_CONTENT);
    }

    #[test]
    fn plain_string_body_is_serialized_with_quotes() {
        assert_eq!(extract_text(&json!("hello")), r#""hello""#);
    }
}
