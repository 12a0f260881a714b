//! Structural validation of inbound Messages payloads.
//!
//! # Responsibilities
//! - Reject malformed bodies before any upstream call
//! - Enforce size bounds on messages, text, and content blocks
//! - Restrict image blocks to an allow-listed MIME set
//!
//! # Design Decisions
//! - Pure function over the parsed JSON value, never panics
//! - Rules run in a fixed order and short-circuit on the first violation
//! - Error strings are user-facing; they name the rule, not internals

use serde_json::Value;

pub const MAX_TEXT_LENGTH: usize = 50_000;
pub const MAX_MESSAGES: usize = 24;
pub const MAX_MODEL_LENGTH: usize = 120;

const ALLOWED_IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/webp", "image/gif"];

/// Validate a Messages request body.
///
/// Returns the first violation's message, or `Ok(())` when the payload is
/// structurally sound.
pub fn validate_messages_payload(body: &Value) -> Result<(), String> {
    let Some(object) = body.as_object() else {
        return Err("Request body must be a JSON object.".to_string());
    };

    let model = object.get("model").and_then(Value::as_str);
    if !model.is_some_and(is_valid_model) {
        return Err("Invalid model value.".to_string());
    }

    let messages = object.get("messages").and_then(Value::as_array);
    let Some(messages) = messages.filter(|m| !m.is_empty() && m.len() <= MAX_MESSAGES) else {
        return Err(format!(
            "messages[] is required and must have 1-{MAX_MESSAGES} items."
        ));
    };

    for message in messages {
        validate_message(message)?;
    }

    Ok(())
}

/// Model identifiers: 1-120 chars from `[A-Za-z0-9._:-]`.
fn is_valid_model(model: &str) -> bool {
    !model.is_empty()
        && model.len() <= MAX_MODEL_LENGTH
        && model
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | ':' | '-'))
}

fn validate_message(message: &Value) -> Result<(), String> {
    let Some(message) = message.as_object() else {
        return Err("Each message must be an object.".to_string());
    };

    let role = message.get("role").and_then(Value::as_str);
    if !matches!(role, Some("user") | Some("assistant")) {
        return Err("Each message role must be user or assistant.".to_string());
    }

    match message.get("content") {
        Some(Value::String(text)) => {
            if !text_length_ok(text) {
                return Err(format!(
                    "Message text must be between 1 and {MAX_TEXT_LENGTH} characters."
                ));
            }
            Ok(())
        }
        Some(Value::Array(blocks)) if !blocks.is_empty() => {
            for block in blocks {
                validate_block(block)?;
            }
            Ok(())
        }
        _ => Err("Message content must be a non-empty string or array.".to_string()),
    }
}

fn validate_block(block: &Value) -> Result<(), String> {
    let object = block.as_object();
    let block_type = object.and_then(|o| o.get("type")).and_then(Value::as_str);
    let (Some(object), Some(block_type)) = (object, block_type) else {
        return Err("Each content block must be an object with a type.".to_string());
    };

    match block_type {
        "text" => {
            let text = object.get("text").and_then(Value::as_str);
            if !text.is_some_and(text_length_ok) {
                return Err(format!(
                    "Text blocks must include 1-{MAX_TEXT_LENGTH} characters of text."
                ));
            }
            Ok(())
        }
        "image" => {
            if !image_source_ok(object.get("source")) {
                return Err("Image blocks must include valid base64 image data.".to_string());
            }
            Ok(())
        }
        _ => Err("Unsupported content block type.".to_string()),
    }
}

fn text_length_ok(text: &str) -> bool {
    let len = text.chars().count();
    len >= 1 && len <= MAX_TEXT_LENGTH
}

fn image_source_ok(source: Option<&Value>) -> bool {
    let Some(source) = source.and_then(Value::as_object) else {
        return false;
    };
    let encoding = source.get("type").and_then(Value::as_str);
    let media_type = source.get("media_type").and_then(Value::as_str);
    let data = source.get("data").and_then(Value::as_str);

    encoding == Some("base64")
        && media_type.is_some_and(|m| ALLOWED_IMAGE_TYPES.contains(&m))
        && data.is_some_and(|d| !d.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_body() -> Value {
        json!({
            "model": "claude-x",
            "messages": [{"role": "user", "content": "hi"}]
        })
    }

    #[test]
    fn minimal_valid_payload_passes() {
        assert!(validate_messages_payload(&valid_body()).is_ok());
    }

    #[test]
    fn non_object_bodies_rejected() {
        for body in [json!(null), json!([1, 2]), json!("text"), json!(42)] {
            let err = validate_messages_payload(&body).unwrap_err();
            assert_eq!(err, "Request body must be a JSON object.");
        }
    }

    #[test]
    fn model_pattern_enforced() {
        let mut body = valid_body();
        body["model"] = json!("bad model!");
        assert_eq!(
            validate_messages_payload(&body).unwrap_err(),
            "Invalid model value."
        );

        body["model"] = json!("claude-3.5_sonnet:latest");
        assert!(validate_messages_payload(&body).is_ok());

        body["model"] = json!("");
        assert!(validate_messages_payload(&body).is_err());

        body["model"] = json!("m".repeat(121));
        assert!(validate_messages_payload(&body).is_err());

        body["model"] = json!(7);
        assert!(validate_messages_payload(&body).is_err());
    }

    #[test]
    fn empty_messages_rejected() {
        let mut body = valid_body();
        body["messages"] = json!([]);
        assert_eq!(
            validate_messages_payload(&body).unwrap_err(),
            "messages[] is required and must have 1-24 items."
        );
    }

    #[test]
    fn too_many_messages_rejected() {
        let message = json!({"role": "user", "content": "hi"});
        let mut body = valid_body();
        body["messages"] = json!(vec![message.clone(); 24]);
        assert!(validate_messages_payload(&body).is_ok());

        body["messages"] = json!(vec![message; 25]);
        assert!(validate_messages_payload(&body).is_err());
    }

    #[test]
    fn role_must_be_user_or_assistant() {
        let mut body = valid_body();
        body["messages"][0]["role"] = json!("system");
        assert_eq!(
            validate_messages_payload(&body).unwrap_err(),
            "Each message role must be user or assistant."
        );

        body["messages"][0]["role"] = json!("assistant");
        assert!(validate_messages_payload(&body).is_ok());
    }

    #[test]
    fn message_must_be_object() {
        let mut body = valid_body();
        body["messages"] = json!(["hi"]);
        assert_eq!(
            validate_messages_payload(&body).unwrap_err(),
            "Each message must be an object."
        );
    }

    #[test]
    fn string_content_length_bounds() {
        let mut body = valid_body();
        body["messages"][0]["content"] = json!("");
        assert!(validate_messages_payload(&body).is_err());

        body["messages"][0]["content"] = json!("x".repeat(MAX_TEXT_LENGTH));
        assert!(validate_messages_payload(&body).is_ok());

        body["messages"][0]["content"] = json!("x".repeat(MAX_TEXT_LENGTH + 1));
        assert!(validate_messages_payload(&body).is_err());
    }

    #[test]
    fn empty_content_array_rejected() {
        let mut body = valid_body();
        body["messages"][0]["content"] = json!([]);
        assert_eq!(
            validate_messages_payload(&body).unwrap_err(),
            "Message content must be a non-empty string or array."
        );

        body["messages"][0]["content"] = json!(null);
        assert!(validate_messages_payload(&body).is_err());
    }

    #[test]
    fn text_block_requires_bounded_text() {
        let mut body = valid_body();
        body["messages"][0]["content"] = json!([{"type": "text", "text": "hello"}]);
        assert!(validate_messages_payload(&body).is_ok());

        body["messages"][0]["content"] = json!([{"type": "text", "text": ""}]);
        assert_eq!(
            validate_messages_payload(&body).unwrap_err(),
            "Text blocks must include 1-50000 characters of text."
        );

        body["messages"][0]["content"] = json!([{"type": "text"}]);
        assert!(validate_messages_payload(&body).is_err());
    }

    #[test]
    fn image_block_mime_allow_list() {
        let image = |media_type: &str| {
            json!([{
                "type": "image",
                "source": {"type": "base64", "media_type": media_type, "data": "abc"}
            }])
        };

        let mut body = valid_body();
        body["messages"][0]["content"] = image("image/png");
        assert!(validate_messages_payload(&body).is_ok());

        body["messages"][0]["content"] = image("image/bmp");
        assert_eq!(
            validate_messages_payload(&body).unwrap_err(),
            "Image blocks must include valid base64 image data."
        );
    }

    #[test]
    fn image_block_requires_base64_source_with_data() {
        let mut body = valid_body();
        body["messages"][0]["content"] = json!([{
            "type": "image",
            "source": {"type": "url", "media_type": "image/png", "data": "abc"}
        }]);
        assert!(validate_messages_payload(&body).is_err());

        body["messages"][0]["content"] = json!([{
            "type": "image",
            "source": {"type": "base64", "media_type": "image/png", "data": ""}
        }]);
        assert!(validate_messages_payload(&body).is_err());

        body["messages"][0]["content"] = json!([{"type": "image"}]);
        assert!(validate_messages_payload(&body).is_err());
    }

    #[test]
    fn unknown_block_type_rejected() {
        let mut body = valid_body();
        body["messages"][0]["content"] = json!([{"type": "tool_use"}]);
        assert_eq!(
            validate_messages_payload(&body).unwrap_err(),
            "Unsupported content block type."
        );
    }

    #[test]
    fn first_violation_wins() {
        // Bad model is checked before bad messages.
        let body = json!({"model": "bad model!", "messages": []});
        assert_eq!(
            validate_messages_payload(&body).unwrap_err(),
            "Invalid model value."
        );
    }

    #[test]
    fn mixed_text_and_image_blocks_pass() {
        let mut body = valid_body();
        body["messages"][0]["content"] = json!([
            {"type": "text", "text": "what is this?"},
            {
                "type": "image",
                "source": {"type": "base64", "media_type": "image/webp", "data": "AAAA"}
            }
        ]);
        assert!(validate_messages_payload(&body).is_ok());
    }
}
