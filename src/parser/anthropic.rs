//! Anthropic Messages API response parser.
//!
//! The only place that knows the vendor's field names and stop-reason
//! vocabulary; everything past this module sees normalized types.

use serde_json::Value;
use tracing::debug;

use crate::error::{CaminaError, ErrorDetails, ProviderErrorKind, Result};
use crate::types::{ContentBlock, FinishReason, GenerateResult, ThinkingContent, ToolInvocation, Usage};

use super::ResponseParser;

/// Parser for the Anthropic Messages API wire format.
pub struct AnthropicResponseParser;

impl ResponseParser for AnthropicResponseParser {
    fn provider_name(&self) -> &str {
        "anthropic"
    }

    fn parse_success_response(&self, response: &Value) -> Result<GenerateResult> {
        let blocks = response
            .get("content")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                CaminaError::MalformedResponse(
                    "missing or non-array `content` field".to_string(),
                )
            })?;

        let mut content = Vec::with_capacity(blocks.len());
        for block in blocks {
            content.push(parse_content_block(block)?);
        }

        let finish_reason = match response.get("stop_reason").and_then(Value::as_str) {
            Some(reason) => parse_stop_reason(reason),
            None => FinishReason::Other,
        };

        Ok(GenerateResult {
            content,
            finish_reason,
            usage: parse_usage(response.get("usage")),
            id: response.get("id").and_then(Value::as_str).map(str::to_string),
            model: response
                .get("model")
                .and_then(Value::as_str)
                .map(str::to_string),
        })
    }

    fn parse_error_response(&self, status_code: u16, body: &str) -> Result<GenerateResult> {
        let kind = ProviderErrorKind::from_status(status_code);
        let (message, details) = decode_error_body(body);

        debug!(
            provider = "anthropic",
            status = status_code,
            %kind,
            "provider returned an error response"
        );

        Err(CaminaError::Provider {
            kind,
            status: status_code,
            message: message.unwrap_or_else(|| body.to_string()),
            details,
        })
    }
}

/// Map an Anthropic `stop_reason` string to a [`FinishReason`].
///
/// Total: every input yields a value; strings outside the documented set
/// (including future vendor additions) map to [`FinishReason::Other`].
fn parse_stop_reason(reason: &str) -> FinishReason {
    match reason {
        "end_turn" | "stop_sequence" => FinishReason::Stop,
        "max_tokens" => FinishReason::Length,
        "tool_use" => FinishReason::ToolCalls,
        "refusal" => FinishReason::ContentFilter,
        other => {
            debug!(provider = "anthropic", reason = other, "unrecognized stop reason");
            FinishReason::Other
        }
    }
}

fn parse_content_block(block: &Value) -> Result<ContentBlock> {
    let kind = block.get("type").and_then(Value::as_str).ok_or_else(|| {
        CaminaError::MalformedResponse(
            "content block missing string `type` discriminator".to_string(),
        )
    })?;

    match kind {
        "text" => Ok(ContentBlock::Text {
            text: require_str(block, "text")?.to_string(),
        }),
        "tool_use" => Ok(ContentBlock::ToolUse(ToolInvocation {
            id: require_str(block, "id")?.to_string(),
            name: require_str(block, "name")?.to_string(),
            input: block
                .get("input")
                .cloned()
                .unwrap_or_else(|| Value::Object(Default::default())),
        })),
        "thinking" => Ok(ContentBlock::Thinking(ThinkingContent {
            thinking: require_str(block, "thinking")?.to_string(),
            signature: block
                .get("signature")
                .and_then(Value::as_str)
                .map(str::to_string),
        })),
        "redacted_thinking" => Ok(ContentBlock::RedactedThinking {
            data: require_str(block, "data")?.to_string(),
        }),
        other => {
            debug!(provider = "anthropic", kind = other, "unrecognized content block kind");
            Ok(ContentBlock::Opaque {
                kind: other.to_string(),
                data: block.clone(),
            })
        }
    }
}

fn require_str<'a>(block: &'a Value, field: &str) -> Result<&'a str> {
    block.get(field).and_then(Value::as_str).ok_or_else(|| {
        CaminaError::MalformedResponse(format!(
            "content block field `{field}` missing or not a string"
        ))
    })
}

fn parse_usage(usage: Option<&Value>) -> Usage {
    let Some(usage) = usage else {
        return Usage::default();
    };
    let input_tokens = usage
        .get("input_tokens")
        .and_then(Value::as_u64)
        .unwrap_or(0) as u32;
    let output_tokens = usage
        .get("output_tokens")
        .and_then(Value::as_u64)
        .unwrap_or(0) as u32;
    Usage {
        input_tokens,
        output_tokens,
        total_tokens: input_tokens + output_tokens,
        cache_read_tokens: usage
            .get("cache_read_input_tokens")
            .and_then(Value::as_u64)
            .map(|v| v as u32),
        cache_creation_tokens: usage
            .get("cache_creation_input_tokens")
            .and_then(Value::as_u64)
            .map(|v| v as u32),
    }
}

/// Pull a message and structured details out of a vendor error body.
///
/// Handles both the enveloped shape
/// `{"type":"error","error":{"type":...,"message":...}}` and the flat
/// `{"type":...,"message":...}` shape; a body that is not JSON at all
/// yields `(None, None)` and the caller falls back to the raw text.
fn decode_error_body(body: &str) -> (Option<String>, Option<ErrorDetails>) {
    let Ok(doc) = serde_json::from_str::<Value>(body) else {
        return (None, None);
    };

    let inner = doc.get("error").unwrap_or(&doc);
    let message = inner
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string);
    let provider_code = inner
        .get("type")
        .and_then(Value::as_str)
        .filter(|t| *t != "error")
        .map(str::to_string);
    let request_id = doc
        .get("request_id")
        .and_then(Value::as_str)
        .map(str::to_string);

    let details = if provider_code.is_some() || request_id.is_some() {
        Some(ErrorDetails {
            provider_code,
            request_id,
        })
    } else {
        None
    };
    (message, details)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stop_reason_table_is_exhaustive_for_documented_values() {
        let cases = [
            ("end_turn", FinishReason::Stop),
            ("stop_sequence", FinishReason::Stop),
            ("max_tokens", FinishReason::Length),
            ("tool_use", FinishReason::ToolCalls),
            ("refusal", FinishReason::ContentFilter),
        ];
        for (reason, expected) in cases {
            assert_eq!(parse_stop_reason(reason), expected, "reason {reason:?}");
        }
    }

    #[test]
    fn unknown_stop_reasons_fall_back_to_other() {
        for reason in ["pause_turn", "model_context_window_exceeded", "", "END_TURN"] {
            assert_eq!(parse_stop_reason(reason), FinishReason::Other);
        }
    }

    #[test]
    fn missing_content_field_is_malformed() {
        let parser = AnthropicResponseParser;
        let err = parser
            .parse_success_response(&json!({"stop_reason": "end_turn"}))
            .unwrap_err();
        assert!(matches!(err, CaminaError::MalformedResponse(_)));
    }

    #[test]
    fn non_array_content_field_is_malformed() {
        let parser = AnthropicResponseParser;
        let err = parser
            .parse_success_response(&json!({"content": "not an array"}))
            .unwrap_err();
        assert!(matches!(err, CaminaError::MalformedResponse(_)));
    }

    #[test]
    fn empty_content_array_is_not_an_error() {
        let parser = AnthropicResponseParser;
        let result = parser
            .parse_success_response(&json!({"content": [], "stop_reason": "end_turn"}))
            .unwrap();
        assert!(result.content.is_empty());
        assert_eq!(result.finish_reason, FinishReason::Stop);
    }

    #[test]
    fn text_block_without_text_field_is_malformed() {
        let parser = AnthropicResponseParser;
        let err = parser
            .parse_success_response(&json!({"content": [{"type": "text"}]}))
            .unwrap_err();
        assert!(matches!(err, CaminaError::MalformedResponse(_)));
    }

    #[test]
    fn unknown_block_kind_degrades_to_opaque() {
        let parser = AnthropicResponseParser;
        let result = parser
            .parse_success_response(&json!({
                "content": [{"type": "server_tool_use", "id": "st_1", "name": "web_search"}],
                "stop_reason": "end_turn",
            }))
            .unwrap();
        match &result.content[0] {
            ContentBlock::Opaque { kind, data } => {
                assert_eq!(kind, "server_tool_use");
                assert_eq!(data["name"], "web_search");
            }
            other => panic!("expected opaque block, got {other:?}"),
        }
    }

    #[test]
    fn thinking_blocks_are_decoded() {
        let parser = AnthropicResponseParser;
        let result = parser
            .parse_success_response(&json!({
                "content": [
                    {"type": "thinking", "thinking": "hmm", "signature": "sig1"},
                    {"type": "redacted_thinking", "data": "opaque-bytes"},
                ],
                "stop_reason": "end_turn",
            }))
            .unwrap();
        assert_eq!(
            result.content[0],
            ContentBlock::Thinking(ThinkingContent {
                thinking: "hmm".to_string(),
                signature: Some("sig1".to_string()),
            })
        );
        assert_eq!(
            result.content[1],
            ContentBlock::RedactedThinking {
                data: "opaque-bytes".to_string()
            }
        );
    }

    #[test]
    fn absent_usage_defaults_to_zero() {
        let parser = AnthropicResponseParser;
        let result = parser
            .parse_success_response(&json!({"content": [], "stop_reason": "end_turn"}))
            .unwrap();
        assert_eq!(result.usage, Usage::default());
    }

    #[test]
    fn usage_includes_cache_token_counts_when_present() {
        let parser = AnthropicResponseParser;
        let result = parser
            .parse_success_response(&json!({
                "content": [],
                "stop_reason": "end_turn",
                "usage": {
                    "input_tokens": 10,
                    "output_tokens": 5,
                    "cache_read_input_tokens": 7,
                },
            }))
            .unwrap();
        assert_eq!(result.usage.input_tokens, 10);
        assert_eq!(result.usage.output_tokens, 5);
        assert_eq!(result.usage.total_tokens, 15);
        assert_eq!(result.usage.cache_read_tokens, Some(7));
        assert_eq!(result.usage.cache_creation_tokens, None);
    }

    #[test]
    fn enveloped_error_body_populates_message_and_details() {
        let parser = AnthropicResponseParser;
        let body = r#"{"type":"error","error":{"type":"overloaded_error","message":"Overloaded"},"request_id":"req_42"}"#;
        let err = parser.parse_error_response(529, body).unwrap_err();
        match err {
            CaminaError::Provider {
                kind,
                status,
                message,
                details,
            } => {
                assert_eq!(kind, ProviderErrorKind::Unavailable);
                assert_eq!(status, 529);
                assert_eq!(message, "Overloaded");
                let details = details.unwrap();
                assert_eq!(details.provider_code.as_deref(), Some("overloaded_error"));
                assert_eq!(details.request_id.as_deref(), Some("req_42"));
            }
            other => panic!("expected provider error, got {other:?}"),
        }
    }

    #[test]
    fn flat_error_body_populates_message() {
        let parser = AnthropicResponseParser;
        let err = parser
            .parse_error_response(429, r#"{"type":"rate_limit_error","message":"Too fast"}"#)
            .unwrap_err();
        match err {
            CaminaError::Provider { kind, message, details, .. } => {
                assert_eq!(kind, ProviderErrorKind::RateLimited);
                assert_eq!(message, "Too fast");
                assert_eq!(
                    details.unwrap().provider_code.as_deref(),
                    Some("rate_limit_error")
                );
            }
            other => panic!("expected provider error, got {other:?}"),
        }
    }

    #[test]
    fn non_json_error_body_uses_raw_text_as_message() {
        let parser = AnthropicResponseParser;
        let err = parser
            .parse_error_response(500, "<html>Internal Server Error</html>")
            .unwrap_err();
        match err {
            CaminaError::Provider { kind, message, details, .. } => {
                assert_eq!(kind, ProviderErrorKind::Unavailable);
                assert_eq!(message, "<html>Internal Server Error</html>");
                assert!(details.is_none());
            }
            other => panic!("expected provider error, got {other:?}"),
        }
    }
}
