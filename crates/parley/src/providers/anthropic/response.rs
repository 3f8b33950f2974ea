use serde_json::{Map, Value};

use super::tools::parse_tool_calls;
use crate::errors::MalformedResponse;
use crate::models::message::ParsedMessage;
use crate::models::role::Role;
use crate::providers::base::Usage;

#[derive(Debug, Default, Clone, Copy)]
pub struct ResponseParser;

impl ResponseParser {
    /// Convert a Messages API response body into a [`ParsedMessage`]
    ///
    /// Only the model identifier is required; missing content or usage
    /// fields come back empty rather than failing.
    pub fn parse_completion_response(response: Value) -> Result<ParsedMessage, MalformedResponse> {
        let data = response
            .as_object()
            .ok_or_else(|| MalformedResponse("response body is not a JSON object".to_string()))?;

        let model_id = data
            .get("model")
            .and_then(Value::as_str)
            .ok_or_else(|| MalformedResponse("response has no model identifier".to_string()))?
            .to_string();

        let blocks: &[Value] = data
            .get("content")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        let text = extract_text_content(blocks);
        let tool_calls = parse_tool_calls(blocks);
        let usage = data
            .get("usage")
            .and_then(Value::as_object)
            .map(get_usage)
            .unwrap_or_default();
        let stop_reason = data
            .get("stop_reason")
            .and_then(Value::as_str)
            .map(String::from);

        Ok(ParsedMessage {
            role: Role::Assistant,
            text,
            tool_calls,
            usage,
            model_id,
            stop_reason,
            raw: response,
        })
    }
}

/// Concatenate the text of every `text` block, in order and without separator
pub fn extract_text_content(blocks: &[Value]) -> String {
    blocks
        .iter()
        .filter(|block| block.get("type").and_then(Value::as_str) == Some("text"))
        .filter_map(|block| block.get("text").and_then(Value::as_str))
        .collect()
}

fn get_usage(usage: &Map<String, Value>) -> Usage {
    let count = |key: &str| usage.get(key).and_then(Value::as_u64);

    // Newer responses only report the per-TTL breakdown of cache writes
    let cache_creation_tokens = count("cache_creation_input_tokens").or_else(|| {
        usage
            .get("cache_creation")
            .and_then(Value::as_object)
            .map(|breakdown| breakdown.values().filter_map(Value::as_u64).sum())
    });

    Usage {
        input_tokens: count("input_tokens"),
        output_tokens: count("output_tokens"),
        cached_tokens: count("cache_read_input_tokens"),
        cache_creation_tokens,
    }
}
