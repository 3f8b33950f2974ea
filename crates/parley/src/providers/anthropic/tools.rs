use serde_json::{json, Map, Value};

use super::content::{content_blocks, format_content};
use crate::models::message::Message;
use crate::models::tool::{Tool, ToolCall, ToolRegistry};

pub const TOOL_USE: &str = "tool_use";
pub const TOOL_RESULT: &str = "tool_result";

/// Convert internal Tool format to Anthropic's tool specification
pub fn tool_to_spec(tool: &Tool) -> Value {
    json!({
        "name": tool.name,
        "description": tool.description,
        "input_schema": tool.parameters,
    })
}

/// Convert every registered tool, in registration order
pub fn tools_to_spec(tools: &ToolRegistry) -> Vec<Value> {
    tools.iter().map(tool_to_spec).collect()
}

/// An assistant message carrying its text followed by one `tool_use` block per call
pub fn format_tool_call(message: &Message) -> Value {
    let mut content = content_blocks(message.content());
    content.extend(message.tool_calls().iter().map(tool_use_block));

    json!({
        "role": "assistant",
        "content": content,
    })
}

/// A user message carrying the `tool_result` block, or `None` when the message has no result
pub fn format_tool_result(message: &Message) -> Option<Value> {
    let result = message.tool_result()?;

    let mut block = json!({
        "type": TOOL_RESULT,
        "tool_use_id": result.tool_call_id,
        "content": format_content(&result.content),
    });
    if result.is_error {
        block["is_error"] = json!(true);
    }

    Some(json!({
        "role": "user",
        "content": [block],
    }))
}

pub fn tool_use_block(tool_call: &ToolCall) -> Value {
    json!({
        "type": TOOL_USE,
        "id": tool_call.id,
        "name": tool_call.name,
        "input": tool_call.arguments,
    })
}

/// Select the `tool_use` blocks from a response's content
pub fn find_tool_uses(blocks: &[Value]) -> Vec<&Value> {
    blocks
        .iter()
        .filter(|block| block.get("type").and_then(Value::as_str) == Some(TOOL_USE))
        .collect()
}

/// Decode the `tool_use` blocks of a response into tool calls, in order
pub fn parse_tool_calls(blocks: &[Value]) -> Vec<ToolCall> {
    find_tool_uses(blocks)
        .into_iter()
        .map(|block| {
            let id = block["id"].as_str().unwrap_or_default();
            let name = block["name"].as_str().unwrap_or_default();
            let arguments = block
                .get("input")
                .filter(|input| !input.is_null())
                .cloned()
                .unwrap_or_else(|| Value::Object(Map::new()));
            ToolCall::new(id, name, arguments)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::content::Content;

    #[test]
    fn test_tool_to_spec() {
        let tool = Tool::new(
            "get_weather",
            "Get the weather for a location",
            json!({
                "type": "object",
                "properties": {"location": {"type": "string"}},
                "required": ["location"]
            }),
        );

        assert_eq!(
            tool_to_spec(&tool),
            json!({
                "name": "get_weather",
                "description": "Get the weather for a location",
                "input_schema": {
                    "type": "object",
                    "properties": {"location": {"type": "string"}},
                    "required": ["location"]
                }
            })
        );
    }

    #[test]
    fn test_tools_to_spec_empty() {
        assert!(tools_to_spec(&ToolRegistry::new()).is_empty());
    }

    #[test]
    fn test_format_tool_call() {
        let message = Message::assistant("Let me check.")
            .with_tool_call(ToolCall::new("toolu_1", "get_weather", json!({"location": "Paris"})))
            .with_tool_call(ToolCall::new("toolu_2", "get_time", json!({})));

        assert_eq!(
            format_tool_call(&message),
            json!({
                "role": "assistant",
                "content": [
                    {"type": "text", "text": "Let me check."},
                    {
                        "type": "tool_use",
                        "id": "toolu_1",
                        "name": "get_weather",
                        "input": {"location": "Paris"}
                    },
                    {"type": "tool_use", "id": "toolu_2", "name": "get_time", "input": {}}
                ]
            })
        );
    }

    #[test]
    fn test_format_tool_call_without_text() {
        let message = Message::assistant(Content::empty())
            .with_tool_call(ToolCall::new("toolu_1", "get_time", json!({})));

        let spec = format_tool_call(&message);
        assert_eq!(spec["content"].as_array().unwrap().len(), 1);
        assert_eq!(spec["content"][0]["type"], "tool_use");
    }

    #[test]
    fn test_format_tool_result() {
        let message = Message::tool("toolu_1", "Sunny, 22C");

        assert_eq!(
            format_tool_result(&message),
            Some(json!({
                "role": "user",
                "content": [{
                    "type": "tool_result",
                    "tool_use_id": "toolu_1",
                    "content": [{"type": "text", "text": "Sunny, 22C"}]
                }]
            }))
        );
        assert_eq!(format_tool_result(&Message::user("hi")), None);
    }

    #[test]
    fn test_format_tool_error() {
        let message = Message::tool_error("toolu_1", "city not found");
        let spec = format_tool_result(&message).unwrap();
        assert_eq!(spec["content"][0]["is_error"], json!(true));
    }

    #[test]
    fn test_parse_tool_calls_filters_and_decodes() {
        let blocks = vec![
            json!({"type": "text", "text": "Checking"}),
            json!({
                "type": "tool_use",
                "id": "toolu_1",
                "name": "get_weather",
                "input": {"location": "Paris"}
            }),
            json!({"type": "thinking", "thinking": "hmm"}),
            json!({"type": "tool_use", "id": "toolu_2", "name": "get_time"}),
        ];

        assert_eq!(find_tool_uses(&blocks).len(), 2);
        assert_eq!(
            parse_tool_calls(&blocks),
            vec![
                ToolCall::new("toolu_1", "get_weather", json!({"location": "Paris"})),
                ToolCall::new("toolu_2", "get_time", json!({})),
            ]
        );
    }

    #[test]
    fn test_tool_call_round_trip() {
        let call = ToolCall::new("toolu_42", "lookup", json!({"query": "rust", "limit": 3}));
        let message = Message::assistant(Content::empty()).with_tool_call(call.clone());

        let wire = format_tool_call(&message);
        let blocks = wire["content"].as_array().unwrap();

        assert_eq!(parse_tool_calls(blocks), vec![call]);
    }
}
