use serde_json::{json, Value};

use super::content::{content_blocks, format_content};
use super::schema::SchemaValidator;
use super::tools::{format_tool_call, format_tool_result, tools_to_spec};
use crate::errors::SchemaViolation;
use crate::logging::{default_logger, SharedLogger};
use crate::models::message::Message;
use crate::models::role::Role;
use crate::models::schema::Schema;
use crate::models::tool::ToolRegistry;
use crate::providers::base::ModelInfo;

pub const DEFAULT_MAX_TOKENS: u32 = 4096;

pub const MULTIPLE_SYSTEM_MESSAGES_WARNING: &str =
    "Anthropic's Claude implementation only supports a single system message. \
     Multiple system messages will be combined into one.";

/// Builds Messages API request bodies
#[derive(Clone)]
pub struct PayloadBuilder {
    logger: SharedLogger,
}

impl Default for PayloadBuilder {
    fn default() -> Self {
        Self::new(default_logger())
    }
}

impl PayloadBuilder {
    pub fn new(logger: SharedLogger) -> Self {
        Self { logger }
    }

    /// Render the request body for a conversation
    ///
    /// System messages are lifted into the top-level `system` field. Optional
    /// fields are only present when they carry something. A schema is
    /// validated before it is attached, and a violation fails the whole build.
    pub fn render_payload(
        &self,
        messages: &[Message],
        tools: &ToolRegistry,
        temperature: Option<f64>,
        model: &ModelInfo,
        stream: bool,
        schema: Option<&Schema>,
    ) -> Result<Value, SchemaViolation> {
        let (system_messages, chat_messages): (Vec<&Message>, Vec<&Message>) =
            messages.iter().partition(|m| m.role() == Role::System);

        let system = self.build_system_content(&system_messages);
        let mut payload = build_base_payload(&chat_messages, model, stream);

        if !tools.is_empty() {
            payload["tools"] = json!(tools_to_spec(tools));
        }
        if let Some(system) = system.filter(|s| !is_blank(s)) {
            payload["system"] = system;
        }
        if let Some(temperature) = temperature {
            payload["temperature"] = json!(temperature);
        }
        if let Some(schema) = schema {
            SchemaValidator::validate(schema)?;
            payload["output_format"] = json!({
                "type": "json_schema",
                "schema": schema.as_value(),
            });
        }

        Ok(payload)
    }

    fn build_system_content(&self, system_messages: &[&Message]) -> Option<Value> {
        match system_messages {
            [] => None,
            [message] => Some(format_content(message.content())),
            messages => {
                self.logger.warn(MULTIPLE_SYSTEM_MESSAGES_WARNING);
                let blocks = messages
                    .iter()
                    .flat_map(|m| content_blocks(m.content()))
                    .collect();
                Some(Value::Array(blocks))
            }
        }
    }
}

fn build_base_payload(chat_messages: &[&Message], model: &ModelInfo, stream: bool) -> Value {
    let messages: Vec<Value> = chat_messages.iter().map(|m| format_message(m)).collect();

    json!({
        "model": model.id,
        "messages": messages,
        "stream": stream,
        "max_tokens": model.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
    })
}

/// Convert one non-system message to its wire form
pub fn format_message(message: &Message) -> Value {
    if message.is_tool_call() {
        return format_tool_call(message);
    }
    if let Some(result) = format_tool_result(message) {
        return result;
    }

    json!({
        "role": convert_role(message.role()),
        "content": format_content(message.content()),
    })
}

fn convert_role(role: Role) -> &'static str {
    match role {
        Role::Tool | Role::User => "user",
        _ => "assistant",
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}
