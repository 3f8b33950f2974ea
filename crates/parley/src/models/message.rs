use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::content::Content;
use super::role::Role;
use super::tool::{ToolCall, ToolResult};
use crate::providers::base::Usage;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A message to or from an LLM
///
/// The role is fixed when the message is created; builders only add content.
pub struct Message {
    role: Role,
    created: i64,
    content: Content,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    tool_calls: Vec<ToolCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tool_result: Option<ToolResult>,
}

impl Message {
    fn new(role: Role, content: Content) -> Self {
        Message {
            role,
            created: Utc::now().timestamp(),
            content,
            tool_calls: Vec::new(),
            tool_result: None,
        }
    }

    pub fn system<C: Into<Content>>(content: C) -> Self {
        Self::new(Role::System, content.into())
    }

    pub fn user<C: Into<Content>>(content: C) -> Self {
        Self::new(Role::User, content.into())
    }

    pub fn assistant<C: Into<Content>>(content: C) -> Self {
        Self::new(Role::Assistant, content.into())
    }

    /// A tool message answering the call with the given id
    pub fn tool<S: Into<String>, C: Into<Content>>(tool_call_id: S, content: C) -> Self {
        let content = content.into();
        let mut message = Self::new(Role::Tool, content.clone());
        message.tool_result = Some(ToolResult::new(tool_call_id, content));
        message
    }

    /// A tool message reporting a failed execution
    pub fn tool_error<S: Into<String>, C: Into<Content>>(tool_call_id: S, content: C) -> Self {
        let content = content.into();
        let mut message = Self::new(Role::Tool, content.clone());
        message.tool_result = Some(ToolResult::error(tool_call_id, content));
        message
    }

    /// Add a tool call to the message
    pub fn with_tool_call(mut self, tool_call: ToolCall) -> Self {
        self.tool_calls.push(tool_call);
        self
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn created(&self) -> i64 {
        self.created
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn tool_calls(&self) -> &[ToolCall] {
        &self.tool_calls
    }

    pub fn tool_result(&self) -> Option<&ToolResult> {
        self.tool_result.as_ref()
    }

    pub fn is_tool_call(&self) -> bool {
        !self.tool_calls.is_empty()
    }

    pub fn is_tool_result(&self) -> bool {
        self.tool_result.is_some()
    }
}

/// The normalized assistant message decoded from a provider response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedMessage {
    pub role: Role,
    pub text: String,
    pub tool_calls: Vec<ToolCall>,
    pub usage: Usage,
    pub model_id: String,
    pub stop_reason: Option<String>,
    /// The provider response as received, kept for diagnostics
    pub raw: Value,
}

impl ParsedMessage {
    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }

    /// Decode the text as JSON, for responses constrained by a schema
    pub fn parse_json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_str(&self.text)
    }
}
