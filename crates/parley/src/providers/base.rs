use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::message::{Message, ParsedMessage};
use crate::models::schema::Schema;
use crate::models::tool::ToolRegistry;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: Option<u64>,
    pub output_tokens: Option<u64>,
    /// Tokens served from the provider's prompt cache
    pub cached_tokens: Option<u64>,
    /// Tokens written into the provider's prompt cache
    pub cache_creation_tokens: Option<u64>,
}

impl Usage {
    pub fn new(input_tokens: Option<u64>, output_tokens: Option<u64>) -> Self {
        Self {
            input_tokens,
            output_tokens,
            ..Default::default()
        }
    }

    pub fn total_tokens(&self) -> Option<u64> {
        match (self.input_tokens, self.output_tokens) {
            (Some(input), Some(output)) => Some(input + output),
            _ => None,
        }
    }
}

/// What the payload builder needs to know about the target model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

impl ModelInfo {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self {
            id: id.into(),
            max_tokens: None,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Base trait for AI providers (Anthropic, etc)
#[async_trait]
pub trait Provider: Send + Sync {
    /// Generate the next assistant message for the conversation
    ///
    /// When `schema` is given the response text is constrained to it; an
    /// invalid schema fails before any request is sent.
    async fn complete(
        &self,
        messages: &[Message],
        tools: &ToolRegistry,
        temperature: Option<f64>,
        schema: Option<&Schema>,
    ) -> Result<ParsedMessage>;
}
