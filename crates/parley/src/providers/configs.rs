use super::base::ModelInfo;

pub const ANTHROPIC_HOST: &str = "https://api.anthropic.com";
pub const ANTHROPIC_MODEL: &str = "claude-sonnet-4-5";

// Unified enum to wrap different provider configurations
#[derive(Debug, Clone)]
pub enum ProviderConfig {
    Anthropic(AnthropicProviderConfig),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnthropicProviderConfig {
    pub host: String,
    pub api_key: String,
    pub model: String,
    /// Overrides the default output token limit
    pub max_tokens: Option<u32>,
    /// Used when a request does not set its own temperature
    pub temperature: Option<f64>,
    /// Comma separated beta feature flags sent on every request
    pub beta: Option<String>,
}

impl AnthropicProviderConfig {
    pub fn new<K: Into<String>, M: Into<String>>(api_key: K, model: M) -> Self {
        Self {
            host: ANTHROPIC_HOST.to_string(),
            api_key: api_key.into(),
            model: model.into(),
            max_tokens: None,
            temperature: None,
            beta: None,
        }
    }

    pub fn model_info(&self) -> ModelInfo {
        ModelInfo {
            id: self.model.clone(),
            max_tokens: self.max_tokens,
        }
    }
}
