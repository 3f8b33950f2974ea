use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub mod content;
pub mod payload;
pub mod response;
pub mod schema;
pub mod tools;

use self::payload::PayloadBuilder;
use self::response::ResponseParser;
use super::base::Provider;
use super::configs::AnthropicProviderConfig;
use super::transport::{Headers, ReqwestTransport, Transport};
use crate::errors::ProviderError;
use crate::logging::{default_logger, SharedLogger};
use crate::models::message::{Message, ParsedMessage};
use crate::models::schema::Schema;
use crate::models::tool::ToolRegistry;

pub const ANTHROPIC_VERSION: &str = "2023-06-01";
pub const BETA_HEADER: &str = "anthropic-beta";
pub const STRUCTURED_OUTPUTS_BETA: &str = "structured-outputs-2025-11-13";

/// Anthropic Messages API, composed from a payload builder, a response
/// parser and a transport
pub struct AnthropicProvider {
    config: AnthropicProviderConfig,
    transport: Arc<dyn Transport>,
    payload_builder: PayloadBuilder,
}

impl AnthropicProvider {
    pub fn new(config: AnthropicProviderConfig) -> Result<Self> {
        let transport = Arc::new(ReqwestTransport::new()?);
        Ok(Self::with_components(config, transport, default_logger()))
    }

    pub fn with_components(
        config: AnthropicProviderConfig,
        transport: Arc<dyn Transport>,
        logger: SharedLogger,
    ) -> Self {
        Self {
            config,
            transport,
            payload_builder: PayloadBuilder::new(logger),
        }
    }

    pub fn config(&self) -> &AnthropicProviderConfig {
        &self.config
    }

    pub fn completion_url(&self) -> String {
        format!("{}/v1/messages", self.config.host.trim_end_matches('/'))
    }

    pub fn headers(&self) -> Headers {
        let mut headers = Headers::new();
        headers.insert("x-api-key".to_string(), self.config.api_key.clone());
        headers.insert("anthropic-version".to_string(), ANTHROPIC_VERSION.to_string());
        if let Some(beta) = self.config.beta.as_ref().filter(|b| !b.is_empty()) {
            headers.insert(BETA_HEADER.to_string(), beta.clone());
        }
        headers
    }
}

/// Enable structured outputs, keeping any beta flags already requested
pub fn add_structured_output_beta_header(mut headers: Headers) -> Headers {
    let existing = headers
        .get(BETA_HEADER)
        .map(|beta| beta.trim().to_string())
        .unwrap_or_default();
    if existing
        .split(',')
        .any(|flag| flag.trim() == STRUCTURED_OUTPUTS_BETA)
    {
        return headers;
    }

    let beta = if existing.is_empty() {
        STRUCTURED_OUTPUTS_BETA.to_string()
    } else {
        format!("{existing},{STRUCTURED_OUTPUTS_BETA}")
    };
    headers.insert(BETA_HEADER.to_string(), beta);
    headers
}

#[async_trait]
impl Provider for AnthropicProvider {
    async fn complete(
        &self,
        messages: &[Message],
        tools: &ToolRegistry,
        temperature: Option<f64>,
        schema: Option<&Schema>,
    ) -> Result<ParsedMessage> {
        let payload = self
            .payload_builder
            .render_payload(
                messages,
                tools,
                temperature.or(self.config.temperature),
                &self.config.model_info(),
                false,
                schema,
            )
            .map_err(ProviderError::from)?;

        let mut headers = self.headers();
        if schema.is_some() {
            headers = add_structured_output_beta_header(headers);
        }

        let url = self.completion_url();
        tracing::debug!(url = %url, model = %self.config.model, "sending completion request");
        let response = self.transport.post(&url, &headers, &payload).await?;

        if !response.is_success() {
            return Err(ProviderError::Http {
                status: response.status,
                body: response.body.to_string(),
            }
            .into());
        }

        let message =
            ResponseParser::parse_completion_response(response.body).map_err(ProviderError::from)?;
        Ok(message)
    }
}
