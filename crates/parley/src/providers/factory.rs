use super::{anthropic::AnthropicProvider, base::Provider, configs::ProviderConfig};
use anyhow::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderType {
    Anthropic,
}

impl ProviderConfig {
    pub fn provider_type(&self) -> ProviderType {
        match self {
            ProviderConfig::Anthropic(_) => ProviderType::Anthropic,
        }
    }
}

pub fn get_provider(config: ProviderConfig) -> Result<Box<dyn Provider + Send + Sync>> {
    match config {
        ProviderConfig::Anthropic(anthropic_config) => {
            Ok(Box::new(AnthropicProvider::new(anthropic_config)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::configs::AnthropicProviderConfig;

    #[test]
    fn test_get_provider() -> Result<()> {
        let config =
            ProviderConfig::Anthropic(AnthropicProviderConfig::new("key", "claude-sonnet-4-5"));
        assert_eq!(config.provider_type(), ProviderType::Anthropic);
        let _provider = get_provider(config)?;
        Ok(())
    }
}
