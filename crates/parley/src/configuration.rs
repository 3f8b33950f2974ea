use crate::errors::{to_env_var, ConfigError};
use crate::providers::configs::{
    AnthropicProviderConfig, ProviderConfig, ANTHROPIC_HOST, ANTHROPIC_MODEL,
};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase", tag = "type")]
pub enum ProviderSettings {
    Anthropic {
        #[serde(default = "default_anthropic_host")]
        host: String,
        api_key: String,
        #[serde(default = "default_model")]
        model: String,
        #[serde(default)]
        max_tokens: Option<u32>,
        #[serde(default)]
        temperature: Option<f64>,
        #[serde(default)]
        beta: Option<String>,
    },
}

impl ProviderSettings {
    pub fn into_config(self) -> ProviderConfig {
        match self {
            ProviderSettings::Anthropic {
                host,
                api_key,
                model,
                max_tokens,
                temperature,
                beta,
            } => ProviderConfig::Anthropic(AnthropicProviderConfig {
                host,
                api_key,
                model,
                max_tokens,
                temperature,
                beta,
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub provider: ProviderSettings,
}

impl Settings {
    /// Load settings from `PARLEY_*` environment variables
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    /// Load settings from an optional TOML file, overridden by the environment
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("provider.type", "anthropic")?
            .set_default("provider.host", default_anthropic_host())?
            .set_default("provider.model", default_model())?;

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).required(true));
        }

        let config = builder
            .add_source(
                Environment::with_prefix("PARLEY")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        match config.try_deserialize::<Self>() {
            Ok(settings) => Ok(settings),
            Err(err) => {
                tracing::debug!("Configuration error: {:?}", &err);

                // serde reports "missing field `api_key`" for fields inside the provider table
                let error_str = err.to_string();
                if let Some(field) = error_str
                    .strip_prefix("missing field `")
                    .and_then(|rest| rest.split('`').next())
                {
                    let env_var = to_env_var(&format!("provider.{field}"));
                    Err(ConfigError::MissingEnvVar { env_var })
                } else if let config::ConfigError::NotFound(field) = &err {
                    let env_var = to_env_var(field);
                    Err(ConfigError::MissingEnvVar { env_var })
                } else {
                    Err(ConfigError::Other(err))
                }
            }
        }
    }
}

fn default_anthropic_host() -> String {
    ANTHROPIC_HOST.to_string()
}

fn default_model() -> String {
    ANTHROPIC_MODEL.to_string()
}
