use thiserror::Error;

/// A schema node that breaks a provider's structured output rules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{path}: {message}")]
pub struct SchemaViolation {
    /// Dotted path from the schema root, e.g. `schema.properties.user`
    pub path: String,
    pub message: String,
}

impl SchemaViolation {
    pub fn new<P: Into<String>, M: Into<String>>(path: P, message: M) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A response body missing a field we cannot do without
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Malformed response: {0}")]
pub struct MalformedResponse(pub String);

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Invalid schema: {0}")]
    Schema(#[from] SchemaViolation),

    #[error(transparent)]
    MalformedResponse(#[from] MalformedResponse),

    #[error("Request failed: {status} - {body}")]
    Http { status: u16, body: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {env_var}")]
    MissingEnvVar { env_var: String },

    #[error("Configuration error: {0}")]
    Other(#[from] config::ConfigError),
}

/// Turn a settings field path into the environment variable that sets it
pub fn to_env_var(field_path: &str) -> String {
    // Handle nested fields by converting dots to double underscores
    format!("PARLEY_{}", field_path.to_uppercase().replace('.', "__"))
}
