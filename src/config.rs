//! Environment-sourced configuration.
//!
//! Read once at startup. The endpoint is required; the model falls back
//! to the one model this chain is tuned against.

use tracing::warn;

/// The only model the step prompts are tuned against.
pub const DEFAULT_MODEL: &str = "llama3.1:70b";

/// Startup configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("OLLAMA_URL environment variable not set")]
    MissingEndpoint,
}

/// Resolved chain configuration.
#[derive(Debug, Clone)]
pub struct ChainConfig {
    pub endpoint: String,
    pub model: String,
}

impl ChainConfig {
    /// Build a config from explicit parts, warning on untested models.
    pub fn new(endpoint: String, model: String) -> Self {
        if model != DEFAULT_MODEL {
            warn!("only {DEFAULT_MODEL} is tested; {model} may need a different prompt to behave");
        }
        Self { endpoint, model }
    }

    /// Read OLLAMA_URL (required) and OLLAMA_MODEL (optional) from the
    /// environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let endpoint = std::env::var("OLLAMA_URL").map_err(|_| ConfigError::MissingEndpoint)?;
        let model = std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Ok(Self::new(endpoint, model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_parts_kept_verbatim() {
        let config = ChainConfig::new("http://localhost:11434".into(), "llama3.1:70b".into());
        assert_eq!(config.endpoint, "http://localhost:11434");
        assert_eq!(config.model, "llama3.1:70b");
    }

    #[test]
    fn non_default_model_accepted() {
        // Untested models warn but never fail.
        let config = ChainConfig::new("http://localhost:11434".into(), "qwen2.5:32b".into());
        assert_eq!(config.model, "qwen2.5:32b");
    }

    #[test]
    fn from_env_resolution() {
        // One test touches the process environment so the steps cannot
        // race each other.
        std::env::remove_var("OLLAMA_URL");
        std::env::remove_var("OLLAMA_MODEL");
        let err = ChainConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("OLLAMA_URL"));

        std::env::set_var("OLLAMA_URL", "http://ollama.local:11434");
        let config = ChainConfig::from_env().unwrap();
        assert_eq!(config.endpoint, "http://ollama.local:11434");
        assert_eq!(config.model, DEFAULT_MODEL);

        std::env::set_var("OLLAMA_MODEL", "llama3.1:8b");
        let config = ChainConfig::from_env().unwrap();
        assert_eq!(config.model, "llama3.1:8b");

        std::env::remove_var("OLLAMA_URL");
        std::env::remove_var("OLLAMA_MODEL");
    }

    #[test]
    fn missing_endpoint_error_display() {
        let err = ConfigError::MissingEndpoint;
        assert!(err.to_string().contains("OLLAMA_URL"));
        assert!(err.to_string().contains("not set"));
    }
}
