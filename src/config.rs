//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Inference provider configuration
    pub inference: InferenceConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

/// Inference provider configuration
#[derive(Clone)]
pub struct InferenceConfig {
    /// API key sent as a bearer token on outbound calls
    pub api_key: String,
    /// Base URL of the model-serving endpoint
    pub base_url: String,
    /// Timeout applied to each outbound call (in seconds)
    pub timeout_secs: u64,
}

// Manual Debug so the API key never lands in logs.
impl std::fmt::Debug for InferenceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(3000),
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            },
            inference: InferenceConfig {
                api_key: env::var("HUGGINGFACE_API_KEY").unwrap_or_default(),
                base_url: env::var("INFERENCE_BASE_URL")
                    .unwrap_or_else(|_| "https://api-inference.huggingface.co".to_string()),
                timeout_secs: env::var("INFERENCE_TIMEOUT_SECS")
                    .ok()
                    .and_then(|t| t.parse().ok())
                    .unwrap_or(120),
            },
        }
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_addr_format() {
        let config = Config {
            server: ServerConfig {
                port: 3000,
                host: "127.0.0.1".to_string(),
            },
            inference: InferenceConfig {
                api_key: String::new(),
                base_url: "https://api-inference.huggingface.co".to_string(),
                timeout_secs: 120,
            },
        };
        assert_eq!(config.server_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_inference_config_debug_redacts_api_key() {
        let config = InferenceConfig {
            api_key: "hf_secret_token".to_string(),
            base_url: "https://api-inference.huggingface.co".to_string(),
            timeout_secs: 120,
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("hf_secret_token"));
        assert!(rendered.contains("<redacted>"));
    }
}
