//! Server configuration: command-line flags with environment fallbacks.

use std::num::NonZeroUsize;

use axum::http::HeaderValue;
use clap::Parser;
use thiserror::Error;
use tower_http::cors::AllowOrigin;

use crate::infrastructure::translation::OpenAiConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid CORS origin '{0}'")]
    InvalidCorsOrigin(String),
}

#[derive(Parser, Debug, Clone)]
#[command(name = "dashka-server")]
#[command(about = "Realtime translation relay server", long_about = None)]
pub struct ServerConfig {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Maximum number of cached translations
    #[arg(long, env = "CACHE_MAX_SIZE", default_value = "1000")]
    pub cache_max_size: NonZeroUsize,

    /// API key for the translation provider; translation is disabled without it
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    #[arg(long, env = "OPENAI_BASE_URL", default_value = "https://api.openai.com/v1")]
    pub openai_base_url: String,

    #[arg(long, env = "OPENAI_MODEL", default_value = "gpt-4o-mini")]
    pub openai_model: String,

    /// Allowed CORS origin, or "*" for any
    #[arg(long, env = "CORS_ORIGIN", default_value = "*")]
    pub cors_origin: String,

    /// Default log level when RUST_LOG is not set
    #[arg(long, env = "LOG_LEVEL", default_value = "debug")]
    pub log_level: String,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn openai(&self) -> OpenAiConfig {
        OpenAiConfig {
            api_key: self
                .openai_api_key
                .clone()
                .filter(|key| !key.trim().is_empty()),
            base_url: self.openai_base_url.clone(),
            model: self.openai_model.clone(),
        }
    }

    pub fn allow_origin(&self) -> Result<AllowOrigin, ConfigError> {
        parse_allow_origin(&self.cors_origin)
    }
}

pub fn parse_allow_origin(origin: &str) -> Result<AllowOrigin, ConfigError> {
    let origin = origin.trim();
    if origin == "*" {
        return Ok(AllowOrigin::any());
    }
    HeaderValue::from_str(origin)
        .map(AllowOrigin::exact)
        .map_err(|_| ConfigError::InvalidCorsOrigin(origin.to_string()))
}
