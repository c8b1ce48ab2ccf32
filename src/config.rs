//! Runtime configuration.
//!
//! Every option can be given as a command-line flag or an environment
//! variable. The Gemini API key has no default and must be supplied.

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use clap::Parser;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::llm::gemini::{GeminiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::relay::DEFAULT_TEMPERATURE;

/// Local development origins of the web frontend.
pub const DEFAULT_CORS_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://127.0.0.1:5173"];

#[derive(Parser, Clone)]
#[command(name = "roma-backend")]
#[command(about = "Todo list and document-grounded chat relay")]
#[command(version)]
pub struct Config {
    /// Address the HTTP server listens on
    #[arg(long, env = "ROMA_LISTEN_ADDR", default_value = "127.0.0.1:8000")]
    pub listen_addr: String,

    /// Intent document loaded at startup (.pdf, .txt or .md)
    #[arg(long, env = "ROMA_DOCUMENT", default_value = "roma_ai_training.pdf")]
    pub document: PathBuf,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: String,

    #[arg(long, env = "GEMINI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub gemini_base_url: String,

    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    pub gemini_model: String,

    /// Sampling temperature for generated answers
    #[arg(long, env = "ROMA_TEMPERATURE", default_value_t = DEFAULT_TEMPERATURE)]
    pub temperature: f32,

    /// Timeout for the outbound LLM request; unset means no timeout
    #[arg(long, env = "ROMA_LLM_TIMEOUT_SECS")]
    pub llm_timeout_secs: Option<u64>,

    /// Origins allowed to make cross-origin requests
    #[arg(
        long,
        env = "ROMA_CORS_ORIGINS",
        value_delimiter = ',',
        default_values = DEFAULT_CORS_ORIGINS
    )]
    pub cors_origins: Vec<String>,

    /// Report upstream LLM failures as 502 instead of 404
    #[arg(long, env = "ROMA_DISTINGUISH_UPSTREAM_ERRORS")]
    pub distinguish_upstream_errors: bool,

    /// Log level used when RUST_LOG is not set
    #[arg(long, env = "ROMA_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen_addr
            .parse()
            .with_context(|| format!("Invalid listen address: {}", self.listen_addr))
    }

    pub fn gemini(&self) -> GeminiConfig {
        GeminiConfig {
            api_key: self.gemini_api_key.clone(),
            base_url: self.gemini_base_url.clone(),
            model: self.gemini_model.clone(),
        }
    }

    pub fn llm_timeout(&self) -> Option<Duration> {
        self.llm_timeout_secs.map(Duration::from_secs)
    }

    pub fn cors(&self) -> CorsSettings {
        CorsSettings {
            allowed_origins: self.cors_origins.clone(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("listen_addr", &self.listen_addr)
            .field("document", &self.document)
            .field("gemini_api_key", &"<redacted>")
            .field("gemini_base_url", &self.gemini_base_url)
            .field("gemini_model", &self.gemini_model)
            .field("temperature", &self.temperature)
            .field("llm_timeout_secs", &self.llm_timeout_secs)
            .field("cors_origins", &self.cors_origins)
            .field("distinguish_upstream_errors", &self.distinguish_upstream_errors)
            .field("log_level", &self.log_level)
            .finish()
    }
}

/// Cross-origin policy: listed origins, any method and header, credentials allowed.
#[derive(Debug, Clone)]
pub struct CorsSettings {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            allowed_origins: DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl CorsSettings {
    pub fn to_layer(&self) -> CorsLayer {
        let mut origins = Vec::new();
        for origin in &self.allowed_origins {
            match origin.parse::<HeaderValue>() {
                Ok(value) => origins.push(value),
                Err(_) => tracing::warn!("CORS: Invalid origin '{}' - skipping", origin),
            }
        }
        if origins.is_empty() {
            tracing::warn!("CORS: no valid origins configured, cross-origin requests are denied");
        }

        // Wildcards are not allowed together with credentials, so mirror instead.
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
            .allow_credentials(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        let mut argv = vec!["roma-backend"];
        argv.extend_from_slice(args);
        Config::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["--gemini-api-key", "k"]);
        assert_eq!(config.listen_addr().unwrap().port(), 8000);
        assert_eq!(config.document, PathBuf::from("roma_ai_training.pdf"));
        assert_eq!(config.cors_origins, DEFAULT_CORS_ORIGINS);
        assert!((config.temperature - 0.2).abs() < 1e-6);
        assert!(config.llm_timeout().is_none());
        assert!(!config.distinguish_upstream_errors);
    }

    #[test]
    fn test_overrides() {
        let config = parse(&[
            "--gemini-api-key",
            "k",
            "--cors-origins",
            "http://a.test,http://b.test",
            "--llm-timeout-secs",
            "30",
            "--distinguish-upstream-errors",
        ]);
        assert_eq!(config.cors().allowed_origins, vec!["http://a.test", "http://b.test"]);
        assert_eq!(config.llm_timeout(), Some(Duration::from_secs(30)));
        assert!(config.distinguish_upstream_errors);
    }

    #[test]
    fn test_invalid_listen_addr() {
        let config = parse(&["--gemini-api-key", "k", "--listen-addr", "nowhere"]);
        assert!(config.listen_addr().is_err());
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = parse(&["--gemini-api-key", "super-secret"]);
        assert!(!format!("{:?}", config).contains("super-secret"));
    }
}
