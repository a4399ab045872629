//! Application settings and configuration management

use crate::error::{AppError, Result};
use axum::http::HeaderValue;
use config::{Config, Environment, File, Map};
use secrecy::SecretString;
use serde::Deserialize;
use std::path::Path;

/// Root configuration structure
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub remover: RemoverConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Cross-origin policy for browser callers
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
    #[serde(default = "default_true")]
    pub allow_credentials: bool,
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}

fn default_true() -> bool {
    true
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
            allow_credentials: true,
        }
    }
}

/// Upstream image fetch configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    #[serde(default = "default_fetch_timeout")]
    pub timeout_ms: u64,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_ms: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_fetch_timeout() -> u64 {
    30000
}

fn default_connect_timeout() -> u64 {
    10000
}

fn default_user_agent() -> String {
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_fetch_timeout(),
            connect_timeout_ms: default_connect_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Background-removal model configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RemoverConfig {
    /// Model id in the local model cache
    #[serde(default = "default_model")]
    pub model: String,
    /// ONNX model directory on disk; takes precedence over `model`
    #[serde(default)]
    pub model_path: Option<String>,
    /// Model precision variant, e.g. `fp16` or `fp32`
    #[serde(default)]
    pub variant: Option<String>,
    /// One of `auto`, `cpu`, `cuda`, `coreml`
    #[serde(default = "default_execution_provider")]
    pub execution_provider: String,
    /// Upper bound on simultaneous model invocations
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,
}

fn default_model() -> String {
    "imgly--isnet-general-onnx".to_string()
}

fn default_execution_provider() -> String {
    "auto".to_string()
}

fn default_max_concurrent() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

impl Default for RemoverConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            model_path: None,
            variant: None,
            execution_provider: default_execution_provider(),
            max_concurrent: default_max_concurrent(),
        }
    }
}

/// Object storage credentials. Read at startup; uploads are not performed.
#[derive(Debug, Default, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub access_key_id: Option<String>,
    #[serde(default)]
    pub secret_access_key: Option<SecretString>,
    #[serde(default)]
    pub bucket: Option<String>,
}

impl StorageConfig {
    pub fn has_credentials(&self) -> bool {
        self.access_key_id.is_some() && self.secret_access_key.is_some()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Settings {
    /// Load settings from configuration files and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path("config/default.toml")
    }

    /// Load settings from a specific configuration file path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load_with_env(path, std::env::vars().collect())
    }

    /// Load settings using `env` in place of the process environment
    pub fn load_with_env<P: AsRef<Path>>(path: P, env: Map<String, String>) -> Result<Self> {
        let frontend_origins = env.get("FRONTEND_URL").map(|value| {
            value
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(String::from)
                .collect::<Vec<_>>()
        });

        let config = Config::builder()
            .add_source(File::from(path.as_ref()).required(false))
            // Structured overrides, e.g. BG_GATEWAY__REMOVER__MAX_CONCURRENT=2
            .add_source(
                Environment::with_prefix("BG_GATEWAY")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .try_parsing(true)
                    .source(Some(env.clone())),
            )
            // Plain deployment variables win over everything else
            .set_override_option("server.port", env.get("PORT").cloned())?
            .set_override_option("cors.allowed_origins", frontend_origins)?
            .set_override_option("storage.region", env.get("AWS_REGION").cloned())?
            .set_override_option("storage.access_key_id", env.get("AWS_ACCESS_KEY_ID").cloned())?
            .set_override_option(
                "storage.secret_access_key",
                env.get("AWS_SECRET_ACCESS_KEY").cloned(),
            )?
            .set_override_option("storage.bucket", env.get("AWS_BUCKET_NAME").cloned())?
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        Ok(settings)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(invalid("Server port cannot be 0"));
        }

        if self.cors.allowed_origins.is_empty() {
            return Err(invalid("At least one allowed origin is required"));
        }
        for origin in &self.cors.allowed_origins {
            if origin == "*" && self.cors.allow_credentials {
                return Err(invalid(
                    "Wildcard origin cannot be combined with allow_credentials",
                ));
            }
            if HeaderValue::from_str(origin).is_err() {
                return Err(invalid(&format!("Invalid allowed origin '{}'", origin)));
            }
        }

        if self.remover.model_path.is_none() && self.remover.model.trim().is_empty() {
            return Err(invalid("remover.model or remover.model_path is required"));
        }
        if !["auto", "cpu", "cuda", "coreml"].contains(&self.remover.execution_provider.as_str()) {
            return Err(invalid(&format!(
                "Unknown execution provider '{}'. Must be one of auto, cpu, cuda, coreml",
                self.remover.execution_provider
            )));
        }
        if self.remover.max_concurrent == 0 {
            return Err(invalid("remover.max_concurrent must be at least 1"));
        }

        Ok(())
    }
}

fn invalid(message: &str) -> AppError {
    AppError::Config(config::ConfigError::Message(message.to_string()))
}
