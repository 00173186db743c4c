use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

#[derive(Debug, Clone, Deserialize)]
pub struct QueueConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub database: DatabaseConfig,
    pub gemini: GeminiConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite URL, e.g. `sqlite://smartq.db`.
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    /// Base URL up to and including the API version segment.
    pub api_base_url: String,
    pub model: String,
    pub api_key: Secret<String>,
    pub timeout_secs: u64,
}

impl GeminiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
}

impl QueueConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = common_config.is_prod();

        let config = QueueConfig {
            common: common_config,
            database: DatabaseConfig {
                url: get_env("DATABASE_URL", Some("sqlite://smartq.db"), is_prod)?,
                max_connections: parse_env("DATABASE_MAX_CONNECTIONS", Some("5"), is_prod)?,
                min_connections: parse_env("DATABASE_MIN_CONNECTIONS", Some("1"), is_prod)?,
            },
            gemini: GeminiConfig {
                api_base_url: get_env("GEMINI_API_BASE_URL", Some(DEFAULT_GEMINI_API_BASE), is_prod)?,
                model: get_env("GEMINI_MODEL", Some(DEFAULT_GEMINI_MODEL), is_prod)?,
                api_key: Secret::new(get_env("GEMINI_API_KEY", None, is_prod)?),
                timeout_secs: parse_env("GEMINI_TIMEOUT_SECS", Some("30"), is_prod)?,
            },
            observability: ObservabilityConfig {
                log_level: get_env("LOG_LEVEL", Some("info"), is_prod)?,
                otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|v| !v.is_empty()),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would only fail later, on the first request.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.gemini.api_key.expose_secret().trim().is_empty() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "GEMINI_API_KEY must not be empty"
            )));
        }
        if self.gemini.timeout_secs == 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "GEMINI_TIMEOUT_SECS must be greater than zero"
            )));
        }
        if self.database.max_connections == 0
            || self.database.min_connections > self.database.max_connections
        {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "DATABASE_MIN_CONNECTIONS must not exceed DATABASE_MAX_CONNECTIONS (> 0)"
            )));
        }
        Ok(())
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

fn parse_env<T>(key: &str, default: Option<&str>, is_prod: bool) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = get_env(key, default, is_prod)?;
    raw.trim().parse().map_err(|e| {
        AppError::ConfigError(anyhow::anyhow!("{} has invalid value {:?}: {}", key, raw, e))
    })
}
