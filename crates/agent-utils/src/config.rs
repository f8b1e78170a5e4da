//! Configuration management utilities

use serde::{Deserialize, Serialize};

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Application name
    pub app_name: String,
    /// Environment (dev, prod, etc.)
    pub environment: String,
    /// Filter directive used when `RUST_LOG` is not set
    pub log_filter: String,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "agent-rs".to_string(),
            environment: "development".to_string(),
            log_filter: "info".to_string(),
            log_format: LogFormat::Text,
        }
    }
}

impl Config {
    /// Build a configuration from `AGENT_*` environment variables
    ///
    /// Reads `AGENT_APP_NAME`, `AGENT_ENV`, `AGENT_LOG` and `AGENT_LOG_FORMAT`.
    /// Unset or unparseable values keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(name) = lookup("AGENT_APP_NAME") {
            config.app_name = name;
        }
        if let Some(env) = lookup("AGENT_ENV") {
            config.environment = env;
        }
        if let Some(filter) = lookup("AGENT_LOG") {
            config.log_filter = filter;
        }
        if let Some(format) = lookup("AGENT_LOG_FORMAT").as_deref().and_then(LogFormat::parse) {
            config.log_format = format;
        }
        config
    }
}
