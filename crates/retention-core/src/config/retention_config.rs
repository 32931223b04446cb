//! Top-level configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{FeedConfig, ObservabilityConfig};
use crate::errors::ConfigError;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`RETENTION_*`)
/// 3. Config file (TOML)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RetentionConfig {
    pub feed: FeedConfig,
    pub observability: ObservabilityConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub poll_interval_secs: Option<u64>,
    pub push_enabled: Option<bool>,
    pub log_level: Option<String>,
}

impl RetentionConfig {
    /// Load configuration from an optional TOML file, then the process
    /// environment, then CLI overrides. The result is validated.
    pub fn load(path: Option<&Path>, cli: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, cli, |key| std::env::var(key).ok())
    }

    /// Same as [`RetentionConfig::load`] with an explicit environment lookup.
    pub fn load_with_env<F>(
        path: Option<&Path>,
        cli: Option<&CliOverrides>,
        env: F,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.apply_env_overrides(env);

        if let Some(cli) = cli {
            config.apply_cli_overrides(cli);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Pattern: `RETENTION_BASE_URL`, `RETENTION_POLL_INTERVAL_SECS`, etc.
    /// Values that fail to parse are ignored.
    fn apply_env_overrides<F>(&mut self, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = env("RETENTION_BASE_URL") {
            self.feed.base_url = val;
        }
        if let Some(v) = env("RETENTION_POLL_INTERVAL_SECS").and_then(|v| v.parse().ok()) {
            self.feed.poll_interval_secs = v;
        }
        if let Some(v) = env("RETENTION_REQUEST_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.feed.request_timeout_secs = v;
        }
        if let Some(v) = env("RETENTION_PUSH_ENABLED").and_then(|v| v.parse().ok()) {
            self.feed.push_enabled = v;
        }
        if let Some(val) = env("RETENTION_LOG_LEVEL") {
            self.observability.log_level = val;
        }
        if let Some(v) = env("RETENTION_JSON_LOGS").and_then(|v| v.parse().ok()) {
            self.observability.json_logs = v;
        }
    }

    fn apply_cli_overrides(&mut self, cli: &CliOverrides) {
        if let Some(ref v) = cli.base_url {
            self.feed.base_url = v.clone();
        }
        if let Some(v) = cli.poll_interval_secs {
            self.feed.poll_interval_secs = v;
        }
        if let Some(v) = cli.push_enabled {
            self.feed.push_enabled = v;
        }
        if let Some(ref v) = cli.log_level {
            self.observability.log_level = v.clone();
        }
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = &self.feed.base_url;
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::ValidationFailed {
                field: "feed.base_url".to_string(),
                message: format!("expected an http(s) URL, got {base:?}"),
            });
        }
        if self.feed.poll_interval_secs == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "feed.poll_interval_secs".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if self.feed.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "feed.request_timeout_secs".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if !LOG_LEVELS.contains(&self.observability.log_level.as_str()) {
            return Err(ConfigError::ValidationFailed {
                field: "observability.log_level".to_string(),
                message: format!("must be one of {}", LOG_LEVELS.join(", ")),
            });
        }
        Ok(())
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
