use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigError;

/// Where alerts come from and how often the pull channel runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Base URL of the alert server, `http://` or `https://`.
    pub base_url: String,
    /// Full alert set query endpoint.
    pub alerts_path: String,
    /// Today-scoped query endpoint.
    pub today_path: String,
    /// WebSocket push endpoint.
    pub push_path: String,
    /// Pull interval in seconds. Bounds staleness while push is down.
    pub poll_interval_secs: u64,
    /// Per-request timeout for the pull channel, in seconds.
    pub request_timeout_secs: u64,
    /// Run the first pull as soon as the fetcher starts.
    pub fetch_on_start: bool,
    /// Open the push channel on mount.
    pub push_enabled: bool,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::DEFAULT_BASE_URL.to_string(),
            alerts_path: defaults::DEFAULT_ALERTS_PATH.to_string(),
            today_path: defaults::DEFAULT_TODAY_PATH.to_string(),
            push_path: defaults::DEFAULT_PUSH_PATH.to_string(),
            poll_interval_secs: defaults::DEFAULT_POLL_INTERVAL_SECS,
            request_timeout_secs: defaults::DEFAULT_REQUEST_TIMEOUT_SECS,
            fetch_on_start: defaults::DEFAULT_FETCH_ON_START,
            push_enabled: defaults::DEFAULT_PUSH_ENABLED,
        }
    }
}

impl FeedConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn alerts_url(&self) -> String {
        self.join(&self.alerts_path)
    }

    pub fn today_url(&self) -> String {
        self.join(&self.today_path)
    }

    /// Push endpoint with the scheme switched to `ws`/`wss`.
    pub fn push_url(&self) -> Result<String, ConfigError> {
        let http = self.join(&self.push_path);
        if let Some(rest) = http.strip_prefix("https://") {
            Ok(format!("wss://{rest}"))
        } else if let Some(rest) = http.strip_prefix("http://") {
            Ok(format!("ws://{rest}"))
        } else {
            Err(ConfigError::ValidationFailed {
                field: "feed.base_url".to_string(),
                message: format!("expected an http(s) URL, got {:?}", self.base_url),
            })
        }
    }

    fn join(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }
}
