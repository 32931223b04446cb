//! Pull channel transport: one GET per fetch, no retries.
//!
//! Retrying is the schedule's job; a failed fetch simply waits for the next
//! tick.

use retention_core::config::FeedConfig;
use retention_core::errors::AlertError;
use retention_core::models::AlertSet;

use super::protocol::{decode_alert_set, ShapePolicy};
use crate::snapshot::{PullEndpoint, SnapshotSource};

/// [`SnapshotSource`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpSnapshotSource {
    client: reqwest::Client,
}

impl HttpSnapshotSource {
    pub fn new(config: &FeedConfig) -> Result<Self, AlertError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .gzip(true)
            .build()
            .map_err(|e| AlertError::Transport {
                endpoint: config.base_url.clone(),
                reason: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self { client })
    }

    /// Wrap an existing client, e.g. one shared with other requests.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl SnapshotSource for HttpSnapshotSource {
    async fn fetch(&self, endpoint: &PullEndpoint) -> Result<AlertSet, AlertError> {
        let transport = |e: reqwest::Error| AlertError::Transport {
            endpoint: endpoint.url.clone(),
            reason: e.to_string(),
        };

        let response = self
            .client
            .get(&endpoint.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AlertError::UnexpectedStatus {
                endpoint: endpoint.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(transport)?;
        decode_alert_set(&body, endpoint.scope, ShapePolicy::Lenient)
    }
}
