//! Pull channel: periodic full-snapshot fetches. The correctness backstop.

pub mod fetcher;

use std::future::Future;

use retention_core::config::FeedConfig;
use retention_core::errors::AlertError;
use retention_core::models::AlertSet;

use crate::transport::protocol::FeedScope;

pub use fetcher::SnapshotFetcher;

/// A query endpoint together with the shape of what it returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullEndpoint {
    pub url: String,
    pub scope: FeedScope,
}

impl PullEndpoint {
    pub fn all(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            scope: FeedScope::All,
        }
    }

    pub fn today(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            scope: FeedScope::Today,
        }
    }

    pub fn alerts_from(config: &FeedConfig) -> Self {
        Self::all(config.alerts_url())
    }

    pub fn today_from(config: &FeedConfig) -> Self {
        Self::today(config.today_url())
    }
}

/// Fetches the complete current alert set. The seam between the fetcher and
/// the network.
pub trait SnapshotSource: Send + Sync + 'static {
    fn fetch(
        &self,
        endpoint: &PullEndpoint,
    ) -> impl Future<Output = Result<AlertSet, AlertError>> + Send;
}
