//! Push channel: a long-lived connection that delivers full alert sets.

pub mod subscriber;

use std::future::Future;

use futures_util::stream::BoxStream;

use retention_core::errors::AlertError;

pub use subscriber::StreamSubscriber;

/// One inbound message on the push channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedFrame {
    Text(String),
    Binary(Vec<u8>),
    /// The server closed the connection.
    Closed,
}

pub type FeedStream = BoxStream<'static, Result<FeedFrame, AlertError>>;

/// Opens push connections. The seam between the subscriber and the network.
pub trait FeedConnector: Send + Sync + 'static {
    /// Connect to `endpoint` and return its inbound frames.
    fn connect(
        &self,
        endpoint: &str,
    ) -> impl Future<Output = Result<FeedStream, AlertError>> + Send;
}

/// Lifecycle of the push channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedStatus {
    /// Never opened.
    Idle,
    Connecting,
    Open,
    /// Closed by the client or the server.
    Closed,
    /// Connect failed or the connection errored. Pull keeps the view correct.
    Failed,
}
