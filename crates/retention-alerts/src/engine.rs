//! AlertSync: one mount of the alert view: store, consumer, and both
//! channels wired together.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::Instrument;
use uuid::Uuid;

use retention_core::config::FeedConfig;
use retention_core::errors::RetentionResult;

use crate::board::AlertBoard;
use crate::inbox;
use crate::lease::Lease;
use crate::snapshot::{PullEndpoint, SnapshotFetcher, SnapshotSource};
use crate::store::{AlertSnapshot, AlertStore};
use crate::stream::{FeedConnector, FeedStatus, StreamSubscriber};
use crate::task::TaskHandle;
use crate::transport::{HttpSnapshotSource, WsConnector};

/// Engine over the real WebSocket and HTTP transports.
pub type LiveAlertSync = AlertSync<WsConnector, HttpSnapshotSource>;

/// Owns everything a mounted alert view needs. Dropping it cancels every
/// task; [`AlertSync::unmount`] does the same and waits for them to exit.
pub struct AlertSync<C, S> {
    mount_id: Uuid,
    store: Arc<AlertStore>,
    subscriber: StreamSubscriber<C>,
    fetcher: SnapshotFetcher<S>,
    consumer: Option<TaskHandle>,
    push_url: String,
}

impl<C: FeedConnector, S: SnapshotSource> AlertSync<C, S> {
    /// Create the store, start the consumer, open the push channel (unless
    /// disabled) and start the pull schedule. Both channels start
    /// independently; neither waits for the other.
    ///
    /// Must be called from within a tokio runtime.
    pub fn mount(config: &FeedConfig, connector: C, source: S) -> RetentionResult<Self> {
        let push_url = config.push_url()?;
        let mount_id = Uuid::new_v4();
        let store = Arc::new(AlertStore::new());
        let (sender, inbox) = inbox::channel();

        let shutdown = Lease::new();
        let consumer = tokio::spawn(
            inbox
                .run(Arc::clone(&store), shutdown.token().clone())
                .instrument(retention_core::store_span!(mount_id)),
        );

        let mut subscriber = StreamSubscriber::new(connector, sender.clone());
        let mut fetcher =
            SnapshotFetcher::new(source, sender).fetch_on_start(config.fetch_on_start);

        if config.push_enabled {
            subscriber.open(push_url.clone());
        } else {
            tracing::info!(%mount_id, "push channel disabled, pull only");
        }
        fetcher.start(PullEndpoint::alerts_from(config), config.poll_interval());

        tracing::info!(
            %mount_id,
            push = config.push_enabled,
            interval = ?config.poll_interval(),
            "alert sync mounted"
        );

        Ok(Self {
            mount_id,
            store,
            subscriber,
            fetcher,
            consumer: Some(TaskHandle::new(shutdown, consumer)),
            push_url,
        })
    }

    pub fn mount_id(&self) -> Uuid {
        self.mount_id
    }

    pub fn store(&self) -> &Arc<AlertStore> {
        &self.store
    }

    pub fn current(&self) -> AlertSnapshot {
        self.store.current()
    }

    pub fn subscribe(&self) -> watch::Receiver<AlertSnapshot> {
        self.store.subscribe()
    }

    pub fn board(&self) -> AlertBoard {
        self.store.current().board()
    }

    pub fn push_status(&self) -> FeedStatus {
        self.subscriber.status()
    }

    pub fn watch_push_status(&self) -> watch::Receiver<FeedStatus> {
        self.subscriber.watch_status()
    }

    /// Open the push channel again after it closed or failed.
    pub fn reopen_push(&mut self) {
        tracing::info!(mount_id = %self.mount_id, "reopening push channel");
        self.subscriber.open(self.push_url.clone());
    }

    /// Restart the pull schedule with a new endpoint or interval.
    pub fn restart_pull(&mut self, endpoint: PullEndpoint, interval: Duration) {
        self.fetcher.start(endpoint, interval);
    }

    /// Tear down both channels, then the consumer. Nothing reaches the store
    /// once this returns.
    pub async fn unmount(mut self) {
        self.subscriber.shutdown().await;
        self.fetcher.shutdown().await;
        if let Some(consumer) = self.consumer.take() {
            consumer.join().await;
        }
        tracing::info!(mount_id = %self.mount_id, "alert sync unmounted");
    }
}

impl LiveAlertSync {
    /// Mount over the real transports.
    pub fn mount_live(config: &FeedConfig) -> RetentionResult<Self> {
        let source = HttpSnapshotSource::new(config)?;
        Self::mount(config, WsConnector, source)
    }
}
