//! StreamSubscriber: forwards every set pushed by the server to the inbox.
//!
//! Never reconnects on its own. When the channel fails the pull schedule is
//! the only source until someone calls `open` again.

use std::sync::Arc;

use futures_util::StreamExt;
use tokio::sync::watch;
use tracing::Instrument;

use retention_core::errors::RetentionErrorCode;

use super::{FeedConnector, FeedFrame, FeedStatus};
use crate::inbox::{AlertOrigin, Delivery, InboxSender};
use crate::lease::Lease;
use crate::task::TaskHandle;
use crate::transport::protocol::{decode_alert_set, FeedScope, ShapePolicy};

pub struct StreamSubscriber<C> {
    connector: Arc<C>,
    inbox: InboxSender,
    status: Arc<watch::Sender<FeedStatus>>,
    channel: Option<TaskHandle>,
}

impl<C: FeedConnector> StreamSubscriber<C> {
    pub fn new(connector: C, inbox: InboxSender) -> Self {
        Self::with_shared(Arc::new(connector), inbox)
    }

    pub fn with_shared(connector: Arc<C>, inbox: InboxSender) -> Self {
        let (status, _) = watch::channel(FeedStatus::Idle);
        Self {
            connector,
            inbox,
            status: Arc::new(status),
            channel: None,
        }
    }

    /// Open the push channel. An already open channel is closed first.
    ///
    /// Must be called from within a tokio runtime.
    pub fn open(&mut self, endpoint: impl Into<String>) {
        self.close();

        let endpoint = endpoint.into();
        let lease = Lease::new();
        self.status.send_replace(FeedStatus::Connecting);
        let span = retention_core::push_span!(endpoint);
        let task = tokio::spawn(
            run_channel(
                Arc::clone(&self.connector),
                endpoint,
                self.inbox.clone(),
                Arc::clone(&self.status),
                lease.clone(),
            )
            .instrument(span),
        );
        self.channel = Some(TaskHandle::new(lease, task));
    }

    /// Close the channel. Idempotent; a no-op if never opened. Once this
    /// returns nothing from the channel reaches the store, including
    /// deliveries already queued or being applied.
    pub fn close(&mut self) {
        if let Some(channel) = self.channel.take() {
            channel.cancel();
            self.status.send_replace(FeedStatus::Closed);
            tracing::info!("push: channel closed");
        }
    }

    /// Close the channel and wait for its task to exit.
    pub async fn shutdown(&mut self) {
        if let Some(channel) = self.channel.take() {
            channel.cancel();
            self.status.send_replace(FeedStatus::Closed);
            channel.join().await;
            tracing::info!("push: channel shut down");
        }
    }

    pub fn status(&self) -> FeedStatus {
        *self.status.borrow()
    }

    pub fn watch_status(&self) -> watch::Receiver<FeedStatus> {
        self.status.subscribe()
    }

    /// Whether a channel task is still running.
    pub fn is_active(&self) -> bool {
        self.channel.as_ref().is_some_and(|c| !c.is_finished())
    }
}

/// Publish a status change unless the channel was closed meanwhile. The check
/// runs under the watch lock so it cannot overwrite a concurrent `close`.
fn report(status: &watch::Sender<FeedStatus>, lease: &Lease, next: FeedStatus) {
    status.send_if_modified(|current| {
        if lease.is_revoked() || *current == next {
            return false;
        }
        *current = next;
        true
    });
}

async fn run_channel<C: FeedConnector>(
    connector: Arc<C>,
    endpoint: String,
    inbox: InboxSender,
    status: Arc<watch::Sender<FeedStatus>>,
    lease: Lease,
) {
    report(&status, &lease, FeedStatus::Connecting);

    let connected = tokio::select! {
        biased;
        _ = lease.revoked() => return,
        connected = connector.connect(&endpoint) => connected,
    };
    let mut frames = match connected {
        Ok(frames) => frames,
        Err(e) => {
            tracing::warn!(error = %e, code = e.error_code(), "push: connect failed, relying on pull");
            report(&status, &lease, FeedStatus::Failed);
            return;
        }
    };

    report(&status, &lease, FeedStatus::Open);
    tracing::info!("push: channel open");

    loop {
        let frame = tokio::select! {
            biased;
            _ = lease.revoked() => return,
            frame = frames.next() => frame,
        };

        match frame {
            Some(Ok(FeedFrame::Text(text))) => {
                match decode_alert_set(text.as_bytes(), FeedScope::All, ShapePolicy::Strict) {
                    Ok(alerts) => {
                        tracing::debug!(count = alerts.len(), "push: received alert set");
                        let delivery = Delivery::new(AlertOrigin::Push, alerts, lease.clone());
                        if inbox.post(delivery).is_err() {
                            tracing::debug!("push: store is gone, stopping");
                            return;
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, code = e.error_code(), "push: dropping malformed frame");
                    }
                }
            }
            Some(Ok(FeedFrame::Binary(bytes))) => {
                tracing::warn!(len = bytes.len(), "push: dropping binary frame");
            }
            Some(Ok(FeedFrame::Closed)) | None => {
                tracing::info!("push: server closed the channel, relying on pull");
                report(&status, &lease, FeedStatus::Closed);
                return;
            }
            Some(Err(e)) => {
                tracing::warn!(error = %e, code = e.error_code(), "push: channel failed, relying on pull");
                report(&status, &lease, FeedStatus::Failed);
                return;
            }
        }
    }
}
