//! Single-consumer inbox between the two channels and the store.
//!
//! Producers never touch the store. They post complete sets here, each
//! tagged with the lease of the channel that produced it; the consumer folds
//! deliveries into the store in arrival order and drops any whose channel has
//! been closed since.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use retention_core::errors::AlertError;
use retention_core::models::AlertSet;

use crate::lease::Lease;
use crate::store::AlertStore;

/// Which channel delivered a set. Informational only: the store never ranks
/// one origin above the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertOrigin {
    Push,
    Pull,
}

/// A complete alert set on its way to the store.
#[derive(Debug)]
pub struct Delivery {
    pub origin: AlertOrigin,
    pub alerts: AlertSet,
    lease: Lease,
}

impl Delivery {
    pub fn new(origin: AlertOrigin, alerts: AlertSet, lease: Lease) -> Self {
        Self {
            origin,
            alerts,
            lease,
        }
    }

    /// The producing channel was closed after this delivery was posted.
    pub fn is_stale(&self) -> bool {
        self.lease.is_revoked()
    }
}

/// Producer side. Cheap to clone; one per channel.
#[derive(Debug, Clone)]
pub struct InboxSender {
    tx: mpsc::UnboundedSender<Delivery>,
}

impl InboxSender {
    pub fn post(&self, delivery: Delivery) -> Result<(), AlertError> {
        self.tx.send(delivery).map_err(|_| AlertError::ChannelClosed {
            channel: "inbox".to_string(),
        })
    }
}

/// Consumer side.
#[derive(Debug)]
pub struct Inbox {
    rx: mpsc::UnboundedReceiver<Delivery>,
}

/// Create a connected sender/inbox pair.
pub fn channel() -> (InboxSender, Inbox) {
    let (tx, rx) = mpsc::unbounded_channel();
    (InboxSender { tx }, Inbox { rx })
}

impl Inbox {
    /// Wait for the next delivery. `None` once every sender is gone.
    pub async fn recv(&mut self) -> Option<Delivery> {
        self.rx.recv().await
    }

    /// Fold one delivery into the store. Returns whether it was applied.
    ///
    /// The producing lease is held for the whole replacement, so a channel
    /// closed concurrently either sees this write finish first or blocks it.
    pub fn apply(store: &AlertStore, delivery: Delivery) -> bool {
        let Some(_held) = delivery.lease.hold() else {
            tracing::debug!(
                origin = ?delivery.origin,
                count = delivery.alerts.len(),
                "dropping delivery from a closed channel"
            );
            return false;
        };
        store.replace(delivery.alerts, delivery.origin);
        true
    }

    /// Apply everything already queued without waiting. Returns how many
    /// deliveries reached the store.
    pub fn apply_pending(&mut self, store: &AlertStore) -> usize {
        let mut applied = 0;
        while let Ok(delivery) = self.rx.try_recv() {
            if Self::apply(store, delivery) {
                applied += 1;
            }
        }
        applied
    }

    /// Consumer loop: runs until `shutdown` fires or all senders are gone.
    pub async fn run(mut self, store: Arc<AlertStore>, shutdown: CancellationToken) {
        loop {
            let delivery = tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                delivery = self.rx.recv() => delivery,
            };
            match delivery {
                Some(delivery) => {
                    Self::apply(&store, delivery);
                }
                None => break,
            }
        }
        tracing::debug!("store: inbox consumer stopped");
    }
}
