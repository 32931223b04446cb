//! AlertStore: the single point of truth for the current alert set.
//!
//! Every replacement is total and unconditional: no merging, no diffing, no
//! comparison of origins or timestamps. Readers get `Arc` snapshots through a
//! `watch` channel, so a reader never observes a half-applied set.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use retention_core::models::AlertSet;

use crate::board::AlertBoard;
use crate::classify::duplicate_keys;
use crate::inbox::AlertOrigin;

/// `Empty` until the first replacement, `Populated` forever after.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    Empty,
    Populated,
}

/// Immutable view of the store at one revision.
#[derive(Debug, Clone)]
pub struct AlertSnapshot {
    alerts: Arc<AlertSet>,
    revision: u64,
    origin: Option<AlertOrigin>,
    received_at: Option<DateTime<Utc>>,
}

impl AlertSnapshot {
    fn initial() -> Self {
        Self {
            alerts: Arc::new(AlertSet::empty()),
            revision: 0,
            origin: None,
            received_at: None,
        }
    }

    pub fn alerts(&self) -> &AlertSet {
        &self.alerts
    }

    /// Shared handle to the set, for readers that outlive the snapshot.
    pub fn shared(&self) -> Arc<AlertSet> {
        Arc::clone(&self.alerts)
    }

    /// Number of replacements applied so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn origin(&self) -> Option<AlertOrigin> {
        self.origin
    }

    pub fn received_at(&self) -> Option<DateTime<Utc>> {
        self.received_at
    }

    pub fn state(&self) -> StoreState {
        if self.revision == 0 {
            StoreState::Empty
        } else {
            StoreState::Populated
        }
    }

    pub fn board(&self) -> AlertBoard {
        AlertBoard::from_set(&self.alerts)
    }
}

/// Owns the current [`AlertSet`]. Constructed per mount, dropped on teardown.
#[derive(Debug)]
pub struct AlertStore {
    tx: watch::Sender<AlertSnapshot>,
}

impl AlertStore {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(AlertSnapshot::initial());
        Self { tx }
    }

    /// Overwrite the current set and notify every subscriber. Last write
    /// wins regardless of origin. Returns the new revision.
    pub fn replace(&self, alerts: AlertSet, origin: AlertOrigin) -> u64 {
        let duplicates = duplicate_keys(&alerts);
        if !duplicates.is_empty() {
            tracing::warn!(
                ?origin,
                duplicates = duplicates.len(),
                first = %duplicates[0].customer_id,
                "source delivered duplicate (customer, category) alerts"
            );
        }

        let count = alerts.len();
        let alerts = Arc::new(alerts);
        let mut revision = 0;
        self.tx.send_modify(|snapshot| {
            revision = snapshot.revision + 1;
            *snapshot = AlertSnapshot {
                alerts,
                revision,
                origin: Some(origin),
                received_at: Some(Utc::now()),
            };
        });

        tracing::debug!(revision, count, ?origin, "store: alert set replaced");
        revision
    }

    pub fn current(&self) -> AlertSnapshot {
        self.tx.borrow().clone()
    }

    /// Receiver notified on every replacement.
    pub fn subscribe(&self) -> watch::Receiver<AlertSnapshot> {
        self.tx.subscribe()
    }

    pub fn state(&self) -> StoreState {
        self.tx.borrow().state()
    }
}

impl Default for AlertStore {
    fn default() -> Self {
        Self::new()
    }
}
