//! SnapshotFetcher: recurring pulls into the inbox.
//!
//! Failures are logged and swallowed; the store keeps whatever it had until a
//! later cycle succeeds.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::Instrument;

use retention_core::errors::{AlertError, RetentionErrorCode};
use retention_core::models::AlertSet;

use super::{PullEndpoint, SnapshotSource};
use crate::inbox::{AlertOrigin, Delivery, InboxSender};
use crate::lease::Lease;
use crate::task::TaskHandle;

const MIN_INTERVAL: Duration = Duration::from_secs(1);

pub struct SnapshotFetcher<S> {
    source: Arc<S>,
    inbox: InboxSender,
    fetch_on_start: bool,
    schedule: Option<TaskHandle>,
}

impl<S: SnapshotSource> SnapshotFetcher<S> {
    pub fn new(source: S, inbox: InboxSender) -> Self {
        Self::with_shared(Arc::new(source), inbox)
    }

    pub fn with_shared(source: Arc<S>, inbox: InboxSender) -> Self {
        Self {
            source,
            inbox,
            fetch_on_start: true,
            schedule: None,
        }
    }

    /// Whether the first fetch runs immediately on `start` (default) or only
    /// after one full interval.
    pub fn fetch_on_start(mut self, enabled: bool) -> Self {
        self.fetch_on_start = enabled;
        self
    }

    /// Start pulling `endpoint` every `interval`. A running schedule is
    /// replaced. Intervals below one second are raised to one second.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self, endpoint: PullEndpoint, interval: Duration) {
        self.stop();

        let interval = if interval < MIN_INTERVAL {
            tracing::warn!(?interval, "pull: interval too short, using {MIN_INTERVAL:?}");
            MIN_INTERVAL
        } else {
            interval
        };

        let lease = Lease::new();
        let span = retention_core::pull_span!(endpoint.url, interval);
        let task = tokio::spawn(
            run_schedule(
                Arc::clone(&self.source),
                endpoint,
                interval,
                self.fetch_on_start,
                self.inbox.clone(),
                lease.clone(),
            )
            .instrument(span),
        );
        self.schedule = Some(TaskHandle::new(lease, task));
    }

    /// Cancel the schedule. Idempotent.
    pub fn stop(&mut self) {
        if let Some(schedule) = self.schedule.take() {
            schedule.cancel();
            tracing::info!("pull: schedule stopped");
        }
    }

    /// Cancel the schedule and wait for its task to exit.
    pub async fn shutdown(&mut self) {
        if let Some(schedule) = self.schedule.take() {
            schedule.join().await;
            tracing::info!("pull: schedule shut down");
        }
    }

    pub fn is_running(&self) -> bool {
        self.schedule.as_ref().is_some_and(|s| !s.is_finished())
    }

    /// One fetch outside the schedule. The result is returned, not stored.
    pub async fn fetch_once(&self, endpoint: &PullEndpoint) -> Result<AlertSet, AlertError> {
        self.source.fetch(endpoint).await
    }
}

async fn run_schedule<S: SnapshotSource>(
    source: Arc<S>,
    endpoint: PullEndpoint,
    period: Duration,
    fetch_on_start: bool,
    inbox: InboxSender,
    lease: Lease,
) {
    let mut ticker = if fetch_on_start {
        time::interval(period)
    } else {
        time::interval_at(Instant::now() + period, period)
    };
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = lease.revoked() => return,
            _ = ticker.tick() => {}
        }

        let fetched = tokio::select! {
            biased;
            _ = lease.revoked() => return,
            fetched = source.fetch(&endpoint) => fetched,
        };

        match fetched {
            Ok(alerts) => {
                tracing::debug!(count = alerts.len(), "pull: fetched alert set");
                let delivery = Delivery::new(AlertOrigin::Pull, alerts, lease.clone());
                if inbox.post(delivery).is_err() {
                    tracing::debug!("pull: store is gone, stopping");
                    return;
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, code = e.error_code(), "pull: fetch failed, keeping previous alerts");
            }
        }
    }
}
