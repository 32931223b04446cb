//! In-memory transports and helpers shared by the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::stream::{self, StreamExt};
use tokio::sync::{mpsc, watch, Semaphore};

use retention_alerts::{AlertSnapshot, FeedConnector, FeedFrame, FeedStream, PullEndpoint, SnapshotSource};
use retention_core::config::FeedConfig;
use retention_core::errors::AlertError;
use retention_core::models::{AlertCategory, AlertRecord, AlertSet};

pub const PUSH_URL: &str = "ws://alerts.test/ws/alertas";
pub const PULL_URL: &str = "http://alerts.test/alertas";

pub type FrameSender = mpsc::UnboundedSender<Result<FeedFrame, AlertError>>;

// ── Push ────────────────────────────────────────────────────────────────────

struct ConnectorInner {
    sessions: Mutex<VecDeque<mpsc::UnboundedReceiver<Result<FeedFrame, AlertError>>>>,
    gate: Semaphore,
    attempts: AtomicUsize,
}

/// Each `connect` takes the next scripted session. With no session left the
/// connection is refused. While the gate is closed, `connect` hangs.
#[derive(Clone)]
pub struct FakeConnector {
    inner: Arc<ConnectorInner>,
}

impl FakeConnector {
    pub fn open() -> Self {
        Self::with_permits(Semaphore::MAX_PERMITS)
    }

    /// Connects block until [`FakeConnector::release`] is called.
    pub fn gated() -> Self {
        Self::with_permits(0)
    }

    fn with_permits(permits: usize) -> Self {
        Self {
            inner: Arc::new(ConnectorInner {
                sessions: Mutex::new(VecDeque::new()),
                gate: Semaphore::new(permits),
                attempts: AtomicUsize::new(0),
            }),
        }
    }

    /// Script one more successful connection and return its frame sender.
    pub fn session(&self) -> FrameSender {
        let (tx, rx) = mpsc::unbounded_channel();
        self.inner.sessions.lock().unwrap().push_back(rx);
        tx
    }

    pub fn release(&self) {
        self.inner.gate.add_permits(1);
    }

    pub fn attempts(&self) -> usize {
        self.inner.attempts.load(Ordering::SeqCst)
    }
}

impl FeedConnector for FakeConnector {
    async fn connect(&self, endpoint: &str) -> Result<FeedStream, AlertError> {
        self.inner.attempts.fetch_add(1, Ordering::SeqCst);
        let _permit = self.inner.gate.acquire().await.map_err(|e| AlertError::Transport {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;

        let session = self.inner.sessions.lock().unwrap().pop_front();
        let mut frames = session.ok_or_else(|| AlertError::Transport {
            endpoint: endpoint.to_string(),
            reason: "connection refused".to_string(),
        })?;
        Ok(stream::poll_fn(move |cx| frames.poll_recv(cx)).boxed())
    }
}

// ── Pull ────────────────────────────────────────────────────────────────────

struct SourceInner {
    responses: Mutex<VecDeque<Result<AlertSet, AlertError>>>,
    calls: AtomicUsize,
}

/// Answers fetches from a script; once the script runs out every fetch
/// fails with a transport error.
#[derive(Clone)]
pub struct FakeSource {
    inner: Arc<SourceInner>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(SourceInner {
                responses: Mutex::new(VecDeque::new()),
                calls: AtomicUsize::new(0),
            }),
        }
    }

    pub fn respond(&self, response: Result<AlertSet, AlertError>) -> &Self {
        self.inner.responses.lock().unwrap().push_back(response);
        self
    }

    pub fn calls(&self) -> usize {
        self.inner.calls.load(Ordering::SeqCst)
    }
}

impl SnapshotSource for FakeSource {
    async fn fetch(&self, endpoint: &PullEndpoint) -> Result<AlertSet, AlertError> {
        self.inner.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.inner.responses.lock().unwrap().pop_front();
        next.unwrap_or_else(|| {
            Err(AlertError::Transport {
                endpoint: endpoint.url.clone(),
                reason: "no scripted response".to_string(),
            })
        })
    }
}

// ── Fixtures ────────────────────────────────────────────────────────────────

pub fn config(push_enabled: bool, fetch_on_start: bool) -> FeedConfig {
    FeedConfig {
        base_url: "http://alerts.test".to_string(),
        push_enabled,
        fetch_on_start,
        ..FeedConfig::default()
    }
}

pub fn inactive(id: &str, name: &str) -> AlertRecord {
    AlertRecord::new(id, name, AlertCategory::Inactivity, "no purchases in 30 days")
}

pub fn missing(id: &str, name: &str, items: &[&str]) -> AlertRecord {
    AlertRecord::new(id, name, AlertCategory::MissingItem, "stopped buying usual items")
        .with_missing_items(items.iter().copied())
}

pub fn set(records: Vec<AlertRecord>) -> AlertSet {
    AlertSet::new(records)
}

pub fn text(json: &str) -> Result<FeedFrame, AlertError> {
    Ok(FeedFrame::Text(json.to_string()))
}

pub fn ids(snapshot: &AlertSnapshot) -> Vec<String> {
    snapshot
        .alerts()
        .iter()
        .map(|r| r.customer_id.clone())
        .collect()
}

/// Wait until the store reaches `revision`, failing after a simulated minute.
pub async fn wait_for_revision(rx: &mut watch::Receiver<AlertSnapshot>, revision: u64) -> AlertSnapshot {
    tokio::time::timeout(Duration::from_secs(60), rx.wait_for(|s| s.revision() >= revision))
        .await
        .expect("timed out waiting for the store")
        .expect("store dropped")
        .clone()
}

/// Let every runnable task make progress.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}
