//! # retention-alerts
//!
//! Keeps a client-side alert set current from two independent sources: a
//! WebSocket push channel and a periodic HTTP pull. Both deliver complete
//! sets; a single consumer folds every delivery into [`AlertStore`] with
//! last-write-wins semantics. [`AlertBoard`] partitions the current set by
//! category for display.
//!
//! The pull channel is the correctness backstop. When push fails it is not
//! reconnected; the next pull cycle repairs any staleness.

pub mod board;
pub mod classify;
pub mod engine;
pub mod inbox;
pub mod lease;
pub mod snapshot;
pub mod store;
pub mod stream;
pub mod transport;

mod task;

pub use board::{AlertBoard, BoardSection};
pub use classify::{by_category, duplicate_keys, total_count};
pub use engine::{AlertSync, LiveAlertSync};
pub use inbox::{AlertOrigin, Delivery, Inbox, InboxSender};
pub use lease::Lease;
pub use snapshot::{PullEndpoint, SnapshotFetcher, SnapshotSource};
pub use store::{AlertSnapshot, AlertStore, StoreState};
pub use stream::{FeedConnector, FeedFrame, FeedStatus, FeedStream, StreamSubscriber};
pub use transport::{FeedScope, HttpSnapshotSource, ShapePolicy, WsConnector};
