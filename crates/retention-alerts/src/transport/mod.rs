//! Transport layer: wire protocol decoding, HTTP pull source, WebSocket push
//! connector.

pub mod http_client;
pub mod protocol;
pub mod ws_connector;

pub use http_client::HttpSnapshotSource;
pub use protocol::{decode_alert_set, FeedScope, ShapePolicy};
pub use ws_connector::WsConnector;
