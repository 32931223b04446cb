//! Push channel transport over `tokio-tungstenite`.
//!
//! `wss://` endpoints go through `native-tls`, the same TLS stack `reqwest`
//! uses for the pull channel.

use futures_util::StreamExt;
use tokio_tungstenite::tungstenite::Message;

use retention_core::errors::AlertError;

use crate::stream::{FeedConnector, FeedFrame, FeedStream};

/// [`FeedConnector`] that opens a WebSocket and maps its messages to frames.
/// Control frames are handled by the transport and never surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct WsConnector;

impl FeedConnector for WsConnector {
    async fn connect(&self, endpoint: &str) -> Result<FeedStream, AlertError> {
        if !(endpoint.starts_with("ws://") || endpoint.starts_with("wss://")) {
            return Err(AlertError::InvalidEndpoint {
                endpoint: endpoint.to_string(),
                reason: "expected a ws:// or wss:// URL".to_string(),
            });
        }

        let (socket, response) = tokio_tungstenite::connect_async(endpoint)
            .await
            .map_err(|e| AlertError::Transport {
                endpoint: endpoint.to_string(),
                reason: e.to_string(),
            })?;
        tracing::debug!(status = %response.status(), "push: handshake complete");

        let endpoint = endpoint.to_string();
        let frames = socket.filter_map(move |message| {
            let frame = match message {
                Ok(Message::Text(text)) => Some(Ok(FeedFrame::Text(text))),
                Ok(Message::Binary(bytes)) => Some(Ok(FeedFrame::Binary(bytes))),
                Ok(Message::Close(_)) => Some(Ok(FeedFrame::Closed)),
                Ok(Message::Ping(_) | Message::Pong(_) | Message::Frame(_)) => None,
                Err(e) => Some(Err(AlertError::Transport {
                    endpoint: endpoint.clone(),
                    reason: e.to_string(),
                })),
            };
            futures_util::future::ready(frame)
        });

        Ok(frames.boxed())
    }
}
