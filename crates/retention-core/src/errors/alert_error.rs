/// Errors raised at the alert channel boundary. None of them is fatal: the
/// store keeps its last good set whenever one of these occurs.
#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    #[error("transport error on {endpoint}: {reason}")]
    Transport { endpoint: String, reason: String },

    #[error("{endpoint} answered with HTTP {status}")]
    UnexpectedStatus { endpoint: String, status: u16 },

    #[error("malformed alert payload: {reason}")]
    MalformedPayload { reason: String },

    #[error("invalid endpoint {endpoint}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("{channel} channel closed")]
    ChannelClosed { channel: String },
}

impl AlertError {
    /// Whether the failure came from the network rather than the payload.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::UnexpectedStatus { .. } | Self::ChannelClosed { .. }
        )
    }
}
