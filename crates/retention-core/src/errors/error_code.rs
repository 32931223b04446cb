use super::{AlertError, ConfigError, RetentionError};

/// Stable, machine-readable code for every error variant. Used as a
/// structured field in log events.
pub trait RetentionErrorCode {
    fn error_code(&self) -> &'static str;
}

impl RetentionErrorCode for AlertError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "ALERT_TRANSPORT",
            Self::UnexpectedStatus { .. } => "ALERT_HTTP_STATUS",
            Self::MalformedPayload { .. } => "ALERT_MALFORMED",
            Self::InvalidEndpoint { .. } => "ALERT_ENDPOINT",
            Self::ChannelClosed { .. } => "ALERT_CHANNEL_CLOSED",
        }
    }
}

impl RetentionErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::FileNotFound { .. } => "CONFIG_NOT_FOUND",
            Self::ParseError { .. } => "CONFIG_PARSE",
            Self::ValidationFailed { .. } => "CONFIG_INVALID",
        }
    }
}

impl RetentionErrorCode for RetentionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Alert(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}
