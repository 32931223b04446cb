//! Span definitions per channel operation.

/// Create a push channel span.
#[macro_export]
macro_rules! push_span {
    ($endpoint:expr) => {
        $crate::tracing::info_span!($crate::telemetry::spans::names::PUSH, endpoint = %$endpoint)
    };
}

/// Create a pull channel span.
#[macro_export]
macro_rules! pull_span {
    ($endpoint:expr, $interval:expr) => {
        $crate::tracing::info_span!($crate::telemetry::spans::names::PULL, endpoint = %$endpoint, interval = ?$interval)
    };
}

/// Create a span for the store's delivery consumer.
#[macro_export]
macro_rules! store_span {
    ($mount_id:expr) => {
        $crate::tracing::info_span!($crate::telemetry::spans::names::STORE, mount_id = %$mount_id)
    };
}

/// Span names, shared by the macros above and by log filters.
pub mod names {
    pub const PUSH: &str = "retention.push";
    pub const PULL: &str = "retention.pull";
    pub const STORE: &str = "retention.store";
}
