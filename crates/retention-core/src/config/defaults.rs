// Single source of truth for all default values.

// --- Feed ---
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_ALERTS_PATH: &str = "/alertas";
pub const DEFAULT_TODAY_PATH: &str = "/alertas/hoje";
pub const DEFAULT_PUSH_PATH: &str = "/ws/alertas";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_FETCH_ON_START: bool = true;
pub const DEFAULT_PUSH_ENABLED: bool = true;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
