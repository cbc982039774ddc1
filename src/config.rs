//! Service configuration — env-backed settings and shared constants.

/// Environment variable overriding the inference service base URL.
pub const API_URL_ENV: &str = "CASEPIPE_API_URL";

/// Default inference service base URL for local development.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Client-side timeout applied to each remote pipeline call.
pub const REQUEST_TIMEOUT_MS: u64 = 5000;

/// Per-token rate used for the estimated-savings metric.
/// A presentation convenience, not a pipeline guarantee.
pub const COST_PER_TOKEN_USD: f64 = 0.0001;

/// Base URL of the remote inference service.
///
/// Reads `CASEPIPE_API_URL`, falling back to the local development default.
/// A trailing slash is trimmed so callers can join paths uniformly.
pub fn service_base_url() -> String {
    std::env::var(API_URL_ENV)
        .unwrap_or_else(|_| DEFAULT_API_URL.to_string())
        .trim_end_matches('/')
        .to_string()
}

/// Default log filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> String {
    "info,casepipe=debug".to_string()
}
