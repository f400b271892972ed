use std::time::Duration;

use crate::infra::config::JmaConfig;

/// Build a reqwest client with the default JMA timeouts.
pub fn make_http_client() -> reqwest::Client {
    make_http_client_with(&JmaConfig::default())
}

/// Build a reqwest client honoring configured timeouts.
pub fn make_http_client_with(cfg: &JmaConfig) -> reqwest::Client {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_millis(cfg.connect_timeout_ms))
        .timeout(Duration::from_millis(cfg.timeout_ms))
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default http client");
            reqwest::Client::new()
        })
}
