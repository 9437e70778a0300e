//! Gateway configuration types.

use std::time::Duration;

use serde::Deserialize;

use bizreg_upstream::DEFAULT_UPSTREAM_URL;

/// Configuration for the gateway service.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Listen address (e.g., "0.0.0.0:8080").
    #[serde(default = "GatewayConfig::default_listen_addr")]
    pub listen_addr: String,

    /// Upstream registration endpoint URL.
    #[serde(default = "GatewayConfig::default_upstream_url")]
    pub upstream_url: String,

    /// Requests admitted per client identity per window.
    #[serde(default = "GatewayConfig::default_quota")]
    pub rate_limit_quota: u32,

    /// Rate-limit window length in seconds.
    #[serde(default = "GatewayConfig::default_window")]
    pub rate_limit_window_seconds: u64,

    /// Maximum request body size in bytes.
    #[serde(default = "GatewayConfig::default_max_body")]
    pub max_body_bytes: usize,

    /// Whole-request timeout in seconds.
    #[serde(default = "GatewayConfig::default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl GatewayConfig {
    fn default_listen_addr() -> String {
        "0.0.0.0:8080".to_string()
    }

    fn default_upstream_url() -> String {
        DEFAULT_UPSTREAM_URL.to_string()
    }

    const fn default_quota() -> u32 {
        50
    }

    const fn default_window() -> u64 {
        86_400 // 24 hours
    }

    const fn default_max_body() -> usize {
        64 * 1024
    }

    const fn default_request_timeout() -> u64 {
        30
    }

    /// Get the rate-limit window as a `Duration`.
    #[must_use]
    pub const fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_seconds)
    }

    /// Get the request timeout as a `Duration`.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: Self::default_listen_addr(),
            upstream_url: Self::default_upstream_url(),
            rate_limit_quota: Self::default_quota(),
            rate_limit_window_seconds: Self::default_window(),
            max_body_bytes: Self::default_max_body(),
            request_timeout_seconds: Self::default_request_timeout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = GatewayConfig::default();
        assert_eq!(config.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.rate_limit_quota, 50);
        assert_eq!(config.rate_limit_window_seconds, 86_400);
        assert_eq!(config.upstream_url, DEFAULT_UPSTREAM_URL);
    }

    #[test]
    fn durations() {
        let config = GatewayConfig::default();
        assert_eq!(config.rate_limit_window(), Duration::from_secs(86_400));
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn partial_deserialization_fills_defaults() {
        let config: GatewayConfig =
            serde_json::from_str(r#"{"rate_limit_quota": 5}"#).unwrap();
        assert_eq!(config.rate_limit_quota, 5);
        assert_eq!(config.rate_limit_window_seconds, 86_400);
    }
}
