//! HTTP client for the registration upstream service.
//!
//! This module provides the [`SubmitClient`] trait the gateway calls through
//! and its reqwest implementation, [`HttpSubmitClient`], which handles
//! per-attempt timeouts, bounded linear-backoff retries, idempotent replay,
//! and the best-effort JSON parse of the upstream body.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{Result, UpstreamError};
use crate::idempotency::{IdempotencyCache, DEFAULT_TTL};

/// The production upstream endpoint.
pub const DEFAULT_UPSTREAM_URL: &str = "https://ss-company.free.beeceptor.com/company";

/// Header used to forward the caller's idempotency token upstream.
const IDEMPOTENCY_HEADER: &str = "Idempotency-Key";

/// Flattened address shape sent upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// First address line.
    pub line1: String,
    /// Second address line, empty when not provided.
    pub line2: String,
    /// City.
    pub city: String,
    /// State or region code.
    pub state: String,
    /// Five-digit ZIP code.
    pub zip: String,
}

/// Flattened contact shape sent upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    /// Contact first name.
    pub first_name: String,
    /// Contact last name.
    pub last_name: String,
    /// Contact email address.
    pub email: String,
    /// Display phone, dial code plus local number (e.g. `+1 (415) 555-0100`).
    pub phone: String,
}

/// The canonical payload sent to the upstream service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitPayload {
    /// Legal business name.
    pub name: String,
    /// Business type.
    #[serde(rename = "type")]
    pub business_type: String,
    /// Business address.
    pub address: Address,
    /// Contact details.
    pub contact: ContactInfo,
}

/// The result of a completed HTTP exchange with the upstream service.
///
/// `body` is always JSON: either the upstream's own body, or a synthesized
/// `{status, message}` object when the body was not valid JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamOutcome {
    /// HTTP status code of the upstream response.
    pub status: u16,
    /// Parsed (or synthesized) response body.
    pub body: serde_json::Value,
}

/// Configuration for the upstream client.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Endpoint URL for registration submissions.
    pub url: String,
    /// Per-attempt timeout; exceeding it cancels the in-flight call and
    /// counts as a failed attempt.
    pub attempt_timeout: Duration,
    /// Number of retries after the initial attempt.
    pub max_retries: u32,
    /// Backoff unit; attempt `n` sleeps `backoff_base * n` before retrying.
    pub backoff_base: Duration,
    /// Lifetime of cached idempotent outcomes.
    pub idempotency_ttl: Duration,
}

impl UpstreamConfig {
    /// Create a configuration for `url` with production defaults:
    /// 5 second attempt timeout, 2 retries, 300 ms linear backoff,
    /// 24 hour idempotency TTL.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            attempt_timeout: Duration::from_secs(5),
            max_retries: 2,
            backoff_base: Duration::from_millis(300),
            idempotency_ttl: DEFAULT_TTL,
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self::new(DEFAULT_UPSTREAM_URL)
    }
}

/// Trait for submitting registrations upstream.
///
/// This abstracts the upstream client interface, allowing for mock
/// implementations in tests.
#[async_trait]
pub trait SubmitClient: Send + Sync {
    /// Submit a registration payload, optionally under an idempotency token.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Transport`] when no HTTP exchange could be
    /// completed within the retry budget.
    async fn send(
        &self,
        payload: &SubmitPayload,
        idempotency_key: Option<&str>,
    ) -> Result<UpstreamOutcome>;
}

/// Reqwest-backed [`SubmitClient`].
///
/// When a request carries an idempotency token, a live cached outcome is
/// returned without a network call, and any freshly produced outcome
/// (including error responses) is cached before returning. Two concurrent
/// requests with the same token may both reach the network before either
/// result is cached; only serialized-after requests are guaranteed a replay.
pub struct HttpSubmitClient {
    client: reqwest::Client,
    config: UpstreamConfig,
    cache: IdempotencyCache,
}

impl HttpSubmitClient {
    /// Create a new upstream client.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created (should never happen with
    /// default TLS).
    #[must_use]
    pub fn new(config: UpstreamConfig) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()
            .expect("failed to create HTTP client");

        Self::with_client(client, config)
    }

    /// Create an upstream client with a custom reqwest client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, config: UpstreamConfig) -> Self {
        let cache = IdempotencyCache::new(config.idempotency_ttl);
        Self {
            client,
            config,
            cache,
        }
    }

    /// The configured endpoint URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.config.url
    }

    /// Execute a single attempt against the upstream service.
    ///
    /// Any received response is a success here; the body is read as text and
    /// parsed as JSON, falling back to a synthesized `{status, message}`
    /// object when parsing fails.
    async fn attempt(
        &self,
        payload: &SubmitPayload,
        idempotency_key: Option<&str>,
    ) -> std::result::Result<UpstreamOutcome, reqwest::Error> {
        let mut request = self
            .client
            .post(&self.config.url)
            .timeout(self.config.attempt_timeout)
            .json(payload);
        if let Some(key) = idempotency_key {
            request = request.header(IDEMPOTENCY_HEADER, key);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let ok = response.status().is_success();
        let text = response.text().await?;

        let body = serde_json::from_str(&text).unwrap_or_else(|_| synthesize_body(ok, &text));
        Ok(UpstreamOutcome { status, body })
    }
}

#[async_trait]
impl SubmitClient for HttpSubmitClient {
    async fn send(
        &self,
        payload: &SubmitPayload,
        idempotency_key: Option<&str>,
    ) -> Result<UpstreamOutcome> {
        if let Some(key) = idempotency_key {
            if let Some(cached) = self.cache.lookup(key) {
                tracing::debug!(status = cached.status, "replaying cached idempotent outcome");
                return Ok(cached);
            }
        }

        let total_attempts = self.config.max_retries + 1;
        let mut last_error = String::new();

        for attempt in 1..=total_attempts {
            match self.attempt(payload, idempotency_key).await {
                Ok(outcome) => {
                    if let Some(key) = idempotency_key {
                        // Error outcomes are cached too: a duplicate
                        // submission replays the same result rather than
                        // re-attempting.
                        self.cache.store(key, &outcome);
                    }
                    tracing::debug!(status = outcome.status, attempt, "upstream responded");
                    return Ok(outcome);
                }
                Err(err) => {
                    tracing::warn!(attempt, total_attempts, error = %err, "upstream attempt failed");
                    last_error = err.to_string();
                    if attempt < total_attempts {
                        tokio::time::sleep(self.config.backoff_base * attempt).await;
                    }
                }
            }
        }

        Err(UpstreamError::Transport(last_error))
    }
}

/// Synthesize a minimal outcome body from the HTTP status and raw text.
fn synthesize_body(ok: bool, text: &str) -> serde_json::Value {
    json!({
        "status": if ok { "ok" } else { "error" },
        "message": if text.is_empty() { "Unknown response" } else { text },
    })
}
