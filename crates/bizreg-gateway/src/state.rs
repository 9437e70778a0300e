//! Gateway application state.
//!
//! The two pieces of shared, mutable, process-wide state (the rate-limit
//! table, and the idempotency cache owned by the upstream client) live here
//! as injected components so handlers can be tested in isolation with fresh
//! state.

use std::sync::Arc;

use bizreg_upstream::SubmitClient;

use crate::config::GatewayConfig;
use crate::ratelimit::RateLimiter;

/// Shared application state for the gateway.
pub struct AppState<C>
where
    C: SubmitClient,
{
    /// The upstream submission client.
    pub client: Arc<C>,
    /// The per-client rate limiter.
    pub limiter: Arc<RateLimiter>,
    /// Gateway configuration.
    pub config: GatewayConfig,
}

impl<C> AppState<C>
where
    C: SubmitClient,
{
    /// Create a new gateway state, deriving the rate limiter from `config`.
    #[must_use]
    pub fn new(client: Arc<C>, config: GatewayConfig) -> Self {
        let limiter = Arc::new(RateLimiter::new(
            config.rate_limit_quota,
            config.rate_limit_window(),
        ));
        Self {
            client,
            limiter,
            config,
        }
    }
}

impl<C> Clone for AppState<C>
where
    C: SubmitClient,
{
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            limiter: Arc::clone(&self.limiter),
            config: self.config.clone(),
        }
    }
}
