//! Per-client rate limiting.
//!
//! A fixed quota per fixed window, anchored per identity at its first
//! observed request rather than at a global clock boundary. State is
//! process-local; a restart silently resets every client's quota, which is
//! accepted at this scale.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// The outcome of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The request is within quota.
    Allowed,
    /// The quota is spent; the caller must not retry before `reset_at`.
    Denied {
        /// When the client's window resets.
        reset_at: Instant,
    },
}

#[derive(Debug, Clone, Copy)]
struct RateWindow {
    count: u32,
    reset_at: Instant,
}

/// A sliding-quota rate limiter keyed by client identity.
///
/// Entries are never explicitly deleted; an expired window is replaced the
/// next time its identity shows up, and stale entries are harmless.
pub struct RateLimiter {
    quota: u32,
    window: Duration,
    windows: Mutex<HashMap<String, RateWindow>>,
}

impl RateLimiter {
    /// Create a limiter admitting `quota` requests per `window` per identity.
    #[must_use]
    pub fn new(quota: u32, window: Duration) -> Self {
        Self {
            quota,
            window,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Check whether a request from `identity` is admitted now.
    pub fn admit(&self, identity: &str) -> Admission {
        self.admit_at(identity, Instant::now())
    }

    /// Admission check against an explicit clock, for deterministic tests.
    fn admit_at(&self, identity: &str, now: Instant) -> Admission {
        let mut windows = self.windows.lock();
        match windows.get_mut(identity) {
            // Live window: count only moves while now < reset_at.
            Some(window) if now < window.reset_at => {
                if window.count < self.quota {
                    window.count += 1;
                    Admission::Allowed
                } else {
                    Admission::Denied {
                        reset_at: window.reset_at,
                    }
                }
            }
            // First request from this identity, or its window has passed.
            _ => {
                windows.insert(
                    identity.to_string(),
                    RateWindow {
                        count: 1,
                        reset_at: now + self.window,
                    },
                );
                Admission::Allowed
            }
        }
    }

    /// Number of tracked identities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.windows.lock().len()
    }

    /// Whether no identity has been observed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.windows.lock().is_empty()
    }
}
