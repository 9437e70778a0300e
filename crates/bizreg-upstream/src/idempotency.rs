//! Token-to-outcome cache for duplicate submission replay.
//!
//! The cache maps a caller-supplied idempotency token to the outcome its
//! first submission produced. A later request bearing the same token, before
//! the entry expires, replays that outcome without contacting the upstream
//! service. Entries are volatile and process-local; losing them on restart
//! is accepted.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::RwLock;

use crate::client::UpstreamOutcome;

/// Default entry lifetime.
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

struct Entry {
    outcome: UpstreamOutcome,
    expires_at: Instant,
}

/// A cache of upstream outcomes keyed by idempotency token.
pub struct IdempotencyCache {
    ttl: Duration,
    entries: RwLock<HashMap<String, Entry>>,
}

impl IdempotencyCache {
    /// Create a cache whose entries live for `ttl`.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Get the cached outcome for `token`, if present and unexpired.
    #[must_use]
    pub fn lookup(&self, token: &str) -> Option<UpstreamOutcome> {
        let entries = self.entries.read();
        let entry = entries.get(token)?;
        if Instant::now() < entry.expires_at {
            Some(entry.outcome.clone())
        } else {
            None
        }
    }

    /// Record the outcome for `token`, overwriting any prior entry.
    ///
    /// Expired entries are purged on the same write lock.
    pub fn store(&self, token: &str, outcome: &UpstreamOutcome) {
        let now = Instant::now();
        let mut entries = self.entries.write();
        entries.retain(|_, entry| now < entry.expires_at);
        entries.insert(
            token.to_string(),
            Entry {
                outcome: outcome.clone(),
                expires_at: now + self.ttl,
            },
        );
    }

    /// Number of live plus not-yet-purged entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Default for IdempotencyCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
