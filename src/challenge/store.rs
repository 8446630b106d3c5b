//! Challenge storage.
//!
//! Token-keyed storage capability for pending challenges, plus a
//! lock-free in-memory implementation. A put fully replaces any prior
//! entry under the same token; entries are read concurrently during
//! verification and never mutated in place.

use crate::puzzle::Picture;
use papaya::HashMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// One pending challenge with its creation time.
#[derive(Debug)]
pub struct StoredChallenge {
    pub picture: Picture,
    pub created_at: u64,
}

impl StoredChallenge {
    /// Wraps a freshly-scrambled picture with the current epoch time.
    #[must_use]
    pub fn new(picture: Picture) -> Self {
        let created_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        Self {
            picture,
            created_at,
        }
    }

    /// Whether this challenge has outlived its lifetime.
    #[must_use]
    pub fn expired(&self, ttl_secs: u64) -> bool {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        now.saturating_sub(self.created_at) > ttl_secs
    }
}

/// Get/put/delete capability for pending challenges, keyed by an opaque
/// token.
pub trait ChallengeStore: Send + Sync {
    /// Stores a challenge, fully replacing any prior entry for `token`.
    fn put(&self, token: &str, challenge: StoredChallenge);

    /// Fetches the challenge stored under `token`, if any.
    fn get(&self, token: &str) -> Option<Arc<StoredChallenge>>;

    /// Discards the challenge stored under `token`.
    fn delete(&self, token: &str);
}

/// In-memory store backed by a concurrent map.
#[derive(Default)]
pub struct MemoryStore {
    entries: HashMap<String, Arc<StoredChallenge>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl ChallengeStore for MemoryStore {
    fn put(&self, token: &str, challenge: StoredChallenge) {
        self.entries
            .pin()
            .insert(token.to_string(), Arc::new(challenge));
    }

    fn get(&self, token: &str) -> Option<Arc<StoredChallenge>> {
        self.entries.pin().get(token).cloned()
    }

    fn delete(&self, token: &str) {
        self.entries.pin().remove(token);
    }
}
