//! Seen-seed tracking: remembers which room sequences were already announced, for a fixed time.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

/// Composite key for a room sequence: identifiers joined by `|`.
pub fn seed_key<S: AsRef<str>>(rooms: &[S]) -> String {
    rooms
        .iter()
        .map(|room| room.as_ref())
        .collect::<Vec<_>>()
        .join("|")
}

/// Maps a seed key to the time its entry expires.
#[derive(Debug, Clone)]
pub struct SeenSeedCache {
    ttl: Duration,
    expiry: HashMap<String, DateTime<Utc>>,
}

impl SeenSeedCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            expiry: HashMap::new(),
        }
    }

    pub fn has_seen_at(&self, key: &str, now: DateTime<Utc>) -> bool {
        self.expiry.get(key).is_some_and(|expires| *expires > now)
    }

    pub fn mark_seen_at(&mut self, key: &str, now: DateTime<Utc>) {
        self.expiry.insert(key.to_string(), now + self.ttl);
    }

    /// Mark `key` as seen and report whether it was new (not seen or expired).
    ///
    /// Expired entries are dropped first, so the map only ever holds live keys.
    pub fn check_and_mark_at(&mut self, key: &str, now: DateTime<Utc>) -> bool {
        let purged = self.purge_expired_at(now);
        if purged > 0 {
            log::debug!("dropped {purged} expired seed key(s)");
        }
        let fresh = !self.has_seen_at(key, now);
        if fresh {
            self.mark_seen_at(key, now);
        }
        fresh
    }

    /// Drop expired entries; returns how many were removed.
    pub fn purge_expired_at(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.expiry.len();
        self.expiry.retain(|_, expires| *expires > now);
        before - self.expiry.len()
    }

    pub fn len(&self) -> usize {
        self.expiry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expiry.is_empty()
    }
}
