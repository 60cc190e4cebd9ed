//! Keyed store of short-lived string values.
//!
//! Each entry carries its own expiry. Expired entries are invisible to `get` and are dropped on
//! access; `purge_expired` sweeps the rest.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};

use crate::clock::Clock;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct ExpiringStore<C: Clock> {
    clock: C,
    entries: Mutex<HashMap<String, Entry>>,
}

impl<C: Clock> ExpiringStore<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Stores `value` under `key` until `now + ttl`, replacing any previous value. Returns the
    /// expiry instant.
    pub fn put(&self, key: &str, value: impl Into<String>, ttl: Duration) -> DateTime<Utc> {
        let expires_at = self.clock.now() + ttl;
        self.lock().insert(
            key.to_string(),
            Entry {
                value: value.into(),
                expires_at,
            },
        );
        expires_at
    }

    /// Live value for `key`. An entry is expired once `now >= expires_at`.
    pub fn get(&self, key: &str) -> Option<String> {
        let now = self.clock.now();
        let mut entries = self.lock();
        let entry = entries.get(key)?.clone();
        if now < entry.expires_at {
            Some(entry.value)
        } else {
            entries.remove(key);
            None
        }
    }

    /// Removes `key`, returning its value if it was still live.
    pub fn remove(&self, key: &str) -> Option<String> {
        let now = self.clock.now();
        self.lock()
            .remove(key)
            .filter(|entry| now < entry.expires_at)
            .map(|entry| entry.value)
    }

    /// Drops every expired entry and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, entry| now < entry.expires_at);
        before - entries.len()
    }

    /// Number of stored entries, expired ones included until purged.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Entry>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}
