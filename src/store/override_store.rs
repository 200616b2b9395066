use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

pub fn override_key(agent_id: &str, metric: &str) -> String {
    format!("{agent_id}::{metric}")
}

// Tracks which (agent, metric) pairs currently have an override on the
// gate, keyed by `override_key`. The store itself never talks to the gate;
// it only records what the gate last confirmed. Per-key locks are handed
// out so the processor can serialize the full read/call/write transition
// for one key without blocking transitions for any other key.
#[derive(Clone)]
pub struct OverrideStore {
    active: Arc<DashMap<String, String>>,
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl Default for OverrideStore {
    fn default() -> Self {
        Self::new()
    }
}

impl OverrideStore {
    pub fn new() -> Self {
        Self {
            active: Arc::new(DashMap::new()),
            locks: Arc::new(DashMap::new()),
        }
    }

    pub fn has(&self, key: &str) -> bool {
        self.active.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.active.get(key).map(|id| id.clone())
    }

    pub fn put(&self, key: String, override_id: String) {
        self.active.insert(key, override_id);
    }

    pub fn remove(&self, key: &str) -> bool {
        self.active.remove(key).is_some()
    }

    pub fn size(&self) -> usize {
        self.active.len()
    }

    pub fn key_lock(&self, key: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    // Drops the lock entry for a key unless some task still holds a
    // handle to it. A holder count of one means only the map itself
    // references the mutex, so no waiter can be parked on it; the next
    // key_lock call recreates a fresh entry. Keeps the lock map bounded
    // by keys with tracked overrides instead of every key ever seen.
    pub fn release_lock(&self, key: &str) {
        self.locks
            .remove_if(key, |_, lock| Arc::strong_count(lock) == 1);
    }

    pub fn lock_count(&self) -> usize {
        self.locks.len()
    }
}
