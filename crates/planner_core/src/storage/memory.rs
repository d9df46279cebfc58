//! In-process key-value backend.
//!
//! Clones share one map, so a clone handed to a second store sees everything
//! the first one wrote. Tests use this to simulate a reload.

use super::{KeyValueBackend, StorageError, StorageResult};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug)]
struct MemoryState {
    entries: BTreeMap<String, String>,
    available: bool,
}

/// Shared, switchable in-memory backend.
#[derive(Debug, Clone)]
pub struct MemoryBackend {
    state: Arc<Mutex<MemoryState>>,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MemoryState {
                entries: BTreeMap::new(),
                available: true,
            })),
        }
    }

    /// Toggles reachability; an unavailable backend fails every call.
    pub fn set_available(&self, available: bool) {
        if let Ok(mut state) = self.state.lock() {
            state.available = available;
        }
    }

    /// Reads the raw stored text, bypassing availability.
    pub fn raw_entry(&self, key: &str) -> Option<String> {
        self.state
            .lock()
            .ok()
            .and_then(|state| state.entries.get(key).cloned())
    }

    /// Stores raw text, bypassing availability and JSON encoding.
    pub fn insert_raw(&self, key: &str, value: &str) {
        if let Ok(mut state) = self.state.lock() {
            state.entries.insert(key.to_string(), value.to_string());
        }
    }

    pub fn len(&self) -> usize {
        self.state.lock().map_or(0, |state| state.entries.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn reachable(&self) -> StorageResult<MutexGuard<'_, MemoryState>> {
        let state = self
            .state
            .lock()
            .map_err(|_| StorageError::Unavailable("memory backend lock poisoned".to_string()))?;
        if !state.available {
            return Err(StorageError::Unavailable(
                "memory backend switched off".to_string(),
            ));
        }
        Ok(state)
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.reachable()?.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.reachable()?
            .entries
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.reachable()?.entries.remove(key);
        Ok(())
    }

    fn clear(&mut self) -> StorageResult<()> {
        self.reachable()?.entries.clear();
        Ok(())
    }
}
