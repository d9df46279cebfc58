//! Fail-safe persistence adapter.
//!
//! # Responsibility
//! - Serialize typed values to JSON text and hand them to a backend.
//! - Turn every backend, availability or encoding failure into a default
//!   value or a `false` result.
//!
//! # Invariants
//! - No method panics or returns an error to the caller.
//! - Every failure path emits exactly one log event.

use super::{KeyValueBackend, StorageError, StorageResult};
use log::{debug, error, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

type Backend = Box<dyn KeyValueBackend + Send>;

/// Typed, total facade over an optional key-value backend.
pub struct PersistenceAdapter {
    backend: Option<Backend>,
}

impl PersistenceAdapter {
    pub fn new(backend: impl KeyValueBackend + Send + 'static) -> Self {
        Self {
            backend: Some(Box::new(backend)),
        }
    }

    /// Adapter with no reachable backing store; reads yield defaults and
    /// writes report `false`.
    pub fn unavailable() -> Self {
        Self { backend: None }
    }

    /// Returns whether a backend is attached.
    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    /// Returns the value stored at `key`, or `default` when the key is absent,
    /// the store is unreachable or the stored text does not decode.
    pub fn read<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let Some(backend) = self.backend.as_deref() else {
            warn!("event=storage_read module=storage status=unavailable key={key}");
            return default;
        };

        match backend.get(key).and_then(|raw| decode(raw.as_deref())) {
            Ok(Some(value)) => value,
            Ok(None) => {
                debug!("event=storage_read module=storage status=miss key={key}");
                default
            }
            Err(err) => {
                error!(
                    "event=storage_read module=storage status=error key={key} error_code={} error={err}",
                    error_code(&err)
                );
                default
            }
        }
    }

    /// Serializes `value` and stores it at `key`.
    ///
    /// Returns `false` when encoding fails or the store is unreachable.
    pub fn write<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> bool {
        self.run("storage_write", key, |backend| {
            let raw = serde_json::to_string(value)?;
            backend.set(key, &raw)
        })
    }

    pub fn remove(&mut self, key: &str) -> bool {
        self.run("storage_remove", key, |backend| backend.remove(key))
    }

    /// Drops every entry in the backing store, not only this crate's keys.
    pub fn clear_all(&mut self) -> bool {
        self.run("storage_clear", "*", |backend| backend.clear())
    }

    pub fn has(&self, key: &str) -> bool {
        let Some(backend) = self.backend.as_deref() else {
            warn!("event=storage_has module=storage status=unavailable key={key}");
            return false;
        };

        backend.contains(key).unwrap_or_else(|err| {
            error!(
                "event=storage_has module=storage status=error key={key} error_code={} error={err}",
                error_code(&err)
            );
            false
        })
    }

    fn run(
        &mut self,
        event: &str,
        key: &str,
        op: impl FnOnce(&mut (dyn KeyValueBackend + Send)) -> StorageResult<()>,
    ) -> bool {
        let Some(backend) = self.backend.as_deref_mut() else {
            warn!("event={event} module=storage status=unavailable key={key}");
            return false;
        };

        match op(backend) {
            Ok(()) => {
                debug!("event={event} module=storage status=ok key={key}");
                true
            }
            Err(err) => {
                error!(
                    "event={event} module=storage status=error key={key} error_code={} error={err}",
                    error_code(&err)
                );
                false
            }
        }
    }
}

fn decode<T: DeserializeOwned>(raw: Option<&str>) -> StorageResult<Option<T>> {
    raw.map(serde_json::from_str::<T>)
        .transpose()
        .map_err(StorageError::from)
}

fn error_code(err: &StorageError) -> &'static str {
    match err {
        StorageError::Unavailable(_) => "storage_unavailable",
        StorageError::Sqlite(_) => "storage_backend_failed",
        StorageError::Serialization(_) => "storage_serde_failed",
    }
}
