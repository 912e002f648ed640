//! Key-value persistence for settings, tasks, achievements, the session
//! log, and the in-progress timer snapshot.
//!
//! The store is injected into the lifecycle runner rather than reached
//! through a global. Reads that find a missing or corrupt value fall back
//! to a default (logged, never thrown); writes are synchronous and
//! best-effort.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;

use crate::error::StoreError;

/// Persisted key space. Values are JSON-encoded structured records.
pub mod keys {
    pub const SETTINGS: &str = "settings";
    pub const SESSIONS: &str = "sessions";
    pub const TIMER_STATE: &str = "timer-state";
    pub const TASKS: &str = "tasks";
    pub const ACHIEVEMENTS: &str = "achievements";
}

/// String-keyed persistence seam.
///
/// Implementations only move raw strings; the typed helpers layered on top
/// own the corrupt-value fallback policy.
pub trait Store {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn put_raw(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Read and decode a value, substituting `T::default()` when the key is
    /// missing, the store is unavailable, or the payload does not parse.
    fn load<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        match self.get_raw(key) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(err) => {
                    tracing::warn!(key, %err, "corrupt value in store, using default");
                    T::default()
                }
            },
            Ok(None) => T::default(),
            Err(err) => {
                tracing::warn!(key, %err, "store read failed, using default");
                T::default()
            }
        }
    }

    /// Encode and write a value.
    fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value).map_err(|source| StoreError::EncodeFailed {
            key: key.to_string(),
            source,
        })?;
        self.put_raw(key, &raw)
    }
}

/// Returns `~/.config/focusloop[-dev]/` based on FOCUSLOOP_ENV, or the
/// directory named by FOCUSLOOP_DATA_DIR when set (used by the E2E tests).
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, StoreError> {
    let dir = match std::env::var("FOCUSLOOP_DATA_DIR") {
        Ok(explicit) => PathBuf::from(explicit),
        Err(_) => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("FOCUSLOOP_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("focusloop-dev")
            } else {
                base_dir.join("focusloop")
            }
        }
    };
    std::fs::create_dir_all(&dir).map_err(|e| StoreError::DataDir(e.to_string()))?;
    Ok(dir)
}
