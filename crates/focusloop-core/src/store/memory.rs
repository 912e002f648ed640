//! In-memory store for tests and ephemeral runs.

use std::collections::HashMap;
use std::sync::Mutex;

use super::Store;
use crate::error::StoreError;

#[derive(Debug, Default)]
pub struct MemoryStore {
    map: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        let map = self
            .map
            .lock()
            .map_err(|_| StoreError::QueryFailed("store mutex poisoned".into()))?;
        Ok(map.get(key).cloned())
    }

    fn put_raw(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut map = self
            .map
            .lock()
            .map_err(|_| StoreError::QueryFailed("store mutex poisoned".into()))?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
