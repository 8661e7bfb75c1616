use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use crate::storage::KeyValueStore;
use crate::utils::{GalleryError, GalleryResult};

/// In-memory [`KeyValueStore`].
///
/// Clones share the same map, so a clone handed to a second service sees
/// what the first one saved. Writes can be made to fail to exercise the
/// persistence error paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Arc<Mutex<HashMap<String, String>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::default();
        if let Ok(mut values) = store.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
        store
    }

    /// Makes every following `set` fail until switched back.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> GalleryResult<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|_| GalleryError::persistence("Memory store is poisoned"))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> GalleryResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(GalleryError::persistence(format!("Write to '{}' refused", key)));
        }
        let mut values = self
            .values
            .lock()
            .map_err(|_| GalleryError::persistence("Memory store is poisoned"))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_values() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.set("k", "v").unwrap();
        assert_eq!(other.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn failing_writes_leave_previous_value() {
        let store = MemoryStore::with_value("k", "old");
        store.fail_writes(true);
        assert!(store.set("k", "new").is_err());
        assert_eq!(store.get("k").unwrap().as_deref(), Some("old"));
    }
}
