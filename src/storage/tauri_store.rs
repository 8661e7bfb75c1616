use std::sync::Arc;
use tauri::Runtime;
use tauri_plugin_store::{Store, StoreExt};
use crate::storage::KeyValueStore;
use crate::utils::GalleryResult;

/// [`KeyValueStore`] backed by a store-plugin JSON file in the app data
/// directory.
///
/// Values are kept as JSON strings and flushed to disk on every write.
pub struct TauriStore<R: Runtime> {
    store: Arc<Store<R>>,
}

impl<R: Runtime> TauriStore<R> {
    pub fn open(app: &tauri::AppHandle<R>, file: &str) -> GalleryResult<Self> {
        Ok(Self { store: app.store(file)? })
    }
}

impl<R: Runtime> KeyValueStore for TauriStore<R> {
    fn get(&self, key: &str) -> GalleryResult<Option<String>> {
        Ok(self.store.get(key).map(|value| match value {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        }))
    }

    fn set(&self, key: &str, value: &str) -> GalleryResult<()> {
        self.store.set(key, value);
        self.store.save()?;
        Ok(())
    }
}
