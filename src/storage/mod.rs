//! Local key-value persistence.
//!
//! - [`KeyValueStore`]: string values under string keys
//! - [`MemoryStore`]: in-process store, used headless and in tests
//! - [`TauriStore`]: store-plugin backed JSON file
//! - [`GalleryRepository`]: the gallery list as one JSON array under a fixed key

mod memory;
mod repository;
mod tauri_store;

pub use memory::MemoryStore;
pub use repository::GalleryRepository;
pub use tauri_store::TauriStore;

use crate::utils::GalleryResult;

/// Synchronous string key-value storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> GalleryResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> GalleryResult<()>;
}
