use tracing::{debug, error};
use crate::core::Gallery;
use crate::storage::KeyValueStore;
use crate::utils::GalleryResult;

/// Reads and writes the gallery as a JSON array under a fixed key.
#[derive(Debug, Clone)]
pub struct GalleryRepository {
    key: String,
}

impl GalleryRepository {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// Loads the gallery. Absence, read failure or a parse failure all yield
    /// an empty gallery.
    pub fn load(&self, store: &impl KeyValueStore) -> Gallery {
        let raw = match store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No saved gallery under '{}'", self.key);
                return Gallery::new();
            }
            Err(e) => {
                error!("Error loading the gallery: {}", e);
                return Gallery::new();
            }
        };

        match serde_json::from_str::<Gallery>(&raw) {
            Ok(gallery) => {
                debug!("Loaded {} gallery entries", gallery.len());
                gallery
            }
            Err(e) => {
                error!("Error loading the gallery: {}", e);
                Gallery::new()
            }
        }
    }

    /// Overwrites the stored gallery.
    pub fn save(&self, store: &impl KeyValueStore, gallery: &Gallery) -> GalleryResult<()> {
        let raw = serde_json::to_string(gallery)?;
        store.set(&self.key, &raw)?;
        debug!("Saved {} gallery entries", gallery.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn save_then_load_reproduces_the_list() {
        let store = MemoryStore::new();
        let repo = GalleryRepository::new("photo_gallery");
        let gallery = Gallery::from(vec![
            "file:///docs/1.jpeg".to_string(),
            "data:image/jpeg;base64,/9j/4AAQ".to_string(),
            "file:///docs/1.jpeg".to_string(),
        ]);

        repo.save(&store, &gallery).unwrap();
        assert_eq!(repo.load(&store), gallery);
    }

    #[test]
    fn stored_representation_is_a_json_array() {
        let store = MemoryStore::new();
        let repo = GalleryRepository::new("photo_gallery");
        repo.save(&store, &Gallery::from(vec!["a".to_string()])).unwrap();
        assert_eq!(store.get("photo_gallery").unwrap().as_deref(), Some(r#"["a"]"#));
    }

    #[test]
    fn missing_key_loads_empty() {
        let repo = GalleryRepository::new("photo_gallery");
        assert!(repo.load(&MemoryStore::new()).is_empty());
    }

    #[test]
    fn unparsable_value_loads_empty() {
        let repo = GalleryRepository::new("photo_gallery");
        let store = MemoryStore::with_value("photo_gallery", "{not json");
        assert!(repo.load(&store).is_empty());

        let store = MemoryStore::with_value("photo_gallery", r#"{"a": 1}"#);
        assert!(repo.load(&store).is_empty());
    }

    #[test]
    fn failed_save_surfaces_persistence_error() {
        let store = MemoryStore::new();
        store.fail_writes(true);
        let repo = GalleryRepository::new("photo_gallery");
        let err = repo.save(&store, &Gallery::new()).unwrap_err();
        assert!(matches!(err, crate::utils::GalleryError::PersistenceFailed(_)));
    }
}
