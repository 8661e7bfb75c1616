//! Capture and gallery orchestration.

use std::sync::Arc;
use tracing::{debug, error, info, warn};
use crate::core::{AppConfig, CaptureProgress, CaptureSettings, CaptureStage, Gallery};
use crate::platform::{CaptureBackend, Notice, Notifier};
use crate::storage::{GalleryRepository, KeyValueStore};
use crate::utils::{Clock, GalleryError, GalleryResult, SystemClock, photo_file_name};

/// Shown to the user when a capture fails for any reason other than
/// permissions.
pub const CAPTURE_ERROR_MESSAGE: &str = "Error capturing the image";

/// Receives every stage change of a capture.
pub type ProgressReporter = Arc<dyn Fn(&CaptureProgress) + Send + Sync>;

/// Owns the gallery and drives captures through a [`CaptureBackend`].
///
/// The gallery is loaded once on construction and written back in full after
/// every mutation. Mutating calls are not guarded against overlap; callers
/// that need consistency must not run them concurrently.
pub struct CameraService<B, S, N> {
    backend: B,
    store: S,
    notifier: N,
    clock: Arc<dyn Clock>,
    repository: GalleryRepository,
    capture: CaptureSettings,
    gallery: Gallery,
    stage: CaptureStage,
    reporter: Option<ProgressReporter>,
}

impl<B, S, N> CameraService<B, S, N>
where
    B: CaptureBackend,
    S: KeyValueStore,
    N: Notifier,
{
    pub fn new(backend: B, store: S, notifier: N, config: &AppConfig) -> Self {
        let repository = GalleryRepository::new(config.gallery.key.clone());
        let gallery = repository.load(&store);
        info!("Gallery loaded with {} photos ({:?} capture)", gallery.len(), backend.kind());

        Self {
            backend,
            store,
            notifier,
            clock: Arc::new(SystemClock),
            repository,
            capture: config.capture.clone(),
            gallery,
            stage: CaptureStage::Idle,
            reporter: None,
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn with_progress(mut self, reporter: ProgressReporter) -> Self {
        self.reporter = Some(reporter);
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Current photo identifiers in capture order.
    pub fn gallery(&self) -> &[String] {
        self.gallery.entries()
    }

    pub fn stage(&self) -> CaptureStage {
        self.stage
    }

    /// Asks for camera access.
    ///
    /// A plain refusal returns `false` quietly. A failing check counts as a
    /// refusal and shows the permission notice.
    pub async fn check_and_request_permissions(&self) -> bool {
        match self.backend.request_permission().await {
            Ok(granted) => {
                debug!("Camera permission granted: {}", granted);
                granted
            }
            Err(e) => {
                error!("Error requesting camera permissions: {}", e);
                self.notifier.notify(Notice::permission()).await;
                false
            }
        }
    }

    /// Captures, stores and appends a photo, returning its identifier.
    ///
    /// Every failure shows exactly one notice and returns `None`; the gallery
    /// is only touched once the photo is stored.
    pub async fn take_picture(&mut self) -> Option<String> {
        match self.try_take_picture().await {
            Ok(identifier) => {
                self.enter(CaptureProgress::succeeded(&identifier));
                info!("Captured {}", preview(&identifier));
                Some(identifier)
            }
            Err(e) => {
                error!("Error capturing image: {}", e);
                self.enter(CaptureProgress::failed(&e.to_string()));
                let notice = if e.is_permission() {
                    Notice::permission()
                } else {
                    Notice::error(CAPTURE_ERROR_MESSAGE)
                };
                self.notifier.notify(notice).await;
                None
            }
        }
    }

    async fn try_take_picture(&mut self) -> GalleryResult<String> {
        self.enter(CaptureProgress::stage(CaptureStage::PermissionCheck));
        let granted = match self.backend.request_permission().await {
            Ok(granted) => granted,
            Err(e) => {
                warn!("Permission check failed: {}", e);
                false
            }
        };
        if !granted {
            return Err(GalleryError::PermissionDenied);
        }

        self.enter(CaptureProgress::stage(CaptureStage::Capturing));
        let photo = self.backend.capture(&self.capture).await?;
        if photo.web_path.as_deref().is_none_or(str::is_empty) {
            return Err(GalleryError::capture("No valid image was obtained"));
        }
        let file_name = photo_file_name(self.clock.now_millis());

        self.enter(CaptureProgress::stage(CaptureStage::Converting));
        let base64 = self.backend.read_as_base64(&photo).await?;

        self.enter(CaptureProgress::stage(CaptureStage::Persisting));
        let identifier = self.backend.persist(&file_name, &base64).await?;
        if identifier.is_empty() {
            return Err(GalleryError::capture("Stored photo has no identifier"));
        }

        self.gallery.push(identifier.clone());
        self.save_gallery();
        Ok(identifier)
    }

    /// Deletes a photo, logging instead of returning any failure.
    pub async fn delete_photo(&mut self, identifier: &str) {
        if let Err(e) = self.try_delete_photo(identifier).await {
            error!("Error deleting photo: {}", e);
        }
    }

    /// Deletes the stored file, then drops every matching gallery entry and
    /// saves. A failed file deletion is logged and does not stop the rest.
    /// Returns how many entries were removed.
    pub async fn try_delete_photo(&mut self, identifier: &str) -> GalleryResult<usize> {
        if let Err(e) = self.backend.remove(identifier).await {
            warn!("Error deleting photo file: {}", e);
        }

        let removed = self.gallery.remove_all(identifier);
        debug!("Removed {} gallery entries", removed);
        self.repository.save(&self.store, &self.gallery)?;
        Ok(removed)
    }

    /// Clears the gallery, logging instead of returning any failure.
    pub async fn clear_gallery(&mut self) {
        if let Err(e) = self.try_clear_gallery().await {
            error!("Error clearing the gallery: {}", e);
        }
    }

    /// Deletes every stored photo in order, then empties and saves the
    /// gallery. The first failed deletion aborts: files already deleted stay
    /// deleted while the list is left as it was.
    pub async fn try_clear_gallery(&mut self) -> GalleryResult<()> {
        for identifier in self.gallery.iter() {
            self.backend.remove(identifier).await?;
        }

        self.gallery.clear();
        self.repository.save(&self.store, &self.gallery)?;
        info!("Gallery cleared");
        Ok(())
    }

    fn save_gallery(&self) {
        if let Err(e) = self.repository.save(&self.store, &self.gallery) {
            error!("Error saving the gallery: {}", e);
        }
    }

    fn enter(&mut self, progress: CaptureProgress) {
        debug!("Capture stage: {:?}", progress.stage);
        self.stage = progress.stage;
        if let Some(reporter) = &self.reporter {
            reporter(&progress);
        }
    }
}

/// Data URLs are far too long for a log line.
fn preview(identifier: &str) -> &str {
    match identifier.char_indices().nth(64) {
        Some((idx, _)) => &identifier[..idx],
        None => identifier,
    }
}
