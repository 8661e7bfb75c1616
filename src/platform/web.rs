use serde::Serialize;
use std::future::Future;
use std::path::PathBuf;
use tracing::{debug, warn};
use crate::core::{CaptureSettings, FacingMode, Photo, RuntimeKind};
use crate::platform::CaptureBackend;
use crate::utils::{GalleryError, GalleryResult, ImageFormat, format_from_extension, formats};

/// What the picker is asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PickerRequest {
    /// Accepted extensions
    pub extensions: Vec<&'static str>,
    /// Camera hint for pickers that can open one directly
    pub capture: FacingMode,
}

impl Default for PickerRequest {
    fn default() -> Self {
        Self {
            extensions: ImageFormat::all_extensions(),
            capture: FacingMode::Environment,
        }
    }
}

/// Image selection used by the web fallback.
///
/// `PickerRequest::capture` is advisory. [`DialogPicker`](crate::platform::DialogPicker)
/// opens the system file dialog, which has no camera option, and only logs it.
pub trait FilePicker: Send + Sync {
    /// Acquires the capture source. `Err` means access was refused.
    fn acquire(&self) -> impl Future<Output = GalleryResult<bool>> + Send;

    /// Lets the user choose an image; `None` when nothing was selected.
    fn pick_image(&self, request: &PickerRequest) -> impl Future<Output = GalleryResult<Option<PathBuf>>> + Send;
}

/// Capture through a file picker, keeping the photo inline as a data URL.
///
/// Nothing is written to disk: the data URL is the gallery identifier.
pub struct WebCapture<P> {
    picker: P,
}

impl<P: FilePicker> WebCapture<P> {
    pub fn new(picker: P) -> Self {
        Self { picker }
    }
}

impl<P: FilePicker> CaptureBackend for WebCapture<P> {
    fn kind(&self) -> RuntimeKind {
        RuntimeKind::Web
    }

    async fn request_permission(&self) -> GalleryResult<bool> {
        self.picker.acquire().await
    }

    async fn capture(&self, settings: &CaptureSettings) -> GalleryResult<Photo> {
        debug!("Opening image picker (source {:?})", settings.source);
        let request = PickerRequest::default();
        let path = self
            .picker
            .pick_image(&request)
            .await?
            .ok_or_else(|| GalleryError::capture("No image selected"))?;

        let format = format_from_extension(&path.to_string_lossy())
            .map_err(|e| GalleryError::capture(e.to_string()))?;
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| GalleryError::capture(format!(
                "Failed to read {}: {}", path.display(), e
            )))?;

        Ok(Photo {
            web_path: Some(formats::to_data_url(&bytes, format)),
            format: format.primary_extension().to_string(),
        })
    }

    async fn read_as_base64(&self, photo: &Photo) -> GalleryResult<String> {
        Ok(photo.web_path.clone().unwrap_or_default())
    }

    async fn persist(&self, file_name: &str, base64: &str) -> GalleryResult<String> {
        if base64.is_empty() {
            return Err(GalleryError::conversion("Empty image payload"));
        }
        debug!("Keeping {} inline", file_name);
        Ok(base64.to_string())
    }

    async fn remove(&self, identifier: &str) -> GalleryResult<()> {
        if !formats::is_data_url(identifier) {
            warn!("Web gallery entry is not a data URL");
        }
        Ok(())
    }
}
