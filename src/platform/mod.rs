//! Platform capabilities behind the gallery service.
//!
//! - [`CaptureBackend`]: permission, capture, conversion and photo storage
//! - [`CaptureStrategy`]: the native or web backend picked at startup
//! - [`Notifier`]: modal notices awaited until dismissed
//! - [`FilePicker`]: image selection for the web fallback

mod dialog;
mod native;
mod notify;
mod web;

pub use dialog::{DialogNotifier, DialogPicker};
pub use native::NativeCapture;
pub use notify::{Notice, Notifier};
pub use web::{FilePicker, PickerRequest, WebCapture};

use std::future::Future;
use std::path::{Path, PathBuf};
use tracing::info;
use crate::core::{AppConfig, CaptureSettings, Photo, RuntimeKind, RuntimeMode};
use crate::utils::GalleryResult;

/// One platform's way of taking and keeping a photo.
pub trait CaptureBackend: Send + Sync {
    fn kind(&self) -> RuntimeKind;

    /// `Ok(false)` is a plain refusal; `Err` is a failure of the check itself.
    fn request_permission(&self) -> impl Future<Output = GalleryResult<bool>> + Send;

    fn capture(&self, settings: &CaptureSettings) -> impl Future<Output = GalleryResult<Photo>> + Send;

    /// Base64 form of a captured photo.
    fn read_as_base64(&self, photo: &Photo) -> impl Future<Output = GalleryResult<String>> + Send;

    /// Stores the image and returns the identifier the gallery keeps.
    fn persist(&self, file_name: &str, base64: &str) -> impl Future<Output = GalleryResult<String>> + Send;

    /// Removes whatever `persist` stored for `identifier`.
    fn remove(&self, identifier: &str) -> impl Future<Output = GalleryResult<()>> + Send;
}

/// The backend chosen at construction time.
pub enum CaptureStrategy<P> {
    Native(NativeCapture),
    Web(WebCapture<P>),
}

impl<P: FilePicker> CaptureStrategy<P> {
    /// Picks the strategy for `config`.
    ///
    /// `auto` goes native only on a desktop OS with the capture program on
    /// `PATH`.
    pub fn select(config: &AppConfig, os: &str, documents_dir: PathBuf, picker: P) -> Self {
        let program = config.camera.command.first().map(String::as_str).unwrap_or_default();
        let native = match config.runtime {
            RuntimeMode::Native => true,
            RuntimeMode::Web => false,
            RuntimeMode::Auto => is_desktop(os) && find_program(program).is_some(),
        };

        if native {
            info!("Using native capture ({}) into {}", program, documents_dir.display());
            Self::Native(NativeCapture::new(config.camera.clone(), documents_dir))
        } else {
            info!("Using file-picker capture");
            Self::Web(WebCapture::new(picker))
        }
    }
}

impl<P: FilePicker> CaptureBackend for CaptureStrategy<P> {
    fn kind(&self) -> RuntimeKind {
        match self {
            Self::Native(b) => b.kind(),
            Self::Web(b) => b.kind(),
        }
    }

    async fn request_permission(&self) -> GalleryResult<bool> {
        match self {
            Self::Native(b) => b.request_permission().await,
            Self::Web(b) => b.request_permission().await,
        }
    }

    async fn capture(&self, settings: &CaptureSettings) -> GalleryResult<Photo> {
        match self {
            Self::Native(b) => b.capture(settings).await,
            Self::Web(b) => b.capture(settings).await,
        }
    }

    async fn read_as_base64(&self, photo: &Photo) -> GalleryResult<String> {
        match self {
            Self::Native(b) => b.read_as_base64(photo).await,
            Self::Web(b) => b.read_as_base64(photo).await,
        }
    }

    async fn persist(&self, file_name: &str, base64: &str) -> GalleryResult<String> {
        match self {
            Self::Native(b) => b.persist(file_name, base64).await,
            Self::Web(b) => b.persist(file_name, base64).await,
        }
    }

    async fn remove(&self, identifier: &str) -> GalleryResult<()> {
        match self {
            Self::Native(b) => b.remove(identifier).await,
            Self::Web(b) => b.remove(identifier).await,
        }
    }
}

fn is_desktop(os: &str) -> bool {
    matches!(os, "linux" | "macos" | "windows" | "freebsd" | "openbsd" | "netbsd")
}

/// Looks `program` up on `PATH`; paths with a separator are checked as-is.
pub fn find_program(program: &str) -> Option<PathBuf> {
    if program.is_empty() {
        return None;
    }
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }
    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(program))
        .find(|path| path.is_file())
}
