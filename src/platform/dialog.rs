//! tauri-plugin-dialog implementations of [`Notifier`] and [`FilePicker`].

use std::path::PathBuf;
use tauri::{AppHandle, Manager, Runtime};
use tauri_plugin_dialog::{DialogExt, MessageDialogButtons, MessageDialogKind};
use tokio::sync::oneshot;
use tracing::{debug, warn};
use crate::platform::{FilePicker, Notice, Notifier, PickerRequest};
use crate::utils::{GalleryError, GalleryResult};

/// Modal message dialogs.
pub struct DialogNotifier<R: Runtime> {
    app: AppHandle<R>,
}

impl<R: Runtime> DialogNotifier<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self { app }
    }
}

impl<R: Runtime> Clone for DialogNotifier<R> {
    fn clone(&self) -> Self {
        Self { app: self.app.clone() }
    }
}

impl<R: Runtime> Notifier for DialogNotifier<R> {
    async fn notify(&self, notice: Notice) {
        debug!("Showing notice '{}'", notice.header);
        let (tx, rx) = oneshot::channel();
        self.app
            .dialog()
            .message(notice.message)
            .title(notice.header)
            .kind(MessageDialogKind::Warning)
            .buttons(MessageDialogButtons::OkCustom(notice.button))
            .show(move |_| {
                let _ = tx.send(());
            });

        if rx.await.is_err() {
            warn!("Notice dialog closed without acknowledgement");
        }
    }
}

/// Native open-file dialog filtered to images.
pub struct DialogPicker<R: Runtime> {
    app: AppHandle<R>,
}

impl<R: Runtime> DialogPicker<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self { app }
    }
}

impl<R: Runtime> FilePicker for DialogPicker<R> {
    /// The dialog needs a window to attach to; without one there is nothing
    /// to capture through.
    async fn acquire(&self) -> GalleryResult<bool> {
        if self.app.webview_windows().is_empty() {
            return Err(GalleryError::PermissionDenied);
        }
        Ok(true)
    }

    async fn pick_image(&self, request: &PickerRequest) -> GalleryResult<Option<PathBuf>> {
        debug!("Picker capture hint: {:?}", request.capture);
        let (tx, rx) = oneshot::channel();
        self.app
            .dialog()
            .file()
            .add_filter("Images", &request.extensions)
            .pick_file(move |file| {
                let _ = tx.send(file);
            });

        let picked = rx
            .await
            .map_err(|_| GalleryError::capture("Image picker closed unexpectedly"))?;

        picked
            .map(|file| file.into_path().map_err(|e| GalleryError::capture(e.to_string())))
            .transpose()
    }
}
