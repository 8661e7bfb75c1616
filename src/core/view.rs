//! View state behind the camera screen.

use serde::Serialize;
use tracing::{debug, error, warn};
use crate::core::CameraService;
use crate::platform::{CaptureBackend, Notice, Notifier};
use crate::storage::KeyValueStore;

/// Inline message when a capture yields nothing.
pub const NO_IMAGE_MESSAGE: &str = "No valid image obtained";

/// Snapshot handed to the frontend after every action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    /// Identifier of the photo on display, empty when none
    pub image_url: String,
    pub gallery: Vec<String>,
    pub error_message: String,
    /// Only true inside `take_picture`; commands return snapshots after it
    /// finishes, so the frontend follows the `loading` flag of the
    /// capture progress events instead.
    pub loading: bool,
}

/// Forwards user intents to a [`CameraService`] and mirrors the result.
///
/// Capture failures are shown inline and through a notice; delete and clear
/// failures are only logged by the service.
pub struct CameraView<N> {
    state: ViewState,
    notifier: N,
}

impl<N: Notifier> CameraView<N> {
    pub fn new(notifier: N) -> Self {
        Self {
            state: ViewState::default(),
            notifier,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn snapshot(&self) -> ViewState {
        self.state.clone()
    }

    /// Loads the gallery when the camera may be used. A refusal at startup
    /// shows nothing.
    pub async fn init<B, S, M>(&mut self, service: &CameraService<B, S, M>)
    where
        B: CaptureBackend,
        S: KeyValueStore,
        M: Notifier,
    {
        if service.check_and_request_permissions().await {
            self.state.gallery = service.gallery().to_vec();
        } else {
            debug!("Camera permission not granted at startup, gallery hidden");
        }
    }

    pub async fn take_picture<B, S, M>(&mut self, service: &mut CameraService<B, S, M>)
    where
        B: CaptureBackend,
        S: KeyValueStore,
        M: Notifier,
    {
        self.state.error_message.clear();
        self.state.loading = true;

        match service.take_picture().await {
            Some(identifier) => {
                self.state.image_url = identifier;
                self.state.gallery = service.gallery().to_vec();
            }
            None => {
                error!("Error capturing image: {}", NO_IMAGE_MESSAGE);
                self.state.error_message = NO_IMAGE_MESSAGE.to_string();
                self.notifier.notify(Notice::error(NO_IMAGE_MESSAGE)).await;
            }
        }

        self.state.loading = false;
    }

    /// Hides the photo on display.
    pub fn reset_camera(&mut self) {
        self.state.image_url.clear();
    }

    pub async fn delete_photo<B, S, M>(&mut self, service: &mut CameraService<B, S, M>, identifier: &str)
    where
        B: CaptureBackend,
        S: KeyValueStore,
        M: Notifier,
    {
        service.delete_photo(identifier).await;
        self.state.gallery = service.gallery().to_vec();

        if self.state.image_url == identifier {
            self.state.image_url.clear();
        }
    }

    /// Clears the gallery. When the service could not clear it, the list on
    /// screen stays as the service still has it.
    pub async fn clear_gallery<B, S, M>(&mut self, service: &mut CameraService<B, S, M>)
    where
        B: CaptureBackend,
        S: KeyValueStore,
        M: Notifier,
    {
        service.clear_gallery().await;
        self.state.gallery = service.gallery().to_vec();

        if self.state.gallery.is_empty() {
            self.state.image_url.clear();
        } else {
            warn!("Gallery still holds {} photos after clearing", self.state.gallery.len());
        }
    }
}
