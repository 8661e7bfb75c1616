//! Application state management for Tauri.

use anyhow::Context;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tauri::{AppHandle, Emitter, Manager, Runtime, Wry};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};
use crate::core::{AppConfig, CameraService, CameraView, CaptureProgress};
use crate::platform::{CaptureBackend, CaptureStrategy, DialogNotifier, DialogPicker};
use crate::storage::TauriStore;

/// Event carrying [`CaptureProgress`] to the frontend.
pub const CAPTURE_PROGRESS_EVENT: &str = "capture-progress";

pub type AppService<R> =
    CameraService<CaptureStrategy<DialogPicker<R>>, TauriStore<R>, DialogNotifier<R>>;

/// The service together with the view that mirrors it.
pub struct Session<R: Runtime> {
    pub service: AppService<R>,
    pub view: CameraView<DialogNotifier<R>>,
}

/// Application state managed by Tauri.
///
/// One mutex covers the whole session, so commands from the frontend run one
/// after another.
pub struct AppState<R: Runtime = Wry> {
    session: Mutex<Session<R>>,
    documents_dir: PathBuf,
}

impl<R: Runtime> AppState<R> {
    /// Wires config, storage, dialogs and the capture strategy together and
    /// loads the gallery.
    pub fn new(app: &AppHandle<R>) -> anyhow::Result<Self> {
        let config = AppConfig::load(app);
        let documents_dir = resolve_documents_dir(app, &config)?;
        let os = tauri_plugin_os::platform();
        debug!("Platform: {}", os);

        let backend = CaptureStrategy::select(&config, os, documents_dir.clone(), DialogPicker::new(app.clone()));
        let store = TauriStore::open(app, &config.gallery.store_file)
            .with_context(|| format!("Failed to open {}", config.gallery.store_file))?;
        let notifier = DialogNotifier::new(app.clone());

        let emitter = app.clone();
        let service = CameraService::new(backend, store, notifier.clone(), &config)
            .with_progress(Arc::new(move |progress: &CaptureProgress| {
                if let Err(e) = emitter.emit(CAPTURE_PROGRESS_EVENT, progress) {
                    warn!("Failed to emit capture progress: {}", e);
                }
            }));
        debug!("Camera service ready ({:?})", service.backend().kind());

        Ok(Self {
            session: Mutex::new(Session {
                service,
                view: CameraView::new(notifier),
            }),
            documents_dir,
        })
    }

    pub async fn session(&self) -> MutexGuard<'_, Session<R>> {
        self.session.lock().await
    }

    /// Directory native photos are written to.
    pub fn documents_dir(&self) -> &Path {
        &self.documents_dir
    }
}

/// The configured override, else `<Documents>/<product name>`, else the app
/// data directory on platforms without a documents folder.
fn resolve_documents_dir<R: Runtime>(app: &AppHandle<R>, config: &AppConfig) -> anyhow::Result<PathBuf> {
    if let Some(dir) = &config.documents_dir {
        return Ok(dir.clone());
    }

    let paths = app.path();
    match paths.document_dir() {
        Ok(dir) => Ok(dir.join(&app.package_info().name)),
        Err(e) => {
            warn!("No documents directory ({}), using app data", e);
            Ok(paths
                .app_data_dir()
                .context("Failed to get app data directory")?
                .join("photos"))
        }
    }
}
