//! Tauri command handlers for the camera screen.

use std::io::ErrorKind;
use std::path::Path;
use tauri::State;
use tracing::debug;
use crate::core::{AppState, Session, ViewState};
use crate::utils::{
    GalleryResult, ImageFormat, ValidationError, format_from_extension, formats, resolve_in_dir,
};

/// Loads the gallery if the camera may be used.
#[tauri::command]
pub async fn init_camera(state: State<'_, AppState>) -> GalleryResult<ViewState> {
    let mut session = state.session().await;
    let Session { service, view } = &mut *session;
    view.init(service).await;
    Ok(view.snapshot())
}

#[tauri::command]
pub async fn check_permissions(state: State<'_, AppState>) -> GalleryResult<bool> {
    let session = state.session().await;
    Ok(session.service.check_and_request_permissions().await)
}

/// Captures a photo and returns the updated view.
///
/// # Events Emitted
/// * `capture-progress` - Stage changes while the capture runs
#[tauri::command]
pub async fn take_picture(state: State<'_, AppState>) -> GalleryResult<ViewState> {
    debug!("Received take_picture command");
    let mut session = state.session().await;
    let Session { service, view } = &mut *session;
    view.take_picture(service).await;
    Ok(view.snapshot())
}

#[tauri::command]
pub async fn get_gallery(state: State<'_, AppState>) -> GalleryResult<Vec<String>> {
    let session = state.session().await;
    Ok(session.service.gallery().to_vec())
}

#[tauri::command]
pub async fn delete_photo(state: State<'_, AppState>, identifier: String) -> GalleryResult<ViewState> {
    debug!("Received delete_photo command");
    let mut session = state.session().await;
    let Session { service, view } = &mut *session;
    view.delete_photo(service, &identifier).await;
    Ok(view.snapshot())
}

#[tauri::command]
pub async fn clear_gallery(state: State<'_, AppState>) -> GalleryResult<ViewState> {
    debug!("Received clear_gallery command");
    let mut session = state.session().await;
    let Session { service, view } = &mut *session;
    view.clear_gallery(service).await;
    Ok(view.snapshot())
}

#[tauri::command]
pub async fn reset_camera(state: State<'_, AppState>) -> GalleryResult<ViewState> {
    let mut session = state.session().await;
    session.view.reset_camera();
    Ok(session.view.snapshot())
}

#[tauri::command]
pub async fn get_view_state(state: State<'_, AppState>) -> GalleryResult<ViewState> {
    let session = state.session().await;
    Ok(session.view.snapshot())
}

/// Something an `<img>` can show for a gallery identifier.
#[tauri::command]
pub async fn photo_source(state: State<'_, AppState>, identifier: String) -> GalleryResult<String> {
    load_photo_source(state.documents_dir(), &identifier).await
}

/// Data URLs pass through; stored files are read and inlined as data URLs.
pub async fn load_photo_source(documents_dir: &Path, identifier: &str) -> GalleryResult<String> {
    if formats::is_data_url(identifier) {
        return Ok(identifier.to_string());
    }

    let path = resolve_in_dir(documents_dir, identifier)?;
    let format = format_from_extension(&path.to_string_lossy()).unwrap_or(ImageFormat::JPEG);
    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ValidationError::path_not_found(path).into());
        }
        Err(e) => return Err(e.into()),
    };
    Ok(formats::to_data_url(&bytes, format))
}
