// Module declarations in dependency order
pub mod utils;
pub mod core;
pub mod storage;
pub mod platform;
pub mod commands;

#[cfg(test)]
mod test_utils;

// Public exports for external consumers
pub use core::{AppConfig, AppState, CameraService, CameraView, Gallery, Photo, ViewState};
pub use platform::{CaptureBackend, CaptureStrategy, FilePicker, NativeCapture, Notice, Notifier, WebCapture};
pub use storage::{GalleryRepository, KeyValueStore, MemoryStore};
pub use utils::{GalleryError, GalleryResult};

use tauri::Manager;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "info,camera_gallery_lib=debug";

/// Installs the compact stdout subscriber. `RUST_LOG` overrides the default
/// filter.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)         // Remove file path
        .with_line_number(false)  // Remove line numbers
        .with_thread_ids(false)   // Remove thread IDs
        .with_thread_names(false) // Remove thread names
        .with_target(false)       // Remove module path
        .with_ansi(true)          // Keep colored output
        .with_writer(std::io::stdout)
        .compact()                // Use compact formatter instead of pretty
        .try_init();
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    init_logging();
    info!("=== Application Starting ===");

    let app = tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_os::init())
        .plugin(tauri_plugin_store::Builder::new().build())
        .invoke_handler(tauri::generate_handler![
            commands::init_camera,
            commands::check_permissions,
            commands::take_picture,
            commands::get_gallery,
            commands::delete_photo,
            commands::clear_gallery,
            commands::reset_camera,
            commands::get_view_state,
            commands::photo_source,
        ])
        .setup(|app| {
            let state = AppState::new(app.handle())?;
            debug!("✓ AppState initialized (photos in {})", state.documents_dir().display());
            app.manage(state);
            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application");

    info!("Starting application event loop...");
    app.run(|_app_handle, event| {
        if let tauri::RunEvent::Exit = event {
            info!("Application exiting");
        }
    });
}
