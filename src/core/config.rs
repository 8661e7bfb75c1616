//! Application configuration.
//!
//! Settings are read once at startup from the store plugin's `settings.json`
//! under the `config` key. Missing fields fall back to their defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tauri_plugin_store::StoreExt;
use tracing::{debug, warn};
use crate::core::CaptureSettings;
use crate::utils::validate_config;

pub const SETTINGS_FILE: &str = "settings.json";
pub const CONFIG_KEY: &str = "config";

/// How the capture strategy is chosen at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeMode {
    /// Native when a capture program is available, web otherwise
    #[default]
    Auto,
    Native,
    Web,
}

/// Native camera settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NativeCameraConfig {
    /// Video device whose readability stands for camera permission
    pub device: PathBuf,
    /// Capture program and arguments; `{device}`, `{quality}` and `{output}`
    /// are substituted before running
    pub command: Vec<String>,
}

impl Default for NativeCameraConfig {
    fn default() -> Self {
        Self {
            device: PathBuf::from("/dev/video0"),
            command: [
                "fswebcam",
                "--no-banner",
                "--device",
                "{device}",
                "--jpeg",
                "{quality}",
                "{output}",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

/// Where the gallery list is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GallerySettings {
    pub store_file: String,
    pub key: String,
}

impl Default for GallerySettings {
    fn default() -> Self {
        Self {
            store_file: "gallery.json".to_string(),
            key: "photo_gallery".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    pub runtime: RuntimeMode,
    pub capture: CaptureSettings,
    pub camera: NativeCameraConfig,
    /// Overrides the documents-scoped photo directory
    pub documents_dir: Option<PathBuf>,
    pub gallery: GallerySettings,
}

impl AppConfig {
    /// Builds a config from the raw stored value, falling back to defaults
    /// when it is absent, malformed or invalid.
    pub fn from_value(value: Option<serde_json::Value>) -> Self {
        let Some(value) = value else {
            debug!("No stored config, using defaults");
            return Self::default();
        };

        let config = match serde_json::from_value::<AppConfig>(value) {
            Ok(config) => config,
            Err(e) => {
                warn!("Stored config is malformed, using defaults: {}", e);
                return Self::default();
            }
        };

        match validate_config(&config) {
            Ok(()) => config,
            Err(e) => {
                warn!("Stored config is invalid, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Loads the config through the store plugin.
    pub fn load<R: tauri::Runtime>(app: &tauri::AppHandle<R>) -> Self {
        match app.store(SETTINGS_FILE) {
            Ok(store) => Self::from_value(store.get(CONFIG_KEY)),
            Err(e) => {
                warn!("Failed to open {}: {}", SETTINGS_FILE, e);
                Self::default()
            }
        }
    }
}
