//! Core types shared by the capture strategies and the gallery service.

use serde::{Deserialize, Serialize};

/// Where a capture strategy obtains its image from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraSource {
    /// The physical camera
    Camera,
}

/// Which camera the file-picker fallback asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacingMode {
    /// Rear camera
    Environment,
}

/// Settings passed to the capture capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CaptureSettings {
    /// JPEG quality (1-100)
    pub quality: u8,
    /// Whether the platform may offer in-app editing before returning
    pub allow_editing: bool,
    /// Image source
    pub source: CameraSource,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            quality: 90,
            allow_editing: false,
            source: CameraSource::Camera,
        }
    }
}

/// Result of a capture.
///
/// `web_path` is a local file path on the native strategy and a base64
/// data URL on the web strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub web_path: Option<String>,
    pub format: String,
}

/// The execution context a capture strategy targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeKind {
    Native,
    Web,
}

