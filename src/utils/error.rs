//! Error types for the camera gallery.
//!
//! Provides a hierarchy of error types using `thiserror` for ergonomic error handling.

use std::io;
use std::path::PathBuf;
use thiserror::Error;
use serde::Serialize;

/// Validation errors for settings and gallery identifiers.
#[derive(Error, Debug, Serialize)]
pub enum ValidationError {
    /// Path-related validation error
    #[error("Path error: {0}")]
    Path(#[from] PathError),
    /// Invalid settings error
    #[error("Settings error: {0}")]
    Settings(String),
    /// Identifier cannot reference a stored photo
    #[error("Invalid identifier: {0}")]
    Identifier(String),
}

/// File path errors.
#[derive(Error, Debug, Serialize)]
pub enum PathError {
    /// File does not exist
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    /// Path resolves outside the photo directory
    #[error("Outside of the photo directory: {0}")]
    OutsideScope(PathBuf),
}

/// Main error type for the camera gallery.
///
/// All errors in the application are converted to this type before being
/// returned to the frontend.
#[derive(Error, Debug, Serialize)]
pub enum GalleryError {
    /// Camera access was not granted
    #[error("Camera permission denied")]
    PermissionDenied,

    /// The capture capability failed or returned no image
    #[error("Capture failed: {0}")]
    CaptureFailed(String),

    /// Captured image could not be read or base64-encoded
    #[error("Conversion failed: {0}")]
    ConversionFailed(String),

    /// Gallery storage could not be read or written
    #[error("Persistence failed: {0}")]
    PersistenceFailed(String),

    /// A stored photo could not be deleted
    #[error("Deletion failed: {0}")]
    DeletionFailed(String),

    /// Settings or identifier validation failed
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// File IO error
    #[error("IO error: {0}")]
    IO(String),

    /// Configuration could not be loaded
    #[error("Config error: {0}")]
    Config(String),
}

/// Convenience result type for gallery operations.
pub type GalleryResult<T> = Result<T, GalleryError>;

// Helper methods for error creation
impl GalleryError {
    pub fn capture<T: Into<String>>(msg: T) -> Self {
        Self::CaptureFailed(msg.into())
    }

    pub fn conversion<T: Into<String>>(msg: T) -> Self {
        Self::ConversionFailed(msg.into())
    }

    pub fn persistence<T: Into<String>>(msg: T) -> Self {
        Self::PersistenceFailed(msg.into())
    }

    pub fn deletion<T: Into<String>>(msg: T) -> Self {
        Self::DeletionFailed(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the error stems from a permission refusal.
    pub fn is_permission(&self) -> bool {
        matches!(self, Self::PermissionDenied)
    }
}

// Helper methods for validation error creation
impl ValidationError {
    pub fn path_not_found(path: impl Into<PathBuf>) -> Self {
        Self::Path(PathError::NotFound(path.into()))
    }

    pub fn outside_scope(path: impl Into<PathBuf>) -> Self {
        Self::Path(PathError::OutsideScope(path.into()))
    }

    pub fn settings(msg: impl Into<String>) -> Self {
        Self::Settings(msg.into())
    }

    pub fn identifier(msg: impl Into<String>) -> Self {
        Self::Identifier(msg.into())
    }
}

// Convert std::io::Error to GalleryError
impl From<io::Error> for GalleryError {
    fn from(err: io::Error) -> Self {
        Self::IO(err.to_string())
    }
}

// Convert PathError to GalleryError
impl From<PathError> for GalleryError {
    fn from(err: PathError) -> Self {
        Self::Validation(ValidationError::Path(err))
    }
}

impl From<serde_json::Error> for GalleryError {
    fn from(err: serde_json::Error) -> Self {
        Self::PersistenceFailed(err.to_string())
    }
}

impl From<base64::DecodeError> for GalleryError {
    fn from(err: base64::DecodeError) -> Self {
        Self::ConversionFailed(err.to_string())
    }
}

impl From<tauri_plugin_store::Error> for GalleryError {
    fn from(err: tauri_plugin_store::Error) -> Self {
        Self::PersistenceFailed(err.to_string())
    }
}
