//! Core application types and state management.
//!
//! This module contains the fundamental types used throughout the application:
//! - [`CameraService`]: capture orchestration and gallery ownership
//! - [`CameraView`]: view state mirrored to the frontend
//! - [`Gallery`]: ordered photo identifiers
//! - [`AppConfig`]: settings loaded at startup
//! - [`AppState`]: Application state managed by Tauri
//! - [`CaptureProgress`]: stage events for a running capture

mod config;
mod gallery;
mod progress;
mod service;
mod state;
mod types;
mod view;

pub use config::{AppConfig, GallerySettings, NativeCameraConfig, RuntimeMode};
pub use gallery::Gallery;
pub use progress::{CaptureProgress, CaptureStage};
pub use service::{CAPTURE_ERROR_MESSAGE, CameraService, ProgressReporter};
pub use state::{AppService, AppState, CAPTURE_PROGRESS_EVENT, Session};
pub use types::{CameraSource, CaptureSettings, FacingMode, Photo, RuntimeKind};
pub use view::{CameraView, NO_IMAGE_MESSAGE, ViewState};
