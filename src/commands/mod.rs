//! Tauri command handlers for the frontend.
//!
//! Every command that changes what is on screen returns the resulting
//! [`ViewState`](crate::core::ViewState) so the frontend only has to render it.

mod camera;

pub use camera::*;
