use serde::{Deserialize, Serialize};
use std::future::Future;

/// Content of a modal notice with a single acknowledgement action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub header: String,
    pub message: String,
    pub button: String,
}

impl Notice {
    pub fn new(header: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            message: message.into(),
            button: "OK".to_string(),
        }
    }

    /// Shown when camera access is refused.
    pub fn permission() -> Self {
        Self::new(
            "Camera Permissions",
            "The application needs camera permissions to work. \
             Please enable camera access in the application settings.",
        )
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new("Error", message)
    }
}

/// Presents notices; the returned future completes once dismissed.
pub trait Notifier: Clone + Send + Sync {
    fn notify(&self, notice: Notice) -> impl Future<Output = ()> + Send;
}
