use serde::{Deserialize, Serialize};

/// Stage of a single capture flow.
#[derive(Debug, Deserialize, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum CaptureStage {
    #[default]
    Idle,
    PermissionCheck,
    Capturing,
    Converting,
    Persisting,
}

/// Progress event emitted to the frontend while a capture runs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CaptureProgress {
    /// Stage just entered
    pub stage: CaptureStage,
    /// Whether a capture is still running, for disabling the capture button
    pub loading: bool,
    /// Identifier produced by a successful capture
    #[serde(default)]
    pub identifier: Option<String>,
    /// Error message when the capture fell back to idle
    #[serde(default)]
    pub error: Option<String>,
}

impl CaptureProgress {
    pub fn stage(stage: CaptureStage) -> Self {
        Self {
            stage,
            loading: stage != CaptureStage::Idle,
            identifier: None,
            error: None,
        }
    }

    pub fn succeeded(identifier: &str) -> Self {
        Self {
            stage: CaptureStage::Idle,
            loading: false,
            identifier: Some(identifier.to_string()),
            error: None,
        }
    }

    pub fn failed(error: &str) -> Self {
        Self {
            stage: CaptureStage::Idle,
            loading: false,
            identifier: None,
            error: Some(error.to_string()),
        }
    }
}
