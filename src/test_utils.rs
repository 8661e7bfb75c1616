//! Fakes for the platform capabilities used across unit tests.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use crate::core::{CaptureSettings, Photo, RuntimeKind};
use crate::platform::{CaptureBackend, FilePicker, Notice, Notifier, PickerRequest};
use crate::utils::{Clock, GalleryError, GalleryResult, formats};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Permission {
    Grant,
    Deny,
    Fail,
}

/// Scriptable [`CaptureBackend`].
///
/// Native flavour stores "files" as `file:///docs/<name>` entries in memory;
/// web flavour keeps the data URL as identifier.
pub struct FakeBackend {
    kind: RuntimeKind,
    permission: Permission,
    capture_path: Option<String>,
    fail_capture: bool,
    fail_conversion: bool,
    fail_persist: bool,
    fail_remove_at: Option<usize>,
    remove_calls: AtomicUsize,
    files: Mutex<Vec<String>>,
    removed: Mutex<Vec<String>>,
}

impl FakeBackend {
    fn with_kind(kind: RuntimeKind, capture_path: &str) -> Self {
        Self {
            kind,
            permission: Permission::Grant,
            capture_path: Some(capture_path.to_string()),
            fail_capture: false,
            fail_conversion: false,
            fail_persist: false,
            fail_remove_at: None,
            remove_calls: AtomicUsize::new(0),
            files: Mutex::new(Vec::new()),
            removed: Mutex::new(Vec::new()),
        }
    }

    pub fn native() -> Self {
        Self::with_kind(RuntimeKind::Native, "/tmp/capture.jpeg")
    }

    pub fn web() -> Self {
        Self::with_kind(RuntimeKind::Web, "data:image/jpeg;base64,/9j/4AAQ")
    }

    pub fn with_capture_path(mut self, path: &str) -> Self {
        self.capture_path = Some(path.to_string());
        self
    }

    pub fn without_path(mut self) -> Self {
        self.capture_path = None;
        self
    }

    pub fn denying(mut self) -> Self {
        self.permission = Permission::Deny;
        self
    }

    pub fn failing_permission(mut self) -> Self {
        self.permission = Permission::Fail;
        self
    }

    pub fn failing_capture(mut self) -> Self {
        self.fail_capture = true;
        self
    }

    pub fn failing_conversion(mut self) -> Self {
        self.fail_conversion = true;
        self
    }

    pub fn failing_persist(mut self) -> Self {
        self.fail_persist = true;
        self
    }

    /// The `n`th removal (zero-based) fails.
    pub fn failing_remove_at(mut self, n: usize) -> Self {
        self.fail_remove_at = Some(n);
        self
    }

    /// Identifiers of files currently "on disk".
    pub fn files(&self) -> Vec<String> {
        self.files.lock().unwrap().clone()
    }

    /// Identifiers successfully removed, in order.
    pub fn removed(&self) -> Vec<String> {
        self.removed.lock().unwrap().clone()
    }
}

impl CaptureBackend for FakeBackend {
    fn kind(&self) -> RuntimeKind {
        self.kind
    }

    async fn request_permission(&self) -> GalleryResult<bool> {
        match self.permission {
            Permission::Grant => Ok(true),
            Permission::Deny => Ok(false),
            Permission::Fail => Err(GalleryError::PermissionDenied),
        }
    }

    async fn capture(&self, _settings: &CaptureSettings) -> GalleryResult<Photo> {
        if self.fail_capture {
            return Err(GalleryError::capture("camera unplugged"));
        }
        Ok(Photo {
            web_path: self.capture_path.clone(),
            format: "jpeg".to_string(),
        })
    }

    async fn read_as_base64(&self, photo: &Photo) -> GalleryResult<String> {
        if self.fail_conversion {
            return Err(GalleryError::conversion("unreadable blob"));
        }
        let path = photo.web_path.clone().unwrap_or_default();
        Ok(match self.kind {
            RuntimeKind::Native => formats::encode_base64(path.as_bytes()),
            RuntimeKind::Web => path,
        })
    }

    async fn persist(&self, file_name: &str, base64: &str) -> GalleryResult<String> {
        if self.fail_persist {
            return Err(GalleryError::IO("disk full".to_string()));
        }
        match self.kind {
            RuntimeKind::Native => {
                let uri = format!("file:///docs/{}", file_name);
                self.files.lock().unwrap().push(uri.clone());
                Ok(uri)
            }
            RuntimeKind::Web => Ok(base64.to_string()),
        }
    }

    async fn remove(&self, identifier: &str) -> GalleryResult<()> {
        let call = self.remove_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_remove_at == Some(call) {
            return Err(GalleryError::deletion(format!("cannot delete {}", identifier)));
        }
        if self.kind == RuntimeKind::Web {
            return Ok(());
        }

        let mut files = self.files.lock().unwrap();
        let Some(pos) = files.iter().position(|f| f == identifier) else {
            return Err(GalleryError::deletion(format!("no such file {}", identifier)));
        };
        files.remove(pos);
        self.removed.lock().unwrap().push(identifier.to_string());
        Ok(())
    }
}

/// [`Notifier`] that records notices instead of showing them.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    async fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

/// [`FilePicker`] with a canned answer.
pub struct FakePicker {
    selection: Option<PathBuf>,
    denied: bool,
}

impl FakePicker {
    pub fn returning(path: PathBuf) -> Self {
        Self { selection: Some(path), denied: false }
    }

    pub fn empty() -> Self {
        Self { selection: None, denied: false }
    }

    pub fn denied() -> Self {
        Self { selection: None, denied: true }
    }
}

impl FilePicker for FakePicker {
    async fn acquire(&self) -> GalleryResult<bool> {
        if self.denied {
            return Err(GalleryError::PermissionDenied);
        }
        Ok(true)
    }

    async fn pick_image(&self, _request: &PickerRequest) -> GalleryResult<Option<PathBuf>> {
        Ok(self.selection.clone())
    }
}

/// Clock that advances one millisecond per reading.
pub struct SteppingClock {
    next: AtomicU64,
}

impl SteppingClock {
    pub fn starting_at(millis: u64) -> Self {
        Self { next: AtomicU64::new(millis) }
    }
}

impl Clock for SteppingClock {
    fn now_millis(&self) -> u128 {
        self.next.fetch_add(1, Ordering::SeqCst) as u128
    }
}
