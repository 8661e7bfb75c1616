use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::process::Command;
use tracing::{debug, warn};
use crate::core::{CaptureSettings, NativeCameraConfig, Photo, RuntimeKind};
use crate::platform::CaptureBackend;
use crate::utils::{
    GalleryError, GalleryResult, create_dir_all, file_uri, formats, resolve_in_dir,
    validate_capture_settings,
};

const CAPTURE_PREFIX: &str = "camera-gallery-capture-";

static CAPTURE_SEQ: AtomicU64 = AtomicU64::new(0);

/// Capture through an external camera program, storing photos as files in
/// the documents-scoped directory.
pub struct NativeCapture {
    camera: NativeCameraConfig,
    documents_dir: PathBuf,
}

impl NativeCapture {
    pub fn new(camera: NativeCameraConfig, documents_dir: PathBuf) -> Self {
        Self { camera, documents_dir }
    }

    /// Capture program arguments with placeholders filled in.
    fn command_args(&self, settings: &CaptureSettings, output: &Path) -> Vec<String> {
        let device = self.camera.device.to_string_lossy();
        let output = output.to_string_lossy();
        let quality = settings.quality.to_string();
        self.camera
            .command
            .iter()
            .skip(1)
            .map(|arg| {
                arg.replace("{device}", &device)
                    .replace("{quality}", &quality)
                    .replace("{output}", &output)
            })
            .collect()
    }

    fn scratch_path() -> PathBuf {
        let seq = CAPTURE_SEQ.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!(
            "{}{}-{}.jpeg", CAPTURE_PREFIX, std::process::id(), seq
        ))
    }

    fn is_scratch(path: &Path) -> bool {
        path.parent() == Some(std::env::temp_dir().as_path())
            && path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(CAPTURE_PREFIX))
    }
}

impl CaptureBackend for NativeCapture {
    fn kind(&self) -> RuntimeKind {
        RuntimeKind::Native
    }

    async fn request_permission(&self) -> GalleryResult<bool> {
        match tokio::fs::File::open(&self.camera.device).await {
            Ok(_) => Ok(true),
            Err(e) if matches!(e.kind(), ErrorKind::PermissionDenied | ErrorKind::NotFound) => {
                debug!("Camera device {} unavailable: {}", self.camera.device.display(), e);
                Ok(false)
            }
            Err(e) => Err(GalleryError::IO(format!(
                "Failed to open {}: {}", self.camera.device.display(), e
            ))),
        }
    }

    async fn capture(&self, settings: &CaptureSettings) -> GalleryResult<Photo> {
        validate_capture_settings(settings)?;
        if settings.allow_editing {
            debug!("Capture program has no editing step, ignoring allow_editing");
        }

        let program = self
            .camera
            .command
            .first()
            .ok_or_else(|| GalleryError::capture("No capture program configured"))?;
        let output = Self::scratch_path();
        let args = self.command_args(settings, &output);
        debug!("Running {} {:?}", program, args);

        let result = Command::new(program)
            .args(&args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| GalleryError::capture(format!("Failed to run {}: {}", program, e)))?;

        if !result.status.success() {
            if let Err(e) = tokio::fs::remove_file(&output).await {
                if e.kind() != ErrorKind::NotFound {
                    warn!("Failed to remove scratch capture {}: {}", output.display(), e);
                }
            }
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(GalleryError::capture(format!(
                "{} exited with {}: {}", program, result.status, stderr.trim()
            )));
        }

        if !tokio::fs::try_exists(&output).await.unwrap_or(false) {
            return Err(GalleryError::capture(format!("{} produced no image", program)));
        }

        Ok(Photo {
            web_path: Some(output.to_string_lossy().into_owned()),
            format: "jpeg".to_string(),
        })
    }

    async fn read_as_base64(&self, photo: &Photo) -> GalleryResult<String> {
        let path = photo
            .web_path
            .as_deref()
            .map(PathBuf::from)
            .ok_or_else(|| GalleryError::conversion("Photo has no path"))?;

        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| GalleryError::conversion(format!(
                "Failed to read {}: {}", path.display(), e
            )))?;

        if Self::is_scratch(&path) {
            if let Err(e) = tokio::fs::remove_file(&path).await {
                warn!("Failed to remove scratch capture {}: {}", path.display(), e);
            }
        }

        Ok(formats::encode_base64(&bytes))
    }

    async fn persist(&self, file_name: &str, base64: &str) -> GalleryResult<String> {
        let bytes = formats::decode_base64(base64)?;
        create_dir_all(&self.documents_dir).await?;
        let path = resolve_in_dir(&self.documents_dir, file_name)?;
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| GalleryError::IO(format!(
                "Failed to write {}: {}", path.display(), e
            )))?;
        debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        file_uri(&path)
    }

    async fn remove(&self, identifier: &str) -> GalleryResult<()> {
        let path = resolve_in_dir(&self.documents_dir, identifier)
            .map_err(|e| GalleryError::deletion(e.to_string()))?;
        tokio::fs::remove_file(&path)
            .await
            .map_err(|e| GalleryError::deletion(format!(
                "Failed to delete {}: {}", path.display(), e
            )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera_copying(source: &Path) -> NativeCameraConfig {
        NativeCameraConfig {
            device: source.to_path_buf(),
            command: vec![
                "cp".to_string(),
                source.to_string_lossy().into_owned(),
                "{output}".to_string(),
            ],
        }
    }

    #[test]
    fn placeholders_are_substituted() {
        let backend = NativeCapture::new(NativeCameraConfig::default(), PathBuf::from("/docs"));
        let args = backend.command_args(&CaptureSettings::default(), Path::new("/tmp/out.jpeg"));
        assert_eq!(
            args,
            ["--no-banner", "--device", "/dev/video0", "--jpeg", "90", "/tmp/out.jpeg"]
        );
    }

    #[tokio::test]
    async fn missing_device_means_no_permission() {
        let dir = tempfile::tempdir().unwrap();
        let camera = NativeCameraConfig {
            device: dir.path().join("video9"),
            ..NativeCameraConfig::default()
        };
        let backend = NativeCapture::new(camera, dir.path().to_path_buf());
        assert!(!backend.request_permission().await.unwrap());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn capture_convert_persist_remove() {
        let sandbox = tempfile::tempdir().unwrap();
        let source = sandbox.path().join("frame.jpeg");
        std::fs::write(&source, b"\xff\xd8\xff\xe0jpeg").unwrap();
        let docs = sandbox.path().join("Documents");

        let backend = NativeCapture::new(camera_copying(&source), docs.clone());
        assert!(backend.request_permission().await.unwrap());

        let photo = backend.capture(&CaptureSettings::default()).await.unwrap();
        let scratch = PathBuf::from(photo.web_path.clone().unwrap());
        assert!(scratch.exists());

        let base64 = backend.read_as_base64(&photo).await.unwrap();
        assert!(!scratch.exists());

        let identifier = backend.persist("1700000000000.jpeg", &base64).await.unwrap();
        assert!(identifier.starts_with("file://"));
        assert!(identifier.ends_with("/Documents/1700000000000.jpeg"));
        let stored = docs.join("1700000000000.jpeg");
        assert_eq!(std::fs::read(&stored).unwrap(), b"\xff\xd8\xff\xe0jpeg");

        backend.remove(&identifier).await.unwrap();
        assert!(!stored.exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failing_program_is_a_capture_failure() {
        let dir = tempfile::tempdir().unwrap();
        let camera = NativeCameraConfig {
            device: dir.path().to_path_buf(),
            command: vec!["false".to_string(), "{output}".to_string()],
        };
        let backend = NativeCapture::new(camera, dir.path().to_path_buf());
        let err = backend.capture(&CaptureSettings::default()).await.unwrap_err();
        assert!(matches!(err, GalleryError::CaptureFailed(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failed_capture_leaves_no_scratch_file() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("scratch-path");
        let script = format!(
            "echo frame > \"$1\"; printf %s \"$1\" > '{}'; exit 3",
            marker.display()
        );
        let camera = NativeCameraConfig {
            device: dir.path().to_path_buf(),
            command: vec![
                "sh".to_string(),
                "-c".to_string(),
                script,
                "sh".to_string(),
                "{output}".to_string(),
            ],
        };
        let backend = NativeCapture::new(camera, dir.path().to_path_buf());

        let err = backend.capture(&CaptureSettings::default()).await.unwrap_err();
        assert!(matches!(err, GalleryError::CaptureFailed(_)));

        let scratch = PathBuf::from(std::fs::read_to_string(&marker).unwrap());
        assert!(NativeCapture::is_scratch(&scratch));
        assert!(!scratch.exists());
    }

    #[tokio::test]
    async fn unknown_program_is_a_capture_failure() {
        let dir = tempfile::tempdir().unwrap();
        let camera = NativeCameraConfig {
            device: dir.path().to_path_buf(),
            command: vec!["no-such-capture-program".to_string(), "{output}".to_string()],
        };
        let backend = NativeCapture::new(camera, dir.path().to_path_buf());
        assert!(backend.capture(&CaptureSettings::default()).await.is_err());
    }

    #[tokio::test]
    async fn removing_a_missing_file_is_a_deletion_failure() {
        let dir = tempfile::tempdir().unwrap();
        let backend = NativeCapture::new(NativeCameraConfig::default(), dir.path().to_path_buf());
        let err = backend.remove("1.jpeg").await.unwrap_err();
        assert!(matches!(err, GalleryError::DeletionFailed(_)));
    }

    #[tokio::test]
    async fn removal_outside_the_directory_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let outside = tempfile::NamedTempFile::new().unwrap();
        let backend = NativeCapture::new(NativeCameraConfig::default(), dir.path().to_path_buf());
        let uri = file_uri(outside.path()).unwrap();
        assert!(backend.remove(&uri).await.is_err());
        assert!(outside.path().exists());
    }

    #[tokio::test]
    async fn garbage_base64_is_a_conversion_failure() {
        let dir = tempfile::tempdir().unwrap();
        let backend = NativeCapture::new(NativeCameraConfig::default(), dir.path().to_path_buf());
        let err = backend.persist("1.jpeg", "!!not base64!!").await.unwrap_err();
        assert!(matches!(err, GalleryError::ConversionFailed(_)));
    }
}
