use crate::core::{AppConfig, CaptureSettings};
use crate::utils::{GalleryError, GalleryResult, ValidationError};

/// Validates the settings handed to the capture capability
pub fn validate_capture_settings(settings: &CaptureSettings) -> GalleryResult<()> {
    if settings.quality == 0 || settings.quality > 100 {
        return Err(ValidationError::settings(
            format!("Invalid quality value: {}. Must be between 1 and 100", settings.quality)
        ).into());
    }
    Ok(())
}

/// Validates a full application config before it is used
pub fn validate_config(config: &AppConfig) -> GalleryResult<()> {
    validate_capture_settings(&config.capture)?;

    if config.camera.command.is_empty() || config.camera.command[0].trim().is_empty() {
        return Err(ValidationError::settings("Capture command cannot be empty").into());
    }

    if !config.camera.command.iter().any(|arg| arg.contains("{output}")) {
        return Err(ValidationError::settings(
            "Capture command must contain an {output} placeholder"
        ).into());
    }

    if let Some(dir) = &config.documents_dir {
        if !dir.is_absolute() {
            return Err(ValidationError::settings(format!(
                "Documents directory must be an absolute path: {}", dir.display()
            )).into());
        }
    }

    if config.gallery.key.trim().is_empty() {
        return Err(GalleryError::config("Gallery key cannot be empty"));
    }

    if config.gallery.store_file.trim().is_empty() {
        return Err(GalleryError::config("Gallery store file cannot be empty"));
    }

    Ok(())
}
