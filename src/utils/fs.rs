use std::path::{Component, Path, PathBuf};
use tauri::Url;
use tokio::fs;
use crate::utils::{GalleryError, GalleryResult, ValidationError};

/// Create a directory and all of its parents
pub async fn create_dir_all(path: impl AsRef<Path>) -> GalleryResult<()> {
    fs::create_dir_all(path.as_ref())
        .await
        .map_err(|e| GalleryError::IO(format!(
            "Failed to create directory {}: {}", path.as_ref().display(), e
        )))
}

/// `file://` URI for a path on disk.
pub fn file_uri(path: &Path) -> GalleryResult<String> {
    Url::from_file_path(path)
        .map(|u| u.to_string())
        .map_err(|_| ValidationError::identifier(format!(
            "Not an absolute path: {}", path.display()
        )).into())
}

/// Resolves a gallery identifier (a `file://` URI or a bare file name) to a
/// path inside `dir`.
///
/// Anything that would land outside `dir` is refused, so a tampered gallery
/// list cannot be used to delete or read arbitrary files.
pub fn resolve_in_dir(dir: &Path, identifier: &str) -> GalleryResult<PathBuf> {
    if identifier.is_empty() {
        return Err(ValidationError::identifier("empty identifier").into());
    }

    let path = if identifier.starts_with("file:") {
        let url = Url::parse(identifier)
            .map_err(|e| ValidationError::identifier(format!("{}: {}", identifier, e)))?;
        url.to_file_path()
            .map_err(|_| ValidationError::identifier(identifier.to_string()))?
    } else if identifier.contains(':') && !Path::new(identifier).is_absolute() {
        // data:, blob:, http: and friends never live on disk
        return Err(ValidationError::identifier(identifier.to_string()).into());
    } else {
        dir.join(identifier)
    };

    let escapes = path
        .components()
        .any(|c| matches!(c, Component::ParentDir));
    if escapes || path.parent() != Some(dir) {
        return Err(ValidationError::outside_scope(path).into());
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_names_resolve_inside_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = resolve_in_dir(dir.path(), "1700000000000.jpeg").unwrap();
        assert_eq!(path, dir.path().join("1700000000000.jpeg"));
    }

    #[test]
    fn file_uris_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("1700000000000.jpeg");
        let uri = file_uri(&target).unwrap();
        assert!(uri.starts_with("file://"));
        assert_eq!(resolve_in_dir(dir.path(), &uri).unwrap(), target);
    }

    #[test]
    fn traversal_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_in_dir(dir.path(), "../secrets.jpeg").unwrap_err();
        assert!(matches!(err, GalleryError::Validation(_)));

        let nested = resolve_in_dir(dir.path(), "sub/photo.jpeg");
        assert!(nested.is_err());
    }

    #[test]
    fn foreign_uris_are_refused() {
        let dir = tempfile::tempdir().unwrap();
        assert!(resolve_in_dir(dir.path(), "data:image/jpeg;base64,AAAA").is_err());
        assert!(resolve_in_dir(dir.path(), "blob:abc").is_err());
        assert!(resolve_in_dir(dir.path(), "").is_err());

        let elsewhere = file_uri(&std::env::temp_dir().join("other.jpeg")).unwrap();
        assert!(resolve_in_dir(dir.path(), &elsewhere).is_err());
    }

    #[tokio::test]
    async fn create_dir_all_builds_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("Camera").join("photos");
        create_dir_all(&nested).await.unwrap();
        assert!(nested.is_dir());
    }
}
