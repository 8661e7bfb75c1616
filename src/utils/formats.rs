use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use crate::utils::{GalleryError, GalleryResult};

const DATA_URL_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    JPEG,
    PNG,
    WebP,
    GIF,
    BMP,
    HEIC,
}

impl ImageFormat {
    /// Every format the picker offers.
    pub const ALL: [ImageFormat; 6] = [
        Self::JPEG,
        Self::PNG,
        Self::WebP,
        Self::GIF,
        Self::BMP,
        Self::HEIC,
    ];

    /// Get file extensions associated with this format
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::JPEG => &["jpeg", "jpg"],
            Self::PNG => &["png"],
            Self::WebP => &["webp"],
            Self::GIF => &["gif"],
            Self::BMP => &["bmp"],
            Self::HEIC => &["heic", "heif"],
        }
    }

    /// Check if the extension matches this format
    pub fn matches_extension(&self, ext: &str) -> bool {
        let ext = ext.to_lowercase();
        self.extensions().contains(&ext.as_str())
    }

    /// Get the primary extension for this format
    pub fn primary_extension(&self) -> &'static str {
        self.extensions()[0]
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::JPEG => "image/jpeg",
            Self::PNG => "image/png",
            Self::WebP => "image/webp",
            Self::GIF => "image/gif",
            Self::BMP => "image/bmp",
            Self::HEIC => "image/heic",
        }
    }

    /// Flattened extension list for file dialog filters.
    pub fn all_extensions() -> Vec<&'static str> {
        Self::ALL
            .iter()
            .flat_map(|f| f.extensions().iter())
            .copied()
            .collect()
    }
}

impl FromStr for ImageFormat {
    type Err = GalleryError;

    fn from_str(ext: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.matches_extension(ext))
            .ok_or_else(|| GalleryError::conversion(format!(
                "Unsupported image format: {}", ext
            )))
    }
}

/// Get format from file extension
pub fn format_from_extension(path: &str) -> Result<ImageFormat, GalleryError> {
    let ext = std::path::Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| GalleryError::conversion(
            format!("File has no extension: {}", path)
        ))?;

    ImageFormat::from_str(ext)
}

/// Base64-encode raw image bytes.
pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Wrap raw bytes in a `data:` URL.
pub fn to_data_url(bytes: &[u8], format: ImageFormat) -> String {
    format!("{}{}{}{}", DATA_URL_PREFIX, format.mime_type(), BASE64_MARKER, encode_base64(bytes))
}

pub fn is_data_url(value: &str) -> bool {
    value.starts_with(DATA_URL_PREFIX)
}

/// Returns the base64 payload of a data URL, or the input itself when it is
/// already bare base64.
pub fn base64_payload(value: &str) -> GalleryResult<&str> {
    if !is_data_url(value) {
        return Ok(value);
    }
    value
        .split_once(BASE64_MARKER)
        .map(|(_, payload)| payload)
        .ok_or_else(|| GalleryError::conversion("Data URL is not base64-encoded"))
}

/// Decode either a bare base64 string or a base64 data URL.
pub fn decode_base64(value: &str) -> GalleryResult<Vec<u8>> {
    let payload = base64_payload(value)?;
    if payload.is_empty() {
        return Err(GalleryError::conversion("Empty image payload"));
    }
    Ok(STANDARD.decode(payload)?)
}
