pub mod error;
pub mod validation;
pub mod formats;
pub mod fs;
pub mod clock;

pub use error::{GalleryError, GalleryResult, PathError, ValidationError};
pub use validation::{validate_capture_settings, validate_config};
pub use formats::{ImageFormat, format_from_extension};
pub use fs::{create_dir_all, file_uri, resolve_in_dir};
pub use clock::{Clock, SystemClock, photo_file_name};
