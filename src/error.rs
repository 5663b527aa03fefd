//! Error types for favicon processing.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// No decoder for this format is compiled in.
    #[error("unsupported image format in {path}: {source}")]
    UnsupportedFormat {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Failed to open or decode an image file.
    #[error("failed to load image from {path}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Failed to encode or write an image file.
    #[error("failed to save image to {path}: {source}")]
    ImageSave {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Image has zero width or height.
    #[error("image {path} has no pixels")]
    EmptyImage { path: PathBuf },

    /// Configuration could not be read, parsed or validated.
    #[error("configuration error in {path}: {reason}")]
    Config { path: PathBuf, reason: String },
}

impl Error {
    /// True when the failure means a codec is missing rather than bad input.
    pub fn is_missing_capability(&self) -> bool {
        matches!(self, Error::UnsupportedFormat { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
