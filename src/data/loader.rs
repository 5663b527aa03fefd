use image::{ImageError, ImageFormat, ImageReader, RgbaImage};
use std::path::Path;

use crate::error::{Error, Result};

/// Load an image of any supported format as RGBA.
///
/// The decoder is picked from the file's leading bytes, falling back to the
/// extension. Opaque sources come back with alpha = 255 on every pixel.
pub fn load_rgba<P: AsRef<Path>>(path: P) -> Result<RgbaImage> {
    let path = path.as_ref();
    let io_error = |e: std::io::Error| Error::ImageLoad {
        path: path.to_path_buf(),
        source: ImageError::IoError(e),
    };

    let reader = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(io_error)?;

    let img = reader.decode().map_err(|source| match source {
        ImageError::Unsupported(_) => Error::UnsupportedFormat {
            path: path.to_path_buf(),
            source,
        },
        source => Error::ImageLoad {
            path: path.to_path_buf(),
            source,
        },
    })?;

    tracing::debug!(
        width = img.width(),
        height = img.height(),
        color = ?img.color(),
        "loaded {}",
        path.display()
    );
    Ok(img.to_rgba8())
}

/// Save as PNG whatever the file extension says.
pub fn save_png<P: AsRef<Path>>(img: &RgbaImage, path: P) -> Result<()> {
    let path = path.as_ref();

    img.save_with_format(path, ImageFormat::Png)
        .map_err(|source| Error::ImageSave {
            path: path.to_path_buf(),
            source,
        })
}
