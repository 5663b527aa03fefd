use std::path::{Path, PathBuf};

use super::bbox::{content_bbox, BoundingBox};
use super::strip::{corner_pixels, whiteness_mask, CornerPixels};
use crate::data::load_rgba;
use crate::error::{Error, Result};

/// Read-only summary of an image, as seen by the stripper and the cropper.
#[derive(Debug, Clone)]
pub struct InspectReport {
    pub path: PathBuf,
    pub size: (u32, u32),
    pub corners: CornerPixels,
    /// Pixels the stripper would make transparent.
    pub white_pixels: usize,
    /// Current content box, before any stripping.
    pub bbox: Option<BoundingBox>,
}

pub fn inspect_file(path: &Path) -> Result<InspectReport> {
    let image = load_rgba(path)?;
    let corners = corner_pixels(&image).ok_or_else(|| Error::EmptyImage {
        path: path.to_path_buf(),
    })?;

    Ok(InspectReport {
        path: path.to_path_buf(),
        size: image.dimensions(),
        corners,
        white_pixels: whiteness_mask(&image).count(),
        bbox: content_bbox(&image),
    })
}
