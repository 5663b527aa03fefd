//! Trim transparent padding.

use image::RgbaImage;
use std::path::{Path, PathBuf};

use super::bbox::{content_bbox, crop_to_bbox, BoundingBox};
use crate::data::{load_rgba, save_png};
use crate::error::Result;

#[derive(Debug, Clone)]
pub enum CropOutcome {
    Cropped {
        original: (u32, u32),
        bbox: BoundingBox,
        image: RgbaImage,
    },
    /// Nothing visible to crop to; the image is passed through as-is.
    FullyTransparent { image: RgbaImage },
}

impl CropOutcome {
    pub fn image(&self) -> &RgbaImage {
        match self {
            CropOutcome::Cropped { image, .. } | CropOutcome::FullyTransparent { image } => image,
        }
    }
}

/// Crop an image to its non-transparent content.
pub fn crop_to_content(image: RgbaImage) -> CropOutcome {
    match content_bbox(&image) {
        Some(bbox) => {
            let original = image.dimensions();
            // No padding to remove, keep the buffer
            let image = if bbox.covers(original.0, original.1) {
                image
            } else {
                crop_to_bbox(&image, bbox)
            };
            CropOutcome::Cropped {
                original,
                bbox,
                image,
            }
        }
        None => CropOutcome::FullyTransparent { image },
    }
}

/// What [`crop_file`] wrote.
#[derive(Debug, Clone)]
pub struct CropReport {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub original_size: (u32, u32),
    /// `None` when the source was fully transparent and copied unchanged.
    pub bbox: Option<BoundingBox>,
    pub output_size: (u32, u32),
}

/// Crop `source` to its content and write the result to `destination` as PNG.
///
/// A fully transparent source is written to `destination` uncropped.
pub fn crop_file(source: &Path, destination: &Path) -> Result<CropReport> {
    let span = tracing::info_span!(
        "crop",
        source = %source.display(),
        destination = %destination.display()
    );
    let _enter = span.enter();

    let image = load_rgba(source)?;
    let original_size = image.dimensions();

    let outcome = crop_to_content(image);
    let bbox = match &outcome {
        CropOutcome::Cropped { bbox, .. } => {
            tracing::debug!(%bbox, "computed content bounding box");
            Some(*bbox)
        }
        CropOutcome::FullyTransparent { .. } => {
            tracing::warn!("image is fully transparent, copying original");
            None
        }
    };

    let output = outcome.image();
    save_png(output, destination)?;
    tracing::info!(
        width = output.width(),
        height = output.height(),
        "saved cropped image"
    );

    Ok(CropReport {
        source: source.to_path_buf(),
        destination: destination.to_path_buf(),
        original_size,
        bbox,
        output_size: output.dimensions(),
    })
}
