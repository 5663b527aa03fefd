//! White background removal.
//!
//! Every opaque near-white pixel is made transparent and the image is
//! re-cropped to whatever content remains. The match is global: a near-white
//! region in the middle of the icon is removed just like the border.

use image::{Rgba, RgbaImage};
use std::fmt;
use std::path::{Path, PathBuf};

use super::bbox::{content_bbox, crop_to_bbox, BoundingBox};
use crate::data::{load_rgba, save_png};
use crate::error::{Error, Result};

/// Each of R, G and B must exceed this for a pixel to count as white.
pub const WHITE_THRESHOLD: u8 = 240;

/// Replacement for matched pixels.
pub const TRANSPARENT_WHITE: Rgba<u8> = Rgba([255, 255, 255, 0]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CornerPixels {
    pub top_left: Rgba<u8>,
    pub top_right: Rgba<u8>,
    pub bottom_left: Rgba<u8>,
    pub bottom_right: Rgba<u8>,
}

impl fmt::Display for CornerPixels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "top-left {:?}, top-right {:?}, bottom-left {:?}, bottom-right {:?}",
            self.top_left.0, self.top_right.0, self.bottom_left.0, self.bottom_right.0
        )
    }
}

/// Corner pixels of a non-empty image.
pub fn corner_pixels(image: &RgbaImage) -> Option<CornerPixels> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return None;
    }
    let (x_max, y_max) = (width - 1, height - 1);

    Some(CornerPixels {
        top_left: *image.get_pixel(0, 0),
        top_right: *image.get_pixel(x_max, 0),
        bottom_left: *image.get_pixel(0, y_max),
        bottom_right: *image.get_pixel(x_max, y_max),
    })
}

/// Fully opaque with every color channel above [`WHITE_THRESHOLD`].
#[inline]
pub fn is_white(pixel: &Rgba<u8>) -> bool {
    let [r, g, b, a] = pixel.0;
    r > WHITE_THRESHOLD && g > WHITE_THRESHOLD && b > WHITE_THRESHOLD && a == u8::MAX
}

/// Per-pixel result of [`is_white`], row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhitenessMask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl WhitenessMask {
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// `None` outside the mask.
    pub fn get(&self, x: u32, y: u32) -> Option<bool> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.bits
            .get((y as usize) * (self.width as usize) + x as usize)
            .copied()
    }

    /// Number of matched pixels.
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.bits.iter().any(|&b| b)
    }
}

pub fn whiteness_mask(image: &RgbaImage) -> WhitenessMask {
    WhitenessMask {
        width: image.width(),
        height: image.height(),
        bits: image.pixels().map(is_white).collect(),
    }
}

/// Replace every masked pixel with [`TRANSPARENT_WHITE`].
pub fn apply_mask(image: &mut RgbaImage, mask: &WhitenessMask) {
    debug_assert_eq!(image.dimensions(), mask.dimensions());

    for (pixel, &hit) in image.pixels_mut().zip(mask.bits.iter()) {
        if hit {
            *pixel = TRANSPARENT_WHITE;
        }
    }
}

#[derive(Debug, Clone)]
pub enum StripOutcome {
    /// Nothing matched; the image is unchanged.
    NoWhiteBackground { corners: CornerPixels },
    /// Removing white left no visible pixels.
    Emptied { corners: CornerPixels, removed: usize },
    /// White removed and the result cropped to `bbox`.
    Stripped {
        corners: CornerPixels,
        removed: usize,
        bbox: BoundingBox,
        image: RgbaImage,
    },
}

impl StripOutcome {
    pub fn corners(&self) -> &CornerPixels {
        match self {
            StripOutcome::NoWhiteBackground { corners }
            | StripOutcome::Emptied { corners, .. }
            | StripOutcome::Stripped { corners, .. } => corners,
        }
    }
}

/// Strip the white background from an in-memory image.
///
/// Returns `None` only for a zero-area image.
pub fn strip_white_background(mut image: RgbaImage) -> Option<StripOutcome> {
    let corners = corner_pixels(&image)?;
    tracing::debug!(%corners, "sampled corner pixels");

    let mask = whiteness_mask(&image);
    if mask.is_empty() {
        return Some(StripOutcome::NoWhiteBackground { corners });
    }

    let removed = mask.count();
    apply_mask(&mut image, &mask);
    tracing::debug!(removed, "applied whiteness mask");

    let outcome = match content_bbox(&image) {
        Some(bbox) => StripOutcome::Stripped {
            corners,
            removed,
            bbox,
            image: crop_to_bbox(&image, bbox),
        },
        None => StripOutcome::Emptied { corners, removed },
    };
    Some(outcome)
}

/// What [`strip_file`] found and did.
#[derive(Debug, Clone)]
pub struct StripReport {
    pub path: PathBuf,
    pub original_size: (u32, u32),
    pub corners: CornerPixels,
    /// Pixels made transparent; zero when nothing matched.
    pub removed: usize,
    /// Crop applied before saving; `None` means the file was not written.
    pub bbox: Option<BoundingBox>,
}

impl StripReport {
    pub fn written(&self) -> bool {
        self.bbox.is_some()
    }
}

/// Strip the white background of the image at `path`, in place.
///
/// The file is only rewritten when white pixels were found and some content
/// survives their removal.
pub fn strip_file(path: &Path) -> Result<StripReport> {
    let span = tracing::info_span!("strip", path = %path.display());
    let _enter = span.enter();

    let image = load_rgba(path)?;
    let original_size = image.dimensions();

    let outcome = strip_white_background(image).ok_or_else(|| Error::EmptyImage {
        path: path.to_path_buf(),
    })?;

    let mut report = StripReport {
        path: path.to_path_buf(),
        original_size,
        corners: *outcome.corners(),
        removed: 0,
        bbox: None,
    };

    match outcome {
        StripOutcome::NoWhiteBackground { .. } => {
            tracing::info!("no white background detected, leaving file untouched");
        }
        StripOutcome::Emptied { removed, .. } => {
            tracing::warn!(removed, "image became empty after removing white, not saving");
            report.removed = removed;
        }
        StripOutcome::Stripped {
            removed,
            bbox,
            image,
            ..
        } => {
            save_png(&image, path)?;
            tracing::info!(removed, %bbox, "saved stripped image");
            report.removed = removed;
            report.bbox = Some(bbox);
        }
    }

    Ok(report)
}
