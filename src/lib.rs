//! Favicon post-processing.
//!
//! Two single-pass transformations over an RGBA image:
//!
//! - [`strip_file`] makes opaque near-white pixels transparent and crops the
//!   result to what is left, rewriting the file in place.
//! - [`crop_file`] trims fully transparent padding and writes the result to a
//!   destination path.
//!
//! Both are thin wrappers around pure functions ([`strip_white_background`],
//! [`crop_to_content`]) that can be used on in-memory images.

pub mod config;
pub mod data;
pub mod error;
pub mod logging;
pub mod transform;

pub use config::{load_config, Config};
pub use data::*;
pub use error::{Error, Result};
pub use transform::*;
