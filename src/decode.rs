// src/decode.rs

//! Raster decoding. Any format the `image` crate can open is accepted and
//! converted to 8-bit RGBA.

use crate::error::{ConvertError, Result};
use log::{debug, info};
use std::path::Path;

/// Opens and decodes the image at `path`.
///
/// Decode failures are returned as `ConvertError::Decode` and are not
/// retried.
pub fn load_image(path: &Path) -> Result<image::RgbaImage> {
    info!("Reading {}", path.display());
    let decoded = image::open(path).map_err(|source| ConvertError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let rgba = decoded.to_rgba8();
    debug!(
        "Decoded {} as {}x{} RGBA",
        path.display(),
        rgba.width(),
        rgba.height()
    );
    Ok(rgba)
}
