use std::path::Path;

use anyhow::Context;
use image::{RgbaImage, imageops::FilterType};

use crate::foundation::{
    core::{Canvas, Raster},
    error::PixrevealResult,
};

/// Decode encoded image bytes to straight RGBA8.
pub fn decode_image(bytes: &[u8]) -> PixrevealResult<RgbaImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(dyn_img.to_rgba8())
}

pub fn open_image(path: &Path) -> PixrevealResult<RgbaImage> {
    let dyn_img = image::open(path).with_context(|| format!("open image '{}'", path.display()))?;
    Ok(dyn_img.to_rgba8())
}

/// Stretch `img` to exactly fill `canvas`, ignoring aspect ratio.
///
/// An empty image or canvas gives a transparent raster of the canvas size.
#[tracing::instrument(skip(img), fields(src_w = img.width(), src_h = img.height()))]
pub fn fit_to_surface(img: &RgbaImage, canvas: Canvas) -> Raster {
    if canvas.is_empty() || img.width() == 0 || img.height() == 0 {
        return Raster::new(canvas.width, canvas.height);
    }
    if img.dimensions() == (canvas.width, canvas.height) {
        return Raster::from(img.clone());
    }
    let resized = image::imageops::resize(img, canvas.width, canvas.height, FilterType::Triangle);
    Raster::from(resized)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
