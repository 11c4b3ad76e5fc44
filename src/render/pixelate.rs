use rayon::prelude::*;

use crate::foundation::core::{Canvas, Raster, Rgb8};

/// One cell of the pixelation grid, already clipped to the image bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Row-major (left to right, top to bottom) grid of `block_size` squares
/// covering `canvas`. Edge cells are narrower/shorter when the canvas is not
/// an exact multiple. Yields nothing for a zero block size or empty canvas.
pub fn block_grid(canvas: Canvas, block_size: u32) -> impl Iterator<Item = BlockRect> {
    let step = if block_size == 0 || canvas.is_empty() {
        None
    } else {
        Some(block_size)
    };
    let rows = step.map(|b| row_starts(canvas.height, b)).into_iter().flatten();
    rows.flat_map(move |y| {
        let b = step.unwrap_or(1);
        let height = b.min(canvas.height - y);
        row_starts(canvas.width, b).map(move |x| BlockRect {
            x,
            y,
            width: b.min(canvas.width - x),
            height,
        })
    })
}

fn row_starts(len: u32, step: u32) -> impl Iterator<Item = u32> {
    (0..len).step_by(step as usize)
}

/// Mean R, G, B over the in-bounds pixels of `rect`, each floored.
/// `None` when the rectangle covers no pixels of `image`.
pub fn average_color(image: &Raster, rect: BlockRect) -> Option<Rgb8> {
    if image.is_unset() {
        return None;
    }
    let x1 = rect.x.saturating_add(rect.width).min(image.width);
    let y1 = rect.y.saturating_add(rect.height).min(image.height);
    if rect.x >= x1 || rect.y >= y1 {
        return None;
    }

    let (mut r, mut g, mut b) = (0u64, 0u64, 0u64);
    for y in rect.y..y1 {
        let start = image.index(rect.x, y);
        let end = image.index(x1, y);
        for px in image.data[start..end].chunks_exact(4) {
            r += u64::from(px[0]);
            g += u64::from(px[1]);
            b += u64::from(px[2]);
        }
    }
    let count = u64::from(x1 - rect.x) * u64::from(y1 - rect.y);
    Some(Rgb8::new(
        (r / count) as u8,
        (g / count) as u8,
        (b / count) as u8,
    ))
}

/// Blend each channel toward its luma by `1 - saturation`.
pub fn desaturate(color: Rgb8, saturation: f32) -> Rgb8 {
    if saturation >= 1.0 || saturation.is_nan() {
        return color;
    }
    let s = saturation.max(0.0);
    let gray = 0.299 * f32::from(color.r) + 0.587 * f32::from(color.g) + 0.114 * f32::from(color.b);
    let mix = |c: u8| {
        let c = f32::from(c);
        (c + (gray - c) * (1.0 - s)).round().clamp(0.0, 255.0) as u8
    };
    Rgb8::new(mix(color.r), mix(color.g), mix(color.b))
}

/// Paints a pixelated approximation of a source image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockRenderer {
    saturation: f32,
}

impl Default for BlockRenderer {
    fn default() -> Self {
        Self { saturation: 1.0 }
    }
}

impl BlockRenderer {
    pub fn new(saturation: f32) -> Self {
        Self {
            saturation: if saturation.is_nan() {
                1.0
            } else {
                saturation.clamp(0.0, 1.0)
            },
        }
    }

    pub fn saturation(&self) -> f32 {
        self.saturation
    }

    pub fn block_color(&self, image: &Raster, rect: BlockRect) -> Option<Rgb8> {
        average_color(image, rect).map(|c| desaturate(c, self.saturation))
    }

    /// Flat-colored rectangles in painting order, for hosts that draw
    /// rectangles themselves instead of taking a raster.
    pub fn blocks(&self, image: &Raster, block_size: u32) -> Vec<(BlockRect, Rgb8)> {
        if image.is_unset() {
            return Vec::new();
        }
        block_grid(image.canvas(), block_size)
            .filter_map(|rect| self.block_color(image, rect).map(|c| (rect, c)))
            .collect()
    }

    /// Pixelated copy of `image`. A zero block size or an unset image yields
    /// a transparent raster of the image's dimensions.
    pub fn render(&self, image: &Raster, block_size: u32) -> Raster {
        let mut out = Raster::new(image.width, image.height);
        self.render_into(&mut out, image, block_size);
        out
    }

    /// Like [`BlockRenderer::render`], reusing `dst`'s allocation.
    #[tracing::instrument(skip(self, dst, image), fields(width = image.width, height = image.height))]
    pub fn render_into(&self, dst: &mut Raster, image: &Raster, block_size: u32) {
        if block_size == 0 || image.is_unset() {
            dst.reset_to(image.canvas());
            return;
        }
        dst.reset_to(image.canvas());

        let width = image.width;
        let stride = dst.row_stride();
        let band_len = stride.saturating_mul(block_size as usize);

        // Each band is one row of blocks; bands never overlap.
        dst.data
            .par_chunks_mut(band_len)
            .enumerate()
            .for_each(|(band, rows)| {
                let y = (band as u32) * block_size;
                let height = (rows.len() / stride) as u32;
                for x in row_starts(width, block_size) {
                    let rect = BlockRect {
                        x,
                        y,
                        width: block_size.min(width - x),
                        height,
                    };
                    let Some(color) = self.block_color(image, rect) else {
                        continue;
                    };
                    let rgba = color.to_rgba();
                    let span = (x as usize) * 4..((x + rect.width) as usize) * 4;
                    for row in rows.chunks_exact_mut(stride) {
                        for px in row[span.clone()].chunks_exact_mut(4) {
                            px.copy_from_slice(&rgba);
                        }
                    }
                }
            });
    }
}

/// Pixelate with default saturation.
pub fn render_pixelated(image: &Raster, block_size: u32) -> Raster {
    BlockRenderer::default().render(image, block_size)
}

#[cfg(test)]
#[path = "../../tests/unit/render/pixelate.rs"]
mod tests;
