use crate::foundation::error::{PixrevealError, PixrevealResult};

/// Pixel dimensions of a presentation surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Shrink each axis independently so it fits inside `max`.
    pub fn clamp_to(self, max: Canvas) -> Self {
        Self {
            width: self.width.min(max.width),
            height: self.height.min(max.height),
        }
    }

    pub fn byte_len(self) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|v| v.checked_mul(4))
    }
}

/// Opaque 8-bit color produced by block averaging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

/// Straight (non-premultiplied) RGBA8 raster, row-major and tightly packed.
///
/// This is both the source image buffer and the output surface. A raster
/// whose `data` length disagrees with its dimensions is treated as unset by
/// the renderers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl Raster {
    /// Fully transparent raster of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        let len = Canvas::new(width, height).byte_len().unwrap_or(0);
        Self {
            width,
            height,
            data: vec![0; len],
        }
    }

    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            data: Vec::new(),
        }
    }

    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> PixrevealResult<Self> {
        let expected = Canvas::new(width, height)
            .byte_len()
            .ok_or_else(|| PixrevealError::render("raster size overflow"))?;
        if data.len() != expected {
            return Err(PixrevealError::render(format!(
                "raster {width}x{height} expects {expected} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn filled(width: u32, height: u32, color: Rgb8) -> Self {
        let mut out = Self::new(width, height);
        for px in out.data.chunks_exact_mut(4) {
            px.copy_from_slice(&color.to_rgba());
        }
        out
    }

    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.width, self.height)
    }

    /// True when there is nothing to sample: zero-sized or a buffer whose
    /// length does not match its dimensions.
    pub fn is_unset(&self) -> bool {
        self.canvas().is_empty() || Some(self.data.len()) != self.canvas().byte_len()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = self.index(x, y);
        let px = self.data.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Match `canvas`, reallocating if the size changed, and clear.
    pub fn reset_to(&mut self, canvas: Canvas) {
        let len = canvas.byte_len().unwrap_or(0);
        self.width = canvas.width;
        self.height = canvas.height;
        self.data.clear();
        self.data.resize(len, 0);
    }

    /// Paint an opaque rectangle, clipped to the raster bounds.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgb8) {
        let x1 = x.saturating_add(w).min(self.width);
        let y1 = y.saturating_add(h).min(self.height);
        if x >= x1 || y >= y1 {
            return;
        }
        let rgba = color.to_rgba();
        for row in y..y1 {
            let start = self.index(x, row);
            let end = self.index(x1, row);
            for px in self.data[start..end].chunks_exact_mut(4) {
                px.copy_from_slice(&rgba);
            }
        }
    }

    pub fn into_image(self) -> PixrevealResult<image::RgbaImage> {
        let (w, h) = (self.width, self.height);
        image::RgbaImage::from_raw(w, h, self.data)
            .ok_or_else(|| PixrevealError::render(format!("raster {w}x{h} has wrong byte length")))
    }

    #[inline]
    pub(crate) fn index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 4
    }

    pub(crate) fn row_stride(&self) -> usize {
        (self.width as usize) * 4
    }
}

impl From<image::RgbaImage> for Raster {
    fn from(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
