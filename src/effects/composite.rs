use crate::foundation::core::Raster;
use crate::foundation::error::{PixrevealError, PixrevealResult};
use crate::foundation::math::{lerp_u8, unit_to_u8};

pub type Rgba8 = [u8; 4];

/// Straight-alpha white laid over an opaque pixel with `alpha` coverage.
pub fn over_white(dst: Rgba8, alpha: f32) -> Rgba8 {
    let a = unit_to_u8(alpha);
    if a == 0 {
        return dst;
    }
    [
        lerp_u8(dst[0], 255, a),
        lerp_u8(dst[1], 255, a),
        lerp_u8(dst[2], 255, a),
        dst[3].max(a),
    ]
}

/// Copy `src` into `dst` inside the clip `[0, clip_right) x [0, height)`.
///
/// Columns are included when their left edge lies before `clip_right`, so a
/// fractional boundary reveals the partially covered column.
pub fn copy_clipped_left(dst: &mut Raster, src: &Raster, clip_right: f64) -> PixrevealResult<()> {
    if dst.canvas() != src.canvas() || dst.data.len() != src.data.len() {
        return Err(PixrevealError::render(
            "copy_clipped_left expects equally sized rasters",
        ));
    }
    if clip_right <= 0.0 || clip_right.is_nan() {
        return Ok(());
    }
    let cols = (clip_right.ceil() as u64).min(u64::from(dst.width)) as usize;
    if cols == 0 {
        return Ok(());
    }
    let stride = dst.row_stride();
    let span = cols * 4;
    for (d, s) in dst
        .data
        .chunks_exact_mut(stride)
        .zip(src.data.chunks_exact(stride))
    {
        d[..span].copy_from_slice(&s[..span]);
    }
    Ok(())
}

/// Horizontal white ramp over `[start, end)`: transparent at `start`, rising
/// linearly to `peak_alpha` at `end`. Clipped to the raster.
pub fn white_ramp_in_place(dst: &mut Raster, start: f64, end: f64, peak_alpha: f32) {
    let span = end - start;
    if span.is_nan() || span <= 0.0 || peak_alpha <= 0.0 || dst.is_unset() {
        return;
    }
    let x0 = start.max(0.0).floor() as u64;
    let x1 = (end.ceil().max(0.0) as u64).min(u64::from(dst.width));
    if x0 >= x1 {
        return;
    }
    let stride = dst.row_stride();
    for x in x0..x1 {
        let center = x as f64 + 0.5;
        let t = ((center - start) / span).clamp(0.0, 1.0);
        let alpha = peak_alpha * t as f32;
        let off = (x as usize) * 4;
        for row in dst.data.chunks_exact_mut(stride) {
            let px = &mut row[off..off + 4];
            let out = over_white([px[0], px[1], px[2], px[3]], alpha);
            px.copy_from_slice(&out);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
