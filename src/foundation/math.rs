pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

/// Quantize a unit-interval coverage/opacity to 0..=255.
pub(crate) fn unit_to_u8(v: f32) -> u8 {
    ((v.clamp(0.0, 1.0) * 255.0).round() as i32).clamp(0, 255) as u8
}

/// Blend `c` toward `target` by `t/255`, rounding to nearest.
pub(crate) fn lerp_u8(c: u8, target: u8, t: u8) -> u8 {
    let keep = mul_div255_u16(u16::from(c), 255 - u16::from(t));
    let take = mul_div255_u16(u16::from(target), u16::from(t));
    (keep + take).min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
