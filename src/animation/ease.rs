/// Remapping of linear progress in `[0, 1]`.
///
/// The stage curve uses [`Ease::InPow`] so blocks shrink slowly at first and
/// quickly near the end; the reveal wipe uses [`Ease::OutQuad`] for a fast
/// start and a soft settle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Ease {
    /// `t^k` with `k > 0`.
    InPow(f64),
    /// `1 - (1 - t)^2`.
    OutQuad,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        if t.is_nan() {
            return 0.0;
        }
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::InPow(k) => t.powf(k),
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
