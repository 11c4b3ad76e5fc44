use crate::{
    animation::ease::Ease,
    config::RevealConfig,
    foundation::error::{PixrevealError, PixrevealResult},
};

/// Maps countdown progress to a pixelation stage and a block size.
///
/// Discretisation and the easing denominator both read `stages` from this
/// one value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StageCurve {
    stages: u32,
    max_block: u32,
    min_block: u32,
    ease: Ease,
}

impl Default for StageCurve {
    fn default() -> Self {
        Self::from_config(&RevealConfig::default())
    }
}

impl StageCurve {
    pub fn new(stages: u32, max_block: u32, min_block: u32, exponent: f64) -> PixrevealResult<Self> {
        if stages < 2 {
            return Err(PixrevealError::validation("stage curve needs at least 2 stages"));
        }
        if min_block == 0 || max_block < min_block {
            return Err(PixrevealError::validation(
                "stage curve needs 1 <= min_block <= max_block",
            ));
        }
        if !exponent.is_finite() || exponent <= 0.0 {
            return Err(PixrevealError::validation(
                "stage curve exponent must be finite and > 0",
            ));
        }
        Ok(Self {
            stages,
            max_block,
            min_block,
            ease: Ease::InPow(exponent),
        })
    }

    /// Build from an already validated config.
    pub fn from_config(cfg: &RevealConfig) -> Self {
        Self {
            stages: cfg.stages.max(2),
            max_block: cfg.max_block.max(cfg.min_block.max(1)),
            min_block: cfg.min_block.max(1),
            ease: Ease::InPow(cfg.curve_exponent),
        }
    }

    pub fn stages(&self) -> u32 {
        self.stages
    }

    pub fn last_stage(&self) -> u32 {
        self.stages - 1
    }

    pub fn max_block(&self) -> u32 {
        self.max_block
    }

    pub fn min_block(&self) -> u32 {
        self.min_block
    }

    /// `floor(fraction * stages)`, clamped so that progress 1.0 lands on the
    /// last stage rather than one past it.
    pub fn stage_of(&self, elapsed_fraction: f64) -> u32 {
        if elapsed_fraction.is_nan() {
            return 0;
        }
        let f = elapsed_fraction.clamp(0.0, 1.0);
        let stage = (f * f64::from(self.stages)).floor() as u32;
        stage.min(self.last_stage())
    }

    /// Eased exponential interpolation from `max_block` (stage 0) down to
    /// `min_block` (last stage).
    pub fn block_size_of(&self, stage: u32) -> u32 {
        let stage = stage.min(self.last_stage());
        let progress = f64::from(stage) / f64::from(self.last_stage());
        let eased = self.ease.apply(progress);
        let max = f64::from(self.max_block);
        let ratio = f64::from(self.min_block) / max;
        let size = (max * ratio.powf(eased)).round() as u32;
        size.clamp(self.min_block, self.max_block)
    }

    pub fn block_size_for(&self, elapsed_fraction: f64) -> u32 {
        self.block_size_of(self.stage_of(elapsed_fraction))
    }
}

/// `(total - remaining) / total`, or 0 for a degenerate zero-length session.
pub fn elapsed_fraction(total_seconds: u32, remaining_seconds: u32) -> f64 {
    if total_seconds == 0 {
        return 0.0;
    }
    let remaining = remaining_seconds.min(total_seconds);
    f64::from(total_seconds - remaining) / f64::from(total_seconds)
}

/// Block size for `elapsed_fraction` under the default curve.
pub fn compute_block_size(elapsed_fraction: f64) -> u32 {
    StageCurve::default().block_size_for(elapsed_fraction)
}

#[cfg(test)]
#[path = "../../tests/unit/stage/mapper.rs"]
mod tests;
