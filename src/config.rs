use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context as _;

use crate::foundation::{
    core::Canvas,
    error::{PixrevealError, PixrevealResult},
};

/// Tunables for the stage curve, the block renderer, the reveal wipe and the
/// countdown driver.
///
/// Every field has a default, so a config file only needs the keys it
/// overrides. Unknown keys are rejected.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    /// Number of discrete pixelation stages across the countdown.
    pub stages: u32,
    /// Block size at stage 0.
    pub max_block: u32,
    /// Block size at the last stage and for the reveal's pixelated base.
    pub min_block: u32,
    pub curve_exponent: f64,
    pub blast_duration_ms: u64,
    /// Width of the soft seam trailing the wipe boundary, and the overshoot
    /// past the right edge before the reveal completes.
    pub transition_zone_px: u32,
    pub gradient_peak_alpha: f32,
    /// 1.0 keeps averaged colors as-is; 0.0 renders grayscale blocks.
    pub saturation: f32,
    pub drift_threshold_ms: u64,
    pub max_surface: Canvas,
}

pub const DEFAULT_STAGES: u32 = 16;
pub const DEFAULT_MAX_BLOCK: u32 = 256;
pub const DEFAULT_MIN_BLOCK: u32 = 8;
pub const DEFAULT_CURVE_EXPONENT: f64 = 1.4;
pub const DEFAULT_BLAST_DURATION_MS: u64 = 2500;
pub const DEFAULT_TRANSITION_ZONE_PX: u32 = 120;
pub const DEFAULT_DRIFT_THRESHOLD_MS: u64 = 900;

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            stages: DEFAULT_STAGES,
            max_block: DEFAULT_MAX_BLOCK,
            min_block: DEFAULT_MIN_BLOCK,
            curve_exponent: DEFAULT_CURVE_EXPONENT,
            blast_duration_ms: DEFAULT_BLAST_DURATION_MS,
            transition_zone_px: DEFAULT_TRANSITION_ZONE_PX,
            gradient_peak_alpha: 0.5,
            saturation: 1.0,
            drift_threshold_ms: DEFAULT_DRIFT_THRESHOLD_MS,
            max_surface: Canvas::new(1920, 1080),
        }
    }
}

impl RevealConfig {
    pub fn from_json_str(s: &str) -> PixrevealResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| PixrevealError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> PixrevealResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| PixrevealError::serde(format!("{}: {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> PixrevealResult<()> {
        if self.stages < 2 {
            return Err(PixrevealError::validation("stages must be >= 2"));
        }
        if self.min_block == 0 {
            return Err(PixrevealError::validation("min_block must be >= 1"));
        }
        if self.max_block < self.min_block {
            return Err(PixrevealError::validation(
                "max_block must be >= min_block",
            ));
        }
        if !self.curve_exponent.is_finite() || self.curve_exponent <= 0.0 {
            return Err(PixrevealError::validation(
                "curve_exponent must be finite and > 0",
            ));
        }
        if self.blast_duration_ms == 0 {
            return Err(PixrevealError::validation("blast_duration_ms must be > 0"));
        }
        if !(0.0..=1.0).contains(&self.gradient_peak_alpha) {
            return Err(PixrevealError::validation(
                "gradient_peak_alpha must be in [0, 1]",
            ));
        }
        if !(0.0..=1.0).contains(&self.saturation) {
            return Err(PixrevealError::validation("saturation must be in [0, 1]"));
        }
        if self.drift_threshold_ms == 0 {
            return Err(PixrevealError::validation(
                "drift_threshold_ms must be > 0",
            ));
        }
        if self.max_surface.is_empty() {
            return Err(PixrevealError::validation("max_surface must be non-zero"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
