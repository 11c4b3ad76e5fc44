use crate::{
    animation::ease::Ease,
    config::RevealConfig,
    effects::composite::{copy_clipped_left, white_ramp_in_place},
    foundation::core::{Canvas, Raster},
    render::pixelate::BlockRenderer,
};

/// Timing and look of the terminal wipe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealParams {
    pub duration_ms: u64,
    pub transition_zone_px: u32,
    pub gradient_peak_alpha: f32,
    /// Block size of the pixelated base the wipe uncovers from.
    pub base_block: u32,
}

impl RevealParams {
    pub fn from_config(cfg: &RevealConfig) -> Self {
        Self {
            duration_ms: cfg.blast_duration_ms,
            transition_zone_px: cfg.transition_zone_px,
            gradient_peak_alpha: cfg.gradient_peak_alpha,
            base_block: cfg.min_block,
        }
    }
}

impl Default for RevealParams {
    fn default() -> Self {
        Self::from_config(&RevealConfig::default())
    }
}

/// Where the wipe is at a given instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealState {
    pub elapsed_ms: u64,
    pub raw_progress: f64,
    pub eased_progress: f64,
    /// x-coordinate left of which the sharp image is shown.
    pub wipe_boundary: f64,
}

impl RevealState {
    pub fn is_final(&self) -> bool {
        self.raw_progress >= 1.0
    }
}

/// Pure wipe position for `elapsed_ms` on a surface `width` pixels wide.
///
/// The boundary overshoots to `width + transition_zone_px` so the trailing
/// ramp has left the surface by the final frame.
pub fn reveal_state(params: &RevealParams, elapsed_ms: u64, width: u32) -> RevealState {
    let duration = params.duration_ms.max(1) as f64;
    let raw_progress = (elapsed_ms as f64 / duration).min(1.0);
    let eased_progress = Ease::OutQuad.apply(raw_progress);
    let travel = f64::from(width) + f64::from(params.transition_zone_px);
    RevealState {
        elapsed_ms,
        raw_progress,
        eased_progress,
        wipe_boundary: eased_progress * travel,
    }
}

/// One composited reveal frame.
#[derive(Clone, Debug)]
pub struct RevealFrame {
    pub raster: Raster,
    pub state: RevealState,
    /// True on exactly one tick: the first one at or past the duration.
    pub completed: bool,
}

/// Time-driven wipe from the pixelated base to the sharp source.
///
/// The pixelated base is cached per surface size. Call
/// [`RevealAnimator::reset`] before animating a different image.
#[derive(Debug)]
pub struct RevealAnimator {
    params: RevealParams,
    renderer: BlockRenderer,
    base: Option<(Canvas, Raster)>,
    completed: bool,
}

impl RevealAnimator {
    pub fn new(params: RevealParams, renderer: BlockRenderer) -> Self {
        Self {
            params,
            renderer,
            base: None,
            completed: false,
        }
    }

    pub fn from_config(cfg: &RevealConfig) -> Self {
        Self::new(
            RevealParams::from_config(cfg),
            BlockRenderer::new(cfg.saturation),
        )
    }

    pub fn params(&self) -> &RevealParams {
        &self.params
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Forget the cached base and the completion latch.
    pub fn reset(&mut self) {
        self.base = None;
        self.completed = false;
    }

    pub fn tick(&mut self, elapsed_ms: u64, image: &Raster) -> RevealFrame {
        let state = reveal_state(&self.params, elapsed_ms, image.width);

        if state.is_final() || self.completed {
            let completed = !self.completed;
            if completed {
                tracing::info!(elapsed_ms, "reveal complete");
            }
            self.completed = true;
            let raster = if image.is_unset() {
                Raster::new(image.width, image.height)
            } else {
                image.clone()
            };
            return RevealFrame {
                raster,
                state,
                completed,
            };
        }

        if image.is_unset() {
            return RevealFrame {
                raster: Raster::new(image.width, image.height),
                state,
                completed: false,
            };
        }

        let mut raster = self.base_for(image).clone();
        if let Err(err) = copy_clipped_left(&mut raster, image, state.wipe_boundary) {
            tracing::warn!(%err, "reveal copy skipped");
        }

        let zone = f64::from(self.params.transition_zone_px);
        let travel = f64::from(image.width) + zone;
        if (0.0..=travel).contains(&state.wipe_boundary) {
            white_ramp_in_place(
                &mut raster,
                state.wipe_boundary - zone,
                state.wipe_boundary,
                self.params.gradient_peak_alpha,
            );
        }

        RevealFrame {
            raster,
            state,
            completed: false,
        }
    }

    fn base_for(&mut self, image: &Raster) -> &Raster {
        let canvas = image.canvas();
        if matches!(&self.base, Some((c, _)) if *c != canvas) {
            self.base = None;
        }
        let renderer = self.renderer;
        let block = self.params.base_block;
        &self
            .base
            .get_or_insert_with(|| {
                tracing::debug!(
                    width = canvas.width,
                    height = canvas.height,
                    block,
                    "render reveal base"
                );
                (canvas, renderer.render(image, block))
            })
            .1
    }
}

/// Drive a reveal from a host frame clock.
///
/// `next_frame` yields the timestamp (ms) of each display refresh and `None`
/// once the host stops scheduling (restart or teardown). Every frame goes to
/// `present`; `on_complete` runs once after the final frame. Returns whether
/// the reveal finished.
pub fn run_reveal<C, P, F>(
    animator: &mut RevealAnimator,
    image: &Raster,
    mut next_frame: C,
    mut present: P,
    on_complete: F,
) -> bool
where
    C: FnMut() -> Option<u64>,
    P: FnMut(&Raster),
    F: FnOnce(),
{
    animator.reset();
    let mut started_at = None;
    while let Some(now) = next_frame() {
        let start = *started_at.get_or_insert(now);
        let frame = animator.tick(now.saturating_sub(start), image);
        present(&frame.raster);
        if frame.completed {
            on_complete();
            return true;
        }
    }
    tracing::debug!("reveal cancelled before completion");
    false
}

#[cfg(test)]
#[path = "../../tests/unit/effects/reveal.rs"]
mod tests;
