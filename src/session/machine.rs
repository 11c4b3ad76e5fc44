use std::sync::Arc;

use image::RgbaImage;

use crate::{
    assets::decode::fit_to_surface,
    config::RevealConfig,
    foundation::core::{Canvas, Raster},
    session::{
        countdown::{CountdownDriver, TimerSession},
        format::countdown_label,
    },
    stage::mapper::StageCurve,
};

/// Where the study session is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Ready,
    Counting { paused: bool },
    /// `started_at_ms` is taken from the first reveal frame.
    Revealing { started_at_ms: Option<u64> },
    Done,
}

/// Inputs from the presentation host.
#[derive(Clone, Debug)]
pub enum Event {
    LoadRequested,
    ImageLoaded(Arc<RgbaImage>),
    ImageFailed(String),
    Resized(Canvas),
    Start { total_seconds: u32, now_ms: u64 },
    Pause,
    Resume { now_ms: u64 },
    ClockTick { now_ms: u64 },
    Frame { generation: u64, now_ms: u64 },
    RevealFinished { generation: u64 },
    Restart,
}

/// Work a transition asks the dispatcher to carry out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    LoadImage,
    PresentPixelated { block_size: u32 },
    PresentSource,
    ShowClock(String),
    SetCountdown { running: bool },
    BeginReveal,
    PresentRevealFrame { elapsed_ms: u64 },
    NotifyComplete,
    ClearSurface,
}

/// Session state as a plain value. [`SessionState::transition`] is pure:
/// the same state and event always give the same next state and effects.
#[derive(Clone, Debug)]
pub struct SessionState {
    phase: Phase,
    generation: u64,
    surface: Canvas,
    max_surface: Canvas,
    original: Option<Arc<RgbaImage>>,
    source: Option<Arc<Raster>>,
    countdown: Option<CountdownDriver>,
    last_stage: Option<u32>,
    curve: StageCurve,
    drift_threshold_ms: u64,
}

impl SessionState {
    pub fn new(cfg: &RevealConfig, surface: Canvas) -> Self {
        Self {
            phase: Phase::Idle,
            generation: 0,
            surface: surface.clamp_to(cfg.max_surface),
            max_surface: cfg.max_surface,
            original: None,
            source: None,
            countdown: None,
            last_stage: None,
            curve: StageCurve::from_config(cfg),
            drift_threshold_ms: cfg.drift_threshold_ms,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Bumped on every restart; stale frame events are dropped.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn surface(&self) -> Canvas {
        self.surface
    }

    /// Source image fitted to the current surface.
    pub fn source(&self) -> Option<&Arc<Raster>> {
        self.source.as_ref()
    }

    pub fn countdown(&self) -> Option<&CountdownDriver> {
        self.countdown.as_ref()
    }

    pub fn curve(&self) -> &StageCurve {
        &self.curve
    }

    pub fn elapsed_fraction(&self) -> f64 {
        self.countdown
            .as_ref()
            .map(|c| c.session().elapsed_fraction())
            .unwrap_or(0.0)
    }

    pub fn current_block_size(&self) -> u32 {
        self.curve.block_size_for(self.elapsed_fraction())
    }

    pub fn transition(mut self, event: Event) -> (Self, Vec<Effect>) {
        let mut effects = Vec::new();
        match (self.phase, event) {
            (_, Event::Restart) => {
                tracing::info!(generation = self.generation + 1, "session restart");
                self.generation += 1;
                self.phase = Phase::Idle;
                self.original = None;
                self.source = None;
                self.countdown = None;
                self.last_stage = None;
                effects.push(Effect::SetCountdown { running: false });
                effects.push(Effect::ClearSurface);
            }
            (phase, Event::Resized(canvas)) => {
                self.surface = canvas.clamp_to(self.max_surface);
                if let Some(original) = &self.original {
                    self.source = Some(Arc::new(fit_to_surface(original, self.surface)));
                }
                match phase {
                    Phase::Ready | Phase::Counting { .. } => effects.push(Effect::PresentPixelated {
                        block_size: self.current_block_size(),
                    }),
                    Phase::Done => effects.push(Effect::PresentSource),
                    Phase::Idle | Phase::Loading | Phase::Revealing { .. } => {}
                }
            }
            (Phase::Idle, Event::LoadRequested) => {
                self.phase = Phase::Loading;
                effects.push(Effect::LoadImage);
            }
            (Phase::Loading, Event::ImageLoaded(img)) => {
                tracing::info!(
                    width = img.width(),
                    height = img.height(),
                    "source image loaded"
                );
                self.source = Some(Arc::new(fit_to_surface(&img, self.surface)));
                self.original = Some(img);
                self.phase = Phase::Ready;
                effects.push(Effect::PresentPixelated {
                    block_size: self.curve.block_size_of(0),
                });
            }
            (Phase::Loading, Event::ImageFailed(reason)) => {
                tracing::warn!(%reason, "source image failed to load");
                self.phase = Phase::Idle;
            }
            (
                Phase::Ready | Phase::Done,
                Event::Start {
                    total_seconds,
                    now_ms,
                },
            ) => match TimerSession::new(total_seconds) {
                Ok(session) => {
                    tracing::info!(total_seconds, "study session started");
                    let mut driver = CountdownDriver::with_threshold(session, self.drift_threshold_ms);
                    driver.start(now_ms);
                    self.countdown = Some(driver);
                    self.last_stage = Some(0);
                    self.phase = Phase::Counting { paused: false };
                    effects.push(Effect::ShowClock(countdown_label(total_seconds)));
                    effects.push(Effect::PresentPixelated {
                        block_size: self.curve.block_size_of(0),
                    });
                    effects.push(Effect::SetCountdown { running: true });
                }
                Err(err) => tracing::warn!(%err, "start rejected"),
            },
            (Phase::Counting { paused: false }, Event::Pause) => {
                if let Some(driver) = self.countdown.as_mut() {
                    driver.pause();
                }
                self.phase = Phase::Counting { paused: true };
                effects.push(Effect::SetCountdown { running: false });
            }
            (Phase::Counting { paused: true }, Event::Resume { now_ms }) => {
                if let Some(driver) = self.countdown.as_mut() {
                    driver.resume(now_ms);
                }
                self.phase = Phase::Counting { paused: false };
                effects.push(Effect::SetCountdown { running: true });
            }
            (Phase::Counting { paused: false }, Event::ClockTick { now_ms }) => {
                self.on_clock_tick(now_ms, &mut effects);
            }
            (Phase::Revealing { started_at_ms }, Event::Frame { generation, now_ms })
                if generation == self.generation =>
            {
                let start = started_at_ms.unwrap_or(now_ms);
                self.phase = Phase::Revealing {
                    started_at_ms: Some(start),
                };
                effects.push(Effect::PresentRevealFrame {
                    elapsed_ms: now_ms.saturating_sub(start),
                });
            }
            (Phase::Revealing { .. }, Event::RevealFinished { generation })
                if generation == self.generation =>
            {
                tracing::info!("study session complete");
                self.phase = Phase::Done;
                effects.push(Effect::NotifyComplete);
            }
            (phase, _) => {
                tracing::trace!(?phase, "event ignored");
            }
        }
        (self, effects)
    }

    fn on_clock_tick(&mut self, now_ms: u64, effects: &mut Vec<Effect>) {
        let Some(driver) = self.countdown.as_mut() else {
            return;
        };
        let outcome = driver.tick(now_ms);
        if !outcome.decremented {
            return;
        }
        let session = *driver.session();
        effects.push(Effect::ShowClock(countdown_label(
            session.remaining_seconds(),
        )));

        let stage = self.curve.stage_of(session.elapsed_fraction());
        if self.last_stage != Some(stage) {
            let block_size = self.curve.block_size_of(stage);
            tracing::debug!(stage, block_size, "stage changed");
            self.last_stage = Some(stage);
            effects.push(Effect::PresentPixelated { block_size });
        }

        if outcome.finished {
            tracing::info!("countdown finished, starting reveal");
            self.phase = Phase::Revealing {
                started_at_ms: None,
            };
            effects.push(Effect::SetCountdown { running: false });
            effects.push(Effect::BeginReveal);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/machine.rs"]
mod tests;
