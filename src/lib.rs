//! pixreveal turns a study countdown into a slowly sharpening photo.
//!
//! While the timer runs, a landscape image is shown as flat-colored blocks
//! that shrink as time elapses. When the countdown reaches zero, a wipe
//! sweeps left to right and uncovers the full-resolution photo.
//!
//! # Pipeline overview
//!
//! 1. **Stage**: countdown progress `0..1` -> discrete stage -> block size
//!    ([`StageCurve`]).
//! 2. **Pixelate**: source raster + block size -> flat-block raster
//!    ([`BlockRenderer`]).
//! 3. **Reveal**: elapsed milliseconds -> composited wipe frame
//!    ([`RevealAnimator`]).
//!
//! [`Session`] ties these together behind a pure state machine
//! ([`SessionState::transition`]) and talks to the display through a
//! [`PresentationHost`].
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: stage mapping, pixelation and reveal frames depend
//!   only on their inputs.
//! - **Never fatal to the host**: missing or malformed image data renders
//!   as transparent output instead of erroring.
#![forbid(unsafe_code)]

mod animation;
mod assets;
mod config;
mod effects;
mod foundation;
mod host;
mod render;
mod session;
mod stage;

pub use animation::ease::Ease;
pub use assets::decode::{decode_image, fit_to_surface, open_image};
pub use assets::library::LandscapeLibrary;
pub use config::{
    DEFAULT_BLAST_DURATION_MS, DEFAULT_CURVE_EXPONENT, DEFAULT_DRIFT_THRESHOLD_MS,
    DEFAULT_MAX_BLOCK, DEFAULT_MIN_BLOCK, DEFAULT_STAGES, DEFAULT_TRANSITION_ZONE_PX, RevealConfig,
};
pub use effects::composite::{Rgba8, copy_clipped_left, over_white, white_ramp_in_place};
pub use effects::reveal::{
    RevealAnimator, RevealFrame, RevealParams, RevealState, reveal_state, run_reveal,
};
pub use foundation::core::{Canvas, Raster, Rgb8};
pub use foundation::error::{PixrevealError, PixrevealResult};
pub use host::PresentationHost;
pub use render::pixelate::{
    BlockRect, BlockRenderer, average_color, block_grid, desaturate, render_pixelated,
};
pub use session::countdown::{CountdownDriver, TickOutcome, TimerSession};
pub use session::dispatcher::Session;
pub use session::format::{countdown_label, study_time_label};
pub use session::machine::{Effect, Event, Phase, SessionState};
pub use stage::mapper::{StageCurve, compute_block_size, elapsed_fraction};
