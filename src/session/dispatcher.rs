use std::collections::VecDeque;

use crate::{
    config::RevealConfig,
    effects::reveal::RevealAnimator,
    foundation::core::Raster,
    host::PresentationHost,
    render::pixelate::BlockRenderer,
    session::machine::{Effect, Event, SessionState},
};

/// Single owner of the session state, the output surface and the host.
///
/// Every host callback enters through [`Session::dispatch`]; nothing else
/// touches the surface, so no locking is needed.
pub struct Session<H: PresentationHost> {
    state: SessionState,
    host: H,
    renderer: BlockRenderer,
    animator: RevealAnimator,
    surface: Raster,
    pending: VecDeque<Event>,
}

impl<H: PresentationHost> Session<H> {
    pub fn new(cfg: &RevealConfig, host: H) -> Self {
        let state = SessionState::new(cfg, host.surface_size());
        let surface = Raster::new(state.surface().width, state.surface().height);
        Self {
            state,
            host,
            renderer: BlockRenderer::new(cfg.saturation),
            animator: RevealAnimator::from_config(cfg),
            surface,
            pending: VecDeque::new(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// Apply `event` and every follow-up event it produces, in order.
    pub fn dispatch(&mut self, event: Event) {
        self.pending.push_back(event);
        while let Some(event) = self.pending.pop_front() {
            let (next, effects) = self.state.clone().transition(event);
            self.state = next;
            for effect in effects {
                self.execute(effect);
            }
        }
    }

    fn execute(&mut self, effect: Effect) {
        let generation = self.state.generation();
        match effect {
            Effect::LoadImage => self.host.load_image(),
            Effect::PresentPixelated { block_size } => {
                match self.state.source() {
                    Some(src) => self.renderer.render_into(&mut self.surface, src, block_size),
                    None => self.surface.reset_to(self.state.surface()),
                }
                self.host.present(&self.surface);
            }
            Effect::PresentSource => {
                match self.state.source() {
                    Some(src) => self.surface.clone_from(src),
                    None => self.surface.reset_to(self.state.surface()),
                }
                self.host.present(&self.surface);
            }
            Effect::ShowClock(label) => self.host.show_clock(&label),
            Effect::SetCountdown { running } => self.host.set_countdown_running(running),
            Effect::BeginReveal => {
                self.animator.reset();
                self.host.request_next_frame(generation);
            }
            Effect::PresentRevealFrame { elapsed_ms } => {
                let empty = Raster::empty();
                let src = self.state.source().map(|s| s.as_ref()).unwrap_or(&empty);
                let frame = self.animator.tick(elapsed_ms, src);
                self.surface = frame.raster;
                self.host.present(&self.surface);
                if frame.completed {
                    self.pending.push_back(Event::RevealFinished { generation });
                } else {
                    self.host.request_next_frame(generation);
                }
            }
            Effect::NotifyComplete => self.host.reveal_complete(),
            Effect::ClearSurface => {
                self.surface.reset_to(self.state.surface());
                self.host.present(&self.surface);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/dispatcher.rs"]
mod tests;
