use crate::foundation::core::{Canvas, Raster};

/// The side of the app that owns the real display: it reports the surface
/// size, shows finished frames and schedules callbacks.
///
/// Methods are called from inside [`crate::Session::dispatch`], so a host
/// must not dispatch synchronously from them. It should record the request
/// and deliver the follow-up event (`ImageLoaded`, `Frame`, ...) on its next
/// turn.
pub trait PresentationHost {
    fn surface_size(&self) -> Canvas;

    /// Show a fully composited frame.
    fn present(&mut self, frame: &Raster);

    /// Ask for an [`crate::Event::Frame`] carrying `generation` at the next
    /// display refresh.
    fn request_next_frame(&mut self, _generation: u64) {}

    /// Fetch a source image and reply with `ImageLoaded` or `ImageFailed`.
    fn load_image(&mut self) {}

    fn show_clock(&mut self, _label: &str) {}

    /// Start or stop the ~1 s trigger that sends `ClockTick` events.
    fn set_countdown_running(&mut self, _running: bool) {}

    fn reveal_complete(&mut self) {}
}
