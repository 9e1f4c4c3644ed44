use winit::event::WindowEvent;
use winit::window::WindowId;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

impl AppControl {
    #[inline]
    pub fn is_exit(self) -> bool {
        self == AppControl::Exit
    }
}

/// Application contract implemented by binaries.
///
/// The runtime owns the window and GPU; the app only sees them through
/// [`FrameCtx`] while a frame is being produced.
pub trait App {
    /// Called for raw window events, before the runtime handles them.
    fn on_window_event(&mut self, window_id: WindowId, event: &WindowEvent) -> AppControl {
        let _ = (window_id, event);
        AppControl::Continue
    }

    /// Called once per rendered frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
