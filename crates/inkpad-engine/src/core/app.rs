use winit::event::WindowEvent;

use crate::geometry::Size;
use crate::input::{GesturePhase, PointerSample};

use super::ctx::{FrameCtx, ReadyCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by the host.
pub trait App {
    /// Called once when the window and GPU are live.
    fn on_ready(&mut self, ctx: &mut ReadyCtx<'_>) {
        let _ = ctx;
    }

    /// Called when the drawable size changes. Size is in device pixels.
    fn on_resized(&mut self, size: Size) {
        let _ = size;
    }

    /// Called for recognized pointer gestures.
    fn on_gesture(&mut self, phase: GesturePhase, sample: PointerSample) {
        let _ = (phase, sample);
    }

    /// Called for window events the gesture recognizer did not claim.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per rendered frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
