//! The signature pad.
//!
//! [`SignaturePad`] owns everything a host needs to collect and show ink:
//! the stroke tessellator, the lines/dots vertex stores, the redraw flag,
//! and the per-frame hook queue that capture rides on. Hosts feed it
//! gesture transitions and surface sizes; renderers read its stores.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::capture::{CaptureError, CaptureHandle, InkImage};
use crate::geometry::{Point, Size};
use crate::input::{GesturePhase, PointerSample};
use crate::mesh::{DEFAULT_VERTEX_BUDGET, VertexStore};
use crate::render::RenderPost;
use crate::schedule::{DeferredQueue, RedrawFlag};
use crate::stroke::{StrokeTessellator, emit_dab};

pub struct SignaturePad {
    tessellator: StrokeTessellator,
    lines: VertexStore,
    dots: VertexStore,
    surface_size: Size,
    has_signature: Arc<AtomicBool>,
    redraw: RedrawFlag,
    hooks: DeferredQueue<RenderPost>,
}

impl SignaturePad {
    pub fn new() -> Self {
        Self::with_vertex_budget(DEFAULT_VERTEX_BUDGET)
    }

    /// Creates a pad whose stores preallocate `budget` vertices each.
    pub fn with_vertex_budget(budget: usize) -> Self {
        Self {
            tessellator: StrokeTessellator::new(),
            lines: VertexStore::with_budget(budget),
            dots: VertexStore::with_budget(budget),
            surface_size: Size::default(),
            has_signature: Arc::new(AtomicBool::new(false)),
            redraw: RedrawFlag::new(),
            hooks: DeferredQueue::new(),
        }
    }

    // ── surface boundary ──────────────────────────────────────────────────

    /// Updates the drawable size (physical pixels); hosts call this on
    /// ready and on every resize.
    pub fn set_surface_size(&mut self, size: Size) {
        self.surface_size = size;
        self.redraw.request();
    }

    pub fn surface_size(&self) -> Size {
        self.surface_size
    }

    /// The flag hosts watch to schedule frames.
    pub fn redraw_flag(&self) -> RedrawFlag {
        self.redraw.clone()
    }

    // ── input boundary ────────────────────────────────────────────────────

    /// Feeds one gesture transition through the tessellator.
    ///
    /// Events arriving before a valid surface size are dropped; there is no
    /// coordinate basis to map them against yet.
    pub fn handle_pointer_event(&mut self, phase: GesturePhase, sample: PointerSample) {
        if !self.surface_size.is_valid() {
            log::debug!("pointer event before the surface size is known; ignored");
            return;
        }

        match phase {
            GesturePhase::Began => {
                self.tessellator
                    .begin(sample, self.surface_size, &mut self.lines);
                self.has_signature.store(true, Ordering::Release);
            }
            GesturePhase::Moved => {
                self.tessellator
                    .extend(sample, self.surface_size, &mut self.lines);
            }
            GesturePhase::Ended => {
                self.tessellator
                    .finish(sample, self.surface_size, &mut self.lines);
            }
        }
        self.redraw.request();
    }

    /// Stamps an elliptical dab at `(x, y)` in device pixels.
    ///
    /// Tap detection is host policy (see `input::TAP_SLOP`); the pad just
    /// records the mark.
    pub fn tap(&mut self, x: f32, y: f32) {
        if !self.surface_size.is_valid() {
            log::debug!("tap before the surface size is known; ignored");
            return;
        }

        emit_dab(
            &mut self.dots,
            Point::new(x, y),
            self.surface_size,
            self.tessellator.pen_width(),
        );
        self.has_signature.store(true, Ordering::Release);
        self.redraw.request();
    }

    /// Clears all committed ink and any stroke in progress.
    ///
    /// Store capacity and the smoothed pen width are kept.
    pub fn erase(&mut self) {
        self.lines.clear();
        self.dots.clear();
        self.tessellator.cancel();
        self.has_signature.store(false, Ordering::Release);
        self.redraw.request();
    }

    /// Whether any ink has been committed since the last erase.
    pub fn has_signature(&self) -> bool {
        self.has_signature.load(Ordering::Acquire)
    }

    // ── capture ───────────────────────────────────────────────────────────

    /// A clonable handle for requesting captures from any thread.
    pub fn capture_handle(&self) -> CaptureHandle {
        CaptureHandle {
            has_signature: Arc::clone(&self.has_signature),
            hooks: self.hooks.sender(),
            redraw: self.redraw.clone(),
        }
    }

    /// Captures the next rendered frame, blocking up to `timeout`.
    ///
    /// Must not be called from the thread that drives frames; see
    /// [`CaptureHandle::capture`].
    pub fn capture_image(&self, timeout: Duration) -> Result<InkImage, CaptureError> {
        self.capture_handle().capture(timeout)
    }

    // ── render boundary ───────────────────────────────────────────────────

    pub fn lines(&self) -> &VertexStore {
        &self.lines
    }

    pub fn dots(&self) -> &VertexStore {
        &self.dots
    }

    /// Runs queued end-of-frame hooks; the render step calls this once per
    /// frame after draw encoding.
    pub fn drain_frame_hooks(&self, post: &mut RenderPost) -> usize {
        self.hooks.drain(post)
    }
}

impl Default for SignaturePad {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sized_pad() -> SignaturePad {
        let mut pad = SignaturePad::new();
        pad.set_surface_size(Size::new(100.0, 100.0));
        pad
    }

    fn draw_stroke(pad: &mut SignaturePad) {
        pad.handle_pointer_event(GesturePhase::Began, PointerSample::still(10.0, 10.0));
        pad.handle_pointer_event(GesturePhase::Moved, PointerSample::still(10.0, 60.0));
        pad.handle_pointer_event(GesturePhase::Ended, PointerSample::still(10.0, 60.0));
    }

    #[test]
    fn a_stroke_marks_the_pad_signed_and_dirty() {
        let mut pad = sized_pad();
        pad.redraw_flag().take();
        assert!(!pad.has_signature());

        draw_stroke(&mut pad);
        assert!(pad.has_signature());
        assert!(pad.redraw_flag().is_pending());
        // Begin pair + 32 ribbon pairs + end pair.
        assert_eq!(pad.lines().len(), 2 + 32 * 2 + 2);
        assert!(pad.dots().is_empty());
    }

    #[test]
    fn events_before_the_surface_size_are_dropped() {
        let mut pad = SignaturePad::new();
        draw_stroke(&mut pad);
        pad.tap(50.0, 50.0);
        assert!(pad.lines().is_empty());
        assert!(pad.dots().is_empty());
        assert!(!pad.has_signature());
    }

    #[test]
    fn tap_stamps_a_dab() {
        let mut pad = sized_pad();
        pad.tap(50.0, 50.0);
        assert!(pad.has_signature());
        assert_eq!(pad.dots().len(), 2 + 21 * 2 + 1);
        assert!(pad.lines().is_empty());
    }

    #[test]
    fn erase_resets_ink_but_keeps_capacity() {
        let mut pad = sized_pad();
        draw_stroke(&mut pad);
        pad.tap(50.0, 50.0);

        pad.erase();
        assert!(!pad.has_signature());
        assert!(pad.lines().is_empty());
        assert!(pad.dots().is_empty());
        assert!(pad.redraw_flag().is_pending());
        assert_eq!(
            pad.capture_handle().request().err(),
            Some(CaptureError::NoSignature)
        );
    }

    #[test]
    fn erase_mid_stroke_cancels_it() {
        let mut pad = sized_pad();
        pad.handle_pointer_event(GesturePhase::Began, PointerSample::still(10.0, 10.0));
        pad.erase();

        // The dangling move/end belong to the cancelled stroke.
        pad.handle_pointer_event(GesturePhase::Moved, PointerSample::still(10.0, 60.0));
        pad.handle_pointer_event(GesturePhase::Ended, PointerSample::still(10.0, 60.0));
        assert!(pad.lines().is_empty());
        assert!(!pad.has_signature());
    }

    #[test]
    fn capture_request_forces_a_redraw() {
        let mut pad = sized_pad();
        draw_stroke(&mut pad);
        pad.redraw_flag().take();

        let handle = pad.capture_handle();
        let _ticket = handle.request().unwrap();
        assert!(pad.redraw_flag().is_pending());
    }

    #[test]
    fn capture_without_frames_times_out() {
        let mut pad = sized_pad();
        draw_stroke(&mut pad);
        assert_eq!(
            pad.capture_image(Duration::from_millis(20)).err(),
            Some(CaptureError::Timeout)
        );
    }

    #[test]
    fn resize_requests_a_redraw() {
        let mut pad = SignaturePad::new();
        assert!(!pad.redraw_flag().is_pending());
        pad.set_surface_size(Size::new(640.0, 480.0));
        assert!(pad.redraw_flag().is_pending());
    }
}
