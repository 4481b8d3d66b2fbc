use std::time::Instant;

use super::types::{GesturePhase, PointerSample};
use super::velocity::VelocityTracker;

/// Maximum travel, in device pixels, for a press-release pair to count as a tap.
///
/// The recognizer itself emits every gesture as Began/Moved/Ended; deciding
/// whether a short gesture was "really" a tap is host policy, and hosts use
/// this shared threshold so taps feel the same everywhere.
pub const TAP_SLOP: f32 = 8.0;

/// Turns raw pointer-and-button events into press-drag-release gestures.
///
/// Holds "is down" information and the current pointer position, and runs a
/// [`VelocityTracker`] over positions seen while pressed so every emitted
/// sample carries a velocity estimate.
#[derive(Debug, Default)]
pub struct GestureRecognizer {
    tracker: VelocityTracker,

    /// Last known pointer position in device pixels.
    pointer: Option<(f32, f32)>,

    /// Whether the gesture button is currently held.
    pressed: bool,
}

impl GestureRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a pointer move. Emits a `Moved` sample while a gesture is active.
    pub fn pointer_moved(
        &mut self,
        x: f32,
        y: f32,
        now: Instant,
    ) -> Option<(GesturePhase, PointerSample)> {
        self.pointer = Some((x, y));

        if !self.pressed {
            return None;
        }

        self.tracker.push(now, x, y);
        let (vx, vy) = self.tracker.velocity();
        Some((GesturePhase::Moved, PointerSample::new(x, y, vx, vy)))
    }

    /// Records a button press. Emits `Began` at the last known pointer position.
    ///
    /// Returns `None` when no pointer position has been seen yet, which happens
    /// when a press arrives before any motion over the window.
    pub fn button_pressed(&mut self, now: Instant) -> Option<(GesturePhase, PointerSample)> {
        let (x, y) = self.pointer?;

        self.pressed = true;
        self.tracker.clear();
        self.tracker.push(now, x, y);

        Some((GesturePhase::Began, PointerSample::still(x, y)))
    }

    /// Records a button release. Emits `Ended` when a gesture was active.
    pub fn button_released(&mut self, now: Instant) -> Option<(GesturePhase, PointerSample)> {
        if !self.pressed {
            return None;
        }
        self.pressed = false;

        let (x, y) = self.pointer?;
        self.tracker.push(now, x, y);
        let (vx, vy) = self.tracker.velocity();

        Some((GesturePhase::Ended, PointerSample::new(x, y, vx, vy)))
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn press_requires_a_known_pointer_position() {
        let mut rec = GestureRecognizer::new();
        assert!(rec.button_pressed(Instant::now()).is_none());
        assert!(!rec.is_pressed());
    }

    #[test]
    fn moves_without_a_press_are_silent() {
        let mut rec = GestureRecognizer::new();
        assert!(rec.pointer_moved(10.0, 10.0, Instant::now()).is_none());
    }

    #[test]
    fn full_gesture_emits_began_moved_ended() {
        let mut rec = GestureRecognizer::new();
        let t0 = Instant::now();

        rec.pointer_moved(5.0, 5.0, t0);
        let (phase, sample) = rec.button_pressed(t0).unwrap();
        assert_eq!(phase, GesturePhase::Began);
        assert_eq!((sample.x, sample.y), (5.0, 5.0));
        assert_eq!((sample.vx, sample.vy), (0.0, 0.0));

        let (phase, sample) = rec
            .pointer_moved(25.0, 5.0, t0 + Duration::from_millis(20))
            .unwrap();
        assert_eq!(phase, GesturePhase::Moved);
        assert!(sample.vx > 0.0);

        let (phase, _) = rec.button_released(t0 + Duration::from_millis(40)).unwrap();
        assert_eq!(phase, GesturePhase::Ended);
        assert!(!rec.is_pressed());
    }

    #[test]
    fn release_without_a_press_is_silent() {
        let mut rec = GestureRecognizer::new();
        rec.pointer_moved(5.0, 5.0, Instant::now());
        assert!(rec.button_released(Instant::now()).is_none());
    }

    #[test]
    fn a_new_press_forgets_old_velocity() {
        let mut rec = GestureRecognizer::new();
        let t0 = Instant::now();

        // First gesture with real motion.
        rec.pointer_moved(0.0, 0.0, t0);
        rec.button_pressed(t0);
        rec.pointer_moved(100.0, 0.0, t0 + Duration::from_millis(10));
        rec.button_released(t0 + Duration::from_millis(20));

        // Second press at rest starts from zero velocity.
        let (_, sample) = rec.button_pressed(t0 + Duration::from_millis(30)).unwrap();
        assert_eq!((sample.vx, sample.vy), (0.0, 0.0));
    }
}
