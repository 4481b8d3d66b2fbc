/// Phase of a press-drag-release gesture.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum GesturePhase {
    /// Pointer went down; a new stroke starts here.
    Began,
    /// Pointer moved while held down.
    Moved,
    /// Pointer went up; the stroke is complete.
    Ended,
}

/// A positioned pointer sample with its estimated velocity.
///
/// Position is in device pixels; velocity is in device pixels per second.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
}

impl PointerSample {
    #[inline]
    pub const fn new(x: f32, y: f32, vx: f32, vy: f32) -> Self {
        Self { x, y, vx, vy }
    }

    /// A sample at rest, for gesture edges where no motion history exists yet.
    #[inline]
    pub const fn still(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
        }
    }
}
