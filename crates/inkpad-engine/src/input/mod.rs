//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! Runtime code is responsible for translating platform events into gestures.
//! All coordinates are device (physical) pixels.

mod gesture;
mod types;
mod velocity;

pub use gesture::{GestureRecognizer, TAP_SLOP};
pub use types::{GesturePhase, PointerSample};
pub use velocity::VelocityTracker;
