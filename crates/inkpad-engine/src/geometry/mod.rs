//! Coordinate and geometry types shared by the tessellator and renderers.
//!
//! Canonical spaces:
//! - Device pixels (physical): origin top-left, +X right, +Y down. Pointer
//!   samples and surface sizes arrive in this space.
//! - Normalized device coordinates: [-1, 1] on both axes, +Y up. Vertex
//!   stores hold this space.
//!
//! The tessellator converts at append time, so shaders consume positions
//! as-is.

mod curve;
mod ndc;
mod point;
mod size;

pub use curve::{perpendicular, quadratic_bezier};
pub use ndc::view_to_ndc;
pub use point::Point;
pub use size::Size;
