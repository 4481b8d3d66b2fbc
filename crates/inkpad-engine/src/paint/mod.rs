//! Paint model shared between hosts and renderers.
//!
//! Scope:
//! - color representation (linear premultiplied alpha)
//! - ink styling for the pad
//!
//! Geometry types remain in `geometry`.

pub mod color;
mod style;

pub use color::Color;
pub use style::InkStyle;
