//! Stroke tessellation.
//!
//! This module is responsible for:
//! - mapping pointer velocity to a smoothed pen width
//! - turning begin/move/end samples into triangle-strip ribbon vertices
//! - stamping elliptical dabs for taps

mod tap;
mod tessellator;
mod width;

pub use tessellator::StrokeTessellator;
pub use width::{STROKE_WIDTH_MAX, STROKE_WIDTH_MIN, WidthFilter};

pub(crate) use tap::emit_dab;
