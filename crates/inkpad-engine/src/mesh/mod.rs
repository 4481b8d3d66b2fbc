//! Vertex storage for pad geometry.
//!
//! This module is responsible for:
//! - the GPU vertex layout shared by strokes and dabs
//! - append-only stores with a soft budget and NaN filtering

mod store;
mod vertex;

pub use store::{DEFAULT_VERTEX_BUDGET, VertexStore};
pub use vertex::InkVertex;
