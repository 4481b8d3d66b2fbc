//! GPU rendering subsystem.
//!
//! The ink renderer consumes the pad's vertex stores and issues wgpu draw
//! calls; readback turns a rendered frame into a tight RGBA image for
//! capture. Each renderer is responsible for its own GPU resources
//! (pipelines, buffers).
//!
//! Convention:
//! - CPU geometry is already NDC (the tessellator converts device pixels at
//!   append time).
//! - Shaders pass positions through unchanged.

mod ctx;
mod ink;
pub(crate) mod readback;

pub use ctx::{RenderCtx, RenderTarget};
pub use ink::InkRenderer;
pub use readback::RenderPost;
