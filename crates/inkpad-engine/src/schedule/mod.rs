//! Frame scheduling.
//!
//! This module is responsible for:
//! - the render-when-dirty contract: mutations raise a [`RedrawFlag`], the
//!   host drains it with one frame
//! - one-shot end-of-frame work, queued from any thread and drained by the
//!   render step through a [`DeferredQueue`]

mod hooks;
mod redraw;

pub use hooks::{DeferredQueue, DeferredSender};
pub use redraw::RedrawFlag;
