//! Signature capture.
//!
//! A capture is a rendezvous with the render step: requesting one queues a
//! readback job for the next frame and forces that frame to be scheduled.
//! The returned ticket resolves once the frame's pixels are tightened into
//! an [`InkImage`], or with an error when the frame cannot deliver them.
//!
//! The blocking wait belongs on a thread that is not driving frames; on the
//! render thread, poll the ticket once per frame instead.

mod error;
mod handle;
mod image;

pub use error::CaptureError;
pub use handle::{CaptureHandle, CaptureTicket};
pub use image::InkImage;
