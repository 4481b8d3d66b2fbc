use std::fmt;

/// A failed signature capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// Nothing has been drawn since the last erase.
    NoSignature,
    /// The surface was configured without copy support; frames cannot be
    /// read back.
    Unsupported,
    /// No frame resolved the capture within the wait window.
    Timeout,
    /// The frame rendered but copying or mapping its pixels failed.
    Readback(String),
    /// The rendering side went away before resolving the capture.
    Disconnected,
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::NoSignature => write!(f, "no signature to capture"),
            CaptureError::Unsupported => write!(f, "surface does not support pixel readback"),
            CaptureError::Timeout => write!(f, "capture timed out waiting for a frame"),
            CaptureError::Readback(msg) => write!(f, "frame readback failed: {msg}"),
            CaptureError::Disconnected => write!(f, "render side dropped the capture"),
        }
    }
}

impl std::error::Error for CaptureError {}
