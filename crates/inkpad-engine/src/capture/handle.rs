use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, TryRecvError};
use std::time::Duration;

use crate::render::RenderPost;
use crate::schedule::{DeferredSender, RedrawFlag};

use super::{CaptureError, InkImage};

/// Requests frame captures from any thread.
///
/// Handles are cheap to clone; all clones observe the same pad. A request
/// fails fast when there is no ink, and otherwise forces a frame so the
/// ticket resolves even while the host loop is idle.
#[derive(Clone)]
pub struct CaptureHandle {
    pub(crate) has_signature: Arc<AtomicBool>,
    pub(crate) hooks: DeferredSender<RenderPost>,
    pub(crate) redraw: RedrawFlag,
}

impl CaptureHandle {
    /// Queues a readback against the next rendered frame.
    pub fn request(&self) -> Result<CaptureTicket, CaptureError> {
        if !self.has_signature.load(Ordering::Acquire) {
            return Err(CaptureError::NoSignature);
        }

        let (resolve, rx) = mpsc::channel();
        let queued = self.hooks.enqueue(move |post: &mut RenderPost| {
            post.request_frame_image(resolve);
        });
        if !queued {
            return Err(CaptureError::Disconnected);
        }

        self.redraw.request();
        Ok(CaptureTicket { rx })
    }

    /// Requests a capture and blocks until it resolves or `timeout` passes.
    ///
    /// Must not be called from the thread that drives frames: the wait
    /// would deadlock against the very frame it needs. Poll a
    /// [`CaptureTicket`] there instead.
    pub fn capture(&self, timeout: Duration) -> Result<InkImage, CaptureError> {
        self.request()?.wait(timeout)
    }
}

/// One pending capture.
pub struct CaptureTicket {
    pub(crate) rx: mpsc::Receiver<Result<InkImage, CaptureError>>,
}

impl CaptureTicket {
    /// Blocks until the capture resolves or `timeout` passes.
    pub fn wait(self, timeout: Duration) -> Result<InkImage, CaptureError> {
        match self.rx.recv_timeout(timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => Err(CaptureError::Timeout),
            Err(RecvTimeoutError::Disconnected) => Err(CaptureError::Disconnected),
        }
    }

    /// Returns the capture if it has resolved, without blocking.
    pub fn try_take(&self) -> Option<Result<InkImage, CaptureError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(CaptureError::Disconnected)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::DeferredQueue;

    fn handle_with(
        has_signature: bool,
        queue: &DeferredQueue<RenderPost>,
    ) -> (CaptureHandle, RedrawFlag) {
        let redraw = RedrawFlag::new();
        let handle = CaptureHandle {
            has_signature: Arc::new(AtomicBool::new(has_signature)),
            hooks: queue.sender(),
            redraw: redraw.clone(),
        };
        (handle, redraw)
    }

    #[test]
    fn request_without_ink_fails_fast() {
        let queue = DeferredQueue::new();
        let (handle, redraw) = handle_with(false, &queue);
        assert_eq!(handle.request().err(), Some(CaptureError::NoSignature));
        assert!(!redraw.is_pending());
    }

    #[test]
    fn request_forces_a_frame() {
        let queue = DeferredQueue::new();
        let (handle, redraw) = handle_with(true, &queue);
        let _ticket = handle.request().unwrap();
        assert!(redraw.is_pending());
    }

    #[test]
    fn request_after_the_render_side_drops_reports_disconnected() {
        let queue = DeferredQueue::new();
        let (handle, _redraw) = handle_with(true, &queue);
        drop(queue);
        assert_eq!(handle.request().err(), Some(CaptureError::Disconnected));
    }

    #[test]
    fn unresolved_wait_times_out() {
        let queue = DeferredQueue::new();
        let (handle, _redraw) = handle_with(true, &queue);
        let ticket = handle.request().unwrap();
        assert_eq!(
            ticket.wait(Duration::from_millis(20)).err(),
            Some(CaptureError::Timeout)
        );
    }

    #[test]
    fn ticket_resolves_across_threads() {
        let (resolve, rx) = mpsc::channel();
        let ticket = CaptureTicket { rx };

        std::thread::spawn(move || {
            let image = InkImage::new(2, 1, vec![0u8; 8]);
            resolve.send(Ok(image)).unwrap();
        });

        let image = ticket.wait(Duration::from_secs(1)).unwrap();
        assert_eq!((image.width, image.height), (2, 1));
        assert_eq!(image.pixels.len(), 8);
    }

    #[test]
    fn try_take_polls_without_blocking() {
        let (resolve, rx) = mpsc::channel();
        let ticket = CaptureTicket { rx };
        assert!(ticket.try_take().is_none());

        resolve.send(Err(CaptureError::Timeout)).unwrap();
        assert_eq!(ticket.try_take(), Some(Err(CaptureError::Timeout)));

        drop(resolve);
        assert_eq!(ticket.try_take(), Some(Err(CaptureError::Disconnected)));
    }
}
