use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

type Waker = Arc<dyn Fn() + Send + Sync>;

/// Shared render-when-dirty flag.
///
/// Any clone may request a redraw; the host drains the flag once per frame
/// and owns the cadence, so a burst of requests collapses into one frame.
/// An installed waker lets requests made off the event thread rouse a
/// sleeping loop.
#[derive(Clone, Default)]
pub struct RedrawFlag {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    pending: AtomicBool,
    waker: Mutex<Option<Waker>>,
}

impl RedrawFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a redraw pending and fires the waker, if one is installed.
    pub fn request(&self) {
        self.inner.pending.store(true, Ordering::Release);

        // Clone out of the lock; the waker may take its time.
        let waker = match self.inner.waker.lock() {
            Ok(guard) => guard.clone(),
            Err(_) => None,
        };
        if let Some(wake) = waker {
            wake();
        }
    }

    /// Clears the flag, returning whether a redraw was pending.
    pub fn take(&self) -> bool {
        self.inner.pending.swap(false, Ordering::AcqRel)
    }

    pub fn is_pending(&self) -> bool {
        self.inner.pending.load(Ordering::Acquire)
    }

    /// Installs the hook invoked on every subsequent request.
    pub fn set_waker(&self, wake: impl Fn() + Send + Sync + 'static) {
        if let Ok(mut waker) = self.inner.waker.lock() {
            *waker = Some(Arc::new(wake));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn request_sets_and_take_clears() {
        let flag = RedrawFlag::new();
        assert!(!flag.is_pending());

        flag.request();
        assert!(flag.is_pending());

        assert!(flag.take());
        assert!(!flag.is_pending());
        assert!(!flag.take());
    }

    #[test]
    fn requests_collapse_until_taken() {
        let flag = RedrawFlag::new();
        flag.request();
        flag.request();
        flag.request();
        assert!(flag.take());
        assert!(!flag.take());
    }

    #[test]
    fn waker_fires_per_request() {
        let flag = RedrawFlag::new();
        let count = Arc::new(AtomicUsize::new(0));
        let observed = Arc::clone(&count);
        flag.set_waker(move || {
            observed.fetch_add(1, Ordering::SeqCst);
        });

        flag.request();
        flag.request();
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn clones_share_state_across_threads() {
        let flag = RedrawFlag::new();
        let remote = flag.clone();
        std::thread::spawn(move || remote.request())
            .join()
            .unwrap();
        assert!(flag.is_pending());
    }
}
