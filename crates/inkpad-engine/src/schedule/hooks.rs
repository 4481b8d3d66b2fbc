use std::sync::mpsc;

type Job<T> = Box<dyn FnOnce(&mut T) + Send>;

/// FIFO queue of one-shot end-of-frame jobs.
///
/// Producers hold a [`DeferredSender`] and may enqueue from any thread; the
/// render step owns the queue and drains it completely once per frame.
/// Single consumer is enforced by ownership of the receiving half.
pub struct DeferredQueue<T> {
    tx: mpsc::Sender<Job<T>>,
    rx: mpsc::Receiver<Job<T>>,
}

impl<T> DeferredQueue<T> {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    pub fn sender(&self) -> DeferredSender<T> {
        DeferredSender {
            tx: self.tx.clone(),
        }
    }

    /// Runs every queued job in arrival order, returning how many ran.
    pub fn drain(&self, target: &mut T) -> usize {
        let mut ran = 0;
        while let Ok(job) = self.rx.try_recv() {
            job(target);
            ran += 1;
        }
        ran
    }
}

impl<T> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Producer half of a [`DeferredQueue`].
pub struct DeferredSender<T> {
    tx: mpsc::Sender<Job<T>>,
}

impl<T> DeferredSender<T> {
    /// Queues a job for the next drain.
    ///
    /// Returns false when the queue side is gone; the job is dropped unrun.
    pub fn enqueue(&self, job: impl FnOnce(&mut T) + Send + 'static) -> bool {
        self.tx.send(Box::new(job)).is_ok()
    }
}

impl<T> Clone for DeferredSender<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jobs_run_in_arrival_order() {
        let queue = DeferredQueue::<Vec<i32>>::new();
        let sender = queue.sender();
        sender.enqueue(|v| v.push(1));
        sender.enqueue(|v| v.push(2));
        sender.enqueue(|v| v.push(3));

        let mut seen = Vec::new();
        assert_eq!(queue.drain(&mut seen), 3);
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[test]
    fn drain_leaves_the_queue_empty() {
        let queue = DeferredQueue::<Vec<i32>>::new();
        queue.sender().enqueue(|v| v.push(7));

        let mut seen = Vec::new();
        assert_eq!(queue.drain(&mut seen), 1);
        assert_eq!(queue.drain(&mut seen), 0);
        assert_eq!(seen, vec![7]);
    }

    #[test]
    fn senders_work_across_threads() {
        let queue = DeferredQueue::<Vec<i32>>::new();
        let sender = queue.sender();
        std::thread::spawn(move || {
            assert!(sender.enqueue(|v| v.push(42)));
        })
        .join()
        .unwrap();

        let mut seen = Vec::new();
        assert_eq!(queue.drain(&mut seen), 1);
        assert_eq!(seen, vec![42]);
    }

    #[test]
    fn enqueue_fails_after_the_queue_drops() {
        let queue = DeferredQueue::<Vec<i32>>::new();
        let sender = queue.sender();
        drop(queue);
        assert!(!sender.enqueue(|v| v.push(1)));
    }
}
