use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How much position history velocity estimation looks back over.
const VELOCITY_WINDOW: Duration = Duration::from_millis(100);

/// Spans shorter than this are too noisy to divide by.
const MIN_SPAN: Duration = Duration::from_millis(1);

/// Estimates pointer velocity from a sliding window of position history.
///
/// Desktop pointer events carry no velocity of their own, so the tracker
/// derives one: displacement between the oldest and newest sample in the
/// window, divided by the time between them. Samples older than the window
/// are pruned on every push.
#[derive(Debug, Default)]
pub struct VelocityTracker {
    samples: VecDeque<(Instant, f32, f32)>,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a pointer position and drops samples that fell out of the window.
    pub fn push(&mut self, now: Instant, x: f32, y: f32) {
        self.samples.push_back((now, x, y));

        while let Some(&(t, _, _)) = self.samples.front() {
            if now.saturating_duration_since(t) > VELOCITY_WINDOW {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }

    /// Current velocity estimate in device pixels per second.
    ///
    /// Returns zero until the window holds two samples far enough apart in time.
    pub fn velocity(&self) -> (f32, f32) {
        let (Some(&(t0, x0, y0)), Some(&(t1, x1, y1))) =
            (self.samples.front(), self.samples.back())
        else {
            return (0.0, 0.0);
        };

        let span = t1.saturating_duration_since(t0);
        if span < MIN_SPAN {
            return (0.0, 0.0);
        }

        let dt = span.as_secs_f32();
        ((x1 - x0) / dt, (y1 - y0) / dt)
    }

    /// Forgets all history. Used at the start of a new gesture.
    pub fn clear(&mut self) {
        self.samples.clear();
    }
}
