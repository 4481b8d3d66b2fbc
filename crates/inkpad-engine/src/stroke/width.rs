/// Narrowest pen width, NDC units.
pub const STROKE_WIDTH_MIN: f32 = 0.006;
/// Widest pen width, NDC units.
pub const STROKE_WIDTH_MAX: f32 = 0.040;

/// Velocity clamp window in device px/s; magnitudes outside map to the
/// nearest endpoint.
pub const VELOCITY_CLAMP_MIN: f32 = 20.0;
pub const VELOCITY_CLAMP_MAX: f32 = 5_000.0;

/// Weight the previous width keeps on each update.
const WIDTH_SMOOTHING: f32 = 0.5;

/// Pen width before the first velocity sample arrives.
const INITIAL_WIDTH: f32 = 0.003;

/// First-order low-pass filter from pointer velocity to pen width.
///
/// Each sample moves the width halfway toward its velocity-derived target,
/// so jittery velocity estimates land as gradual width changes.
#[derive(Debug)]
pub struct WidthFilter {
    width: f32,
}

impl WidthFilter {
    pub fn new() -> Self {
        Self {
            width: INITIAL_WIDTH,
        }
    }

    /// Feeds one velocity sample (px/s) and returns the new smoothed width.
    ///
    /// A non-finite velocity counts as stationary; otherwise a single NaN
    /// sample would poison the filter for the rest of the session.
    pub fn feed(&mut self, vx: f32, vy: f32) -> f32 {
        let speed = (vx * vx + vy * vy).sqrt();
        let speed = if speed.is_finite() { speed } else { 0.0 };
        self.width = self.width * WIDTH_SMOOTHING + target_width(speed) * (1.0 - WIDTH_SMOOTHING);
        self.width
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Overwrites the smoothed width.
    ///
    /// Segment interpolation steps the filter through the widths it actually
    /// draws, so the next event resumes from drawn state.
    #[inline]
    pub(crate) fn set_width(&mut self, width: f32) {
        self.width = width;
    }
}

impl Default for WidthFilter {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps a velocity magnitude (px/s) onto the target pen width (NDC units).
fn target_width(speed: f32) -> f32 {
    let clamped = speed.clamp(VELOCITY_CLAMP_MIN, VELOCITY_CLAMP_MAX);
    let normalized = (clamped - VELOCITY_CLAMP_MIN) / (VELOCITY_CLAMP_MAX - VELOCITY_CLAMP_MIN);
    STROKE_WIDTH_MIN + normalized * (STROKE_WIDTH_MAX - STROKE_WIDTH_MIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    // ── target mapping ───────────────────────────────────────────────────

    #[test]
    fn target_is_monotonic_in_speed() {
        let speeds = [0.0, 10.0, 20.0, 100.0, 1_000.0, 5_000.0, 9_999.0];
        let widths: Vec<f32> = speeds.iter().map(|&s| target_width(s)).collect();
        for pair in widths.windows(2) {
            assert!(pair[0] <= pair[1], "width must not shrink as speed grows");
        }
    }

    #[test]
    fn target_is_clamped_at_the_velocity_endpoints() {
        assert_eq!(target_width(0.0), STROKE_WIDTH_MIN);
        assert_eq!(target_width(VELOCITY_CLAMP_MIN), STROKE_WIDTH_MIN);
        assert_eq!(target_width(VELOCITY_CLAMP_MAX), STROKE_WIDTH_MAX);
        assert_eq!(target_width(50_000.0), STROKE_WIDTH_MAX);
    }

    #[test]
    fn target_midpoint_is_halfway_between_the_bounds() {
        let mid_speed = (VELOCITY_CLAMP_MIN + VELOCITY_CLAMP_MAX) / 2.0;
        let expected = (STROKE_WIDTH_MIN + STROKE_WIDTH_MAX) / 2.0;
        assert_relative_eq!(target_width(mid_speed), expected, epsilon = 1e-6);
    }

    // ── smoothing ────────────────────────────────────────────────────────

    #[test]
    fn constant_velocity_converges_on_its_target() {
        let mut filter = WidthFilter::new();
        // speed = hypot(3000, 4000) = 5000 → widest target.
        for _ in 0..10 {
            filter.feed(3_000.0, 4_000.0);
        }
        // The gap halves per sample; ten samples leave < 1e-4 of it.
        assert_abs_diff_eq!(filter.width(), STROKE_WIDTH_MAX, epsilon = 1e-4);
    }

    #[test]
    fn first_sample_moves_halfway_to_the_target() {
        let mut filter = WidthFilter::new();
        let fed = filter.feed(0.0, 0.0);
        assert_relative_eq!(fed, (INITIAL_WIDTH + STROKE_WIDTH_MIN) / 2.0);
        assert_eq!(fed, filter.width());
    }

    #[test]
    fn non_finite_velocity_counts_as_stationary() {
        let mut filter = WidthFilter::new();
        let poisoned = filter.feed(f32::NAN, f32::INFINITY);
        assert!(poisoned.is_finite());
        assert_relative_eq!(poisoned, (INITIAL_WIDTH + STROKE_WIDTH_MIN) / 2.0);
    }

    #[test]
    fn set_width_redirects_the_next_update() {
        let mut filter = WidthFilter::new();
        filter.set_width(STROKE_WIDTH_MAX);
        let fed = filter.feed(0.0, 0.0);
        assert_relative_eq!(fed, (STROKE_WIDTH_MAX + STROKE_WIDTH_MIN) / 2.0);
    }
}
