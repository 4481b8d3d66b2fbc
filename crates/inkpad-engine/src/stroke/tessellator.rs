use crate::geometry::{Point, Size, perpendicular, quadratic_bezier, view_to_ndc};
use crate::input::PointerSample;
use crate::mesh::VertexStore;

use super::width::WidthFilter;

/// Motion below this distance (device px) emits no geometry.
const MIN_POINT_DISTANCE: f32 = 1.0;
/// Above this distance (device px) the gap is bridged with a quadratic curve.
const QUADRATIC_DISTANCE_TOLERANCE: f32 = 3.0;
/// Device-pixel spacing of synthesized curve points.
const SEGMENT_STEP: f32 = 1.5;

/// Running state of the stroke currently under the pointer.
#[derive(Debug, Copy, Clone)]
struct ActiveStroke {
    /// Last raw sample, device px.
    previous_point: Point,
    /// Midpoint of the last two raw samples, device px.
    previous_mid: Point,
    /// Last committed centerline point, NDC.
    previous_vertex: Point,
}

/// Turns begin/move/end pointer samples into ribbon strip vertices.
///
/// Raw samples arrive too sparsely to draw directly, so each move bridges
/// the gap with the quadratic curve through the last two sample midpoints,
/// using the raw sample as control point. Every synthesized centerline
/// point expands into two strip vertices offset by half the pen width;
/// begin and end push degenerate pairs so consecutive strokes stay
/// disconnected inside one buffer.
///
/// The smoothed pen width persists across strokes; the positional state
/// lives only while a stroke is active.
#[derive(Debug)]
pub struct StrokeTessellator {
    filter: WidthFilter,
    /// Width at the last committed segment boundary; interpolation start.
    segment_start_width: f32,
    active: Option<ActiveStroke>,
}

impl StrokeTessellator {
    pub fn new() -> Self {
        let filter = WidthFilter::new();
        let segment_start_width = filter.width();
        Self {
            filter,
            segment_start_width,
            active: None,
        }
    }

    /// Starts a stroke at the sample location.
    ///
    /// A begin while another stroke is active abandons the old positional
    /// state and starts fresh.
    pub fn begin(&mut self, sample: PointerSample, size: Size, lines: &mut VertexStore) {
        let width = self.filter.feed(sample.vx, sample.vy);
        let location = Point::new(sample.x, sample.y);
        let vertex = view_to_ndc(location, size);

        self.segment_start_width = width;
        self.active = Some(ActiveStroke {
            previous_point: location,
            previous_mid: location,
            previous_vertex: vertex,
        });

        // Degenerate pair: opens the strip without a stray triangle.
        lines.push(vertex.x, vertex.y);
        lines.push(vertex.x, vertex.y);
    }

    /// Extends the active stroke toward the sample location.
    ///
    /// Width is interpolated across the synthesized run from the previous
    /// segment boundary to this event's smoothed width; the curve endpoint
    /// itself is not emitted, the next event's run starts there.
    pub fn extend(&mut self, sample: PointerSample, size: Size, lines: &mut VertexStore) {
        let entry_width = self.filter.feed(sample.vx, sample.vy);

        // Split borrows: the loop advances the filter while holding the
        // active-stroke state mutably.
        let Self {
            filter,
            segment_start_width,
            active,
        } = self;
        let Some(stroke) = active.as_mut() else {
            log::debug!("move sample with no active stroke; ignored");
            return;
        };

        let location = Point::new(sample.x, sample.y);
        let distance = stroke.previous_point.distance_to(location);
        let mid = stroke.previous_point.midpoint(location);

        if distance > QUADRATIC_DISTANCE_TOLERANCE {
            let segments = (distance / SEGMENT_STEP) as u32;
            let start_width = *segment_start_width;
            for i in 0..segments {
                let t = i as f32 / segments as f32;
                let width = start_width + (entry_width - start_width) * t;
                filter.set_width(width);

                let device = quadratic_bezier(stroke.previous_mid, stroke.previous_point, mid, t);
                let vertex = view_to_ndc(device, size);
                emit_ribbon_pair(lines, stroke.previous_vertex, vertex, width);
                stroke.previous_vertex = vertex;
            }
            *segment_start_width = entry_width;
        } else if distance > MIN_POINT_DISTANCE {
            // Too close for curve synthesis; one straight segment.
            let vertex = view_to_ndc(location, size);
            emit_ribbon_pair(lines, stroke.previous_vertex, vertex, entry_width);
            stroke.previous_vertex = vertex;
            *segment_start_width = entry_width;
        }
        // Below MIN_POINT_DISTANCE the sample still advances the raw chain.

        stroke.previous_point = location;
        stroke.previous_mid = mid;
    }

    /// Ends the active stroke at the sample location.
    pub fn finish(&mut self, sample: PointerSample, size: Size, lines: &mut VertexStore) {
        let _ = self.filter.feed(sample.vx, sample.vy);
        if self.active.take().is_none() {
            log::debug!("end sample with no active stroke; ignored");
            return;
        }

        // Closing degenerate pair, mirroring the stroke start.
        let vertex = view_to_ndc(Point::new(sample.x, sample.y), size);
        lines.push(vertex.x, vertex.y);
        lines.push(vertex.x, vertex.y);
    }

    /// Drops any in-progress stroke without emitting closing geometry.
    pub fn cancel(&mut self) {
        self.active = None;
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Current smoothed pen width, NDC units.
    pub fn pen_width(&self) -> f32 {
        self.filter.width()
    }
}

impl Default for StrokeTessellator {
    fn default() -> Self {
        Self::new()
    }
}

/// Pushes the two side vertices expanding `prev → next` into the ribbon.
///
/// Both sides sit on the perpendicular of the segment, half the pen width
/// out from `next`. Coincident points have no offset direction and emit
/// nothing.
fn emit_ribbon_pair(lines: &mut VertexStore, prev: Point, next: Point, width: f32) {
    let perp = perpendicular(prev, next);
    let reference = next + perp;
    let offset_distance = next.distance_to(reference);
    if offset_distance <= 0.0 || !offset_distance.is_finite() {
        return;
    }

    let mut to_travel = width / 2.0;
    for _ in 0..2 {
        let ratio = -(to_travel / offset_distance);
        let side = next + (next - reference) * ratio;
        lines.push(side.x, side.y);
        to_travel = -to_travel;
    }
}
