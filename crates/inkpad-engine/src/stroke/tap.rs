use std::f32::consts::TAU;

use crate::geometry::{Point, Size, view_to_ndc};
use crate::mesh::VertexStore;

/// Rim points per dab, exclusive of the closing repeat.
const DAB_SEGMENTS: u32 = 20;

/// Stamps an elliptical dab centered on `location` into `dots`.
///
/// The dab is a strip-encoded fan: the center pushed twice to open, then
/// rim/center alternation around the ellipse (rim closes on an inclusive
/// final point), then the center once more. Radii jitter uniformly in
/// [1x, 3x] the pen width per axis.
pub(crate) fn emit_dab(dots: &mut VertexStore, location: Point, size: Size, pen_width: f32) {
    let center = view_to_ndc(location, size);
    let rx = pen_width * 2.0 * (0.5 + fastrand::f32());
    let ry = pen_width * 2.0 * (0.5 + fastrand::f32());

    dots.push(center.x, center.y);
    dots.push(center.x, center.y);
    for i in 0..=DAB_SEGMENTS {
        let angle = (i as f32 / DAB_SEGMENTS as f32) * TAU;
        dots.push(center.x + rx * angle.cos(), center.y + ry * angle.sin());
        dots.push(center.x, center.y);
    }
    dots.push(center.x, center.y);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dab_vertex_count_is_fixed() {
        let mut dots = VertexStore::new();
        emit_dab(
            &mut dots,
            Point::new(50.0, 50.0),
            Size::new(100.0, 100.0),
            0.01,
        );
        // Opening pair + 21 rim/center pairs + closing center.
        assert_eq!(dots.len(), 2 + (DAB_SEGMENTS as usize + 1) * 2 + 1);
    }

    #[test]
    fn dab_stays_within_the_jitter_bound() {
        let mut dots = VertexStore::new();
        let pen_width = 0.01;
        emit_dab(
            &mut dots,
            Point::new(50.0, 50.0),
            Size::new(100.0, 100.0),
            pen_width,
        );

        let center = dots.vertices()[0];
        let max_radius = pen_width * 2.0 * 1.5;
        for v in dots.vertices() {
            assert!((v.pos[0] - center.pos[0]).abs() <= max_radius + 1e-6);
            assert!((v.pos[1] - center.pos[1]).abs() <= max_radius + 1e-6);
        }
    }

    #[test]
    fn rim_alternates_with_the_center() {
        let mut dots = VertexStore::new();
        emit_dab(
            &mut dots,
            Point::new(25.0, 75.0),
            Size::new(100.0, 100.0),
            0.02,
        );

        let center = dots.vertices()[0];
        // Odd vertices in the fan run return to the center.
        for pair in dots.vertices()[2..].chunks_exact(2) {
            assert_eq!(pair[1], center);
        }
    }
}
