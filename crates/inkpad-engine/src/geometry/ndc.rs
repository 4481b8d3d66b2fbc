use super::{Point, Size};

/// Maps a device-pixel position onto normalized device coordinates.
///
/// X maps [0, width] to [-1, 1]. Y maps [0, height] to [1, -1]: device
/// space grows downward, NDC grows upward, so the axis flips.
#[inline]
pub fn view_to_ndc(p: Point, size: Size) -> Point {
    Point::new(
        (p.x / size.width) * 2.0 - 1.0,
        -((p.y / size.height) * 2.0 - 1.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── corners ──────────────────────────────────────────────────────────

    #[test]
    fn origin_maps_to_top_left() {
        let size = Size::new(800.0, 600.0);
        assert_eq!(view_to_ndc(Point::zero(), size), Point::new(-1.0, 1.0));
    }

    #[test]
    fn far_corner_maps_to_bottom_right() {
        let size = Size::new(800.0, 600.0);
        assert_eq!(
            view_to_ndc(Point::new(800.0, 600.0), size),
            Point::new(1.0, -1.0)
        );
    }

    #[test]
    fn center_maps_to_ndc_origin() {
        let size = Size::new(800.0, 600.0);
        assert_eq!(view_to_ndc(Point::new(400.0, 300.0), size), Point::zero());
    }

    // ── axis orientation ─────────────────────────────────────────────────

    #[test]
    fn moving_down_in_device_space_moves_down_in_ndc() {
        let size = Size::new(100.0, 100.0);
        let upper = view_to_ndc(Point::new(50.0, 10.0), size);
        let lower = view_to_ndc(Point::new(50.0, 90.0), size);
        assert!(upper.y > lower.y);
    }
}
