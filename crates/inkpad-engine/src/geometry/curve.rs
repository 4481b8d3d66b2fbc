use super::Point;

/// Evaluates the quadratic Bezier from `start` to `end` with one `control`
/// point, at parameter `t` in [0, 1].
#[inline]
pub fn quadratic_bezier(start: Point, control: Point, end: Point, t: f32) -> Point {
    let u = 1.0 - t;
    let a = u * u;
    let b = 2.0 * u * t;
    let c = t * t;
    Point::new(
        a * start.x + b * control.x + c * end.x,
        a * start.y + b * control.y + c * end.y,
    )
}

/// Edge vector of `p1 → p2` rotated a quarter turn, unnormalized.
///
/// Used to offset ribbon sides; the caller rescales it to the half-width.
#[inline]
pub fn perpendicular(p1: Point, p2: Point) -> Point {
    Point::new(p2.y - p1.y, -(p2.x - p1.x))
}
