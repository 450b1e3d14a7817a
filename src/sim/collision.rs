//! Ball-versus-side collision primitive
//!
//! Everything in the game collides the same way: a circle against the line
//! segment forming one side of an axis-aligned rectangle, or one edge of the
//! world boundary. The tricky part is that the distance test alone measures
//! against the side's supporting line extended to infinity, so it must always
//! be paired with a containment check on the orthogonal axis. The public hit
//! tests bundle the pair so call sites cannot forget it.

use glam::Vec2;

/// Perpendicular distance from `center` to the infinite line through
/// `p1` and `p2`: |cross(p1 - center, p2 - center)| / |p1 - p2|.
///
/// A degenerate segment (p1 == p2) has no well-defined line; it reports
/// infinite distance and therefore never collides.
pub fn line_distance(center: Vec2, p1: Vec2, p2: Vec2) -> f32 {
    let to_p1 = p1 - center;
    let to_p2 = p2 - center;
    let length = p1.distance(p2);
    if length < f32::EPSILON {
        return f32::INFINITY;
    }
    (to_p1.x * to_p2.y - to_p1.y * to_p2.x).abs() / length
}

/// Contact once the line distance falls to the radius. Exact tangency counts
/// as a hit.
fn touches_line(center: Vec2, radius: f32, p1: Vec2, p2: Vec2) -> bool {
    line_distance(center, p1, p2) - radius <= 0.0
}

/// True when `v` lies within the closed interval spanned by `a` and `b`.
pub fn within_span(v: f32, a: f32, b: f32) -> bool {
    v >= a.min(b) && v <= a.max(b)
}

/// Hit test against a horizontal side, with containment on x.
pub fn hits_horizontal_side(center: Vec2, radius: f32, p1: Vec2, p2: Vec2) -> bool {
    touches_line(center, radius, p1, p2) && within_span(center.x, p1.x, p2.x)
}

/// Hit test against a vertical side, with containment on y.
pub fn hits_vertical_side(center: Vec2, radius: f32, p1: Vec2, p2: Vec2) -> bool {
    touches_line(center, radius, p1, p2) && within_span(center.y, p1.y, p2.y)
}
