//! Gizmo collision detection utilities
//!
//! Handle picking happens in screen space: every handle is projected through
//! the view first, so tolerances stay in pixels regardless of zoom or
//! perspective.

use glam::Vec2;

use crate::constants::pick::DEGENERATE_SEGMENT_LENGTH_SQ;

/// Distance from a point to the segment `a`-`b`.
///
/// Coincident endpoints (an axis seen end-on) fall back to the distance to
/// `a` instead of dividing by a near-zero length.
pub fn distance_to_segment(point: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let length_sq = ab.length_squared();
    if length_sq < DEGENERATE_SEGMENT_LENGTH_SQ {
        return point.distance(a);
    }

    let t = ((point - a).dot(ab) / length_sq).clamp(0.0, 1.0);
    point.distance(a + ab * t)
}

/// Point-in-quadrilateral test.
///
/// The point is inside when it lies on the same side of all four edges,
/// whichever way the quad winds.
pub fn point_in_quad(point: Vec2, quad: &[Vec2; 4]) -> bool {
    let side = |o: Vec2, a: Vec2| (a - o).perp_dot(point - o) >= 0.0;

    let s0 = side(quad[0], quad[1]);
    let s1 = side(quad[1], quad[2]);
    let s2 = side(quad[2], quad[3]);
    let s3 = side(quad[3], quad[0]);

    s0 == s1 && s1 == s2 && s2 == s3
}

/// Ring hit test: is the point's distance from `center` within `tolerance`
/// of `radius`?
pub fn ring_hit(point: Vec2, center: Vec2, radius: f32, tolerance: f32) -> bool {
    (point.distance(center) - radius).abs() < tolerance
}
