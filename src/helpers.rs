//! Geometry helpers shared by physics and AI

use bevy::prelude::*;
use std::f32::consts::PI;

/// Vectors shorter than this normalize to zero
pub const NORMALIZE_EPSILON: f32 = 1e-4;
/// Lower bound on the squared segment length in point-to-segment queries
pub const SEGMENT_EPSILON: f32 = 1e-4;

pub trait Vec2Ext {
    /// Unit vector in the same direction, or `Vec2::ZERO` for near-zero input.
    fn safe_normalize(self) -> Vec2;
}

impl Vec2Ext for Vec2 {
    fn safe_normalize(self) -> Vec2 {
        let len = self.length();
        if len < NORMALIZE_EPSILON {
            Vec2::ZERO
        } else {
            self / len
        }
    }
}

/// Distance from `point` to the segment `a`-`b`.
/// Degenerate segments behave like the single point `a`.
pub fn point_segment_distance(point: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let ap = point - a;
    let t = (ab.dot(ap) / ab.dot(ab).max(SEGMENT_EPSILON)).clamp(0.0, 1.0);
    point.distance(a + ab * t)
}

/// Closest point to `point` inside the axis-aligned rectangle `[min, max]`
pub fn nearest_point_in_rect(point: Vec2, min: Vec2, max: Vec2) -> Vec2 {
    Vec2::new(point.x.clamp(min.x, max.x), point.y.clamp(min.y, max.y))
}

/// Angle (radians, in `[0, PI]`) that the segment between two posts subtends from `from`.
pub fn subtended_angle(from: Vec2, post_a: Vec2, post_b: Vec2) -> f32 {
    let to_a = post_a - from;
    let to_b = post_b - from;
    let angle = (to_a.y.atan2(to_a.x) - to_b.y.atan2(to_b.x)).abs();
    if angle > PI { 2.0 * PI - angle } else { angle }
}
