//! Primitive collision shapes and intersection algorithms
//!
//! Rays, segments and circles in the plane, with the intersection routines
//! the reference backend builds its queries on.

use crate::foundation::math::Vec2;
use super::ColliderHandle;

/// Tolerance on the segment parameter so rays through a vertex hit it
const SEGMENT_END_TOLERANCE: f32 = 1e-5;

/// Cross products below this are treated as parallel
const PARALLEL_EPSILON: f32 = 1e-9;

/// A ray for ray casting
#[derive(Debug, Clone, Copy)]
pub struct Ray2D {
    /// The origin point of the ray in world space
    pub origin: Vec2,
    /// The direction of the ray (normalized)
    pub direction: Vec2,
}

impl Ray2D {
    /// Creates a new ray, normalizing the direction
    ///
    /// Returns `None` for a zero-length direction.
    pub fn new(origin: Vec2, direction: Vec2) -> Option<Self> {
        direction
            .try_normalize(f32::EPSILON)
            .map(|direction| Self { origin, direction })
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vec2 {
        self.origin + self.direction * t
    }

    /// Distance along the ray to a segment, if the ray crosses it
    ///
    /// Segment ends are inclusive. Collinear overlap is not reported.
    pub fn intersect_segment(&self, a: Vec2, b: Vec2) -> Option<f32> {
        let edge = b - a;
        let denom = self.direction.perp(&edge);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let to_start = a - self.origin;
        let t = to_start.perp(&edge) / denom;
        let u = to_start.perp(&self.direction) / denom;

        if t >= 0.0 && (-SEGMENT_END_TOLERANCE..=1.0 + SEGMENT_END_TOLERANCE).contains(&u) {
            Some(t)
        } else {
            None
        }
    }

    /// Distance along the ray to a circle boundary, if it hits
    ///
    /// A ray starting inside the circle reports the exit point.
    pub fn intersect_circle(&self, center: Vec2, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(&self.direction);
        let c = oc.norm_squared() - radius * radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_discriminant = discriminant.sqrt();
        let t1 = -b - sqrt_discriminant;
        let t2 = -b + sqrt_discriminant;
        if t1 >= 0.0 {
            Some(t1)
        } else if t2 >= 0.0 {
            Some(t2)
        } else {
            None
        }
    }
}

/// Result of a ray intersection test
#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    /// The collider that was hit
    pub collider: ColliderHandle,
    /// The distance from the ray origin to the hit point
    pub distance: f32,
    /// The point of intersection in world space
    pub point: Vec2,
}

/// Closest point on segment `a`-`b` to `point`
pub fn closest_point_on_segment(a: Vec2, b: Vec2, point: Vec2) -> Vec2 {
    let edge = b - a;
    let length_sq = edge.norm_squared();
    if length_sq <= f32::EPSILON {
        return a;
    }
    let t = ((point - a).dot(&edge) / length_sq).clamp(0.0, 1.0);
    a + edge * t
}

/// Even-odd point containment for a closed ring
pub fn ring_contains(ring: &[Vec2], point: Vec2) -> bool {
    let mut inside = false;
    let mut j = ring.len().wrapping_sub(1);
    for (i, a) in ring.iter().enumerate() {
        let b = ring[j];
        if (a.y > point.y) != (b.y > point.y) {
            let x_cross = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Iterate the edges `(p[i], p[i+1])` of a closed ring
pub fn ring_edges(ring: &[Vec2]) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
    ring.iter()
        .enumerate()
        .map(move |(i, &a)| (a, ring[(i + 1) % ring.len()]))
}

/// Whether a closed ring and a circle overlap (touching counts)
pub fn ring_overlaps_circle(ring: &[Vec2], center: Vec2, radius: f32) -> bool {
    if ring_contains(ring, center) {
        return true;
    }
    let radius_sq = radius * radius;
    ring_edges(ring).any(|(a, b)| (closest_point_on_segment(a, b, center) - center).norm_squared() <= radius_sq)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_square() -> Vec<Vec2> {
        vec![
            Vec2::new(-0.5, -0.5),
            Vec2::new(0.5, -0.5),
            Vec2::new(0.5, 0.5),
            Vec2::new(-0.5, 0.5),
        ]
    }

    #[test]
    fn test_ray_rejects_zero_direction() {
        assert!(Ray2D::new(Vec2::zeros(), Vec2::zeros()).is_none());
    }

    #[test]
    fn test_ray_segment_hit() {
        let ray = Ray2D::new(Vec2::zeros(), Vec2::new(1.0, 0.0)).unwrap();
        let t = ray.intersect_segment(Vec2::new(2.0, -1.0), Vec2::new(2.0, 1.0)).unwrap();
        assert_relative_eq!(t, 2.0);
    }

    #[test]
    fn test_ray_segment_behind_origin() {
        let ray = Ray2D::new(Vec2::zeros(), Vec2::new(1.0, 0.0)).unwrap();
        assert!(ray.intersect_segment(Vec2::new(-2.0, -1.0), Vec2::new(-2.0, 1.0)).is_none());
    }

    #[test]
    fn test_ray_through_segment_end_hits() {
        let ray = Ray2D::new(Vec2::zeros(), Vec2::new(2.5, 0.5)).unwrap();
        let t = ray.intersect_segment(Vec2::new(2.5, -0.5), Vec2::new(2.5, 0.5)).unwrap();
        assert_relative_eq!(ray.point_at(t), Vec2::new(2.5, 0.5), epsilon = 1e-5);
    }

    #[test]
    fn test_ray_parallel_segment_misses() {
        let ray = Ray2D::new(Vec2::zeros(), Vec2::new(1.0, 0.0)).unwrap();
        assert!(ray.intersect_segment(Vec2::new(1.0, 1.0), Vec2::new(3.0, 1.0)).is_none());
    }

    #[test]
    fn test_ray_circle() {
        let ray = Ray2D::new(Vec2::zeros(), Vec2::new(0.0, 1.0)).unwrap();
        assert_relative_eq!(ray.intersect_circle(Vec2::new(0.0, 5.0), 1.0).unwrap(), 4.0);
        assert_relative_eq!(ray.intersect_circle(Vec2::zeros(), 2.0).unwrap(), 2.0);
        assert!(ray.intersect_circle(Vec2::new(3.0, 5.0), 1.0).is_none());
    }

    #[test]
    fn test_ring_contains() {
        let square = unit_square();
        assert!(ring_contains(&square, Vec2::zeros()));
        assert!(!ring_contains(&square, Vec2::new(1.0, 0.0)));
    }

    #[test]
    fn test_ring_overlaps_circle() {
        let square = unit_square();
        assert!(ring_overlaps_circle(&square, Vec2::new(1.0, 0.0), 0.6));
        assert!(!ring_overlaps_circle(&square, Vec2::new(2.0, 0.0), 1.0));
        assert!(ring_overlaps_circle(&square, Vec2::new(0.1, 0.1), 0.01));
    }

    #[test]
    fn test_closest_point_on_segment_clamps() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(1.0, 0.0);
        assert_eq!(closest_point_on_segment(a, b, Vec2::new(-1.0, 1.0)), a);
        assert_eq!(closest_point_on_segment(a, b, Vec2::new(2.0, 1.0)), b);
        assert_relative_eq!(closest_point_on_segment(a, b, Vec2::new(0.3, 1.0)), Vec2::new(0.3, 0.0));
    }
}
