//! Separating Axis Theorem between a box and convex polygons
//!
//! The box's two local axes and every polygon edge normal are tested. An axis
//! on which the projections do not overlap proves the shapes disjoint; if all
//! axes overlap, the axis with the smallest penetration gives the vector that
//! pushes the box out.

use crate::foundation::math::{utils::approximately, Vec2};
use super::shape::{BoxBody, WorldPolygon};

/// Interval covered by a shape projected onto an axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Minimum projected value
    pub min: f32,
    /// Maximum projected value
    pub max: f32,
}

impl Projection {
    /// Project points onto an axis (divided by the axis length)
    pub fn project(points: &[Vec2], axis: Vec2) -> Self {
        let length = axis.norm();
        points.iter().fold(
            Self {
                min: f32::MAX,
                max: f32::MIN,
            },
            |acc, point| {
                let proj = point.dot(&axis) / length;
                Self {
                    min: acc.min.min(proj),
                    max: acc.max.max(proj),
                }
            },
        )
    }

    /// Signed penetration of `self` (the box) into `other`
    ///
    /// Returns `None` when the intervals are disjoint or merely touching.
    /// A negative value pushes the box toward -axis, positive toward +axis.
    pub fn overlap(&self, other: &Self) -> Option<f32> {
        if approximately(self.min, other.max) || approximately(other.min, self.max) {
            return None;
        }

        if self.min < other.min {
            if self.max < other.min {
                return None;
            }
            return Some(other.min - self.max);
        }

        if other.max < self.min {
            return None;
        }
        Some(other.max - self.min)
    }
}

/// Unit outward-or-inward edge normals of a ring; degenerate edges are skipped
pub fn edge_normals(ring: &[Vec2]) -> impl Iterator<Item = Vec2> + '_ {
    super::primitives::ring_edges(ring).filter_map(|(a, b)| {
        (b - a)
            .try_normalize(f32::EPSILON)
            .map(|dir| Vec2::new(dir.y, -dir.x))
    })
}

/// Minimum translation pushing `body` out of the convex ring `polygon`
///
/// Returns the zero vector when some axis separates the shapes.
pub fn separation_vector(body: &BoxBody, polygon: &[Vec2]) -> Vec2 {
    let corners = body.world_corners();
    let mut separation = Vec2::zeros();

    for axis in body.axes().into_iter().chain(edge_normals(polygon)) {
        let box_proj = Projection::project(&corners, axis);
        let poly_proj = Projection::project(polygon, axis);

        let Some(depth) = box_proj.overlap(&poly_proj) else {
            return Vec2::zeros();
        };

        let candidate = axis * depth;
        if separation == Vec2::zeros() || candidate.norm() < separation.norm() {
            separation = candidate;
        }
    }

    separation
}

/// Whether the box and the ring interpenetrate (touching does not count)
pub fn box_intersects(body: &BoxBody, polygon: &[Vec2]) -> bool {
    separation_vector(body, polygon) != Vec2::zeros()
}

/// Resolve the box against each polygon in turn
///
/// Each non-zero separation is applied to a working copy of the box before
/// the next polygon is tested. Returns the total displacement; the zero
/// vector means no action is needed.
pub fn resolve_collision(body: &BoxBody, polygons: &[WorldPolygon]) -> Vec2 {
    let mut moved = *body;
    for polygon in polygons {
        let separation = separation_vector(&moved, &polygon.vertices);
        if separation != Vec2::zeros() {
            moved.transform.position += separation;
        }
    }
    moved.transform.position - body.transform.position
}
