//! Collider shapes
//!
//! Shapes are stored in local space next to the owning transform and moved
//! into world space on demand, only for the duration of a test.

use serde::{Deserialize, Serialize};

use crate::foundation::math::{Transform2D, Vec2};
use super::collision_layers::LayerMask;
use super::query::QueryError;

/// Collider geometry in local space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColliderShape {
    /// Closed ring of vertices (convex for collision, any simple ring for light)
    Polygon(Vec<Vec2>),
    /// Rectangle of the given full size centered on the offset
    Box(Vec2),
    /// Circle of the given radius
    Circle(f32),
}

impl ColliderShape {
    /// Polygon shape from any list of points
    pub fn polygon(points: impl IntoIterator<Item = Vec2>) -> Self {
        Self::Polygon(points.into_iter().collect())
    }

    /// Polygon shape for an axis-aligned rectangle, counter-clockwise
    pub fn rectangle_polygon(size: Vec2) -> Self {
        let h = size * 0.5;
        Self::Polygon(vec![
            Vec2::new(-h.x, -h.y),
            Vec2::new(h.x, -h.y),
            Vec2::new(h.x, h.y),
            Vec2::new(-h.x, h.y),
        ])
    }

    /// Human-readable shape kind for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Polygon(_) => "polygon",
            Self::Box(_) => "box",
            Self::Circle(_) => "circle",
        }
    }
}

/// A collider placed in the world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    /// Local geometry
    pub shape: ColliderShape,
    /// Local offset applied before the transform
    pub offset: Vec2,
    /// Placement in the world
    pub transform: Transform2D,
    /// Layer this collider lives on
    pub layer: LayerMask,
    /// Trigger colliders are reported by queries but never pushed against
    pub is_trigger: bool,
}

impl Collider {
    /// Create a collider on the default layer
    pub fn new(shape: ColliderShape, transform: Transform2D) -> Self {
        Self {
            shape,
            offset: Vec2::zeros(),
            transform,
            layer: LayerMask::DEFAULT,
            is_trigger: false,
        }
    }

    /// Set the layer
    pub fn with_layer(mut self, layer: LayerMask) -> Self {
        self.layer = layer;
        self
    }

    /// Set the local offset
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    /// Mark as trigger
    pub fn as_trigger(mut self) -> Self {
        self.is_trigger = true;
        self
    }

    /// Whether this collider is polygon-shaped
    pub fn is_polygon(&self) -> bool {
        matches!(self.shape, ColliderShape::Polygon(_))
    }

    /// Corner ring in world space for polygon and box shapes
    pub fn world_ring(&self) -> Option<Vec<Vec2>> {
        let local = match &self.shape {
            ColliderShape::Polygon(points) => points.clone(),
            ColliderShape::Box(size) => {
                let h = size * 0.5;
                vec![
                    Vec2::new(-h.x, -h.y),
                    Vec2::new(h.x, -h.y),
                    Vec2::new(h.x, h.y),
                    Vec2::new(-h.x, h.y),
                ]
            }
            ColliderShape::Circle(_) => return None,
        };
        Some(
            local
                .into_iter()
                .map(|p| self.transform.transform_point(p + self.offset))
                .collect(),
        )
    }

    /// World-space circle `(center, radius)` for circle shapes
    ///
    /// The radius is scaled by the largest scale component.
    pub fn world_circle(&self) -> Option<(Vec2, f32)> {
        match self.shape {
            ColliderShape::Circle(radius) => {
                let scale = self.transform.scale.x.abs().max(self.transform.scale.y.abs());
                Some((self.transform.transform_point(self.offset), radius * scale))
            }
            _ => None,
        }
    }

    /// World-space polygon if this collider is a polygon
    ///
    /// Fails with [`QueryError::MalformedShape`] when the ring is degenerate.
    pub fn to_world_polygon(&self) -> Result<Option<WorldPolygon>, QueryError> {
        if !self.is_polygon() {
            return Ok(None);
        }
        let vertices = self.world_ring().unwrap_or_default();
        let polygon = WorldPolygon {
            vertices,
            layer: self.layer,
            is_trigger: self.is_trigger,
        };
        polygon.validate()?;
        Ok(Some(polygon))
    }
}

/// A polygon ring in world space, produced per query
#[derive(Debug, Clone, PartialEq)]
pub struct WorldPolygon {
    /// Vertices in world space, in ring order
    pub vertices: Vec<Vec2>,
    /// Layer of the source collider
    pub layer: LayerMask,
    /// Whether the source collider is a trigger
    pub is_trigger: bool,
}

impl WorldPolygon {
    /// Polygon on the default layer from world-space vertices
    pub fn new(vertices: Vec<Vec2>) -> Self {
        Self {
            vertices,
            layer: LayerMask::DEFAULT,
            is_trigger: false,
        }
    }

    /// Axis-aligned square polygon centered at `center`
    pub fn square(center: Vec2, size: f32) -> Self {
        let h = size * 0.5;
        Self::new(vec![
            center + Vec2::new(-h, -h),
            center + Vec2::new(h, -h),
            center + Vec2::new(h, h),
            center + Vec2::new(-h, h),
        ])
    }

    /// Reject rings that cannot bound an area
    pub fn validate(&self) -> Result<(), QueryError> {
        if self.vertices.len() < 3 {
            return Err(QueryError::MalformedShape(format!(
                "polygon has {} vertices, need at least 3",
                self.vertices.len()
            )));
        }
        if let Some(bad) = self.vertices.iter().find(|v| !(v.x.is_finite() && v.y.is_finite())) {
            return Err(QueryError::MalformedShape(format!("non-finite vertex {bad:?}")));
        }
        Ok(())
    }
}

/// The moving rectangle resolved against polygons
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxBody {
    /// Full local size of the box
    pub size: Vec2,
    /// Placement; scale multiplies the size
    pub transform: Transform2D,
}

impl BoxBody {
    /// Box of the given size centered at `position`
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            size,
            transform: Transform2D::from_position(position),
        }
    }

    /// Half of the local size
    pub fn half_extents(&self) -> Vec2 {
        self.size * 0.5
    }

    /// The four corners in world space
    pub fn world_corners(&self) -> [Vec2; 4] {
        let h = self.half_extents();
        [
            self.transform.transform_point(Vec2::new(-h.x, -h.y)),
            self.transform.transform_point(Vec2::new(h.x, -h.y)),
            self.transform.transform_point(Vec2::new(-h.x, h.y)),
            self.transform.transform_point(Vec2::new(h.x, h.y)),
        ]
    }

    /// Separating axes of the box: local up, then local right
    pub fn axes(&self) -> [Vec2; 2] {
        [self.transform.up(), self.transform.right()]
    }

    /// Lowest world y of the box
    pub fn min_y(&self) -> f32 {
        self.world_corners().iter().map(|c| c.y).fold(f32::INFINITY, f32::min)
    }

    /// Highest world y of the box
    pub fn max_y(&self) -> f32 {
        self.world_corners().iter().map(|c| c.y).fold(f32::NEG_INFINITY, f32::max)
    }
}
