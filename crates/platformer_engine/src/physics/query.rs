//! Abstract query interface onto the collision backend
//!
//! The light and collision pipelines never own geometry. They ask a backend
//! for colliders around a point, for the first hit along a ray, and whether a
//! thin box overlaps anything. Any broad phase (spatial hash, BVH, the host
//! engine's physics) can sit behind these traits; [`CollisionWorld`] is the
//! in-memory implementation shipped with the crate.
//!
//! [`CollisionWorld`]: super::CollisionWorld

use thiserror::Error;

use crate::foundation::math::Vec2;
use super::collision_layers::LayerMask;
use super::primitives::RayHit;
use super::shape::{Collider, WorldPolygon};

/// Failures of the collision backend
///
/// These are fatal for the current tick of the entity that issued the query.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    /// The backend cannot answer queries right now
    #[error("Collision backend unavailable: {0}")]
    BackendUnavailable(String),

    /// The backend returned geometry that cannot be used
    #[error("Malformed shape data: {0}")]
    MalformedShape(String),

    /// A query parameter is out of range
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

/// Broad-phase overlap query
pub trait SpatialQuery: Send + Sync {
    /// All colliders on `mask` overlapping the circle at `center`
    fn overlap_circle(&self, center: Vec2, radius: f32, mask: LayerMask) -> Result<Vec<Collider>, QueryError>;
}

/// Nearest-hit ray cast
pub trait RayCaster: Send + Sync {
    /// First collider on `mask` hit by the ray, within `max_distance`
    ///
    /// `direction` need not be normalized; a zero direction never hits.
    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Result<Option<RayHit>, QueryError>;
}

/// Boolean box overlap probe
pub trait OverlapProbe: Send + Sync {
    /// Whether a box with the given center, half extents and rotation
    /// (radians) overlaps any collider on `mask`
    fn overlap_box(&self, center: Vec2, half_extents: Vec2, rotation: f32, mask: LayerMask)
        -> Result<bool, QueryError>;
}

/// Everything the light and platformer pipelines need from a backend
pub trait PhysicsBackend: SpatialQuery + RayCaster + OverlapProbe {}

impl<T: SpatialQuery + RayCaster + OverlapProbe> PhysicsBackend for T {}

/// Polygon colliders within `radius` of `origin` on `mask`, in world space
///
/// Colliders of other shapes are skipped, as are any the backend returns
/// from layers outside `mask`. Malformed polygons abort the query.
pub fn query_polygons<Q: SpatialQuery + ?Sized>(
    backend: &Q,
    origin: Vec2,
    radius: f32,
    mask: LayerMask,
) -> Result<Vec<WorldPolygon>, QueryError> {
    if !(radius.is_finite() && radius > 0.0) {
        return Err(QueryError::InvalidQuery(format!("radius must be > 0, got {radius}")));
    }

    let colliders = backend.overlap_circle(origin, radius, mask)?;
    let mut polygons = Vec::with_capacity(colliders.len());
    for collider in &colliders {
        if !mask.selects(collider.layer) {
            continue;
        }
        match collider.to_world_polygon()? {
            Some(polygon) => polygons.push(polygon),
            None => log::trace!("Skipping non-polygon {} collider", collider.shape.kind()),
        }
    }

    log::trace!(
        "query_polygons: {} of {} colliders near {:?} are polygons",
        polygons.len(),
        colliders.len(),
        origin
    );
    Ok(polygons)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Transform2D;
    use crate::physics::shape::ColliderShape;

    /// Backend that returns a fixed collider list regardless of the query
    struct FixedBackend(Vec<Collider>);

    impl SpatialQuery for FixedBackend {
        fn overlap_circle(&self, _: Vec2, _: f32, _: LayerMask) -> Result<Vec<Collider>, QueryError> {
            Ok(self.0.clone())
        }
    }

    struct DownBackend;

    impl SpatialQuery for DownBackend {
        fn overlap_circle(&self, _: Vec2, _: f32, _: LayerMask) -> Result<Vec<Collider>, QueryError> {
            Err(QueryError::BackendUnavailable("offline".into()))
        }
    }

    fn square() -> Collider {
        Collider::new(ColliderShape::rectangle_polygon(Vec2::new(1.0, 1.0)), Transform2D::identity())
    }

    #[test]
    fn test_non_polygons_skipped() {
        let backend = FixedBackend(vec![
            square(),
            Collider::new(ColliderShape::Circle(1.0), Transform2D::identity()),
            Collider::new(ColliderShape::Box(Vec2::new(1.0, 1.0)), Transform2D::identity()),
        ]);

        let polygons = query_polygons(&backend, Vec2::zeros(), 5.0, LayerMask::ALL).unwrap();
        assert_eq!(polygons.len(), 1);
    }

    #[test]
    fn test_foreign_layers_filtered() {
        let backend = FixedBackend(vec![square(), square().with_layer(LayerMask::PLAYER)]);

        let polygons = query_polygons(&backend, Vec2::zeros(), 5.0, LayerMask::DEFAULT).unwrap();
        assert_eq!(polygons.len(), 1);
        assert_eq!(polygons[0].layer, LayerMask::DEFAULT);
    }

    #[test]
    fn test_backend_failure_propagates() {
        let result = query_polygons(&DownBackend, Vec2::zeros(), 5.0, LayerMask::ALL);
        assert!(matches!(result, Err(QueryError::BackendUnavailable(_))));
    }

    #[test]
    fn test_invalid_radius() {
        let backend = FixedBackend(vec![]);
        assert!(matches!(
            query_polygons(&backend, Vec2::zeros(), 0.0, LayerMask::ALL),
            Err(QueryError::InvalidQuery(_))
        ));
    }

    #[test]
    fn test_malformed_polygon_aborts() {
        let backend = FixedBackend(vec![Collider::new(
            ColliderShape::polygon([Vec2::zeros()]),
            Transform2D::identity(),
        )]);
        assert!(matches!(
            query_polygons(&backend, Vec2::zeros(), 5.0, LayerMask::ALL),
            Err(QueryError::MalformedShape(_))
        ));
    }
}
