//! Per-body collision resolution
//!
//! Gathers the polygons around a moving box and pushes the box out of each
//! one in turn using the separating-axis resolver.

use thiserror::Error;

use crate::config::CollisionConfig;
use crate::foundation::math::Vec2;
use super::query::{QueryError, SpatialQuery};
use super::sat;
use super::shape::BoxBody;

/// Errors from the collision manager
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CollisionError {
    /// The broad phase failed; the body was not moved
    #[error("Collision query failed: {0}")]
    Query(#[from] QueryError),
}

/// Resolves a box body against nearby polygon colliders once per tick
#[derive(Debug, Clone, Default)]
pub struct CollisionManager {
    config: CollisionConfig,
}

impl CollisionManager {
    /// Create a manager with the given settings
    pub fn new(config: CollisionConfig) -> Self {
        Self { config }
    }

    /// Current settings
    pub fn config(&self) -> &CollisionConfig {
        &self.config
    }

    /// Push `body` out of every overlapping polygon
    ///
    /// Triggers and non-polygon colliders are ignored. Each separation is
    /// applied before the next polygon is tested. Returns the total
    /// displacement; on error the body is left where it was.
    pub fn tick<Q: SpatialQuery + ?Sized>(&self, body: &mut BoxBody, backend: &Q) -> Result<Vec2, CollisionError> {
        let center = body.transform.position;
        let colliders = backend.overlap_circle(center, self.config.query_radius, self.config.layer_mask)?;

        let mut polygons = Vec::with_capacity(colliders.len());
        for collider in colliders.iter().filter(|c| !c.is_trigger) {
            if let Some(polygon) = collider.to_world_polygon()? {
                polygons.push(polygon);
            }
        }

        let displacement = sat::resolve_collision(body, &polygons);
        if displacement != Vec2::zeros() {
            log::debug!(
                "Resolved body at {:?} against {} polygons, moved by {:?}",
                center,
                polygons.len(),
                displacement
            );
            body.transform.position += displacement;
        }
        Ok(displacement)
    }
}
