//! In-memory collision backend
//!
//! Brute-force implementation of [`SpatialQuery`], [`RayCaster`] and
//! [`OverlapProbe`] over a slot map of colliders. Adequate for tests, tools
//! and small levels; larger games plug their own broad phase behind the
//! same traits.

use slotmap::SlotMap;

use crate::foundation::math::{Transform2D, Vec2};
use super::collision_layers::LayerMask;
use super::primitives::{ring_contains, ring_edges, ring_overlaps_circle, Ray2D, RayHit};
use super::query::{OverlapProbe, QueryError, RayCaster, SpatialQuery};
use super::sat;
use super::shape::{BoxBody, Collider};
use super::ColliderHandle;

/// Hits this close to a ray origin on a boundary it is leaving are ignored
const RAY_START_EPSILON: f32 = 1e-4;

/// Collider storage answering overlap and ray queries
#[derive(Debug, Default)]
pub struct CollisionWorld {
    colliders: SlotMap<ColliderHandle, Collider>,
    unavailable: Option<String>,
}

impl CollisionWorld {
    /// Create an empty world
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a collider, returning its handle
    pub fn insert(&mut self, collider: Collider) -> ColliderHandle {
        self.colliders.insert(collider)
    }

    /// Remove a collider
    pub fn remove(&mut self, handle: ColliderHandle) -> Option<Collider> {
        self.colliders.remove(handle)
    }

    /// Get a collider
    pub fn get(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.colliders.get(handle)
    }

    /// Get a collider for modification (e.g. to move it)
    pub fn get_mut(&mut self, handle: ColliderHandle) -> Option<&mut Collider> {
        self.colliders.get_mut(handle)
    }

    /// Number of colliders
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    /// Whether the world has no colliders
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Iterate all colliders
    pub fn iter(&self) -> impl Iterator<Item = (ColliderHandle, &Collider)> {
        self.colliders.iter()
    }

    /// Take the backend offline; every query fails until it is restored
    pub fn set_unavailable(&mut self, reason: impl Into<String>) {
        self.unavailable = Some(reason.into());
    }

    /// Bring the backend back online
    pub fn set_available(&mut self) {
        self.unavailable = None;
    }

    fn check_available(&self) -> Result<(), QueryError> {
        match &self.unavailable {
            Some(reason) => Err(QueryError::BackendUnavailable(reason.clone())),
            None => Ok(()),
        }
    }

    fn on_mask(&self, mask: LayerMask) -> impl Iterator<Item = (ColliderHandle, &Collider)> {
        self.colliders.iter().filter(move |(_, c)| mask.selects(c.layer))
    }
}

fn collider_overlaps_circle(collider: &Collider, center: Vec2, radius: f32) -> bool {
    if let Some(ring) = collider.world_ring() {
        return ring_overlaps_circle(&ring, center, radius);
    }
    match collider.world_circle() {
        Some((c, r)) => (c - center).norm_squared() <= (r + radius) * (r + radius),
        None => false,
    }
}

fn collider_ray_distance(collider: &Collider, ray: &Ray2D) -> Option<f32> {
    if let Some(ring) = collider.world_ring() {
        // A ray starting on the boundary and heading out is not blocked by it
        let leaving = !ring_contains(&ring, ray.point_at(RAY_START_EPSILON));
        return ring_edges(&ring)
            .filter_map(|(a, b)| ray.intersect_segment(a, b))
            .filter(|&t| !(leaving && t <= RAY_START_EPSILON))
            .min_by(f32::total_cmp);
    }
    collider
        .world_circle()
        .and_then(|(center, radius)| ray.intersect_circle(center, radius))
}

fn collider_overlaps_box(collider: &Collider, probe: &BoxBody) -> bool {
    if let Some(ring) = collider.world_ring() {
        return sat::box_intersects(probe, &ring);
    }
    let Some((center, radius)) = collider.world_circle() else {
        return false;
    };

    // Closest point of the box to the circle center, in box space
    let local = probe.transform.inverse_transform_point(center);
    let h = probe.half_extents();
    let clamped = Vec2::new(local.x.clamp(-h.x, h.x), local.y.clamp(-h.y, h.y));
    let closest = probe.transform.transform_point(clamped);
    (closest - center).norm_squared() < radius * radius
}

impl SpatialQuery for CollisionWorld {
    fn overlap_circle(&self, center: Vec2, radius: f32, mask: LayerMask) -> Result<Vec<Collider>, QueryError> {
        self.check_available()?;
        Ok(self
            .on_mask(mask)
            .filter(|(_, c)| collider_overlaps_circle(c, center, radius))
            .map(|(_, c)| c.clone())
            .collect())
    }
}

impl RayCaster for CollisionWorld {
    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Result<Option<RayHit>, QueryError> {
        self.check_available()?;
        let Some(ray) = Ray2D::new(origin, direction) else {
            return Ok(None);
        };

        let nearest = self
            .on_mask(mask)
            .filter_map(|(handle, c)| collider_ray_distance(c, &ray).map(|t| (handle, t)))
            .filter(|&(_, t)| t <= max_distance)
            .min_by(|a, b| a.1.total_cmp(&b.1));

        Ok(nearest.map(|(collider, distance)| RayHit {
            collider,
            distance,
            point: ray.point_at(distance),
        }))
    }
}

impl OverlapProbe for CollisionWorld {
    fn overlap_box(&self, center: Vec2, half_extents: Vec2, rotation: f32, mask: LayerMask)
        -> Result<bool, QueryError>
    {
        self.check_available()?;
        let probe = BoxBody {
            size: half_extents * 2.0,
            transform: Transform2D::from_position_rotation(center, rotation),
        };
        Ok(self.on_mask(mask).any(|(_, c)| collider_overlaps_box(c, &probe)))
    }
}
