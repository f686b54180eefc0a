//! Ray sampling of occluder vertices

use crate::config::LightConfig;
use crate::foundation::math::{Transform2D, Vec2};
use crate::physics::{LayerMask, QueryError, RayCaster};
use super::sample::LightSample;

/// Samples this close to the light are dropped
const DEGENERATE_LENGTH_SQ: f32 = 1e-10;

/// Casts rays from the light toward target points
#[derive(Debug, Clone, Copy)]
pub struct RaySampler {
    transform: Transform2D,
    radius: f32,
    layer_mask: LayerMask,
    magnitude_epsilon: f32,
}

impl RaySampler {
    /// Sampler for a light placed at `transform`
    pub fn new(transform: Transform2D, config: &LightConfig) -> Self {
        Self {
            transform,
            radius: config.radius,
            layer_mask: config.layer_mask,
            magnitude_epsilon: config.magnitude_epsilon,
        }
    }

    /// World position of the light
    pub fn origin(&self) -> Vec2 {
        self.transform.position
    }

    /// Light radius
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Light transform
    pub fn transform(&self) -> &Transform2D {
        &self.transform
    }

    /// Layers the rays stop on
    pub fn layer_mask(&self) -> LayerMask {
        self.layer_mask
    }

    /// Cast toward `target` (world space) and classify the result
    ///
    /// A hit close enough to the target counts as reaching it. Returns
    /// `None` when the resulting point lies outside the light radius, or on
    /// the light itself where it has no direction to order by.
    pub fn sample<R: RayCaster + ?Sized>(&self, backend: &R, target: Vec2) -> Result<Option<LightSample>, QueryError> {
        let origin = self.origin();
        let to_target = target - origin;
        let hit = backend.raycast(origin, to_target, self.radius, self.layer_mask)?;

        let (world, is_endpoint) = match hit {
            Some(hit) => {
                let reached = (to_target.norm_squared() - (hit.point - origin).norm_squared()).abs()
                    <= self.magnitude_epsilon;
                (hit.point, reached)
            }
            None => (target, true),
        };

        let local = self.transform.inverse_transform_point(world);
        let length_sq = local.norm_squared();
        if length_sq > self.radius * self.radius || length_sq <= DEGENERATE_LENGTH_SQ {
            return Ok(None);
        }
        Ok(Some(LightSample::new(local, is_endpoint)))
    }

    /// Cast `direction` from `from` for `max_distance`, returning the hit point
    pub(crate) fn probe<R: RayCaster + ?Sized>(
        &self,
        backend: &R,
        from: Vec2,
        direction: Vec2,
        max_distance: f32,
    ) -> Result<Option<Vec2>, QueryError> {
        Ok(backend
            .raycast(from, direction, max_distance, self.layer_mask)?
            .map(|hit| hit.point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{Collider, ColliderShape, CollisionWorld};
    use approx::assert_relative_eq;

    fn world_with_square() -> CollisionWorld {
        let mut world = CollisionWorld::new();
        world.insert(Collider::new(
            ColliderShape::rectangle_polygon(Vec2::new(1.0, 1.0)),
            Transform2D::from_position(Vec2::new(3.0, 0.0)),
        ));
        world
    }

    #[test]
    fn test_visible_corner_is_endpoint() {
        let world = world_with_square();
        let sampler = RaySampler::new(Transform2D::identity(), &LightConfig::new(10.0));

        let sample = sampler.sample(&world, Vec2::new(2.5, 0.5)).unwrap().unwrap();

        assert!(sample.is_endpoint);
        assert_relative_eq!(sample.position, Vec2::new(2.5, 0.5), epsilon = 1e-5);
    }

    #[test]
    fn test_hidden_corner_is_occluded() {
        let world = world_with_square();
        let sampler = RaySampler::new(Transform2D::identity(), &LightConfig::new(10.0));

        let sample = sampler.sample(&world, Vec2::new(3.5, 0.5)).unwrap().unwrap();

        assert!(!sample.is_endpoint);
        assert_relative_eq!(sample.position.x, 2.5, epsilon = 1e-5);
        assert_relative_eq!(sample.position.y, 0.5 * 2.5 / 3.5, epsilon = 1e-5);
    }

    #[test]
    fn test_unobstructed_target_is_endpoint() {
        let world = CollisionWorld::new();
        let sampler = RaySampler::new(Transform2D::identity(), &LightConfig::new(10.0));

        let sample = sampler.sample(&world, Vec2::new(0.0, 4.0)).unwrap().unwrap();

        assert!(sample.is_endpoint);
        assert_eq!(sample.position, Vec2::new(0.0, 4.0));
        assert_relative_eq!(sample.angle, 1.0);
    }

    #[test]
    fn test_out_of_radius_discarded() {
        let world = CollisionWorld::new();
        let sampler = RaySampler::new(Transform2D::identity(), &LightConfig::new(10.0));

        assert!(sampler.sample(&world, Vec2::new(12.0, 0.0)).unwrap().is_none());
    }

    #[test]
    fn test_position_is_light_local() {
        let world = CollisionWorld::new();
        let transform = Transform2D::from_position_rotation(Vec2::new(10.0, 0.0), std::f32::consts::FRAC_PI_2);
        let sampler = RaySampler::new(transform, &LightConfig::new(10.0));

        let sample = sampler.sample(&world, Vec2::new(10.0, 3.0)).unwrap().unwrap();

        assert_relative_eq!(sample.position, Vec2::new(3.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_blocked_at_the_light_discarded() {
        let world = world_with_square();
        // Flush against the left face, aiming into the square
        let sampler = RaySampler::new(Transform2D::from_position(Vec2::new(2.5, 0.0)), &LightConfig::new(10.0));

        assert!(sampler.sample(&world, Vec2::new(3.5, 0.5)).unwrap().is_none());
    }

    #[test]
    fn test_backend_failure() {
        let mut world = world_with_square();
        world.set_unavailable("down");
        let sampler = RaySampler::new(Transform2D::identity(), &LightConfig::new(10.0));

        assert!(sampler.sample(&world, Vec2::new(2.5, 0.5)).is_err());
    }
}
