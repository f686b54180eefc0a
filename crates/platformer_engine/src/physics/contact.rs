//! Ground and ceiling contact probes
//!
//! A thin box slightly narrower than the body is placed on its bottom edge
//! and another on its top edge. Whether each overlaps level geometry tells
//! the controller if it stands on something or bumped its head.

use crate::config::CollisionConfig;
use crate::foundation::math::Vec2;
use super::collision_layers::LayerMask;
use super::query::{OverlapProbe, QueryError};
use super::shape::BoxBody;

/// Result of probing around a body
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contacts {
    /// Something is directly below the body
    pub ground: bool,
    /// Something is directly above the body
    pub ceiling: bool,
}

/// Narrow-band overlap probes along the top and bottom of a body
#[derive(Debug, Clone, PartialEq)]
pub struct ContactProbe {
    /// Layers that count as ground or ceiling
    pub layer_mask: LayerMask,
    /// Probe width as a fraction of the body width
    pub width_factor: f32,
    /// Full height of each probe
    pub thickness: f32,
}

impl ContactProbe {
    /// Probe with the given mask and proportions
    pub fn new(layer_mask: LayerMask, width_factor: f32, thickness: f32) -> Self {
        Self {
            layer_mask,
            width_factor,
            thickness,
        }
    }

    /// Probe configured from the collision settings
    pub fn from_config(config: &CollisionConfig) -> Self {
        Self::new(config.layer_mask, config.probe_width_factor, config.probe_thickness)
    }

    /// Half extents shared by both probes
    pub fn half_extents(&self, body: &BoxBody) -> Vec2 {
        let width = body.size.x * body.transform.scale.x * self.width_factor;
        Vec2::new(width, self.thickness) * 0.5
    }

    /// Centers of the ground and ceiling probes
    pub fn probe_centers(&self, body: &BoxBody) -> (Vec2, Vec2) {
        let x = body.transform.position.x;
        (Vec2::new(x, body.min_y()), Vec2::new(x, body.max_y()))
    }

    /// Probe below and above the body
    pub fn check<P: OverlapProbe + ?Sized>(&self, body: &BoxBody, backend: &P) -> Result<Contacts, QueryError> {
        let half_extents = self.half_extents(body);
        let rotation = body.transform.rotation;
        let (ground_center, ceiling_center) = self.probe_centers(body);

        let contacts = Contacts {
            ground: backend.overlap_box(ground_center, half_extents, rotation, self.layer_mask)?,
            ceiling: backend.overlap_box(ceiling_center, half_extents, rotation, self.layer_mask)?,
        };
        log::trace!("Contacts at {:?}: {:?}", body.transform.position, contacts);
        Ok(contacts)
    }
}

impl Default for ContactProbe {
    fn default() -> Self {
        Self::from_config(&CollisionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Transform2D;
    use crate::physics::shape::{Collider, ColliderShape};
    use crate::physics::CollisionWorld;
    use approx::assert_relative_eq;

    fn floor_world() -> CollisionWorld {
        let mut world = CollisionWorld::new();
        world.insert(Collider::new(
            ColliderShape::rectangle_polygon(Vec2::new(20.0, 1.0)),
            Transform2D::from_position(Vec2::new(0.0, -0.5)),
        ));
        world
    }

    #[test]
    fn test_probe_geometry() {
        let probe = ContactProbe::default();
        let body = BoxBody {
            size: Vec2::new(1.0, 2.0),
            transform: Transform2D::from_position(Vec2::new(3.0, 1.0)).with_scale(Vec2::new(2.0, 1.0)),
        };

        assert_relative_eq!(probe.half_extents(&body), Vec2::new(0.899, 0.0025), epsilon = 1e-6);
        let (ground, ceiling) = probe.probe_centers(&body);
        assert_relative_eq!(ground, Vec2::new(3.0, 0.0), epsilon = 1e-6);
        assert_relative_eq!(ceiling, Vec2::new(3.0, 2.0), epsilon = 1e-6);
    }

    #[test]
    fn test_standing_on_floor() {
        let world = floor_world();
        let body = BoxBody::new(Vec2::new(0.0, 1.0), Vec2::new(1.0, 2.0));

        let contacts = ContactProbe::default().check(&body, &world).unwrap();
        assert_eq!(contacts, Contacts { ground: true, ceiling: false });
    }

    #[test]
    fn test_airborne() {
        let world = floor_world();
        let body = BoxBody::new(Vec2::new(0.0, 3.0), Vec2::new(1.0, 2.0));

        let contacts = ContactProbe::default().check(&body, &world).unwrap();
        assert_eq!(contacts, Contacts::default());
    }

    #[test]
    fn test_ceiling_contact() {
        let mut world = floor_world();
        world.insert(Collider::new(
            ColliderShape::rectangle_polygon(Vec2::new(20.0, 1.0)),
            Transform2D::from_position(Vec2::new(0.0, 2.5)),
        ));
        let body = BoxBody::new(Vec2::new(0.0, 1.0), Vec2::new(1.0, 2.0));

        let contacts = ContactProbe::default().check(&body, &world).unwrap();
        assert_eq!(contacts, Contacts { ground: true, ceiling: true });
    }

    #[test]
    fn test_mask_excludes_geometry() {
        let world = floor_world();
        let body = BoxBody::new(Vec2::new(0.0, 1.0), Vec2::new(1.0, 2.0));
        let probe = ContactProbe::new(LayerMask::ENVIRONMENT, 0.899, 0.005);

        assert!(!probe.check(&body, &world).unwrap().ground);
    }

    #[test]
    fn test_backend_failure_propagates() {
        let mut world = floor_world();
        world.set_unavailable("test");
        let body = BoxBody::new(Vec2::new(0.0, 1.0), Vec2::new(1.0, 2.0));

        assert!(ContactProbe::default().check(&body, &world).is_err());
    }
}
