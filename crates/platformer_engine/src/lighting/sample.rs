//! Boundary samples of the lit region

use crate::foundation::math::{pseudo_angle, Vec2};

/// Which angular extreme of its occluder a sample is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    /// Neither extreme, or not from an occluder at all
    #[default]
    None,
    /// First vertex of the occluder in clockwise order
    Near,
    /// Last vertex of the occluder in clockwise order
    Far,
}

/// One point on the boundary of the lit region
///
/// Rebuilt every tick; never stored across ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSample {
    /// Position in the light's local frame
    pub position: Vec2,
    /// Pseudo-angle of `position`, used only for ordering
    pub angle: f32,
    /// The ray reached an occluder vertex unobstructed
    pub is_endpoint: bool,
    /// Extreme tag within the source occluder
    pub side: Side,
}

impl LightSample {
    /// Sample at a local position, keyed by its pseudo-angle
    pub fn new(position: Vec2, is_endpoint: bool) -> Self {
        Self {
            position,
            angle: pseudo_angle(position.x, position.y),
            is_endpoint,
            side: Side::None,
        }
    }

    /// Squared distance from the light origin
    pub fn distance_squared(&self) -> f32 {
        self.position.norm_squared()
    }

    pub(crate) fn tagged(mut self, side: Side) -> Self {
        self.side = side;
        self
    }
}
