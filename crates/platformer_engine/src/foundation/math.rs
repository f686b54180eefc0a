//! Math utilities and types
//!
//! Provides the 2D math types shared by the lighting and physics modules.

use serde::{Deserialize, Serialize};

pub use nalgebra::{Rotation2, Vector2};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 2D rotation type
pub type Rot2 = Rotation2<f32>;

/// Position, rotation and scale of an object in the plane
///
/// Points are mapped local → world as `position + R * (scale ⊙ p)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform2D {
    /// Position in world space
    pub position: Vec2,

    /// Counter-clockwise rotation in radians
    pub rotation: f32,

    /// Per-axis scale factors
    pub scale: Vec2,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            position: Vec2::zeros(),
            rotation: 0.0,
            scale: Vec2::new(1.0, 1.0),
        }
    }
}

impl Transform2D {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec2, rotation: f32) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Builder-style scale override
    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    /// Rotation as a nalgebra rotation
    pub fn rotation_matrix(&self) -> Rot2 {
        Rot2::new(self.rotation)
    }

    /// Local +Y axis expressed in world space (unit length)
    pub fn up(&self) -> Vec2 {
        self.rotation_matrix() * Vec2::y()
    }

    /// Local +X axis expressed in world space (unit length)
    pub fn right(&self) -> Vec2 {
        self.rotation_matrix() * Vec2::x()
    }

    /// Map a local point to world space
    pub fn transform_point(&self, point: Vec2) -> Vec2 {
        self.position + self.rotation_matrix() * point.component_mul(&self.scale)
    }

    /// Map a world point to local space
    pub fn inverse_transform_point(&self, point: Vec2) -> Vec2 {
        let unrotated = self.rotation_matrix().inverse() * (point - self.position);
        unrotated.component_div(&self.scale)
    }

    /// Rotate a local direction into world space (scale is ignored)
    pub fn transform_direction(&self, direction: Vec2) -> Vec2 {
        self.rotation_matrix() * direction
    }

    /// Rotate a world direction into local space (scale is ignored)
    pub fn inverse_transform_direction(&self, direction: Vec2) -> Vec2 {
        self.rotation_matrix().inverse() * direction
    }
}

/// Fast monotonic substitute for `atan2`, used only for ordering
///
/// Returns `dy / (|dx| + |dy|)`, mirrored to `2 - p` on the negative x half.
/// Axis directions map to -y → -1 (or 3), +x → 0, +y → 1, -x → 2.
/// The zero vector yields NaN.
pub fn pseudo_angle(dx: f32, dy: f32) -> f32 {
    let p = dy / (dx.abs() + dy.abs());
    if dx < 0.0 {
        2.0 - p
    } else {
        p
    }
}

/// Math utility functions
pub mod utils {
    /// Whether two floats are equal within a scale-aware tolerance
    pub fn approximately(a: f32, b: f32) -> bool {
        let tolerance = (1e-6 * a.abs().max(b.abs())).max(f32::EPSILON * 8.0);
        (a - b).abs() < tolerance
    }
}
