//! # Engine Settings
//!
//! All tunables of the light and collision pipelines in one place. Every
//! structure has sensible defaults, builder-style setters and a `validate`
//! method that rejects values the pipelines cannot work with.

use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};
use crate::physics::LayerMask;

/// # Light Configuration
///
/// Parameters of a single dynamic point light.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    /// Radius of the lit region in world units
    pub radius: f32,
    /// Layers whose polygons occlude this light
    pub layer_mask: LayerMask,
    /// Pseudo-angle difference under which two samples share a ray
    pub angle_epsilon: f32,
    /// Squared-distance band within which a ray hit counts as the target vertex
    pub magnitude_epsilon: f32,
    /// Fraction of the origin→vertex vector a continuation ray starts past the vertex
    pub continuation_nudge: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            radius: 20.0,
            layer_mask: LayerMask::DEFAULT,
            angle_epsilon: 1e-5,
            magnitude_epsilon: 0.15,
            continuation_nudge: 0.005,
        }
    }
}

impl LightConfig {
    /// Create a light configuration with the given radius and defaults elsewhere
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            ..Default::default()
        }
    }

    /// Set the occluder layer mask
    pub fn with_layer_mask(mut self, layer_mask: LayerMask) -> Self {
        self.layer_mask = layer_mask;
        self
    }

    /// Set the angular tolerance of the reconciler
    pub fn with_angle_epsilon(mut self, angle_epsilon: f32) -> Self {
        self.angle_epsilon = angle_epsilon;
        self
    }

    /// Set the endpoint classification tolerance
    pub fn with_magnitude_epsilon(mut self, magnitude_epsilon: f32) -> Self {
        self.magnitude_epsilon = magnitude_epsilon;
        self
    }

    /// Set the continuation ray nudge fraction
    pub fn with_continuation_nudge(mut self, continuation_nudge: f32) -> Self {
        self.continuation_nudge = continuation_nudge;
        self
    }

    /// Reject values the light pipeline cannot use
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("light.radius", self.radius)?;
        non_negative("light.angle_epsilon", self.angle_epsilon)?;
        non_negative("light.magnitude_epsilon", self.magnitude_epsilon)?;
        positive("light.continuation_nudge", self.continuation_nudge)
    }
}

impl Config for LightConfig {}

/// # Collision Configuration
///
/// Parameters of the box-vs-polygon collision manager and contact probes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Layers the body collides with
    pub layer_mask: LayerMask,
    /// Radius of the broad-phase circle around the body
    pub query_radius: f32,
    /// Probe width as a fraction of the body width
    pub probe_width_factor: f32,
    /// Height of the ground/ceiling probe boxes
    pub probe_thickness: f32,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            layer_mask: LayerMask::DEFAULT,
            query_radius: 5.0,
            probe_width_factor: 0.899,
            probe_thickness: 0.005,
        }
    }
}

impl CollisionConfig {
    /// Set the collision layer mask
    pub fn with_layer_mask(mut self, layer_mask: LayerMask) -> Self {
        self.layer_mask = layer_mask;
        self
    }

    /// Set the broad-phase query radius
    pub fn with_query_radius(mut self, query_radius: f32) -> Self {
        self.query_radius = query_radius;
        self
    }

    /// Reject values the collision manager cannot use
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("collision.query_radius", self.query_radius)?;
        positive("collision.probe_width_factor", self.probe_width_factor)?;
        positive("collision.probe_thickness", self.probe_thickness)
    }
}

impl Config for CollisionConfig {}

/// # Controller Configuration
///
/// Movement tuning of the platformer character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Vertical acceleration while airborne (negative is down)
    pub gravity: f32,
    /// Horizontal speed when walking
    pub walk_speed: f32,
    /// Horizontal speed when running
    pub run_speed: f32,
    /// Vertical velocity set when a jump starts
    pub jump_force: f32,
    /// How long jump must be held before the high-jump boost
    pub high_jump_time: f32,
    /// Extra vertical velocity added once by a high jump
    pub high_jump_velocity: f32,
    /// Window after leaving the ground during which a jump is still allowed
    pub phantom_jump_time: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            gravity: -9.8,
            walk_speed: 1.0,
            run_speed: 2.0,
            jump_force: 5.0,
            high_jump_time: 0.05,
            high_jump_velocity: 1.5,
            phantom_jump_time: 0.1,
        }
    }
}

impl ControllerConfig {
    /// Set walk and run speeds
    pub fn with_speeds(mut self, walk_speed: f32, run_speed: f32) -> Self {
        self.walk_speed = walk_speed;
        self.run_speed = run_speed;
        self
    }

    /// Set the jump impulse and high-jump parameters
    pub fn with_jump(mut self, jump_force: f32, high_jump_time: f32, high_jump_velocity: f32) -> Self {
        self.jump_force = jump_force;
        self.high_jump_time = high_jump_time;
        self.high_jump_velocity = high_jump_velocity;
        self
    }

    /// Set the phantom jump window (0 disables phantom jumps)
    pub fn with_phantom_jump_time(mut self, phantom_jump_time: f32) -> Self {
        self.phantom_jump_time = phantom_jump_time;
        self
    }

    /// Reject values the controller cannot use
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("controller.walk_speed", self.walk_speed)?;
        non_negative("controller.run_speed", self.run_speed)?;
        non_negative("controller.high_jump_time", self.high_jump_time)?;
        non_negative("controller.phantom_jump_time", self.phantom_jump_time)
    }
}

impl Config for ControllerConfig {}

/// # Engine Configuration
///
/// Aggregate of every subsystem configuration, loadable from a single file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Light settings
    pub light: LightConfig,
    /// Collision settings
    pub collision: CollisionConfig,
    /// Character controller settings
    pub controller: ControllerConfig,
}

impl EngineConfig {
    /// Validate all subsystem configurations
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.light.validate()?;
        self.collision.validate()?;
        self.controller.validate()
    }
}

impl Config for EngineConfig {}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("expected a finite value > 0, got {value}"),
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("expected a finite value >= 0, got {value}"),
        })
    }
}
