//! Platformer character controller
//!
//! Kinematic movement for a box-shaped character: run/walk speeds, gravity
//! while airborne, edge-triggered jumps with a short grace period after
//! leaving a ledge, and a one-time boost when jump is held. Collision
//! response is delegated to [`CollisionManager`].

use crate::config::{CollisionConfig, ControllerConfig, EngineConfig};
use crate::foundation::math::Vec2;
use crate::physics::{BoxBody, CollisionError, CollisionManager, ContactProbe, Contacts, OverlapProbe, SpatialQuery};

/// Player input for one tick, already polled by the host
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControllerInput {
    /// Horizontal axis in [-1, 1]
    pub horizontal: f32,
    /// Run modifier held
    pub run: bool,
    /// Jump button held
    pub jump: bool,
}

impl ControllerInput {
    /// Input with only a horizontal axis value
    pub fn horizontal(horizontal: f32) -> Self {
        Self {
            horizontal,
            ..Default::default()
        }
    }

    /// Input with the jump button held
    pub fn jump() -> Self {
        Self {
            jump: true,
            ..Default::default()
        }
    }
}

/// Box character moved by input, gravity and collisions
#[derive(Debug, Clone)]
pub struct PlatformerController {
    /// The character's collision box
    pub body: BoxBody,
    config: ControllerConfig,
    probe: ContactProbe,
    collision: CollisionManager,

    velocity: Vec2,
    horizontal: f32,
    running: bool,
    should_jump: bool,
    last_jump_input: bool,
    jump_held_time: f32,
    grounded: bool,
    last_grounded: bool,
    has_high_jumped: bool,
    phantom_jump_timer: f32,
}

impl PlatformerController {
    /// Controller for `body` with explicit movement and collision settings
    pub fn new(body: BoxBody, config: ControllerConfig, collision: CollisionConfig) -> Self {
        Self {
            body,
            config,
            probe: ContactProbe::from_config(&collision),
            collision: CollisionManager::new(collision),
            velocity: Vec2::zeros(),
            horizontal: 0.0,
            running: false,
            should_jump: false,
            last_jump_input: false,
            jump_held_time: 0.0,
            grounded: false,
            last_grounded: false,
            has_high_jumped: false,
            phantom_jump_timer: 0.0,
        }
    }

    /// Controller using the settings of an engine configuration
    pub fn from_config(body: BoxBody, config: &EngineConfig) -> Self {
        Self::new(body, config.controller.clone(), config.collision.clone())
    }

    /// Current velocity in units per second
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Override the velocity (knockback, spawning)
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Whether the character stood on something during the last tick
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Current world position
    pub fn position(&self) -> Vec2 {
        self.body.transform.position
    }

    /// Movement settings
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Advance the character by `dt` seconds
    ///
    /// Returns the displacement applied by collision resolution. If the
    /// backend fails the character keeps the position it had before the tick.
    pub fn tick<B>(&mut self, input: ControllerInput, dt: f32, backend: &B) -> Result<Vec2, CollisionError>
    where
        B: SpatialQuery + OverlapProbe + ?Sized,
    {
        let contacts = self.probe.check(&self.body, backend)?;

        self.handle_input(input, dt);
        self.last_grounded = self.grounded;
        self.apply_contacts(contacts);
        if self.phantom_jump_timer > 0.0 {
            self.phantom_jump_timer -= dt;
        }

        let start = self.body.transform.position;
        self.apply_movement(dt);

        self.collision.tick(&mut self.body, backend).map_err(|e| {
            log::warn!("Character at {:?} skipped its update: {}", start, e);
            self.body.transform.position = start;
            e
        })
    }

    fn handle_input(&mut self, input: ControllerInput, dt: f32) {
        self.horizontal = input.horizontal;
        self.running = input.run;
        self.should_jump = input.jump && !self.last_jump_input;
        self.last_jump_input = input.jump;

        if input.jump {
            self.jump_held_time += dt;
        } else {
            self.jump_held_time = 0.0;
        }
    }

    fn apply_contacts(&mut self, contacts: Contacts) {
        if contacts.ground {
            if self.velocity.y < 0.0 {
                self.velocity.y = 0.0;
            }
            self.grounded = true;
            self.has_high_jumped = false;
            self.jump_held_time = 0.0;
        } else {
            self.grounded = false;
            if self.last_grounded {
                self.phantom_jump_timer = self.config.phantom_jump_time;
            }
        }

        if contacts.ceiling && self.velocity.y > 0.0 {
            self.velocity.y = 0.0;
        }
    }

    fn apply_movement(&mut self, dt: f32) {
        let speed = if self.running { self.config.run_speed } else { self.config.walk_speed };

        // Airborne, releasing the stick keeps the current momentum
        if self.grounded || self.horizontal != 0.0 {
            self.velocity.x = self.horizontal * speed;
        }

        if !self.grounded {
            self.velocity.y += self.config.gravity * dt;
        }

        if self.should_jump && (self.grounded || self.phantom_jump_timer > 0.0) {
            log::trace!("Jump from {:?}", self.body.transform.position);
            self.phantom_jump_timer = 0.0;
            self.velocity.y = self.config.jump_force;
        }

        if self.jump_held_time >= self.config.high_jump_time && !self.has_high_jumped && self.velocity.y > 0.0 {
            self.velocity.y += self.config.high_jump_velocity;
            self.has_high_jumped = true;
        }

        self.body.transform.position += self.velocity * dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Transform2D;
    use crate::physics::{Collider, ColliderShape, CollisionWorld};
    use approx::assert_relative_eq;

    const DT: f32 = 0.02;

    fn slab(center: Vec2, size: Vec2) -> Collider {
        Collider::new(ColliderShape::rectangle_polygon(size), Transform2D::from_position(center))
    }

    fn floor_world() -> CollisionWorld {
        let mut world = CollisionWorld::new();
        world.insert(slab(Vec2::new(0.0, -0.5), Vec2::new(40.0, 1.0)));
        world
    }

    fn character_at(position: Vec2) -> PlatformerController {
        PlatformerController::from_config(BoxBody::new(position, Vec2::new(1.0, 2.0)), &EngineConfig::default())
    }

    fn standing() -> PlatformerController {
        character_at(Vec2::new(0.0, 1.0))
    }

    #[test]
    fn test_gravity_while_airborne() {
        let world = CollisionWorld::new();
        let mut character = character_at(Vec2::new(0.0, 10.0));

        character.tick(ControllerInput::default(), 0.1, &world).unwrap();

        assert!(!character.is_grounded());
        assert_relative_eq!(character.velocity().y, -0.98, epsilon = 1e-5);
        assert_relative_eq!(character.position().y, 10.0 - 0.098, epsilon = 1e-5);
    }

    #[test]
    fn test_falls_and_lands_on_floor() {
        let world = floor_world();
        let mut character = character_at(Vec2::new(0.0, 1.5));

        for _ in 0..100 {
            character.tick(ControllerInput::default(), DT, &world).unwrap();
        }

        assert!(character.is_grounded());
        assert_eq!(character.velocity().y, 0.0);
        assert_relative_eq!(character.position().y, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_walk_and_run_speeds() {
        let world = floor_world();
        let mut character = standing();

        character.tick(ControllerInput::horizontal(1.0), DT, &world).unwrap();
        assert_relative_eq!(character.velocity().x, 1.0);

        let run = ControllerInput {
            horizontal: -1.0,
            run: true,
            jump: false,
        };
        character.tick(run, DT, &world).unwrap();
        assert_relative_eq!(character.velocity().x, -2.0);
    }

    #[test]
    fn test_grounded_release_stops_but_airborne_keeps_momentum() {
        let world = floor_world();
        let mut grounded = standing();
        grounded.tick(ControllerInput::horizontal(1.0), DT, &world).unwrap();
        grounded.tick(ControllerInput::default(), DT, &world).unwrap();
        assert_eq!(grounded.velocity().x, 0.0);

        let empty = CollisionWorld::new();
        let mut airborne = character_at(Vec2::new(0.0, 10.0));
        airborne.tick(ControllerInput::horizontal(1.0), DT, &empty).unwrap();
        airborne.tick(ControllerInput::default(), DT, &empty).unwrap();
        assert_relative_eq!(airborne.velocity().x, 1.0);
    }

    #[test]
    fn test_jump_only_on_press() {
        let world = floor_world();
        let mut character = standing();

        character.tick(ControllerInput::jump(), DT, &world).unwrap();
        assert_relative_eq!(character.velocity().y, 5.0);
        assert!(character.position().y > 1.0);

        // Still holding: no second jump, gravity takes over
        character.tick(ControllerInput::jump(), DT, &world).unwrap();
        assert_relative_eq!(character.velocity().y, 5.0 - 9.8 * DT, epsilon = 1e-5);
    }

    #[test]
    fn test_no_jump_in_mid_air() {
        let world = CollisionWorld::new();
        let mut character = character_at(Vec2::new(0.0, 10.0));

        character.tick(ControllerInput::jump(), DT, &world).unwrap();

        assert!(character.velocity().y < 0.0);
    }

    #[test]
    fn test_high_jump_boost_once() {
        let world = floor_world();
        let mut held = standing();
        let mut tapped = standing();

        held.tick(ControllerInput::jump(), DT, &world).unwrap();
        tapped.tick(ControllerInput::jump(), DT, &world).unwrap();
        for _ in 0..4 {
            held.tick(ControllerInput::jump(), DT, &world).unwrap();
            tapped.tick(ControllerInput::default(), DT, &world).unwrap();
        }

        assert_relative_eq!(held.velocity().y, 5.0 + 1.5 - 9.8 * DT * 4.0, epsilon = 1e-4);
        assert_relative_eq!(tapped.velocity().y, 5.0 - 9.8 * DT * 4.0, epsilon = 1e-4);
    }

    #[test]
    fn test_phantom_jump_after_leaving_ground() {
        let mut world = CollisionWorld::new();
        let floor = world.insert(slab(Vec2::new(0.0, -0.5), Vec2::new(40.0, 1.0)));
        let mut character = standing();

        character.tick(ControllerInput::default(), DT, &world).unwrap();
        assert!(character.is_grounded());

        world.remove(floor);
        character.tick(ControllerInput::default(), DT, &world).unwrap();
        assert!(!character.is_grounded());

        character.tick(ControllerInput::jump(), DT, &world).unwrap();
        assert_relative_eq!(character.velocity().y, 5.0);
    }

    #[test]
    fn test_no_phantom_jump_when_disabled() {
        let mut world = CollisionWorld::new();
        let floor = world.insert(slab(Vec2::new(0.0, -0.5), Vec2::new(40.0, 1.0)));
        let config = EngineConfig {
            controller: ControllerConfig::default().with_phantom_jump_time(0.0),
            ..Default::default()
        };
        let mut character = PlatformerController::from_config(BoxBody::new(Vec2::new(0.0, 1.0), Vec2::new(1.0, 2.0)), &config);

        character.tick(ControllerInput::default(), DT, &world).unwrap();
        world.remove(floor);
        character.tick(ControllerInput::default(), DT, &world).unwrap();
        character.tick(ControllerInput::jump(), DT, &world).unwrap();

        assert!(character.velocity().y < 0.0);
    }

    #[test]
    fn test_ceiling_stops_rise() {
        let mut world = floor_world();
        world.insert(slab(Vec2::new(0.0, 2.5), Vec2::new(40.0, 1.0)));
        let mut character = standing();

        character.tick(ControllerInput::jump(), DT, &world).unwrap();
        assert_relative_eq!(character.position().y, 1.0, epsilon = 1e-4);

        character.tick(ControllerInput::jump(), DT, &world).unwrap();
        assert_eq!(character.velocity().y, 0.0);
    }

    #[test]
    fn test_backend_failure_keeps_position() {
        let mut world = floor_world();
        let mut character = character_at(Vec2::new(0.0, 5.0));
        world.set_unavailable("test");

        assert!(character.tick(ControllerInput::horizontal(1.0), DT, &world).is_err());
        assert_eq!(character.position(), Vec2::new(0.0, 5.0));
    }
}
