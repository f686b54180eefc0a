//! Headless platformer demo
//!
//! Builds a small level, drops a character onto it and runs a few seconds of
//! ticks while a light follows the character, logging what happens.
//! Pass a `.toml` or `.ron` engine config path as the first argument to
//! override the defaults.

use platformer_engine::foundation::logging;
use platformer_engine::prelude::*;

const DT: f32 = 1.0 / 60.0;
const TICKS: usize = 240;

fn load_config() -> Result<EngineConfig, ConfigError> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading config from {}", path);
            EngineConfig::load_from_file(path)?
        }
        None => EngineConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn build_level() -> CollisionWorld {
    let mut world = CollisionWorld::new();
    let ground = LayerMask::DEFAULT | LayerMask::ENVIRONMENT;

    // Floor
    world.insert(
        Collider::new(
            ColliderShape::rectangle_polygon(Vec2::new(60.0, 1.0)),
            Transform2D::from_position(Vec2::new(0.0, -0.5)),
        )
        .with_layer(ground),
    );

    // Crates to walk into and to cast shadows
    for x in [4.0, 9.0] {
        world.insert(
            Collider::new(
                ColliderShape::rectangle_polygon(Vec2::new(1.0, 1.0)),
                Transform2D::from_position(Vec2::new(x, 0.5)),
            )
            .with_layer(ground),
        );
    }

    // Sloped platform
    world.insert(
        Collider::new(
            ColliderShape::polygon([Vec2::new(-2.0, 0.0), Vec2::new(2.0, 0.0), Vec2::new(2.0, 1.0)]),
            Transform2D::from_position(Vec2::new(-6.0, 2.0)),
        )
        .with_layer(ground),
    );

    // Lamp post: reported by queries, ignored by lights and collisions
    world.insert(
        Collider::new(ColliderShape::Circle(0.3), Transform2D::from_position(Vec2::new(-3.0, 3.0)))
            .with_layer(ground),
    );

    world
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    log::info!("Starting platformer demo");

    let config = load_config()?;
    let world = build_level();
    log::info!("Level built with {} colliders", world.len());

    let mut character = PlatformerController::from_config(BoxBody::new(Vec2::new(0.0, 3.0), Vec2::new(0.8, 1.6)), &config);
    let mut light = DynamicLight::new(Transform2D::from_position(Vec2::new(0.0, 4.0)), config.light.clone());
    let mut view = ViewportCuller::new(Vec2::zeros(), Vec2::new(32.0, 18.0));

    for tick in 0..TICKS {
        let input = ControllerInput {
            horizontal: 1.0,
            run: tick > TICKS / 2,
            jump: (60..70).contains(&tick),
        };

        let pushed = character.tick(input, DT, &world)?;
        if pushed != Vec2::zeros() {
            log::debug!("Tick {}: collision pushed character by {:?}", tick, pushed);
        }

        view.set_center(character.position());
        light.set_position(character.position() + Vec2::new(0.0, 1.0));
        light.tick(&world, &view)?;

        if tick % 60 == 0 {
            let mesh = light.mesh();
            log::info!(
                "Tick {}: character at {:?} (grounded: {}), light mesh {} vertices / {} triangles",
                tick,
                character.position(),
                character.is_grounded(),
                mesh.vertices.len(),
                mesh.triangle_count()
            );
        }
    }

    log::info!("Demo finished");
    Ok(())
}
