//! # Platformer Engine
//!
//! 2D dynamic lighting and box-vs-polygon collision for platformer games.
//!
//! ## Features
//!
//! - **Light meshes**: visibility polygons around point lights, with shadow
//!   edges extended past occluder silhouettes, fan-triangulated for rendering
//! - **SAT collision**: minimum-translation resolution of a box against
//!   convex polygons, plus ground/ceiling contact probes
//! - **Character controller**: walk/run, gravity, jumps with a grace period
//!   and a held-jump boost
//! - **Pluggable backend**: all geometry queries go through traits; an
//!   in-memory [`physics::CollisionWorld`] is included
//!
//! ## Quick Start
//!
//! ```rust
//! use platformer_engine::prelude::*;
//!
//! let mut world = CollisionWorld::new();
//! world.insert(Collider::new(
//!     ColliderShape::rectangle_polygon(Vec2::new(1.0, 1.0)),
//!     Transform2D::from_position(Vec2::new(3.0, 0.0)),
//! ));
//!
//! let mesh = build_light_mesh(&world, &Transform2D::identity(), &LightConfig::new(10.0))?;
//! assert_eq!(mesh.triangle_count(), 6);
//! # Ok::<(), LightError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod controller;
pub mod foundation;
pub mod lighting;
pub mod physics;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{CollisionConfig, Config, ConfigError, ControllerConfig, EngineConfig, LightConfig},
        controller::{ControllerInput, PlatformerController},
        foundation::math::{Transform2D, Vec2},
        lighting::{
            build_light_mesh, DynamicLight, LightError, LightMesh, LightVertex, NoCulling, TickOutcome,
            ViewportCuller, VisibilityCuller,
        },
        physics::{
            BoxBody, Collider, ColliderShape, CollisionError, CollisionManager, CollisionWorld, LayerMask,
            OverlapProbe, PhysicsBackend, QueryError, RayCaster, SpatialQuery,
        },
    };
}
