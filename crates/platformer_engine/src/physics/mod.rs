//! Physics module for collision queries and response
//!
//! Provides the query traits the light and platformer pipelines consume, an
//! in-memory backend implementing them, and separating-axis resolution of a
//! box body against convex polygons.

pub mod collision_layers;
pub mod collision_manager;
pub mod contact;
pub mod primitives;
pub mod query;
pub mod sat;
pub mod shape;
pub mod world;

slotmap::new_key_type! {
    /// Handle to a collider stored in a [`CollisionWorld`]
    pub struct ColliderHandle;
}

pub use collision_layers::LayerMask;
pub use collision_manager::{CollisionError, CollisionManager};
pub use contact::{ContactProbe, Contacts};
pub use primitives::{Ray2D, RayHit};
pub use query::{query_polygons, OverlapProbe, PhysicsBackend, QueryError, RayCaster, SpatialQuery};
pub use sat::{resolve_collision, separation_vector};
pub use shape::{BoxBody, Collider, ColliderShape, WorldPolygon};
pub use world::CollisionWorld;
