//! 2D dynamic lighting
//!
//! A point light's lit region is the visibility polygon around it, rebuilt
//! every tick from the occluders in range:
//!
//! 1. query polygons within the radius ([`query_polygons`])
//! 2. ray-sample every occluder vertex ([`RaySampler`])
//! 3. tag each occluder's angular extremes and continue past silhouette
//!    corners ([`Assembler`])
//! 4. sort clockwise by pseudo-angle and fix same-ray pairs ([`order_samples`])
//! 5. fan-triangulate ([`LightMesh`])
//!
//! [`query_polygons`]: crate::physics::query_polygons

pub mod assembler;
pub mod culling;
pub mod light;
pub mod mesh;
pub mod reconcile;
pub mod sample;
pub mod sampler;
pub mod sorter;


use thiserror::Error;

use crate::physics::QueryError;

pub use assembler::Assembler;
pub use culling::{NoCulling, ViewportCuller, VisibilityCuller};
pub use light::{build_boundary, build_light_mesh, DynamicLight, TickOutcome};
pub use mesh::{LightMesh, LightVertex, MeshBounds};
pub use reconcile::{order_samples, reconcile};
pub use sample::{LightSample, Side};
pub use sampler::RaySampler;
pub use sorter::{sort_descending, WrapFlags};

/// Errors that stop a light from rebuilding its mesh
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LightError {
    /// The collision backend failed
    #[error("Light query failed: {0}")]
    Query(#[from] QueryError),

    /// The light radius is zero, negative or not finite
    #[error("Invalid light radius: {0}")]
    InvalidRadius(f32),

    /// The boundary has more points than the index buffer can address
    #[error("Light mesh too large: {0} boundary points")]
    MeshTooLarge(usize),
}
