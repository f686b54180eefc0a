//! Light mesh construction and the per-tick light component

use crate::config::LightConfig;
use crate::foundation::math::{Transform2D, Vec2};
use crate::physics::{query_polygons, RayCaster, SpatialQuery};
use super::assembler::Assembler;
use super::culling::VisibilityCuller;
use super::mesh::{LightMesh, MeshBounds};
use super::reconcile::order_samples;
use super::sample::LightSample;
use super::sampler::RaySampler;
use super::LightError;

/// Ordered boundary of the region lit by a light placed at `transform`
///
/// Queries the occluders within the radius, samples their vertices, casts
/// continuation rays past silhouette corners and orders the result
/// clockwise. Positions are in the light's local frame.
pub fn build_boundary<B>(backend: &B, transform: &Transform2D, config: &LightConfig) -> Result<Vec<LightSample>, LightError>
where
    B: SpatialQuery + RayCaster + ?Sized,
{
    if !(config.radius.is_finite() && config.radius > 0.0) {
        return Err(LightError::InvalidRadius(config.radius));
    }

    let origin = transform.position;
    let occluders = query_polygons(backend, origin, config.radius, config.layer_mask)?;

    let sampler = RaySampler::new(*transform, config);
    let assembler = Assembler::new(sampler, backend, config.continuation_nudge);
    let mut samples = assembler.assemble(&occluders)?;
    order_samples(&mut samples, config.angle_epsilon);

    log::trace!(
        "Light at {:?}: {} occluders, {} boundary points",
        origin,
        occluders.len(),
        samples.len()
    );
    Ok(samples)
}

/// Build the visibility fan of a light placed at `transform`
pub fn build_light_mesh<B>(backend: &B, transform: &Transform2D, config: &LightConfig) -> Result<LightMesh, LightError>
where
    B: SpatialQuery + RayCaster + ?Sized,
{
    let samples = build_boundary(backend, transform, config)?;
    LightMesh::from_samples(&samples)
}

/// What a light tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The light was not visible and kept its previous mesh
    Culled,
    /// The mesh was rebuilt
    Rebuilt,
}

/// A point light owning its mesh between ticks
#[derive(Debug, Clone)]
pub struct DynamicLight {
    /// Placement of the light
    pub transform: Transform2D,
    config: LightConfig,
    mesh: LightMesh,
    bounds: MeshBounds,
}

impl DynamicLight {
    /// Create a light with an empty mesh
    pub fn new(transform: Transform2D, config: LightConfig) -> Self {
        Self {
            transform,
            config,
            mesh: LightMesh::default(),
            bounds: LightMesh::default().bounds(),
        }
    }

    /// Light settings
    pub fn config(&self) -> &LightConfig {
        &self.config
    }

    /// Replace the light settings; takes effect on the next tick
    pub fn set_config(&mut self, config: LightConfig) {
        self.config = config;
    }

    /// Move the light
    pub fn set_position(&mut self, position: Vec2) {
        self.transform.position = position;
    }

    /// The last successfully built mesh
    pub fn mesh(&self) -> &LightMesh {
        &self.mesh
    }

    /// Bounds of the last mesh, recentered on the light
    pub fn bounds(&self) -> MeshBounds {
        self.bounds
    }

    /// Rebuild the mesh unless the light is culled
    ///
    /// On failure the previous mesh is kept and the error returned.
    pub fn tick<B, C>(&mut self, backend: &B, culler: &C) -> Result<TickOutcome, LightError>
    where
        B: SpatialQuery + RayCaster + ?Sized,
        C: VisibilityCuller + ?Sized,
    {
        if !culler.is_visible(self.transform.position, self.config.radius) {
            return Ok(TickOutcome::Culled);
        }

        let mesh = build_light_mesh(backend, &self.transform, &self.config).map_err(|e| {
            log::warn!("Light at {:?} skipped its update: {}", self.transform.position, e);
            e
        })?;

        self.mesh = mesh;
        self.reset_bounds();
        Ok(TickOutcome::Rebuilt)
    }

    fn reset_bounds(&mut self) {
        let bounds = self.mesh.bounds();
        let reach = bounds.center.abs() + bounds.extents;
        self.bounds = MeshBounds {
            center: Vec2::zeros(),
            extents: reach,
        };
    }
}
