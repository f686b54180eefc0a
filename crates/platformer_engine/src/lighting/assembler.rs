//! Per-occluder sampling and shadow edge continuation
//!
//! Every vertex of an occluder is sampled. The clockwise-first and
//! clockwise-last samples are tagged; when either is a true silhouette
//! corner, a second ray is cast just past it to find where the lit region
//! resumes behind the occluder.

use crate::foundation::math::Vec2;
use crate::physics::{QueryError, RayCaster, WorldPolygon};
use super::sample::{LightSample, Side};
use super::sampler::RaySampler;
use super::sorter::{extremes, sort_descending};

/// Builds the unordered boundary sample list of one light
pub struct Assembler<'a, R: RayCaster + ?Sized> {
    sampler: RaySampler,
    backend: &'a R,
    continuation_nudge: f32,
}

impl<'a, R: RayCaster + ?Sized> Assembler<'a, R> {
    /// Assembler casting through `backend`
    pub fn new(sampler: RaySampler, backend: &'a R, continuation_nudge: f32) -> Self {
        Self {
            sampler,
            backend,
            continuation_nudge,
        }
    }

    /// Samples of every occluder, plus continuation points
    pub fn assemble(&self, occluders: &[WorldPolygon]) -> Result<Vec<LightSample>, QueryError> {
        let mut samples = Vec::new();
        for occluder in occluders {
            self.add_occluder(occluder, &mut samples)?;
        }
        Ok(samples)
    }

    /// Append the samples contributed by one occluder
    ///
    /// An occluder with no vertex inside the radius contributes nothing.
    pub fn add_occluder(&self, occluder: &WorldPolygon, out: &mut Vec<LightSample>) -> Result<(), QueryError> {
        let mut local = Vec::with_capacity(occluder.vertices.len());
        for &vertex in &occluder.vertices {
            if let Some(sample) = self.sampler.sample(self.backend, vertex)? {
                local.push(sample);
            }
        }
        sort_descending(&mut local);

        let Some((near, far)) = extremes(&local) else {
            return Ok(());
        };
        local[near] = local[near].tagged(Side::Near);
        if far != near {
            local[far] = local[far].tagged(Side::Far);
        }

        let near_sample = local[near];
        let far_sample = (far != near).then(|| local[far]);
        out.extend_from_slice(&local);

        for extreme in std::iter::once(near_sample).chain(far_sample) {
            if extreme.is_endpoint {
                out.push(self.continue_past(extreme)?);
            }
        }
        Ok(())
    }

    /// Boundary point found by casting on past a silhouette corner
    fn continue_past(&self, corner: LightSample) -> Result<LightSample, QueryError> {
        let origin = self.sampler.origin();
        let radius = self.sampler.radius();
        let transform = self.sampler.transform();

        let corner_world = transform.transform_point(corner.position);
        let direction = corner_world - origin;
        let from = corner_world + direction * self.continuation_nudge;
        let remaining = radius - (from - origin).norm();

        let hit = if remaining > 0.0 {
            self.sampler.probe(self.backend, from, direction, remaining)?
        } else {
            None
        };

        let mut point = hit.unwrap_or_else(|| origin + rim_direction(direction) * radius);
        let offset = point - origin;
        if offset.norm_squared() > radius * radius {
            point = origin + offset.normalize() * radius;
        }

        Ok(LightSample::new(transform.inverse_transform_point(point), false))
    }
}

fn rim_direction(direction: Vec2) -> Vec2 {
    direction.try_normalize(f32::EPSILON).unwrap_or_else(Vec2::x)
}
