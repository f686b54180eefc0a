//! Fan-triangulated light mesh
//!
//! The light origin is vertex 0; the ordered boundary follows. Triangle `i`
//! joins the origin with boundary points `i` and `i + 1`, and the last
//! triangle closes the fan back onto the first boundary point.

use bytemuck::{Pod, Zeroable};

use crate::foundation::math::Vec2;
use super::sample::LightSample;
use super::LightError;

/// Vertex layout uploaded to the renderer
///
/// `#[repr(C)]` keeps the layout fixed for GPU buffer uploads.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct LightVertex {
    /// Position in the light's local frame
    pub position: [f32; 2],
    /// Texture coordinates (equal to the local position)
    pub uv: [f32; 2],
}

impl LightVertex {
    /// Vertex at a local position
    pub fn new(position: Vec2) -> Self {
        Self {
            position: [position.x, position.y],
            uv: [position.x, position.y],
        }
    }
}

/// Axis-aligned bounds of a mesh in the light's local frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshBounds {
    /// Center of the box
    pub center: Vec2,
    /// Half size of the box
    pub extents: Vec2,
}

/// Triangle fan covering the lit region
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LightMesh {
    /// Origin followed by the boundary, in order
    pub vertices: Vec<LightVertex>,
    /// Three indices per triangle
    pub indices: Vec<u32>,
}

impl LightMesh {
    /// Fan over ordered boundary samples
    ///
    /// The origin vertex is always present; no samples yields it alone with
    /// no triangles. Fails when the boundary has more points than a `u32`
    /// index can address.
    pub fn from_samples(samples: &[LightSample]) -> Result<Self, LightError> {
        let count = samples.len();
        let n = fan_index(count)?;
        let mut vertices = Vec::with_capacity(count + 1);
        vertices.push(LightVertex::new(Vec2::zeros()));
        vertices.extend(samples.iter().map(|s| LightVertex::new(s.position)));

        let mut indices = Vec::with_capacity(3 * count);
        if n > 0 {
            for i in 0..n - 1 {
                indices.extend_from_slice(&[0, i + 1, i + 2]);
            }
            indices.extend_from_slice(&[0, n, 1]);
        }

        Ok(Self { vertices, indices })
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Number of boundary points (vertices minus the origin)
    pub fn boundary_len(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }

    /// Whether the mesh has no triangles
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Boundary points in order, in the light's local frame
    pub fn boundary(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.vertices.iter().skip(1).map(|v| Vec2::new(v.position[0], v.position[1]))
    }

    /// Vertex data as raw bytes
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index data as raw bytes
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Bounds of all vertices, centered on their box
    ///
    /// An empty mesh has zero-size bounds at the origin.
    pub fn bounds(&self) -> MeshBounds {
        let mut points = self.vertices.iter().map(|v| Vec2::new(v.position[0], v.position[1]));
        let Some(first) = points.next() else {
            return MeshBounds {
                center: Vec2::zeros(),
                extents: Vec2::zeros(),
            };
        };

        let (min, max) = points.fold((first, first), |(min, max), p| (min.inf(&p), max.sup(&p)));
        MeshBounds {
            center: (min + max) * 0.5,
            extents: (max - min) * 0.5,
        }
    }
}

fn fan_index(count: usize) -> Result<u32, LightError> {
    u32::try_from(count).map_err(|_| LightError::MeshTooLarge(count))
}
