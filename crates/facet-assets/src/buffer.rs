//! Canonical indexed mesh buffers.

use facet_core::Aabb;
use glam::Vec3;

/// Floats per vertex in the interleaved buffer: position xyz + normal xyz.
pub const VERTEX_STRIDE: usize = 6;

/// Floats per entry in the color buffer: rgba.
pub const COLOR_STRIDE: usize = 4;

/// Deduplicated mesh data ready for device upload.
///
/// `vertices` interleaves position and normal per unique vertex,
/// `colors` runs parallel to it with one RGBA entry per vertex, and
/// `indices` holds `u32` triangle corners. Invariants: every index is
/// less than `vertex_count()`, and the index count is a multiple of 3.
///
/// The renderer that receives this owns its lifetime from here on; the
/// loader keeps no reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffer {
    vertices: Vec<f32>,
    colors: Vec<f32>,
    indices: Vec<u32>,
}

impl MeshBuffer {
    pub(crate) fn new(vertices: Vec<f32>, colors: Vec<f32>, indices: Vec<u32>) -> Self {
        debug_assert_eq!(vertices.len() % VERTEX_STRIDE, 0);
        debug_assert_eq!(colors.len() % COLOR_STRIDE, 0);
        debug_assert_eq!(indices.len() % 3, 0);
        Self {
            vertices,
            colors,
            indices,
        }
    }

    /// Interleaved position + normal data, 6 floats per vertex.
    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    /// RGBA color data, 4 floats per vertex.
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    /// Triangle index data.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of unique vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / VERTEX_STRIDE
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Bounding box over vertex positions, `None` for an empty mesh.
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(
            self.vertices
                .chunks_exact(VERTEX_STRIDE)
                .map(|v| Vec3::new(v[0], v[1], v[2])),
        )
    }
}
