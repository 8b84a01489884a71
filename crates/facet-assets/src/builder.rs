//! Merge, triangulation, and vertex deduplication.
//!
//! Shared back half of every load path: both parsers hand their
//! [`RawMesh`] to [`build_mesh`], which fans polygons into triangles
//! and collapses repeated (position, normal) pairs into one indexed
//! vertex.

use std::collections::HashMap;

use glam::Vec3;

use facet_core::Color;

use crate::buffer::MeshBuffer;
use crate::error::AssetError;
use crate::geometry::{Face, RawMesh};

/// Dedup key: the raw bit patterns of the six geometry floats.
/// Bit-identical floats merge; near-equal floats stay distinct.
type VertexKey = [u32; 6];

fn vertex_key(position: [f32; 3], normal: [f32; 3]) -> VertexKey {
    [
        position[0].to_bits(),
        position[1].to_bits(),
        position[2].to_bits(),
        normal[0].to_bits(),
        normal[1].to_bits(),
        normal[2].to_bits(),
    ]
}

/// Build the canonical indexed buffers from parsed mesh data.
///
/// Faces with any missing or unresolvable normal reference get one
/// computed flat normal across the whole polygon. Faces with more than
/// three vertices are fan-triangulated in declaration order. The
/// fallback color is applied uniformly to every emitted vertex; it
/// never participates in deduplication.
pub fn build_mesh(raw: &RawMesh, fallback_color: Color) -> Result<MeshBuffer, AssetError> {
    let mut vertices: Vec<f32> = Vec::new();
    let mut colors: Vec<f32> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();
    let mut unique: HashMap<VertexKey, u32> = HashMap::new();

    let color = fallback_color.to_array();

    for face in &raw.faces {
        if face.len() < 3 {
            // Line 0 marks a face that did not come from a numbered
            // source line; the parsers report the real line themselves.
            return Err(AssetError::DegenerateFace {
                line: 0,
                count: face.len(),
            });
        }

        // All-or-nothing: per-vertex normals are used only when every
        // corner of the face resolves one.
        let face_has_normals = face
            .iter()
            .all(|fv| fv.normal.is_some_and(|n| raw.normal(n).is_some()));

        let flat_normal = if face_has_normals {
            None
        } else {
            Some(compute_flat_normal(raw, face)?)
        };

        // Fan triangulation: (0, i, i+1) preserving winding order.
        for i in 1..face.len() - 1 {
            for corner in [0, i, i + 1] {
                let fv = face[corner];
                let position =
                    raw.position(fv.position)
                        .ok_or(AssetError::IndexOutOfRange {
                            kind: "position",
                            index: fv.position,
                            count: raw.positions.len(),
                        })?;

                let normal = match flat_normal {
                    Some(n) => n,
                    // face_has_normals checked every reference already.
                    None => fv.normal.and_then(|n| raw.normal(n)).unwrap_or_default(),
                };

                let key = vertex_key(position, normal);
                let next = unique.len() as u32;
                let index = *unique.entry(key).or_insert_with(|| {
                    vertices.extend_from_slice(&position);
                    vertices.extend_from_slice(&normal);
                    colors.extend_from_slice(&color);
                    next
                });
                indices.push(index);
            }
        }
    }

    Ok(MeshBuffer::new(vertices, colors, indices))
}

/// One normal for the whole face, from the plane of its first three
/// vertices: normalize(cross(p1 - p0, p2 - p0)).
fn compute_flat_normal(raw: &RawMesh, face: &Face) -> Result<[f32; 3], AssetError> {
    let mut corners = [Vec3::ZERO; 3];
    for (slot, fv) in corners.iter_mut().zip(face.iter()) {
        *slot = Vec3::from(raw.position(fv.position).ok_or(
            AssetError::IndexOutOfRange {
                kind: "position",
                index: fv.position,
                count: raw.positions.len(),
            },
        )?);
    }
    let [a, b, c] = corners;
    Ok((b - a).cross(c - a).normalize().to_array())
}
