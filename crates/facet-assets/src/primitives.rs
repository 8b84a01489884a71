//! Procedural meshes emitted directly in the canonical buffer layout.

use facet_core::Color;

use crate::buffer::MeshBuffer;

/// Unit cube positions and normals, four vertices per face so each
/// face keeps its own flat normal. Counter clockwise is front facing.
#[rustfmt::skip]
const CUBE_VERTICES: [f32; 144] = [
    // top face
    -0.5,  0.5,  0.5,  0.0,  1.0,  0.0,
     0.5,  0.5,  0.5,  0.0,  1.0,  0.0,
     0.5,  0.5, -0.5,  0.0,  1.0,  0.0,
    -0.5,  0.5, -0.5,  0.0,  1.0,  0.0,
    // front face
    -0.5,  0.5,  0.5,  0.0,  0.0,  1.0,
    -0.5, -0.5,  0.5,  0.0,  0.0,  1.0,
     0.5, -0.5,  0.5,  0.0,  0.0,  1.0,
     0.5,  0.5,  0.5,  0.0,  0.0,  1.0,
    // left face
    -0.5,  0.5,  0.5, -1.0,  0.0,  0.0,
    -0.5,  0.5, -0.5, -1.0,  0.0,  0.0,
    -0.5, -0.5, -0.5, -1.0,  0.0,  0.0,
    -0.5, -0.5,  0.5, -1.0,  0.0,  0.0,
    // bottom face
    -0.5, -0.5,  0.5,  0.0, -1.0,  0.0,
     0.5, -0.5,  0.5,  0.0, -1.0,  0.0,
     0.5, -0.5, -0.5,  0.0, -1.0,  0.0,
    -0.5, -0.5, -0.5,  0.0, -1.0,  0.0,
    // back face
     0.5,  0.5, -0.5,  0.0,  0.0, -1.0,
    -0.5,  0.5, -0.5,  0.0,  0.0, -1.0,
    -0.5, -0.5, -0.5,  0.0,  0.0, -1.0,
     0.5, -0.5, -0.5,  0.0,  0.0, -1.0,
    // right face
     0.5,  0.5,  0.5,  1.0,  0.0,  0.0,
     0.5,  0.5, -0.5,  1.0,  0.0,  0.0,
     0.5, -0.5, -0.5,  1.0,  0.0,  0.0,
     0.5, -0.5,  0.5,  1.0,  0.0,  0.0,
];

#[rustfmt::skip]
const CUBE_INDICES: [u32; 36] = [
     0,  1,  2,   0,  2,  3,
     4,  5,  6,   4,  6,  7,
     8,  9, 10,  10, 11,  8,
    12, 14, 13,  12, 15, 14,
    17, 16, 19,  17, 19, 18,
    20, 22, 21,  20, 23, 22,
];

impl MeshBuffer {
    /// A unit cube centered at the origin with one color per face,
    /// ordered top, front, left, bottom, back, right.
    pub fn cube_with_face_colors(face_colors: [Color; 6]) -> Self {
        let mut colors = Vec::with_capacity(6 * 4 * 4);
        for face_color in face_colors {
            let rgba = face_color.to_array();
            for _ in 0..4 {
                colors.extend_from_slice(&rgba);
            }
        }
        Self::new(CUBE_VERTICES.to_vec(), colors, CUBE_INDICES.to_vec())
    }

    /// A unit cube painted one uniform color.
    pub fn cube(color: Color) -> Self {
        Self::cube_with_face_colors([color; 6])
    }

    /// A flat square in the XZ plane at y = 0, facing up, spanning
    /// `half_extent` from the origin on both axes.
    pub fn ground_quad(half_extent: f32, color: Color) -> Self {
        let h = half_extent;
        #[rustfmt::skip]
        let vertices = vec![
            -h, 0.0,  h,  0.0, 1.0, 0.0,
             h, 0.0,  h,  0.0, 1.0, 0.0,
             h, 0.0, -h,  0.0, 1.0, 0.0,
            -h, 0.0, -h,  0.0, 1.0, 0.0,
        ];
        let colors = color.to_array().repeat(4);
        Self::new(vertices, colors, vec![0, 1, 2, 0, 2, 3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn cube_layout() {
        let cube = MeshBuffer::cube_with_face_colors([
            Color::RED,
            Color::GREEN,
            Color::BLUE,
            Color::WHITE,
            Color::BLACK,
            Color::rgb(1.0, 1.0, 0.0),
        ]);
        assert_eq!(cube.vertex_count(), 24);
        assert_eq!(cube.triangle_count(), 12);
        assert_eq!(cube.colors().len(), 24 * 4);
        assert!(cube.indices().iter().all(|&i| (i as usize) < 24));

        // First face is red on all four corners.
        assert_eq!(&cube.colors()[..4], &[1.0, 0.0, 0.0, 1.0]);
        assert_eq!(&cube.colors()[12..16], &[1.0, 0.0, 0.0, 1.0]);

        let bounds = cube.bounds().unwrap();
        assert_eq!(bounds.min, Vec3::splat(-0.5));
        assert_eq!(bounds.max, Vec3::splat(0.5));
    }

    #[test]
    fn ground_quad_layout() {
        let quad = MeshBuffer::ground_quad(100.0, Color::GREEN);
        assert_eq!(quad.vertex_count(), 4);
        assert_eq!(quad.indices(), &[0, 1, 2, 0, 2, 3]);
        // Every vertex faces straight up.
        for v in quad.vertices().chunks_exact(6) {
            assert_eq!(&v[3..], &[0.0, 1.0, 0.0]);
        }
    }
}
