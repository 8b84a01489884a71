//! Format-agnostic intermediate representation.
//!
//! Both parsers produce a [`RawMesh`]; the builder consumes one without
//! knowing which format it came from. Adding a third format means
//! writing one more parser that emits this type, nothing else.

/// One corner of a polygon face.
///
/// References are 1-based, matching how both source formats count;
/// `normal: None` means the face vertex carries no normal and the
/// builder will substitute a computed flat normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceVertex {
    pub position: usize,
    pub normal: Option<usize>,
}

impl FaceVertex {
    pub fn new(position: usize, normal: Option<usize>) -> Self {
        Self { position, normal }
    }
}

/// An ordered polygon: at least 3 corners in file-declared winding order.
pub type Face = Vec<FaceVertex>;

/// Parsed mesh data before triangulation and deduplication.
#[derive(Debug, Clone, Default)]
pub struct RawMesh {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub faces: Vec<Face>,
}

impl RawMesh {
    /// Look up a 1-based position reference.
    pub(crate) fn position(&self, reference: usize) -> Option<[f32; 3]> {
        reference
            .checked_sub(1)
            .and_then(|i| self.positions.get(i))
            .copied()
    }

    /// Look up a 1-based normal reference.
    pub(crate) fn normal(&self, reference: usize) -> Option<[f32; 3]> {
        reference
            .checked_sub(1)
            .and_then(|i| self.normals.get(i))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_based_lookup() {
        let mesh = RawMesh {
            positions: vec![[1.0, 2.0, 3.0]],
            normals: vec![[0.0, 1.0, 0.0]],
            faces: vec![],
        };
        assert_eq!(mesh.position(1), Some([1.0, 2.0, 3.0]));
        assert_eq!(mesh.position(0), None);
        assert_eq!(mesh.position(2), None);
        assert_eq!(mesh.normal(1), Some([0.0, 1.0, 0.0]));
        assert_eq!(mesh.normal(0), None);
    }
}
