//! Wavefront OBJ parser.
//!
//! Only the geometry subset is read: `v`, `vn`, and `f` lines. Texture
//! coordinate slots in face references are skipped without validation,
//! and unknown tags are ignored so files with groups, materials, or
//! smoothing directives still load.

use crate::error::AssetError;
use crate::geometry::{Face, FaceVertex, RawMesh};

/// Parse OBJ text into the intermediate representation.
pub fn parse_obj(text: &str) -> Result<RawMesh, AssetError> {
    let mut mesh = RawMesh::default();

    for (i, raw_line) in text.lines().enumerate() {
        let line_no = i + 1;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut tokens = line.split_whitespace();
        // Non-empty line, so the tag is always present.
        let tag = tokens.next().unwrap_or_default();
        let data: Vec<&str> = tokens.collect();

        match tag {
            "v" => mesh.positions.push(parse_float3(&data, line_no)?),
            "vn" => mesh.normals.push(parse_float3(&data, line_no)?),
            "f" => mesh.faces.push(parse_face(&data, line_no)?),
            // Unknown tags (vt, g, s, usemtl, ...) are skipped.
            _ => {}
        }
    }

    Ok(mesh)
}

/// Parse the first three tokens as floats. `str::parse::<f32>` always
/// uses `.` as the decimal separator, independent of host locale.
fn parse_float3(data: &[&str], line: usize) -> Result<[f32; 3], AssetError> {
    let mut out = [0.0f32; 3];
    for (i, slot) in out.iter_mut().enumerate() {
        let token = data.get(i).copied().unwrap_or("");
        *slot = token.parse().map_err(|_| AssetError::MalformedNumber {
            line,
            token: token.to_string(),
        })?;
    }
    Ok(out)
}

/// Parse the per-vertex reference tokens of an `f` line.
fn parse_face(data: &[&str], line: usize) -> Result<Face, AssetError> {
    if data.len() < 3 {
        return Err(AssetError::DegenerateFace {
            line,
            count: data.len(),
        });
    }

    data.iter()
        .map(|token| parse_face_vertex(token, line))
        .collect()
}

/// Resolve one `v`, `v/t`, `v/t/n`, or `v//n` reference.
///
/// The position slot must be a positive integer. With two parts the
/// second slot is the normal; with three parts the normal sits in the
/// third slot and the middle (texture) slot is never validated. Empty
/// normal slots mean "no normal".
fn parse_face_vertex(token: &str, line: usize) -> Result<FaceVertex, AssetError> {
    let malformed = || AssetError::MalformedFace {
        line,
        token: token.to_string(),
    };

    let parts: Vec<&str> = token.split('/').collect();

    let position: usize = parts
        .first()
        .filter(|p| !p.is_empty())
        .and_then(|p| p.parse().ok())
        .ok_or_else(malformed)?;

    let normal_slot = match parts.len() {
        1 => None,
        2 => Some(parts[1]),
        3 => Some(parts[2]),
        _ => return Err(malformed()),
    };

    let normal = match normal_slot {
        Some(slot) if !slot.is_empty() => Some(slot.parse().map_err(|_| malformed())?),
        _ => None,
    };

    Ok(FaceVertex::new(position, normal))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_vertices_and_normals() {
        let mesh = parse_obj("v 1 2 3\nv 4.5 -6 7e1\nvn 0 1 0\n").unwrap();
        assert_eq!(mesh.positions, vec![[1.0, 2.0, 3.0], [4.5, -6.0, 70.0]]);
        assert_eq!(mesh.normals, vec![[0.0, 1.0, 0.0]]);
        assert!(mesh.faces.is_empty());
    }

    #[test]
    fn skips_comments_blanks_and_unknown_tags() {
        let text = "# header\n\n  \nmtllib cube.mtl\nvt 0.5 0.5\nv 0 0 0\ns off\n";
        let mesh = parse_obj(text).unwrap();
        assert_eq!(mesh.positions.len(), 1);
        assert!(mesh.normals.is_empty());
    }

    #[test]
    fn face_reference_grammar() {
        let mesh = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1 2/1 3/5/1\n").unwrap();
        let face = &mesh.faces[0];
        assert_eq!(face[0], FaceVertex::new(1, None));
        assert_eq!(face[1], FaceVertex::new(2, Some(1)));
        assert_eq!(face[2], FaceVertex::new(3, Some(1)));
    }

    #[test]
    fn empty_normal_slot_is_absent() {
        let mesh = parse_obj("f 1//  2// 3//\n").unwrap();
        for corner in &mesh.faces[0] {
            assert_eq!(corner.normal, None);
        }
    }

    #[test]
    fn texture_slot_is_ignored_not_validated() {
        // 'a' sits in the texture slot, which is never parsed.
        let mesh = parse_obj("f 1/a/2 2/a/2 3/a/2\n").unwrap();
        assert_eq!(mesh.faces[0][0], FaceVertex::new(1, Some(2)));
    }

    #[test]
    fn non_numeric_normal_slot_is_rejected() {
        let err = parse_obj("f 1/a 2/a 3/a\n").unwrap_err();
        assert!(matches!(err, AssetError::MalformedFace { line: 1, .. }));
    }

    #[test]
    fn non_numeric_position_is_rejected() {
        let err = parse_obj("f x 2 3\n").unwrap_err();
        assert!(matches!(err, AssetError::MalformedFace { .. }));
    }

    #[test]
    fn relative_references_are_rejected() {
        let err = parse_obj("v 0 0 0\nf -1 -2 -3\n").unwrap_err();
        assert!(matches!(err, AssetError::MalformedFace { line: 2, .. }));
    }

    #[test]
    fn short_face_is_degenerate_and_reports_line() {
        let err = parse_obj("v 0 0 0\nv 1 0 0\nf 1 2\n").unwrap_err();
        assert!(matches!(err, AssetError::DegenerateFace { line: 3, count: 2 }));
    }

    #[test]
    fn malformed_number_reports_line() {
        let err = parse_obj("v 0 0 0\nv 1 oops 2\n").unwrap_err();
        match err {
            AssetError::MalformedNumber { line, token } => {
                assert_eq!(line, 2);
                assert_eq!(token, "oops");
            }
            other => panic!("expected MalformedNumber, got: {other:?}"),
        }
    }

    #[test]
    fn missing_vertex_component_is_malformed() {
        let err = parse_obj("v 1 2\n").unwrap_err();
        assert!(matches!(err, AssetError::MalformedNumber { line: 1, .. }));
    }

    #[test]
    fn ngon_faces_are_kept_whole() {
        let mesh = parse_obj("f 1 2 3 4 5\n").unwrap();
        assert_eq!(mesh.faces[0].len(), 5);
    }
}
