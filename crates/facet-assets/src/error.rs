use std::path::PathBuf;

/// Errors that can occur while loading a mesh.
///
/// Every error aborts the whole load call; no partial buffers are
/// ever returned.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("asset not found: {0}")]
    NotFound(PathBuf),

    #[error("unsupported mesh format: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("I/O error loading '{0}': {1}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("line {line}: cannot parse '{token}' as a number")]
    MalformedNumber { line: usize, token: String },

    #[error("line {line}: malformed face reference '{token}'")]
    MalformedFace { line: usize, token: String },

    #[error("line {line}: face with {count} vertices, at least 3 required")]
    DegenerateFace { line: usize, count: usize },

    #[error("scene has no <triangles> or <polylist> primitive")]
    UnsupportedPrimitive,

    #[error("polylist entry with {count} vertices, only triangles are supported")]
    UnsupportedPolygonSize { count: usize },

    #[error("scene file contains no <mesh> element")]
    MissingMesh,

    #[error("cannot resolve POSITION source ({0})")]
    MissingPositionSource(String),

    #[error("{kind} index {index} out of range, {count} available")]
    IndexOutOfRange {
        kind: &'static str,
        index: usize,
        count: usize,
    },

    #[error("malformed scene XML: {0}")]
    MalformedXml(String),
}
