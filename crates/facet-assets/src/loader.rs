//! File-level load entry points.

use std::path::Path;

use tracing::{debug, info, warn};

use facet_core::Color;

use crate::buffer::MeshBuffer;
use crate::builder::build_mesh;
use crate::collada::parse_collada;
use crate::error::AssetError;
use crate::obj::parse_obj;

/// Supported mesh file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshFormat {
    Obj,
    Collada,
}

impl MeshFormat {
    /// Detect format from file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .and_then(|ext| match ext.as_str() {
                "obj" => Some(MeshFormat::Obj),
                "dae" => Some(MeshFormat::Collada),
                _ => None,
            })
    }
}

/// Load a mesh file, auto-detecting the format from its extension.
pub fn load_mesh(path: &Path, fallback_color: Color) -> Result<MeshBuffer, AssetError> {
    let format =
        MeshFormat::from_path(path).ok_or_else(|| AssetError::UnsupportedFormat(path.into()))?;
    match format {
        MeshFormat::Obj => load_obj_mesh(path, fallback_color),
        MeshFormat::Collada => load_collada_mesh(path, fallback_color),
    }
}

/// Load a Wavefront OBJ file into canonical indexed buffers.
pub fn load_obj_mesh(path: &Path, fallback_color: Color) -> Result<MeshBuffer, AssetError> {
    let text = read_source(path)?;
    let raw = parse_obj(&text)?;
    debug!(
        "OBJ '{}': {} positions, {} normals, {} faces",
        path.display(),
        raw.positions.len(),
        raw.normals.len(),
        raw.faces.len()
    );
    finish(path, build_mesh(&raw, fallback_color)?)
}

/// Load a COLLADA (.dae) file into canonical indexed buffers.
pub fn load_collada_mesh(path: &Path, fallback_color: Color) -> Result<MeshBuffer, AssetError> {
    let text = read_source(path)?;
    let raw = parse_collada(&text)?;
    debug!(
        "COLLADA '{}': {} positions, {} normals, {} faces",
        path.display(),
        raw.positions.len(),
        raw.normals.len(),
        raw.faces.len()
    );
    finish(path, build_mesh(&raw, fallback_color)?)
}

fn read_source(path: &Path) -> Result<String, AssetError> {
    std::fs::read_to_string(path).map_err(|e| AssetError::Io(path.to_path_buf(), e))
}

fn finish(path: &Path, mesh: MeshBuffer) -> Result<MeshBuffer, AssetError> {
    info!(
        "Loaded mesh '{}': {} vertices, {} triangles",
        path.display(),
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    if let Some(bounds) = mesh.bounds() {
        let dims = bounds.dimensions();
        debug!("Dimensions: {:.1} x {:.1} x {:.1}", dims.x, dims.y, dims.z);
        if bounds.max_dimension() < 0.1 {
            warn!(
                "Mesh largest dimension is {:.6} - may need scaling",
                bounds.max_dimension()
            );
        }
    }
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn format_detection() {
        assert_eq!(
            MeshFormat::from_path(Path::new("model.obj")),
            Some(MeshFormat::Obj)
        );
        assert_eq!(
            MeshFormat::from_path(Path::new("model.OBJ")),
            Some(MeshFormat::Obj)
        );
        assert_eq!(
            MeshFormat::from_path(Path::new("scene.dae")),
            Some(MeshFormat::Collada)
        );
        assert_eq!(MeshFormat::from_path(Path::new("scene.gltf")), None);
        assert_eq!(MeshFormat::from_path(Path::new("noext")), None);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_mesh(Path::new("model.stl"), Color::WHITE).unwrap_err();
        assert!(matches!(err, AssetError::UnsupportedFormat(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_obj_mesh(Path::new("/nonexistent/model.obj"), Color::WHITE).unwrap_err();
        assert!(matches!(err, AssetError::Io(_, _)));
    }

    #[test]
    fn loads_obj_from_disk() {
        let mut file = NamedTempFile::with_suffix(".obj").unwrap();
        writeln!(file, "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3").unwrap();

        let mesh = load_mesh(file.path(), Color::WHITE).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.indices(), &[0, 1, 2]);
    }
}
