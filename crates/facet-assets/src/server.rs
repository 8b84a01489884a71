use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::info;

use facet_core::Color;

use crate::buffer::MeshBuffer;
use crate::error::AssetError;
use crate::handle::{AssetId, MeshHandle};
use crate::loader;

/// Cache key: the resolved file path plus the exact fallback color
/// bits. The color is baked into the buffers, so the same file loaded
/// with a different color is a different asset.
type MeshKey = (PathBuf, [u32; 4]);

fn color_bits(color: Color) -> [u32; 4] {
    let [r, g, b, a] = color.to_array();
    [r.to_bits(), g.to_bits(), b.to_bits(), a.to_bits()]
}

/// Central mesh registry. Loads, caches, and provides access to mesh
/// buffers by handle.
pub struct AssetServer {
    base_path: PathBuf,
    meshes: HashMap<AssetId, MeshBuffer>,
    key_to_mesh: HashMap<MeshKey, MeshHandle>,
}

impl AssetServer {
    /// Create a new AssetServer rooted at the given base path.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        let base_path = base_path.into();
        info!("AssetServer created with base path: {}", base_path.display());
        Self {
            base_path,
            meshes: HashMap::new(),
            key_to_mesh: HashMap::new(),
        }
    }

    /// Resolve a relative asset path against the base path.
    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_path.join(path)
        }
    }

    /// Load a mesh file (.obj or .dae) and return a handle to its
    /// canonical buffers. Subsequent loads of the same path with the
    /// same fallback color return the cached handle.
    pub fn load_mesh(
        &mut self,
        path: &Path,
        fallback_color: Color,
    ) -> Result<MeshHandle, AssetError> {
        let full_path = self.resolve(path);
        let key = (full_path.clone(), color_bits(fallback_color));

        if let Some(&handle) = self.key_to_mesh.get(&key) {
            return Ok(handle);
        }

        if !full_path.exists() {
            return Err(AssetError::NotFound(full_path));
        }

        let mesh = loader::load_mesh(&full_path, fallback_color)?;

        let handle = MeshHandle::next();
        self.meshes.insert(handle.id(), mesh);
        self.key_to_mesh.insert(key, handle);

        Ok(handle)
    }

    /// Register an already-built mesh (e.g. a procedural primitive)
    /// and return a handle to it.
    pub fn add_mesh(&mut self, mesh: MeshBuffer) -> MeshHandle {
        let handle = MeshHandle::next();
        self.meshes.insert(handle.id(), mesh);
        handle
    }

    /// Get a reference to a loaded mesh by its handle.
    pub fn get_mesh(&self, handle: MeshHandle) -> Option<&MeshBuffer> {
        self.meshes.get(&handle.id())
    }

    /// Check if a mesh handle refers to a loaded asset.
    pub fn is_mesh_loaded(&self, handle: MeshHandle) -> bool {
        self.meshes.contains_key(&handle.id())
    }

    /// The base path this server resolves relative paths against.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_returns_not_found() {
        let mut server = AssetServer::new("/nonexistent");
        let result = server.load_mesh(Path::new("does_not_exist.obj"), Color::WHITE);
        match result.unwrap_err() {
            AssetError::NotFound(_) => {}
            other => panic!("expected NotFound, got: {:?}", other),
        }
    }

    #[test]
    fn resolve_absolute_path() {
        let server = AssetServer::new("/home/user/assets");
        assert_eq!(
            server.resolve(Path::new("/absolute/model.obj")),
            PathBuf::from("/absolute/model.obj")
        );
    }

    #[test]
    fn resolve_relative_path() {
        let server = AssetServer::new("/home/user/assets");
        assert_eq!(
            server.resolve(Path::new("models/box.obj")),
            PathBuf::from("/home/user/assets/models/box.obj")
        );
    }

    #[test]
    fn repeat_loads_share_a_handle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tri.obj");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3").unwrap();

        let mut server = AssetServer::new(dir.path());
        let a = server.load_mesh(Path::new("tri.obj"), Color::WHITE).unwrap();
        let b = server.load_mesh(Path::new("tri.obj"), Color::WHITE).unwrap();
        assert_eq!(a, b);
        assert!(server.is_mesh_loaded(a));
        assert_eq!(server.get_mesh(a).unwrap().vertex_count(), 3);

        // A different fallback color is a different cached asset.
        let c = server.load_mesh(Path::new("tri.obj"), Color::RED).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn procedural_meshes_get_handles_too() {
        let mut server = AssetServer::new("/assets");
        let handle = server.add_mesh(MeshBuffer::cube(Color::BLUE));
        assert_eq!(server.get_mesh(handle).unwrap().vertex_count(), 24);
    }
}
