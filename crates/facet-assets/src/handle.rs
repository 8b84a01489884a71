use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for a loaded mesh.
pub type AssetId = u64;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// A cheap copyable token referencing a mesh buffer held by the
/// [`AssetServer`]. Handles stay valid for the life of the server that
/// issued them; the buffers themselves are fetched with
/// [`AssetServer::get_mesh`].
///
/// [`AssetServer`]: crate::AssetServer
/// [`AssetServer::get_mesh`]: crate::AssetServer::get_mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(AssetId);

impl MeshHandle {
    /// Allocate a handle with a fresh process-unique ID.
    pub(crate) fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The unique ID of this mesh.
    pub fn id(&self) -> AssetId {
        self.0
    }
}
