//! Facet Assets - mesh loading into indexed draw buffers
//!
//! Reads Wavefront OBJ and COLLADA (.dae) files and converts either
//! into one canonical representation: a deduplicated interleaved
//! vertex buffer (position + normal), a parallel RGBA color buffer,
//! and a `u32` index buffer ready for indexed draws.
//!
//! Both parsers emit the same intermediate [`RawMesh`]; the builder
//! fan-triangulates polygons, substitutes computed flat normals where
//! per-vertex normals are missing, and collapses bit-identical
//! (position, normal) pairs into single indexed vertices.
//!
//! Loads are synchronous, CPU-bound, and share no state; independent
//! loads may run on separate threads without coordination.

mod buffer;
mod builder;
mod collada;
mod error;
mod geometry;
mod handle;
mod loader;
mod obj;
mod primitives;
mod server;

pub use buffer::{MeshBuffer, COLOR_STRIDE, VERTEX_STRIDE};
pub use builder::build_mesh;
pub use collada::parse_collada;
pub use error::AssetError;
pub use geometry::{Face, FaceVertex, RawMesh};
pub use handle::{AssetId, MeshHandle};
pub use loader::{load_collada_mesh, load_mesh, load_obj_mesh, MeshFormat};
pub use obj::parse_obj;
pub use server::AssetServer;
