//! CPU mesh generation.
//!
//! Meshes are indexed triangle lists stored as parallel attribute arrays
//! (`MeshData`) and interleaved into `Vertex` only when uploaded.
//!
//! Conventions:
//! - right-handed, +Y up
//! - front faces wind counter-clockwise

mod data;
mod normals;
mod obj;
mod primitives;
mod terrain;
mod uv;
mod vertex;

pub use data::MeshData;
pub use normals::compute_surface_normals;
pub use obj::{fit_to_ground, load_obj, parse_obj};
pub use primitives::cuboid;
pub use terrain::{generate_terrain, generate_terrain_with, TerrainDesc};
pub use uv::{compute_projected_plane_uvs, UvPlane};
pub use vertex::Vertex;
