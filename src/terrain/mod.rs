//! Procedural heightfield terrain.

mod mesh;
mod normals;

pub use mesh::{sample_coords, Heightfield, Vertex, FLAT_ELEVATION};
pub use normals::compute_vertex_normals;
