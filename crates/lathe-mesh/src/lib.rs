pub mod lathe_mesh;
pub mod profile;
pub mod triangle_mesh;

pub use lathe_mesh::{LatheMesh, LatheTopology};
pub use profile::{cross_section_factor, CarveRegion, ProfileGrid};
pub use triangle_mesh::TriangleMesh;
