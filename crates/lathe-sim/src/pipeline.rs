use bytemuck::{Pod, Zeroable};
use lathe_math::{Point2, Point3, Vector3};
use lathe_mesh::TriangleMesh;

/// Vertex with f32 data packed for GPU.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GpuVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl GpuVertex {
    /// Create a GPU vertex from mesh vertex data.
    pub fn from_mesh_vertex(pos: Point3, normal: Vector3, uv: Point2) -> Self {
        Self {
            position: pos.as_vec3().to_array(),
            normal: normal.as_vec3().to_array(),
            uv: uv.as_vec2().to_array(),
        }
    }
}

/// Interleaved render data for the host renderer.
#[derive(Debug, Clone, Default)]
pub struct RenderMesh {
    pub vertices: Vec<GpuVertex>,
    pub indices: Vec<u32>,
}

impl RenderMesh {
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Rewrite positions and normals in place after a refresh.
    ///
    /// The index buffer and UVs never change once a lathe mesh exists, so only
    /// the per-frame attributes are copied. Falls back to a full rebuild when
    /// the vertex count differs.
    pub fn update_from(&mut self, mesh: &TriangleMesh) {
        if self.vertices.len() != mesh.vertex_count() {
            *self = prepare_mesh(mesh);
            return;
        }
        for (v, (p, n)) in self
            .vertices
            .iter_mut()
            .zip(mesh.positions.iter().zip(&mesh.normals))
        {
            v.position = p.as_vec3().to_array();
            v.normal = n.as_vec3().to_array();
        }
    }
}

/// Convert a TriangleMesh to GPU-ready buffers.
pub fn prepare_mesh(mesh: &TriangleMesh) -> RenderMesh {
    let vertices = mesh
        .positions
        .iter()
        .enumerate()
        .map(|(i, &pos)| {
            let normal = mesh.normals.get(i).copied().unwrap_or(Vector3::Y);
            let uv = mesh.uvs.get(i).copied().unwrap_or(Point2::ZERO);
            GpuVertex::from_mesh_vertex(pos, normal, uv)
        })
        .collect();

    RenderMesh {
        vertices,
        indices: mesh.indices.clone(),
    }
}
