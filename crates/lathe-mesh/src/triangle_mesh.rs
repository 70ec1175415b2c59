use lathe_math::aabb::Aabb3;
use lathe_math::{Point2, Point3, Vector3};

/// Renderer-facing triangle buffers: positions, normals, UVs and a flat index list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    pub positions: Vec<Point3>,
    pub normals: Vec<Vector3>,
    pub indices: Vec<u32>,
    pub uvs: Vec<Point2>,
}

impl TriangleMesh {
    /// Allocate zeroed buffers of fixed size.
    pub fn with_sizes(vertex_count: usize, index_count: usize) -> Self {
        Self {
            positions: vec![Point3::ZERO; vertex_count],
            normals: vec![Vector3::ZERO; vertex_count],
            indices: vec![0; index_count],
            uvs: vec![Point2::ZERO; vertex_count],
        }
    }

    /// Number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Recompute smooth per-vertex normals from the current positions.
    ///
    /// Face normals are area weighted; degenerate triangles contribute nothing.
    pub fn compute_normals(&mut self) {
        self.compute_normals_welded(&[]);
    }

    /// Like [`compute_normals`](Self::compute_normals), but each `(a, b)` pair of
    /// coincident vertices receives the combined normal of both.
    pub fn compute_normals_welded(&mut self, welds: &[(u32, u32)]) {
        self.normals.clear();
        self.normals.resize(self.positions.len(), Vector3::ZERO);

        for tri in self.indices.chunks_exact(3) {
            let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let p0 = self.positions[i0];
            let normal = (self.positions[i1] - p0).cross(self.positions[i2] - p0);
            self.normals[i0] += normal;
            self.normals[i1] += normal;
            self.normals[i2] += normal;
        }

        for &(a, b) in welds {
            let (a, b) = (a as usize, b as usize);
            let sum = self.normals[a] + self.normals[b];
            self.normals[a] = sum;
            self.normals[b] = sum;
        }

        for n in &mut self.normals {
            let len = n.length();
            if len > 1e-12 {
                *n /= len;
            }
        }
    }

    /// Compute the axis-aligned bounding box of all positions.
    pub fn bounding_box(&self) -> Aabb3 {
        Aabb3::from_points(&self.positions).unwrap_or_default()
    }
}
