//! Capped tube mesh generated from a [`ProfileGrid`].
//!
//! Vertex layout, in order:
//! 1. tube: `radial + 1` spokes (the last one duplicates spoke 0 as the UV seam),
//!    each with `axial + 1` samples, spoke-major;
//! 2. bottom cap ring, `radial + 1` vertices at axial offset 0;
//! 3. top cap ring, `radial + 1` vertices at the full length;
//! 4. bottom cap centre, then top cap centre.
//!
//! The layout and index buffer are fixed at creation; refreshes only rewrite
//! positions, normals and bounds.

use std::f64::consts::TAU;

use lathe_core::{LatheError, Result};
use lathe_math::{Aabb3, DVec2, DVec3};

use crate::profile::ProfileGrid;
use crate::triangle_mesh::TriangleMesh;

/// Index arithmetic for a tube of fixed segment counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatheTopology {
    pub radial_segments: usize,
    pub axial_segments: usize,
}

impl LatheTopology {
    pub fn new(radial_segments: usize, axial_segments: usize) -> Self {
        Self {
            radial_segments,
            axial_segments,
        }
    }

    pub fn of(profile: &ProfileGrid) -> Self {
        Self::new(profile.radial_segments(), profile.axial_segments())
    }

    /// Vertices per ring, including the seam duplicate.
    pub fn ring_count(&self) -> usize {
        self.radial_segments + 1
    }

    pub fn tube_vertex_count(&self) -> usize {
        (self.axial_segments + 1) * self.ring_count()
    }

    pub fn vertex_count(&self) -> usize {
        (3 + self.axial_segments) * self.ring_count() + 2
    }

    /// Triangle slots in the index buffer.
    pub fn triangle_count(&self) -> usize {
        (self.axial_segments + 2) * self.radial_segments * 2
    }

    /// Triangles that make up the visible surface: tube cells plus both cap fans.
    ///
    /// The remaining `triangle_count() - surface_triangle_count()` slots are
    /// degenerate.
    pub fn surface_triangle_count(&self) -> usize {
        (self.axial_segments + 1) * self.radial_segments * 2
    }

    pub fn index_count(&self) -> usize {
        self.triangle_count() * 3
    }

    pub fn tube_index(&self, spoke: usize, sample: usize) -> u32 {
        (spoke * (self.axial_segments + 1) + sample) as u32
    }

    pub fn bottom_ring_index(&self, spoke: usize) -> u32 {
        (self.tube_vertex_count() + spoke) as u32
    }

    pub fn top_ring_index(&self, spoke: usize) -> u32 {
        (self.tube_vertex_count() + self.ring_count() + spoke) as u32
    }

    pub fn bottom_center_index(&self) -> u32 {
        (self.vertex_count() - 2) as u32
    }

    pub fn top_center_index(&self) -> u32 {
        (self.vertex_count() - 1) as u32
    }

    /// Pairs of coincident vertices along the seam (spoke 0 and spoke `radial`).
    pub fn seam_pairs(&self) -> Vec<(u32, u32)> {
        let last = self.radial_segments;
        let mut pairs: Vec<_> = (0..=self.axial_segments)
            .map(|j| (self.tube_index(0, j), self.tube_index(last, j)))
            .collect();
        pairs.push((self.bottom_ring_index(0), self.bottom_ring_index(last)));
        pairs.push((self.top_ring_index(0), self.top_ring_index(last)));
        pairs
    }

    /// Full index buffer: per spoke, the two cap fan triangles then the tube cells.
    ///
    /// Tube cells wind outward; the bottom fan faces -X and the top fan +X.
    pub fn build_indices(&self) -> Vec<u32> {
        let mut indices = Vec::with_capacity(self.index_count());
        let bottom_center = self.bottom_center_index();
        let top_center = self.top_center_index();
        let stride = (self.axial_segments + 1) as u32;

        for i in 0..self.radial_segments {
            indices.extend_from_slice(&[
                bottom_center,
                self.bottom_ring_index(i),
                self.bottom_ring_index(i + 1),
            ]);
            indices.extend_from_slice(&[
                top_center,
                self.top_ring_index(i + 1),
                self.top_ring_index(i),
            ]);

            for j in 0..self.axial_segments {
                let a = self.tube_index(i, j);
                indices.extend_from_slice(&[a, a + 1, a + stride]);
                indices.extend_from_slice(&[a + 1, a + stride + 1, a + stride]);
            }
        }

        indices.resize(self.index_count(), bottom_center);
        indices
    }
}

/// Owns the render buffers of one lathe stock.
#[derive(Debug, Clone)]
pub struct LatheMesh {
    topology: LatheTopology,
    length: f64,
    mesh: TriangleMesh,
    bounds: Aabb3,
    seam_pairs: Vec<(u32, u32)>,
}

impl LatheMesh {
    /// Allocate buffers sized for `profile` and fill them completely.
    pub fn create(profile: &ProfileGrid, length: f64) -> Result<Self> {
        if !(length.is_finite() && length > 0.0) {
            return Err(LatheError::InvalidConfig(format!(
                "length must be positive, got {length}"
            )));
        }

        let topology = LatheTopology::of(profile);
        let mut lathe = Self {
            topology,
            length,
            mesh: TriangleMesh::with_sizes(topology.vertex_count(), topology.index_count()),
            bounds: Aabb3::zero(),
            seam_pairs: topology.seam_pairs(),
        };
        lathe.refresh(profile, true)?;

        log::info!(
            "created lathe mesh: {} vertices, {} triangles ({} radial x {} axial)",
            lathe.mesh.vertex_count(),
            lathe.mesh.triangle_count(),
            topology.radial_segments,
            topology.axial_segments
        );
        Ok(lathe)
    }

    /// Rewrite vertex positions from `profile`, then bounds and smooth normals.
    ///
    /// With `initialize`, also writes UVs, seed normals and the index buffer.
    pub fn refresh(&mut self, profile: &ProfileGrid, initialize: bool) -> Result<()> {
        let topo = self.topology;
        if LatheTopology::of(profile) != topo {
            return Err(LatheError::InvalidOperation(format!(
                "profile is {}x{}, mesh was built for {}x{}",
                profile.radial_segments(),
                profile.axial_segments(),
                topo.radial_segments,
                topo.axial_segments
            )));
        }

        let radial = topo.radial_segments;
        let axial = topo.axial_segments;
        let angle_step = TAU / radial as f64;
        let v_step = 1.0 / (axial + 2) as f64;
        let length = self.length;
        let mesh = &mut self.mesh;

        for i in 0..=radial {
            // The seam spoke reuses spoke 0 exactly.
            let spoke = i % radial;
            let (sin, cos) = (spoke as f64 * angle_step).sin_cos();
            let u = i as f64 / radial as f64;
            let radii = profile.spoke(spoke);

            for (j, &r) in radii.iter().enumerate() {
                let idx = topo.tube_index(i, j) as usize;
                let x = length * (j as f64 / axial as f64);
                mesh.positions[idx] = DVec3::new(x, sin * r, cos * r);
                if initialize {
                    mesh.normals[idx] = DVec3::new(0.0, sin, cos);
                    mesh.uvs[idx] = DVec2::new(u, (j + 1) as f64 * v_step);
                }
            }

            let bottom = topo.bottom_ring_index(i) as usize;
            let top = topo.top_ring_index(i) as usize;
            let (r0, r1) = (radii[0], radii[axial]);
            mesh.positions[bottom] = DVec3::new(0.0, sin * r0, cos * r0);
            mesh.positions[top] = DVec3::new(length, sin * r1, cos * r1);
            if initialize {
                mesh.normals[bottom] = DVec3::NEG_X;
                mesh.normals[top] = DVec3::X;
                mesh.uvs[bottom] = DVec2::new(u, v_step);
                mesh.uvs[top] = DVec2::new(u, 1.0 - v_step);
            }
        }

        let bottom_center = topo.bottom_center_index() as usize;
        let top_center = topo.top_center_index() as usize;
        mesh.positions[bottom_center] = DVec3::ZERO;
        mesh.positions[top_center] = DVec3::new(length, 0.0, 0.0);
        if initialize {
            mesh.normals[bottom_center] = DVec3::NEG_X;
            mesh.normals[top_center] = DVec3::X;
            mesh.uvs[bottom_center] = DVec2::new(0.5, 0.0);
            mesh.uvs[top_center] = DVec2::new(0.5, 1.0);
            mesh.indices = topo.build_indices();
        }

        self.bounds = mesh.bounding_box();
        mesh.compute_normals_welded(&self.seam_pairs);

        log::debug!(
            "refreshed lathe mesh (initialize={initialize}), bounds {:?}..{:?}",
            self.bounds.min,
            self.bounds.max
        );
        Ok(())
    }

    pub fn topology(&self) -> LatheTopology {
        self.topology
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    /// Read access for the renderer.
    pub fn mesh(&self) -> &TriangleMesh {
        &self.mesh
    }

    pub fn bounds(&self) -> Aabb3 {
        self.bounds
    }
}
