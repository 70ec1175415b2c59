use lathe_core::{CrossSectionKind, LatheConfig};
use lathe_mesh::{CarveRegion, LatheMesh, LatheTopology, ProfileGrid};

fn square_profile(radial: usize, axial: usize) -> ProfileGrid {
    ProfileGrid::from_config(&LatheConfig {
        radial_segments: radial,
        axial_segments: axial,
        cross_section: CrossSectionKind::Square,
        ..Default::default()
    })
    .unwrap()
}

fn assert_seam_consistent(lathe: &LatheMesh) {
    let topo = lathe.topology();
    let mesh = lathe.mesh();
    let last = topo.radial_segments;

    for j in 0..=topo.axial_segments {
        let a = topo.tube_index(0, j) as usize;
        let b = topo.tube_index(last, j) as usize;
        assert!((mesh.positions[a] - mesh.positions[b]).length() < 1e-12);
        assert!((mesh.normals[a] - mesh.normals[b]).length() < 1e-12);
        assert!((mesh.uvs[a].y - mesh.uvs[b].y).abs() < 1e-12);
        assert!((mesh.uvs[b].x - mesh.uvs[a].x - 1.0).abs() < 1e-12);
    }
    for (a, b) in [
        (topo.bottom_ring_index(0), topo.bottom_ring_index(last)),
        (topo.top_ring_index(0), topo.top_ring_index(last)),
    ] {
        let (a, b) = (a as usize, b as usize);
        assert!((mesh.positions[a] - mesh.positions[b]).length() < 1e-12);
        assert!((mesh.normals[a] - mesh.normals[b]).length() < 1e-12);
        assert!((mesh.uvs[a].y - mesh.uvs[b].y).abs() < 1e-12);
    }
}

#[test]
fn test_seam_after_create_and_carves() {
    let mut profile = square_profile(12, 6);
    let mut lathe = LatheMesh::create(&profile, 1.0).unwrap();
    assert_seam_consistent(&lathe);

    for (spoke, sample, r) in [(0, 3, 0.03), (11, 0, 0.02), (1, 6, 0.05)] {
        let region = CarveRegion {
            angle_index: spoke,
            angle_reach: 1,
            axial_index: sample,
            axial_reach: 1,
        };
        profile.apply_carve(&region, r);
        lathe.refresh(&profile, false).unwrap();
        assert_seam_consistent(&lathe);
    }
}

#[test]
fn test_buffer_sizes_stable_across_refreshes() {
    for (radial, axial) in [(4, 1), (8, 4), (32, 20)] {
        let mut profile = square_profile(radial, axial);
        let mut lathe = LatheMesh::create(&profile, 2.0).unwrap();
        let topo = LatheTopology::new(radial, axial);
        let vertex_count = (3 + axial) * (radial + 1) + 2;
        let index_count = (axial + 2) * radial * 2 * 3;

        for k in 0..5 {
            profile.apply_carve(&CarveRegion::cell(k, k as i64), 0.01);
            lathe.refresh(&profile, false).unwrap();
            let mesh = lathe.mesh();
            assert_eq!(mesh.positions.len(), vertex_count);
            assert_eq!(mesh.normals.len(), vertex_count);
            assert_eq!(mesh.uvs.len(), vertex_count);
            assert_eq!(mesh.indices.len(), index_count);
            assert_eq!(topo.vertex_count(), vertex_count);
            assert_eq!(topo.index_count(), index_count);
        }
    }
}

#[test]
fn test_refresh_is_idempotent() {
    let mut profile = square_profile(8, 4);
    let mut lathe = LatheMesh::create(&profile, 1.0).unwrap();
    profile.apply_carve(&CarveRegion::cell(2, 2), 0.04);

    lathe.refresh(&profile, false).unwrap();
    let first = lathe.mesh().clone();
    let first_bounds = lathe.bounds();
    lathe.refresh(&profile, false).unwrap();

    assert_eq!(lathe.mesh(), &first);
    assert_eq!(lathe.bounds(), first_bounds);
}

#[test]
fn test_refresh_keeps_topology_and_uvs() {
    let mut profile = square_profile(8, 4);
    let mut lathe = LatheMesh::create(&profile, 1.0).unwrap();
    let indices = lathe.mesh().indices.clone();
    let uvs = lathe.mesh().uvs.clone();

    profile.apply_carve(&CarveRegion::cell(5, 1), 0.01);
    lathe.refresh(&profile, false).unwrap();

    assert_eq!(lathe.mesh().indices, indices);
    assert_eq!(lathe.mesh().uvs, uvs);
}

#[test]
fn test_cap_rings_follow_end_radii() {
    let mut profile = square_profile(8, 4);
    let mut lathe = LatheMesh::create(&profile, 1.0).unwrap();
    profile.apply_carve(&CarveRegion::cell(0, 0), 0.02);
    profile.apply_carve(&CarveRegion::cell(0, 4), 0.03);
    lathe.refresh(&profile, false).unwrap();

    let topo = lathe.topology();
    let mesh = lathe.mesh();
    let bottom = mesh.positions[topo.bottom_ring_index(0) as usize];
    let top = mesh.positions[topo.top_ring_index(0) as usize];
    assert!((bottom.z - 0.02).abs() < 1e-12 && bottom.x == 0.0);
    assert!((top.z - 0.03).abs() < 1e-12 && (top.x - 1.0).abs() < 1e-12);
}

#[test]
fn test_bounds_shrink_after_carving_everything() {
    let mut profile = square_profile(8, 4);
    let mut lathe = LatheMesh::create(&profile, 1.0).unwrap();
    let region = CarveRegion {
        angle_index: 0,
        angle_reach: 8,
        axial_index: 2,
        axial_reach: 2,
    };
    assert!(profile.apply_carve(&region, 0.01));
    lathe.refresh(&profile, false).unwrap();

    let bounds = lathe.bounds();
    assert!(bounds.max.y <= 0.01 + 1e-12);
    assert!(bounds.max.z <= 0.01 + 1e-12);
    assert!((bounds.max.x - 1.0).abs() < 1e-12);
}
