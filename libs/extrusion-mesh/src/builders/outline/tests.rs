//! # Outline Builder Tests

use super::*;
use crate::builders::tests::{build_feature, square};
use crate::sink::MeshBuffers;
use config::constants::BuildConfig;
use tile_geometry::{FeatureType, Ring};

fn build(feature: &ExtrusionFeature) -> MeshBuffers<OutlineVertex> {
    let mut buffers = MeshBuffers::new();
    build_feature(&mut OutlineBuilder, &BuildConfig::default(), feature, &mut buffers);
    buffers
}

#[test]
fn test_one_ribbon_per_edge() {
    let feature = ExtrusionFeature::polygon(0, vec![square(100, 100, 500)]).with_height(30.0);
    let buffers = build(&feature);

    assert_eq!(buffers.vertex_count(), 4 * 6);
    assert_eq!(buffers.triangles().len(), 4 * 4);
}

#[test]
fn test_ribbon_vertex_layout() {
    let ring = Ring::from_coords(&[(100, 100), (200, 100)]);
    let feature = ExtrusionFeature::new(0, FeatureType::LineString, vec![ring]).with_height(30.0);
    let buffers = build(&feature);

    // Edge along +x: the offset is (0, 1.5), truncated on store
    let positions: Vec<[i16; 3]> = buffers.vertices().iter().map(|v| v.pos).collect();
    assert_eq!(
        positions,
        vec![
            [100, 101, 30],
            [100, 98, 30],
            [200, 101, 30],
            [200, 98, 30],
            [100, 101, 0],
            [100, 98, 0],
        ]
    );
    assert_eq!(buffers.triangles(), &[[0, 1, 2], [1, 3, 2], [4, 5, 1], [4, 1, 0]]);
}

#[test]
fn test_no_roof_for_polygons() {
    let feature = ExtrusionFeature::polygon(0, vec![square(100, 100, 500)]);
    let buffers = build(&feature);
    // Every vertex belongs to a ribbon: six per edge
    assert_eq!(buffers.vertex_count() % 6, 0);
    assert!(buffers.vertices().iter().all(|v| v.pos[2] == 0 || v.pos[2] == 15));
}

#[test]
fn test_boundary_and_zero_length_edges_skipped() {
    let ring = Ring::from_coords(&[(-64, 0), (-64, 300), (-64, 300), (300, 300)]);
    let feature = ExtrusionFeature::new(0, FeatureType::LineString, vec![ring]);
    let buffers = build(&feature);
    assert_eq!(buffers.vertex_count(), 6);
}

#[test]
fn test_corners_are_not_mitered() {
    // Consecutive ribbons meet at a corner without a shared join: the end of
    // one ribbon and the start of the next are offset in different directions.
    let ring = Ring::from_coords(&[(100, 100), (400, 100), (400, 400)]);
    let feature = ExtrusionFeature::new(0, FeatureType::LineString, vec![ring]);
    let buffers = build(&feature);

    let first = &buffers.vertices()[0..6];
    let second = &buffers.vertices()[6..12];
    // t2/t3 of the first ribbon vs t0/t1 of the second, both at (400, 100)
    assert_ne!(first[2].pos, second[0].pos);
    assert_ne!(first[3].pos, second[1].pos);
    assert_ne!(first[2].pos, second[1].pos);
}
