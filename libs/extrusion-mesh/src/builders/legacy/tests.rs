//! # Legacy Builder Tests

use super::*;
use crate::builders::tests::{build_feature, facing, square};
use crate::sink::MeshBuffers;
use approx::assert_relative_eq;
use config::constants::BuildConfig;
use tile_geometry::FeatureType;

fn build_with(config: BuildConfig, feature: &ExtrusionFeature) -> (LegacyBuilder, MeshBuffers<LegacyVertex>) {
    let mut builder = LegacyBuilder::default();
    let mut buffers = MeshBuffers::new();
    build_feature(&mut builder, &config, feature, &mut buffers);
    (builder, buffers)
}

fn build(feature: &ExtrusionFeature) -> (LegacyBuilder, MeshBuffers<LegacyVertex>) {
    build_with(BuildConfig::default(), feature)
}

/// Square ring wound against `square`, for holes.
fn hole(x: i32, y: i32, size: i32) -> Ring {
    Ring::from_coords(&[(x, y), (x, y + size), (x + size, y + size), (x + size, y), (x, y)])
}

/// Twice the signed area of every roof triangle after the first `walls` triangles.
fn roof_areas(buffers: &MeshBuffers<LegacyVertex>, walls: usize) -> Vec<f64> {
    let vertices = buffers.vertices();
    buffers.triangles()[walls..]
        .iter()
        .map(|&tri| {
            let [a, b, c] = tri.map(|i| position(&vertices[i as usize], 0.0).truncate());
            (b - a).perp_dot(c - a)
        })
        .collect()
}

fn position(v: &LegacyVertex, height: f64) -> DVec3 {
    let z = if v.is_top() { height } else { 0.0 };
    DVec3::new(v.pos[0] as f64, v.pos[1] as f64, z)
}

#[test]
fn test_bevel_pulls_corners_back() {
    let ring = square(0, 0, 1000);
    let beveled = bevel_ring(ring.open_points());

    assert_eq!(beveled.points.len(), 8);
    assert_eq!(beveled.points[0], DVec2::new(0.0, 20.0));
    assert_eq!(beveled.points[1], DVec2::new(20.0, 0.0));
    assert_eq!(beveled.points[2], DVec2::new(980.0, 0.0));
    assert_eq!(beveled.points[3], DVec2::new(1000.0, 20.0));
}

#[test]
fn test_bevel_normals_are_joined_units() {
    let ring = square(0, 0, 1000);
    let beveled = bevel_ring(ring.open_points());

    for normal in &beveled.normals {
        assert_relative_eq!(normal.length(), 1.0, epsilon = 1e-9);
    }
    // Both ends of the side edge between corners 0 and 1 share its direction
    let side_normal = (beveled.points[2] - beveled.points[1]).perp().normalize();
    assert!(beveled.normals[1].dot(side_normal) > 0.0);
    assert!(beveled.normals[2].dot(side_normal) > 0.0);
    // First and last point are joined across the wrap
    assert!(beveled.normals[7].dot(beveled.normals[0]) > 0.0);
}

#[test]
fn test_bevel_of_empty_ring() {
    let beveled = bevel_ring(&[]);
    assert!(beveled.points.is_empty());
    assert!(beveled.normals.is_empty());
}

#[test]
fn test_square_walls_and_roof() {
    let feature = ExtrusionFeature::polygon(0, vec![square(100, 100, 1000)]);
    let (builder, buffers) = build(&feature);

    // 8 beveled edges, then a roof over the 8 beveled points
    assert_eq!(buffers.vertex_count(), 8 * 4 + 8);
    assert_eq!(buffers.triangles().len(), 8 * 2 + 6);
    assert_eq!(builder.centroids().len(), buffers.vertex_count());
}

#[test]
fn test_line_features_have_no_roof() {
    let feature = ExtrusionFeature::new(0, FeatureType::LineString, vec![square(100, 100, 1000)]);
    let (builder, buffers) = build(&feature);

    assert_eq!(buffers.vertex_count(), 8 * 4);
    assert_eq!(buffers.triangles().len(), 8 * 2);
    assert_eq!(builder.centroids().len(), buffers.vertex_count());
}

#[test]
fn test_wall_vertex_order_and_distances() {
    let feature = ExtrusionFeature::polygon(0, vec![square(100, 100, 1000)]);
    let (_, buffers) = build(&feature);
    let quad = &buffers.vertices()[0..4];

    let flags: Vec<bool> = quad.iter().map(LegacyVertex::is_top).collect();
    assert_eq!(flags, vec![false, true, false, true]);

    // p2 (the earlier point) starts the run at zero
    assert_eq!(quad[2].edge_distance(), 0);
    assert_eq!(quad[3].edge_distance(), 0);
    assert_eq!(quad[0].edge_distance(), quad[1].edge_distance());
    assert!(quad[0].edge_distance() > 0);

    // The next quad starts where this one ended
    let next = &buffers.vertices()[4..8];
    assert_eq!(next[2].edge_distance(), quad[0].edge_distance());
}

#[test]
fn test_walls_face_along_their_normal() {
    let feature = ExtrusionFeature::polygon(0, vec![square(100, 100, 1000)]);
    let (_, buffers) = build(&feature);

    for (quad, tris) in buffers.vertices()[..32].chunks_exact(4).zip(buffers.triangles().chunks_exact(2)) {
        let base = tris[0][0] as usize;
        let p1 = position(&quad[0], 1.0);
        let p2 = position(&quad[2], 1.0);
        let expected = (p1 - p2).truncate().perp();

        for &tri in tris {
            let [a, b, c] = tri.map(|i| position(&quad[i as usize - base], 1.0));
            let face = facing(a, b, c);
            assert!(face.truncate().dot(expected) > 0.0);
            assert_relative_eq!(face.z, 0.0);
            // The stored smoothed normal points the same way
            assert!(quad[0].normal().truncate().dot(expected) > 0.0);
        }
    }
}

#[test]
fn test_roof_vertices_point_up() {
    let feature = ExtrusionFeature::polygon(0, vec![square(100, 100, 1000)]);
    let (_, buffers) = build(&feature);
    for roof in &buffers.vertices()[32..] {
        assert_eq!(roof.normal_ed, [1, 0, 16384, 0]);
    }
}

#[test]
fn test_centroid_is_floor_of_mean() {
    let feature = ExtrusionFeature::polygon(0, vec![square(101, 57, 999)]);
    let (builder, buffers) = build(&feature);

    let count = buffers.vertex_count() as i64;
    let sum_x: i64 = buffers.vertices().iter().map(|v| v.pos[0] as i64).sum();
    let sum_y: i64 = buffers.vertices().iter().map(|v| v.pos[1] as i64).sum();
    let expected = [sum_x.div_euclid(count) as i16, sum_y.div_euclid(count) as i16];

    assert!(builder.centroids().iter().all(|c| c.centroid == expected));
}

#[test]
fn test_centroid_per_polygon() {
    let feature = ExtrusionFeature::polygon(0, vec![square(100, 100, 500), square(3000, 3000, 500)]);
    let (builder, buffers) = build(&feature);

    let half = buffers.vertex_count() / 2;
    let centroids = builder.centroids();
    assert_eq!(centroids.len(), buffers.vertex_count());
    assert!(centroids[..half].iter().all(|c| *c == centroids[0]));
    assert!(centroids[half..].iter().all(|c| *c == centroids[half]));
    assert_ne!(centroids[0], centroids[half]);
}

#[test]
fn test_boundary_edges_emit_nothing() {
    // The left side runs along x = -64, outside the tile
    let ring = Ring::from_coords(&[(-64, 100), (1000, 100), (1000, 1000), (-64, 1000), (-64, 100)]);
    let feature = ExtrusionFeature::new(0, FeatureType::LineString, vec![ring]);
    let (_, buffers) = build(&feature);

    assert_eq!(buffers.vertex_count(), 7 * 4);
    for quad in buffers.vertices().chunks_exact(4) {
        assert!(!(quad[0].pos[0] == -64 && quad[2].pos[0] == -64));
    }
}

#[test]
fn test_edge_distance_wraps() {
    let ring = Ring::from_coords(&[(4096, -8000), (16000, 4096), (4096, 16000), (-8000, 4096), (4096, -8000)]);
    let feature = ExtrusionFeature::new(0, FeatureType::LineString, vec![ring]);
    let (_, buffers) = build(&feature);

    let restarts = buffers
        .vertices()
        .chunks_exact(4)
        .filter(|quad| quad[2].edge_distance() == 0)
        .count();
    assert!(restarts >= 2);
    for quad in buffers.vertices().chunks_exact(4) {
        assert!(quad[0].edge_distance() >= 0);
    }
}

#[test]
fn test_outside_polygon_writes_nothing() {
    let feature = ExtrusionFeature::polygon(0, vec![square(-2000, 100, 500)]);
    let (builder, buffers) = build(&feature);
    assert!(buffers.is_empty());
    assert!(builder.centroids().is_empty());
}

#[test]
fn test_auxiliary_buffer_is_centroids() {
    let feature = ExtrusionFeature::polygon(0, vec![square(100, 100, 1000)]);
    let (builder, _) = build(&feature);
    let aux = builder.auxiliary().unwrap();
    assert_eq!(aux.name, "centroid");
    assert_eq!(aux.bytes.len(), builder.auxiliary_len() * 4);
}

#[test]
fn test_centroid_accumulates_unquantized_positions() {
    let mut centroid = CentroidAccumulator::new();
    centroid.add(DVec2::new(-0.5, 3.25));
    centroid.add(DVec2::new(-0.5, 3.25));
    assert_eq!(centroid.count(), 2);
    // Stored positions would truncate to (0, 3); the mean of the inputs floors to (-1, 3)
    assert_eq!(centroid.finish().unwrap().centroid, [-1, 3]);
    assert!(CentroidAccumulator::new().finish().is_none());
}

#[test]
fn test_centroid_of_fractional_bevel_in_buffer() {
    let ring = Ring::from_coords(&[(-301, -203), (700, -150), (200, 600), (-301, -203)]);
    let feature = ExtrusionFeature::polygon(0, vec![ring.clone()]);
    let (builder, buffers) = build(&feature);

    // Every beveled point is written four times in the walls and once in the roof
    let points = bevel_ring(ring.open_points()).points;
    assert_eq!(buffers.vertex_count(), points.len() * 5);
    let mean = points.iter().copied().sum::<DVec2>() / points.len() as f64;
    let expected = [mean.x.floor() as i16, mean.y.floor() as i16];
    assert!(builder.centroids().iter().all(|c| c.centroid == expected));
}

#[test]
fn test_polygon_with_hole() {
    let feature = ExtrusionFeature::polygon(0, vec![square(100, 100, 1000), hole(400, 400, 400)]);

    for strategy in [RoofStrategy::Direct, RoofStrategy::Subdivided] {
        let config = BuildConfig::default().with_roof_strategy(strategy);
        let (builder, buffers) = build_with(config, &feature);

        // Both rings are beveled to 8 points: 16 wall quads, then a 16-point roof
        assert_eq!(buffers.vertex_count(), 16 * 4 + 16, "{strategy:?}");
        assert_eq!(builder.centroids().len(), buffers.vertex_count());
        assert!(builder.centroids().iter().all(|c| c.centroid == [600, 600]));

        let areas = roof_areas(&buffers, 16 * 2);
        assert!(areas.iter().all(|&a| a > 0.0) || areas.iter().all(|&a| a < 0.0));
        // Outer and hole each lose four 20 x 20 / 2 corners to the bevel
        let covered: f64 = areas.iter().map(|a| a.abs() / 2.0).sum();
        assert_relative_eq!(covered, (1_000_000.0 - 800.0) - (160_000.0 - 800.0), epsilon = 1e-6);
    }
}
