//! # Large Mesh Streaming Tests

use super::*;
use crate::layout::OutlineVertex;
use crate::sink::MeshBuffers;
use glam::DVec2;

/// A strip of `quads` unit quads along x: 2 * (quads + 1) vertices.
fn strip(quads: usize) -> (Vec<DVec2>, Vec<u32>) {
    let mut vertices = Vec::new();
    for i in 0..=quads {
        vertices.push(DVec2::new(i as f64, 0.0));
        vertices.push(DVec2::new(i as f64, 1.0));
    }
    let mut triangles = Vec::new();
    for i in 0..quads as u32 {
        let b = i * 2;
        triangles.extend_from_slice(&[b, b + 2, b + 1, b + 1, b + 2, b + 3]);
    }
    (vertices, triangles)
}

fn fill(buffers: &mut MeshBuffers<OutlineVertex>, vertices: &[DVec2], triangles: &[u32]) {
    fill_large_mesh(buffers, vertices.len(), triangles, |i| OutlineVertex::new(vertices[i], 0.0));
}

fn assert_segment_local(buffers: &MeshBuffers<OutlineVertex>) {
    for segment in buffers.segments() {
        for tri in buffers.segment_triangles(segment) {
            for &index in tri {
                assert!((index as usize) < segment.vertex_length);
            }
        }
    }
}

#[test]
fn test_small_mesh_uses_one_segment() {
    let (vertices, triangles) = strip(3);
    let mut buffers = MeshBuffers::new();
    fill(&mut buffers, &vertices, &triangles);

    assert_eq!(buffers.segments().len(), 1);
    assert_eq!(buffers.vertex_count(), 8);
    assert_eq!(buffers.triangles().len(), 6);
}

#[test]
fn test_small_mesh_is_offset_by_existing_vertices() {
    let mut buffers = MeshBuffers::new();
    let room = buffers.request_room(2);
    buffers.push_vertex(OutlineVertex::default());
    buffers.push_vertex(OutlineVertex::default());
    assert_eq!(room.base, 0);

    let (vertices, triangles) = strip(1);
    fill(&mut buffers, &vertices, &triangles);
    assert_eq!(buffers.triangles()[0], [2, 4, 3]);
}

#[test]
fn test_large_mesh_splits_and_stays_segment_local() {
    let (vertices, triangles) = strip(20);
    let mut buffers = MeshBuffers::with_segment_ceiling(10);
    fill(&mut buffers, &vertices, &triangles);

    assert!(buffers.segments().len() >= 2);
    assert_eq!(buffers.triangles().len(), triangles.len() / 3);
    assert_segment_local(&buffers);
    for segment in buffers.segments() {
        assert!(segment.vertex_length <= 10);
    }
}

#[test]
fn test_large_mesh_preserves_triangle_positions() {
    let (vertices, triangles) = strip(12);
    let mut buffers = MeshBuffers::with_segment_ceiling(8);
    fill(&mut buffers, &vertices, &triangles);

    let mut emitted = Vec::new();
    for segment in buffers.segments() {
        let local = buffers.segment_vertices(segment);
        for &tri in buffers.segment_triangles(segment) {
            emitted.push(tri.map(|i| local[i as usize].pos));
        }
    }
    let expected: Vec<[[i16; 3]; 3]> = triangles
        .chunks_exact(3)
        .map(|t| [0, 1, 2].map(|k| OutlineVertex::new(vertices[t[k] as usize], 0.0).pos))
        .collect();
    assert_eq!(emitted, expected);
}

#[test]
fn test_empty_mesh_writes_nothing() {
    let mut buffers = MeshBuffers::<OutlineVertex>::new();
    fill_large_mesh(&mut buffers, 0, &[], |_| OutlineVertex::default());
    assert!(buffers.is_empty());
    assert!(buffers.segments().is_empty());
}

#[test]
fn test_unmapped_count_ignores_repeats() {
    let mut local = HashMap::new();
    assert_eq!(unmapped_count(&[1, 1, 2], &local), 2);
    local.insert(2, 0);
    assert_eq!(unmapped_count(&[1, 2, 3], &local), 2);
}
