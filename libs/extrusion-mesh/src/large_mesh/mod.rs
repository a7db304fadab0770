//! # Large Mesh Streaming
//!
//! Writes a pre-triangulated mesh into segmented buffers. Meshes that fit a
//! single segment are copied as-is; larger meshes are re-indexed triangle by
//! triangle, duplicating shared vertices across segment boundaries.

use std::collections::HashMap;

use crate::sink::MeshSink;

/// Streams `vertex_count` vertices and the triangle list `triangles` into
/// `sink`. `emit(i)` produces the vertex for source index `i`.
///
/// Every emitted triangle references only vertices of its own segment.
///
/// # Example
///
/// ```rust
/// use extrusion_mesh::{fill_large_mesh, MeshBuffers, MeshSink, OutlineVertex};
/// use glam::DVec2;
///
/// let square = [DVec2::ZERO, DVec2::X, DVec2::ONE, DVec2::Y];
/// let mut buffers = MeshBuffers::new();
/// fill_large_mesh(&mut buffers, square.len(), &[0, 1, 2, 0, 2, 3], |i| {
///     OutlineVertex::new(square[i], 0.0)
/// });
/// assert_eq!(buffers.vertex_count(), 4);
/// assert_eq!(buffers.triangles().len(), 2);
/// ```
pub fn fill_large_mesh<S: MeshSink>(
    sink: &mut S,
    vertex_count: usize,
    triangles: &[u32],
    mut emit: impl FnMut(usize) -> S::Vertex,
) {
    if vertex_count == 0 {
        return;
    }

    if vertex_count < sink.max_vertices() {
        let room = sink.request_room(vertex_count);
        for i in 0..vertex_count {
            sink.push_vertex(emit(i));
        }
        for tri in triangles.chunks_exact(3) {
            sink.push_triangle(
                room.base + tri[0] as usize,
                room.base + tri[1] as usize,
                room.base + tri[2] as usize,
            );
        }
        return;
    }

    log::debug!(
        "streaming mesh of {} vertices across segments of {}",
        vertex_count,
        sink.max_vertices()
    );

    let mut room = sink.request_room(3);
    let mut local: HashMap<u32, usize> = HashMap::new();

    for tri in triangles.chunks_exact(3) {
        let next = sink.request_room(unmapped_count(tri, &local));
        if next.segment != room.segment {
            local.clear();
            room = next;
        }

        let mut mapped = [0usize; 3];
        for (slot, &source) in mapped.iter_mut().zip(tri) {
            *slot = *local.entry(source).or_insert_with(|| {
                let index = sink.active_vertex_length();
                sink.push_vertex(emit(source as usize));
                index
            });
        }
        sink.push_triangle(mapped[0], mapped[1], mapped[2]);
    }
}

/// Distinct vertices of `tri` not yet present in the active segment.
fn unmapped_count(tri: &[u32], local: &HashMap<u32, usize>) -> usize {
    tri.iter()
        .enumerate()
        .filter(|&(k, index)| !local.contains_key(index) && !tri[..k].contains(index))
        .count()
}

#[cfg(test)]
mod tests;
