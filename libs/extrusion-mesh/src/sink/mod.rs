//! # Mesh Sink
//!
//! The emission protocol every builder variant writes through, and the
//! buffer set that implements it.
//!
//! ## Protocol
//!
//! 1. `request_room(n)` before writing a group of `n` vertices that must share
//!    a segment (a wall quad, an outline edge, a whole roof).
//! 2. `push_vertex` for each vertex of the group.
//! 3. `push_triangle` with indices relative to the segment the room was
//!    granted in.
//!
//! Room is never requested in the middle of a group.

use crate::layout::VertexLayout;
use crate::segment::{Segment, SegmentVector};

/// Where a room request landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentRoom {
    /// Index of the segment in the allocator.
    pub segment: usize,
    /// Segment-relative index the next pushed vertex receives.
    pub base: usize,
}

/// Append-only sink for segmented triangle meshes.
pub trait MeshSink {
    type Vertex;

    /// Vertex ceiling of one segment.
    fn max_vertices(&self) -> usize;

    /// Makes sure the active segment can take `count` more vertices.
    fn request_room(&mut self, count: usize) -> SegmentRoom;

    /// Appends a vertex to the active segment.
    fn push_vertex(&mut self, vertex: Self::Vertex);

    /// Appends a triangle with segment-relative indices.
    fn push_triangle(&mut self, a: usize, b: usize, c: usize);

    /// Total vertices written so far.
    fn vertex_count(&self) -> usize;

    /// Vertices written into the active segment.
    fn active_vertex_length(&self) -> usize;
}

/// Vertex array, `u16` triangle array and segments of one mesh.
///
/// # Example
///
/// ```rust
/// use extrusion_mesh::{MeshBuffers, MeshSink, OutlineVertex};
/// use glam::DVec2;
///
/// let mut buffers = MeshBuffers::<OutlineVertex>::new();
/// let room = buffers.request_room(3);
/// for x in [0.0, 10.0, 0.0] {
///     buffers.push_vertex(OutlineVertex::new(DVec2::new(x, x), 0.0));
/// }
/// buffers.push_triangle(room.base, room.base + 1, room.base + 2);
///
/// assert_eq!(buffers.vertex_count(), 3);
/// assert_eq!(buffers.index_words(), &[0, 1, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct MeshBuffers<V> {
    vertices: Vec<V>,
    triangles: Vec<[u16; 3]>,
    segments: SegmentVector,
}

impl<V> Default for MeshBuffers<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> MeshBuffers<V> {
    /// Creates empty buffers with the 16-bit segment ceiling.
    pub fn new() -> Self {
        Self::with_segments(SegmentVector::new())
    }

    /// Creates empty buffers with a lower segment ceiling.
    pub fn with_segment_ceiling(max_vertices: usize) -> Self {
        Self::with_segments(SegmentVector::with_max_vertices(max_vertices))
    }

    fn with_segments(segments: SegmentVector) -> Self {
        Self {
            vertices: Vec::new(),
            triangles: Vec::new(),
            segments,
        }
    }

    #[inline]
    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    #[inline]
    pub fn triangles(&self) -> &[[u16; 3]] {
        &self.triangles
    }

    #[inline]
    pub fn segments(&self) -> &SegmentVector {
        &self.segments
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertices of one segment.
    pub fn segment_vertices(&self, segment: &Segment) -> &[V] {
        &self.vertices[segment.vertex_range()]
    }

    /// Segment-relative triangles of one segment.
    pub fn segment_triangles(&self, segment: &Segment) -> &[[u16; 3]] {
        &self.triangles[segment.primitive_range()]
    }

    /// Triangles flattened into the `u16` index buffer.
    pub fn index_words(&self) -> &[u16] {
        bytemuck::cast_slice(&self.triangles)
    }
}

impl<V: VertexLayout> MeshBuffers<V> {
    /// The vertex array as raw bytes.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

impl<V> MeshSink for MeshBuffers<V> {
    type Vertex = V;

    fn max_vertices(&self) -> usize {
        self.segments.max_vertices()
    }

    fn request_room(&mut self, count: usize) -> SegmentRoom {
        let segment = self
            .segments
            .prepare_segment(count, self.vertices.len(), self.triangles.len());
        let base = self.segments.get(segment).map_or(0, |s| s.vertex_length);
        SegmentRoom { segment, base }
    }

    fn push_vertex(&mut self, vertex: V) {
        if self.segments.is_empty() {
            self.request_room(1);
        }
        self.vertices.push(vertex);
        let last = self.segments.len() - 1;
        if let Some(active) = self.segments.get_mut(last) {
            active.vertex_length += 1;
        }
    }

    fn push_triangle(&mut self, a: usize, b: usize, c: usize) {
        debug_assert!(
            a.max(b).max(c) < self.active_vertex_length(),
            "triangle ({a}, {b}, {c}) references a vertex outside the active segment"
        );
        self.triangles.push([a as u16, b as u16, c as u16]);
        let last = self.segments.len().saturating_sub(1);
        if let Some(active) = self.segments.get_mut(last) {
            active.primitive_length += 1;
        }
    }

    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn active_vertex_length(&self) -> usize {
        self.segments.active().map_or(0, |s| s.vertex_length)
    }
}
