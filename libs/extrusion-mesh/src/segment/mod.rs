//! # Buffer Segments
//!
//! Splits one vertex/index buffer pair into draw ranges whose vertex count
//! fits a 16-bit index.
//!
//! ## Contract
//!
//! - `prepare_segment(n, ..)` keeps the active segment while
//!   `vertex_length + n <= max_vertices`, otherwise opens a new segment that
//!   starts at the current buffer lengths.
//! - Indices written into a segment are relative to its `vertex_offset`.
//! - Sealed segments are never merged, split or reopened.

use config::constants::MAX_VERTEX_ARRAY_LENGTH;

/// Smallest ceiling accepted; one outline edge needs six vertices.
const MIN_SEGMENT_VERTICES: usize = 6;

/// A contiguous draw range of the vertex and triangle buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Segment {
    /// First vertex of the segment in the vertex buffer.
    pub vertex_offset: usize,
    /// First triangle of the segment in the triangle buffer.
    pub primitive_offset: usize,
    /// Vertices written into the segment.
    pub vertex_length: usize,
    /// Triangles written into the segment.
    pub primitive_length: usize,
}

impl Segment {
    /// Vertex buffer range covered by the segment.
    #[inline]
    pub fn vertex_range(&self) -> std::ops::Range<usize> {
        self.vertex_offset..self.vertex_offset + self.vertex_length
    }

    /// Triangle buffer range covered by the segment.
    #[inline]
    pub fn primitive_range(&self) -> std::ops::Range<usize> {
        self.primitive_offset..self.primitive_offset + self.primitive_length
    }
}

/// Ordered list of segments over one buffer pair.
///
/// # Example
///
/// ```rust
/// use extrusion_mesh::SegmentVector;
///
/// let mut segments = SegmentVector::with_max_vertices(8);
/// let first = segments.prepare_segment(4, 0, 0);
/// segments.get_mut(first).unwrap().vertex_length += 4;
///
/// // Four more still fit
/// assert_eq!(segments.prepare_segment(4, 4, 2), first);
/// segments.get_mut(first).unwrap().vertex_length += 4;
///
/// // The ninth vertex does not
/// let second = segments.prepare_segment(1, 8, 4);
/// assert_ne!(second, first);
/// assert_eq!(segments.get(second).unwrap().vertex_offset, 8);
/// ```
#[derive(Debug, Clone)]
pub struct SegmentVector {
    segments: Vec<Segment>,
    max_vertices: usize,
    warned_oversize: bool,
}

impl Default for SegmentVector {
    fn default() -> Self {
        Self::new()
    }
}

impl SegmentVector {
    /// Creates an empty vector with the 16-bit vertex ceiling.
    pub fn new() -> Self {
        Self::with_max_vertices(MAX_VERTEX_ARRAY_LENGTH)
    }

    /// Creates an empty vector with a lower vertex ceiling.
    ///
    /// The ceiling is clamped to `[6, MAX_VERTEX_ARRAY_LENGTH]`.
    pub fn with_max_vertices(max_vertices: usize) -> Self {
        Self {
            segments: Vec::new(),
            max_vertices: max_vertices.clamp(MIN_SEGMENT_VERTICES, MAX_VERTEX_ARRAY_LENGTH),
            warned_oversize: false,
        }
    }

    /// Returns the index of a segment with room for `vertex_count` more
    /// vertices, opening one at `(vertex_len, primitive_len)` if needed.
    pub fn prepare_segment(&mut self, vertex_count: usize, vertex_len: usize, primitive_len: usize) -> usize {
        if vertex_count > self.max_vertices && !self.warned_oversize {
            log::warn!(
                "Requested {} vertices in one segment, the maximum is {}",
                vertex_count,
                self.max_vertices
            );
            self.warned_oversize = true;
        }

        if let Some(active) = self.segments.last() {
            if active.vertex_length + vertex_count <= self.max_vertices {
                return self.segments.len() - 1;
            }
        }

        self.segments.push(Segment {
            vertex_offset: vertex_len,
            primitive_offset: primitive_len,
            vertex_length: 0,
            primitive_length: 0,
        });
        self.segments.len() - 1
    }

    #[inline]
    pub fn max_vertices(&self) -> usize {
        self.max_vertices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Segment> {
        self.segments.get_mut(index)
    }

    /// The segment new data is written into, if any.
    pub fn active(&self) -> Option<&Segment> {
        self.segments.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    pub fn as_slice(&self) -> &[Segment] {
        &self.segments
    }
}

impl<'a> IntoIterator for &'a SegmentVector {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
