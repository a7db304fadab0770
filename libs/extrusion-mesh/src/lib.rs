//! # Extrusion Mesh
//!
//! Builds GPU-ready fill-extrusion meshes from tile polygons: walls, roofs
//! and outline ribbons packed into fixed-point vertex arrays with 16-bit,
//! segment-relative triangle indices.
//!
//! ## Architecture
//!
//! ```text
//! ExtrusionBucket::populate
//!   → RingClassifier (polygons with holes)
//!   → VariantBuilder::add_polygon (walls, roof)
//!   → MeshSink (MeshBuffers: vertices, triangles, SegmentVector)
//!   → BufferUploader
//! ```
//!
//! ## Variants
//!
//! | Bucket | Vertex | Walls | Roof |
//! |--------|--------|-------|------|
//! | [`LegacyBucket`] | [`LegacyVertex`] + [`CentroidVertex`] | beveled, smoothed normals | flattened beveled rings |
//! | [`VolumetricBucket`] | [`VolumetricVertex`] | subdivided, per-edge distances | direct or subdivided |
//! | [`OutlineBucket`] | [`OutlineVertex`] | 3-unit ribbons | none |
//!
//! ## Usage
//!
//! ```rust
//! use extrusion_mesh::{ExtrusionFeature, VolumetricBucket};
//! use tile_geometry::Ring;
//!
//! let square = Ring::from_coords(&[(0, 0), (10, 0), (10, 10), (0, 10)]);
//! let mut bucket = VolumetricBucket::with_defaults();
//! bucket.populate(vec![ExtrusionFeature::polygon(0, vec![square]).with_height(15.0)]);
//!
//! // Four wall quads and a two-triangle roof
//! assert_eq!(bucket.buffers().triangles().len(), 4 * 2 + 2);
//! ```

pub mod bucket;
pub mod builders;
pub mod error;
pub mod feature;
pub mod large_mesh;
pub mod layout;
pub mod parallel;
pub mod segment;
pub mod sink;

pub use bucket::{BufferUploader, ExtrusionBucket, LegacyBucket, OutlineBucket, VolumetricBucket};
pub use builders::{BuildContext, LegacyBuilder, OutlineBuilder, VariantBuilder, VolumetricBuilder};
pub use error::MeshError;
pub use feature::{ExtrusionFeature, FeatureProperties, FeatureVertexRange};
pub use large_mesh::fill_large_mesh;
pub use layout::{
    AttributeDescriptor, AttributeKind, CentroidVertex, LegacyVertex, OutlineVertex, VertexLayout, VolumetricVertex,
};
pub use parallel::build_tiles_parallel;
pub use segment::{Segment, SegmentVector};
pub use sink::{MeshBuffers, MeshSink, SegmentRoom};
