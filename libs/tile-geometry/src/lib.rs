//! # Tile Geometry
//!
//! Tile-local polygon geometry and the oracles the extrusion mesh builders
//! rely on.
//!
//! ## Architecture
//!
//! ```text
//! decoded feature rings → classify → polygons → triangulate / subdivide
//! ```
//!
//! ## Oracles
//!
//! Every oracle is a trait with a documented input/output contract and a
//! default implementation:
//! - **Classification**: [`SignedAreaClassifier`] groups rings by winding
//! - **Triangulation**: [`EarcutTriangulator`] wraps `earcutr`
//! - **Subdivision**: [`GridSubdivider`] resamples along tile grid lines
//!
//! ## Usage
//!
//! ```rust
//! use tile_geometry::{GeometryOracles, Ring, TilePoint};
//! use config::constants::EARCUT_MAX_RINGS;
//!
//! let oracles = GeometryOracles::default();
//! let square = Ring::new(vec![
//!     TilePoint::new(0, 0),
//!     TilePoint::new(10, 0),
//!     TilePoint::new(10, 10),
//!     TilePoint::new(0, 10),
//! ]);
//! let polygons = oracles.classifier.classify(&[square], EARCUT_MAX_RINGS);
//! assert_eq!(polygons.len(), 1);
//! ```

pub mod bounds;
pub mod classify;
pub mod error;
pub mod oracles;
pub mod subdivide;
pub mod triangulate;
pub mod types;

pub use bounds::{is_boundary_edge, is_entirely_outside};
pub use classify::{signed_area, RingClassifier, SignedAreaClassifier};
pub use error::GeometryError;
pub use oracles::GeometryOracles;
pub use subdivide::{GridSubdivider, SubdividedPolygon, Subdivider};
pub use triangulate::{EarcutTriangulator, Triangulator};
pub use types::{FeatureType, Polygon, Ring, TilePoint};
