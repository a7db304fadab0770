//! # Tile Bounds Tests
//!
//! Predicates deciding which rings and edges take part in wall generation.
//! Geometry decoded from a tile extends into a buffer region beyond
//! `[0, extent]`; edges running along that buffer's clipping border are
//! shared with the neighbouring tile and must not produce walls.

use crate::types::TilePoint;
use glam::DVec2;

/// Returns true when the edge `a → b` runs along the clipping border outside
/// the tile, i.e. both endpoints share an x (or y) coordinate that lies
/// outside `[0, extent]`.
///
/// # Example
///
/// ```rust
/// use glam::DVec2;
/// use tile_geometry::is_boundary_edge;
///
/// let a = DVec2::new(-64.0, 0.0);
/// let b = DVec2::new(-64.0, 100.0);
/// assert!(is_boundary_edge(a, b, 8192));
/// assert!(!is_boundary_edge(DVec2::ZERO, DVec2::new(0.0, 10.0), 8192));
/// ```
pub fn is_boundary_edge(a: DVec2, b: DVec2, extent: i32) -> bool {
    let extent = extent as f64;
    (a.x == b.x && (a.x < 0.0 || a.x > extent)) || (a.y == b.y && (a.y < 0.0 || a.y > extent))
}

/// Returns true when every point of `points` lies beyond the same side of the
/// tile. An empty slice counts as outside.
///
/// # Example
///
/// ```rust
/// use tile_geometry::{is_entirely_outside, TilePoint};
///
/// let left = [TilePoint::new(-5, 10), TilePoint::new(-1, 4000)];
/// assert!(is_entirely_outside(&left, 8192));
///
/// let straddling = [TilePoint::new(-5, 10), TilePoint::new(5, 10)];
/// assert!(!is_entirely_outside(&straddling, 8192));
/// ```
pub fn is_entirely_outside(points: &[TilePoint], extent: i32) -> bool {
    points.iter().all(|p| p.x < 0)
        || points.iter().all(|p| p.x > extent)
        || points.iter().all(|p| p.y < 0)
        || points.iter().all(|p| p.y > extent)
}
