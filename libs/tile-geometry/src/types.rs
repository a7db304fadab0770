//! # Tile Geometry Types
//!
//! Integer points in tile-local space and the ring/polygon containers built
//! from them. All arithmetic that needs fractions goes through `glam::DVec2`.

use glam::DVec2;
use serde::{Deserialize, Serialize};

// =============================================================================
// POINTS
// =============================================================================

/// A point in tile-local integer coordinates.
///
/// # Example
///
/// ```rust
/// use tile_geometry::TilePoint;
///
/// let p = TilePoint::new(3, 4);
/// assert_eq!(p.as_dvec2().length(), 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TilePoint {
    pub x: i32,
    pub y: i32,
}

impl TilePoint {
    /// Creates a point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Converts to a float vector for direction and length math.
    #[inline]
    pub fn as_dvec2(self) -> DVec2 {
        DVec2::new(self.x as f64, self.y as f64)
    }

    /// Rounds a float position back onto the integer grid.
    #[inline]
    pub fn from_dvec2_rounded(v: DVec2) -> Self {
        Self::new(v.x.round() as i32, v.y.round() as i32)
    }
}

impl From<(i32, i32)> for TilePoint {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

// =============================================================================
// RINGS
// =============================================================================

/// A closed contour. The last point may repeat the first.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Ring {
    pub points: Vec<TilePoint>,
}

impl Ring {
    /// Creates a ring from its points.
    pub fn new(points: Vec<TilePoint>) -> Self {
        Self { points }
    }

    /// Creates a ring from `(x, y)` pairs.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tile_geometry::Ring;
    ///
    /// let ring = Ring::from_coords(&[(0, 0), (10, 0), (10, 10), (0, 0)]);
    /// assert!(ring.is_closed());
    /// assert_eq!(ring.open_points().len(), 3);
    /// ```
    pub fn from_coords(coords: &[(i32, i32)]) -> Self {
        Self::new(coords.iter().copied().map(TilePoint::from).collect())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// True when the last point repeats the first.
    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => self.points.len() > 1 && first == last,
            _ => false,
        }
    }

    /// The ring's points without the closing duplicate.
    pub fn open_points(&self) -> &[TilePoint] {
        if self.is_closed() {
            &self.points[..self.points.len() - 1]
        } else {
            &self.points
        }
    }
}

// =============================================================================
// POLYGONS
// =============================================================================

/// An outer ring followed by its holes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Polygon {
    pub rings: Vec<Ring>,
}

impl Polygon {
    pub fn new(rings: Vec<Ring>) -> Self {
        Self { rings }
    }

    /// The outer boundary, if the polygon has any ring.
    pub fn outer(&self) -> Option<&Ring> {
        self.rings.first()
    }

    /// Hole rings (everything after the outer ring).
    pub fn holes(&self) -> &[Ring] {
        self.rings.get(1..).unwrap_or(&[])
    }

    /// Total number of points across all rings.
    pub fn point_count(&self) -> usize {
        self.rings.iter().map(Ring::len).sum()
    }
}

// =============================================================================
// FEATURE TYPES
// =============================================================================

/// Vector-tile geometry type of a feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureType {
    Point,
    LineString,
    Polygon,
}

impl FeatureType {
    /// Maps a vector-tile geometry type id (1, 2, 3).
    ///
    /// # Example
    ///
    /// ```rust
    /// use tile_geometry::FeatureType;
    ///
    /// assert_eq!(FeatureType::from_tile_id(3), Some(FeatureType::Polygon));
    /// assert_eq!(FeatureType::from_tile_id(0), None);
    /// ```
    pub fn from_tile_id(id: u32) -> Option<Self> {
        match id {
            1 => Some(Self::Point),
            2 => Some(Self::LineString),
            3 => Some(Self::Polygon),
            _ => None,
        }
    }

    /// Only polygon features enclose an area that can carry a roof.
    #[inline]
    pub fn is_areal(self) -> bool {
        matches!(self, Self::Polygon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_points_drops_closing_duplicate() {
        let ring = Ring::from_coords(&[(0, 0), (5, 0), (5, 5), (0, 0)]);
        assert_eq!(ring.open_points(), &ring.points[..3]);
    }

    #[test]
    fn test_open_points_keeps_open_ring() {
        let ring = Ring::from_coords(&[(0, 0), (5, 0), (5, 5)]);
        assert!(!ring.is_closed());
        assert_eq!(ring.open_points().len(), 3);
    }

    #[test]
    fn test_single_point_is_not_closed() {
        let ring = Ring::from_coords(&[(1, 1)]);
        assert!(!ring.is_closed());
        assert_eq!(ring.open_points().len(), 1);
    }

    #[test]
    fn test_polygon_holes() {
        let polygon = Polygon::new(vec![
            Ring::from_coords(&[(0, 0), (10, 0), (10, 10)]),
            Ring::from_coords(&[(2, 2), (3, 2), (3, 3)]),
        ]);
        assert_eq!(polygon.holes().len(), 1);
        assert_eq!(polygon.point_count(), 6);
        assert!(Polygon::default().holes().is_empty());
    }

    #[test]
    fn test_feature_type_is_areal() {
        assert!(FeatureType::Polygon.is_areal());
        assert!(!FeatureType::LineString.is_areal());
        assert!(!FeatureType::Point.is_areal());
    }

    #[test]
    fn test_rounding_back_to_grid() {
        let p = TilePoint::from_dvec2_rounded(DVec2::new(2.6, -1.4));
        assert_eq!(p, TilePoint::new(3, -1));
    }
}
