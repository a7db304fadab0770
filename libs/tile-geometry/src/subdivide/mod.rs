//! # Subdivision
//!
//! Resamples rings and polygons so that no edge crosses a tile grid line,
//! keeping long edges faithful when the tile is projected onto a curved
//! surface.
//!
//! ## Contract
//!
//! - `extent` is the tile side length and `granularity` the number of grid
//!   cells per side; a granularity below two leaves the geometry untouched.
//! - `subdivide_line` returns the input polyline with grid-crossing points
//!   inserted. With `closed = true` the result ends on its first point.
//! - `subdivide_polygon` returns flattened vertices and triangles whose
//!   winding already matches the renderer's convention.

use crate::error::GeometryError;
use crate::triangulate::{EarcutTriangulator, Triangulator};
use crate::types::{Polygon, TilePoint};

/// A pre-triangulated polygon mesh.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubdividedPolygon {
    /// Flattened vertex positions.
    pub vertices: Vec<TilePoint>,
    /// Triangle index triples into `vertices`.
    pub triangles: Vec<u32>,
}

impl SubdividedPolygon {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }
}

/// Resamples geometry for curved-projection fidelity.
pub trait Subdivider {
    /// Subdivides a polyline or ring.
    fn subdivide_line(&self, points: &[TilePoint], extent: i32, granularity: u32, closed: bool) -> Vec<TilePoint>;

    /// Subdivides and triangulates a whole polygon.
    fn subdivide_polygon(
        &self,
        polygon: &Polygon,
        extent: i32,
        granularity: u32,
    ) -> Result<SubdividedPolygon, GeometryError>;
}

/// Subdivider that splits edges where they cross the tile's cell grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridSubdivider {
    triangulator: EarcutTriangulator,
}

impl GridSubdivider {
    pub fn new() -> Self {
        Self::default()
    }

    fn cell_size(extent: i32, granularity: u32) -> f64 {
        (extent / granularity.max(1) as i32).max(1) as f64
    }

    /// Appends the grid crossings strictly between `a` and `b`, in order.
    fn push_crossings(&self, out: &mut Vec<TilePoint>, a: TilePoint, b: TilePoint, cell: f64) {
        let (fa, fb) = (a.as_dvec2(), b.as_dvec2());
        let mut ts = Vec::new();
        axis_crossings(fa.x, fb.x, cell, &mut ts);
        axis_crossings(fa.y, fb.y, cell, &mut ts);
        ts.sort_by(f64::total_cmp);

        for t in ts {
            let p = TilePoint::from_dvec2_rounded(fa.lerp(fb, t));
            if p == b || out.last() == Some(&p) {
                continue;
            }
            out.push(p);
        }
    }
}

impl Subdivider for GridSubdivider {
    fn subdivide_line(&self, points: &[TilePoint], extent: i32, granularity: u32, closed: bool) -> Vec<TilePoint> {
        if points.len() < 2 {
            return Vec::new();
        }

        let ends_match = points.first() == points.last();
        let close = closed && !ends_match;

        if granularity < 2 {
            let mut out = points.to_vec();
            if close {
                out.push(points[0]);
            }
            return out;
        }

        let cell = Self::cell_size(extent, granularity);
        let count = points.len();
        let last_index = if close { count } else { count - 1 };

        let mut out = Vec::with_capacity(count + 1);
        out.push(points[0]);
        for i in 0..last_index {
            let a = points[i];
            let b = if i + 1 < count { points[i + 1] } else { points[0] };
            self.push_crossings(&mut out, a, b, cell);
            out.push(b);
        }
        out
    }

    fn subdivide_polygon(
        &self,
        polygon: &Polygon,
        extent: i32,
        granularity: u32,
    ) -> Result<SubdividedPolygon, GeometryError> {
        let mut vertices: Vec<TilePoint> = Vec::with_capacity(polygon.point_count());
        let mut hole_starts = Vec::new();

        for ring in &polygon.rings {
            let open = ring.open_points();
            if open.is_empty() {
                continue;
            }
            let dense = self.subdivide_line(open, extent, granularity, true);
            let dense_open = match dense.split_last() {
                Some((_, rest)) if !rest.is_empty() => rest,
                _ => open,
            };
            if !vertices.is_empty() {
                hole_starts.push(vertices.len());
            }
            vertices.extend_from_slice(dense_open);
        }

        let flattened: Vec<f64> = vertices
            .iter()
            .flat_map(|p| [p.x as f64, p.y as f64])
            .collect();
        let indices = self.triangulator.triangulate(&flattened, &hole_starts)?;

        let triangles = indices
            .chunks_exact(3)
            .flat_map(|t| [t[0] as u32, t[2] as u32, t[1] as u32])
            .collect();

        Ok(SubdividedPolygon {
            vertices,
            triangles,
        })
    }
}

/// Collects interpolation parameters where `a → b` crosses a multiple of `cell`.
fn axis_crossings(a: f64, b: f64, cell: f64, ts: &mut Vec<f64>) {
    if a == b {
        return;
    }
    let (lo, hi) = (a.min(b), a.max(b));
    let mut line = ((lo / cell).floor() + 1.0) * cell;
    while line < hi {
        ts.push((line - a) / (b - a));
        line += cell;
    }
}
