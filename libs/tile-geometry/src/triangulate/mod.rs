//! # Triangulation
//!
//! Ear-clipping triangulation of a flattened polygon with holes.
//!
//! ## Contract
//!
//! - `flattened` holds `x, y` pairs: the outer ring first, then every hole.
//! - `hole_starts` holds the vertex index (not the coordinate index) at which
//!   each hole begins.
//! - The result is a list of vertex-index triples into `flattened`, in the
//!   triangulator's native winding. Callers adjust winding themselves.

use crate::error::GeometryError;

/// Triangulates a flattened polygon with holes.
pub trait Triangulator {
    fn triangulate(&self, flattened: &[f64], hole_starts: &[usize]) -> Result<Vec<usize>, GeometryError>;
}

/// Triangulator backed by the `earcutr` port of earcut.
#[derive(Debug, Clone, Copy, Default)]
pub struct EarcutTriangulator;

impl Triangulator for EarcutTriangulator {
    fn triangulate(&self, flattened: &[f64], hole_starts: &[usize]) -> Result<Vec<usize>, GeometryError> {
        if flattened.len() % 2 != 0 {
            return Err(GeometryError::OddCoordinateCount { len: flattened.len() });
        }
        if flattened.len() < 6 {
            return Ok(Vec::new());
        }
        earcutr::earcut(flattened, hole_starts, 2)
            .map_err(|err| GeometryError::triangulation(format!("{err:?}")))
    }
}
