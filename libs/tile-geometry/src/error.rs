//! # Geometry Errors
//!
//! Error types for the geometry oracles. Degenerate input is never an error
//! here; only an oracle that cannot produce a result at all reports one.

use thiserror::Error;

/// Errors that can occur inside a geometry oracle.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    /// The triangulator rejected its input.
    #[error("Triangulation failed: {message}")]
    TriangulationFailed { message: String },

    /// Flattened coordinates were not a whole number of 2-D points.
    #[error("Flattened coordinate list has odd length {len}")]
    OddCoordinateCount { len: usize },
}

impl GeometryError {
    /// Creates a triangulation failure.
    pub fn triangulation(message: impl Into<String>) -> Self {
        Self::TriangulationFailed {
            message: message.into(),
        }
    }
}
