//! # Mesh Errors
//!
//! Error types for mesh building. Degenerate geometry is skipped rather than
//! reported; errors are reserved for operations that cannot run at all.

use thiserror::Error;
use tile_geometry::GeometryError;

/// Errors that can occur while building or querying extrusion meshes.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshError {
    /// A geometry oracle failed.
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    /// The requested operation is not available for this mesh variant.
    #[error("Not implemented: {operation}")]
    NotImplemented { operation: &'static str },
}

impl MeshError {
    /// Creates a not-implemented error for the named operation.
    pub fn not_implemented(operation: &'static str) -> Self {
        Self::NotImplemented { operation }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_error_converts() {
        let err: MeshError = GeometryError::triangulation("bad input").into();
        assert!(matches!(err, MeshError::Geometry(_)));
        assert!(err.to_string().contains("bad input"));
    }

    #[test]
    fn test_not_implemented_names_operation() {
        let err = MeshError::not_implemented("query_intersects_feature");
        assert!(err.to_string().contains("query_intersects_feature"));
    }
}
