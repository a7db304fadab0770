//! # Geometry Oracles
//!
//! The bundle of swappable geometry services a mesh build calls into.

use crate::classify::{RingClassifier, SignedAreaClassifier};
use crate::subdivide::{GridSubdivider, Subdivider};
use crate::triangulate::{EarcutTriangulator, Triangulator};

/// Classifier, triangulator and subdivider used by a build.
///
/// Each service is a trait object so callers can substitute their own
/// implementation while keeping the defaults for the rest.
pub struct GeometryOracles {
    pub classifier: Box<dyn RingClassifier + Send + Sync>,
    pub triangulator: Box<dyn Triangulator + Send + Sync>,
    pub subdivider: Box<dyn Subdivider + Send + Sync>,
}

impl Default for GeometryOracles {
    fn default() -> Self {
        Self {
            classifier: Box::new(SignedAreaClassifier),
            triangulator: Box::new(EarcutTriangulator),
            subdivider: Box::new(GridSubdivider::default()),
        }
    }
}

impl std::fmt::Debug for GeometryOracles {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeometryOracles").finish_non_exhaustive()
    }
}

impl GeometryOracles {
    /// Replaces the ring classifier.
    pub fn with_classifier(mut self, classifier: impl RingClassifier + Send + Sync + 'static) -> Self {
        self.classifier = Box::new(classifier);
        self
    }

    /// Replaces the triangulator.
    pub fn with_triangulator(mut self, triangulator: impl Triangulator + Send + Sync + 'static) -> Self {
        self.triangulator = Box::new(triangulator);
        self
    }

    /// Replaces the subdivider.
    pub fn with_subdivider(mut self, subdivider: impl Subdivider + Send + Sync + 'static) -> Self {
        self.subdivider = Box::new(subdivider);
        self
    }
}
