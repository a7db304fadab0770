//! # Extrusion Features
//!
//! The per-feature input record handed to a bucket, and the vertex range a
//! feature occupies once built.

use config::constants::MIN_EXTRUSION_HEIGHT;
use serde::{Deserialize, Serialize};
use tile_geometry::{FeatureType, Ring};

/// Scalar properties evaluated upstream by the style layer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureProperties {
    /// Resolved extrusion height, if the feature has one.
    pub render_height: Option<f64>,
    /// Whether the feature's paint depends on pattern images, which delays
    /// its build until `add_features`.
    pub has_pattern: bool,
}

/// A decoded tile feature ready for meshing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtrusionFeature {
    pub id: Option<u64>,
    /// Stable index of the feature in its source layer.
    pub index: usize,
    pub source_layer_index: usize,
    pub kind: FeatureType,
    /// Flat ring list; classification into polygons happens in the bucket.
    pub geometry: Vec<Ring>,
    pub properties: FeatureProperties,
}

impl ExtrusionFeature {
    pub fn new(index: usize, kind: FeatureType, geometry: Vec<Ring>) -> Self {
        Self {
            id: None,
            index,
            source_layer_index: 0,
            kind,
            geometry,
            properties: FeatureProperties::default(),
        }
    }

    /// A polygon feature.
    ///
    /// # Example
    ///
    /// ```rust
    /// use extrusion_mesh::ExtrusionFeature;
    /// use tile_geometry::Ring;
    ///
    /// let feature = ExtrusionFeature::polygon(0, vec![Ring::from_coords(&[(0, 0), (10, 0), (10, 10)])])
    ///     .with_height(40.0);
    /// assert_eq!(feature.extrusion_height(), 40.0);
    /// ```
    pub fn polygon(index: usize, geometry: Vec<Ring>) -> Self {
        Self::new(index, FeatureType::Polygon, geometry)
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_height(mut self, height: f64) -> Self {
        self.properties.render_height = Some(height);
        self
    }

    pub fn with_pattern(mut self) -> Self {
        self.properties.has_pattern = true;
        self
    }

    /// Wall height: the render height, but never below the minimum.
    pub fn extrusion_height(&self) -> f64 {
        self.properties
            .render_height
            .unwrap_or(0.0)
            .max(MIN_EXTRUSION_HEIGHT)
    }
}

/// Vertices written for one feature, for in-place paint array updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureVertexRange {
    pub feature_index: usize,
    pub vertex_start: usize,
    pub vertex_end: usize,
}

impl FeatureVertexRange {
    #[inline]
    pub fn len(&self) -> usize {
        self.vertex_end - self.vertex_start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertex_end == self.vertex_start
    }
}
