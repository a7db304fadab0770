//! # Extrusion Buckets
//!
//! Per-tile container holding one variant's buffers through their lifecycle:
//!
//! ```text
//! new → populate → [add_features] → upload → destroy
//! ```
//!
//! - `populate` classifies every feature's rings and builds them, except
//!   pattern-dependent features, which wait for `add_features`.
//! - `upload` hands the buffers to a [`BufferUploader`] once; later calls do
//!   nothing.
//! - `destroy` consumes the bucket and releases what was uploaded.

use std::sync::Arc;

use config::constants::{BuildConfig, EARCUT_MAX_RINGS};
use tile_geometry::{GeometryOracles, TilePoint};

use crate::builders::{BuildContext, LegacyBuilder, OutlineBuilder, VariantBuilder, VolumetricBuilder};
use crate::error::MeshError;
use crate::feature::{ExtrusionFeature, FeatureVertexRange};
use crate::layout::{AttributeDescriptor, VertexLayout};
use crate::sink::{MeshBuffers, MeshSink};
use crate::SegmentVector;

/// Receives finished buffers on behalf of the render stage.
pub trait BufferUploader {
    /// Uploads one vertex array with its attribute layout.
    fn upload_vertices(&mut self, name: &str, bytes: &[u8], attributes: &[AttributeDescriptor]);

    /// Uploads the triangle index array.
    fn upload_indices(&mut self, indices: &[u16]);

    /// Releases everything uploaded for the bucket.
    fn release(&mut self);
}

/// Buffers of one tile layer for the variant `B`.
pub struct ExtrusionBucket<B: VariantBuilder> {
    config: BuildConfig,
    oracles: Arc<GeometryOracles>,
    builder: B,
    buffers: MeshBuffers<B::Vertex>,
    pending_features: Vec<ExtrusionFeature>,
    feature_ranges: Vec<FeatureVertexRange>,
    uploaded: bool,
}

pub type LegacyBucket = ExtrusionBucket<LegacyBuilder>;
pub type VolumetricBucket = ExtrusionBucket<VolumetricBuilder>;
pub type OutlineBucket = ExtrusionBucket<OutlineBuilder>;

impl<B: VariantBuilder> std::fmt::Debug for ExtrusionBucket<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtrusionBucket")
            .field("variant", &B::NAME)
            .field("config", &self.config)
            .field("vertices", &self.buffers.vertex_count())
            .field("segments", &self.buffers.segments().len())
            .field("pending_features", &self.pending_features.len())
            .field("uploaded", &self.uploaded)
            .finish()
    }
}

impl<B: VariantBuilder> ExtrusionBucket<B> {
    /// Creates an empty bucket.
    pub fn new(config: BuildConfig, oracles: Arc<GeometryOracles>) -> Self {
        Self::with_buffers(config, oracles, MeshBuffers::new())
    }

    /// Creates an empty bucket with the variant's default configuration and
    /// the default oracles.
    pub fn with_defaults() -> Self {
        Self::new(B::default_config(), Arc::new(GeometryOracles::default()))
    }

    /// Creates an empty bucket whose segments hold at most `max_vertices`.
    pub fn with_segment_ceiling(config: BuildConfig, oracles: Arc<GeometryOracles>, max_vertices: usize) -> Self {
        Self::with_buffers(config, oracles, MeshBuffers::with_segment_ceiling(max_vertices))
    }

    fn with_buffers(config: BuildConfig, oracles: Arc<GeometryOracles>, buffers: MeshBuffers<B::Vertex>) -> Self {
        Self {
            config,
            oracles,
            builder: B::default(),
            buffers,
            pending_features: Vec::new(),
            feature_ranges: Vec::new(),
            uploaded: false,
        }
    }

    /// Builds `features`, deferring those whose paint depends on patterns.
    pub fn populate(&mut self, features: impl IntoIterator<Item = ExtrusionFeature>) {
        self.pending_features.clear();

        let mut built = 0usize;
        for feature in features {
            if feature.properties.has_pattern {
                self.pending_features.push(feature);
            } else {
                self.add_feature(&feature);
                built += 1;
            }
        }

        log::debug!(
            "{}: populated {} features ({} deferred), {} vertices in {} segments",
            B::NAME,
            built,
            self.pending_features.len(),
            self.buffers.vertex_count(),
            self.buffers.segments().len()
        );
    }

    /// Builds the features deferred by `populate`.
    pub fn add_features(&mut self) {
        let pending = std::mem::take(&mut self.pending_features);
        for feature in &pending {
            self.add_feature(feature);
        }
        log::debug!(
            "{}: added {} deferred features, {} vertices",
            B::NAME,
            pending.len(),
            self.buffers.vertex_count()
        );
    }

    fn add_feature(&mut self, feature: &ExtrusionFeature) {
        let vertex_start = self.buffers.vertex_count();
        let ctx = BuildContext {
            config: &self.config,
            oracles: &self.oracles,
        };

        for polygon in self.oracles.classifier.classify(&feature.geometry, EARCUT_MAX_RINGS) {
            self.builder.add_polygon(&ctx, feature, &polygon, &mut self.buffers);
        }

        self.feature_ranges.push(FeatureVertexRange {
            feature_index: feature.index,
            vertex_start,
            vertex_end: self.buffers.vertex_count(),
        });
    }

    /// True when nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty() && self.builder.auxiliary_len() == 0
    }

    /// True until the buffers have been uploaded.
    pub fn upload_pending(&self) -> bool {
        !self.uploaded
    }

    /// Hands the buffers to `uploader`. Only the first call uploads.
    pub fn upload(&mut self, uploader: &mut impl BufferUploader) {
        if self.uploaded {
            return;
        }
        uploader.upload_vertices(B::NAME, self.buffers.vertex_bytes(), <B::Vertex as VertexLayout>::ATTRIBUTES);
        if let Some(aux) = self.builder.auxiliary() {
            uploader.upload_vertices(aux.name, aux.bytes, aux.attributes);
        }
        uploader.upload_indices(self.buffers.index_words());
        self.uploaded = true;
    }

    /// Releases uploaded buffers. A bucket that was never uploaded releases
    /// nothing.
    pub fn destroy(self, uploader: &mut impl BufferUploader) {
        if self.uploaded {
            uploader.release();
        }
    }

    /// Vertex range of every added feature, in build order.
    pub fn feature_ranges(&self) -> &[FeatureVertexRange] {
        &self.feature_ranges
    }

    /// Features waiting for `add_features`.
    pub fn pending_features(&self) -> &[ExtrusionFeature] {
        &self.pending_features
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    pub fn buffers(&self) -> &MeshBuffers<B::Vertex> {
        &self.buffers
    }

    pub fn segments(&self) -> &SegmentVector {
        self.buffers.segments()
    }

    pub fn builder(&self) -> &B {
        &self.builder
    }
}

impl ExtrusionBucket<OutlineBuilder> {
    /// Hit-testing against outline ribbons is not supported; this always
    /// fails with [`MeshError::NotImplemented`].
    pub fn query_intersects_feature(
        &self,
        _query: &[TilePoint],
        _feature: &ExtrusionFeature,
    ) -> Result<bool, MeshError> {
        Err(MeshError::not_implemented("query_intersects_feature"))
    }
}
