//! # Parallel Tile Builds
//!
//! Builds the buckets of independent tiles side by side. Each bucket is still
//! built on a single thread; only whole tiles run in parallel.

use std::sync::Arc;

use config::constants::BuildConfig;
use rayon::prelude::*;
use tile_geometry::GeometryOracles;

use crate::bucket::ExtrusionBucket;
use crate::builders::VariantBuilder;
use crate::feature::ExtrusionFeature;

/// Populates one bucket per entry of `tiles`, in order.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use extrusion_mesh::{build_tiles_parallel, ExtrusionFeature, VolumetricBuilder};
/// use config::constants::BuildConfig;
/// use tile_geometry::{GeometryOracles, Ring};
///
/// let tile = vec![ExtrusionFeature::polygon(0, vec![Ring::from_coords(&[(0, 0), (10, 0), (10, 10), (0, 10)])])];
/// let buckets = build_tiles_parallel::<VolumetricBuilder>(
///     vec![tile.clone(), tile],
///     BuildConfig::volumetric_default(),
///     Arc::new(GeometryOracles::default()),
/// );
/// assert_eq!(buckets.len(), 2);
/// ```
pub fn build_tiles_parallel<B>(
    tiles: Vec<Vec<ExtrusionFeature>>,
    config: BuildConfig,
    oracles: Arc<GeometryOracles>,
) -> Vec<ExtrusionBucket<B>>
where
    B: VariantBuilder + Send,
    B::Vertex: Send,
{
    tiles
        .into_par_iter()
        .map(|features| {
            let mut bucket = ExtrusionBucket::new(config, Arc::clone(&oracles));
            bucket.populate(features);
            bucket
        })
        .collect()
}
