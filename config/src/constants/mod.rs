//! Centralized configuration values shared across the fill-extrusion pipeline.
//!
//! Each public item in this module documents its purpose and provides a minimal
//! usage example so that downstream crates can remain declarative and avoid
//! scattering literals.

use std::fmt;

// =============================================================================
// TILE SPACE
// =============================================================================

/// Side length of the tile-local coordinate space.
///
/// Geometry decoded from a vector tile lives in `[0, EXTENT]` on both axes,
/// with a buffer region outside of it shared with the neighbouring tiles.
///
/// # Examples
/// ```
/// use config::constants::EXTENT;
/// assert_eq!(EXTENT, 8192);
/// ```
pub const EXTENT: i32 = 8192;

/// Maximum number of rings kept per classified polygon.
///
/// Triangulation cost grows with the ring count, so only the largest rings
/// (by absolute area) survive past this limit.
///
/// # Examples
/// ```
/// use config::constants::EARCUT_MAX_RINGS;
/// assert!(EARCUT_MAX_RINGS > 1);
/// ```
pub const EARCUT_MAX_RINGS: usize = 500;

// =============================================================================
// BUFFER LIMITS
// =============================================================================

/// Maximum number of vertices addressable by a single segment.
///
/// Index buffers store `u16` values relative to the segment start.
///
/// # Examples
/// ```
/// use config::constants::MAX_VERTEX_ARRAY_LENGTH;
/// assert!(u16::try_from(MAX_VERTEX_ARRAY_LENGTH).is_ok());
/// ```
pub const MAX_VERTEX_ARRAY_LENGTH: usize = (1 << 16) - 1;

// =============================================================================
// FIXED-POINT ENCODING
// =============================================================================

/// Scale applied to unit normals before they are stored as `i16`.
///
/// Components are multiplied by this factor and by two; the low bit of the
/// x component is then free to carry the top/bottom flag.
///
/// # Examples
/// ```
/// use config::constants::NORMAL_SCALE;
/// assert_eq!(NORMAL_SCALE * 2.0, 16384.0);
/// ```
pub const NORMAL_SCALE: f64 = 8192.0;

/// Edge distance at which the accumulated wall distance restarts from zero.
///
/// # Examples
/// ```
/// use config::constants::EDGE_DISTANCE_WRAP;
/// let mut distance = 32_000.0;
/// let edge = 1_000.0;
/// if distance + edge > EDGE_DISTANCE_WRAP {
///     distance = 0.0;
/// }
/// assert_eq!(distance, 0.0);
/// ```
pub const EDGE_DISTANCE_WRAP: f64 = 32768.0;

// =============================================================================
// EXTRUSION GEOMETRY
// =============================================================================

/// Lower bound applied to the per-feature extrusion height.
///
/// # Examples
/// ```
/// use config::constants::MIN_EXTRUSION_HEIGHT;
/// assert_eq!(f64::max(3.0, MIN_EXTRUSION_HEIGHT), 15.0);
/// ```
pub const MIN_EXTRUSION_HEIGHT: f64 = 15.0;

/// Distance each ring corner is pulled back along its adjacent edges when the
/// legacy builder bevels a ring.
///
/// # Examples
/// ```
/// use config::constants::BEVEL_OFFSET;
/// assert!(BEVEL_OFFSET > 0.0);
/// ```
pub const BEVEL_OFFSET: f64 = 20.0;

/// Full width of the ribbon generated by the outline builder.
///
/// # Examples
/// ```
/// use config::constants::{OUTLINE_LINE_THICKNESS, OUTLINE_HALF_WIDTH};
/// assert_eq!(OUTLINE_LINE_THICKNESS / 2.0, OUTLINE_HALF_WIDTH);
/// ```
pub const OUTLINE_LINE_THICKNESS: f64 = 3.0;

/// Perpendicular offset of each ribbon side from the ring edge.
pub const OUTLINE_HALF_WIDTH: f64 = OUTLINE_LINE_THICKNESS / 2.0;

/// Default subdivision granularity (cells per tile side). A value of one
/// leaves geometry untouched.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_GRANULARITY;
/// assert_eq!(DEFAULT_GRANULARITY, 1);
/// ```
pub const DEFAULT_GRANULARITY: u32 = 1;

// =============================================================================
// BUILD CONFIGURATION
// =============================================================================

/// How roofs of areal features are triangulated.
///
/// # Examples
/// ```
/// use config::constants::RoofStrategy;
/// assert_eq!(RoofStrategy::default(), RoofStrategy::Direct);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoofStrategy {
    /// Flatten the polygon and hand it to the ear-clipping triangulator.
    #[default]
    Direct,
    /// Hand the polygon to the subdivision oracle, which returns a
    /// pre-triangulated, resampled mesh.
    Subdivided,
}

/// Immutable snapshot of the settings one bucket is built with.
///
/// # Examples
/// ```
/// use config::constants::BuildConfig;
/// let config = BuildConfig::default();
/// assert!(config.granularity >= 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildConfig {
    /// Tile extent used by the boundary-edge and out-of-bounds tests.
    pub extent: i32,
    /// Subdivision cells per tile side.
    pub granularity: u32,
    /// Roof triangulation strategy.
    pub roof_strategy: RoofStrategy,
}

impl BuildConfig {
    /// Builds a configuration enforcing strict validation of the supplied
    /// extent and granularity.
    ///
    /// # Examples
    /// ```
    /// use config::constants::{BuildConfig, RoofStrategy};
    /// let cfg = BuildConfig::new(4096, 8, RoofStrategy::Subdivided).expect("valid config");
    /// assert_eq!(cfg.granularity, 8);
    /// ```
    pub fn new(
        extent: i32,
        granularity: u32,
        roof_strategy: RoofStrategy,
    ) -> Result<Self, ConfigError> {
        if extent <= 0 {
            return Err(ConfigError::InvalidExtent(extent));
        }
        if granularity == 0 {
            return Err(ConfigError::InvalidGranularity(granularity));
        }
        Ok(Self {
            extent,
            granularity,
            roof_strategy,
        })
    }

    /// Defaults for the volumetric builder, which streams subdivided roofs.
    ///
    /// # Examples
    /// ```
    /// use config::constants::{BuildConfig, RoofStrategy};
    /// let cfg = BuildConfig::volumetric_default();
    /// assert_eq!(cfg.roof_strategy, RoofStrategy::Subdivided);
    /// ```
    pub fn volumetric_default() -> Self {
        Self {
            roof_strategy: RoofStrategy::Subdivided,
            ..Self::default()
        }
    }

    /// Returns a copy with a different roof strategy.
    pub fn with_roof_strategy(self, roof_strategy: RoofStrategy) -> Self {
        Self {
            roof_strategy,
            ..self
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            extent: EXTENT,
            granularity: DEFAULT_GRANULARITY,
            roof_strategy: RoofStrategy::Direct,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when the tile extent is zero or negative.
    InvalidExtent(i32),
    /// Raised when the subdivision granularity is zero.
    InvalidGranularity(u32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidExtent(value) => {
                write!(f, "extent must be positive: {value}")
            }
            ConfigError::InvalidGranularity(value) => {
                write!(f, "granularity must be >= 1: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
