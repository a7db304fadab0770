//! # Config Crate
//!
//! Centralized configuration constants for the fill-extrusion mesh pipeline.
//! Tile extent, buffer ceilings, fixed-point factors and the per-bucket
//! build configuration are defined here so the geometry and mesh crates
//! never scatter literals.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{BuildConfig, RoofStrategy, EXTENT, MAX_VERTEX_ARRAY_LENGTH};
//!
//! let cfg = BuildConfig::default();
//! assert_eq!(cfg.extent, EXTENT);
//! assert_eq!(cfg.roof_strategy, RoofStrategy::Direct);
//!
//! // Segments are addressed with 16-bit indices
//! assert_eq!(MAX_VERTEX_ARRAY_LENGTH, u16::MAX as usize);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Dependency Free**: Pure values, no platform-specific behavior
//! - **Renderer Compatible**: Fixed-point factors match the GPU attribute layouts

pub mod constants;
