//! # Variant Builders
//!
//! Wall, roof and outline generation for one classified polygon at a time.
//! Each variant owns its vertex layout and writes only through [`MeshSink`].
//!
//! ## Variants
//!
//! - [`LegacyBuilder`]: beveled walls with joined normals, 2-D positions and a
//!   parallel centroid array
//! - [`VolumetricBuilder`]: subdivided walls with 3-D positions and per-edge
//!   distances
//! - [`OutlineBuilder`]: thin ribbons along every edge, no roof
//!
//! ## Wall quads
//!
//! ```text
//! 1 ─── 3     0 = p1 bottom   1 = p1 top
//! │   / │     2 = p2 bottom   3 = p2 top
//! │  /  │     (0, 2, 1) (1, 2, 3)
//! 0 ─── 2
//! ```
//!
//! `p1` is the later point of the edge along the ring, so both triangles face
//! along `perp(p1 - p2)`.

pub mod legacy;
pub mod outline;
pub mod volumetric;

pub use legacy::{CentroidAccumulator, LegacyBuilder};
pub use outline::OutlineBuilder;
pub use volumetric::VolumetricBuilder;

use config::constants::BuildConfig;
use glam::DVec2;
use tile_geometry::{is_entirely_outside, GeometryOracles, Polygon, Ring};

use crate::layout::{AttributeDescriptor, VertexLayout};
use crate::sink::{MeshSink, SegmentRoom};
use crate::ExtrusionFeature;

/// Settings and oracles shared by every polygon of a build.
#[derive(Debug, Clone, Copy)]
pub struct BuildContext<'a> {
    pub config: &'a BuildConfig,
    pub oracles: &'a GeometryOracles,
}

/// A vertex array kept alongside the main one, uploaded with its own layout.
#[derive(Debug, Clone, Copy)]
pub struct AuxiliaryBuffer<'a> {
    pub name: &'static str,
    pub bytes: &'a [u8],
    pub attributes: &'static [AttributeDescriptor],
}

/// One fill-extrusion variant.
pub trait VariantBuilder: Default {
    type Vertex: VertexLayout;

    /// Name under which the main vertex buffer is uploaded.
    const NAME: &'static str;

    /// Configuration a bucket of this variant uses unless told otherwise.
    fn default_config() -> BuildConfig {
        BuildConfig::default()
    }

    /// Emits walls (and, for areal features, the roof) of one polygon.
    fn add_polygon<S: MeshSink<Vertex = Self::Vertex>>(
        &mut self,
        ctx: &BuildContext<'_>,
        feature: &ExtrusionFeature,
        polygon: &Polygon,
        sink: &mut S,
    );

    /// Extra per-vertex data uploaded next to the main buffer.
    fn auxiliary(&self) -> Option<AuxiliaryBuffer<'_>> {
        None
    }

    /// Number of entries in the auxiliary buffer.
    fn auxiliary_len(&self) -> usize {
        0
    }
}

// =============================================================================
// SHARED HELPERS
// =============================================================================

/// True when the polygon has no usable outer ring inside the tile.
pub(crate) fn should_skip_polygon(polygon: &Polygon, extent: i32) -> bool {
    match polygon.outer() {
        Some(outer) if !outer.is_empty() => {
            let outside = is_entirely_outside(&outer.points, extent);
            if outside {
                log::trace!("skipping polygon with outer ring outside the tile");
            }
            outside
        }
        _ => true,
    }
}

/// Rings of `polygon` that take part in wall generation.
pub(crate) fn active_rings(polygon: &Polygon, extent: i32) -> impl Iterator<Item = &Ring> {
    polygon
        .rings
        .iter()
        .filter(move |ring| !ring.is_empty() && !is_entirely_outside(&ring.points, extent))
}

/// Unit normal of the wall running from `p2` to `p1`.
#[inline]
pub(crate) fn wall_normal(p1: DVec2, p2: DVec2) -> DVec2 {
    (p1 - p2).perp().normalize_or_zero()
}

/// Writes one wall quad: `[p1 bottom, p1 top, p2 bottom, p2 top]`.
pub(crate) fn emit_wall_quad<S: MeshSink>(sink: &mut S, quad: [S::Vertex; 4]) -> SegmentRoom {
    let room = sink.request_room(4);
    for vertex in quad {
        sink.push_vertex(vertex);
    }
    let b = room.base;
    sink.push_triangle(b, b + 2, b + 1);
    sink.push_triangle(b + 1, b + 2, b + 3);
    room
}

/// Triangulates flattened rings with the context's triangulator.
///
/// Returns the triangle list with the 2nd and 3rd index of every triangle
/// swapped, or `None` (after logging) when the triangulator fails.
pub(crate) fn triangulate_roof(ctx: &BuildContext<'_>, rings: &[Vec<DVec2>]) -> Option<Vec<u32>> {
    let mut flattened = Vec::new();
    let mut hole_starts = Vec::new();
    for ring in rings.iter().filter(|ring| !ring.is_empty()) {
        if !flattened.is_empty() {
            hole_starts.push(flattened.len() / 2);
        }
        flattened.extend(ring.iter().flat_map(|p| [p.x, p.y]));
    }

    match ctx.oracles.triangulator.triangulate(&flattened, &hole_starts) {
        Ok(indices) => Some(
            indices
                .chunks_exact(3)
                .flat_map(|t| [t[0] as u32, t[2] as u32, t[1] as u32])
                .collect(),
        ),
        Err(err) => {
            log::warn!("skipping roof: {}", err);
            None
        }
    }
}
