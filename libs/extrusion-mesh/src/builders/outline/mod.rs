//! # Outline Ribbons
//!
//! A thin vertical ribbon along every ring edge, for drawing building
//! outlines. There is no roof, and consecutive ribbons are not mitered.
//!
//! ```text
//! t0 = p1 + o   t2 = p2 + o      (height h)
//! t1 = p1 - o   t3 = p2 - o      (height h)
//! b0 = p1 + o   b1 = p1 - o      (height 0)
//!
//! cap:  (t0, t1, t2) (t1, t3, t2)
//! side: (b0, b1, t1) (b0, t1, t0)
//! ```
//!
//! `o` is the unit edge normal scaled to half the line thickness.

use config::constants::OUTLINE_HALF_WIDTH;
use glam::DVec2;
use tile_geometry::{is_boundary_edge, Polygon};

use super::{active_rings, should_skip_polygon, BuildContext, VariantBuilder};
use crate::layout::OutlineVertex;
use crate::sink::MeshSink;
use crate::ExtrusionFeature;

/// Builder for the outline layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutlineBuilder;

impl OutlineBuilder {
    fn add_ribbons<S: MeshSink<Vertex = OutlineVertex>>(line: &[DVec2], height: f64, extent: i32, sink: &mut S) {
        for pair in line.windows(2) {
            let (p1, p2) = (pair[0], pair[1]);
            if p1 == p2 || is_boundary_edge(p1, p2, extent) {
                continue;
            }

            let offset = (p2 - p1).normalize_or_zero().perp() * OUTLINE_HALF_WIDTH;
            let room = sink.request_room(6);
            for (p, z) in [
                (p1 + offset, height),
                (p1 - offset, height),
                (p2 + offset, height),
                (p2 - offset, height),
                (p1 + offset, 0.0),
                (p1 - offset, 0.0),
            ] {
                sink.push_vertex(OutlineVertex::new(p, z));
            }

            let b = room.base;
            sink.push_triangle(b, b + 1, b + 2);
            sink.push_triangle(b + 1, b + 3, b + 2);
            sink.push_triangle(b + 4, b + 5, b + 1);
            sink.push_triangle(b + 4, b + 1, b);
        }
    }
}

impl VariantBuilder for OutlineBuilder {
    type Vertex = OutlineVertex;

    const NAME: &'static str = "fill-extrusion-outline";

    fn add_polygon<S: MeshSink<Vertex = OutlineVertex>>(
        &mut self,
        ctx: &BuildContext<'_>,
        feature: &ExtrusionFeature,
        polygon: &Polygon,
        sink: &mut S,
    ) {
        let extent = ctx.config.extent;
        if should_skip_polygon(polygon, extent) {
            return;
        }

        let height = feature.extrusion_height();
        let closed = feature.kind.is_areal();

        for ring in active_rings(polygon, extent) {
            let line: Vec<DVec2> = ctx
                .oracles
                .subdivider
                .subdivide_line(&ring.points, ctx.config.extent, ctx.config.granularity, closed)
                .iter()
                .map(|p| p.as_dvec2())
                .collect();
            Self::add_ribbons(&line, height, extent, sink);
        }
    }
}

#[cfg(test)]
mod tests;
