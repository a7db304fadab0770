//! # Volumetric Extrusion
//!
//! Walls and roof with explicit 3-D positions. Rings are resampled by the
//! subdivision oracle first so long walls follow a curved projection.
//!
//! Edge distances restart on every edge: the later point of an edge gets
//! `0`, the earlier one the edge length, and all four vertices carry the
//! edge length as the maximum.

use config::constants::{BuildConfig, RoofStrategy};
use glam::{DVec2, DVec3};
use tile_geometry::{is_boundary_edge, Polygon};

use super::{
    active_rings, emit_wall_quad, should_skip_polygon, triangulate_roof, wall_normal, BuildContext,
    VariantBuilder,
};
use crate::large_mesh::fill_large_mesh;
use crate::layout::VolumetricVertex;
use crate::sink::MeshSink;
use crate::ExtrusionFeature;

/// Builder for the volumetric fill-extrusion layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct VolumetricBuilder;

impl VolumetricBuilder {
    fn add_walls<S: MeshSink<Vertex = VolumetricVertex>>(
        line: &[DVec2],
        height: f64,
        extent: i32,
        sink: &mut S,
    ) {
        for pair in line.windows(2) {
            let (p2, p1) = (pair[0], pair[1]);

            if is_boundary_edge(p1, p2, extent) {
                log::trace!("skipping boundary edge {:?} -> {:?}", p2, p1);
                continue;
            }
            let edge_length = p2.distance(p1);
            if edge_length == 0.0 {
                continue;
            }

            let normal = wall_normal(p1, p2).extend(0.0);
            let vertex = |p: DVec2, z: f64, distance: f64| {
                VolumetricVertex::new(p.extend(z), normal, distance, edge_length)
            };
            emit_wall_quad(
                sink,
                [
                    vertex(p1, 0.0, 0.0),
                    vertex(p1, height, 0.0),
                    vertex(p2, 0.0, edge_length),
                    vertex(p2, height, edge_length),
                ],
            );
        }
    }

    fn add_roof<S: MeshSink<Vertex = VolumetricVertex>>(
        ctx: &BuildContext<'_>,
        polygon: &Polygon,
        height: f64,
        sink: &mut S,
    ) {
        let roof_vertex = |p: DVec2| VolumetricVertex::new(p.extend(height), DVec3::Z, 0.0, 0.0);

        match ctx.config.roof_strategy {
            RoofStrategy::Direct => {
                let rings: Vec<Vec<DVec2>> = active_rings(polygon, ctx.config.extent)
                    .map(|ring| ring.open_points().iter().map(|p| p.as_dvec2()).collect())
                    .collect();
                let Some(triangles) = triangulate_roof(ctx, &rings) else {
                    return;
                };
                let points: Vec<DVec2> = rings.into_iter().flatten().collect();
                fill_large_mesh(sink, points.len(), &triangles, |i| roof_vertex(points[i]));
            }
            RoofStrategy::Subdivided => {
                match ctx
                    .oracles
                    .subdivider
                    .subdivide_polygon(polygon, ctx.config.extent, ctx.config.granularity)
                {
                    Ok(mesh) => fill_large_mesh(sink, mesh.vertex_count(), &mesh.triangles, |i| {
                        roof_vertex(mesh.vertices[i].as_dvec2())
                    }),
                    Err(err) => log::warn!("skipping roof: {}", err),
                }
            }
        }
    }
}

impl VariantBuilder for VolumetricBuilder {
    type Vertex = VolumetricVertex;

    const NAME: &'static str = "fill-extrusion-volumetric";

    fn default_config() -> BuildConfig {
        BuildConfig::volumetric_default()
    }

    fn add_polygon<S: MeshSink<Vertex = VolumetricVertex>>(
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
            Self::add_walls(&line, height, extent, sink);
        }

        if feature.kind.is_areal() {
            Self::add_roof(ctx, polygon, height, sink);
        }
    }
}
