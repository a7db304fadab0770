//! # Legacy Extrusion
//!
//! Beveled walls with smoothed normals, a flat roof, and a per-vertex
//! centroid written to a parallel array.
//!
//! ## Bevel
//!
//! Every corner `c` of a ring is replaced by two points pulled back along its
//! adjacent edges:
//!
//! ```text
//! a = c - unit(c - prev) * BEVEL_OFFSET
//! b = c + unit(next - c) * BEVEL_OFFSET
//! ```
//!
//! Each bevel edge `a → b` gets the normal `perp(unit(b - a))`. A beveled
//! point's normal is the unit sum of the two bevel normals around it, taken
//! over the whole ring with circular wrap before anything is written.

use config::constants::{RoofStrategy, BEVEL_OFFSET, EDGE_DISTANCE_WRAP};
use glam::{DVec2, DVec3};
use tile_geometry::{is_boundary_edge, Polygon, Ring, TilePoint};

use super::{
    active_rings, emit_wall_quad, should_skip_polygon, triangulate_roof, AuxiliaryBuffer, BuildContext,
    VariantBuilder,
};
use crate::large_mesh::fill_large_mesh;
use crate::layout::{CentroidVertex, LegacyVertex, VertexLayout};
use crate::sink::MeshSink;
use crate::ExtrusionFeature;

/// Running sum of the positions written for one polygon.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CentroidAccumulator {
    sum: DVec2,
    count: usize,
}

impl CentroidAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the unquantized position of one written vertex.
    #[inline]
    pub fn add(&mut self, position: DVec2) {
        self.sum += position;
        self.count += 1;
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Floor of the mean position, or `None` if nothing was added.
    ///
    /// # Example
    ///
    /// ```rust
    /// use extrusion_mesh::builders::CentroidAccumulator;
    /// use glam::DVec2;
    ///
    /// let mut centroid = CentroidAccumulator::new();
    /// centroid.add(DVec2::new(0.0, -0.5));
    /// centroid.add(DVec2::new(1.5, -0.5));
    /// // 0.75 and -0.5, floored
    /// assert_eq!(centroid.finish().unwrap().centroid, [0, -1]);
    /// ```
    pub fn finish(&self) -> Option<CentroidVertex> {
        if self.count == 0 {
            return None;
        }
        let mean = self.sum / self.count as f64;
        Some(CentroidVertex::new(mean.x.floor() as i64, mean.y.floor() as i64))
    }
}

/// Builder for the legacy fill-extrusion layout.
#[derive(Debug, Clone, Default)]
pub struct LegacyBuilder {
    centroids: Vec<CentroidVertex>,
}

impl LegacyBuilder {
    /// Centroid array, parallel to the main vertex array.
    pub fn centroids(&self) -> &[CentroidVertex] {
        &self.centroids
    }
}

/// A ring after beveling: two points per corner and one normal per point.
#[derive(Debug, Clone, Default)]
pub(crate) struct BeveledRing {
    pub points: Vec<DVec2>,
    pub normals: Vec<DVec2>,
}

/// Bevels every corner of `corners` (without closing duplicate).
pub(crate) fn bevel_ring(corners: &[TilePoint]) -> BeveledRing {
    let n = corners.len();
    if n == 0 {
        return BeveledRing::default();
    }

    let mut points = Vec::with_capacity(2 * n);
    let mut bevel_normals = Vec::with_capacity(n);
    for i in 0..n {
        let prev = corners[(i + n - 1) % n].as_dvec2();
        let cur = corners[i].as_dvec2();
        let next = corners[(i + 1) % n].as_dvec2();

        let a = cur - (cur - prev).normalize_or_zero() * BEVEL_OFFSET;
        let b = cur + (next - cur).normalize_or_zero() * BEVEL_OFFSET;
        points.push(a);
        points.push(b);
        bevel_normals.push((b - a).normalize_or_zero().perp());
    }

    let len = 2 * n;
    let mut normals = vec![DVec2::ZERO; len];
    for i in 0..n {
        let joined = (bevel_normals[(i + n - 1) % n] + bevel_normals[i]).normalize_or_zero();
        normals[2 * i] = joined;
        normals[(2 * i + len - 1) % len] = joined;
    }

    BeveledRing { points, normals }
}

impl LegacyBuilder {
    fn add_walls<S: MeshSink<Vertex = LegacyVertex>>(
        ring: &BeveledRing,
        extent: i32,
        sink: &mut S,
        centroid: &mut CentroidAccumulator,
    ) {
        let len = ring.points.len();
        let mut distance = 0.0;

        for i in 0..len {
            let j = (i + 1) % len;
            let (p2, p1) = (ring.points[i], ring.points[j]);

            if is_boundary_edge(p2, p1, extent) {
                log::trace!("skipping boundary edge {:?} -> {:?}", p2, p1);
                continue;
            }
            let edge_length = p2.distance(p1);
            if edge_length == 0.0 {
                continue;
            }
            if distance + edge_length > EDGE_DISTANCE_WRAP {
                distance = 0.0;
            }

            let n1 = ring.normals[j].extend(0.0);
            let n2 = ring.normals[i].extend(0.0);
            let far = distance + edge_length;
            let quad = [
                LegacyVertex::new(p1, n1, false, far),
                LegacyVertex::new(p1, n1, true, far),
                LegacyVertex::new(p2, n2, false, distance),
                LegacyVertex::new(p2, n2, true, distance),
            ];
            for p in [p1, p1, p2, p2] {
                centroid.add(p);
            }
            emit_wall_quad(sink, quad);

            distance = far;
        }
    }

    fn add_roof<S: MeshSink<Vertex = LegacyVertex>>(
        ctx: &BuildContext<'_>,
        rings: &[Vec<DVec2>],
        sink: &mut S,
        centroid: &mut CentroidAccumulator,
    ) {
        let roof_vertex = |p: DVec2| LegacyVertex::new(p, DVec3::Z, true, 0.0);

        match ctx.config.roof_strategy {
            RoofStrategy::Direct => {
                let Some(triangles) = triangulate_roof(ctx, rings) else {
                    return;
                };
                let points: Vec<DVec2> = rings.iter().flatten().copied().collect();
                fill_large_mesh(sink, points.len(), &triangles, |i| {
                    centroid.add(points[i]);
                    roof_vertex(points[i])
                });
            }
            RoofStrategy::Subdivided => {
                let polygon = Polygon::new(
                    rings
                        .iter()
                        .map(|ring| Ring::new(ring.iter().copied().map(TilePoint::from_dvec2_rounded).collect()))
                        .collect(),
                );
                match ctx
                    .oracles
                    .subdivider
                    .subdivide_polygon(&polygon, ctx.config.extent, ctx.config.granularity)
                {
                    Ok(mesh) => fill_large_mesh(sink, mesh.vertex_count(), &mesh.triangles, |i| {
                        let p = mesh.vertices[i].as_dvec2();
                        centroid.add(p);
                        roof_vertex(p)
                    }),
                    Err(err) => log::warn!("skipping roof: {}", err),
                }
            }
        }
    }
}

impl VariantBuilder for LegacyBuilder {
    type Vertex = LegacyVertex;

    const NAME: &'static str = "fill-extrusion";

    fn add_polygon<S: MeshSink<Vertex = LegacyVertex>>(
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

        let start = sink.vertex_count();
        let mut centroid = CentroidAccumulator::new();

        let beveled: Vec<BeveledRing> = active_rings(polygon, extent)
            .map(|ring| bevel_ring(ring.open_points()))
            .collect();
        for ring in &beveled {
            Self::add_walls(ring, extent, sink, &mut centroid);
        }

        if feature.kind.is_areal() {
            let rings: Vec<Vec<DVec2>> = beveled.into_iter().map(|ring| ring.points).collect();
            Self::add_roof(ctx, &rings, sink, &mut centroid);
        }

        let written = sink.vertex_count() - start;
        if let Some(value) = centroid.finish() {
            debug_assert_eq!(centroid.count(), written);
            self.centroids.extend(std::iter::repeat(value).take(written));
        }
    }

    fn auxiliary(&self) -> Option<AuxiliaryBuffer<'_>> {
        Some(AuxiliaryBuffer {
            name: "centroid",
            bytes: bytemuck::cast_slice(&self.centroids),
            attributes: CentroidVertex::ATTRIBUTES,
        })
    }

    fn auxiliary_len(&self) -> usize {
        self.centroids.len()
    }
}

#[cfg(test)]
mod tests;
