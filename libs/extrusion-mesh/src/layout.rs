//! # Vertex Layouts
//!
//! Fixed-point vertex structs matching the GPU attribute layouts of each
//! builder variant. Every struct is `#[repr(C)]` and `Pod`, so a vertex
//! array can be handed to the uploader as raw bytes.
//!
//! ## Quantization
//!
//! Values are truncated to an integer and stored with 16-bit two's-complement
//! wrap, the same as a store into a typed `Int16` array. Normals are scaled by
//! `2 * NORMAL_SCALE`; the legacy layout keeps the top/bottom flag in the low
//! bit of the x component.

use bytemuck::{Pod, Zeroable};
use config::constants::NORMAL_SCALE;
use glam::{DVec2, DVec3};

// =============================================================================
// ATTRIBUTE DESCRIPTORS
// =============================================================================

/// Component type of a vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    Int16,
}

/// A named vertex attribute, as bound by the render stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeDescriptor {
    pub name: &'static str,
    pub components: u8,
    pub kind: AttributeKind,
}

impl AttributeDescriptor {
    const fn int16(name: &'static str, components: u8) -> Self {
        Self {
            name,
            components,
            kind: AttributeKind::Int16,
        }
    }

    /// Size of the attribute in bytes.
    pub const fn byte_size(&self) -> usize {
        match self.kind {
            AttributeKind::Int16 => self.components as usize * 2,
        }
    }
}

/// A vertex struct with a published attribute layout.
pub trait VertexLayout: Pod {
    /// Attributes in declaration order.
    const ATTRIBUTES: &'static [AttributeDescriptor];

    /// Bytes per vertex.
    fn stride() -> usize {
        std::mem::size_of::<Self>()
    }
}

/// Stores `value` the way an `Int16` typed array would.
///
/// # Example
///
/// ```rust
/// use extrusion_mesh::layout::quantize;
///
/// assert_eq!(quantize(12.9), 12);
/// assert_eq!(quantize(-3.7), -3);
/// assert_eq!(quantize(32768.0), -32768);
/// ```
#[inline]
pub fn quantize(value: f64) -> i16 {
    (value as i32) as i16
}

#[inline]
fn scaled_normal(component: f64) -> i16 {
    quantize(component * NORMAL_SCALE * 2.0)
}

#[inline]
fn unscale_normal(component: i16) -> f64 {
    component as f64 / (NORMAL_SCALE * 2.0)
}

// =============================================================================
// LEGACY
// =============================================================================

/// Vertex of the legacy extrusion: 2-D position plus packed normal, top flag
/// and edge distance.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct LegacyVertex {
    /// `a_pos`
    pub pos: [i16; 2],
    /// `a_normal_ed`: normal x with the top flag in the low bit, normal y,
    /// normal z, rounded edge distance.
    pub normal_ed: [i16; 4],
}

impl LegacyVertex {
    pub fn new(pos: DVec2, normal: DVec3, top: bool, edge_distance: f64) -> Self {
        let flag = i32::from(top);
        Self {
            pos: [quantize(pos.x), quantize(pos.y)],
            normal_ed: [
                ((normal.x * NORMAL_SCALE).floor() as i32 * 2 + flag) as i16,
                scaled_normal(normal.y),
                scaled_normal(normal.z),
                quantize(edge_distance.round()),
            ],
        }
    }

    /// Whether this vertex sits at the top of its wall.
    #[inline]
    pub fn is_top(&self) -> bool {
        self.normal_ed[0] & 1 == 1
    }

    /// Decoded normal (approximate).
    pub fn normal(&self) -> DVec3 {
        DVec3::new(
            (self.normal_ed[0] >> 1) as f64 / NORMAL_SCALE,
            unscale_normal(self.normal_ed[1]),
            unscale_normal(self.normal_ed[2]),
        )
    }

    #[inline]
    pub fn edge_distance(&self) -> i16 {
        self.normal_ed[3]
    }
}

impl VertexLayout for LegacyVertex {
    const ATTRIBUTES: &'static [AttributeDescriptor] = &[
        AttributeDescriptor::int16("a_pos", 2),
        AttributeDescriptor::int16("a_normal_ed", 4),
    ];
}

/// Per-vertex polygon centroid, parallel to the legacy vertex array.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct CentroidVertex {
    /// `a_centroid`
    pub centroid: [i16; 2],
}

impl CentroidVertex {
    pub fn new(x: i64, y: i64) -> Self {
        Self {
            centroid: [x as i16, y as i16],
        }
    }
}

impl VertexLayout for CentroidVertex {
    const ATTRIBUTES: &'static [AttributeDescriptor] = &[AttributeDescriptor::int16("a_centroid", 2)];
}

// =============================================================================
// VOLUMETRIC
// =============================================================================

/// Vertex of the volumetric extrusion: 3-D position, normal and per-edge
/// distances.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct VolumetricVertex {
    /// `a_pos`: x, y, height
    pub pos: [i16; 3],
    /// `a_normal_ed`: scaled normal
    pub normal_ed: [i16; 3],
    /// `a_edge`: edge distance, max edge distance
    pub edge: [i16; 2],
}

impl VolumetricVertex {
    pub fn new(pos: DVec3, normal: DVec3, edge_distance: f64, max_edge_distance: f64) -> Self {
        Self {
            pos: [quantize(pos.x), quantize(pos.y), quantize(pos.z)],
            normal_ed: [scaled_normal(normal.x), scaled_normal(normal.y), scaled_normal(normal.z)],
            edge: [
                quantize(edge_distance.round()),
                quantize(max_edge_distance.round()),
            ],
        }
    }

    /// Decoded normal (approximate).
    pub fn normal(&self) -> DVec3 {
        DVec3::new(
            unscale_normal(self.normal_ed[0]),
            unscale_normal(self.normal_ed[1]),
            unscale_normal(self.normal_ed[2]),
        )
    }

    #[inline]
    pub fn height(&self) -> i16 {
        self.pos[2]
    }
}

impl VertexLayout for VolumetricVertex {
    const ATTRIBUTES: &'static [AttributeDescriptor] = &[
        AttributeDescriptor::int16("a_pos", 3),
        AttributeDescriptor::int16("a_normal_ed", 3),
        AttributeDescriptor::int16("a_edge", 2),
    ];
}

// =============================================================================
// OUTLINE
// =============================================================================

/// Vertex of the outline ribbon: position only.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct OutlineVertex {
    /// `a_pos`: x, y, height
    pub pos: [i16; 3],
}

impl OutlineVertex {
    pub fn new(pos: DVec2, height: f64) -> Self {
        Self {
            pos: [quantize(pos.x), quantize(pos.y), quantize(height)],
        }
    }
}

impl VertexLayout for OutlineVertex {
    const ATTRIBUTES: &'static [AttributeDescriptor] = &[AttributeDescriptor::int16("a_pos", 3)];
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn attribute_bytes(attrs: &[AttributeDescriptor]) -> usize {
        attrs.iter().map(AttributeDescriptor::byte_size).sum()
    }

    #[test]
    fn test_strides_match_attributes() {
        assert_eq!(LegacyVertex::stride(), 12);
        assert_eq!(CentroidVertex::stride(), 4);
        assert_eq!(VolumetricVertex::stride(), 16);
        assert_eq!(OutlineVertex::stride(), 6);

        assert_eq!(attribute_bytes(LegacyVertex::ATTRIBUTES), LegacyVertex::stride());
        assert_eq!(attribute_bytes(VolumetricVertex::ATTRIBUTES), VolumetricVertex::stride());
        assert_eq!(attribute_bytes(OutlineVertex::ATTRIBUTES), OutlineVertex::stride());
    }

    #[test]
    fn test_quantize_wraps_like_int16() {
        assert_eq!(quantize(40000.0), (40000 - 65536) as i16);
        assert_eq!(quantize(-0.9), 0);
    }

    #[test]
    fn test_legacy_top_flag_in_low_bit() {
        let normal = DVec3::new(-0.6, 0.8, 0.0);
        let bottom = LegacyVertex::new(DVec2::new(5.0, 6.0), normal, false, 0.0);
        let top = LegacyVertex::new(DVec2::new(5.0, 6.0), normal, true, 0.0);
        assert!(!bottom.is_top());
        assert!(top.is_top());
        assert_eq!(top.normal_ed[0] - bottom.normal_ed[0], 1);
        assert_eq!(bottom.normal_ed[0], (-0.6f64 * 8192.0).floor() as i16 * 2);
    }

    #[test]
    fn test_legacy_normal_decodes() {
        let normal = DVec3::new(0.6, -0.8, 0.0);
        let v = LegacyVertex::new(DVec2::ZERO, normal, true, 12.4);
        assert_relative_eq!(v.normal().x, 0.6, epsilon = 1e-3);
        assert_relative_eq!(v.normal().y, -0.8, epsilon = 1e-3);
        assert_eq!(v.edge_distance(), 12);
    }

    #[test]
    fn test_legacy_roof_normal() {
        let v = LegacyVertex::new(DVec2::new(1.0, 2.0), DVec3::Z, true, 0.0);
        assert_eq!(v.normal_ed, [1, 0, 16384, 0]);
    }

    #[test]
    fn test_volumetric_encoding() {
        let v = VolumetricVertex::new(DVec3::new(10.0, 20.0, 15.0), DVec3::new(0.0, -1.0, 0.0), 0.0, 10.0);
        assert_eq!(v.pos, [10, 20, 15]);
        assert_eq!(v.normal_ed, [0, -16384, 0]);
        assert_eq!(v.edge, [0, 10]);
        assert_eq!(v.height(), 15);
    }

    #[test]
    fn test_vertices_cast_to_bytes() {
        let vertices = [OutlineVertex::new(DVec2::new(1.0, 2.0), 3.0); 2];
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), 12);
    }
}
