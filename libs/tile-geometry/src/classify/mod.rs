//! # Ring Classification
//!
//! Groups the flat ring list of a decoded feature into polygons.
//!
//! ## Contract
//!
//! - The first ring with non-zero area fixes the winding of outer rings.
//! - Every following ring with the same winding starts a new polygon; rings
//!   with the opposite winding are holes of the current polygon.
//! - Zero-area rings are dropped, except when the input has a single ring,
//!   which is returned untouched.
//! - When `max_rings > 1`, polygons with more rings keep their outer ring and
//!   the `max_rings - 1` holes with the largest absolute area.

use crate::types::{Polygon, Ring, TilePoint};

/// Groups rings into polygons with outer/hole structure.
pub trait RingClassifier {
    /// Classifies `rings`, keeping at most `max_rings` rings per polygon.
    fn classify(&self, rings: &[Ring], max_rings: usize) -> Vec<Polygon>;
}

/// Classifier based on the sign of each ring's shoelace area.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignedAreaClassifier;

impl RingClassifier for SignedAreaClassifier {
    fn classify(&self, rings: &[Ring], max_rings: usize) -> Vec<Polygon> {
        if rings.len() <= 1 {
            return vec![Polygon::new(rings.to_vec())];
        }

        let mut polygons: Vec<Vec<(Ring, u64)>> = Vec::new();
        let mut outer_is_negative: Option<bool> = None;

        for ring in rings {
            let area = signed_area(&ring.points);
            if area == 0 {
                log::trace!("dropping zero-area ring with {} points", ring.len());
                continue;
            }
            let negative = area < 0;
            let outer = *outer_is_negative.get_or_insert(negative);
            let entry = (ring.clone(), area.unsigned_abs());

            match polygons.last_mut() {
                Some(current) if negative != outer => current.push(entry),
                _ => polygons.push(vec![entry]),
            }
        }

        polygons
            .into_iter()
            .map(|mut rings| {
                if max_rings > 1 && rings.len() > max_rings {
                    log::debug!("truncating polygon from {} to {} rings", rings.len(), max_rings);
                    rings[1..].sort_by(|a, b| b.1.cmp(&a.1));
                    rings.truncate(max_rings);
                }
                Polygon::new(rings.into_iter().map(|(ring, _)| ring).collect())
            })
            .collect()
    }
}

/// Twice the signed shoelace area of a ring in tile space (y pointing down).
///
/// The closing duplicate, if present, contributes nothing.
///
/// # Example
///
/// ```rust
/// use tile_geometry::{signed_area, TilePoint};
///
/// let square = [
///     TilePoint::new(0, 0),
///     TilePoint::new(10, 0),
///     TilePoint::new(10, 10),
///     TilePoint::new(0, 10),
/// ];
/// assert_eq!(signed_area(&square), 200);
/// ```
pub fn signed_area(points: &[TilePoint]) -> i64 {
    let Some(&last) = points.last() else {
        return 0;
    };
    let mut sum = 0i64;
    let mut prev = last;
    for &p in points {
        sum += (prev.x as i64 - p.x as i64) * (p.y as i64 + prev.y as i64);
        prev = p;
    }
    sum
}
