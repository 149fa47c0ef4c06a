//! Hit testing: canvas point → placement lookup.
//!
//! Walks placements top to bottom (reverse paint order) and tests the drawn
//! outline, rotations included, so clicks on the empty corners of a rotated
//! or curved footprint fall through to whatever is underneath.

use crate::path::placed_outline;
use fp_core::id::PlacementKey;
use fp_core::model::PlacementMap;
use kurbo::Shape as _;

/// Find the topmost placement at canvas position (px, py).
/// Returns `None` if the point is on empty floor.
pub fn hit_test(placements: &PlacementMap, px: f64, py: f64) -> Option<PlacementKey> {
    let pt = kurbo::Point::new(px, py);
    placements
        .iter()
        .rev()
        .find(|(_, placed)| placed_outline(placed).contains(pt))
        .map(|(key, _)| key)
}
