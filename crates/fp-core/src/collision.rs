//! Bounding-box collision detection between placed furniture.
//!
//! Two boxes collide only when they overlap by more than the tolerance on
//! both axes, so furniture can be packed edge to edge (chairs against a
//! table) without rounding noise rejecting the placement.

use crate::geometry::bounding_box;
use crate::id::PlacementKey;
use crate::model::{Bounds, PlacementMap};

/// Overlap, in canvas units, that is still treated as "touching".
pub const COLLISION_TOLERANCE: f64 = 5.0;

/// Whether `a` and `b` overlap by more than `tolerance` on both axes.
pub fn boxes_collide(a: &Bounds, b: &Bounds, tolerance: f64) -> bool {
    a.overlap_x(b) > tolerance && a.overlap_y(b) > tolerance
}

/// First placement (other than `exclude`) whose box collides with `candidate`.
pub fn find_collision(
    candidate: &Bounds,
    placements: &PlacementMap,
    exclude: Option<PlacementKey>,
    tolerance: f64,
) -> Option<PlacementKey> {
    placements
        .iter()
        .filter(|(key, _)| Some(*key) != exclude)
        .find(|(_, placed)| boxes_collide(candidate, &bounding_box(&placed.coordinates), tolerance))
        .map(|(key, _)| key)
}

/// Whether `candidate` collides with any placement other than `exclude`,
/// using the standard tolerance.
pub fn overlaps(candidate: &Bounds, placements: &PlacementMap, exclude: Option<PlacementKey>) -> bool {
    find_collision(candidate, placements, exclude, COLLISION_TOLERANCE).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FurnitureCatalogItem, PlacedFurniture, Shape};

    fn map_with(entries: &[(&str, Shape)]) -> PlacementMap {
        entries
            .iter()
            .map(|(key, shape)| {
                let item = FurnitureCatalogItem {
                    id: "item".into(),
                    label: "Item".into(),
                    area: String::new(),
                    coordinates: shape.clone(),
                };
                (
                    PlacementKey::intern(key),
                    PlacedFurniture::from_catalog(&item, shape.clone()),
                )
            })
            .collect()
    }

    #[test]
    fn touching_boxes_do_not_collide() {
        let a = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let b = Bounds::new(10.0, 0.0, 10.0, 10.0);
        assert!(!boxes_collide(&a, &b, COLLISION_TOLERANCE));
    }

    #[test]
    fn seven_unit_overlap_collides() {
        let a = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let b = Bounds::new(3.0, 0.0, 10.0, 10.0);
        assert!(boxes_collide(&a, &b, COLLISION_TOLERANCE));
    }

    #[test]
    fn overlap_within_tolerance_is_allowed() {
        let a = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let b = Bounds::new(5.0, 0.0, 10.0, 10.0);
        assert!(!boxes_collide(&a, &b, COLLISION_TOLERANCE));
        // Deep overlap on x alone is not enough.
        let c = Bounds::new(1.0, 6.0, 10.0, 10.0);
        assert!(!boxes_collide(&a, &c, COLLISION_TOLERANCE));
    }

    #[test]
    fn overlaps_skips_excluded_key() {
        let map = map_with(&[("coll_a", Shape::rect(0.0, 0.0, 10.0, 10.0))]);
        let candidate = Bounds::new(2.0, 2.0, 10.0, 10.0);
        assert!(overlaps(&candidate, &map, None));
        assert!(!overlaps(&candidate, &map, Some(PlacementKey::intern("coll_a"))));
    }

    #[test]
    fn find_collision_reports_first_hit() {
        let map = map_with(&[
            ("coll_far", Shape::rect(100.0, 100.0, 10.0, 10.0)),
            ("coll_near", Shape::rect(0.0, 0.0, 10.0, 10.0)),
            ("coll_near_2", Shape::rect(1.0, 1.0, 10.0, 10.0)),
        ]);
        let candidate = Bounds::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(
            find_collision(&candidate, &map, None, COLLISION_TOLERANCE),
            Some(PlacementKey::intern("coll_near"))
        );
    }

    #[test]
    fn empty_map_never_collides() {
        assert!(!overlaps(&Bounds::new(0.0, 0.0, 1.0, 1.0), &PlacementMap::new(), None));
    }
}
