//! Placement store: the authoritative in-memory placement map.
//!
//! Every change to the map goes through `apply_mutation`, which keeps the
//! mutation log in one place and lets the command stack snapshot around it.

use fp_core::id::PlacementKey;
use fp_core::model::{FloorPlanDimensions, PlacedFurniture, PlacementMap, Shape};

/// A single change to the placement map.
#[derive(Debug, Clone, PartialEq)]
pub enum PlacementMutation {
    /// Insert a new placement on top of the paint order.
    Add {
        key: PlacementKey,
        placed: Box<PlacedFurniture>,
    },
    /// Replace a placement's current geometry.
    SetCoordinates { key: PlacementKey, coordinates: Shape },
    /// Set a placement's applied rotation (degrees).
    SetRotation { key: PlacementKey, rotation: f64 },
    /// Remove one placement.
    Remove { key: PlacementKey },
    /// Remove every placement.
    Clear,
    /// Swap in a whole map (load, undo, redo).
    Replace { placements: PlacementMap },
}

/// Holds the placement map for one floor plan.
#[derive(Debug, Clone)]
pub struct PlacementStore {
    /// Current placements (single source of truth).
    pub placements: PlacementMap,

    /// Canvas size the placements live in.
    pub dimensions: FloorPlanDimensions,
}

impl PlacementStore {
    pub fn new(dimensions: FloorPlanDimensions) -> Self {
        Self {
            placements: PlacementMap::new(),
            dimensions,
        }
    }

    /// Apply a mutation. Returns `true` if the map changed.
    pub fn apply_mutation(&mut self, mutation: PlacementMutation) -> bool {
        match mutation {
            PlacementMutation::Add { key, placed } => {
                log::debug!("add {key:?} ({})", placed.furniture_id);
                self.placements.insert(key, *placed);
                true
            }
            PlacementMutation::SetCoordinates { key, coordinates } => {
                match self.placements.get_mut(key) {
                    Some(placed) if placed.coordinates != coordinates => {
                        placed.coordinates = coordinates;
                        true
                    }
                    Some(_) => false,
                    None => {
                        log::warn!("move of unknown placement {key:?} ignored");
                        false
                    }
                }
            }
            PlacementMutation::SetRotation { key, rotation } => {
                match self.placements.get_mut(key) {
                    Some(placed) if placed.rotation != rotation => {
                        log::debug!("rotate {key:?} {} -> {rotation}", placed.rotation);
                        placed.rotation = rotation;
                        true
                    }
                    Some(_) => false,
                    None => {
                        log::warn!("rotation of unknown placement {key:?} ignored");
                        false
                    }
                }
            }
            PlacementMutation::Remove { key } => {
                let removed = self.placements.remove(key).is_some();
                if removed {
                    log::debug!("remove {key:?}");
                }
                removed
            }
            PlacementMutation::Clear => {
                if self.placements.is_empty() {
                    return false;
                }
                log::info!("clear {} placements", self.placements.len());
                self.placements.clear();
                true
            }
            PlacementMutation::Replace { placements } => {
                if self.placements == placements {
                    return false;
                }
                log::debug!("replace map ({} placements)", placements.len());
                self.placements = placements;
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIMS: FloorPlanDimensions = FloorPlanDimensions {
        width: 800.0,
        height: 600.0,
    };

    fn placed(shape: Shape) -> Box<PlacedFurniture> {
        Box::new(PlacedFurniture {
            furniture_id: "desk".into(),
            label: "Desk".into(),
            area: "office".into(),
            coordinates: shape.clone(),
            original_coordinates: shape,
            rotation: 0.0,
        })
    }

    #[test]
    fn add_move_rotate_remove() {
        let mut store = PlacementStore::new(DIMS);
        let key = PlacementKey::intern("store_desk");

        assert!(store.apply_mutation(PlacementMutation::Add {
            key,
            placed: placed(Shape::rect(0.0, 0.0, 10.0, 10.0)),
        }));
        assert!(store.apply_mutation(PlacementMutation::SetCoordinates {
            key,
            coordinates: Shape::rect(5.0, 5.0, 10.0, 10.0),
        }));
        assert!(store.apply_mutation(PlacementMutation::SetRotation { key, rotation: 90.0 }));

        let entry = store.placements.get(key).unwrap();
        assert_eq!(entry.coordinates, Shape::rect(5.0, 5.0, 10.0, 10.0));
        assert_eq!(entry.original_coordinates, Shape::rect(0.0, 0.0, 10.0, 10.0));
        assert_eq!(entry.rotation, 90.0);

        assert!(store.apply_mutation(PlacementMutation::Remove { key }));
        assert!(!store.apply_mutation(PlacementMutation::Remove { key }));
        assert!(store.placements.is_empty());
    }

    #[test]
    fn no_op_mutations_report_unchanged() {
        let mut store = PlacementStore::new(DIMS);
        let key = PlacementKey::intern("store_noop");
        assert!(!store.apply_mutation(PlacementMutation::Clear));
        assert!(!store.apply_mutation(PlacementMutation::SetRotation { key, rotation: 90.0 }));

        store.apply_mutation(PlacementMutation::Add {
            key,
            placed: placed(Shape::rect(0.0, 0.0, 10.0, 10.0)),
        });
        assert!(!store.apply_mutation(PlacementMutation::SetCoordinates {
            key,
            coordinates: Shape::rect(0.0, 0.0, 10.0, 10.0),
        }));
        let same = store.placements.clone();
        assert!(!store.apply_mutation(PlacementMutation::Replace { placements: same }));
        assert!(store.apply_mutation(PlacementMutation::Clear));
    }
}
