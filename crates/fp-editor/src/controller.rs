//! Interaction controller: the placement editor's state machine.
//!
//! Translates canvas-space pointer input and editing commands into
//! `PlacementMutation`s applied through the `CommandStack`.
//!
//! | Gesture                    | Effect                                          |
//! |----------------------------|-------------------------------------------------|
//! | Drop palette item          | Centered placement, alert if it collides        |
//! | Press on furniture         | Select + start drag (grab offset from centroid) |
//! | Drag                       | Move if inside the floor and collision free     |
//! | Press on empty floor       | Clear selection                                 |
//! | Rotate                     | +90° about the current centroid                 |
//! | Delete / Clear all         | After confirmation                              |
//!
//! Moves that would leave the floor or overlap other furniture are silent
//! no-ops: the shape stays at its last valid position for that frame.

use crate::commands::CommandStack;
use crate::config::EditorConfig;
use crate::dialogs::Dialogs;
use crate::store::{PlacementMutation, PlacementStore};
use fp_core::collision::find_collision;
use fp_core::geometry::{bounding_box, centroid, translate, wrap_rotation};
use fp_core::id::PlacementKey;
use fp_core::model::{FurnitureCatalogItem, PlacedFurniture, Point};
use fp_render::hit::hit_test;

pub const COLLISION_ALERT: &str =
    "Cannot place furniture here - it overlaps with existing furniture.";
pub const CONFIRM_DELETE: &str = "Remove this furniture from the floor plan?";
pub const CONFIRM_CLEAR: &str = "Remove all furniture from the floor plan?";

/// What the pointer is currently doing.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionState {
    Idle,
    /// A palette item is being dragged toward the canvas.
    DraggingFromPalette { item: FurnitureCatalogItem },
    /// A placed item is being moved. `grab_offset` is pointer − centroid
    /// at press time.
    DraggingPlaced { key: PlacementKey, grab_offset: Point },
}

/// Owns interaction state and selection; the map itself lives in the
/// `PlacementStore` passed to each call.
#[derive(Debug, Clone)]
pub struct InteractionController {
    state: InteractionState,
    selected: Option<PlacementKey>,
    pub config: EditorConfig,
}

impl InteractionController {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            state: InteractionState::Idle,
            selected: None,
            config,
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn selected(&self) -> Option<PlacementKey> {
        self.selected
    }

    /// Select an existing placement, or clear the selection with `None`.
    /// Returns `false` if the key is not in the store.
    pub fn select(&mut self, store: &PlacementStore, key: Option<PlacementKey>) -> bool {
        match key {
            Some(k) if !store.placements.contains_key(k) => false,
            _ => {
                self.selected = key;
                true
            }
        }
    }

    pub fn deselect(&mut self) -> bool {
        self.selected.take().is_some()
    }

    /// Flip the collision-checking flag. Returns the new value.
    pub fn toggle_collision_checking(&mut self) -> bool {
        self.config.collision_checking = !self.config.collision_checking;
        log::info!("collision checking {}", if self.config.collision_checking { "on" } else { "off" });
        self.config.collision_checking
    }

    /// Forget selection and any gesture in progress (after loading a map).
    pub fn reset(&mut self) {
        self.state = InteractionState::Idle;
        self.selected = None;
    }

    // ─── Pointer ────────────────────────────────────────────────────────

    /// Press at canvas point `p`. Returns `true` if the selection changed.
    pub fn pointer_down(&mut self, store: &PlacementStore, commands: &mut CommandStack, p: Point) -> bool {
        // A press without a release (second finger, lost pointerup) closes
        // the previous drag first.
        self.finish_drag(store, commands);
        let previous = self.selected;
        match hit_test(&store.placements, p.x, p.y) {
            Some(key) => {
                let Some(placed) = store.placements.get(key) else {
                    return false;
                };
                let c = centroid(&placed.coordinates);
                self.state = InteractionState::DraggingPlaced {
                    key,
                    grab_offset: Point::new(p.x - c.x, p.y - c.y),
                };
                self.selected = Some(key);
                commands.begin_batch(store, "Move furniture");
            }
            None => {
                self.state = InteractionState::Idle;
                self.selected = None;
            }
        }
        previous != self.selected
    }

    /// Pointer moved to canvas point `p`. Returns `true` if a move was
    /// committed this frame.
    pub fn pointer_move(&mut self, store: &mut PlacementStore, commands: &mut CommandStack, p: Point) -> bool {
        let InteractionState::DraggingPlaced { key, grab_offset } = self.state else {
            return false;
        };
        let Some(placed) = store.placements.get(key) else {
            // Removed underneath us (undo during drag); stop dragging.
            self.finish_drag(store, commands);
            return false;
        };

        let current = centroid(&placed.coordinates);
        let dx = p.x - grab_offset.x - current.x;
        let dy = p.y - grab_offset.y - current.y;

        let bb = bounding_box(&placed.coordinates);
        let dims = store.dimensions;
        let clamped_dx = dx.max(-bb.x).min(dims.width - bb.right());
        let clamped_dy = dy.max(-bb.y).min(dims.height - bb.bottom());
        let eps = self.config.move_epsilon;
        if (clamped_dx - dx).abs() > eps || (clamped_dy - dy).abs() > eps {
            log::trace!("move of {key:?} rejected: would leave the floor");
            return false;
        }

        let moved = translate(&placed.coordinates, dx, dy);
        if self.config.collision_checking
            && let Some(other) = find_collision(
                &bounding_box(&moved),
                &store.placements,
                Some(key),
                self.config.collision_tolerance,
            )
        {
            log::trace!("move of {key:?} rejected: overlaps {other:?}");
            return false;
        }

        commands.execute(
            store,
            PlacementMutation::SetCoordinates {
                key,
                coordinates: moved,
            },
            "Move furniture",
        )
    }

    /// Pointer released or left the canvas. Ends a drag; selection stays.
    pub fn pointer_up(&mut self, store: &PlacementStore, commands: &mut CommandStack) {
        self.finish_drag(store, commands);
        if !matches!(self.state, InteractionState::DraggingFromPalette { .. }) {
            self.state = InteractionState::Idle;
        }
    }

    /// Close the undo batch of an in-progress drag and return to Idle.
    fn finish_drag(&mut self, store: &PlacementStore, commands: &mut CommandStack) {
        if !matches!(self.state, InteractionState::DraggingPlaced { .. }) {
            return;
        }
        if commands.is_batching() {
            commands.end_batch(store);
        }
        self.state = InteractionState::Idle;
    }

    // ─── Palette drag & drop ────────────────────────────────────────────

    pub fn start_palette_drag(&mut self, item: FurnitureCatalogItem) {
        log::debug!("palette drag started: {}", item.id);
        self.state = InteractionState::DraggingFromPalette { item };
    }

    pub fn cancel_palette_drag(&mut self) {
        if matches!(self.state, InteractionState::DraggingFromPalette { .. }) {
            self.state = InteractionState::Idle;
        }
    }

    /// Drop the item of the active palette drag at canvas point `p`.
    /// Without an active palette drag this does nothing.
    pub fn drop_at(
        &mut self,
        store: &mut PlacementStore,
        commands: &mut CommandStack,
        dialogs: &mut dyn Dialogs,
        p: Point,
    ) -> Option<PlacementKey> {
        if !matches!(self.state, InteractionState::DraggingFromPalette { .. }) {
            return None;
        }
        let InteractionState::DraggingFromPalette { item } =
            std::mem::replace(&mut self.state, InteractionState::Idle)
        else {
            return None;
        };
        self.drop_item(store, commands, dialogs, p, &item)
    }

    /// Place `item` centered on canvas point `p`.
    ///
    /// If collision checking is on and the centered footprint overlaps
    /// existing furniture, the user is alerted and nothing changes.
    pub fn drop_item(
        &mut self,
        store: &mut PlacementStore,
        commands: &mut CommandStack,
        dialogs: &mut dyn Dialogs,
        p: Point,
        item: &FurnitureCatalogItem,
    ) -> Option<PlacementKey> {
        let bb = bounding_box(&item.coordinates);
        let center = bb.center();
        let (dx, dy) = (p.x - center.x, p.y - center.y);

        if self.config.collision_checking
            && let Some(other) = find_collision(
                &bb.translated(dx, dy),
                &store.placements,
                None,
                self.config.collision_tolerance,
            )
        {
            log::warn!("drop of {} at ({}, {}) overlaps {other:?}", item.id, p.x, p.y);
            dialogs.alert(COLLISION_ALERT);
            return None;
        }

        let key = PlacementKey::generate();
        let placed = PlacedFurniture::from_catalog(item, translate(&item.coordinates, dx, dy));
        commands.execute(
            store,
            PlacementMutation::Add {
                key,
                placed: Box::new(placed),
            },
            "Place furniture",
        );
        Some(key)
    }

    // ─── Commands on the selection ──────────────────────────────────────

    /// Rotate the selected placement by one step. Returns `true` on change.
    pub fn rotate_selected(&mut self, store: &mut PlacementStore, commands: &mut CommandStack) -> bool {
        let Some(key) = self.selected else {
            return false;
        };
        let Some(placed) = store.placements.get(key) else {
            return false;
        };
        let rotation = wrap_rotation(placed.rotation, self.config.rotation_step);
        commands.execute(
            store,
            PlacementMutation::SetRotation { key, rotation },
            "Rotate furniture",
        )
    }

    /// Delete the selected placement after confirmation.
    pub fn delete_selected(
        &mut self,
        store: &mut PlacementStore,
        commands: &mut CommandStack,
        dialogs: &mut dyn Dialogs,
    ) -> bool {
        let Some(key) = self.selected else {
            return false;
        };
        if !dialogs.confirm(CONFIRM_DELETE) {
            return false;
        }
        let removed = commands.execute(store, PlacementMutation::Remove { key }, "Delete furniture");
        self.selected = None;
        removed
    }

    /// Remove every placement after confirmation.
    pub fn clear_all(
        &mut self,
        store: &mut PlacementStore,
        commands: &mut CommandStack,
        dialogs: &mut dyn Dialogs,
    ) -> bool {
        if !dialogs.confirm(CONFIRM_CLEAR) {
            return false;
        }
        let cleared = commands.execute(store, PlacementMutation::Clear, "Clear all furniture");
        self.selected = None;
        cleared
    }
}
