//! Undo/Redo command stack.
//!
//! Every command is a pair of placement-map snapshots. Layouts hold tens of
//! items, so whole-map snapshots are cheap and make undo exact.
//!
//! Drag gestures use **batching**: the map is captured when the gesture
//! starts and when it ends, so a drag of hundreds of pointer-move frames is
//! a single undo step.

use crate::store::{PlacementMutation, PlacementStore};
use fp_core::model::PlacementMap;

/// A reversible change captured as before/after snapshots.
#[derive(Debug, Clone)]
pub struct Command {
    pub before: PlacementMap,
    pub after: PlacementMap,
    pub description: String,
}

/// Manages undo/redo stacks with batch grouping for drag gestures.
pub struct CommandStack {
    undo_stack: Vec<Command>,
    redo_stack: Vec<Command>,
    /// Maximum undo depth.
    max_depth: usize,
    /// Batch nesting depth (0 = not batching).
    batch_depth: usize,
    /// Map captured at the start of a batch, with its description.
    batch_snapshot: Option<(PlacementMap, String)>,
    /// Whether any mutation changed the map during the current batch.
    batch_dirty: bool,
}

impl CommandStack {
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::with_capacity(max_depth.min(256)),
            redo_stack: Vec::new(),
            max_depth: max_depth.max(1),
            batch_depth: 0,
            batch_snapshot: None,
            batch_dirty: false,
        }
    }

    fn push(&mut self, cmd: Command) {
        self.undo_stack.push(cmd);
        if self.undo_stack.len() > self.max_depth {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
    }

    /// Start a batch group. Mutations until the matching `end_batch()` are
    /// applied live but recorded as one undo step.
    pub fn begin_batch(&mut self, store: &PlacementStore, description: &str) {
        if self.batch_depth == 0 {
            self.batch_snapshot = Some((store.placements.clone(), description.to_string()));
            self.batch_dirty = false;
        }
        self.batch_depth += 1;
    }

    /// End a batch group. When the outermost batch closes and the map
    /// changed, one snapshot command is pushed.
    pub fn end_batch(&mut self, store: &PlacementStore) {
        if self.batch_depth == 0 {
            return;
        }
        self.batch_depth -= 1;
        if self.batch_depth == 0 {
            if let Some((before, description)) = self.batch_snapshot.take()
                && self.batch_dirty
                && before != store.placements
            {
                self.push(Command {
                    before,
                    after: store.placements.clone(),
                    description,
                });
            }
            self.batch_dirty = false;
        }
    }

    pub fn is_batching(&self) -> bool {
        self.batch_depth > 0
    }

    /// Apply a mutation and record it. Returns `true` if the map changed.
    pub fn execute(
        &mut self,
        store: &mut PlacementStore,
        mutation: PlacementMutation,
        description: &str,
    ) -> bool {
        if self.batch_depth > 0 {
            // The snapshot at end_batch() captures the cumulative effect.
            let changed = store.apply_mutation(mutation);
            self.batch_dirty |= changed;
            return changed;
        }

        let before = store.placements.clone();
        if !store.apply_mutation(mutation) {
            return false;
        }
        self.push(Command {
            before,
            after: store.placements.clone(),
            description: description.to_string(),
        });
        true
    }

    /// Undo the last command. Returns its description.
    pub fn undo(&mut self, store: &mut PlacementStore) -> Option<String> {
        let cmd = self.undo_stack.pop()?;
        store.apply_mutation(PlacementMutation::Replace {
            placements: cmd.before.clone(),
        });
        let desc = cmd.description.clone();
        self.redo_stack.push(cmd);
        Some(desc)
    }

    /// Redo the last undone command. Returns its description.
    pub fn redo(&mut self, store: &mut PlacementStore) -> Option<String> {
        let cmd = self.redo_stack.pop()?;
        store.apply_mutation(PlacementMutation::Replace {
            placements: cmd.after.clone(),
        });
        let desc = cmd.description.clone();
        self.undo_stack.push(cmd);
        Some(desc)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Forget all history (after loading a different layout).
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.batch_depth = 0;
        self.batch_snapshot = None;
        self.batch_dirty = false;
    }
}
