//! `FloorPlanEditor`: the host-facing facade.
//!
//! Owns the placement store, undo history, interaction controller and the
//! save/load lifecycle for one order on one floor plan. Hosts feed it
//! `InputEvent`s in screen coordinates and supply `Dialogs`.

use crate::commands::CommandStack;
use crate::config::EditorConfig;
use crate::controller::InteractionController;
use crate::dialogs::Dialogs;
use crate::input::{CanvasTransform, InputEvent};
use crate::persistence::{PersistenceError, PlacementPersistence, SaveRequest};
use crate::shortcuts::{EditorAction, ShortcutMap};
use crate::store::{PlacementMutation, PlacementStore};
use fp_core::catalog::{FloorPlanCatalog, FloorPlanConfig};
use fp_core::error::Result as CoreResult;
use fp_core::id::PlacementKey;
use fp_core::model::{FurnitureCatalogItem, PlacementMap, Point};
use fp_render::svg::{SvgTheme, render_svg};

pub const SAVE_SUCCESS: &str = "Furniture placements saved successfully!";
pub const SAVE_FAILURE: &str = "Failed to save furniture placements";
pub const LOAD_FAILURE: &str = "Failed to load furniture placements";

pub struct FloorPlanEditor {
    store: PlacementStore,
    commands: CommandStack,
    controller: InteractionController,
    transform: CanvasTransform,
    plan: FloorPlanConfig,
    order_id: String,
    saving: bool,
    loading: bool,
    /// Save produced by a keyboard shortcut, waiting for the host to send it.
    pending_save: Option<SaveRequest>,
}

impl FloorPlanEditor {
    pub fn new(plan: FloorPlanConfig, order_id: impl Into<String>, config: EditorConfig) -> Self {
        let commands = CommandStack::new(config.undo_depth);
        Self {
            store: PlacementStore::new(plan.dimensions),
            commands,
            controller: InteractionController::new(config),
            transform: CanvasTransform::default(),
            plan,
            order_id: order_id.into(),
            saving: false,
            loading: false,
            pending_save: None,
        }
    }

    /// Editor for `plan_id` from a catalog.
    ///
    /// # Errors
    /// `UnknownFloorPlan` if the catalog has no such plan.
    pub fn from_catalog(
        catalog: &FloorPlanCatalog,
        plan_id: &str,
        order_id: impl Into<String>,
        config: EditorConfig,
    ) -> CoreResult<Self> {
        let plan = catalog.get(plan_id)?.clone();
        Ok(Self::new(plan, order_id, config))
    }

    // ─── Accessors ──────────────────────────────────────────────────────

    pub fn placements(&self) -> &PlacementMap {
        &self.store.placements
    }

    pub fn plan(&self) -> &FloorPlanConfig {
        &self.plan
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn config(&self) -> &EditorConfig {
        &self.controller.config
    }

    pub fn selected(&self) -> Option<PlacementKey> {
        self.controller.selected()
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn can_undo(&self) -> bool {
        self.commands.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.commands.can_redo()
    }

    pub fn transform(&self) -> CanvasTransform {
        self.transform
    }

    // ─── View ───────────────────────────────────────────────────────────

    /// Set the zoom factor, clamped to the configured range. Returns the
    /// zoom actually applied.
    pub fn set_zoom(&mut self, zoom: f64) -> f64 {
        self.transform.zoom = self.controller.config.clamp_zoom(zoom);
        self.transform.zoom
    }

    /// Screen position of the canvas' top-left corner.
    pub fn set_canvas_origin(&mut self, x: f64, y: f64) {
        self.transform.origin_x = x;
        self.transform.origin_y = y;
    }

    pub fn render_svg(&self, theme: &SvgTheme) -> String {
        render_svg(
            self.store.dimensions,
            &self.store.placements,
            self.controller.selected(),
            theme,
        )
    }

    // ─── Input ──────────────────────────────────────────────────────────

    /// Dispatch one input event. Returns `true` if the placement map or the
    /// selection changed.
    pub fn handle_input(&mut self, event: InputEvent, dialogs: &mut dyn Dialogs) -> bool {
        let point = event
            .position()
            .map(|(x, y)| self.transform.to_canvas(x, y))
            .unwrap_or(Point::new(0.0, 0.0));

        match event {
            InputEvent::PointerDown { .. } => {
                self.controller
                    .pointer_down(&self.store, &mut self.commands, point)
            }
            InputEvent::PointerMove { .. } => {
                self.controller
                    .pointer_move(&mut self.store, &mut self.commands, point)
            }
            InputEvent::PointerUp { .. } | InputEvent::PointerLeave => {
                self.controller.pointer_up(&self.store, &mut self.commands);
                false
            }
            InputEvent::PaletteDragStart { item_id } => {
                match self.plan.item(&item_id) {
                    Some(item) => self.controller.start_palette_drag(item.clone()),
                    None => log::warn!("palette drag of unknown item {item_id:?} ignored"),
                }
                false
            }
            InputEvent::PaletteDragEnd => {
                self.controller.cancel_palette_drag();
                false
            }
            InputEvent::Drop { .. } => self
                .controller
                .drop_at(&mut self.store, &mut self.commands, dialogs, point)
                .is_some(),
            InputEvent::Key {
                key,
                ctrl,
                shift,
                alt,
                meta,
            } => match ShortcutMap::resolve(&key, ctrl, shift, alt, meta) {
                Some(action) => self.perform(action, dialogs),
                None => false,
            },
        }
    }

    /// Place `item` centered on canvas point (`x`, `y`) without a palette
    /// drag.
    pub fn drop_item(
        &mut self,
        x: f64,
        y: f64,
        item: &FurnitureCatalogItem,
        dialogs: &mut dyn Dialogs,
    ) -> Option<PlacementKey> {
        self.controller.drop_item(
            &mut self.store,
            &mut self.commands,
            dialogs,
            Point::new(x, y),
            item,
        )
    }

    pub fn select(&mut self, key: Option<PlacementKey>) -> bool {
        self.controller.select(&self.store, key)
    }

    /// Run an editor action. Returns `true` if the map or selection changed.
    ///
    /// `Save` only queues a request; collect it with `take_save_request`.
    pub fn perform(&mut self, action: EditorAction, dialogs: &mut dyn Dialogs) -> bool {
        match action {
            EditorAction::Rotate => self
                .controller
                .rotate_selected(&mut self.store, &mut self.commands),
            EditorAction::Delete => {
                self.controller
                    .delete_selected(&mut self.store, &mut self.commands, dialogs)
            }
            EditorAction::ClearAll => {
                self.controller
                    .clear_all(&mut self.store, &mut self.commands, dialogs)
            }
            EditorAction::Undo => self.undo(),
            EditorAction::Redo => self.redo(),
            EditorAction::Deselect => self.controller.deselect(),
            EditorAction::ToggleCollision => {
                self.controller.toggle_collision_checking();
                false
            }
            EditorAction::Save => {
                match self.begin_save() {
                    Ok(request) => self.pending_save = Some(request),
                    Err(err) => log::warn!("save not started: {err}"),
                }
                false
            }
        }
    }

    pub fn undo(&mut self) -> bool {
        let Some(desc) = self.commands.undo(&mut self.store) else {
            return false;
        };
        log::debug!("undo: {desc}");
        self.drop_stale_selection();
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(desc) = self.commands.redo(&mut self.store) else {
            return false;
        };
        log::debug!("redo: {desc}");
        self.drop_stale_selection();
        true
    }

    fn drop_stale_selection(&mut self) {
        if let Some(key) = self.controller.selected()
            && !self.store.placements.contains_key(key)
        {
            self.controller.deselect();
        }
    }

    // ─── Save ───────────────────────────────────────────────────────────

    /// Serialize the whole map and mark a save in flight.
    ///
    /// # Errors
    /// `Unavailable` while another save is in flight; `Data` if the map
    /// cannot be serialized.
    pub fn begin_save(&mut self) -> Result<SaveRequest, PersistenceError> {
        if self.saving {
            return Err(PersistenceError::Unavailable(
                "a save is already in progress".into(),
            ));
        }
        let request = SaveRequest::new(&self.order_id, &self.store.placements)?;
        self.saving = true;
        log::info!(
            "saving {} placements for order {}",
            self.store.placements.len(),
            self.order_id
        );
        Ok(request)
    }

    /// Save queued by the `Save` action, if any.
    pub fn take_save_request(&mut self) -> Option<SaveRequest> {
        self.pending_save.take()
    }

    /// Complete a save started with `begin_save` and tell the user how it
    /// went. The map is never rolled back.
    pub fn finish_save(&mut self, result: Result<(), PersistenceError>, dialogs: &mut dyn Dialogs) -> bool {
        self.saving = false;
        match result {
            Ok(()) => {
                log::info!("saved placements for order {}", self.order_id);
                dialogs.alert(SAVE_SUCCESS);
                true
            }
            Err(err) => {
                log::error!("saving placements for order {} failed: {err}", self.order_id);
                dialogs.alert(&format!("{SAVE_FAILURE}: {err}"));
                false
            }
        }
    }

    /// Save through `adapter` synchronously.
    pub fn save_with(&mut self, adapter: &mut dyn PlacementPersistence, dialogs: &mut dyn Dialogs) -> bool {
        let result = self
            .begin_save()
            .and_then(|request| adapter.save(&request));
        self.finish_save(result, dialogs)
    }

    // ─── Load ───────────────────────────────────────────────────────────

    /// Mark a load in flight. Returns the order id to load.
    pub fn begin_load(&mut self) -> &str {
        self.loading = true;
        &self.order_id
    }

    /// Install loaded placements, resetting history and selection. On
    /// failure the current map is kept and the user is alerted.
    pub fn finish_load(
        &mut self,
        result: Result<PlacementMap, PersistenceError>,
        dialogs: &mut dyn Dialogs,
    ) -> bool {
        self.loading = false;
        match result {
            Ok(placements) => {
                log::info!(
                    "loaded {} placements for order {}",
                    placements.len(),
                    self.order_id
                );
                self.store
                    .apply_mutation(PlacementMutation::Replace { placements });
                self.commands.clear();
                self.controller.reset();
                self.pending_save = None;
                true
            }
            Err(err) => {
                log::error!("loading placements for order {} failed: {err}", self.order_id);
                dialogs.alert(&format!("{LOAD_FAILURE}: {err}"));
                false
            }
        }
    }

    /// Load through `adapter` synchronously.
    pub fn load_with(&mut self, adapter: &mut dyn PlacementPersistence, dialogs: &mut dyn Dialogs) -> bool {
        let order_id = self.begin_load().to_string();
        let result = adapter.load(&order_id);
        self.finish_load(result, dialogs)
    }
}
