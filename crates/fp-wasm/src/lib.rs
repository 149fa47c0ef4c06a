//! WASM bridge for the floor-plan editor.
//!
//! Compiled via `wasm-pack build --target web`. The page owns the palette
//! DOM and the network: pointer and drag events are forwarded here, the
//! returned SVG is swapped into the canvas element, and save requests are
//! sent with `fetch` and reported back through `finish_save`.

mod dialogs;

use dialogs::BrowserDialogs;
use fp_core::catalog::FloorPlanCatalog;
use fp_core::id::PlacementKey;
use fp_core::persist::decode_payload;
use fp_editor::FloorPlanEditor;
use fp_editor::config::EditorConfig;
use fp_editor::input::InputEvent;
use fp_editor::persistence::{PersistenceError, SaveRequest};
use fp_editor::shortcuts::{EditorAction, ShortcutMap};
use fp_render::svg::SvgTheme;
use serde_json::json;
use wasm_bindgen::prelude::*;

/// The browser-facing editor for one order on one floor plan.
#[wasm_bindgen]
pub struct FloorPlanCanvas {
    editor: FloorPlanEditor,
    dialogs: BrowserDialogs,
    dark_mode: bool,
}

#[wasm_bindgen]
impl FloorPlanCanvas {
    /// Create an editor for `plan_id` from the catalog JSON. `config_json`
    /// may be empty or a partial `EditorConfig`.
    #[wasm_bindgen(constructor)]
    pub fn new(
        catalog_json: &str,
        plan_id: &str,
        order_id: &str,
        config_json: &str,
    ) -> Result<FloorPlanCanvas, JsValue> {
        console_error_panic_hook_setup();

        let catalog = FloorPlanCatalog::from_json(catalog_json).map_err(to_js_error)?;
        let config = if config_json.trim().is_empty() {
            EditorConfig::default()
        } else {
            EditorConfig::from_json(config_json).map_err(to_js_error)?
        };
        let editor =
            FloorPlanEditor::from_catalog(&catalog, plan_id, order_id, config).map_err(to_js_error)?;
        Ok(Self {
            editor,
            dialogs: BrowserDialogs,
            dark_mode: false,
        })
    }

    /// Palette items grouped by area:
    /// `[{"area":"...","items":[{"id","label"}...]}...]`.
    pub fn palette_json(&self) -> String {
        let groups: Vec<serde_json::Value> = self
            .editor
            .plan()
            .items_by_area()
            .into_iter()
            .map(|(area, items)| {
                let items: Vec<serde_json::Value> = items
                    .iter()
                    .map(|item| json!({ "id": item.id, "label": item.label }))
                    .collect();
                json!({ "area": area, "items": items })
            })
            .collect();
        serde_json::Value::Array(groups).to_string()
    }

    // ─── Rendering ───────────────────────────────────────────────────────

    pub fn render_svg(&self) -> String {
        let theme = if self.dark_mode {
            SvgTheme::dark()
        } else {
            SvgTheme::light()
        };
        self.editor.render_svg(&theme)
    }

    pub fn set_theme(&mut self, is_dark: bool) {
        self.dark_mode = is_dark;
    }

    /// Returns the zoom actually applied.
    pub fn set_zoom(&mut self, zoom: f64) -> f64 {
        self.editor.set_zoom(zoom)
    }

    /// Screen position of the canvas' top-left corner (from
    /// `getBoundingClientRect`).
    pub fn set_canvas_origin(&mut self, x: f64, y: f64) {
        self.editor.set_canvas_origin(x, y);
    }

    // ─── Pointer / drag & drop ───────────────────────────────────────────

    /// Returns true if the map or selection changed.
    pub fn handle_pointer_down(&mut self, x: f64, y: f64) -> bool {
        self.dispatch(InputEvent::PointerDown { x, y })
    }

    pub fn handle_pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.dispatch(InputEvent::PointerMove { x, y })
    }

    pub fn handle_pointer_up(&mut self, x: f64, y: f64) -> bool {
        self.dispatch(InputEvent::PointerUp { x, y })
    }

    pub fn handle_pointer_leave(&mut self) -> bool {
        self.dispatch(InputEvent::PointerLeave)
    }

    pub fn start_palette_drag(&mut self, item_id: &str) {
        self.dispatch(InputEvent::PaletteDragStart {
            item_id: item_id.to_string(),
        });
    }

    pub fn end_palette_drag(&mut self) {
        self.dispatch(InputEvent::PaletteDragEnd);
    }

    /// Drop the dragged palette item at client position (`x`, `y`).
    pub fn handle_drop(&mut self, x: f64, y: f64) -> bool {
        self.dispatch(InputEvent::Drop { x, y })
    }

    // ─── Commands ────────────────────────────────────────────────────────

    /// Handle a keyboard event. Returns a JSON string:
    /// `{"changed":bool, "action":"<action_name>"}`. When the action is
    /// `"save"`, collect the request with `take_save_request_json`.
    pub fn handle_key(&mut self, key: &str, ctrl: bool, shift: bool, alt: bool, meta: bool) -> String {
        let Some(action) = ShortcutMap::resolve(key, ctrl, shift, alt, meta) else {
            return json!({ "changed": false, "action": "none" }).to_string();
        };
        let changed = self.editor.perform(action, &mut self.dialogs);
        json!({ "changed": changed, "action": action_to_name(action) }).to_string()
    }

    pub fn rotate_selected(&mut self) -> bool {
        self.editor.perform(EditorAction::Rotate, &mut self.dialogs)
    }

    pub fn delete_selected(&mut self) -> bool {
        self.editor.perform(EditorAction::Delete, &mut self.dialogs)
    }

    pub fn clear_all(&mut self) -> bool {
        self.editor.perform(EditorAction::ClearAll, &mut self.dialogs)
    }

    pub fn undo(&mut self) -> bool {
        self.editor.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.editor.redo()
    }

    /// Returns the new collision-checking flag.
    pub fn toggle_collision_checking(&mut self) -> bool {
        self.editor.perform(EditorAction::ToggleCollision, &mut self.dialogs);
        self.editor.config().collision_checking
    }

    /// Key of the selected placement, or `""`.
    pub fn get_selected_key(&self) -> String {
        self.editor
            .selected()
            .map(|key| key.as_str().to_string())
            .unwrap_or_default()
    }

    /// Select a placement by key; `""` clears the selection.
    pub fn select_by_key(&mut self, key: &str) -> bool {
        let key = (!key.is_empty()).then(|| PlacementKey::intern(key));
        self.editor.select(key)
    }

    // ─── Persistence ─────────────────────────────────────────────────────

    pub fn get_placements_json(&self) -> String {
        serde_json::to_string(self.editor.placements()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Mark a load in flight; the page then fetches the order's placements.
    pub fn begin_load(&mut self) {
        self.editor.begin_load();
    }

    /// Install a fetched response body (`{"placements":...}`, a bare map,
    /// or `null`). Returns false and alerts if the body is malformed.
    pub fn finish_load(&mut self, body: &str) -> bool {
        let result = decode_payload(body).map_err(PersistenceError::from);
        self.editor.finish_load(result, &mut self.dialogs)
    }

    /// Start a save. Returns `{"ok":true,"url":...,"body":...}` for the page
    /// to `PUT`, or `{"ok":false,"error":...}`.
    pub fn begin_save_json(&mut self) -> String {
        match self.editor.begin_save() {
            Ok(request) => save_request_json(&request),
            Err(err) => json!({ "ok": false, "error": err.to_string() }).to_string(),
        }
    }

    /// Save queued by the keyboard shortcut, as in `begin_save_json`, or
    /// `""` if none is pending.
    pub fn take_save_request_json(&mut self) -> String {
        self.editor
            .take_save_request()
            .map(|request| save_request_json(&request))
            .unwrap_or_default()
    }

    /// Report the outcome of the `fetch`. `status` is the HTTP status (0 for
    /// network errors).
    pub fn finish_save(&mut self, ok: bool, status: u16, message: &str) -> bool {
        let result = if ok {
            Ok(())
        } else {
            Err(fetch_failure(status, message))
        };
        self.editor.finish_save(result, &mut self.dialogs)
    }

    pub fn is_saving(&self) -> bool {
        self.editor.is_saving()
    }

    pub fn is_loading(&self) -> bool {
        self.editor.is_loading()
    }
}

impl FloorPlanCanvas {
    fn dispatch(&mut self, event: InputEvent) -> bool {
        self.editor.handle_input(event, &mut self.dialogs)
    }
}

fn save_request_json(request: &SaveRequest) -> String {
    json!({
        "ok": true,
        "method": "PUT",
        "url": request.url,
        "body": request.body,
    })
    .to_string()
}

fn fetch_failure(status: u16, message: &str) -> PersistenceError {
    if status == 0 {
        PersistenceError::Unavailable(message.to_string())
    } else {
        PersistenceError::Rejected {
            status,
            message: message.to_string(),
        }
    }
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn action_to_name(action: EditorAction) -> &'static str {
    match action {
        EditorAction::Rotate => "rotate",
        EditorAction::Delete => "delete",
        EditorAction::ClearAll => "clearAll",
        EditorAction::Undo => "undo",
        EditorAction::Redo => "redo",
        EditorAction::Save => "save",
        EditorAction::Deselect => "deselect",
        EditorAction::ToggleCollision => "toggleCollision",
    }
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            dialogs::init_console_logger();
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("floor plan WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
