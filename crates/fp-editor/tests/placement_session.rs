//! Integration tests: a full editing session on a catalog floor plan.
//!
//! Palette drop → drag → rotate → delete → save → reload, driven through
//! `FloorPlanEditor::handle_input` the way a host would.

use fp_core::catalog::FloorPlanCatalog;
use fp_core::model::{Point, Shape, SweepFlag};
use fp_editor::FloorPlanEditor;
use fp_editor::config::EditorConfig;
use fp_editor::controller::COLLISION_ALERT;
use fp_editor::dialogs::ScriptedDialogs;
use fp_editor::editor::SAVE_SUCCESS;
use fp_editor::input::InputEvent;
use fp_editor::persistence::{JsonFilePersistence, PlacementPersistence};
use pretty_assertions::assert_eq;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn make_editor(order_id: &str) -> FloorPlanEditor {
    let catalog = FloorPlanCatalog::from_json(include_str!("fixtures/catalog.json")).unwrap();
    FloorPlanEditor::from_catalog(&catalog, "investor-a", order_id, EditorConfig::default()).unwrap()
}

fn drop_from_palette(
    editor: &mut FloorPlanEditor,
    dialogs: &mut ScriptedDialogs,
    item_id: &str,
    x: f64,
    y: f64,
) -> bool {
    editor.handle_input(
        InputEvent::PaletteDragStart {
            item_id: item_id.into(),
        },
        dialogs,
    );
    editor.handle_input(InputEvent::Drop { x, y }, dialogs)
}

fn key(name: &str) -> InputEvent {
    InputEvent::Key {
        key: name.into(),
        ctrl: false,
        shift: false,
        alt: false,
        meta: false,
    }
}

#[test]
fn unknown_floor_plan_is_an_error() {
    let catalog = FloorPlanCatalog::from_json(include_str!("fixtures/catalog.json")).unwrap();
    assert!(FloorPlanEditor::from_catalog(&catalog, "nowhere", "1", EditorConfig::default()).is_err());
}

#[test]
fn drop_drag_rotate_delete() {
    init_logging();
    let mut editor = make_editor("9001");
    let mut dialogs = ScriptedDialogs::accepting();

    // Sofa is 80x35; centered on (200, 200).
    assert!(drop_from_palette(&mut editor, &mut dialogs, "sofa", 200.0, 200.0));
    let (sofa, placed) = editor.placements().iter().next().unwrap();
    assert_eq!(placed.coordinates, Shape::rect(160.0, 182.5, 80.0, 35.0));
    assert_eq!(placed.original_coordinates, Shape::rect(0.0, 0.0, 80.0, 35.0));
    assert_eq!(placed.furniture_id, "sofa");

    // Round table: arc template spans (-20, 0)..(60, 40), centered on (400, 400).
    assert!(drop_from_palette(&mut editor, &mut dialogs, "round-table", 400.0, 400.0));
    let (_, table) = editor.placements().iter().nth(1).unwrap();
    assert_eq!(
        table.coordinates,
        Shape::Arc {
            start: Point::new(380.0, 400.0),
            end: Point::new(420.0, 400.0),
            radius: 20.0,
            sweep: SweepFlag::Clockwise,
        }
    );

    // A second sofa on top of the first is refused with an alert.
    assert!(!drop_from_palette(&mut editor, &mut dialogs, "sofa", 210.0, 205.0));
    assert_eq!(editor.placements().len(), 2);
    assert_eq!(dialogs.alerts, vec![COLLISION_ALERT.to_string()]);

    // Drag the sofa 100 units right in several frames.
    assert!(editor.handle_input(InputEvent::PointerDown { x: 200.0, y: 200.0 }, &mut dialogs));
    assert_eq!(editor.selected(), Some(sofa));
    for x in [225.0, 250.0, 275.0, 300.0] {
        assert!(editor.handle_input(InputEvent::PointerMove { x, y: 200.0 }, &mut dialogs));
    }
    editor.handle_input(InputEvent::PointerUp { x: 300.0, y: 200.0 }, &mut dialogs);
    assert_eq!(
        editor.placements().get(sofa).unwrap().coordinates,
        Shape::rect(260.0, 182.5, 80.0, 35.0)
    );

    // Dragging it off the right edge is a silent no-op.
    editor.handle_input(InputEvent::PointerDown { x: 300.0, y: 200.0 }, &mut dialogs);
    assert!(!editor.handle_input(InputEvent::PointerMove { x: 790.0, y: 200.0 }, &mut dialogs));
    editor.handle_input(InputEvent::PointerLeave, &mut dialogs);
    assert_eq!(
        editor.placements().get(sofa).unwrap().coordinates,
        Shape::rect(260.0, 182.5, 80.0, 35.0)
    );

    assert!(editor.handle_input(key("r"), &mut dialogs));
    assert_eq!(editor.placements().get(sofa).unwrap().rotation, 90.0);

    assert!(editor.handle_input(key("Delete"), &mut dialogs));
    assert_eq!(editor.placements().len(), 1);
    assert!(editor.placements().get(sofa).is_none());
    assert_eq!(editor.selected(), None);
}

#[test]
fn save_and_reload_through_files() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let mut backend = JsonFilePersistence::new(dir.path());
    let mut dialogs = ScriptedDialogs::accepting();

    let mut editor = make_editor("3141");
    drop_from_palette(&mut editor, &mut dialogs, "corner-desk", 100.0, 100.0);
    drop_from_palette(&mut editor, &mut dialogs, "armchair", 500.0, 300.0);
    let (desk, _) = editor.placements().iter().next().unwrap();
    editor.select(Some(desk));
    editor.handle_input(key("r"), &mut dialogs);

    assert!(editor.save_with(&mut backend, &mut dialogs));
    assert_eq!(dialogs.alerts.last().map(String::as_str), Some(SAVE_SUCCESS));

    let mut reopened = make_editor("3141");
    assert!(reopened.load_with(&mut backend, &mut dialogs));
    assert_eq!(reopened.placements(), editor.placements());
    assert_eq!(reopened.placements().get(desk).unwrap().rotation, 90.0);
    assert!(!reopened.can_undo());

    // Other orders are unaffected.
    assert!(backend.load("2718").unwrap().is_empty());
}

#[test]
fn svg_reflects_selection() {
    let mut editor = make_editor("42");
    let mut dialogs = ScriptedDialogs::accepting();
    drop_from_palette(&mut editor, &mut dialogs, "sofa", 200.0, 200.0);
    let (sofa, _) = editor.placements().iter().next().unwrap();

    let theme = fp_render::SvgTheme::default();
    let plain = editor.render_svg(&theme);
    assert!(plain.contains(&format!("data-key=\"{sofa}\"")));
    assert!(plain.contains(">Sofa<"));

    editor.select(Some(sofa));
    assert_ne!(editor.render_svg(&theme), plain);
}
