//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `EditorAction`s. The map lives in
//! Rust so the browser bridge and native hosts agree on bindings.

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    /// Rotate the selected furniture by one step.
    Rotate,
    /// Delete the selected furniture (confirmed).
    Delete,
    /// Remove every placement (confirmed).
    ClearAll,
    Undo,
    Redo,
    /// Persist the placement map.
    Save,
    Deselect,
    ToggleCollision,
}

/// Resolves key events into editor actions.
///
/// On macOS `meta` is ⌘; elsewhere `ctrl` serves the same role.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"r"`, `"Delete"`).
    /// Returns `None` if the combo has no binding.
    pub fn resolve(key: &str, ctrl: bool, shift: bool, alt: bool, meta: bool) -> Option<EditorAction> {
        if alt {
            return None;
        }
        let cmd = ctrl || meta;

        if cmd && shift {
            return match key {
                "z" | "Z" => Some(EditorAction::Redo),
                _ => None,
            };
        }

        if cmd {
            return match key {
                "z" | "Z" => Some(EditorAction::Undo),
                "y" | "Y" => Some(EditorAction::Redo),
                "s" | "S" => Some(EditorAction::Save),
                "Delete" | "Backspace" => Some(EditorAction::ClearAll),
                _ => None,
            };
        }

        if shift {
            return match key {
                "C" | "c" => Some(EditorAction::ToggleCollision),
                _ => None,
            };
        }

        match key {
            "r" | "R" => Some(EditorAction::Rotate),
            "Delete" | "Backspace" => Some(EditorAction::Delete),
            "Escape" => Some(EditorAction::Deselect),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(key: &str) -> Option<EditorAction> {
        ShortcutMap::resolve(key, false, false, false, false)
    }

    #[test]
    fn single_keys() {
        assert_eq!(plain("r"), Some(EditorAction::Rotate));
        assert_eq!(plain("R"), Some(EditorAction::Rotate));
        assert_eq!(plain("Delete"), Some(EditorAction::Delete));
        assert_eq!(plain("Backspace"), Some(EditorAction::Delete));
        assert_eq!(plain("Escape"), Some(EditorAction::Deselect));
        assert_eq!(plain("q"), None);
    }

    #[test]
    fn undo_redo_on_both_platforms() {
        assert_eq!(
            ShortcutMap::resolve("z", true, false, false, false),
            Some(EditorAction::Undo)
        );
        assert_eq!(
            ShortcutMap::resolve("z", false, false, false, true),
            Some(EditorAction::Undo)
        );
        assert_eq!(
            ShortcutMap::resolve("Z", false, true, false, true),
            Some(EditorAction::Redo)
        );
        assert_eq!(
            ShortcutMap::resolve("y", true, false, false, false),
            Some(EditorAction::Redo)
        );
    }

    #[test]
    fn save_and_clear() {
        assert_eq!(
            ShortcutMap::resolve("s", true, false, false, false),
            Some(EditorAction::Save)
        );
        assert_eq!(
            ShortcutMap::resolve("Backspace", false, false, false, true),
            Some(EditorAction::ClearAll)
        );
        assert_eq!(
            ShortcutMap::resolve("C", false, true, false, false),
            Some(EditorAction::ToggleCollision)
        );
    }

    #[test]
    fn alt_combos_are_unbound() {
        assert_eq!(ShortcutMap::resolve("r", false, false, true, false), None);
    }
}
