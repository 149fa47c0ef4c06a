//! Input abstraction layer.
//!
//! Normalizes pointer, palette drag-and-drop, and keyboard events from the
//! host UI into a unified `InputEvent` consumed by the editor. Pointer
//! positions arrive in screen space and are mapped to canvas space with a
//! `CanvasTransform`.

use fp_core::model::Point;

/// Maps screen (client) coordinates onto the floor-plan canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasTransform {
    /// Screen position of the canvas origin.
    pub origin_x: f64,
    pub origin_y: f64,
    /// Screen pixels per canvas unit.
    pub zoom: f64,
}

impl Default for CanvasTransform {
    fn default() -> Self {
        Self {
            origin_x: 0.0,
            origin_y: 0.0,
            zoom: 1.0,
        }
    }
}

impl CanvasTransform {
    /// `((client - origin) / zoom)`.
    pub fn to_canvas(&self, client_x: f64, client_y: f64) -> Point {
        Point::new(
            (client_x - self.origin_x) / self.zoom,
            (client_y - self.origin_y) / self.zoom,
        )
    }
}

/// A normalized input event. Positions are client (screen) coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed on the canvas.
    PointerDown { x: f64, y: f64 },

    /// Pointer moved over the canvas.
    PointerMove { x: f64, y: f64 },

    /// Pointer released.
    PointerUp { x: f64, y: f64 },

    /// Pointer left the canvas; ends a drag like `PointerUp`.
    PointerLeave,

    /// The user started dragging a palette item.
    PaletteDragStart { item_id: String },

    /// A palette drag ended without a drop on the canvas.
    PaletteDragEnd,

    /// A palette item was dropped on the canvas.
    Drop { x: f64, y: f64 },

    /// Keyboard shortcut.
    Key {
        key: String,
        ctrl: bool,
        shift: bool,
        alt: bool,
        meta: bool,
    },
}

impl InputEvent {
    /// Extract position if this is a positioned event.
    pub fn position(&self) -> Option<(f64, f64)> {
        match self {
            Self::PointerDown { x, y }
            | Self::PointerMove { x, y }
            | Self::PointerUp { x, y }
            | Self::Drop { x, y } => Some((*x, *y)),
            _ => None,
        }
    }
}
