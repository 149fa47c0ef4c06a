//! Editor configuration.

use fp_core::collision::COLLISION_TOLERANCE;
use serde::{Deserialize, Serialize};

/// Tunables for the interaction controller.
///
/// Every field has a default, so a host may pass a partial JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Reject drops and moves that overlap other furniture. Default: **true**.
    pub collision_checking: bool,

    /// Overlap (canvas units) still treated as touching. Default: 5.
    pub collision_tolerance: f64,

    /// Slack when comparing a clamped drag delta with the requested one.
    /// Default: 0.1.
    pub move_epsilon: f64,

    /// Degrees added per rotate command. Default: 90.
    pub rotation_step: f64,

    /// Maximum undo depth. Default: 100.
    pub undo_depth: usize,

    /// Allowed zoom range for screen → canvas conversion.
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            collision_checking: true,
            collision_tolerance: COLLISION_TOLERANCE,
            move_epsilon: 0.1,
            rotation_step: 90.0,
            undo_depth: 100,
            min_zoom: 0.1,
            max_zoom: 8.0,
        }
    }
}

impl EditorConfig {
    /// Parse a (possibly partial) JSON config.
    ///
    /// # Errors
    /// Malformed JSON, wrongly typed fields, or a zoom range that is not
    /// `0 < min_zoom <= max_zoom`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Self = serde_json::from_str(json)?;
        if !(config.min_zoom > 0.0 && config.min_zoom <= config.max_zoom && config.max_zoom.is_finite()) {
            return Err(serde::de::Error::custom(format!(
                "invalid zoom range {}..{}",
                config.min_zoom, config.max_zoom
            )));
        }
        Ok(config)
    }

    /// Clamp a requested zoom factor into the allowed range.
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        let clamped = zoom.max(self.min_zoom).min(self.max_zoom);
        if zoom.is_finite() && clamped > 0.0 {
            clamped
        } else {
            1.0
        }
    }
}
