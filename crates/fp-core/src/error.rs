//! Error types for floor-plan data handling.

use thiserror::Error;

/// Errors raised while loading catalogs, decoding shapes, or (de)serializing
/// placement maps.
#[derive(Error, Debug)]
pub enum FloorPlanError {
    /// No configuration is registered under this floor-plan id.
    #[error("unknown floor plan: {0}")]
    UnknownFloorPlan(String),

    /// The floor plan's palette has no item with this id.
    #[error("floor plan {plan} has no furniture item {item}")]
    UnknownCatalogItem {
        /// The floor-plan id that was searched.
        plan: String,
        /// The missing item id.
        item: String,
    },

    /// Shape data that cannot describe a footprint.
    #[error("invalid shape: {0}")]
    InvalidShape(String),

    /// Floor-plan dimensions must be positive.
    #[error("invalid dimensions for floor plan {plan}: {width}x{height}")]
    InvalidDimensions {
        plan: String,
        width: f64,
        height: f64,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FloorPlanError>;
