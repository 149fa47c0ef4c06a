//! Static per-floor-plan configuration: canvas dimensions and the furniture
//! palette, keyed by floor-plan id (e.g. `"investor-a"`, `"custom-b"`).
//!
//! ```json
//! {
//!   "investor-a": {
//!     "dimensions": { "width": 800, "height": 600 },
//!     "items": [
//!       { "id": "sofa", "label": "Sofa", "area": "living",
//!         "coordinates": { "x": 0, "y": 0, "width": 80, "height": 35 } }
//!     ]
//!   }
//! }
//! ```

use crate::error::{FloorPlanError, Result};
use crate::model::{FloorPlanDimensions, FurnitureCatalogItem};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One floor plan's canvas and palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorPlanConfig {
    pub dimensions: FloorPlanDimensions,
    #[serde(default)]
    pub items: Vec<FurnitureCatalogItem>,
}

impl FloorPlanConfig {
    pub fn item(&self, item_id: &str) -> Option<&FurnitureCatalogItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    /// Palette items grouped by `area`, preserving declaration order inside
    /// each group.
    pub fn items_by_area(&self) -> Vec<(&str, Vec<&FurnitureCatalogItem>)> {
        let mut groups: Vec<(&str, Vec<&FurnitureCatalogItem>)> = Vec::new();
        for item in &self.items {
            match groups.iter_mut().find(|(area, _)| *area == item.area) {
                Some((_, members)) => members.push(item),
                None => groups.push((item.area.as_str(), vec![item])),
            }
        }
        groups
    }
}

/// Every known floor plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FloorPlanCatalog {
    plans: HashMap<String, FloorPlanConfig>,
}

impl FloorPlanCatalog {
    /// Parse and validate a catalog document.
    ///
    /// # Errors
    /// Fails on malformed JSON, malformed shapes, or non-positive dimensions.
    pub fn from_json(json: &str) -> Result<Self> {
        let catalog: Self = serde_json::from_str(json)?;
        for (id, plan) in &catalog.plans {
            let FloorPlanDimensions { width, height } = plan.dimensions;
            if !(width > 0.0 && height > 0.0) {
                return Err(FloorPlanError::InvalidDimensions {
                    plan: id.clone(),
                    width,
                    height,
                });
            }
        }
        log::debug!("loaded floor-plan catalog with {} plans", catalog.plans.len());
        Ok(catalog)
    }

    pub fn insert(&mut self, plan_id: impl Into<String>, config: FloorPlanConfig) {
        self.plans.insert(plan_id.into(), config);
    }

    /// Look up a floor plan.
    ///
    /// # Errors
    /// `UnknownFloorPlan` if no plan has this id.
    pub fn get(&self, plan_id: &str) -> Result<&FloorPlanConfig> {
        self.plans
            .get(plan_id)
            .ok_or_else(|| FloorPlanError::UnknownFloorPlan(plan_id.to_string()))
    }

    /// Look up one palette item of a floor plan.
    ///
    /// # Errors
    /// `UnknownFloorPlan` or `UnknownCatalogItem`.
    pub fn item(&self, plan_id: &str, item_id: &str) -> Result<&FurnitureCatalogItem> {
        self.get(plan_id)?
            .item(item_id)
            .ok_or_else(|| FloorPlanError::UnknownCatalogItem {
                plan: plan_id.to_string(),
                item: item_id.to_string(),
            })
    }

    /// Known floor-plan ids, sorted.
    pub fn plan_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.plans.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}
