//! Wire format for saving and loading a placement map.
//!
//! The backend stores one placement map per order:
//! `PUT /api/orders/{orderId}/furniture-placements` with `{"placements": {...}}`.

use crate::error::Result;
use crate::model::PlacementMap;
use serde::Serialize;

/// Path of the order-scoped placements endpoint.
pub fn placements_endpoint(order_id: &str) -> String {
    format!("/api/orders/{order_id}/furniture-placements")
}

/// Serialize the whole map as a save request body.
///
/// # Errors
/// Only if serialization itself fails.
pub fn encode_payload(placements: &PlacementMap) -> Result<String> {
    #[derive(Serialize)]
    struct Borrowed<'a> {
        placements: &'a PlacementMap,
    }
    Ok(serde_json::to_string(&Borrowed { placements })?)
}

/// Decode stored placements.
///
/// Accepts `{"placements": {...}}`, a bare map, `{"placements": null}`,
/// `null`, or an empty body; the last three yield an empty map.
///
/// # Errors
/// Malformed JSON or malformed placement records.
pub fn decode_payload(json: &str) -> Result<PlacementMap> {
    if json.trim().is_empty() {
        return Ok(PlacementMap::new());
    }
    let value: serde_json::Value = serde_json::from_str(json)?;
    let placements = match value {
        serde_json::Value::Null => PlacementMap::new(),
        serde_json::Value::Object(mut obj) if obj.contains_key("placements") => {
            match obj.remove("placements") {
                Some(serde_json::Value::Null) | None => PlacementMap::new(),
                Some(inner) => serde_json::from_value(inner)?,
            }
        }
        other => serde_json::from_value(other)?,
    };
    log::debug!("decoded {} stored placements", placements.len());
    Ok(placements)
}
