pub mod catalog;
pub mod collision;
pub mod error;
pub mod geometry;
pub mod id;
pub mod model;
pub mod persist;

pub use catalog::{FloorPlanCatalog, FloorPlanConfig};
pub use collision::{COLLISION_TOLERANCE, overlaps};
pub use error::FloorPlanError;
pub use id::PlacementKey;
pub use model::*;
