//! Persistence adapters for placement maps.
//!
//! The editor produces a `SaveRequest` (endpoint + JSON body). Browser hosts
//! send it with `fetch`; native hosts hand it to a `PlacementPersistence`.

use fp_core::FloorPlanError;
use fp_core::model::PlacementMap;
use fp_core::persist::{decode_payload, encode_payload, placements_endpoint};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A save ready to be sent: `PUT {url}` with `body`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    pub order_id: String,
    pub url: String,
    pub body: String,
}

impl SaveRequest {
    /// Serialize the whole map for `order_id`.
    pub fn new(order_id: &str, placements: &PlacementMap) -> Result<Self, PersistenceError> {
        Ok(Self {
            order_id: order_id.to_string(),
            url: placements_endpoint(order_id),
            body: encode_payload(placements)?,
        })
    }
}

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Data(#[from] FloorPlanError),

    /// The backend answered with a failure status.
    #[error("rejected by server ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Saving or loading is not possible right now.
    #[error("persistence unavailable: {0}")]
    Unavailable(String),
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Data(FloorPlanError::Json(err))
    }
}

/// Storage for order-scoped placement maps. Last write wins.
pub trait PlacementPersistence {
    /// Stored placements for `order_id`; an order never saved yields an
    /// empty map.
    fn load(&mut self, order_id: &str) -> Result<PlacementMap, PersistenceError>;

    /// Replace the stored map with the request body.
    fn save(&mut self, request: &SaveRequest) -> Result<(), PersistenceError>;
}

/// In-memory store of raw request bodies.
#[derive(Debug, Default)]
pub struct MemoryPersistence {
    bodies: HashMap<String, String>,
    fail_next_save: Option<String>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `save` fail with `Unavailable(reason)`.
    pub fn fail_next_save(&mut self, reason: impl Into<String>) {
        self.fail_next_save = Some(reason.into());
    }

    /// Raw body last saved for `order_id`.
    pub fn body(&self, order_id: &str) -> Option<&str> {
        self.bodies.get(order_id).map(String::as_str)
    }

    /// Seed a stored body (as if a previous session saved it).
    pub fn put_body(&mut self, order_id: &str, body: impl Into<String>) {
        self.bodies.insert(order_id.to_string(), body.into());
    }
}

impl PlacementPersistence for MemoryPersistence {
    fn load(&mut self, order_id: &str) -> Result<PlacementMap, PersistenceError> {
        match self.bodies.get(order_id) {
            Some(body) => Ok(decode_payload(body)?),
            None => Ok(PlacementMap::new()),
        }
    }

    fn save(&mut self, request: &SaveRequest) -> Result<(), PersistenceError> {
        if let Some(reason) = self.fail_next_save.take() {
            return Err(PersistenceError::Unavailable(reason));
        }
        self.bodies
            .insert(request.order_id.clone(), request.body.clone());
        Ok(())
    }
}

/// One `{order_id}.json` file per order under a directory.
#[derive(Debug, Clone)]
pub struct JsonFilePersistence {
    dir: PathBuf,
}

impl JsonFilePersistence {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, order_id: &str) -> Result<PathBuf, PersistenceError> {
        if order_id.is_empty()
            || order_id
                .chars()
                .any(|c| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
        {
            return Err(PersistenceError::Unavailable(format!(
                "order id {order_id:?} is not a valid file name"
            )));
        }
        Ok(self.dir.join(format!("{order_id}.json")))
    }
}

impl PlacementPersistence for JsonFilePersistence {
    fn load(&mut self, order_id: &str) -> Result<PlacementMap, PersistenceError> {
        let path = self.path_for(order_id)?;
        if !path.exists() {
            log::debug!("no stored placements at {}", path.display());
            return Ok(PlacementMap::new());
        }
        let body = fs::read_to_string(&path)?;
        Ok(decode_payload(&body)?)
    }

    fn save(&mut self, request: &SaveRequest) -> Result<(), PersistenceError> {
        let path = self.path_for(&request.order_id)?;
        fs::create_dir_all(&self.dir)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, &request.body)?;
        fs::rename(&tmp, &path)?;
        log::debug!("wrote {} bytes to {}", request.body.len(), path.display());
        Ok(())
    }
}
