//! Persistence collaborator
//!
//! The sheet never mutates rows on its own: every change is a
//! `MutationRequest` executed against a `Persistence` backend, and the local
//! store is only updated from the backend's answer.
//!
//! Backends are blocking; the runtime calls them from worker threads.

mod http;
mod json_file;
mod memory;

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::config::{Backend, SheetConfig};
use crate::model::item::{Item, ItemId};

pub use http::HttpStore;
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

/// Transport or backend failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistError {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("row {0} not found")]
    NotFound(ItemId),

    #[error("invalid response: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(String),
}

/// Remote row storage
pub trait Persistence: Send + Sync {
    /// All rows, in display order
    fn list(&self) -> Result<Vec<Item>, PersistError>;

    /// Create a row; the backend assigns the id
    fn create(&self, name: &str, value: &str) -> Result<Item, PersistError>;

    /// Replace both mutable fields of a row
    fn update(&self, id: &ItemId, name: &str, value: &str) -> Result<Item, PersistError>;

    fn remove(&self, id: &ItemId) -> Result<(), PersistError>;
}

/// A single change to send to the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationRequest {
    Create { name: String, value: String },
    Update { id: ItemId, name: String, value: String },
    Remove { id: ItemId },
}

impl MutationRequest {
    /// Request that writes `item`'s fields onto its id
    pub fn update_to(item: &Item) -> Self {
        MutationRequest::Update {
            id: item.id.clone(),
            name: item.name.clone(),
            value: item.value.clone(),
        }
    }

    /// Request that re-creates `item`'s content under a fresh id
    pub fn create_from(item: &Item) -> Self {
        MutationRequest::Create {
            name: item.name.clone(),
            value: item.value.clone(),
        }
    }

    /// The existing row this request touches (creates have none)
    pub fn target(&self) -> Option<&ItemId> {
        match self {
            MutationRequest::Create { .. } => None,
            MutationRequest::Update { id, .. } | MutationRequest::Remove { id } => Some(id),
        }
    }

    /// Run the request against a backend
    pub fn execute(&self, store: &dyn Persistence) -> Result<MutationOutcome, PersistError> {
        match self {
            MutationRequest::Create { name, value } => {
                store.create(name, value).map(MutationOutcome::Created)
            }
            MutationRequest::Update { id, name, value } => {
                store.update(id, name, value).map(MutationOutcome::Updated)
            }
            MutationRequest::Remove { id } => {
                store.remove(id)?;
                Ok(MutationOutcome::Removed(id.clone()))
            }
        }
    }
}

/// What the backend reported back for a successful request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    Created(Item),
    Updated(Item),
    Removed(ItemId),
}

/// Build the backend selected by the configuration
pub fn from_config(config: &SheetConfig) -> Result<Arc<dyn Persistence>, PersistError> {
    match config.backend {
        Backend::Http => {
            let timeout = Duration::from_secs(config.request_timeout_secs);
            tracing::info!("Using HTTP backend at {}", config.server_url);
            Ok(Arc::new(HttpStore::new(&config.server_url, timeout)?))
        }
        Backend::Memory => {
            tracing::info!("Using in-memory backend");
            Ok(Arc::new(MemoryStore::new()))
        }
        Backend::File => {
            let path = config
                .data_file
                .clone()
                .or_else(crate::config_paths::default_data_file)
                .ok_or_else(|| PersistError::Io("No data file location available".into()))?;
            tracing::info!("Using JSON file backend at {}", path.display());
            Ok(Arc::new(JsonFileStore::new(path)))
        }
    }
}
