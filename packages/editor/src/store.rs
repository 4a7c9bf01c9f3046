//! Persistence boundaries for documents.
//!
//! [`Store`] keeps the working document between runs. [`ProjectSink`] receives
//! named project snapshots on an explicit save. Concrete backends live in the
//! workspace crate; [`MemoryStore`] is the in-process implementation.

use serde_json::Value;
use thiserror::Error;

use crate::Document;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Stored document is invalid: {0}")]
    InvalidDocument(String),

    #[error("Name is required")]
    MissingName,

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Working-document persistence
pub trait Store {
    /// Load the last saved document, `None` if nothing was saved yet
    fn load(&self) -> Result<Option<Document>, StoreError>;

    fn save(&mut self, document: &Document) -> Result<(), StoreError>;
}

/// Destination for explicit "save project" requests
pub trait ProjectSink {
    fn save_project(&mut self, name: &str, content: &Value) -> Result<(), StoreError>;
}

/// Keeps the serialized document in memory
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    snapshot: Option<String>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(document: &Document) -> Result<Self, StoreError> {
        Ok(Self {
            snapshot: Some(serde_json::to_string(document)?),
            saves: 0,
        })
    }

    pub fn snapshot(&self) -> Option<&str> {
        self.snapshot.as_deref()
    }

    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl Store for MemoryStore {
    fn load(&self) -> Result<Option<Document>, StoreError> {
        self.snapshot
            .as_deref()
            .map(|json| {
                Document::from_json(json).map_err(|e| StoreError::InvalidDocument(e.to_string()))
            })
            .transpose()
    }

    fn save(&mut self, document: &Document) -> Result<(), StoreError> {
        self.snapshot = Some(serde_json::to_string(document)?);
        self.saves += 1;
        Ok(())
    }
}

/// Collects saved projects in memory, in save order
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    pub saved: Vec<(String, Value)>,
}

impl ProjectSink for MemorySink {
    fn save_project(&mut self, name: &str, content: &Value) -> Result<(), StoreError> {
        if name.trim().is_empty() {
            return Err(StoreError::MissingName);
        }
        self.saved.push((name.to_string(), content.clone()));
        Ok(())
    }
}
