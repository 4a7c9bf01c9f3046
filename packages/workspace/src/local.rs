use std::path::{Path, PathBuf};

use studio_editor::{Document, Store, StoreError};

use crate::fs::{read_optional, write_atomic};

/// Working document kept in a single JSON file
#[derive(Debug, Clone)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Store for LocalStore {
    fn load(&self) -> Result<Option<Document>, StoreError> {
        let Some(json) = read_optional(&self.path)? else {
            tracing::debug!(path = %self.path.display(), "No working document on disk");
            return Ok(None);
        };

        Document::from_json(&json)
            .map(Some)
            .map_err(|e| StoreError::InvalidDocument(e.to_string()))
    }

    fn save(&mut self, document: &Document) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(document)?;
        write_atomic(&self.path, &json)?;
        tracing::debug!(path = %self.path.display(), "Saved working document");
        Ok(())
    }
}
