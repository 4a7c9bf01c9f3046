//! Named projects with an append-only version history.
//!
//! The database is a single JSON file holding two tables:
//!
//! ```text
//! { "projects": [ { id, name, createdAt, updatedAt } ],
//!   "versions": [ { id, projectId, version, content, createdAt } ] }
//! ```
//!
//! Project names are unique and compared with surrounding whitespace
//! trimmed. Saving under a name creates the project on first use and appends
//! a version row every time.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use studio_editor::{Document, ProjectSink, Store, StoreError};

use crate::fs::{read_optional, write_atomic};

pub const DEFAULT_PROJECT_NAME: &str = "MyApp";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: u64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionRecord {
    pub id: u64,
    pub project_id: u64,
    /// 1-based, per project
    pub version: u32,
    pub content: Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Database {
    #[serde(default)]
    projects: Vec<ProjectRecord>,
    #[serde(default)]
    versions: Vec<VersionRecord>,
}

impl Database {
    fn position(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.projects.iter().position(|p| p.name == name)
    }

    fn project(&self, name: &str) -> Option<&ProjectRecord> {
        self.position(name).map(|index| &self.projects[index])
    }

    fn next_project_id(&self) -> u64 {
        self.projects.iter().map(|p| p.id).max().unwrap_or(0) + 1
    }

    fn next_version_id(&self) -> u64 {
        self.versions.iter().map(|v| v.id).max().unwrap_or(0) + 1
    }

    /// Find or insert a project, returning its index
    fn upsert(&mut self, name: &str, now: DateTime<Utc>) -> usize {
        if let Some(index) = self.position(name) {
            return index;
        }

        self.projects.push(ProjectRecord {
            id: self.next_project_id(),
            name: name.trim().to_string(),
            created_at: now,
            updated_at: now,
        });
        self.projects.len() - 1
    }
}

/// File-backed project and version tables
#[derive(Debug)]
pub struct ProjectStore {
    path: PathBuf,
    db: Database,
}

impl ProjectStore {
    /// Open the database at `path`; a missing file is an empty database
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let db = match read_optional(&path)? {
            Some(json) => serde_json::from_str(&json)?,
            None => Database::default(),
        };

        tracing::debug!(
            path = %path.display(),
            projects = db.projects.len(),
            versions = db.versions.len(),
            "Opened project store"
        );
        Ok(Self { path, db })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create a project. A blank name falls back to the default name; an
    /// existing project with the same name is returned as is.
    pub fn create_project(&mut self, name: &str) -> Result<ProjectRecord, StoreError> {
        let name = if name.trim().is_empty() {
            DEFAULT_PROJECT_NAME
        } else {
            name
        };

        let mut db = self.db.clone();
        let index = db.upsert(name, Utc::now());
        let record = db.projects[index].clone();
        self.commit(db)?;

        tracing::info!(name = %record.name, id = record.id, "Created project");
        Ok(record)
    }

    /// All projects, newest first
    pub fn list_projects(&self) -> Vec<ProjectRecord> {
        let mut projects = self.db.projects.clone();
        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        projects
    }

    pub fn project(&self, name: &str) -> Option<&ProjectRecord> {
        self.db.project(name)
    }

    /// Upsert the project by name and append a version holding `content`
    pub fn save_latest(&mut self, name: &str, content: &Value) -> Result<VersionRecord, StoreError> {
        if name.trim().is_empty() {
            return Err(StoreError::MissingName);
        }

        let now = Utc::now();
        let mut db = self.db.clone();
        let index = db.upsert(name, now);
        db.projects[index].updated_at = now;
        let project_id = db.projects[index].id;

        let version = db
            .versions
            .iter()
            .filter(|v| v.project_id == project_id)
            .map(|v| v.version)
            .max()
            .unwrap_or(0)
            + 1;

        let record = VersionRecord {
            id: db.next_version_id(),
            project_id,
            version,
            content: content.clone(),
            created_at: now,
        };
        db.versions.push(record.clone());
        self.commit(db)?;

        tracing::info!(name = name.trim(), version, "Saved project version");
        Ok(record)
    }

    /// Versions of a project, oldest first
    pub fn versions(&self, name: &str) -> Vec<&VersionRecord> {
        let Some(project) = self.db.project(name) else {
            return Vec::new();
        };

        let mut versions: Vec<_> = self
            .db
            .versions
            .iter()
            .filter(|v| v.project_id == project.id)
            .collect();
        versions.sort_by_key(|v| v.version);
        versions
    }

    pub fn latest_version(&self, name: &str) -> Option<&VersionRecord> {
        self.versions(name).pop()
    }

    /// Decode the newest version of a project as a document
    pub fn latest_document(&self, name: &str) -> Result<Document, StoreError> {
        let version = self
            .latest_version(name)
            .ok_or_else(|| StoreError::ProjectNotFound(name.to_string()))?;

        Document::deserialize(&version.content)
            .map_err(|e| StoreError::InvalidDocument(e.to_string()))
    }

    /// View one project as a working-document store
    pub fn project_store(self, name: impl Into<String>) -> ProjectVersions {
        ProjectVersions {
            projects: self,
            name: name.into(),
        }
    }

    fn commit(&mut self, db: Database) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&db)?;
        write_atomic(&self.path, &json)?;
        self.db = db;
        Ok(())
    }
}

impl ProjectSink for ProjectStore {
    fn save_project(&mut self, name: &str, content: &Value) -> Result<(), StoreError> {
        self.save_latest(name, content).map(|_| ())
    }
}

/// Loads the latest version of one project and saves new versions of it
#[derive(Debug)]
pub struct ProjectVersions {
    projects: ProjectStore,
    name: String,
}

impl ProjectVersions {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn into_inner(self) -> ProjectStore {
        self.projects
    }
}

impl Store for ProjectVersions {
    fn load(&self) -> Result<Option<Document>, StoreError> {
        match self.projects.latest_document(&self.name) {
            Ok(document) => Ok(Some(document)),
            Err(StoreError::ProjectNotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn save(&mut self, document: &Document) -> Result<(), StoreError> {
        let content = serde_json::to_value(document)?;
        self.projects.save_latest(&self.name, &content).map(|_| ())
    }
}
