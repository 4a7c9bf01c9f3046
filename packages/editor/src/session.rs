//! Edit session: the single owner of the working document.
//!
//! A session applies mutations, bumps a version counter on every change,
//! flushes the new document to its [`Store`] and collects user-facing
//! notifications for saves and failures. Persistence failures never abort an
//! edit; they are logged and surfaced as notifications.

use std::fmt;

use serde_json::Value;
use studio_model::{IdGenerator, NodeId, PalettePayload, PropMap};

use crate::{Document, EditorError, Mutation, ProjectSink, Store};

/// Outcome of applying a mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationResult {
    pub version: u64,
    pub changed: bool,
}

/// User-facing messages raised by the session
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    Saved { name: String },
    SaveFailed { name: String, reason: String },
    FlushFailed { reason: String },
    LoadFailed { reason: String },
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notification::Saved { name } => write!(f, "Saved \"{}\"", name),
            Notification::SaveFailed { name, reason } => {
                write!(f, "Save of \"{}\" failed: {}", name, reason)
            }
            Notification::FlushFailed { reason } => {
                write!(f, "Could not persist working document: {}", reason)
            }
            Notification::LoadFailed { reason } => {
                write!(f, "Could not restore working document, starting fresh: {}", reason)
            }
        }
    }
}

pub struct EditSession<S: Store> {
    document: Document,
    store: S,
    ids: IdGenerator,
    version: u64,
    notifications: Vec<Notification>,
}

impl<S: Store> EditSession<S> {
    /// Open a session, restoring the stored document or seeding a fresh one
    pub fn open(store: S) -> Self {
        let mut notifications = Vec::new();
        let document = match store.load() {
            Ok(Some(document)) => {
                tracing::info!(name = document.name(), "Restored working document");
                document
            }
            Ok(None) => {
                tracing::debug!("No stored document, seeding");
                Document::default()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load working document");
                notifications.push(Notification::LoadFailed {
                    reason: e.to_string(),
                });
                Document::default()
            }
        };

        let ids = IdGenerator::new(document.name());
        Self {
            document,
            store,
            ids,
            version: 0,
            notifications,
        }
    }

    /// Replace the id source (deterministic ids in tests and tooling)
    pub fn with_id_generator(mut self, ids: IdGenerator) -> Self {
        self.ids = ids;
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Apply a mutation; unchanged results do not bump the version or flush
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        let next = mutation.apply(&self.document, &mut self.ids)?;

        if next.same_snapshot(&self.document) {
            tracing::debug!(mutation = mutation.name(), "Mutation was a no-op");
            return Ok(MutationResult {
                version: self.version,
                changed: false,
            });
        }

        self.document = next;
        self.version += 1;
        tracing::debug!(mutation = mutation.name(), version = self.version, "Applied mutation");
        self.flush();

        Ok(MutationResult {
            version: self.version,
            changed: true,
        })
    }

    /// Instantiate a palette payload under `parent_id` (the root when `None`)
    pub fn insert_from_palette(
        &mut self,
        payload: &PalettePayload,
        parent_id: Option<&str>,
    ) -> Result<(MutationResult, NodeId), EditorError> {
        let node = payload.instantiate(&mut self.ids)?;
        let node_id = node.id().clone();
        let parent_id = parent_id.map(NodeId::from).unwrap_or_else(NodeId::root);

        let result = self.apply(Mutation::InsertNode {
            parent_id,
            index: None,
            node,
        })?;
        Ok((result, node_id))
    }

    /// Patch the selected block; unchanged when nothing is selected
    pub fn update_selected(&mut self, props: PropMap) -> Result<MutationResult, EditorError> {
        let Some(node_id) = self.document.selected_id().cloned() else {
            return Ok(MutationResult {
                version: self.version,
                changed: false,
            });
        };
        self.apply(Mutation::UpdateProps { node_id, props })
    }

    /// Hand the document to a project sink under its name
    pub fn save_project<P: ProjectSink + ?Sized>(&mut self, sink: &mut P) -> bool {
        let name = self.document.name().to_string();
        let outcome = serde_json::to_value(&self.document)
            .map_err(EditorError::from)
            .and_then(|content: Value| {
                sink.save_project(&name, &content)
                    .map_err(EditorError::from)
            });

        match outcome {
            Ok(()) => {
                tracing::info!(name = %name, "Project saved");
                self.notifications.push(Notification::Saved { name });
                true
            }
            Err(e) => {
                tracing::warn!(name = %name, error = %e, "Project save failed");
                self.notifications.push(Notification::SaveFailed {
                    name,
                    reason: e.to_string(),
                });
                false
            }
        }
    }

    fn flush(&mut self) {
        if let Err(e) = self.store.save(&self.document) {
            tracing::warn!(error = %e, "Failed to persist working document");
            self.notifications.push(Notification::FlushFailed {
                reason: e.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemorySink, MemoryStore, StoreError};
    use studio_model::BlockType;

    struct BrokenStore;

    impl Store for BrokenStore {
        fn load(&self) -> Result<Option<Document>, StoreError> {
            Err(StoreError::Unavailable("disk on fire".to_string()))
        }

        fn save(&mut self, _document: &Document) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("disk on fire".to_string()))
        }
    }

    fn session() -> EditSession<MemoryStore> {
        EditSession::open(MemoryStore::new()).with_id_generator(IdGenerator::from_seed("s"))
    }

    #[test]
    fn test_open_seeds_when_empty() {
        let session = session();
        assert_eq!(session.document(), &Document::default());
        assert_eq!(session.version(), 0);
        assert!(session.notifications().is_empty());
    }

    #[test]
    fn test_open_restores_stored_document() {
        let doc = Document::seed("Shop").select(Some("p1"));
        let store = MemoryStore::with_document(&doc).unwrap();
        let session = EditSession::open(store);
        assert_eq!(session.document(), &doc);
    }

    #[test]
    fn test_apply_bumps_version_and_flushes() {
        let mut session = session();
        let result = session
            .apply(Mutation::RemoveNode {
                node_id: "p1".into(),
            })
            .unwrap();

        assert_eq!(result, MutationResult { version: 1, changed: true });
        assert_eq!(session.store().save_count(), 1);
    }

    #[test]
    fn test_noop_does_not_flush() {
        let mut session = session();
        let result = session
            .apply(Mutation::RemoveNode {
                node_id: "missing".into(),
            })
            .unwrap();

        assert!(!result.changed);
        assert_eq!(result.version, 0);
        assert_eq!(session.store().save_count(), 0);
    }

    #[test]
    fn test_insert_from_palette_defaults_to_root() {
        let mut session = session();
        let (result, id) = session
            .insert_from_palette(&PalettePayload::new(BlockType::Button), None)
            .unwrap();

        assert!(result.changed);
        let root = session.document().root();
        assert_eq!(root.children().last().unwrap().id(), &id);
    }

    #[test]
    fn test_update_selected_without_selection() {
        let mut session = session();
        let result = session.update_selected(PropMap::new()).unwrap();
        assert!(!result.changed);
    }

    #[test]
    fn test_save_project_notifies() {
        let mut session = session();
        let mut sink = MemorySink::default();

        assert!(session.save_project(&mut sink));
        assert_eq!(sink.saved[0].0, "MyApp");
        assert_eq!(sink.saved[0].1["root"]["id"], "root");
        assert_eq!(
            session.take_notifications(),
            vec![Notification::Saved {
                name: "MyApp".to_string()
            }]
        );
    }

    #[test]
    fn test_broken_store_keeps_editing() {
        let mut session = EditSession::open(BrokenStore);
        assert!(matches!(
            session.notifications()[0],
            Notification::LoadFailed { .. }
        ));

        let result = session
            .apply(Mutation::RemoveNode {
                node_id: "p1".into(),
            })
            .unwrap();
        assert!(result.changed);
        assert!(session.document().find("p1").is_none());
        assert!(matches!(
            session.notifications().last(),
            Some(Notification::FlushFailed { .. })
        ));
    }
}
