//! # Document
//!
//! The full editable unit: a name, the block tree, the current selection and
//! the preview flag. Documents are values; every edit produces a new one that
//! shares unchanged sub-trees with its predecessor.
//!
//! ## Wire format
//!
//! ```text
//! { "name": "MyApp", "root": { ...node... }, "selectedId": "h1", "preview": false }
//! ```
//!
//! `selectedId` and `preview` are optional. Loading checks that the root
//! carries the reserved id, that ids are unique and that the tree is no
//! deeper than [`tree::MAX_DEPTH`]; a stale `selectedId` is dropped.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;
use studio_model::{BlockType, Node, NodeId, PropMap, Props, ROOT_ID};

use crate::{tree, EditorError};

/// Editable builder document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DocumentSnapshot", into = "DocumentSnapshot")]
pub struct Document {
    pub(crate) name: String,
    pub(crate) root: Arc<Node>,
    pub(crate) selected_id: Option<NodeId>,
    pub(crate) preview: bool,
}

/// Serialized form of a [`Document`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSnapshot {
    pub name: String,
    pub root: Node,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_id: Option<NodeId>,
    #[serde(default)]
    pub preview: bool,
}

impl Document {
    /// Create a document around an existing tree, validating it
    pub fn new(name: impl Into<String>, root: Node) -> Result<Self, EditorError> {
        Self::try_from(DocumentSnapshot {
            name: name.into(),
            root,
            selected_id: None,
            preview: false,
        })
    }

    /// The starter document: a root section holding one demo container
    pub fn seed(name: impl Into<String>) -> Self {
        let root = Node::new(NodeId::root(), layout(BlockType::Section, "py-12")).with_child(
            Node::new("c1", Props::defaults(BlockType::Container))
                .with_child(Node::new("h1", text(BlockType::Heading, "Your App")))
                .with_child(Node::new(
                    "p1",
                    text(BlockType::Paragraph, "Drag blocks from the palette to the canvas."),
                )),
        );

        Self {
            name: name.into(),
            root: Arc::new(root),
            selected_id: None,
            preview: false,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        let snapshot: DocumentSnapshot = serde_json::from_str(json)?;
        Self::try_from(snapshot)
    }

    pub fn to_json(&self) -> Result<String, EditorError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &Arc<Node> {
        &self.root
    }

    pub fn selected_id(&self) -> Option<&NodeId> {
        self.selected_id.as_ref()
    }

    /// The selected node, if any
    pub fn selected(&self) -> Option<&Arc<Node>> {
        self.selected_id
            .as_ref()
            .and_then(|id| tree::find(&self.root, id.as_str()))
    }

    pub fn find(&self, id: &str) -> Option<&Arc<Node>> {
        tree::find(&self.root, id)
    }

    pub fn is_preview(&self) -> bool {
        self.preview
    }

    /// Replace the tree, dropping the selection if it no longer resolves
    pub(crate) fn with_root(&self, root: Arc<Node>) -> Self {
        let selected_id = self
            .selected_id
            .clone()
            .filter(|id| tree::contains(&root, id.as_str()));

        Self {
            name: self.name.clone(),
            root,
            selected_id,
            preview: self.preview,
        }
    }

    pub(crate) fn with_name(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    /// Cheap equality: same tree allocation and same view state
    pub fn same_snapshot(&self, other: &Document) -> bool {
        Arc::ptr_eq(&self.root, &other.root)
            && self.name == other.name
            && self.selected_id == other.selected_id
            && self.preview == other.preview
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::seed("MyApp")
    }
}

impl TryFrom<DocumentSnapshot> for Document {
    type Error = EditorError;

    fn try_from(snapshot: DocumentSnapshot) -> Result<Self, Self::Error> {
        if snapshot.root.id() != ROOT_ID {
            return Err(EditorError::InvalidDocument(format!(
                "root id must be \"{}\", found \"{}\"",
                ROOT_ID,
                snapshot.root.id()
            )));
        }

        if !tree::has_unique_ids(&snapshot.root) {
            return Err(EditorError::InvalidDocument(
                "block ids are not unique".to_string(),
            ));
        }

        let height = tree::height(&snapshot.root);
        if height > tree::MAX_DEPTH {
            return Err(EditorError::InvalidDocument(format!(
                "tree is {} levels deep, at most {} are allowed",
                height,
                tree::MAX_DEPTH
            )));
        }

        let root = Arc::new(snapshot.root);
        let selected_id = snapshot.selected_id.filter(|id| {
            let exists = tree::contains(&root, id.as_str());
            if !exists {
                tracing::debug!(selected_id = %id, "Dropping stale selection");
            }
            exists
        });

        Ok(Self {
            name: snapshot.name,
            root,
            selected_id,
            preview: snapshot.preview,
        })
    }
}

impl From<Document> for DocumentSnapshot {
    fn from(document: Document) -> Self {
        Self {
            name: document.name,
            root: Node::clone(&document.root),
            selected_id: document.selected_id,
            preview: document.preview,
        }
    }
}

fn layout(block_type: BlockType, class_name: &str) -> Props {
    with_overrides(block_type, json!({ "className": class_name }))
}

fn text(block_type: BlockType, text: &str) -> Props {
    with_overrides(block_type, json!({ "text": text }))
}

fn with_overrides(block_type: BlockType, overrides: serde_json::Value) -> Props {
    let overrides: PropMap = match overrides {
        serde_json::Value::Object(map) => map,
        _ => PropMap::new(),
    };
    Props::from_overrides(block_type, &overrides).unwrap_or_else(|_| Props::defaults(block_type))
}
