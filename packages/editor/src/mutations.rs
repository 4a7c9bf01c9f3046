//! # Document Mutations
//!
//! High-level operations on a builder [`Document`].
//!
//! ## Mutation Semantics
//!
//! - A mutation never modifies its input; `apply` returns the next document.
//! - Edits whose target is missing are no-ops: the returned document shares
//!   the same tree allocation as the input.
//! - While the document is in preview mode only `SetPreview` and `Rename`
//!   are accepted; everything else fails with [`MutationError::ReadOnly`].
//!
//! ### Move
//! - `MoveChild` reorders within one parent; the target index is clamped
//! - `MoveNode` reparents; moving a node into itself or a descendant is a no-op
//!
//! ### Remove / Duplicate
//! - The root is never removed or duplicated
//! - Duplicating selects the copy

use serde::{Deserialize, Serialize};
use studio_model::{IdGenerator, ModelError, Node, NodeId, PropMap};
use thiserror::Error;

use crate::{tree, Document};

/// Semantic edits on a document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Append (or place at `index`) a new sub-tree under a parent
    InsertNode {
        parent_id: NodeId,
        index: Option<usize>,
        node: Node,
    },

    /// Shallow-merge a props patch into one block
    UpdateProps { node_id: NodeId, props: PropMap },

    RemoveNode { node_id: NodeId },

    /// Reorder a child within its parent
    MoveChild {
        parent_id: NodeId,
        from_index: usize,
        to_index: usize,
    },

    /// Move a block to a new parent at index
    MoveNode {
        node_id: NodeId,
        new_parent_id: NodeId,
        index: usize,
    },

    DuplicateNode { node_id: NodeId },

    /// Change the selection; `None` clears it
    Select { node_id: Option<NodeId> },

    SetPreview { enabled: bool },

    Rename { name: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Document is read-only in preview mode")]
    ReadOnly,

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl Mutation {
    /// Apply this mutation, producing the next document
    pub fn apply(&self, doc: &Document, ids: &mut IdGenerator) -> Result<Document, MutationError> {
        if doc.is_preview() && self.is_edit() {
            return Err(MutationError::ReadOnly);
        }

        let root = doc.root();
        let next = match self {
            Mutation::InsertNode {
                parent_id,
                index,
                node,
            } => doc.with_root(tree::insert_at(
                root,
                parent_id.as_str(),
                index.unwrap_or(usize::MAX),
                node.clone(),
            )),
            Mutation::UpdateProps { node_id, props } => {
                doc.with_root(tree::update_props(root, node_id.as_str(), props)?)
            }
            Mutation::RemoveNode { node_id } => doc.with_root(tree::remove(root, node_id.as_str())),
            Mutation::MoveChild {
                parent_id,
                from_index,
                to_index,
            } => doc.with_root(tree::move_child(
                root,
                parent_id.as_str(),
                *from_index,
                *to_index,
            )),
            Mutation::MoveNode {
                node_id,
                new_parent_id,
                index,
            } => doc.with_root(tree::move_node(
                root,
                node_id.as_str(),
                new_parent_id.as_str(),
                *index,
            )),
            Mutation::DuplicateNode { node_id } => {
                let (next_root, copy_id) = tree::duplicate(root, node_id.as_str(), ids);
                let next = doc.with_root(next_root);
                match copy_id {
                    Some(copy_id) => next.select(Some(copy_id.as_str())),
                    None => next,
                }
            }
            Mutation::Select { node_id } => doc.select(node_id.as_ref().map(NodeId::as_str)),
            Mutation::SetPreview { enabled } => doc.set_preview(*enabled),
            Mutation::Rename { name } => doc.with_name(name.clone()),
        };

        Ok(next)
    }

    /// Whether the mutation changes content or selection (blocked in preview)
    pub fn is_edit(&self) -> bool {
        !matches!(self, Mutation::SetPreview { .. } | Mutation::Rename { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mutation::InsertNode { .. } => "insert_node",
            Mutation::UpdateProps { .. } => "update_props",
            Mutation::RemoveNode { .. } => "remove_node",
            Mutation::MoveChild { .. } => "move_child",
            Mutation::MoveNode { .. } => "move_node",
            Mutation::DuplicateNode { .. } => "duplicate_node",
            Mutation::Select { .. } => "select",
            Mutation::SetPreview { .. } => "set_preview",
            Mutation::Rename { .. } => "rename",
        }
    }
}
