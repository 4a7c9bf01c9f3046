//! # Tree editing
//!
//! Pure operations over a block tree. Inputs are never mutated: every edit
//! returns a new root, rebuilding only the path from the edited node up to
//! the root and sharing every other sub-tree with the input through `Arc`.
//!
//! ## Missing ids
//!
//! Edits addressed to an id that is not in the tree are no-ops: the input
//! `Arc` itself is returned, so callers can detect "nothing happened" with
//! `Arc::ptr_eq`. The same applies to edits that would break the tree
//! invariants (removing the root, inserting a sub-tree whose ids are already
//! taken, moving a node under its own descendant).
//!
//! ## Indices
//!
//! Insert and move positions are clamped to the valid range.
//!
//! ## Depth
//!
//! No block sits deeper than [`MAX_DEPTH`]. Inserts, moves and duplicates
//! that would cross it are no-ops.

use std::collections::HashSet;
use std::convert::Infallible;
use std::sync::Arc;

use studio_model::{IdGenerator, ModelError, Node, NodeId, PropMap};

/// Deepest level a block may sit at; the root is level 0.
///
/// Each level nests an object and a `children` array in a snapshot, and a
/// project database wraps snapshots a few levels further down. 32 levels keep
/// every persisted shape under serde_json's recursion limit of 128.
pub const MAX_DEPTH: usize = 32;

/// Outcome of searching for an edit target below one node
enum Visit {
    Missing,
    Unchanged,
    Rebuilt(Arc<Node>),
}

fn try_visit<E, F>(node: &Arc<Node>, target: &str, edit: &mut F) -> Result<Visit, E>
where
    F: FnMut(&Node) -> Result<Option<Node>, E>,
{
    if node.id() == target {
        return Ok(match edit(node)? {
            Some(edited) => Visit::Rebuilt(Arc::new(edited)),
            None => Visit::Unchanged,
        });
    }

    for (index, child) in node.children().iter().enumerate() {
        match try_visit(child, target, edit)? {
            Visit::Missing => continue,
            Visit::Unchanged => return Ok(Visit::Unchanged),
            Visit::Rebuilt(new_child) => {
                let mut children = node.children().to_vec();
                children[index] = new_child;
                return Ok(Visit::Rebuilt(Arc::new(node.with_children(children))));
            }
        }
    }

    Ok(Visit::Missing)
}

fn try_rebuild<E, F>(tree: &Arc<Node>, target: &str, mut edit: F) -> Result<Arc<Node>, E>
where
    F: FnMut(&Node) -> Result<Option<Node>, E>,
{
    Ok(match try_visit(tree, target, &mut edit)? {
        Visit::Rebuilt(root) => root,
        Visit::Missing => {
            tracing::debug!(node_id = target, "Edit target not found, tree unchanged");
            Arc::clone(tree)
        }
        Visit::Unchanged => Arc::clone(tree),
    })
}

fn rebuild<F>(tree: &Arc<Node>, target: &str, mut edit: F) -> Arc<Node>
where
    F: FnMut(&Node) -> Option<Node>,
{
    match try_rebuild::<Infallible, _>(tree, target, |node| Ok(edit(node))) {
        Ok(root) => root,
        Err(never) => match never {},
    }
}

/// Depth-first search for a node by id
pub fn find<'a>(tree: &'a Arc<Node>, id: &str) -> Option<&'a Arc<Node>> {
    if tree.id() == id {
        return Some(tree);
    }
    tree.children().iter().find_map(|child| find(child, id))
}

/// Parent of `id` and the child's position in it; `None` for the root or a
/// missing id
pub fn find_parent<'a>(tree: &'a Arc<Node>, id: &str) -> Option<(&'a Arc<Node>, usize)> {
    for (index, child) in tree.children().iter().enumerate() {
        if child.id() == id {
            return Some((tree, index));
        }
        if let Some(found) = find_parent(child, id) {
            return Some(found);
        }
    }
    None
}

pub fn contains(tree: &Arc<Node>, id: &str) -> bool {
    find(tree, id).is_some()
}

/// Pre-order traversal starting at (and including) `node`
pub fn descendants(node: &Node) -> Descendants<'_> {
    Descendants { stack: vec![node] }
}

pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack
            .extend(node.children().iter().rev().map(|child| child.as_ref()));
        Some(node)
    }
}

/// All ids in pre-order
pub fn ids(node: &Node) -> Vec<NodeId> {
    descendants(node).map(|n| n.id().clone()).collect()
}

pub fn count(node: &Node) -> usize {
    descendants(node).count()
}

/// Level of `id` below `tree` (the tree itself is level 0)
pub fn depth(tree: &Node, id: &str) -> Option<usize> {
    if tree.id() == id {
        return Some(0);
    }
    tree.children()
        .iter()
        .find_map(|child| depth(child, id).map(|d| d + 1))
}

/// Number of levels below `node`; 0 for a leaf
pub fn height(node: &Node) -> usize {
    node.children()
        .iter()
        .map(|child| height(child) + 1)
        .max()
        .unwrap_or(0)
}

/// Whether `subtree` fits under `parent_id` without crossing [`MAX_DEPTH`].
/// A missing parent fits; the edit is a no-op anyway.
fn fits(tree: &Node, parent_id: &str, subtree: &Node) -> bool {
    match depth(tree, parent_id) {
        Some(level) => level + 1 + height(subtree) <= MAX_DEPTH,
        None => true,
    }
}

pub fn has_unique_ids(node: &Node) -> bool {
    let mut seen = HashSet::new();
    descendants(node).all(|n| seen.insert(n.id().as_str()))
}

/// Whether adding `subtree` to `tree` would produce a duplicate id
fn collides(tree: &Node, subtree: &Node) -> bool {
    let mut seen: HashSet<&str> = descendants(tree).map(|n| n.id().as_str()).collect();
    !descendants(subtree).all(|n| seen.insert(n.id().as_str()))
}

fn attach(tree: &Arc<Node>, parent_id: &str, index: usize, node: Arc<Node>) -> Arc<Node> {
    rebuild(tree, parent_id, |parent| {
        let mut children = parent.children().to_vec();
        let index = index.min(children.len());
        children.insert(index, Arc::clone(&node));
        Some(parent.with_children(children))
    })
}

/// Append `node` as the last child of `parent_id`
pub fn insert(tree: &Arc<Node>, parent_id: &str, node: Node) -> Arc<Node> {
    insert_at(tree, parent_id, usize::MAX, node)
}

/// Insert `node` under `parent_id` at `index` (clamped)
pub fn insert_at(tree: &Arc<Node>, parent_id: &str, index: usize, node: Node) -> Arc<Node> {
    if collides(tree, &node) {
        tracing::debug!(node_id = %node.id(), "Inserted sub-tree reuses an existing id, tree unchanged");
        return Arc::clone(tree);
    }
    if !fits(tree, parent_id, &node) {
        tracing::debug!(parent_id, max_depth = MAX_DEPTH, "Insert would nest too deep, tree unchanged");
        return Arc::clone(tree);
    }
    attach(tree, parent_id, index, Arc::new(node))
}

/// Shallow-merge `patch` into the props of `id`.
///
/// A missing id leaves the tree unchanged; a patch that is invalid for the
/// node's type is an error.
pub fn update_props(tree: &Arc<Node>, id: &str, patch: &PropMap) -> Result<Arc<Node>, ModelError> {
    try_rebuild::<ModelError, _>(tree, id, |node| {
        let props = node.props().merge(patch)?;
        if &props == node.props() {
            Ok(None)
        } else {
            Ok(Some(node.with_props(props)))
        }
    })
}

/// Remove `id` and its descendants. The root cannot be removed.
pub fn remove(tree: &Arc<Node>, id: &str) -> Arc<Node> {
    let Some((parent, index)) = find_parent(tree, id) else {
        tracing::debug!(id, "Nothing to remove");
        return Arc::clone(tree);
    };

    let parent_id = parent.id().clone();
    rebuild(tree, parent_id.as_str(), |parent| {
        let mut children = parent.children().to_vec();
        children.remove(index);
        Some(parent.with_children(children))
    })
}

/// Reorder the children of `parent_id`.
///
/// Out-of-range `from_index` is a no-op; `to_index` is clamped to the last
/// position.
pub fn move_child(tree: &Arc<Node>, parent_id: &str, from_index: usize, to_index: usize) -> Arc<Node> {
    rebuild(tree, parent_id, |parent| {
        let len = parent.children().len();
        if from_index >= len {
            return None;
        }

        let to_index = to_index.min(len - 1);
        if from_index == to_index {
            return None;
        }

        let mut children = parent.children().to_vec();
        let child = children.remove(from_index);
        children.insert(to_index, child);
        Some(parent.with_children(children))
    })
}

/// Move `id` under `new_parent_id` at `index` (clamped, counted after the
/// node left its old position).
///
/// No-op for the root, missing ids, moves into the node's own sub-tree and
/// moves that would nest deeper than [`MAX_DEPTH`].
pub fn move_node(tree: &Arc<Node>, id: &str, new_parent_id: &str, index: usize) -> Arc<Node> {
    let Some((parent, position)) = find_parent(tree, id) else {
        return Arc::clone(tree);
    };
    let node = Arc::clone(&parent.children()[position]);

    if !contains(tree, new_parent_id)
        || contains(&node, new_parent_id)
        || !fits(tree, new_parent_id, &node)
    {
        tracing::debug!(id, new_parent_id, "Rejected move");
        return Arc::clone(tree);
    }

    let detached = remove(tree, id);
    attach(&detached, new_parent_id, index, node)
}

/// Copy `id` (fresh ids throughout) and place the copy right after it.
///
/// Returns the new tree and the id of the copy, if one was made.
pub fn duplicate(tree: &Arc<Node>, id: &str, ids: &mut IdGenerator) -> (Arc<Node>, Option<NodeId>) {
    let Some((parent, index)) = find_parent(tree, id) else {
        return (Arc::clone(tree), None);
    };

    let copy = reidentify(&parent.children()[index], ids);
    if collides(tree, &copy) || !fits(tree, parent.id().as_str(), &copy) {
        return (Arc::clone(tree), None);
    }

    let copy_id = copy.id().clone();
    let parent_id = parent.id().clone();
    let result = attach(tree, parent_id.as_str(), index + 1, Arc::new(copy));
    (result, Some(copy_id))
}

fn reidentify(node: &Node, ids: &mut IdGenerator) -> Node {
    let id = ids.new_id();
    let children = node
        .children()
        .iter()
        .map(|child| Arc::new(reidentify(child, ids)))
        .collect();
    Node::new(id, node.props().clone()).with_children(children)
}
