//! # Block nodes
//!
//! A [`Node`] is one block of the document tree. Children are held behind
//! `Arc` so edits can rebuild the path to the root while every untouched
//! sub-tree stays shared with the previous snapshot.

use crate::{BlockType, IdGenerator, ModelError, PropMap, Props};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Reserved id of the document root
pub const ROOT_ID: &str = "root";

/// Opaque, unique block identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn root() -> Self {
        Self(ROOT_ID.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0 == ROOT_ID
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for NodeId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NodeId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A block in the document tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNode", into = "RawNode")]
pub struct Node {
    id: NodeId,
    props: Props,
    children: Vec<Arc<Node>>,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, props: Props) -> Self {
        Self {
            id: id.into(),
            props,
            children: Vec::new(),
        }
    }

    /// Mint a new block: fresh id, type defaults merged with `overrides`
    pub fn create(
        block_type: BlockType,
        overrides: &PropMap,
        ids: &mut IdGenerator,
    ) -> Result<Self, ModelError> {
        let props = Props::from_overrides(block_type, overrides)?;
        Ok(Self::new(ids.new_id(), props))
    }

    /// Builder-style append, used when assembling trees by hand
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(Arc::new(child));
        self
    }

    /// Same id and props, new children
    pub fn with_children(&self, children: Vec<Arc<Node>>) -> Self {
        Self {
            id: self.id.clone(),
            props: self.props.clone(),
            children,
        }
    }

    /// Same id and children, new props
    pub fn with_props(&self, props: Props) -> Self {
        Self {
            id: self.id.clone(),
            props,
            children: self.children.clone(),
        }
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn block_type(&self) -> BlockType {
        self.props.block_type()
    }

    pub fn props(&self) -> &Props {
        &self.props
    }

    pub fn children(&self) -> &[Arc<Node>] {
        &self.children
    }

    pub fn is_root(&self) -> bool {
        self.id.is_root()
    }
}

/// Wire shape of a node: `{id, type, props?, children?}`
#[derive(Serialize, Deserialize)]
struct RawNode {
    id: NodeId,
    #[serde(rename = "type")]
    block_type: BlockType,
    #[serde(default, skip_serializing_if = "PropMap::is_empty")]
    props: PropMap,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<RawNode>,
}

impl From<&Node> for RawNode {
    fn from(node: &Node) -> Self {
        Self {
            id: node.id.clone(),
            block_type: node.block_type(),
            props: node.props.to_map(),
            children: node.children.iter().map(|c| RawNode::from(c.as_ref())).collect(),
        }
    }
}

impl From<Node> for RawNode {
    fn from(node: Node) -> Self {
        RawNode::from(&node)
    }
}

impl TryFrom<RawNode> for Node {
    type Error = ModelError;

    fn try_from(raw: RawNode) -> Result<Self, Self::Error> {
        let props = Props::from_overrides(raw.block_type, &raw.props)?;
        let children = raw
            .children
            .into_iter()
            .map(|child| Node::try_from(child).map(Arc::new))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: raw.id,
            props,
            children,
        })
    }
}
