//! # Palette
//!
//! The palette offers one draggable template per block type. A drop carries
//! a [`PalettePayload`]: the block type as a plain string (so unknown types
//! can be rejected here, before anything touches the tree) plus optional
//! sample props and sample children.

use crate::{BlockType, IdGenerator, ModelError, Node, PropMap};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::str::FromStr;
use std::sync::Arc;

/// A block template: type, prop overrides and nested templates.
///
/// Templates carry no ids; every node gets a fresh one on instantiation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    #[serde(rename = "type")]
    pub block_type: BlockType,
    #[serde(default, skip_serializing_if = "PropMap::is_empty")]
    pub props: PropMap,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Template>,
}

impl Template {
    pub fn new(block_type: BlockType) -> Self {
        Self {
            block_type,
            props: PropMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_props(mut self, props: PropMap) -> Self {
        self.props = props;
        self
    }

    pub fn with_child(mut self, child: Template) -> Self {
        self.children.push(child);
        self
    }

    /// Build a node tree from this template with freshly minted ids
    pub fn instantiate(&self, ids: &mut IdGenerator) -> Result<Node, ModelError> {
        let node = Node::create(self.block_type, &self.props, ids)?;
        let children = self
            .children
            .iter()
            .map(|child| child.instantiate(ids).map(Arc::new))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(node.with_children(children))
    }
}

/// Data carried by a palette drag: `{type, sampleProps?, sampleChildren?}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PalettePayload {
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default, skip_serializing_if = "PropMap::is_empty")]
    pub sample_props: PropMap,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sample_children: Vec<Template>,
}

impl PalettePayload {
    pub fn new(block_type: BlockType) -> Self {
        Self {
            block_type: block_type.as_str().to_string(),
            sample_props: PropMap::new(),
            sample_children: Vec::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        serde_json::from_str(json).map_err(|e| ModelError::MalformedPayload(e.to_string()))
    }

    /// Validate the payload into a template; unknown types are rejected
    pub fn to_template(&self) -> Result<Template, ModelError> {
        let block_type = BlockType::from_str(&self.block_type)?;
        Ok(Template {
            block_type,
            props: self.sample_props.clone(),
            children: self.sample_children.clone(),
        })
    }

    /// Validate and mint the node this payload describes
    pub fn instantiate(&self, ids: &mut IdGenerator) -> Result<Node, ModelError> {
        self.to_template()?.instantiate(ids)
    }
}

/// One entry of the palette
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteItem {
    pub label: &'static str,
    pub template: Template,
}

impl PaletteItem {
    pub fn block_type(&self) -> BlockType {
        self.template.block_type
    }

    /// The payload a drag of this item produces
    pub fn payload(&self) -> PalettePayload {
        PalettePayload {
            block_type: self.template.block_type.as_str().to_string(),
            sample_props: self.template.props.clone(),
            sample_children: self.template.children.clone(),
        }
    }
}

/// The builder palette, in display order
pub fn palette() -> Vec<PaletteItem> {
    BlockType::ALL
        .iter()
        .map(|&block_type| PaletteItem {
            label: block_type.label(),
            template: sample_template(block_type),
        })
        .collect()
}

/// Look up the palette entry for a type
pub fn palette_item(block_type: BlockType) -> PaletteItem {
    PaletteItem {
        label: block_type.label(),
        template: sample_template(block_type),
    }
}

fn sample_template(block_type: BlockType) -> Template {
    let template = Template::new(block_type);
    match block_type {
        BlockType::Heading => template.with_props(props(json!({ "text": "Welcome" }))),
        BlockType::Paragraph => {
            template.with_props(props(json!({ "text": "Start building visually." })))
        }
        BlockType::Button => template.with_props(props(json!({
            "text": "Get Started",
            "className": "bg-[#FF6B6B] text-[#0A1931] px-4 py-2 rounded-md hover:opacity-90",
        }))),
        BlockType::List => template.with_child(
            Template::new(BlockType::Paragraph).with_props(props(json!({ "text": "Item" }))),
        ),
        _ => template,
    }
}

fn props(value: serde_json::Value) -> PropMap {
    match value {
        serde_json::Value::Object(map) => map,
        _ => PropMap::new(),
    }
}
