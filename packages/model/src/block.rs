use crate::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of block kinds a document can contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Section,
    Container,
    Heading,
    Paragraph,
    Button,
    Image,
    Input,
    Form,
    Card,
    List,
}

impl BlockType {
    pub const ALL: [BlockType; 10] = [
        BlockType::Section,
        BlockType::Container,
        BlockType::Heading,
        BlockType::Paragraph,
        BlockType::Button,
        BlockType::Image,
        BlockType::Input,
        BlockType::Form,
        BlockType::Card,
        BlockType::List,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Section => "section",
            BlockType::Container => "container",
            BlockType::Heading => "heading",
            BlockType::Paragraph => "paragraph",
            BlockType::Button => "button",
            BlockType::Image => "image",
            BlockType::Input => "input",
            BlockType::Form => "form",
            BlockType::Card => "card",
            BlockType::List => "list",
        }
    }

    /// Human-readable name shown in the palette
    pub fn label(&self) -> &'static str {
        match self {
            BlockType::Section => "Section",
            BlockType::Container => "Container",
            BlockType::Heading => "Heading",
            BlockType::Paragraph => "Paragraph",
            BlockType::Button => "Button",
            BlockType::Image => "Image",
            BlockType::Input => "Input",
            BlockType::Form => "Form",
            BlockType::Card => "Card",
            BlockType::List => "List",
        }
    }

    /// Whether blocks of this type conventionally hold children.
    ///
    /// Informational only: the tree accepts children under any node.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            BlockType::Section
                | BlockType::Container
                | BlockType::Form
                | BlockType::Card
                | BlockType::List
        )
    }

    /// Prop keys exposed in the properties panel, in display order
    pub fn editable_fields(&self) -> &'static [&'static str] {
        match self {
            BlockType::Heading => &["text", "level", "align", "className"],
            BlockType::Paragraph => &["text", "className"],
            BlockType::Button => &["text", "type", "className"],
            BlockType::Image => &["src", "alt", "className"],
            BlockType::Input => &["type", "placeholder", "className"],
            BlockType::Section
            | BlockType::Container
            | BlockType::Form
            | BlockType::Card
            | BlockType::List => &["className"],
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockType::ALL
            .iter()
            .copied()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| ModelError::UnknownBlockType(s.to_string()))
    }
}
