//! Selection and preview state, and what the editing chrome may show.

use serde::Serialize;
use serde_json::Value;
use studio_model::{BlockType, Node, NodeId};

use crate::{tree, Document};

/// Editing chrome allowed for the current view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Affordances {
    pub palette: bool,
    pub properties_panel: bool,
    pub drag_handles: bool,
    pub delete: bool,
    pub duplicate: bool,
    pub selection_outline: bool,
}

impl Affordances {
    pub fn editing() -> Self {
        Self {
            palette: true,
            properties_panel: true,
            drag_handles: true,
            delete: true,
            duplicate: true,
            selection_outline: true,
        }
    }

    pub fn preview() -> Self {
        Self {
            palette: false,
            properties_panel: false,
            drag_handles: false,
            delete: false,
            duplicate: false,
            selection_outline: false,
        }
    }

    pub fn any_node_actions(&self) -> bool {
        self.drag_handles || self.delete || self.duplicate
    }
}

/// One editable prop of the selected block
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyField {
    pub key: &'static str,
    pub value: Value,
}

/// Field list for the properties panel
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertiesPanel {
    pub node_id: NodeId,
    pub block_type: BlockType,
    pub fields: Vec<PropertyField>,
}

impl Document {
    /// Select a block. Unknown ids (and `None`) clear the selection.
    pub fn select(&self, id: Option<&str>) -> Document {
        let selected_id = match id {
            Some(id) if tree::contains(&self.root, id) => Some(NodeId::from(id)),
            Some(id) => {
                tracing::debug!(node_id = id, "Selection target not found");
                None
            }
            None => None,
        };

        Document {
            selected_id,
            ..self.clone()
        }
    }

    pub fn set_preview(&self, enabled: bool) -> Document {
        Document {
            preview: enabled,
            ..self.clone()
        }
    }

    pub fn toggle_preview(&self) -> Document {
        self.set_preview(!self.preview)
    }

    /// Document-level chrome for the current mode
    pub fn affordances(&self) -> Affordances {
        if self.preview {
            Affordances::preview()
        } else {
            Affordances::editing()
        }
    }

    /// Per-block chrome; the root can be selected but not moved, removed or copied
    pub fn node_affordances(&self, node: &Node) -> Affordances {
        let mut affordances = self.affordances();
        if node.is_root() {
            affordances.drag_handles = false;
            affordances.delete = false;
            affordances.duplicate = false;
        }
        affordances
    }

    /// Editable fields of the selected block, `None` when nothing is selected or in preview
    pub fn properties_panel(&self) -> Option<PropertiesPanel> {
        if self.preview {
            return None;
        }

        let node = self.selected()?;
        let block_type = node.block_type();
        let fields = block_type
            .editable_fields()
            .iter()
            .map(|&key| PropertyField {
                key,
                value: node.props().get(key).unwrap_or(Value::Null),
            })
            .collect();

        Some(PropertiesPanel {
            node_id: node.id().clone(),
            block_type,
            fields,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_select_existing_block() {
        let doc = Document::seed("MyApp").select(Some("p1"));
        assert_eq!(doc.selected_id().map(NodeId::as_str), Some("p1"));
        assert_eq!(doc.selected().unwrap().block_type(), BlockType::Paragraph);
    }

    #[test]
    fn test_select_unknown_clears() {
        let doc = Document::seed("MyApp").select(Some("p1"));
        let doc = doc.select(Some("missing"));
        assert!(doc.selected_id().is_none());
    }

    #[test]
    fn test_toggle_preview_hides_chrome() {
        let doc = Document::seed("MyApp");
        assert_eq!(doc.affordances(), Affordances::editing());

        let preview = doc.toggle_preview();
        assert!(preview.is_preview());
        assert_eq!(preview.affordances(), Affordances::preview());
        assert!(!preview.affordances().any_node_actions());

        assert!(!preview.toggle_preview().is_preview());
    }

    #[test]
    fn test_root_has_no_node_actions() {
        let doc = Document::seed("MyApp");
        let root = doc.node_affordances(doc.root());
        assert!(!root.delete);
        assert!(!root.duplicate);
        assert!(root.properties_panel);

        let h1 = doc.find("h1").unwrap();
        assert!(doc.node_affordances(h1).delete);
    }

    #[test]
    fn test_properties_panel_fields() {
        let doc = Document::seed("MyApp").select(Some("h1"));
        let panel = doc.properties_panel().unwrap();

        assert_eq!(panel.node_id, "h1");
        assert_eq!(panel.block_type, BlockType::Heading);

        let keys: Vec<_> = panel.fields.iter().map(|f| f.key).collect();
        assert_eq!(keys, vec!["text", "level", "align", "className"]);
        assert_eq!(panel.fields[0].value, json!("Your App"));
        assert_eq!(panel.fields[3].value, Value::Null);
    }

    #[test]
    fn test_properties_panel_hidden() {
        assert!(Document::seed("MyApp").properties_panel().is_none());

        let preview = Document::seed("MyApp").select(Some("h1")).set_preview(true);
        assert!(preview.properties_panel().is_none());
    }
}
