//! Block tree → virtual DOM.
//!
//! `render_preview` is what the finished page looks like. `render_canvas` is
//! the edit-mode view: the same elements, with every block wrapped in an
//! outline that carries its id, type label, selection marker and (outside
//! preview) the drag/duplicate/delete controls.

use studio_editor::{Affordances, Document};
use studio_model::semantics::{element_for, list_item_text, Body};
use studio_model::Node;

use crate::VNode;

#[derive(Clone, Copy)]
enum Mode<'a> {
    Preview,
    Canvas(&'a Document),
}

/// Render a block tree as the published page would show it
pub fn render_preview(node: &Node) -> VNode {
    render_node(node, Mode::Preview)
}

/// Render the edit-mode canvas for a document
pub fn render_canvas(document: &Document) -> VNode {
    let mode = if document.is_preview() { "preview" } else { "edit" };
    VNode::element("div")
        .with_attr("class", "studio-canvas")
        .with_attr("data-mode", mode)
        .with_child(render_node(document.root(), Mode::Canvas(document)))
}

/// Preview when the document is in preview mode, canvas otherwise
pub fn render_document(document: &Document) -> VNode {
    if document.is_preview() {
        render_preview(document.root())
    } else {
        render_canvas(document)
    }
}

fn render_node(node: &Node, mode: Mode<'_>) -> VNode {
    let element = render_element(node, mode);

    match mode {
        Mode::Preview => element,
        Mode::Canvas(document) if node.is_root() => {
            let element = element.with_attr("data-node-id", node.id().as_str());
            mark_selected(element, node, document)
        }
        Mode::Canvas(document) => wrap_block(node, element, document),
    }
}

fn render_element(node: &Node, mode: Mode<'_>) -> VNode {
    let spec = element_for(node);

    let mut element = VNode::element(spec.tag);
    if !spec.class_name.is_empty() {
        element = element.with_attr("class", spec.class_name);
    }
    for (name, value) in spec.attributes {
        element = element.with_attr(name, value);
    }

    match spec.body {
        Body::Children => element.with_children(
            node.children()
                .iter()
                .map(|child| render_node(child, mode))
                .collect(),
        ),
        Body::Text(text) => element.with_child(VNode::text(text)),
        Body::Void => element,
        Body::ListItems => element.with_children(
            node.children()
                .iter()
                .map(|child| {
                    let item = VNode::element("li");
                    match mode {
                        Mode::Preview => item.with_child(VNode::text(list_item_text(child))),
                        Mode::Canvas(_) => item.with_child(render_node(child, mode)),
                    }
                })
                .collect(),
        ),
    }
}

fn wrap_block(node: &Node, element: VNode, document: &Document) -> VNode {
    let affordances = document.node_affordances(node);
    let id = node.id().as_str();

    let block = VNode::element("div")
        .with_attr("class", "studio-block")
        .with_attr("data-node-id", id)
        .with_attr("data-block-type", node.block_type().as_str())
        .with_child(toolbar(node, &affordances))
        .with_child(element);

    mark_selected(block, node, document)
}

fn toolbar(node: &Node, affordances: &Affordances) -> VNode {
    let id = node.id().as_str();
    let mut bar = VNode::element("div").with_attr("class", "studio-block-toolbar");

    if affordances.drag_handles {
        bar = bar.with_child(
            VNode::element("span")
                .with_attr("class", "studio-drag-handle")
                .with_attr("draggable", "true")
                .with_attr("aria-label", "Drag")
                .with_attr("data-node-id", id),
        );
    }

    bar = bar.with_child(
        VNode::element("span")
            .with_attr("class", "studio-block-label")
            .with_child(VNode::text(node.block_type().label())),
    );

    if affordances.duplicate {
        bar = bar.with_child(action("duplicate", "Duplicate", id));
    }
    if affordances.delete {
        bar = bar.with_child(action("delete", "Delete", id));
    }

    bar
}

fn action(name: &str, label: &str, id: &str) -> VNode {
    VNode::element("button")
        .with_attr("type", "button")
        .with_attr("class", "studio-block-action")
        .with_attr("data-action", name)
        .with_attr("data-node-id", id)
        .with_child(VNode::text(label))
}

fn mark_selected(element: VNode, node: &Node, document: &Document) -> VNode {
    let selected = document.selected_id() == Some(node.id());
    if selected && document.affordances().selection_outline {
        element.with_attr("data-selected", "true")
    } else {
        element
    }
}
