use crate::{compile_to_html, render_canvas, render_document, render_preview, to_html, CompileOptions, VNode};
use serde_json::json;
use std::sync::Arc;
use studio_editor::{tree, Document};
use studio_model::{BlockType, Node, NodeId, PropMap, Props};

fn props(block_type: BlockType, overrides: serde_json::Value) -> Props {
    let map: PropMap = match overrides {
        serde_json::Value::Object(map) => map,
        _ => PropMap::new(),
    };
    Props::from_overrides(block_type, &map).unwrap()
}

fn root_with(children: Vec<Node>) -> Node {
    children
        .into_iter()
        .fold(Node::new(NodeId::root(), Props::defaults(BlockType::Section)), Node::with_child)
}

#[test]
fn test_seed_preview_html() {
    let doc = Document::seed("MyApp");
    let html = to_html(&render_preview(doc.root()), &CompileOptions::default());

    let expected = "\
<section class=\"py-12\">
  <div class=\"mx-auto max-w-4xl px-4\">
    <h2 class=\"text-3xl font-semibold\">Your App</h2>
    <p class=\"text-base leading-relaxed text-pretty\">Drag blocks from the palette to the canvas.</p>
  </div>
</section>
";
    assert_eq!(html, expected);
}

#[test]
fn test_compact_output() {
    let root = root_with(vec![Node::new(
        "b",
        props(BlockType::Button, json!({ "text": "Go", "className": "btn" })),
    )]);
    let options = CompileOptions {
        pretty: false,
        ..Default::default()
    };

    assert_eq!(
        to_html(&render_preview(&root), &options),
        "<section class=\"py-12\"><button class=\"btn\" type=\"button\">Go</button></section>"
    );
}

#[test]
fn test_void_elements_and_escaping() {
    let root = root_with(vec![
        Node::new(
            "img",
            props(BlockType::Image, json!({ "src": "/cat.png", "alt": "Tom & \"Jerry\"" })),
        ),
        Node::new("in", props(BlockType::Input, json!({ "type": "email" }))),
        Node::new("p", props(BlockType::Paragraph, json!({ "text": "<b>bold</b>" }))),
    ]);
    let html = to_html(&render_preview(&root), &CompileOptions::default());

    assert!(html.contains("<img class=\"rounded-md\" src=\"/cat.png\" alt=\"Tom &amp; &quot;Jerry&quot;\" />"));
    assert!(html.contains("type=\"email\" placeholder=\"Type here\" />"));
    assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
    assert!(!html.contains("</img>"));
}

#[test]
fn test_leaf_blocks_ignore_children() {
    let heading = Node::new("h", props(BlockType::Heading, json!({ "text": "Title", "level": 1 })))
        .with_child(Node::new("stray", Props::defaults(BlockType::Button)));
    let vnode = render_preview(&root_with(vec![heading]));

    let h1 = &vnode.children()[0];
    assert_eq!(h1.tag(), Some("h1"));
    assert_eq!(h1.children(), &[VNode::text("Title")]);
}

#[test]
fn test_heading_alignment_class() {
    let root = root_with(vec![Node::new(
        "h",
        props(BlockType::Heading, json!({ "align": "center", "level": 3 })),
    )]);
    let vnode = render_preview(&root);

    let h3 = &vnode.children()[0];
    assert_eq!(h3.tag(), Some("h3"));
    assert_eq!(h3.attr("class"), Some("text-3xl font-semibold text-center"));
    assert_eq!(h3.text_content(), "Section Heading");
}

#[test]
fn test_list_items_use_child_text() {
    let list = Node::new("l", Props::defaults(BlockType::List))
        .with_child(Node::new("i1", props(BlockType::Paragraph, json!({ "text": "One" }))))
        .with_child(Node::new("i2", props(BlockType::Image, json!({ "alt": "Two" }))))
        .with_child(Node::new("i3", Props::defaults(BlockType::Card)));
    let vnode = render_preview(&root_with(vec![list]));

    let ul = &vnode.children()[0];
    assert_eq!(ul.tag(), Some("ul"));
    let items: Vec<_> = ul.children().iter().map(VNode::text_content).collect();
    assert_eq!(items, vec!["One", "Two", "Item"]);
}

#[test]
fn test_canvas_marks_blocks_and_selection() {
    let doc = Document::seed("MyApp").select(Some("h1"));
    let canvas = render_canvas(&doc);

    assert_eq!(canvas.attr("data-mode"), Some("edit"));

    let block = canvas.find_by_attr("data-node-id", "h1").unwrap();
    assert_eq!(block.attr("class"), Some("studio-block"));
    assert_eq!(block.attr("data-block-type"), Some("heading"));
    assert_eq!(block.attr("data-selected"), Some("true"));

    let html = to_html(&canvas, &CompileOptions::default());
    assert!(html.contains("data-action=\"delete\""));
    assert!(html.contains("data-action=\"duplicate\""));
    assert!(html.contains("studio-drag-handle"));
    assert!(html.contains(">Heading</span>"));

    let paragraph = canvas.find_by_attr("data-node-id", "p1").unwrap();
    assert_eq!(paragraph.attr("data-selected"), None);
}

#[test]
fn test_canvas_root_has_no_actions() {
    let doc = Document::seed("MyApp");
    let canvas = render_canvas(&doc);

    let root = canvas.find_by_attr("data-node-id", "root").unwrap();
    assert_eq!(root.tag(), Some("section"));
    assert!(root.find_by_attr("data-action", "delete").is_some());

    let html = to_html(&canvas, &CompileOptions::default());
    assert!(!html.contains("data-action=\"delete\" data-node-id=\"root\""));
}

#[test]
fn test_preview_document_hides_affordances() {
    let doc = Document::seed("MyApp").select(Some("h1")).set_preview(true);

    let canvas = to_html(&render_canvas(&doc), &CompileOptions::default());
    assert!(canvas.contains("data-mode=\"preview\""));
    assert!(!canvas.contains("data-action"));
    assert!(!canvas.contains("studio-drag-handle"));
    assert!(!canvas.contains("data-selected"));

    let rendered = render_document(&doc);
    assert_eq!(rendered, render_preview(doc.root()));
}

#[test]
fn test_render_document_uses_canvas_when_editing() {
    let doc = Document::seed("MyApp");
    assert_eq!(render_document(&doc), render_canvas(&doc));
}

#[test]
fn test_compile_full_page() {
    let doc = Document::seed("Tom's <Shop>");
    let html = compile_to_html(&doc, &CompileOptions::default());

    assert!(html.starts_with("<!DOCTYPE html>\n"));
    assert!(html.contains("<title>Tom&#39;s &lt;Shop&gt;</title>"));
    assert!(html.contains("cdn.tailwindcss.com"));
    assert!(html.contains("    <section class=\"py-12\">\n"));
    assert!(html.trim_end().ends_with("</html>"));

    let bare = compile_to_html(
        &doc,
        &CompileOptions {
            tailwind: false,
            ..Default::default()
        },
    );
    assert!(!bare.contains("tailwind"));
}

#[test]
fn test_preview_follows_edits() {
    let doc = Document::seed("MyApp");
    let patch: PropMap = match json!({ "text": "Bye" }) {
        serde_json::Value::Object(map) => map,
        _ => PropMap::new(),
    };
    let edited = tree::update_props(doc.root(), "h1", &patch).unwrap();

    let before = render_preview(doc.root()).text_content();
    let after = render_preview(&edited).text_content();
    assert!(before.contains("Your App"));
    assert!(after.contains("Bye"));
    assert!(!Arc::ptr_eq(doc.root(), &edited));
}
