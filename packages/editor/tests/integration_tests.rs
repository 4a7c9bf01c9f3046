//! Integration tests for editor crate

use std::sync::Arc;

use serde_json::json;
use studio_editor::{
    tree, Document, EditSession, EditorError, MemorySink, MemoryStore, Mutation, MutationError,
    Notification,
};
use studio_model::{palette, BlockType, IdGenerator, Node, NodeId, PalettePayload, PropMap, Props};

fn props(block_type: BlockType, overrides: serde_json::Value) -> Props {
    Props::from_overrides(block_type, &map(overrides)).unwrap()
}

fn map(value: serde_json::Value) -> PropMap {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

fn empty_root() -> Arc<Node> {
    Arc::new(Node::new(NodeId::root(), Props::defaults(BlockType::Section)))
}

fn hi_tree() -> Arc<Node> {
    let heading = Node::new("h1", props(BlockType::Heading, json!({ "text": "Hi" })));
    tree::insert(&empty_root(), "root", heading)
}

#[test]
fn test_insert_heading_into_empty_root() {
    let tree = hi_tree();

    assert_eq!(tree.children().len(), 1);
    let h1 = &tree.children()[0];
    assert_eq!(h1.id(), "h1");
    assert_eq!(h1.props().text(), Some("Hi"));
}

#[test]
fn test_update_text_keeps_other_props() {
    let before = hi_tree();
    let after = tree::update_props(&before, "h1", &map(json!({ "text": "Bye" }))).unwrap();

    let old = tree::find(&before, "h1").unwrap();
    let new = tree::find(&after, "h1").unwrap();
    assert_eq!(new.props().text(), Some("Bye"));
    assert_eq!(new.props().get("level"), old.props().get("level"));
    assert_eq!(new.props().get("align"), old.props().get("align"));
}

#[test]
fn test_insert_under_missing_parent_is_unchanged() {
    let before = hi_tree();
    let node = Node::new("b1", Props::defaults(BlockType::Button));
    let after = tree::insert(&before, "missing-parent", node);

    assert_eq!(before, after);
    assert!(Arc::ptr_eq(&before, &after));
}

#[test]
fn test_find_identity() {
    let doc = Document::seed("MyApp");
    let root = doc.root();

    assert!(Arc::ptr_eq(tree::find(root, "root").unwrap(), root));
    for id in tree::ids(root) {
        assert_eq!(tree::find(root, id.as_str()).unwrap().id(), &id);
    }
    assert!(tree::find(root, "nope").is_none());
}

#[test]
fn test_update_is_idempotent() {
    let doc = Document::seed("MyApp");
    let patch = map(json!({ "text": "Welcome", "align": "center" }));

    let once = tree::update_props(doc.root(), "h1", &patch).unwrap();
    let twice = tree::update_props(&once, "h1", &patch).unwrap();

    assert_eq!(once, twice);
    assert!(Arc::ptr_eq(&once, &twice));
}

#[test]
fn test_insert_does_not_mutate_input() {
    let doc = Document::seed("MyApp");
    let captured = Arc::clone(doc.root());
    let snapshot = Node::clone(&captured);

    let node = Node::new("b1", Props::defaults(BlockType::Button));
    let after = tree::insert(doc.root(), "c1", node);

    assert_eq!(*captured, snapshot);
    assert_eq!(tree::count(&captured) + 1, tree::count(&after));
}

#[test]
fn test_unchanged_subtrees_are_shared() {
    let base = tree::insert(
        Document::seed("MyApp").root(),
        "root",
        Node::new("side", Props::defaults(BlockType::Card)),
    );
    let after = tree::update_props(&base, "h1", &map(json!({ "text": "x" }))).unwrap();

    assert!(Arc::ptr_eq(
        tree::find(&base, "side").unwrap(),
        tree::find(&after, "side").unwrap()
    ));
    assert!(Arc::ptr_eq(
        tree::find(&base, "p1").unwrap(),
        tree::find(&after, "p1").unwrap()
    ));
    assert!(!Arc::ptr_eq(
        tree::find(&base, "c1").unwrap(),
        tree::find(&after, "c1").unwrap()
    ));
}

#[test]
fn test_palette_inserts_keep_ids_unique() {
    let mut ids = IdGenerator::from_seed("uniq");
    let mut root = Arc::clone(Document::seed("MyApp").root());

    for round in 0..5 {
        for item in palette() {
            let node = item.payload().instantiate(&mut ids).unwrap();
            let parent = if round % 2 == 0 { "root" } else { "c1" };
            root = tree::insert(&root, parent, node);
        }
    }

    assert!(tree::has_unique_ids(&root));
    assert!(tree::count(&root) > 40);
}

#[test]
fn test_reinserting_existing_subtree_is_rejected() {
    let doc = Document::seed("MyApp");
    let h1 = Node::clone(doc.find("h1").unwrap());
    let after = tree::insert(doc.root(), "root", h1);

    assert!(Arc::ptr_eq(doc.root(), &after));
    assert!(tree::has_unique_ids(&after));
}

#[test]
fn test_document_round_trip_after_edits() {
    let mut session =
        EditSession::open(MemoryStore::new()).with_id_generator(IdGenerator::from_seed("rt"));

    let (_, button) = session
        .insert_from_palette(&PalettePayload::new(BlockType::Button), Some("c1"))
        .unwrap();
    session
        .apply(Mutation::Select {
            node_id: Some(button.clone()),
        })
        .unwrap();
    session
        .update_selected(map(json!({ "text": "Buy now", "type": "submit" })))
        .unwrap();
    session
        .apply(Mutation::MoveChild {
            parent_id: "c1".into(),
            from_index: 2,
            to_index: 0,
        })
        .unwrap();

    let doc = session.document().clone();
    let json = serde_json::to_string(&doc).unwrap();
    let back: Document = serde_json::from_str(&json).unwrap();
    assert_eq!(doc, back);

    let restored = EditSession::open(session.store().clone());
    assert_eq!(restored.document(), &doc);
    assert_eq!(doc.find("c1").unwrap().children()[0].id(), &button);
}

#[test]
fn test_palette_payload_with_unknown_type_is_rejected() {
    let mut session = EditSession::open(MemoryStore::new());
    let payload = PalettePayload::from_json(r#"{"type":"carousel"}"#).unwrap();

    let before = session.document().clone();
    let result = session.insert_from_palette(&payload, None);

    assert!(matches!(result, Err(EditorError::Model(_))));
    assert_eq!(session.document(), &before);
    assert_eq!(session.version(), 0);
}

#[test]
fn test_preview_mode_rejects_edits_but_keeps_tree() {
    let mut session = EditSession::open(MemoryStore::new());
    session.apply(Mutation::SetPreview { enabled: true }).unwrap();
    let tree_before = Arc::clone(session.document().root());

    let result = session.apply(Mutation::RemoveNode {
        node_id: "h1".into(),
    });
    assert!(matches!(
        result,
        Err(EditorError::Mutation(MutationError::ReadOnly))
    ));
    assert!(Arc::ptr_eq(session.document().root(), &tree_before));
    assert!(!session.document().affordances().delete);
}

#[test]
fn test_reparent_then_remove() {
    let mut session = EditSession::open(MemoryStore::new());
    session
        .apply(Mutation::MoveNode {
            node_id: "h1".into(),
            new_parent_id: "root".into(),
            index: 0,
        })
        .unwrap();

    let root = session.document().root();
    assert_eq!(root.children()[0].id(), "h1");
    assert_eq!(root.children()[1].children().len(), 1);

    session
        .apply(Mutation::RemoveNode {
            node_id: "c1".into(),
        })
        .unwrap();
    assert_eq!(tree::ids(session.document().root()), vec![NodeId::root(), NodeId::from("h1")]);
}

#[test]
fn test_save_project_flow() {
    let mut session = EditSession::open(MemoryStore::new());
    session
        .apply(Mutation::Rename {
            name: "Landing".to_string(),
        })
        .unwrap();

    let mut sink = MemorySink::default();
    assert!(session.save_project(&mut sink));
    assert_eq!(sink.saved[0].0, "Landing");

    let doc: Document = serde_json::from_value(sink.saved[0].1.clone()).unwrap();
    assert_eq!(&doc, session.document());

    session
        .apply(Mutation::Rename {
            name: String::new(),
        })
        .unwrap();
    assert!(!session.save_project(&mut sink));
    assert!(matches!(
        session.notifications().last(),
        Some(Notification::SaveFailed { .. })
    ));
    assert_eq!(sink.saved.len(), 1);
}

/// Nest `levels` containers, each under the previous one, starting at `c1`
fn nest_containers(session: &mut EditSession<MemoryStore>, levels: usize) -> Vec<NodeId> {
    let mut parent = NodeId::from("c1");
    let mut inserted = Vec::new();
    for _ in 0..levels {
        let (_, id) = session
            .insert_from_palette(&PalettePayload::new(BlockType::Container), Some(parent.as_str()))
            .unwrap();
        inserted.push(id.clone());
        parent = id;
    }
    inserted
}

#[test]
fn test_deep_nesting_is_capped_and_round_trips() {
    let mut session = EditSession::open(MemoryStore::new());
    let inserted = nest_containers(&mut session, 70);

    let root = session.document().root();
    assert_eq!(tree::height(root), tree::MAX_DEPTH);

    // c1 sits at level 1, so MAX_DEPTH - 1 containers fit below it
    let kept = tree::MAX_DEPTH - 1;
    assert!(session.document().find(inserted[kept - 1].as_str()).is_some());
    assert!(session.document().find(inserted[kept].as_str()).is_none());

    let json = session.document().to_json().unwrap();
    assert_eq!(&Document::from_json(&json).unwrap(), session.document());

    let reopened = EditSession::open(session.store().clone());
    assert!(reopened.notifications().is_empty());
    assert_eq!(reopened.document(), session.document());
}
