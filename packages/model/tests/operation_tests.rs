//! Operation round-trip, serialization, and clone-isolation behavior against
//! a live document.

use vellum_model::{
    Document, InsertOperation, ModelElement, ModelNode, ModelText, Operation, Position,
};

fn document_with_text(root: &str, text: &str) -> Document {
    let mut doc = Document::new();
    doc.create_root(root);
    if !text.is_empty() {
        doc.root_mut(root)
            .unwrap()
            .children
            .push(ModelText::new(text));
    }
    doc
}

fn mixed_nodes() -> Vec<ModelNode> {
    vec![
        ModelNode::Text(ModelText::new("ab")),
        ModelNode::Element(ModelElement::new("x")),
    ]
}

#[test]
fn insert_then_reverse_restores_document() {
    let mut doc = document_with_text("main", "hello");
    let before = doc.root("main").unwrap().clone();

    let mut insert = Operation::Insert(InsertOperation::new(
        Position::new("main", vec![0]),
        mixed_nodes(),
        0,
    ));
    let range = doc.apply(&mut insert).unwrap();
    assert_eq!(range.start, Position::new("main", vec![0]));
    assert_eq!(range.end, Position::new("main", vec![3]));
    assert_eq!(doc.version(), 1);

    let mut reverse = insert.get_reversed().unwrap();
    doc.apply(&mut reverse).unwrap();

    // Combined base version advanced by exactly 2.
    assert_eq!(doc.version(), 2);
    assert_eq!(doc.root("main").unwrap(), &before);
}

#[test]
fn insert_inside_text_reverses_to_original_shape() {
    let mut doc = document_with_text("main", "cd");
    let before = doc.root("main").unwrap().clone();

    let mut insert = Operation::Insert(InsertOperation::new(
        Position::new("main", vec![1]),
        ModelElement::new("x"),
        0,
    ));
    doc.apply(&mut insert).unwrap();
    assert_eq!(doc.root("main").unwrap().children.len(), 3);

    let mut reverse = insert.get_reversed().unwrap();
    doc.apply(&mut reverse).unwrap();

    // The split text node is merged back at the seam, not just equal content.
    assert_eq!(doc.root("main").unwrap(), &before);
    assert_eq!(doc.root("main").unwrap().children.len(), 1);
}

#[test]
fn execution_retains_pre_insert_nodes() {
    let mut doc = document_with_text("main", "cd");

    let mut op = Operation::Insert(InsertOperation::new(
        Position::new("main", vec![0]),
        "ab",
        0,
    ));
    doc.apply(&mut op).unwrap();

    // In-tree normalization merged "ab" into "abcd"...
    let root = doc.root("main").unwrap();
    assert_eq!(root.children.len(), 1);
    assert_eq!(root.children.nodes()[0].as_text().unwrap().data, "abcd");

    // ...but the operation still records the nodes as they were inserted.
    if let Operation::Insert(insert) = &op {
        assert_eq!(insert.nodes().len(), 1);
        assert_eq!(insert.nodes()[0].as_text().unwrap().data, "ab");
    } else {
        panic!("expected insert operation");
    }
}

#[test]
fn clone_executes_independently() {
    let original = InsertOperation::new(Position::new("main", vec![0]), mixed_nodes(), 0);
    let mut cloned = Operation::Insert(original.clone());

    let mut doc = document_with_text("main", "hello");
    doc.apply(&mut cloned).unwrap();

    assert_eq!(original.nodes(), mixed_nodes().as_slice());
}

#[test]
fn serialization_round_trip_executes_identically() {
    let mut doc_a = document_with_text("main", "hello");
    let mut doc_b = document_with_text("main", "hello");

    let mut op = Operation::Insert(InsertOperation::new(
        Position::new("main", vec![2]),
        mixed_nodes(),
        0,
    ));

    let json = op.to_json().unwrap();
    let mut decoded = Operation::from_json(json, &doc_b).unwrap();
    assert_eq!(op, decoded);

    doc_a.apply(&mut op).unwrap();
    doc_b.apply(&mut decoded).unwrap();

    assert_eq!(doc_a.root("main"), doc_b.root("main"));
    assert_eq!(doc_a.version(), doc_b.version());
}

#[test]
fn reversal_scenario_width_and_base_version() {
    // Insert at (root, 0) of [Text("ab"), Element("x")] with baseVersion 5:
    // the reversal removes width 3 at (root, 0) with baseVersion 6.
    let op = Operation::Insert(InsertOperation::new(
        Position::new("root", vec![0]),
        mixed_nodes(),
        5,
    ));

    let reversed = op.get_reversed().unwrap();
    let json = reversed.to_json().unwrap();
    assert_eq!(json["className"], "RemoveOperation");
    assert_eq!(json["position"]["root"], "root");
    assert_eq!(json["position"]["path"][0], 0);
    assert_eq!(json["howMany"], 3);
    assert_eq!(json["baseVersion"], 6);
}

#[test]
fn repeated_application_requires_fresh_base_version() {
    let mut doc = document_with_text("main", "");

    let mut first = Operation::Insert(InsertOperation::new(
        Position::new("main", vec![0]),
        "a",
        0,
    ));
    doc.apply(&mut first).unwrap();

    // Same operation again is stale.
    let mut replay = first.clone();
    assert!(doc.apply(&mut replay).is_err());

    let mut second = Operation::Insert(InsertOperation::new(
        Position::new("main", vec![0]),
        "b",
        1,
    ));
    doc.apply(&mut second).unwrap();
    assert_eq!(doc.version(), 2);
}
