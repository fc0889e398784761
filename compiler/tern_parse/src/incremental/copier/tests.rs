#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use tern_ir::{Annotations, ElementId, Node, SyntaxKind, TypeId};

use super::*;
use crate::tests::{find, parse_with, Parsed};

fn expr(source: &str) -> Parsed {
    let parsed = parse_with(source, |p| p.parse_expression());
    assert!(!parsed.has_errors(), "{source}: {:?}", parsed.diagnostics);
    parsed
}

fn pre_order(node: &Node, out: &mut Vec<Node>) {
    out.push(node.clone());
    for child in node.children() {
        pre_order(child, out);
    }
}

fn nodes(parsed: &Parsed) -> Vec<Node> {
    let mut out = Vec::new();
    pre_order(parsed.tree.root(), &mut out);
    out
}

fn fake(seed: u32) -> Annotations {
    Annotations {
        static_type: Some(TypeId::new(seed)),
        propagated_type: Some(TypeId::new(seed + 1000)),
        static_element: Some(ElementId::new(seed)),
        propagated_element: Some(ElementId::new(seed + 1000)),
    }
}

/// Give every node distinct annotations, as a resolver would.
fn resolve(parsed: &Parsed) {
    for (seed, node) in (1..).zip(nodes(parsed)) {
        node.set_annotations(fake(seed));
    }
}

fn copy(from: &Parsed, to: &Parsed) -> bool {
    copy_resolution_data(&from.tree, from.tree.root(), &to.tree, to.tree.root())
}

#[test]
fn test_equal_trees_copy_everything() {
    let old = expr("f(a + 1, b.c)");
    let new = expr("f(a + 1, b.c)");
    resolve(&old);

    assert!(copy(&old, &new));
    let expected: Vec<_> = nodes(&old).iter().map(Node::annotations).collect();
    let actual: Vec<_> = nodes(&new).iter().map(Node::annotations).collect();
    assert_eq!(actual, expected);
}

#[test]
fn test_changed_token_blocks_only_its_ancestors() {
    let old = expr("a + 1");
    let new = expr("a + 2");
    resolve(&old);

    assert!(!copy(&old, &new));
    let a = find(&old.tree, SyntaxKind::SimpleIdentifier, 0);
    assert_eq!(
        find(&new.tree, SyntaxKind::SimpleIdentifier, 0).annotations(),
        a.annotations()
    );
    assert!(find(&new.tree, SyntaxKind::IntegerLiteral, 0)
        .annotations()
        .is_empty());
    assert!(new.tree.root().annotations().is_empty());
}

#[test]
fn test_list_length_change_keeps_siblings() {
    let old = expr("f(a)");
    let new = expr("f(a, b)");
    resolve(&old);

    assert!(!copy(&old, &new));
    let f = find(&old.tree, SyntaxKind::SimpleIdentifier, 0);
    assert_eq!(
        find(&new.tree, SyntaxKind::SimpleIdentifier, 0).annotations(),
        f.annotations()
    );
    assert!(find(&new.tree, SyntaxKind::SimpleIdentifier, 1)
        .annotations()
        .is_empty());
    assert!(new.tree.root().annotations().is_empty());
}

#[test]
fn test_identifier_wrapped_in_prefixed_identifier() {
    let old = expr("a");
    let new = expr("a.length");
    resolve(&old);

    assert!(copy(&old, &new));
    let prefix = find(&new.tree, SyntaxKind::SimpleIdentifier, 0);
    assert_eq!(prefix.annotations(), old.tree.root().annotations());
    assert!(new.tree.root().annotations().is_empty());
    assert!(find(&new.tree, SyntaxKind::SimpleIdentifier, 1)
        .annotations()
        .is_empty());
}

#[test]
fn test_index_wrapped_in_property_access() {
    let old = expr("a[0]");
    let new = expr("a[0].x");
    resolve(&old);

    assert!(copy(&old, &new));
    let target = find(&new.tree, SyntaxKind::IndexExpression, 0);
    assert_eq!(target.annotations(), old.tree.root().annotations());
    assert_eq!(
        find(&new.tree, SyntaxKind::IntegerLiteral, 0).annotations(),
        find(&old.tree, SyntaxKind::IntegerLiteral, 0).annotations()
    );
}

#[test]
fn test_unrelated_kinds_copy_nothing() {
    let old = expr("a");
    let new = expr("1");
    resolve(&old);

    assert!(!copy(&old, &new));
    assert!(new.tree.root().annotations().is_empty());
}

#[test]
fn test_annotations_follow_node_shape() {
    let old = expr("x as int");
    let new = expr("x as int");
    resolve(&old);

    assert!(copy(&old, &new));
    let type_name = find(&new.tree, SyntaxKind::TypeName, 0);
    let copied = type_name.annotations();
    assert!(copied.static_type.is_some());
    assert_eq!(copied.static_element, None);
    assert_eq!(copied.propagated_type, None);
}
