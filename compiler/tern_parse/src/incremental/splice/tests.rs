#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use tern_diagnostic::CollectingListener;
use tern_ir::{Annotations, Node, SyntaxKind, TokenId, TokenMap, TypeId};

use super::*;
use crate::tests::{find, parse_unit, Parsed};
use crate::Parser;

fn identity(parsed: &Parsed) -> TokenMap {
    let mut map = TokenMap::new();
    for token in parsed.tree.tokens().tokens() {
        map.insert(token.id, token.id);
    }
    map
}

/// A fresh node for the same tokens as `old`, read as a statement or argument.
fn reread(parsed: &Parsed, old: &Node, entry: impl FnOnce(&mut Parser<'_>) -> Node) -> Node {
    let listener = CollectingListener::new();
    let mut parser = Parser::at(
        parsed.tree.tokens(),
        &parsed.interner,
        &listener,
        old.first_token(),
    )
    .unwrap();
    entry(&mut parser)
}

fn contains(root: &Node, id: tern_ir::NodeId) -> bool {
    root.id() == id || root.children().into_iter().any(|child| contains(child, id))
}

#[test]
fn test_shares_subtrees_off_the_path() {
    let parsed = parse_unit("void main() { x = 1; y = 2; }");
    let first = find(&parsed.tree, SyntaxKind::ExpressionStatement, 0);
    let second = find(&parsed.tree, SyntaxKind::ExpressionStatement, 1);
    let replacement = reread(&parsed, &second, |p| p.parse_statement());
    let root = parsed.tree.root();

    let spliced = clone_with_replacement(
        root,
        &second,
        &replacement,
        parsed.tree.tokens(),
        &identity(&parsed),
    )
    .unwrap();

    assert_ne!(spliced.id(), root.id());
    assert!(contains(&spliced, replacement.id()));
    assert!(!contains(&spliced, second.id()));
    assert!(contains(&spliced, first.id()));

    let block = spliced.children()[0].children()[2].children()[1].children()[0].clone();
    assert_eq!(block.syntax_kind(), SyntaxKind::Block);
    assert!(block.children()[0].ptr_eq(&first));
    assert!(block.children()[1].ptr_eq(&replacement));
}

#[test]
fn test_spine_gets_fresh_ids_and_keeps_annotations() {
    let parsed = parse_unit("void main() { f(a, b); }");
    let invocation = find(&parsed.tree, SyntaxKind::MethodInvocation, 0);
    let annotations = Annotations {
        static_type: Some(TypeId::new(7)),
        ..Annotations::EMPTY
    };
    invocation.set_annotations(annotations);
    let b = find(&parsed.tree, SyntaxKind::SimpleIdentifier, 4);
    let replacement = reread(&parsed, &b, |p| p.parse_argument());

    let spliced = clone_with_replacement(
        parsed.tree.root(),
        &b,
        &replacement,
        parsed.tree.tokens(),
        &identity(&parsed),
    )
    .unwrap();

    let mut path = Vec::new();
    fn spine(node: &Node, target: tern_ir::NodeId, path: &mut Vec<Node>) -> bool {
        path.push(node.clone());
        if node.id() == target {
            return true;
        }
        if node.children().into_iter().any(|child| spine(child, target, path)) {
            return true;
        }
        path.pop();
        false
    }
    assert!(spine(&spliced, replacement.id(), &mut path));

    let new_invocation = path
        .iter()
        .find(|node| node.syntax_kind() == SyntaxKind::MethodInvocation)
        .unwrap();
    assert_ne!(new_invocation.id(), invocation.id());
    assert_eq!(new_invocation.annotations(), annotations);
    assert_eq!(new_invocation.first_token(), invocation.first_token());
    assert_eq!(new_invocation.last_token(), invocation.last_token());
}

#[test]
fn test_replacing_the_root() {
    let parsed = parse_unit("var x = 1;");
    let root = parsed.tree.root();
    let replacement = reread(&parsed, root, |p| p.parse_compilation_unit());

    let spliced =
        clone_with_replacement(root, root, &replacement, parsed.tree.tokens(), &identity(&parsed))
            .unwrap();
    assert!(spliced.ptr_eq(&replacement));
}

#[test]
fn test_node_not_in_tree() {
    let parsed = parse_unit("void main() { x = 1; }");
    let stranger = parse_unit("void main() { x = 1; }");
    let foreign = find(&stranger.tree, SyntaxKind::ExpressionStatement, 0);

    let error = clone_with_replacement(
        parsed.tree.root(),
        &foreign,
        &foreign,
        parsed.tree.tokens(),
        &identity(&parsed),
    )
    .unwrap_err();
    assert_eq!(
        error,
        SpliceError::NodeNotFound {
            id: foreign.id(),
            kind: SyntaxKind::ExpressionStatement,
        }
    );
}

#[test]
fn test_renumbered_tokens_rebuild_shared_subtrees() {
    let parsed = parse_unit("void main() { x = 1; y = 2; }");
    let first = find(&parsed.tree, SyntaxKind::ExpressionStatement, 0);
    let second = find(&parsed.tree, SyntaxKind::ExpressionStatement, 1);
    let mut map = TokenMap::new();
    for token in parsed.tree.tokens().tokens() {
        map.insert(token.id, TokenId::fresh());
    }
    assert!(!map.is_identity_preserving());

    let spliced =
        clone_with_replacement(parsed.tree.root(), &second, &second, parsed.tree.tokens(), &map)
            .unwrap();

    assert!(!contains(&spliced, first.id()));
    let block = spliced.children()[0].children()[2].children()[1].children()[0].clone();
    let rebuilt = block.children()[0].clone();
    assert_eq!(rebuilt.syntax_kind(), SyntaxKind::ExpressionStatement);
    assert_eq!(Some(rebuilt.first_token()), map.get(first.first_token()));
    assert_eq!(Some(rebuilt.last_token()), map.get(first.last_token()));
}

#[test]
fn test_unmapped_token_outside_the_replacement() {
    let parsed = parse_unit("void main() { x = 1; y = 2; }");
    let first = find(&parsed.tree, SyntaxKind::ExpressionStatement, 0);
    let second = find(&parsed.tree, SyntaxKind::ExpressionStatement, 1);
    let dropped = first.first_token();
    let mut map = TokenMap::new();
    for token in parsed.tree.tokens().tokens() {
        if token.id != dropped {
            map.insert(token.id, TokenId::fresh());
        }
    }

    let error =
        clone_with_replacement(parsed.tree.root(), &second, &second, parsed.tree.tokens(), &map)
            .unwrap_err();
    assert_eq!(error, SpliceError::UnmappedToken(dropped));
}
