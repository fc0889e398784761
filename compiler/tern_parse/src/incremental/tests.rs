//! End-to-end incremental re-parse scenarios.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use pretty_assertions::assert_eq;
use tern_diagnostic::{CollectingListener, Diagnostic, ErrorCode};
use tern_ir::{
    structurally_equal, Annotations, CommentKind, ElementId, Node, SyntaxKind, SyntaxTree,
    TextChange, TokenOrigin, TypeId,
};
use tern_lexer::Relexed;

use super::*;
use crate::tests::{find, parse_unit, Parsed};

/// An old tree plus the re-scanned stream after one edit.
struct Edit {
    old: Parsed,
    relexed: Relexed,
}

/// Replace `old_len` bytes at `start` with `text`.
fn edit(source: &str, start: usize, old_len: usize, text: &str) -> Edit {
    let old = parse_unit(source);
    let mut new_source = source.to_owned();
    new_source.replace_range(start..start + old_len, text);
    let change = TextChange::replace(
        u32::try_from(start).unwrap(),
        u32::try_from(old_len).unwrap(),
        u32::try_from(text.len()).unwrap(),
    );
    let relexed = tern_lexer::relex(old.tree.tokens(), &new_source, change, &old.interner);
    Edit { old, relexed }
}

/// Replace the first occurrence of `needle` with `text`.
fn replace(source: &str, needle: &str, text: &str) -> Edit {
    let start = source.find(needle).expect("needle in source");
    edit(source, start, needle.len(), text)
}

/// Insert `text` right after the first occurrence of `needle`.
fn insert_after(source: &str, needle: &str, text: &str) -> Edit {
    let start = source.find(needle).expect("needle in source") + needle.len();
    edit(source, start, 0, text)
}

impl Edit {
    fn reparse_with(&self, options: ParseOptions) -> (Reparse, Vec<Diagnostic>) {
        let listener = CollectingListener::new();
        let reparse = IncrementalParser::new(
            &self.old.tree,
            Arc::clone(&self.relexed.tokens),
            &self.relexed.token_map,
            &self.old.interner,
            &listener,
        )
        .with_options(options)
        .reparse_edit(&self.relexed.edit)
        .expect("incremental reparse");
        (reparse, listener.take())
    }

    fn reparse(&self) -> (Reparse, Vec<Diagnostic>) {
        self.reparse_with(ParseOptions::default())
    }

    fn full(&self) -> (SyntaxTree, Vec<Diagnostic>) {
        let listener = CollectingListener::new();
        let tree = crate::parse(
            Arc::clone(&self.relexed.tokens),
            &self.old.interner,
            &listener,
        );
        (tree, listener.take())
    }

    /// The reparse must produce what a full parse of the new text produces.
    fn assert_matches_full_parse(&self, reparse: &Reparse) {
        let (full, _) = self.full();
        assert_eq!(
            reparse.tree.dump(&self.old.interner),
            full.dump(&self.old.interner)
        );
        assert!(structurally_equal(
            &reparse.tree,
            reparse.tree.root(),
            &full,
            full.root()
        ));
    }
}

fn outcomes(reparse: &Reparse) -> Vec<(SyntaxKind, AttemptOutcome)> {
    reparse
        .attempts
        .iter()
        .map(|attempt| (attempt.candidate, attempt.outcome))
        .collect()
}

fn codes(diagnostics: &[Diagnostic]) -> Vec<ErrorCode> {
    diagnostics.iter().map(|d| d.code).collect()
}

fn pre_order(node: &Node, out: &mut Vec<Node>) {
    out.push(node.clone());
    for child in node.children() {
        pre_order(child, out);
    }
}

/// Give every node of the old tree distinct annotations.
fn resolve(tree: &SyntaxTree) {
    let mut nodes = Vec::new();
    pre_order(tree.root(), &mut nodes);
    for (seed, node) in (1..).zip(nodes) {
        node.set_annotations(Annotations {
            static_type: Some(TypeId::new(seed)),
            propagated_type: Some(TypeId::new(seed)),
            static_element: Some(ElementId::new(seed)),
            propagated_element: Some(ElementId::new(seed)),
        });
    }
}

const IF_ASSIGN: &str = "void main() { if (a) { x = 1; } }";

#[test]
fn test_literal_edit_escalates_to_statement() {
    let edit = replace(IF_ASSIGN, "1", "12");
    let before = edit.old.dump();
    let (reparse, diagnostics) = edit.reparse();

    assert_eq!(
        outcomes(&reparse),
        vec![
            (SyntaxKind::IntegerLiteral, AttemptOutcome::InsufficientContext),
            (SyntaxKind::AssignmentExpression, AttemptOutcome::InsufficientContext),
            (SyntaxKind::ExpressionStatement, AttemptOutcome::Accepted),
        ]
    );
    assert_eq!(reparse.escalations(), 2);
    assert!(!reparse.is_full_parse());
    assert_eq!(
        reparse.replaced,
        find(&edit.old.tree, SyntaxKind::ExpressionStatement, 0).id()
    );
    assert_eq!(reparse.replacement.syntax_kind(), SyntaxKind::ExpressionStatement);
    assert!(diagnostics.is_empty());
    edit.assert_matches_full_parse(&reparse);

    // The old tree is untouched.
    assert_eq!(edit.old.dump(), before);
}

#[test]
fn test_nodes_off_the_path_are_shared() {
    let edit = replace(IF_ASSIGN, "1", "12");
    let (reparse, _) = edit.reparse();

    let old_return_type = find(&edit.old.tree, SyntaxKind::TypeName, 0);
    assert!(find(&reparse.tree, SyntaxKind::TypeName, 0).ptr_eq(&old_return_type));
    // The `if` condition.
    let old_condition = find(&edit.old.tree, SyntaxKind::SimpleIdentifier, 2);
    assert!(find(&reparse.tree, SyntaxKind::SimpleIdentifier, 2).ptr_eq(&old_condition));
    // Ancestors of the replacement are new.
    let old_if = find(&edit.old.tree, SyntaxKind::IfStatement, 0);
    assert_ne!(find(&reparse.tree, SyntaxKind::IfStatement, 0).id(), old_if.id());
    assert_ne!(reparse.tree.root().id(), edit.old.tree.root().id());
}

#[test]
fn test_annotations_survive_where_text_is_unchanged() {
    let edit = replace(IF_ASSIGN, "1", "12");
    resolve(&edit.old.tree);
    let (reparse, _) = edit.reparse();

    let old_x = find(&edit.old.tree, SyntaxKind::SimpleIdentifier, 3);
    let new_x = find(&reparse.tree, SyntaxKind::SimpleIdentifier, 3);
    assert_ne!(new_x.id(), old_x.id());
    assert_eq!(new_x.annotations(), old_x.annotations());
    assert!(find(&reparse.tree, SyntaxKind::IntegerLiteral, 0)
        .annotations()
        .is_empty());
    assert!(find(&reparse.tree, SyntaxKind::AssignmentExpression, 0)
        .annotations()
        .is_empty());
}

#[test]
fn test_under_consumption_is_rejected() {
    let edit = insert_after("void f() { x = a as T; }", "= a", " == b");
    let (reparse, diagnostics) = edit.reparse();

    assert_eq!(
        outcomes(&reparse),
        vec![
            (SyntaxKind::SimpleIdentifier, AttemptOutcome::Mismatch),
            (SyntaxKind::AsExpression, AttemptOutcome::InsufficientContext),
            (SyntaxKind::AssignmentExpression, AttemptOutcome::InsufficientContext),
            (SyntaxKind::ExpressionStatement, AttemptOutcome::Accepted),
        ]
    );
    assert!(diagnostics.is_empty());
    edit.assert_matches_full_parse(&reparse);
}

#[test]
fn test_escalation_climbs_one_parent_at_a_time() {
    let edit = insert_after("void f() { x = a as T; }", "= a", " == b");
    let (reparse, _) = edit.reparse();

    for pair in reparse.attempts.windows(2) {
        let path = edit.old.tree.path_to(pair[0].candidate_id).unwrap();
        assert_eq!(path.parent().unwrap().id(), pair[1].candidate_id);
        assert_eq!(pair[0].parent, Some(pair[1].candidate));
    }
}

#[test]
fn test_identifier_wrapped_by_property_read() {
    let edit = insert_after("void main() { print(a); }", "(a", ".length");
    resolve(&edit.old.tree);
    let (reparse, _) = edit.reparse();

    assert_eq!(
        outcomes(&reparse),
        vec![(SyntaxKind::SimpleIdentifier, AttemptOutcome::Accepted)]
    );
    assert_eq!(reparse.replacement.syntax_kind(), SyntaxKind::PrefixedIdentifier);
    edit.assert_matches_full_parse(&reparse);

    let old_a = find(&edit.old.tree, SyntaxKind::SimpleIdentifier, 3);
    let prefix = find(&reparse.tree, SyntaxKind::SimpleIdentifier, 3);
    assert_eq!(prefix.annotations(), old_a.annotations());
    assert!(reparse.replacement.annotations().is_empty());
}

#[test]
fn test_index_wrapped_by_property_access() {
    let edit = insert_after("void main() { f(a[0]); }", "]", ".x");
    resolve(&edit.old.tree);
    let (reparse, _) = edit.reparse();

    assert_eq!(
        outcomes(&reparse),
        vec![(SyntaxKind::IndexExpression, AttemptOutcome::Accepted)]
    );
    assert_eq!(reparse.replacement.syntax_kind(), SyntaxKind::PropertyAccess);
    edit.assert_matches_full_parse(&reparse);

    let old_index = find(&edit.old.tree, SyntaxKind::IndexExpression, 0);
    let target = find(&reparse.tree, SyntaxKind::IndexExpression, 0);
    assert_eq!(target.annotations(), old_index.annotations());
}

#[test]
fn test_top_level_edit_falls_back_to_full_parse() {
    let edit = replace("var x = 1;", "1", "12");
    let (reparse, diagnostics) = edit.reparse();

    assert_eq!(
        outcomes(&reparse),
        vec![
            (SyntaxKind::IntegerLiteral, AttemptOutcome::InsufficientContext),
            (SyntaxKind::VariableDeclaration, AttemptOutcome::InsufficientContext),
            (SyntaxKind::VariableDeclarationList, AttemptOutcome::InsufficientContext),
            (SyntaxKind::TopLevelVariableDeclaration, AttemptOutcome::InsufficientContext),
            (SyntaxKind::CompilationUnit, AttemptOutcome::FullParse),
        ]
    );
    assert!(reparse.is_full_parse());
    assert_eq!(reparse.replaced, edit.old.tree.root().id());
    assert!(reparse.replacement.ptr_eq(reparse.tree.root()));
    assert_eq!(reparse.attempts.last().unwrap().parent, None);
    assert!(diagnostics.is_empty());
    edit.assert_matches_full_parse(&reparse);
}

#[test]
fn test_full_parse_still_copies_annotations() {
    let edit = replace("var x = 1;", "1", "12");
    resolve(&edit.old.tree);
    let (reparse, _) = edit.reparse();

    let old_x = find(&edit.old.tree, SyntaxKind::SimpleIdentifier, 0);
    let new_x = find(&reparse.tree, SyntaxKind::SimpleIdentifier, 0);
    assert_eq!(new_x.annotations(), old_x.annotations());
}

#[test]
fn test_escalation_limit() {
    let edit = replace(IF_ASSIGN, "1", "12");

    let (reparse, _) = edit.reparse_with(ParseOptions {
        max_escalations: Some(0),
    });
    assert_eq!(
        outcomes(&reparse),
        vec![(SyntaxKind::CompilationUnit, AttemptOutcome::FullParse)]
    );

    let (reparse, _) = edit.reparse_with(ParseOptions {
        max_escalations: Some(1),
    });
    assert_eq!(
        outcomes(&reparse),
        vec![
            (SyntaxKind::IntegerLiteral, AttemptOutcome::InsufficientContext),
            (SyntaxKind::CompilationUnit, AttemptOutcome::FullParse),
        ]
    );
    edit.assert_matches_full_parse(&reparse);

    let (reparse, _) = edit.reparse_with(ParseOptions {
        max_escalations: Some(3),
    });
    assert!(!reparse.is_full_parse());
}

#[test]
fn test_deleted_statement_does_not_leave_a_placeholder() {
    let edit = replace("void f() { a; b; }", "b; ", "");
    let (reparse, diagnostics) = edit.reparse();

    assert_eq!(
        outcomes(&reparse),
        vec![
            (SyntaxKind::ExpressionStatement, AttemptOutcome::Mismatch),
            (SyntaxKind::Block, AttemptOutcome::Accepted),
        ]
    );
    assert!(diagnostics.is_empty());
    edit.assert_matches_full_parse(&reparse);
}

#[test]
fn test_stranded_missing_token_forces_escalation() {
    // The missing `;` after `1` is anchored on `y`, which the edit removes.
    let edit = replace("void f() { x = 1 y = 2; }", "y = 2", "z = 3");
    assert_eq!(edit.old.codes(), vec![ErrorCode::E1002]);
    let (reparse, diagnostics) = edit.reparse();

    assert_eq!(
        outcomes(&reparse),
        vec![
            (SyntaxKind::AssignmentExpression, AttemptOutcome::InsufficientContext),
            (SyntaxKind::ExpressionStatement, AttemptOutcome::StrandedSynthetic),
            (SyntaxKind::Block, AttemptOutcome::Accepted),
        ]
    );
    assert_eq!(codes(&diagnostics), vec![ErrorCode::E1002]);
    edit.assert_matches_full_parse(&reparse);
}

#[test]
fn test_break_inside_loop_body() {
    let edit = replace("void f() { while (a) { x; } }", "x", "break");
    let (reparse, diagnostics) = edit.reparse();

    assert_eq!(
        outcomes(&reparse),
        vec![
            (SyntaxKind::SimpleIdentifier, AttemptOutcome::InsufficientContext),
            (SyntaxKind::ExpressionStatement, AttemptOutcome::Accepted),
        ]
    );
    assert_eq!(reparse.replacement.syntax_kind(), SyntaxKind::BreakStatement);
    assert!(diagnostics.is_empty());
}

#[test]
fn test_break_outside_loop_is_reported() {
    let edit = replace("void f() { if (a) { x; } }", "x", "break");
    let (reparse, diagnostics) = edit.reparse();
    let (_, full_diagnostics) = edit.full();

    assert_eq!(reparse.replacement.syntax_kind(), SyntaxKind::BreakStatement);
    assert_eq!(codes(&diagnostics), vec![ErrorCode::E1010]);
    assert_eq!(codes(&diagnostics), codes(&full_diagnostics));
}

#[test]
fn test_edit_next_to_split_shift_token() {
    let edit = replace("void f() { List<List<int>> x; }", "int", "num");
    let (reparse, diagnostics) = edit.reparse();

    assert_eq!(
        outcomes(&reparse),
        vec![(SyntaxKind::SimpleIdentifier, AttemptOutcome::Accepted)]
    );
    assert!(diagnostics.is_empty());
    edit.assert_matches_full_parse(&reparse);
    // Both halves of `>>` still resolve in the new tree.
    assert_eq!(
        reparse.tree.leaf_tokens(),
        edit.relexed.tokens.tokens()[1..]
            .iter()
            .map(|t| t.id)
            .collect::<Vec<_>>()
    );
}

#[test]
fn test_class_header_clause_is_reparsed_in_place() {
    let edit = replace("class A implements I, J {}", "J", "K");
    let (reparse, _) = edit.reparse();

    assert_eq!(
        reparse.attempts.last().unwrap().outcome,
        AttemptOutcome::Accepted
    );
    assert!(!reparse.is_full_parse());
    edit.assert_matches_full_parse(&reparse);
}

#[test]
fn test_identical_text_reparses_to_an_equal_tree() {
    let edit = replace(IF_ASSIGN, "x", "x");
    let (reparse, _) = edit.reparse();

    assert!(structurally_equal(
        &edit.old.tree,
        edit.old.tree.root(),
        &reparse.tree,
        reparse.tree.root()
    ));
}

#[test]
fn test_block_opening_on_a_missing_brace_is_rejected() {
    let edit = insert_after("void main() { x = 1; }", "main() ", ")");
    let (reparse, diagnostics) = edit.reparse();
    let (_, full_diagnostics) = edit.full();

    assert_eq!(reparse.attempts[0].candidate, SyntaxKind::Block);
    assert_eq!(reparse.attempts[0].outcome, AttemptOutcome::Mismatch);
    assert!(reparse.is_full_parse());
    assert_eq!(codes(&diagnostics), codes(&full_diagnostics));
    edit.assert_matches_full_parse(&reparse);
}

#[test]
fn test_clause_without_its_keyword_is_rejected() {
    let edit = replace("class A<T> extends B {}", "extends B", "extendsB");
    let (reparse, _) = edit.reparse();

    assert_eq!(
        outcomes(&reparse),
        vec![
            (SyntaxKind::ExtendsClause, AttemptOutcome::Mismatch),
            (SyntaxKind::ClassDeclaration, AttemptOutcome::InsufficientContext),
            (SyntaxKind::CompilationUnit, AttemptOutcome::FullParse),
        ]
    );
    edit.assert_matches_full_parse(&reparse);
}

#[test]
fn test_prefix_closing_on_a_missing_identifier_is_rejected() {
    for text in [".", "a."] {
        let edit = insert_after("List<List<int>> nested = [];", "List", text);
        let (reparse, _) = edit.reparse();

        assert_eq!(
            reparse.attempts[0].candidate,
            SyntaxKind::SimpleIdentifier,
            "{text}"
        );
        assert_eq!(reparse.attempts[0].outcome, AttemptOutcome::Mismatch, "{text}");
        assert!(reparse.is_full_parse(), "{text}");
        edit.assert_matches_full_parse(&reparse);
    }
}

#[test]
fn test_accepted_replacements_start_and_stop_on_real_tokens() {
    let edits = [
        insert_after("void main() { x = 1; }", "main() ", ")"),
        replace("class A<T> extends B {}", "extends B", "extendsB"),
        replace("void f() { a; b; }", "b; ", ""),
        replace("void f() { x = 1 y = 2; }", "y = 2", "z = 3"),
    ];
    for edit in edits {
        let (reparse, _) = edit.reparse();
        if reparse.is_full_parse() {
            continue;
        }
        let table = reparse.tree.table();
        for token in [
            reparse.replacement.first_token(),
            reparse.replacement.last_token(),
        ] {
            let origin = table.resolve(token).unwrap().origin;
            assert!(!matches!(origin, TokenOrigin::Missing { .. }), "{origin:?}");
        }
    }
}

#[test]
fn test_reparse_by_token_range_and_original_bytes() {
    let edit = insert_after(IF_ASSIGN, "= 1", "2");
    let listener = CollectingListener::new();
    let parser = IncrementalParser::new(
        &edit.old.tree,
        Arc::clone(&edit.relexed.tokens),
        &edit.relexed.token_map,
        &edit.old.interner,
        &listener,
    );
    let at = u32::try_from(IF_ASSIGN.find("= 1").unwrap() + 3).unwrap();
    assert_eq!(edit.relexed.edit.original.start(), at - 1);

    let reparse = parser
        .reparse(
            edit.relexed.edit.left_token,
            edit.relexed.edit.right_token,
            edit.relexed.edit.original,
        )
        .unwrap();
    let (by_descriptor, _) = edit.reparse();
    assert_eq!(outcomes(&reparse), outcomes(&by_descriptor));
    edit.assert_matches_full_parse(&reparse);
}

#[test]
fn test_no_op_edit_keeps_every_annotation() {
    let sources = [
        IF_ASSIGN,
        "class A<T> extends B implements C {\n  int f = 3;\n  void m(int p) { while (p > 0) { p = p - 1; } }\n}",
        "void f() { try { a[0] = b.c; } on E catch (e) { print(e); } finally { done(); } }",
        "var m = {1: 'one'};\nList<List<int>> nested = [[1], [2, 3]];",
    ];
    for source in sources {
        let scanned = tern_lexer::lex(source, &tern_ir::StringInterner::new());
        for token in scanned.tokens().iter().filter(|t| !t.span.is_empty()) {
            let start = usize::try_from(token.span.start).unwrap();
            let end = usize::try_from(token.span.end).unwrap();
            let no_op = edit(source, start, end - start, &source[start..end]);
            resolve(&no_op.old.tree);
            let (reparse, _) = no_op.reparse();

            let mut old_nodes = Vec::new();
            pre_order(no_op.old.tree.root(), &mut old_nodes);
            let mut new_nodes = Vec::new();
            pre_order(reparse.tree.root(), &mut new_nodes);
            assert_eq!(old_nodes.len(), new_nodes.len(), "{source} at {start}");
            for (old, new) in old_nodes.iter().zip(&new_nodes) {
                assert_eq!(old.syntax_kind(), new.syntax_kind(), "{source} at {start}");
                assert_eq!(
                    old.annotations(),
                    new.annotations(),
                    "{} in {source} at {start}",
                    old.syntax_kind()
                );
            }
        }
    }
}

#[test]
fn test_cascade_target_and_section_names_reparse_in_place() {
    let source = "void main() { list..add(1); }";
    for (needle, text) in [("list", "items"), ("add", "push")] {
        let edit = replace(source, needle, text);
        let (reparse, _) = edit.reparse();
        assert_eq!(
            outcomes(&reparse),
            vec![(SyntaxKind::SimpleIdentifier, AttemptOutcome::Accepted)],
            "{needle}"
        );
        edit.assert_matches_full_parse(&reparse);
    }
}

#[test]
fn test_conditional_branch_before_a_cascade() {
    let source = "void main() { x = c ? a : b..m(); }";
    let edit = edit(source, source.find("b..").unwrap(), 1, "bb");
    let (reparse, _) = edit.reparse();
    assert_eq!(
        reparse.attempts.last().map(|a| (a.candidate, a.outcome)),
        Some((SyntaxKind::SimpleIdentifier, AttemptOutcome::Accepted))
    );
    assert_eq!(reparse.replacement.syntax_kind(), SyntaxKind::SimpleIdentifier);
    edit.assert_matches_full_parse(&reparse);
}

#[test]
fn test_constructor_parameter_list_is_reparsed_in_place() {
    let edit = insert_after("class A { A(int x) : y = x; }", "int x", ", int w");
    let (reparse, diagnostics) = edit.reparse();
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    assert_eq!(
        reparse.attempts.last().map(|a| (a.candidate, a.outcome)),
        Some((SyntaxKind::FormalParameterList, AttemptOutcome::Accepted))
    );
    edit.assert_matches_full_parse(&reparse);
}

#[test]
fn test_field_parameter_name_is_reparsed_in_place() {
    let source = "class A { A(this.x); }";
    let at = source.find("this.").unwrap() + "this.".len();
    let edit = edit(source, at, 1, "y");
    let (reparse, _) = edit.reparse();
    assert_eq!(
        outcomes(&reparse),
        vec![(SyntaxKind::SimpleIdentifier, AttemptOutcome::Accepted)]
    );
    edit.assert_matches_full_parse(&reparse);
}

#[test]
fn test_default_values_are_reparsed_in_place() {
    for source in ["void f([int b = 1]) {}", "void f({d: 1}) {}"] {
        let edit = replace(source, "1", "23");
        let (reparse, _) = edit.reparse();
        assert_eq!(
            outcomes(&reparse),
            vec![(SyntaxKind::IntegerLiteral, AttemptOutcome::Accepted)],
            "{source}"
        );
        edit.assert_matches_full_parse(&reparse);
    }
}

#[test]
fn test_doc_comment_edit_reads_the_new_comment() {
    let edit = replace(
        "class A {\n  /// Old.\n  int f() => 1;\n  int g() => 2;\n}",
        "Old",
        "New",
    );
    let before = edit.old.dump();
    let (reparse, diagnostics) = edit.reparse();
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    edit.assert_matches_full_parse(&reparse);
    assert_eq!(edit.old.dump(), before);

    let method = find(&reparse.tree, SyntaxKind::MethodDeclaration, 0);
    let docs: Vec<_> = reparse
        .tree
        .tokens()
        .comments_before(method.first_token())
        .iter()
        .map(|comment| (comment.kind, edit.old.interner.lookup(comment.text).to_owned()))
        .collect();
    assert_eq!(docs, vec![(CommentKind::Doc, "/// New.".to_owned())]);
}
