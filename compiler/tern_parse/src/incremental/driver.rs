//! The reparse driver.

use std::sync::Arc;

use rustc_hash::FxHashSet;
use tracing::{debug, warn};

use tern_diagnostic::{CollectingListener, ErrorListener};
use tern_ir::{
    find_node_range, Continuation, EditDescriptor, Element, Node, NodeId, NodeKind, NodePath,
    OriginalRange, StringInterner, SyntaxTree, SyntheticTokens, TokenId, TokenMap, TokenOrigin,
    TokenStream, TokenTable,
};

use super::{
    clone_with_replacement, copy_resolution_data, dispatch, Attempt, AttemptOutcome,
    DispatchOutcome, ParseOptions, Reparse,
};
use crate::{ParseContext, Parser};

/// Re-parses the part of an old tree that an edit touched.
///
/// The old tree is only read. The new tree shares every subtree outside the
/// replaced node with it.
pub struct IncrementalParser<'a> {
    old_tree: &'a SyntaxTree,
    tokens: Arc<TokenStream>,
    token_map: &'a TokenMap,
    interner: &'a StringInterner,
    listener: &'a dyn ErrorListener,
    options: ParseOptions,
}

/// What one candidate produced.
enum Step {
    Accepted {
        node: Node,
        synthetic: SyntheticTokens,
        diagnostics: CollectingListener,
    },
    Escalate(AttemptOutcome),
    Abort,
}

impl<'a> IncrementalParser<'a> {
    /// `tokens` is the stream after the edit and `token_map` maps the old
    /// tree's stream onto it.
    pub fn new(
        old_tree: &'a SyntaxTree,
        tokens: Arc<TokenStream>,
        token_map: &'a TokenMap,
        interner: &'a StringInterner,
        listener: &'a dyn ErrorListener,
    ) -> Self {
        IncrementalParser {
            old_tree,
            tokens,
            token_map,
            interner,
            listener,
            options: ParseOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Re-parse after an edit between `left_token` and `right_token` (both in
    /// the new stream) that changed the `original` bytes of the old source.
    ///
    /// Returns `None` when the caller has to parse the whole unit itself.
    pub fn reparse(
        &self,
        left_token: TokenId,
        right_token: TokenId,
        original: OriginalRange,
    ) -> Option<Reparse> {
        self.reparse_edit(&EditDescriptor::new(left_token, right_token, original))
    }

    /// Re-parse after the edit `edit` describes.
    #[tracing::instrument(level = "debug", skip_all, fields(original = ?edit.original))]
    pub fn reparse_edit(&self, edit: &EditDescriptor) -> Option<Reparse> {
        let first_token = if edit.left_token == edit.right_token {
            edit.left_token
        } else {
            self.tokens
                .next(edit.left_token)
                .unwrap_or(edit.right_token)
        };
        let (start, end) = edit.original.bounds();
        let stranded = self.stranded_synthetic_ids();
        let mut path = find_node_range(self.old_tree, start, end);
        let mut attempts: Vec<Attempt> = Vec::new();

        loop {
            let candidate = path.node().clone();
            let Some(parent) = path.parent().map(Node::syntax_kind) else {
                return Some(self.reparse_unit(attempts));
            };
            if self
                .options
                .max_escalations
                .is_some_and(|max| attempts.len() >= max)
            {
                debug!(attempts = attempts.len(), "escalation limit reached");
                return Some(self.reparse_unit(attempts));
            }

            let step = self.attempt(&path, first_token, &stranded);
            let outcome = match &step {
                Step::Accepted { .. } => AttemptOutcome::Accepted,
                Step::Escalate(outcome) => *outcome,
                Step::Abort => AttemptOutcome::NotAChild,
            };
            attempts.push(Attempt {
                candidate: candidate.syntax_kind(),
                candidate_id: candidate.id(),
                parent: Some(parent),
                outcome,
            });

            match step {
                Step::Accepted {
                    node,
                    synthetic,
                    diagnostics,
                } => return self.splice(&candidate, node, synthetic, &diagnostics, attempts),
                Step::Escalate(outcome) => {
                    debug!(candidate = %candidate.syntax_kind(), ?outcome, "escalating");
                    let Some(up) = path.up() else {
                        return Some(self.reparse_unit(attempts));
                    };
                    path = up;
                }
                Step::Abort => return None,
            }
        }
    }

    /// Try to replace `path.node()` by re-reading it as a child of its parent.
    fn attempt(&self, path: &NodePath, first_token: TokenId, stranded: &FxHashSet<TokenId>) -> Step {
        let candidate = path.node();
        let Some(parent) = path.parent() else {
            return Step::Escalate(AttemptOutcome::InsufficientContext);
        };
        let Some(old_span) = self.old_tree.table().span(candidate) else {
            return Step::Escalate(AttemptOutcome::StartNotFound);
        };
        let Some(start) = seek(&self.tokens, first_token, old_span.start) else {
            return Step::Escalate(AttemptOutcome::StartNotFound);
        };

        let diagnostics = CollectingListener::new();
        let Some(mut parser) = Parser::at(&self.tokens, self.interner, &diagnostics, start) else {
            return Step::Escalate(AttemptOutcome::StartNotFound);
        };
        parser.set_context(context_for(path.nodes()));
        let before = parser.position();
        let node = match dispatch(&mut parser, parent, candidate) {
            DispatchOutcome::Reparsed(node) => node,
            DispatchOutcome::InsufficientContext => {
                return Step::Escalate(AttemptOutcome::InsufficientContext);
            }
            DispatchOutcome::NotAChild(error) => {
                warn!(%error, "abandoning incremental reparse");
                return Step::Abort;
            }
        };
        if parser.position() == before {
            // Only missing tokens: nothing to compare against the old node.
            return Step::Escalate(AttemptOutcome::Mismatch);
        }
        let synthetic = parser.into_synthetic();

        if !self.covers_same_tokens(candidate, old_span.start, &node, &synthetic) {
            return Step::Escalate(AttemptOutcome::Mismatch);
        }
        if self.strands_synthetic(stranded, candidate.id()) {
            return Step::Escalate(AttemptOutcome::StrandedSynthetic);
        }
        Step::Accepted {
            node,
            synthetic,
            diagnostics,
        }
    }

    /// The new node must start where the old one did and stop where the old
    /// one stopped, seen through the token map.
    ///
    /// A node that opens or closes on a missing token is refused as well: the
    /// parent chose its production from the real tokens around the child.
    fn covers_same_tokens(
        &self,
        old: &Node,
        old_start: u32,
        new: &Node,
        synthetic: &SyntheticTokens,
    ) -> bool {
        let new_table = TokenTable::new(&self.tokens, synthetic);
        let is_missing = |id: TokenId| {
            new_table
                .resolve(id)
                .is_none_or(|token| matches!(token.origin, TokenOrigin::Missing { .. }))
        };
        if is_missing(new.first_token()) || is_missing(new.last_token()) {
            debug!(kind = %new.syntax_kind(), "replacement is bounded by a missing token");
            return false;
        }
        let Some(new_span) = new_table.span(new) else {
            return false;
        };
        if new_span.start != old_start {
            debug!(old_start, new_start = new_span.start, "replacement moved");
            return false;
        }
        let expected = self
            .old_tree
            .table()
            .continuation(old)
            .and_then(|continuation| {
                Some(Continuation {
                    token: self.token_map.get(continuation.token)?,
                    consumed: continuation.consumed,
                })
            });
        let actual = new_table.continuation(new);
        if expected.is_none() || expected != actual {
            debug!(?expected, ?actual, "replacement stops elsewhere");
            return false;
        }
        true
    }

    /// Synthetic tokens of the old tree anchored on tokens the edit removed.
    fn stranded_synthetic_ids(&self) -> FxHashSet<TokenId> {
        self.old_tree
            .synthetic()
            .iter()
            .filter(|(_, token)| self.token_map.get(token.anchor).is_none())
            .map(|(id, _)| id)
            .collect()
    }

    /// Check whether a node outside `replaced` uses one of `stranded`. Such a
    /// node would be shared by the new tree with nothing to resolve against.
    fn strands_synthetic(&self, stranded: &FxHashSet<TokenId>, replaced: NodeId) -> bool {
        fn uses(node: &Node, replaced: NodeId, stranded: &FxHashSet<TokenId>) -> bool {
            if node.id() == replaced {
                return false;
            }
            node.elements().into_iter().any(|element| match element {
                Element::Token(token) => stranded.contains(&token),
                Element::Node(child) => uses(child, replaced, stranded),
            })
        }

        !stranded.is_empty() && uses(self.old_tree.root(), replaced, stranded)
    }

    fn splice(
        &self,
        old: &Node,
        new: Node,
        synthetic: SyntheticTokens,
        diagnostics: &CollectingListener,
        attempts: Vec<Attempt>,
    ) -> Option<Reparse> {
        let root = match clone_with_replacement(
            self.old_tree.root(),
            old,
            &new,
            self.old_tree.tokens(),
            self.token_map,
        ) {
            Ok(root) => root,
            Err(error) => {
                warn!(%error, "abandoning incremental reparse");
                return None;
            }
        };
        let merged = self
            .old_tree
            .synthetic()
            .merged_with(&synthetic, |token| self.token_map.get(token));
        let tree = SyntaxTree::new(root, Arc::clone(&self.tokens), Arc::new(merged));
        copy_resolution_data(self.old_tree, old, &tree, &new);
        diagnostics.forward_to(self.listener);

        debug!(
            replaced = %old.syntax_kind(),
            escalations = attempts.len().saturating_sub(1),
            "spliced replacement"
        );
        Some(Reparse {
            tree,
            replaced: old.id(),
            replacement: new,
            attempts,
        })
    }

    /// Parse the whole new stream. Always succeeds.
    fn reparse_unit(&self, mut attempts: Vec<Attempt>) -> Reparse {
        debug!(attempts = attempts.len(), "parsing the whole unit");
        let tree = crate::parse(Arc::clone(&self.tokens), self.interner, self.listener);
        let old_root = self.old_tree.root();
        copy_resolution_data(self.old_tree, old_root, &tree, tree.root());
        attempts.push(Attempt {
            candidate: old_root.syntax_kind(),
            candidate_id: old_root.id(),
            parent: None,
            outcome: AttemptOutcome::FullParse,
        });
        Reparse {
            replaced: old_root.id(),
            replacement: tree.root().clone(),
            tree,
            attempts,
        }
    }
}

/// The token of `tokens` that starts at `offset`, searching from `from`
/// forward, or backward if `from` is already past it.
fn seek(tokens: &TokenStream, from: TokenId, offset: u32) -> Option<TokenId> {
    let start_at = |index: usize| tokens.at(index).map(|token| token.span.start);
    let mut index = tokens.index_of(from)?;
    while start_at(index)? < offset {
        index += 1;
    }
    while index > 0 && start_at(index)? > offset {
        index -= 1;
    }
    let token = tokens.at(index)?;
    (token.span.start == offset).then_some(token.id)
}

/// The parse context a node on `path` was originally parsed in.
fn context_for(path: &[Node]) -> ParseContext {
    path.windows(2)
        .fold(ParseContext::NONE, |context, pair| {
            let (ancestor, next) = (&pair[0], pair[1].id());
            match ancestor.kind() {
                NodeKind::BlockFunctionBody { .. } | NodeKind::ExpressionFunctionBody { .. } => {
                    ParseContext::IN_FUNCTION
                }
                NodeKind::WhileStatement { body, .. }
                | NodeKind::DoStatement { body, .. }
                | NodeKind::ForStatement { body, .. }
                    if body.id() == next =>
                {
                    context.with(ParseContext::IN_LOOP)
                }
                NodeKind::SwitchCase { statements, .. }
                | NodeKind::SwitchDefault { statements, .. }
                    if statements.iter().any(|statement| statement.id() == next) =>
                {
                    context.with(ParseContext::IN_SWITCH)
                }
                _ => context,
            }
        })
}
