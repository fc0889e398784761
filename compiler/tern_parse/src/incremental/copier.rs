//! Carrying semantic annotations from an old subtree to its replacement.

use tern_ir::{Node, NodeKind, SeparatedNodes, Slot, SyntaxTree, TokenId, TokenTable};

/// Copy annotations from `from` (in `from_tree`) onto `to` (in `to_tree`)
/// wherever the two subtrees agree.
///
/// Two nodes agree when they have the same kind, every pair of child nodes
/// agrees, and every pair of token slots has the same text. Child pairs are
/// all visited even once a difference is known, so matching parts of a
/// changed node still get their annotations. A node's own annotations are
/// copied only when the whole node agrees.
///
/// When the edit wrapped the old node one level down (`a` became `a.b` or
/// `a[0]` became `a[0].x`), the old node is compared against the wrapped
/// prefix or target instead.
///
/// Returns whether `from` and `to` agree.
pub fn copy_resolution_data(
    from_tree: &SyntaxTree,
    from: &Node,
    to_tree: &SyntaxTree,
    to: &Node,
) -> bool {
    Copier {
        from: from_tree.table(),
        to: to_tree.table(),
    }
    .copy(from, to)
}

struct Copier<'t> {
    from: TokenTable<'t>,
    to: TokenTable<'t>,
}

impl Copier<'_> {
    fn copy(&self, from: &Node, to: &Node) -> bool {
        if from.syntax_kind() != to.syntax_kind() {
            return self.copy_into_wrapper(from, to);
        }
        let equal = from
            .kind()
            .slots()
            .into_iter()
            .zip(to.kind().slots())
            .fold(true, |equal, (a, b)| self.slots(a, b) & equal);
        if equal {
            to.set_annotations(from.annotations());
        }
        equal
    }

    fn copy_into_wrapper(&self, from: &Node, to: &Node) -> bool {
        match to.kind() {
            NodeKind::PrefixedIdentifier { prefix: inner, .. }
            | NodeKind::PropertyAccess {
                target: Some(inner),
                ..
            }
                if inner.syntax_kind() == from.syntax_kind() =>
            {
                self.copy(from, inner)
            }
            _ => false,
        }
    }

    fn slots(&self, a: Slot<'_>, b: Slot<'_>) -> bool {
        match (a, b) {
            (Slot::Token(a), Slot::Token(b)) => self.tokens(Some(a), Some(b)),
            (Slot::OptToken(a), Slot::OptToken(b)) => self.tokens(a, b),
            (Slot::Node(a), Slot::Node(b)) => self.copy(a, b),
            (Slot::OptNode(a), Slot::OptNode(b)) => match (a, b) {
                (None, None) => true,
                (Some(a), Some(b)) => self.copy(a, b),
                _ => false,
            },
            (Slot::List(a), Slot::List(b)) => self.lists(a, b),
            (Slot::Separated(a), Slot::Separated(b)) => self.separated(a, b),
            _ => false,
        }
    }

    fn lists(&self, a: &[Node], b: &[Node]) -> bool {
        if a.len() != b.len() {
            return false;
        }
        a.iter()
            .zip(b)
            .fold(true, |equal, (a, b)| self.copy(a, b) & equal)
    }

    fn separated(&self, a: &SeparatedNodes, b: &SeparatedNodes) -> bool {
        if a.separators.len() != b.separators.len() {
            return false;
        }
        let separators = a
            .separators
            .iter()
            .zip(&b.separators)
            .all(|(&a, &b)| self.tokens(Some(a), Some(b)));
        self.lists(&a.nodes, &b.nodes) & separators
    }

    fn tokens(&self, a: Option<TokenId>, b: Option<TokenId>) -> bool {
        match (a, b) {
            (None, None) => true,
            (Some(a), Some(b)) => {
                let a = self.from.lexeme(a);
                a.is_some() && a == self.to.lexeme(b)
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests;
