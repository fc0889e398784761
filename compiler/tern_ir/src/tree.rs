//! Syntax trees: a root node plus the token tables its ids resolve against.

use std::sync::Arc;

use crate::ast::{Element, Node, NodeId, Slot};
use crate::token::{SyntheticFlavor, SyntheticTokens, TokenId, TokenKind, TokenStream};
use crate::{Name, NodePath, Span, StringInterner};

/// A token id resolved against a tree's token tables.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ResolvedToken {
    pub kind: TokenKind,
    pub lexeme: Name,
    pub span: Span,
    pub origin: TokenOrigin,
}

/// Where a resolved token comes from.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TokenOrigin {
    Stream,
    Piece { anchor: TokenId },
    Missing { anchor: TokenId },
}

/// What comes right after a node: the first stream token it did not consume
/// in full, and how many bytes of that token it did consume.
///
/// `consumed` is non-zero only when the node ends inside a split `>>`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Continuation {
    pub token: TokenId,
    pub consumed: u32,
}

/// Borrowed view of a stream plus synthetic tokens.
#[derive(Copy, Clone)]
pub struct TokenTable<'a> {
    pub stream: &'a TokenStream,
    pub synthetic: &'a SyntheticTokens,
}

impl<'a> TokenTable<'a> {
    pub fn new(stream: &'a TokenStream, synthetic: &'a SyntheticTokens) -> Self {
        TokenTable { stream, synthetic }
    }

    pub fn resolve(&self, id: TokenId) -> Option<ResolvedToken> {
        if let Some(token) = self.stream.get(id) {
            return Some(ResolvedToken {
                kind: token.kind,
                lexeme: token.lexeme,
                span: token.span,
                origin: TokenOrigin::Stream,
            });
        }
        let synthetic = self.synthetic.get(id)?;
        let anchor = self.stream.get(synthetic.anchor)?;
        let start = anchor.span.start + synthetic.offset;
        let origin = match synthetic.flavor {
            SyntheticFlavor::Piece => TokenOrigin::Piece {
                anchor: synthetic.anchor,
            },
            SyntheticFlavor::Missing => TokenOrigin::Missing {
                anchor: synthetic.anchor,
            },
        };
        Some(ResolvedToken {
            kind: synthetic.kind,
            lexeme: synthetic.lexeme,
            span: Span::new(start, start + synthetic.len),
            origin,
        })
    }

    #[inline]
    pub fn lexeme(&self, id: TokenId) -> Option<Name> {
        self.resolve(id).map(|token| token.lexeme)
    }

    /// Source span of a node, from its first to its last token.
    pub fn span(&self, node: &Node) -> Option<Span> {
        let first = self.resolve(node.first_token())?;
        let last = self.resolve(node.last_token())?;
        Some(Span::new(first.span.start, last.span.end.max(first.span.start)))
    }

    /// The continuation after token `id`.
    pub fn continuation_after(&self, id: TokenId) -> Option<Continuation> {
        if self.stream.contains(id) {
            return Some(Continuation {
                token: self.stream.next(id)?,
                consumed: 0,
            });
        }
        let synthetic = self.synthetic.get(id)?;
        let anchor = self.stream.get(synthetic.anchor)?;
        let consumed = synthetic.offset + synthetic.len;
        match synthetic.flavor {
            SyntheticFlavor::Piece if consumed >= anchor.span.len() => Some(Continuation {
                token: self.stream.next(anchor.id)?,
                consumed: 0,
            }),
            SyntheticFlavor::Piece | SyntheticFlavor::Missing => Some(Continuation {
                token: anchor.id,
                consumed,
            }),
        }
    }

    /// The continuation after `node`.
    #[inline]
    pub fn continuation(&self, node: &Node) -> Option<Continuation> {
        self.continuation_after(node.last_token())
    }
}

/// A parsed file: the root node and the tokens it was parsed from.
#[derive(Clone)]
pub struct SyntaxTree {
    root: Node,
    tokens: Arc<TokenStream>,
    synthetic: Arc<SyntheticTokens>,
}

impl SyntaxTree {
    pub fn new(root: Node, tokens: Arc<TokenStream>, synthetic: Arc<SyntheticTokens>) -> Self {
        SyntaxTree {
            root,
            tokens,
            synthetic,
        }
    }

    #[inline]
    pub fn root(&self) -> &Node {
        &self.root
    }

    #[inline]
    pub fn tokens(&self) -> &Arc<TokenStream> {
        &self.tokens
    }

    #[inline]
    pub fn synthetic(&self) -> &Arc<SyntheticTokens> {
        &self.synthetic
    }

    #[inline]
    pub fn table(&self) -> TokenTable<'_> {
        TokenTable::new(&self.tokens, &self.synthetic)
    }

    /// Span of `node` in this tree's source. Nodes of other trees whose
    /// tokens are not known here get [`Span::DUMMY`].
    #[inline]
    pub fn span(&self, node: &Node) -> Span {
        self.table().span(node).unwrap_or(Span::DUMMY)
    }

    #[inline]
    pub fn resolve(&self, id: TokenId) -> Option<ResolvedToken> {
        self.table().resolve(id)
    }

    /// Ancestor chain from the root down to the node with `id`.
    pub fn path_to(&self, id: NodeId) -> Option<NodePath> {
        fn search(node: &Node, id: NodeId, path: &mut Vec<Node>) -> bool {
            path.push(node.clone());
            if node.id() == id {
                return true;
            }
            for child in node.children() {
                if search(child, id, path) {
                    return true;
                }
            }
            path.pop();
            false
        }

        let mut path = Vec::new();
        search(&self.root, id, &mut path).then(|| NodePath::new(path))
    }

    /// The stream tokens covered by the tree, in order.
    ///
    /// Split pieces contribute their anchor once; missing tokens contribute
    /// nothing. For a well-formed tree this is the stream minus `Bof`.
    pub fn leaf_tokens(&self) -> Vec<TokenId> {
        fn walk(table: TokenTable<'_>, node: &Node, out: &mut Vec<TokenId>) {
            for element in node.elements() {
                match element {
                    Element::Node(child) => walk(table, child, out),
                    Element::Token(id) => match table.resolve(id).map(|token| token.origin) {
                        Some(TokenOrigin::Stream) => out.push(id),
                        Some(TokenOrigin::Piece { anchor }) => {
                            if out.last() != Some(&anchor) {
                                out.push(anchor);
                            }
                        }
                        Some(TokenOrigin::Missing { .. }) | None => {}
                    },
                }
            }
        }

        let mut out = Vec::new();
        walk(self.table(), &self.root, &mut out);
        out
    }

    /// S-expression rendering of the tree, for tests and debugging.
    pub fn dump(&self, interner: &StringInterner) -> String {
        fn write(tree: &SyntaxTree, interner: &StringInterner, node: &Node, out: &mut String) {
            out.push('(');
            out.push_str(&node.syntax_kind().to_string());
            for element in node.elements() {
                out.push(' ');
                match element {
                    Element::Node(child) => write(tree, interner, child, out),
                    Element::Token(id) => match tree.resolve(id) {
                        Some(token) if matches!(token.origin, TokenOrigin::Missing { .. }) => {
                            out.push_str("<missing>");
                        }
                        Some(token) => out.push_str(interner.lookup(token.lexeme)),
                        None => out.push_str("<?>"),
                    },
                }
            }
            out.push(')');
        }

        let mut out = String::new();
        write(self, interner, &self.root, &mut out);
        out
    }
}

impl std::fmt::Debug for SyntaxTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyntaxTree")
            .field("root", &self.root)
            .field("tokens", &self.tokens.len())
            .field("synthetic", &self.synthetic.len())
            .finish()
    }
}

/// Check whether two subtrees have the same shape and the same token text.
///
/// Kinds must match, child slots must match pairwise (absent matches absent),
/// and token slots must have equal lexemes. Ids and offsets are ignored.
pub fn structurally_equal(a_tree: &SyntaxTree, a: &Node, b_tree: &SyntaxTree, b: &Node) -> bool {
    fn nodes(at: TokenTable<'_>, a: &Node, bt: TokenTable<'_>, b: &Node) -> bool {
        if a.syntax_kind() != b.syntax_kind() {
            return false;
        }
        a.kind()
            .slots()
            .into_iter()
            .zip(b.kind().slots())
            .all(|(x, y)| slots(at, x, bt, y))
    }

    fn tokens(at: TokenTable<'_>, a: Option<TokenId>, bt: TokenTable<'_>, b: Option<TokenId>) -> bool {
        match (a, b) {
            (None, None) => true,
            (Some(a), Some(b)) => at.lexeme(a) == bt.lexeme(b),
            _ => false,
        }
    }

    fn slots(at: TokenTable<'_>, x: Slot<'_>, bt: TokenTable<'_>, y: Slot<'_>) -> bool {
        match (x, y) {
            (Slot::Token(a), Slot::Token(b)) => tokens(at, Some(a), bt, Some(b)),
            (Slot::OptToken(a), Slot::OptToken(b)) => tokens(at, a, bt, b),
            (Slot::Node(a), Slot::Node(b)) => nodes(at, a, bt, b),
            (Slot::OptNode(a), Slot::OptNode(b)) => match (a, b) {
                (None, None) => true,
                (Some(a), Some(b)) => nodes(at, a, bt, b),
                _ => false,
            },
            (Slot::List(a), Slot::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(a, b)| nodes(at, a, bt, b))
            }
            (Slot::Separated(a), Slot::Separated(b)) => {
                a.nodes.len() == b.nodes.len()
                    && a.separators.len() == b.separators.len()
                    && a.nodes.iter().zip(&b.nodes).all(|(a, b)| nodes(at, a, bt, b))
                    && a
                        .separators
                        .iter()
                        .zip(&b.separators)
                        .all(|(&a, &b)| tokens(at, Some(a), bt, Some(b)))
            }
            _ => false,
        }
    }

    nodes(a_tree.table(), a, b_tree.table(), b)
}
