//! Substituting one node of a tree and rebuilding the path above it.

use smallvec::SmallVec;
use thiserror::Error;

use tern_ir::{Node, NodeId, SyntaxKind, TokenId, TokenMap, TokenStream};

/// Why a replacement could not be spliced in.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum SpliceError {
    #[error("node {id:?} (a {kind}) is not in the tree being cloned")]
    NodeNotFound { id: NodeId, kind: SyntaxKind },
    #[error("token {0:?} outside the edit has no counterpart in the new stream")]
    UnmappedToken(TokenId),
}

/// Clone the tree under `root`, putting `new_node` where `old_node` was.
///
/// Only the ancestors of `old_node` are rebuilt. They get fresh ids and keep
/// their annotations. When `token_map` keeps every id, all other subtrees are
/// shared with the old tree; otherwise they are rebuilt with their tokens
/// mapped. `old_tokens` is the stream the old tree was parsed from.
pub fn clone_with_replacement(
    root: &Node,
    old_node: &Node,
    new_node: &Node,
    old_tokens: &TokenStream,
    token_map: &TokenMap,
) -> Result<Node, SpliceError> {
    let mut spine: SmallVec<[&Node; 16]> = SmallVec::new();
    if !find_spine(root, old_node.id(), &mut spine) {
        return Err(SpliceError::NodeNotFound {
            id: old_node.id(),
            kind: old_node.syntax_kind(),
        });
    }

    let splicer = Splicer {
        old_tokens,
        token_map,
        share: token_map.is_identity_preserving(),
    };
    let mut replaced = old_node.id();
    let mut replacement = new_node.clone();
    for ancestor in spine.iter().rev().skip(1) {
        let kind = ancestor.kind().try_map(
            |child| {
                if child.id() == replaced {
                    Ok(replacement.clone())
                } else {
                    splicer.subtree(child)
                }
            },
            |token| splicer.token(token),
        )?;
        replaced = ancestor.id();
        replacement = Node::with_annotations(kind, ancestor.annotations());
    }
    Ok(replacement)
}

/// Push the nodes from `node` down to `target` onto `spine`.
fn find_spine<'n>(node: &'n Node, target: NodeId, spine: &mut SmallVec<[&'n Node; 16]>) -> bool {
    spine.push(node);
    if node.id() == target {
        return true;
    }
    for child in node.children() {
        if find_spine(child, target, spine) {
            return true;
        }
    }
    spine.pop();
    false
}

struct Splicer<'a> {
    old_tokens: &'a TokenStream,
    token_map: &'a TokenMap,
    share: bool,
}

impl Splicer<'_> {
    fn subtree(&self, node: &Node) -> Result<Node, SpliceError> {
        if self.share {
            return Ok(node.clone());
        }
        let kind = node
            .kind()
            .try_map(|child| self.subtree(child), |token| self.token(token))?;
        Ok(Node::with_annotations(kind, node.annotations()))
    }

    /// Stream tokens go through the map; synthetic ids stay, their anchors
    /// are remapped with the synthetic table.
    fn token(&self, token: TokenId) -> Result<TokenId, SpliceError> {
        if !self.old_tokens.contains(token) {
            return Ok(token);
        }
        self.token_map
            .get(token)
            .ok_or(SpliceError::UnmappedToken(token))
    }
}

#[cfg(test)]
mod tests;
