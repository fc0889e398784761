//! Tokens that exist only in a syntax tree, never in a token stream.
//!
//! The parser never rewrites the stream it reads. When it has to read `>>`
//! as two closing angle brackets, it records *pieces* of the real token here.
//! When error recovery needs a `;` that is not there, it records a zero-width
//! *missing* token anchored where the `;` was expected.

use rustc_hash::FxHashMap;

use super::{TokenId, TokenKind};
use crate::Name;

/// What a synthetic token stands for.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SyntheticFlavor {
    /// A slice of a composite operator token.
    Piece,
    /// A zero-width placeholder for a token the source lacks.
    Missing,
}

/// A synthetic token, positioned relative to a real `anchor` token.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct SyntheticToken {
    pub kind: TokenKind,
    pub lexeme: Name,
    pub flavor: SyntheticFlavor,
    pub anchor: TokenId,
    /// Byte offset of the piece within the anchor.
    pub offset: u32,
    pub len: u32,
}

/// The synthetic tokens a syntax tree refers to.
#[derive(Clone, Debug, Default)]
pub struct SyntheticTokens {
    tokens: FxHashMap<TokenId, SyntheticToken>,
}

impl SyntheticTokens {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a token and return the id the tree should refer to.
    pub fn push(&mut self, token: SyntheticToken) -> TokenId {
        let id = TokenId::fresh();
        self.tokens.insert(id, token);
        id
    }

    #[inline]
    pub fn get(&self, id: TokenId) -> Option<&SyntheticToken> {
        self.tokens.get(&id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// All entries, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (TokenId, &SyntheticToken)> + '_ {
        self.tokens.iter().map(|(&id, token)| (id, token))
    }

    /// Merge `other` into a copy of `self`, rewriting anchors with `remap`.
    ///
    /// Entries whose anchor has no image under `remap` are dropped; the nodes
    /// that used them are gone from the merged tree.
    #[must_use]
    pub fn merged_with(
        &self,
        other: &SyntheticTokens,
        remap: impl Fn(TokenId) -> Option<TokenId>,
    ) -> SyntheticTokens {
        let mut tokens = FxHashMap::default();
        tokens.reserve(self.tokens.len() + other.tokens.len());
        for (&id, token) in &self.tokens {
            if let Some(anchor) = remap(token.anchor) {
                tokens.insert(id, SyntheticToken { anchor, ..*token });
            }
        }
        tokens.extend(other.tokens.iter().map(|(&id, token)| (id, *token)));
        SyntheticTokens { tokens }
    }
}
