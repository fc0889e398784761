//! Immutable token sequence shared between syntax trees.

use rustc_hash::FxHashMap;

use super::{Comment, Token, TokenId, TokenKind};

/// An immutable, doubly-traversable token sequence.
///
/// The first token is always a zero-width [`TokenKind::Bof`] sentinel and the
/// last is always [`TokenKind::Eof`], so every real token has both a previous
/// and a next token. A stream is never patched after construction; callers
/// share it behind an `Arc`.
pub struct TokenStream {
    tokens: Vec<Token>,
    comments: Vec<Comment>,
    index: FxHashMap<TokenId, u32>,
}

impl TokenStream {
    /// Build a stream from scanned tokens.
    ///
    /// `tokens` must start with `Bof` and end with `Eof`; the lexer guarantees it.
    pub fn new(tokens: Vec<Token>, comments: Vec<Comment>) -> Self {
        debug_assert!(tokens.first().is_some_and(|t| t.kind == TokenKind::Bof));
        debug_assert!(tokens.last().is_some_and(|t| t.kind == TokenKind::Eof));
        let index = tokens
            .iter()
            .enumerate()
            .filter_map(|(i, t)| u32::try_from(i).ok().map(|i| (t.id, i)))
            .collect();
        TokenStream {
            tokens,
            comments,
            index,
        }
    }

    /// All tokens, sentinels included.
    #[inline]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// A stream always holds at least its two sentinels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.len() <= 2
    }

    #[inline]
    pub fn index_of(&self, id: TokenId) -> Option<usize> {
        self.index.get(&id).map(|&i| i as usize)
    }

    #[inline]
    pub fn contains(&self, id: TokenId) -> bool {
        self.index.contains_key(&id)
    }

    #[inline]
    pub fn get(&self, id: TokenId) -> Option<&Token> {
        self.index_of(id).and_then(|i| self.tokens.get(i))
    }

    #[inline]
    pub fn at(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// The token after `id`, or `None` past `Eof`.
    pub fn next(&self, id: TokenId) -> Option<TokenId> {
        let i = self.index_of(id)?;
        self.tokens.get(i + 1).map(|t| t.id)
    }

    /// The token before `id`, or `None` before `Bof`.
    pub fn previous(&self, id: TokenId) -> Option<TokenId> {
        let i = self.index_of(id)?;
        i.checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(|t| t.id)
    }

    /// The `Bof` sentinel.
    #[inline]
    pub fn bof(&self) -> &Token {
        &self.tokens[0]
    }

    /// The `Eof` sentinel.
    #[inline]
    pub fn eof(&self) -> &Token {
        &self.tokens[self.tokens.len() - 1]
    }

    /// The first real token (`Eof` for an empty file).
    #[inline]
    pub fn first(&self) -> &Token {
        &self.tokens[1]
    }

    /// Comments that appear between `id` and the token before it.
    pub fn comments_before(&self, id: TokenId) -> &[Comment] {
        let Some(token) = self.get(id) else {
            return &[];
        };
        let (start, len) = token.comments;
        let start = start as usize;
        self.comments
            .get(start..start + len as usize)
            .unwrap_or_default()
    }

    /// All comments in source order.
    #[inline]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }
}

impl std::fmt::Debug for TokenStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.tokens.iter()).finish()
    }
}
