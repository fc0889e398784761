//! Tokens for the Tern lexer and parser.
//!
//! Every token carries a [`TokenId`] issued once, at scan time. Ids survive
//! re-scanning for tokens outside an edited region, which is what lets an
//! old syntax tree and a new one share subtrees.

mod kind;
mod map;
mod stream;
mod synthetic;

#[cfg(test)]
mod tests;

pub use kind::TokenKind;
pub use map::TokenMap;
pub use stream::TokenStream;
pub use synthetic::{SyntheticFlavor, SyntheticToken, SyntheticTokens};

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use super::{Name, Span};

static NEXT_TOKEN_ID: AtomicU32 = AtomicU32::new(1);

/// Stable identity of a token, unique for the lifetime of the process.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct TokenId(u32);

impl TokenId {
    /// Never issued; stands for "no token" in places that need a value.
    pub const NONE: TokenId = TokenId(0);

    /// Issue a fresh, never-before-seen id.
    #[inline]
    pub fn fresh() -> Self {
        TokenId(NEXT_TOKEN_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// Kind of a source comment.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum CommentKind {
    /// `// ...`
    Line,
    /// `/* ... */`
    Block,
    /// `/// ...` or `/** ... */`
    Doc,
}

/// A comment preceding some token. Comments are not part of the token
/// sequence; they hang off the token that follows them.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Comment {
    pub kind: CommentKind,
    pub span: Span,
    pub text: Name,
}

/// A scanned token.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub id: TokenId,
    pub kind: TokenKind,
    /// Source text of the token, interned.
    pub lexeme: Name,
    pub span: Span,
    /// Range of preceding comments in the owning stream's comment table.
    pub(crate) comments: (u32, u32),
}

impl Token {
    #[inline]
    pub fn new(id: TokenId, kind: TokenKind, lexeme: Name, span: Span) -> Self {
        Token {
            id,
            kind,
            lexeme,
            span,
            comments: (0, 0),
        }
    }

    /// Attach the comment range `start..start + len` of the owning stream.
    #[must_use]
    pub fn with_comments(mut self, start: u32, len: u32) -> Self {
        self.comments = (start, len);
        self
    }

    /// Check whether this token has the same kind, text and position as `other`.
    /// Identity is ignored.
    #[inline]
    pub fn same_text_at(&self, other: &Token, shift: i64) -> bool {
        self.kind == other.kind
            && self.lexeme == other.lexeme
            && i64::from(self.span.start) + shift == i64::from(other.span.start)
            && self.span.len() == other.span.len()
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {:?} @ {}", self.id, self.kind, self.span)
    }
}
