//! Token cursor for navigating the token stream.
//!
//! Provides low-level token access, lookahead, and consumption methods.
//!
//! The stream is shared and never modified. When the parser needs the first
//! `>` of a `>>`, the cursor records a synthetic piece of the real token and
//! keeps the unread remainder in a local overlay. Only this cursor sees the
//! overlay; the remainder is emitted as another piece when it is consumed.

use tern_ir::{
    Name, Span, StringInterner, SyntheticFlavor, SyntheticToken, SyntheticTokens, Token, TokenId,
    TokenKind, TokenStream,
};
use tracing::trace;

/// The unread rest of a partially consumed token.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct Split {
    /// Bytes already handed out as pieces.
    consumed: u32,
    /// What the remainder scans as.
    rest: TokenKind,
}

/// A point in the token stream, for progress checks.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Position {
    index: usize,
    consumed: u32,
}

/// Cursor for navigating tokens.
///
/// Tracks the current position in the stream plus the synthetic tokens
/// produced so far; those belong to the tree being built.
pub struct Cursor<'a> {
    tokens: &'a TokenStream,
    interner: &'a StringInterner,
    pos: usize,
    split: Option<Split>,
    synthetic: SyntheticTokens,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at the first real token (just after `Bof`).
    pub fn new(tokens: &'a TokenStream, interner: &'a StringInterner) -> Self {
        Cursor {
            tokens,
            interner,
            pos: 1.min(tokens.len() - 1),
            split: None,
            synthetic: SyntheticTokens::new(),
        }
    }

    /// Create a cursor positioned at `start`, or `None` if the stream does
    /// not contain it.
    pub fn at(tokens: &'a TokenStream, interner: &'a StringInterner, start: TokenId) -> Option<Self> {
        let pos = tokens.index_of(start)?;
        let mut cursor = Self::new(tokens, interner);
        // Bof is never a parse position.
        cursor.pos = pos.max(1).min(tokens.len() - 1);
        Some(cursor)
    }

    #[inline]
    pub fn tokens(&self) -> &'a TokenStream {
        self.tokens
    }

    #[inline]
    pub fn interner(&self) -> &'a StringInterner {
        self.interner
    }

    /// Current position, for comparing before and after a parse.
    #[inline]
    pub fn position(&self) -> Position {
        Position {
            index: self.pos,
            consumed: self.split.map_or(0, |split| split.consumed),
        }
    }

    /// Index of the current real token in the stream.
    #[inline]
    pub fn index(&self) -> usize {
        self.pos
    }

    /// The real token under the cursor. With a split pending this is the
    /// token the remainder belongs to.
    #[inline]
    pub fn current(&self) -> &'a Token {
        &self.tokens.tokens()[self.pos]
    }

    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        match self.split {
            Some(split) => split.rest,
            None => self.current().kind,
        }
    }

    pub fn current_span(&self) -> Span {
        let span = self.current().span;
        match self.split {
            Some(split) => Span::new(span.start + split.consumed, span.end),
            None => span,
        }
    }

    /// Source text of the current token (or of the pending remainder).
    pub fn current_lexeme(&self) -> &'static str {
        match self.split {
            Some(split) => split.rest.text().unwrap_or(""),
            None => self.interner.lookup(self.current().lexeme),
        }
    }

    /// Kind of the real token `n` places ahead. `n == 0` is the current kind.
    pub fn peek_kind(&self, n: usize) -> TokenKind {
        if n == 0 {
            return self.current_kind();
        }
        self.kind_at(self.pos + n)
    }

    /// Kind of the token at stream index `index`; `Eof` past the end.
    #[inline]
    pub fn kind_at(&self, index: usize) -> TokenKind {
        self.tokens
            .at(index)
            .map_or(TokenKind::Eof, |token| token.kind)
    }

    /// Lexeme of the token at stream index `index`.
    pub fn lexeme_at(&self, index: usize) -> &'static str {
        self.tokens
            .at(index)
            .map_or("", |token| self.interner.lookup(token.lexeme))
    }

    /// Check whether a split remainder is pending.
    #[inline]
    pub fn in_split(&self) -> bool {
        self.split.is_some()
    }

    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    #[inline]
    pub fn check_ident(&self) -> bool {
        self.check(TokenKind::Ident)
    }

    /// Check for an identifier spelled `word` (`show`, `hide`, `on`).
    pub fn check_contextual(&self, word: &str) -> bool {
        self.check_ident() && self.current_lexeme() == word
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    /// Consume the current token and return the id the tree should use.
    ///
    /// `Eof` is never consumed; advancing at the end returns its id again.
    pub fn advance(&mut self) -> TokenId {
        let token = self.current();
        if let Some(split) = self.split.take() {
            let id = self.push_synthetic(
                split.rest,
                SyntheticFlavor::Piece,
                split.consumed,
                token.span.len() - split.consumed,
            );
            trace!(pos = self.pos, kind = %split.rest, "advance remainder");
            self.pos += 1;
            return id;
        }
        trace!(
            pos = self.pos,
            kind = %token.kind.display_name(),
            span_start = token.span.start,
            span_end = token.span.end,
            "advance"
        );
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token.id
    }

    /// Consume a single `>` off the front of `>>`, `>=` or `>>=`.
    ///
    /// Returns `None` if the current token does not start with `>`.
    pub fn split_gt(&mut self) -> Option<TokenId> {
        let (first, rest) = self.current_kind().split_leading_gt()?;
        let consumed = self.split.map_or(0, |split| split.consumed);
        let id = self.push_synthetic(first, SyntheticFlavor::Piece, consumed, 1);
        trace!(pos = self.pos, consumed, rest = %rest, "split composite token");
        self.split = Some(Split {
            consumed: consumed + 1,
            rest,
        });
        Some(id)
    }

    /// Record a zero-width placeholder for a `kind` token the source lacks,
    /// positioned at the current token.
    pub fn missing(&mut self, kind: TokenKind) -> TokenId {
        let offset = self.split.map_or(0, |split| split.consumed);
        self.push_synthetic(kind, SyntheticFlavor::Missing, offset, 0)
    }

    fn push_synthetic(
        &mut self,
        kind: TokenKind,
        flavor: SyntheticFlavor,
        offset: u32,
        len: u32,
    ) -> TokenId {
        let lexeme = kind
            .text()
            .map_or(Name::EMPTY, |text| self.interner.intern(text));
        self.synthetic.push(SyntheticToken {
            kind,
            lexeme,
            flavor,
            anchor: self.current().id,
            offset,
            len,
        })
    }

    /// Synthetic tokens produced so far.
    #[inline]
    pub fn synthetic(&self) -> &SyntheticTokens {
        &self.synthetic
    }

    /// Give up the cursor, keeping the synthetic tokens it produced.
    pub fn into_synthetic(self) -> SyntheticTokens {
        self.synthetic
    }
}
