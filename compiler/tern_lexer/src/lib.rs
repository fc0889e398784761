//! Lexer for Tern using logos.
//!
//! [`lex`] produces a fresh [`TokenStream`]. [`relex`] re-scans an edited
//! source and correlates the result with the previous stream, so tokens the
//! edit did not touch keep their ids.

mod raw_token;
mod relex;

#[cfg(test)]
mod tests;

use logos::Logos;
use tern_ir::{Comment, CommentKind, Name, Span, StringInterner, Token, TokenId, TokenKind, TokenStream};

use raw_token::RawToken;

pub use relex::{relex, Relexed};

/// A scanned token before id assignment.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Scanned {
    pub(crate) kind: TokenKind,
    pub(crate) lexeme: Name,
    pub(crate) span: Span,
    pub(crate) comments: (u32, u32),
}

impl Scanned {
    pub(crate) fn into_token(self, id: TokenId) -> Token {
        Token::new(id, self.kind, self.lexeme, self.span)
            .with_comments(self.comments.0, self.comments.1)
    }
}

pub(crate) struct Scan {
    pub(crate) tokens: Vec<Scanned>,
    pub(crate) comments: Vec<Comment>,
}

/// Lex source code into a token stream with fresh ids.
///
/// # Panics
/// Panics if the source is larger than `u32::MAX` bytes.
pub fn lex(source: &str, interner: &StringInterner) -> TokenStream {
    let Scan { tokens, comments } = scan(source, interner);
    let tokens = tokens
        .into_iter()
        .map(|scanned| scanned.into_token(TokenId::fresh()))
        .collect();
    TokenStream::new(tokens, comments)
}

/// Scan `source` into sentinel-delimited tokens and a comment table.
pub(crate) fn scan(source: &str, interner: &StringInterner) -> Scan {
    let source_len = u32::try_from(source.len())
        .unwrap_or_else(|_| panic!("source file exceeds {} bytes", u32::MAX));

    let mut tokens = vec![Scanned {
        kind: TokenKind::Bof,
        lexeme: Name::EMPTY,
        span: Span::point(0),
        comments: (0, 0),
    }];
    let mut comments = Vec::new();
    let mut pending_start = 0u32;

    let mut logos = RawToken::lexer(source);
    while let Some(result) = logos.next() {
        let span = Span::try_from_range(logos.span()).unwrap_or(Span::point(source_len));
        let slice = logos.slice();
        let kind = match result {
            Ok(RawToken::LineComment) => {
                comments.push(comment(slice, span, interner, slice.starts_with("///")));
                continue;
            }
            Ok(RawToken::BlockComment) => {
                let doc = slice.starts_with("/**") && slice != "/**/";
                comments.push(comment(slice, span, interner, doc));
                continue;
            }
            Ok(raw) => raw.kind().unwrap_or(TokenKind::Error),
            Err(()) => TokenKind::Error,
        };
        let pending_end = count(&comments);
        tokens.push(Scanned {
            kind,
            lexeme: interner.intern(slice),
            span,
            comments: (pending_start, pending_end - pending_start),
        });
        pending_start = pending_end;
    }

    let pending_end = count(&comments);
    tokens.push(Scanned {
        kind: TokenKind::Eof,
        lexeme: Name::EMPTY,
        span: Span::point(source_len),
        comments: (pending_start, pending_end - pending_start),
    });
    Scan { tokens, comments }
}

fn comment(slice: &str, span: Span, interner: &StringInterner, doc: bool) -> Comment {
    let kind = if doc {
        CommentKind::Doc
    } else if slice.starts_with("//") {
        CommentKind::Line
    } else {
        CommentKind::Block
    };
    Comment {
        kind,
        span,
        text: interner.intern(slice),
    }
}

fn count(comments: &[Comment]) -> u32 {
    u32::try_from(comments.len()).unwrap_or(u32::MAX)
}
