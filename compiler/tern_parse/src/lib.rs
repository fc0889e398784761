//! Recursive descent parser for Tern, and the incremental re-parse engine.
//!
//! The grammar exposes one entry point per production (`parse_statement`,
//! `parse_type_name`, ...). Every entry point starts at the cursor, always
//! returns a node, and reports malformed input through an [`ErrorListener`]
//! instead of failing. The [`incremental`] module re-runs single entry points
//! to rebuild the smallest part of a tree that an edit touched.

mod context;
mod cursor;
mod grammar;
pub mod incremental;

#[cfg(test)]
mod tests;

use std::sync::{Arc, Once};

use tern_diagnostic::{Diagnostic, ErrorCode, ErrorListener};
use tern_ir::{
    Name, Node, Span, StringInterner, SyntaxTree, SyntheticTokens, TokenId, TokenKind, TokenStream,
};

pub use context::ParseContext;
pub use cursor::{Cursor, Position};
pub use incremental::{
    copy_resolution_data, dispatch, Attempt, AttemptOutcome, DispatchOutcome, IncrementalParser,
    NotAChild, ParseOptions, Reparse, SpliceError,
};

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber for parser diagnostics.
///
/// Does nothing unless `RUST_LOG` is set; safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    context: ParseContext,
    listener: &'a dyn ErrorListener,
}

impl<'a> Parser<'a> {
    /// Create a parser at the first token of `tokens`.
    pub fn new(
        tokens: &'a TokenStream,
        interner: &'a StringInterner,
        listener: &'a dyn ErrorListener,
    ) -> Self {
        Parser {
            cursor: Cursor::new(tokens, interner),
            context: ParseContext::NONE,
            listener,
        }
    }

    /// Create a parser positioned at `start`, or `None` if `tokens` does not
    /// contain it.
    pub fn at(
        tokens: &'a TokenStream,
        interner: &'a StringInterner,
        listener: &'a dyn ErrorListener,
        start: TokenId,
    ) -> Option<Self> {
        Some(Parser {
            cursor: Cursor::at(tokens, interner, start)?,
            context: ParseContext::NONE,
            listener,
        })
    }

    // Context

    #[inline]
    pub fn context(&self) -> ParseContext {
        self.context
    }

    #[inline]
    pub fn has_context(&self, flag: ParseContext) -> bool {
        self.context.has(flag)
    }

    /// Replace the whole context. Used to resume parsing in the middle of a tree.
    #[inline]
    pub fn set_context(&mut self, context: ParseContext) {
        self.context = context;
    }

    /// Run `f` with `flag` added, restoring the previous context afterwards.
    pub fn with_context<T>(&mut self, flag: ParseContext, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = self.context;
        self.context = saved.with(flag);
        let result = f(self);
        self.context = saved;
        result
    }

    /// Run `f` with `flag` removed, restoring the previous context afterwards.
    pub fn without_context<T>(&mut self, flag: ParseContext, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = self.context;
        self.context = saved.without(flag);
        let result = f(self);
        self.context = saved;
        result
    }

    /// Run `f` as the body of a function: loop and switch targets outside
    /// the function are not visible inside it.
    pub(crate) fn in_function_body<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = self.context;
        self.context = ParseContext::IN_FUNCTION;
        let result = f(self);
        self.context = saved;
        result
    }

    // Cursor delegation

    #[inline]
    fn current_kind(&self) -> TokenKind {
        self.cursor.current_kind()
    }

    #[inline]
    fn current_span(&self) -> Span {
        self.cursor.current_span()
    }

    #[inline]
    fn check(&self, kind: TokenKind) -> bool {
        self.cursor.check(kind)
    }

    #[inline]
    fn check_ident(&self) -> bool {
        self.cursor.check_ident()
    }

    #[inline]
    fn check_contextual(&self, word: &str) -> bool {
        self.cursor.check_contextual(word)
    }

    #[inline]
    fn peek_kind(&self, n: usize) -> TokenKind {
        self.cursor.peek_kind(n)
    }

    #[inline]
    fn is_at_end(&self) -> bool {
        self.cursor.is_at_end()
    }

    #[inline]
    fn advance(&mut self) -> TokenId {
        self.cursor.advance()
    }

    /// The token the next entry point would start at.
    #[inline]
    pub fn current_token(&self) -> TokenId {
        self.cursor.current().id
    }

    /// Current position, for comparing before and after a parse.
    #[inline]
    pub fn position(&self) -> Position {
        self.cursor.position()
    }

    /// Lexeme of a token of the stream being parsed; `None` for tokens this
    /// parser did not scan.
    #[inline]
    pub fn stream_lexeme(&self, id: TokenId) -> Option<Name> {
        self.cursor.tokens().get(id).map(|token| token.lexeme)
    }

    /// Synthetic tokens produced so far.
    #[inline]
    pub fn synthetic(&self) -> &SyntheticTokens {
        self.cursor.synthetic()
    }

    /// Finish parsing, keeping the synthetic tokens the nodes refer to.
    pub fn into_synthetic(self) -> SyntheticTokens {
        self.cursor.into_synthetic()
    }

    // Diagnostics

    fn error(&self, code: ErrorCode, span: Span) {
        self.listener.on_error(Diagnostic::error(code, span));
    }

    fn error_with(&self, code: ErrorCode, span: Span, args: &[&str]) {
        let diagnostic = args
            .iter()
            .fold(Diagnostic::error(code, span), |d, arg| d.with_arg(*arg));
        self.listener.on_error(diagnostic);
    }
}

/// Parse a whole token stream.
pub fn parse(
    tokens: Arc<TokenStream>,
    interner: &StringInterner,
    listener: &dyn ErrorListener,
) -> SyntaxTree {
    let (root, synthetic) = {
        let mut parser = Parser::new(&tokens, interner, listener);
        let root: Node = parser.parse_compilation_unit();
        (root, parser.into_synthetic())
    };
    SyntaxTree::new(root, tokens, Arc::new(synthetic))
}

/// Lex and parse `source`.
pub fn parse_source(
    source: &str,
    interner: &StringInterner,
    listener: &dyn ErrorListener,
) -> SyntaxTree {
    parse(Arc::new(tern_lexer::lex(source, interner)), interner, listener)
}
