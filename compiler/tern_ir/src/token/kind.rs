//! Token kinds for Tern.

use std::fmt;

/// Token kinds for Tern.
///
/// Contextual words (`show`, `hide`, `on`) are scanned as identifiers and
/// recognized by the parser from their lexeme.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TokenKind {
    // Literals and names
    Ident,
    Int,
    Double,
    String,

    // Keywords
    Abstract,
    As,
    Assert,
    Break,
    Case,
    Catch,
    Class,
    Const,
    Continue,
    Default,
    Do,
    Else,
    Extends,
    False,
    Final,
    Finally,
    For,
    If,
    Implements,
    Import,
    Is,
    New,
    Null,
    Return,
    Static,
    Switch,
    This,
    Throw,
    True,
    Try,
    Var,
    Void,
    While,
    With,

    // Delimiters
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Semicolon,
    Colon,
    Comma,
    Dot,
    /// `..` introducing a cascade section.
    DotDot,
    Question,
    At,
    Arrow,

    // Operators
    Eq,
    EqEq,
    Bang,
    BangEq,
    Lt,
    LtEq,
    LtLt,
    Gt,
    GtEq,
    GtGt,
    GtGtEq,
    Plus,
    PlusEq,
    PlusPlus,
    Minus,
    MinusEq,
    MinusMinus,
    Star,
    StarEq,
    Slash,
    SlashEq,
    Percent,
    PercentEq,
    TildeSlash,
    Tilde,
    Amp,
    AmpAmp,
    Pipe,
    PipePipe,
    Caret,

    /// Unrecognized input or an unterminated string.
    Error,
    /// Zero-width sentinel before the first token.
    Bof,
    /// Zero-width sentinel after the last token.
    Eof,
}

impl TokenKind {
    /// Human-readable name used in diagnostics.
    pub fn display_name(self) -> &'static str {
        match self {
            TokenKind::Ident => "identifier",
            TokenKind::Int => "integer",
            TokenKind::Double => "double",
            TokenKind::String => "string",
            TokenKind::Error => "invalid token",
            TokenKind::Bof => "start of file",
            TokenKind::Eof => "end of file",
            other => other.text().unwrap_or("token"),
        }
    }

    /// Fixed source text for keywords and punctuation.
    pub fn text(self) -> Option<&'static str> {
        let text = match self {
            TokenKind::Abstract => "abstract",
            TokenKind::As => "as",
            TokenKind::Assert => "assert",
            TokenKind::Break => "break",
            TokenKind::Case => "case",
            TokenKind::Catch => "catch",
            TokenKind::Class => "class",
            TokenKind::Const => "const",
            TokenKind::Continue => "continue",
            TokenKind::Default => "default",
            TokenKind::Do => "do",
            TokenKind::Else => "else",
            TokenKind::Extends => "extends",
            TokenKind::False => "false",
            TokenKind::Final => "final",
            TokenKind::Finally => "finally",
            TokenKind::For => "for",
            TokenKind::If => "if",
            TokenKind::Implements => "implements",
            TokenKind::Import => "import",
            TokenKind::Is => "is",
            TokenKind::New => "new",
            TokenKind::Null => "null",
            TokenKind::Return => "return",
            TokenKind::Static => "static",
            TokenKind::Switch => "switch",
            TokenKind::This => "this",
            TokenKind::Throw => "throw",
            TokenKind::True => "true",
            TokenKind::Try => "try",
            TokenKind::Var => "var",
            TokenKind::Void => "void",
            TokenKind::While => "while",
            TokenKind::With => "with",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::DotDot => "..",
            TokenKind::Question => "?",
            TokenKind::At => "@",
            TokenKind::Arrow => "=>",
            TokenKind::Eq => "=",
            TokenKind::EqEq => "==",
            TokenKind::Bang => "!",
            TokenKind::BangEq => "!=",
            TokenKind::Lt => "<",
            TokenKind::LtEq => "<=",
            TokenKind::LtLt => "<<",
            TokenKind::Gt => ">",
            TokenKind::GtEq => ">=",
            TokenKind::GtGt => ">>",
            TokenKind::GtGtEq => ">>=",
            TokenKind::Plus => "+",
            TokenKind::PlusEq => "+=",
            TokenKind::PlusPlus => "++",
            TokenKind::Minus => "-",
            TokenKind::MinusEq => "-=",
            TokenKind::MinusMinus => "--",
            TokenKind::Star => "*",
            TokenKind::StarEq => "*=",
            TokenKind::Slash => "/",
            TokenKind::SlashEq => "/=",
            TokenKind::Percent => "%",
            TokenKind::PercentEq => "%=",
            TokenKind::TildeSlash => "~/",
            TokenKind::Tilde => "~",
            TokenKind::Amp => "&",
            TokenKind::AmpAmp => "&&",
            TokenKind::Pipe => "|",
            TokenKind::PipePipe => "||",
            TokenKind::Caret => "^",
            TokenKind::Ident
            | TokenKind::Int
            | TokenKind::Double
            | TokenKind::String
            | TokenKind::Error
            | TokenKind::Bof
            | TokenKind::Eof => return None,
        };
        Some(text)
    }

    /// Split a composite closing-angle token into its leading `>` and the
    /// kind of what remains.
    pub fn split_leading_gt(self) -> Option<(TokenKind, TokenKind)> {
        match self {
            TokenKind::GtGt => Some((TokenKind::Gt, TokenKind::Gt)),
            TokenKind::GtEq => Some((TokenKind::Gt, TokenKind::Eq)),
            TokenKind::GtGtEq => Some((TokenKind::Gt, TokenKind::GtEq)),
            _ => None,
        }
    }

    #[inline]
    pub fn is_assignment_operator(self) -> bool {
        matches!(
            self,
            TokenKind::Eq
                | TokenKind::PlusEq
                | TokenKind::MinusEq
                | TokenKind::StarEq
                | TokenKind::SlashEq
                | TokenKind::PercentEq
                | TokenKind::GtGtEq
        )
    }

    /// Keywords that may not start an identifier.
    #[inline]
    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Abstract
                | TokenKind::As
                | TokenKind::Assert
                | TokenKind::Break
                | TokenKind::Case
                | TokenKind::Catch
                | TokenKind::Class
                | TokenKind::Const
                | TokenKind::Continue
                | TokenKind::Default
                | TokenKind::Do
                | TokenKind::Else
                | TokenKind::Extends
                | TokenKind::False
                | TokenKind::Final
                | TokenKind::Finally
                | TokenKind::For
                | TokenKind::If
                | TokenKind::Implements
                | TokenKind::Import
                | TokenKind::Is
                | TokenKind::New
                | TokenKind::Null
                | TokenKind::Return
                | TokenKind::Static
                | TokenKind::Switch
                | TokenKind::This
                | TokenKind::Throw
                | TokenKind::True
                | TokenKind::Try
                | TokenKind::Var
                | TokenKind::Void
                | TokenKind::While
                | TokenKind::With
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
