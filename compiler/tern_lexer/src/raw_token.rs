//! Raw Token Definition
//!
//! The logos-derived scanner output, before interning and id assignment.

use logos::Logos;
use tern_ir::TokenKind;

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub(crate) enum RawToken {
    #[regex(r"//[^\n]*")]
    LineComment,
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    #[token("abstract")]
    Abstract,
    #[token("as")]
    As,
    #[token("assert")]
    Assert,
    #[token("break")]
    Break,
    #[token("case")]
    Case,
    #[token("catch")]
    Catch,
    #[token("class")]
    Class,
    #[token("const")]
    Const,
    #[token("continue")]
    Continue,
    #[token("default")]
    Default,
    #[token("do")]
    Do,
    #[token("else")]
    Else,
    #[token("extends")]
    Extends,
    #[token("false")]
    False,
    #[token("final")]
    Final,
    #[token("finally")]
    Finally,
    #[token("for")]
    For,
    #[token("if")]
    If,
    #[token("implements")]
    Implements,
    #[token("import")]
    Import,
    #[token("is")]
    Is,
    #[token("new")]
    New,
    #[token("null")]
    Null,
    #[token("return")]
    Return,
    #[token("static")]
    Static,
    #[token("switch")]
    Switch,
    #[token("this")]
    This,
    #[token("throw")]
    Throw,
    #[token("true")]
    True,
    #[token("try")]
    Try,
    #[token("var")]
    Var,
    #[token("void")]
    Void,
    #[token("while")]
    While,
    #[token("with")]
    With,

    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*")]
    Ident,
    #[regex(r"[0-9]+")]
    #[regex(r"0[xX][0-9a-fA-F]+")]
    Int,
    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?")]
    Double,
    #[regex(r#"'([^'\\\n]|\\.)*'"#)]
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    String,
    #[regex(r#"'([^'\\\n]|\\.)*"#)]
    #[regex(r#""([^"\\\n]|\\.)*"#)]
    UnterminatedString,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("..")]
    DotDot,
    #[token("?")]
    Question,
    #[token("@")]
    At,
    #[token("=>")]
    Arrow,
    #[token("=")]
    Eq,
    #[token("==")]
    EqEq,
    #[token("!")]
    Bang,
    #[token("!=")]
    BangEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token("<<")]
    LtLt,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,
    #[token(">>")]
    GtGt,
    #[token(">>=")]
    GtGtEq,
    #[token("+")]
    Plus,
    #[token("+=")]
    PlusEq,
    #[token("++")]
    PlusPlus,
    #[token("-")]
    Minus,
    #[token("-=")]
    MinusEq,
    #[token("--")]
    MinusMinus,
    #[token("*")]
    Star,
    #[token("*=")]
    StarEq,
    #[token("/")]
    Slash,
    #[token("/=")]
    SlashEq,
    #[token("%")]
    Percent,
    #[token("%=")]
    PercentEq,
    #[token("~/")]
    TildeSlash,
    #[token("~")]
    Tilde,
    #[token("&")]
    Amp,
    #[token("&&")]
    AmpAmp,
    #[token("|")]
    Pipe,
    #[token("||")]
    PipePipe,
    #[token("^")]
    Caret,
}

impl RawToken {
    /// Token kind for everything that is not a comment.
    pub(crate) fn kind(self) -> Option<TokenKind> {
        let kind = match self {
            RawToken::LineComment | RawToken::BlockComment => return None,
            RawToken::Abstract => TokenKind::Abstract,
            RawToken::As => TokenKind::As,
            RawToken::Assert => TokenKind::Assert,
            RawToken::Break => TokenKind::Break,
            RawToken::Case => TokenKind::Case,
            RawToken::Catch => TokenKind::Catch,
            RawToken::Class => TokenKind::Class,
            RawToken::Const => TokenKind::Const,
            RawToken::Continue => TokenKind::Continue,
            RawToken::Default => TokenKind::Default,
            RawToken::Do => TokenKind::Do,
            RawToken::Else => TokenKind::Else,
            RawToken::Extends => TokenKind::Extends,
            RawToken::False => TokenKind::False,
            RawToken::Final => TokenKind::Final,
            RawToken::Finally => TokenKind::Finally,
            RawToken::For => TokenKind::For,
            RawToken::If => TokenKind::If,
            RawToken::Implements => TokenKind::Implements,
            RawToken::Import => TokenKind::Import,
            RawToken::Is => TokenKind::Is,
            RawToken::New => TokenKind::New,
            RawToken::Null => TokenKind::Null,
            RawToken::Return => TokenKind::Return,
            RawToken::Static => TokenKind::Static,
            RawToken::Switch => TokenKind::Switch,
            RawToken::This => TokenKind::This,
            RawToken::Throw => TokenKind::Throw,
            RawToken::True => TokenKind::True,
            RawToken::Try => TokenKind::Try,
            RawToken::Var => TokenKind::Var,
            RawToken::Void => TokenKind::Void,
            RawToken::While => TokenKind::While,
            RawToken::With => TokenKind::With,
            RawToken::Ident => TokenKind::Ident,
            RawToken::Int => TokenKind::Int,
            RawToken::Double => TokenKind::Double,
            RawToken::String => TokenKind::String,
            RawToken::UnterminatedString => TokenKind::Error,
            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::LBracket => TokenKind::LBracket,
            RawToken::RBracket => TokenKind::RBracket,
            RawToken::LBrace => TokenKind::LBrace,
            RawToken::RBrace => TokenKind::RBrace,
            RawToken::Semicolon => TokenKind::Semicolon,
            RawToken::Colon => TokenKind::Colon,
            RawToken::Comma => TokenKind::Comma,
            RawToken::Dot => TokenKind::Dot,
            RawToken::DotDot => TokenKind::DotDot,
            RawToken::Question => TokenKind::Question,
            RawToken::At => TokenKind::At,
            RawToken::Arrow => TokenKind::Arrow,
            RawToken::Eq => TokenKind::Eq,
            RawToken::EqEq => TokenKind::EqEq,
            RawToken::Bang => TokenKind::Bang,
            RawToken::BangEq => TokenKind::BangEq,
            RawToken::Lt => TokenKind::Lt,
            RawToken::LtEq => TokenKind::LtEq,
            RawToken::LtLt => TokenKind::LtLt,
            RawToken::Gt => TokenKind::Gt,
            RawToken::GtEq => TokenKind::GtEq,
            RawToken::GtGt => TokenKind::GtGt,
            RawToken::GtGtEq => TokenKind::GtGtEq,
            RawToken::Plus => TokenKind::Plus,
            RawToken::PlusEq => TokenKind::PlusEq,
            RawToken::PlusPlus => TokenKind::PlusPlus,
            RawToken::Minus => TokenKind::Minus,
            RawToken::MinusEq => TokenKind::MinusEq,
            RawToken::MinusMinus => TokenKind::MinusMinus,
            RawToken::Star => TokenKind::Star,
            RawToken::StarEq => TokenKind::StarEq,
            RawToken::Slash => TokenKind::Slash,
            RawToken::SlashEq => TokenKind::SlashEq,
            RawToken::Percent => TokenKind::Percent,
            RawToken::PercentEq => TokenKind::PercentEq,
            RawToken::TildeSlash => TokenKind::TildeSlash,
            RawToken::Tilde => TokenKind::Tilde,
            RawToken::Amp => TokenKind::Amp,
            RawToken::AmpAmp => TokenKind::AmpAmp,
            RawToken::Pipe => TokenKind::Pipe,
            RawToken::PipePipe => TokenKind::PipePipe,
            RawToken::Caret => TokenKind::Caret,
        };
        Some(kind)
    }
}
