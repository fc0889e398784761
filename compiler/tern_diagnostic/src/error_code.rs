//! Error codes for all front-end diagnostics.

use std::fmt;

/// Error codes for all front-end diagnostics.
///
/// Format: E#### where the first digit is the phase:
/// - E0xxx: Lexer errors
/// - E1xxx: Parser errors
/// - E9xxx: Internal errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer Errors (E0xxx)
    /// Unterminated string literal
    E0001,
    /// Invalid character in source
    E0002,

    // Parser Errors (E1xxx)
    /// Unexpected token
    E1001,
    /// Expected a specific token
    E1002,
    /// Expected expression
    E1003,
    /// Expected identifier
    E1004,
    /// Expected type name
    E1005,
    /// Expected statement
    E1006,
    /// Missing function body
    E1007,
    /// Expected class member
    E1008,
    /// `try` without `catch` or `finally`
    E1009,
    /// `break` outside of a loop or switch
    E1010,
    /// `continue` outside of a loop
    E1011,
    /// Expected top-level declaration
    E1012,
    /// Expected `case` or `default`
    E1013,
    /// Assignment to a non-assignable expression
    E1014,

    // Internal Errors (E9xxx)
    /// Internal front-end error
    E9001,
}

impl ErrorCode {
    /// All codes, in declaration order.
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        ErrorCode::E1005,
        ErrorCode::E1006,
        ErrorCode::E1007,
        ErrorCode::E1008,
        ErrorCode::E1009,
        ErrorCode::E1010,
        ErrorCode::E1011,
        ErrorCode::E1012,
        ErrorCode::E1013,
        ErrorCode::E1014,
        ErrorCode::E9001,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E1007 => "E1007",
            ErrorCode::E1008 => "E1008",
            ErrorCode::E1009 => "E1009",
            ErrorCode::E1010 => "E1010",
            ErrorCode::E1011 => "E1011",
            ErrorCode::E1012 => "E1012",
            ErrorCode::E1013 => "E1013",
            ErrorCode::E1014 => "E1014",
            ErrorCode::E9001 => "E9001",
        }
    }

    /// Message template; `{0}`, `{1}`, ... are replaced by diagnostic arguments.
    pub fn template(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "unterminated string literal",
            ErrorCode::E0002 => "invalid character '{0}'",
            ErrorCode::E1001 => "unexpected token '{0}'",
            ErrorCode::E1002 => "expected '{0}', found '{1}'",
            ErrorCode::E1003 => "expected an expression",
            ErrorCode::E1004 => "expected an identifier",
            ErrorCode::E1005 => "expected a type name",
            ErrorCode::E1006 => "expected a statement",
            ErrorCode::E1007 => "expected a function body",
            ErrorCode::E1008 => "expected a class member",
            ErrorCode::E1009 => "a try statement must have a catch or finally clause",
            ErrorCode::E1010 => "a break statement must be inside a loop or switch",
            ErrorCode::E1011 => "a continue statement must be inside a loop",
            ErrorCode::E1012 => "expected a directive or declaration",
            ErrorCode::E1013 => "expected 'case' or 'default'",
            ErrorCode::E1014 => "cannot assign to this expression",
            ErrorCode::E9001 => "internal error: {0}",
        }
    }

    #[inline]
    pub fn is_lexer_error(&self) -> bool {
        self.as_str().starts_with("E0")
    }

    #[inline]
    pub fn is_parser_error(&self) -> bool {
        self.as_str().starts_with("E1")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
