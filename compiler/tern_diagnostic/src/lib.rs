//! Diagnostics for the Tern front end.
//!
//! The lexer and parser never fail: they report problems through an
//! [`ErrorListener`] and keep going. A diagnostic is an [`ErrorCode`], a span,
//! and the arguments for the code's message template.

mod diagnostic;
mod error_code;
mod listener;


pub use diagnostic::{Diagnostic, Severity};
pub use error_code::ErrorCode;
pub use listener::{CollectingListener, ErrorListener, NullListener};
