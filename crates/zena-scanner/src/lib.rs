//! Lexer for the zena language: source text → token stream.
//!
//! Pure function of the source string: the lexer never
//! raises a diagnostic, it only ever produces tokens (including an
//! `Unknown` token for unrecognized input).

pub mod lexer;
pub mod syntax_kind;
pub mod token;

pub use lexer::{Lexer, tokenize};
pub use syntax_kind::SyntaxKind;
pub use token::{Token, TokenValue};
