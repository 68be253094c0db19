//! `Token` — one lexical unit, with its span and (for literals/templates)
//! a cooked value alongside the raw source text.

use crate::syntax_kind::SyntaxKind;
use zena_common::Span;

/// The cooked payload of a literal or template-part token. Kept separate
/// from `Token` itself so most tokens (punctuation, keywords) don't pay
/// for an unused field.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    None,
    String(String),
    Number(f64),
    /// Template part: cooked text plus the raw (unescaped) source lexeme.
    Template { cooked: String, raw: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: Span,
    pub value: TokenValue,
}

impl Token {
    pub fn new(kind: SyntaxKind, span: Span) -> Self {
        Token { kind, span, value: TokenValue::None }
    }

    pub fn with_value(kind: SyntaxKind, span: Span, value: TokenValue) -> Self {
        Token { kind, span, value }
    }
}
