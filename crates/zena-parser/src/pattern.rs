//! Pattern parsing, shared by `let`/`var` bindings, function parameters,
//! and `match` arms.

use smallvec::smallvec;
use zena_ast::{NodeId, NodeKind};
use zena_common::Span;
use zena_scanner::SyntaxKind;

use crate::parser::Parser;

/// `pattern := wildcard | record_pattern | tuple_pattern | unboxed_tuple_pattern
///           | class_pattern | literal_pattern | ident_pattern`
/// `as_pattern := pattern 'as' identifier`
pub(crate) fn parse_pattern(p: &mut Parser<'_, '_>) -> NodeId {
    let start = p.span().start;
    let base = parse_pattern_primary(p);
    if p.eat(SyntaxKind::AsKw) {
        let name = p.expect_identifier_name();
        let span = Span::new(start, p.span().start);
        return p.alloc(NodeKind::AsPattern { pattern: base, name }, span);
    }
    base
}

fn parse_pattern_primary(p: &mut Parser<'_, '_>) -> NodeId {
    let start = p.span().start;
    match p.kind() {
        SyntaxKind::Hole => {
            p.bump();
            p.alloc(NodeKind::WildcardPattern, Span::new(start, p.span().start))
        }
        SyntaxKind::OpenBrace => parse_record_pattern(p),
        SyntaxKind::Hash => parse_unboxed_tuple_pattern(p),
        SyntaxKind::OpenParen => parse_tuple_pattern(p),
        SyntaxKind::NumericLiteral | SyntaxKind::StringLiteral | SyntaxKind::TrueKw | SyntaxKind::FalseKw | SyntaxKind::NullKw => {
            let lit = crate::expr::parse_literal_expr(p);
            p.alloc(NodeKind::LiteralPattern(lit), Span::new(start, p.span().start))
        }
        SyntaxKind::Identifier => {
            // Disambiguate `ClassName(field: pattern, ...)` from a plain
            // identifier binding: `Identifier '('` is a class pattern,
            // a bare `Identifier` is a binding.
            if p.peek_next_kind() == SyntaxKind::OpenParen {
                parse_class_pattern(p)
            } else {
                let name = p.intern_current();
                p.bump();
                p.alloc(NodeKind::IdentPattern(name), Span::new(start, p.span().start))
            }
        }
        _ => {
            p.error_unexpected();
            p.bump();
            p.alloc(NodeKind::WildcardPattern, Span::new(start, p.span().start))
        }
    }
}

/// `{ key: pattern = default, key, ...}`
fn parse_record_pattern(p: &mut Parser<'_, '_>) -> NodeId {
    let start = p.span().start;
    p.expect(SyntaxKind::OpenBrace);
    let mut fields = smallvec![];
    let mut has_rest = false;
    while !p.at(SyntaxKind::CloseBrace) && !p.at_eof() {
        if p.eat(SyntaxKind::DotDotDot) {
            has_rest = true;
            p.expect_identifier_name();
            break;
        }
        let field_start = p.span().start;
        let key = p.expect_identifier_name();
        let pattern = if p.eat(SyntaxKind::Colon) {
            Some(parse_pattern(p))
        } else {
            None
        };
        let default = if p.eat(SyntaxKind::Eq) {
            Some(crate::expr::parse_assignment_expr(p))
        } else {
            None
        };
        let span = Span::new(field_start, p.span().start);
        fields.push(p.alloc(NodeKind::RecordPatternField { key, pattern, default }, span));
        if !p.eat(SyntaxKind::Comma) {
            break;
        }
    }
    p.expect(SyntaxKind::CloseBrace);
    p.alloc(NodeKind::RecordPattern { fields, has_rest }, Span::new(start, p.span().start))
}

/// `(pattern, pattern, ...)` — boxed tuple pattern.
fn parse_tuple_pattern(p: &mut Parser<'_, '_>) -> NodeId {
    let start = p.span().start;
    p.bump(); // '('
    let mut elements = smallvec![];
    while !p.at(SyntaxKind::CloseParen) && !p.at_eof() {
        elements.push(parse_pattern(p));
        if !p.eat(SyntaxKind::Comma) {
            break;
        }
    }
    p.expect(SyntaxKind::CloseParen);
    p.alloc(NodeKind::TuplePattern { elements }, Span::new(start, p.span().start))
}

/// `#(pattern, pattern, ...)` — unboxed tuple pattern.
fn parse_unboxed_tuple_pattern(p: &mut Parser<'_, '_>) -> NodeId {
    let start = p.span().start;
    p.bump(); // '#'
    p.expect(SyntaxKind::OpenParen);
    let mut elements = smallvec![];
    while !p.at(SyntaxKind::CloseParen) && !p.at_eof() {
        elements.push(parse_pattern(p));
        if !p.eat(SyntaxKind::Comma) {
            break;
        }
    }
    p.expect(SyntaxKind::CloseParen);
    p.alloc(NodeKind::UnboxedTuplePattern { elements }, Span::new(start, p.span().start))
}

/// `ClassName(field: local, field, ...)`
fn parse_class_pattern(p: &mut Parser<'_, '_>) -> NodeId {
    let start = p.span().start;
    let class_name = p.expect_identifier_name();
    p.expect(SyntaxKind::OpenParen);
    let mut fields = smallvec![];
    while !p.at(SyntaxKind::CloseParen) && !p.at_eof() {
        let field_start = p.span().start;
        let field = p.expect_identifier_name();
        let local = if p.eat(SyntaxKind::Colon) {
            p.expect_identifier_name()
        } else {
            field
        };
        let span = Span::new(field_start, p.span().start);
        fields.push(p.alloc(NodeKind::ClassPatternField { field, local }, span));
        if !p.eat(SyntaxKind::Comma) {
            break;
        }
    }
    p.expect(SyntaxKind::CloseParen);
    p.alloc(NodeKind::ClassPattern { class_name, fields }, Span::new(start, p.span().start))
}
