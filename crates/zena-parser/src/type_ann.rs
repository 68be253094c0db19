//! Type annotation parsing: named types, primitives, unions, record/tuple
//! types, function types, `this`.

use smallvec::smallvec;
use zena_ast::{NodeId, NodeKind, PrimitiveKind};
use zena_common::Span;
use zena_scanner::SyntaxKind;

use crate::parser::Parser;

/// `type_ann := union_type`
/// `union_type := postfix_type ('|' postfix_type)*`
pub(crate) fn parse_type_ann(p: &mut Parser<'_, '_>) -> NodeId {
    let start = p.span().start;
    let first = parse_postfix_type(p);
    if !p.at(SyntaxKind::Pipe) {
        return first;
    }
    let mut members = smallvec![first];
    while p.eat(SyntaxKind::Pipe) {
        members.push(parse_postfix_type(p));
    }
    let span = Span::new(start, p.span().start);
    p.alloc(NodeKind::UnionType { members }, span)
}

/// `postfix_type := primary_type ('[' ']')*` — trailing `[]` means array.
fn parse_postfix_type(p: &mut Parser<'_, '_>) -> NodeId {
    let start = p.span().start;
    let mut ty = parse_primary_type(p);
    while p.at(SyntaxKind::OpenBracket) {
        p.bump();
        p.expect(SyntaxKind::CloseBracket);
        let span = Span::new(start, p.span().start);
        ty = p.alloc(NodeKind::ArrayType { element: ty }, span);
    }
    ty
}

fn parse_primary_type(p: &mut Parser<'_, '_>) -> NodeId {
    let start = p.span().start;
    match p.kind() {
        SyntaxKind::ThisKw => {
            p.bump();
            p.alloc(NodeKind::ThisType, Span::new(start, p.span().start))
        }
        SyntaxKind::OpenBrace => parse_record_type(p),
        SyntaxKind::OpenParen => parse_tuple_or_function_type(p),
        SyntaxKind::Hash => parse_unboxed_tuple_type(p),
        SyntaxKind::Identifier => {
            let text = p.current_text();
            if let Some(prim) = PrimitiveKind::from_name(text) {
                p.bump();
                return p.alloc(NodeKind::PrimitiveType(prim), Span::new(start, p.span().start));
            }
            let name = p.intern_current();
            p.bump();
            let mut type_args = smallvec![];
            if p.eat(SyntaxKind::Lt) {
                loop {
                    type_args.push(parse_type_ann(p));
                    if !p.eat(SyntaxKind::Comma) {
                        break;
                    }
                }
                p.expect(SyntaxKind::Gt);
            }
            p.alloc(NodeKind::NamedType { name, type_args }, Span::new(start, p.span().start))
        }
        _ => {
            p.error_unexpected();
            let name = p.intern("<error>");
            p.bump();
            p.alloc(NodeKind::NamedType { name, type_args: smallvec![] }, Span::new(start, p.span().start))
        }
    }
}

/// `{ name: type, name?: type, ... }`
fn parse_record_type(p: &mut Parser<'_, '_>) -> NodeId {
    let start = p.span().start;
    p.expect(SyntaxKind::OpenBrace);
    let mut fields = smallvec![];
    while !p.at(SyntaxKind::CloseBrace) && !p.at_eof() {
        let field_start = p.span().start;
        let name = p.expect_identifier_name();
        let optional = p.eat(SyntaxKind::Question);
        p.expect(SyntaxKind::Colon);
        let type_ann = parse_type_ann(p);
        let span = Span::new(field_start, p.span().start);
        fields.push(p.alloc(NodeKind::RecordTypeField { name, type_ann, optional }, span));
        if !p.eat(SyntaxKind::Comma) {
            break;
        }
    }
    p.expect(SyntaxKind::CloseBrace);
    p.alloc(NodeKind::RecordType { fields }, Span::new(start, p.span().start))
}

/// `#(type, type, ...)` — unboxed tuple type.
fn parse_unboxed_tuple_type(p: &mut Parser<'_, '_>) -> NodeId {
    let start = p.span().start;
    p.bump(); // '#'
    p.expect(SyntaxKind::OpenParen);
    let mut elements = smallvec![];
    while !p.at(SyntaxKind::CloseParen) && !p.at_eof() {
        elements.push(parse_type_ann(p));
        if !p.eat(SyntaxKind::Comma) {
            break;
        }
    }
    p.expect(SyntaxKind::CloseParen);
    p.alloc(NodeKind::UnboxedTupleType { elements }, Span::new(start, p.span().start))
}

/// `(type, type) -> type` is a function type; `(type, type)` alone (no
/// arrow following) is a boxed tuple type.
fn parse_tuple_or_function_type(p: &mut Parser<'_, '_>) -> NodeId {
    let start = p.span().start;
    p.bump(); // '('
    let mut elements = smallvec![];
    while !p.at(SyntaxKind::CloseParen) && !p.at_eof() {
        elements.push(parse_type_ann(p));
        if !p.eat(SyntaxKind::Comma) {
            break;
        }
    }
    p.expect(SyntaxKind::CloseParen);
    if p.eat(SyntaxKind::Arrow) {
        let return_type = parse_type_ann(p);
        let span = Span::new(start, p.span().start);
        p.alloc(
            NodeKind::FunctionType {
                type_params: smallvec![],
                params: elements,
                return_type,
            },
            span,
        )
    } else {
        p.alloc(NodeKind::TupleType { elements }, Span::new(start, p.span().start))
    }
}
