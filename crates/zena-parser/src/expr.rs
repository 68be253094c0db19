//! Expression parsing: precedence-climbing binary/unary operators, postfix
//! chains (`call`/`new`/member/index), record/tuple literals, template
//! literals with re-entrant substitution lexing, and `match`.

use smallvec::smallvec;
use zena_ast::{AssignOp, BinaryOp, NodeId, NodeKind, RecordKey, TemplateQuasi, UnaryOp};
use zena_common::Span;
use zena_scanner::{SyntaxKind, TokenValue};

use crate::parser::Parser;

/// Entry point: `expr := assignment_expr`.
pub(crate) fn parse_expr(p: &mut Parser<'_, '_>) -> NodeId {
    parse_assignment_expr(p)
}

/// Assignment is the lowest-precedence operator and right-associative:
/// `target '=' assignment_expr | binary_expr`.
pub(crate) fn parse_assignment_expr(p: &mut Parser<'_, '_>) -> NodeId {
    let start = p.span().start;
    let left = parse_binary_expr(p, 0);
    let op = match p.kind() {
        SyntaxKind::Eq => AssignOp::Assign,
        SyntaxKind::PlusEq => AssignOp::AddAssign,
        SyntaxKind::MinusEq => AssignOp::SubAssign,
        SyntaxKind::StarEq => AssignOp::MulAssign,
        SyntaxKind::SlashEq => AssignOp::DivAssign,
        _ => return left,
    };
    p.bump();
    let value = parse_assignment_expr(p);
    let span = Span::new(start, p.span().start);
    p.alloc(NodeKind::Assign { op, target: left, value }, span)
}

fn binary_op(kind: SyntaxKind) -> Option<(BinaryOp, u8)> {
    use SyntaxKind::*;
    Some(match kind {
        PipePipe => (BinaryOp::Or, 1),
        AmpAmp => (BinaryOp::And, 2),
        Pipe => (BinaryOp::BitOr, 3),
        Caret => (BinaryOp::BitXor, 4),
        Amp => (BinaryOp::BitAnd, 5),
        EqEq => (BinaryOp::Eq, 6),
        NotEq => (BinaryOp::NotEq, 6),
        Lt => (BinaryOp::Lt, 7),
        Gt => (BinaryOp::Gt, 7),
        LtEq => (BinaryOp::LtEq, 7),
        GtEq => (BinaryOp::GtEq, 7),
        Shl => (BinaryOp::Shl, 8),
        Shr => (BinaryOp::Shr, 8),
        Ushr => (BinaryOp::Ushr, 8),
        Plus => (BinaryOp::Add, 9),
        Minus => (BinaryOp::Sub, 9),
        Star => (BinaryOp::Mul, 10),
        Slash => (BinaryOp::Div, 10),
        Percent => (BinaryOp::Mod, 10),
        _ => return None,
    })
}

/// Precedence-climbing binary-operator parser, with `as`/`is` folded in as
/// single postfix-level pseudo-operators above all binary operators (spec
/// treats a cast/type-check as binding tighter than any binary operator but
/// looser than unary/postfix).
fn parse_binary_expr(p: &mut Parser<'_, '_>, min_prec: u8) -> NodeId {
    let start = p.span().start;
    let mut left = parse_cast_or_is(p);
    loop {
        let Some((op, prec)) = binary_op(p.kind()) else { break };
        if prec < min_prec {
            break;
        }
        p.bump();
        let right = parse_binary_expr(p, prec + 1);
        let span = Span::new(start, p.span().start);
        left = p.alloc(NodeKind::Binary { op, left, right }, span);
    }
    left
}

/// `unary_expr (('as' | 'is') type_ann)*`
fn parse_cast_or_is(p: &mut Parser<'_, '_>) -> NodeId {
    let start = p.span().start;
    let mut expr = parse_unary_expr(p);
    loop {
        if p.eat(SyntaxKind::AsKw) {
            let type_ann = crate::type_ann::parse_type_ann(p);
            let span = Span::new(start, p.span().start);
            expr = p.alloc(NodeKind::Cast { expr, type_ann }, span);
        } else if p.eat(SyntaxKind::IsKw) {
            let type_ann = crate::type_ann::parse_type_ann(p);
            let span = Span::new(start, p.span().start);
            expr = p.alloc(NodeKind::IsCheck { expr, type_ann }, span);
        } else {
            break;
        }
    }
    expr
}

/// `('-' | '!' | '~') unary_expr | postfix_expr`
fn parse_unary_expr(p: &mut Parser<'_, '_>) -> NodeId {
    let start = p.span().start;
    let op = match p.kind() {
        SyntaxKind::Minus => Some(UnaryOp::Neg),
        SyntaxKind::Bang => Some(UnaryOp::Not),
        SyntaxKind::Tilde => Some(UnaryOp::BitNot),
        _ => None,
    };
    if let Some(op) = op {
        p.bump();
        let operand = parse_unary_expr(p);
        let span = Span::new(start, p.span().start);
        return p.alloc(NodeKind::Unary { op, operand }, span);
    }
    parse_postfix_expr(p)
}

/// `primary_expr (call_suffix | member_suffix | index_suffix)*`
fn parse_postfix_expr(p: &mut Parser<'_, '_>) -> NodeId {
    if !p.enter_expr() {
        let span = p.span();
        return p.alloc(NodeKind::HoleExpr, span);
    }
    let start = p.span().start;
    let mut expr = parse_primary_expr(p);
    loop {
        match p.kind() {
            SyntaxKind::Dot => {
                p.bump();
                let name = p.expect_identifier_name();
                let span = Span::new(start, p.span().start);
                expr = p.alloc(
                    NodeKind::Member { object: expr, name, is_optional: false, is_private: false },
                    span,
                );
            }
            SyntaxKind::QuestionDot => {
                p.bump();
                let is_private = p.eat(SyntaxKind::Hash);
                let name = p.expect_identifier_name();
                let span = Span::new(start, p.span().start);
                expr = p.alloc(
                    NodeKind::Member { object: expr, name, is_optional: true, is_private },
                    span,
                );
            }
            SyntaxKind::OpenBracket => {
                p.bump();
                let index = parse_expr(p);
                p.expect(SyntaxKind::CloseBracket);
                let span = Span::new(start, p.span().start);
                expr = p.alloc(NodeKind::Index { object: expr, index, is_optional: false }, span);
            }
            SyntaxKind::OpenParen => {
                let args = parse_call_args(p);
                let span = Span::new(start, p.span().start);
                expr = p.alloc(NodeKind::Call { callee: expr, type_args: smallvec![], args }, span);
            }
            SyntaxKind::NoSubstitutionTemplate | SyntaxKind::TemplateHead => {
                let template = parse_template_literal(p);
                let span = Span::new(start, p.span().start);
                expr = p.alloc(NodeKind::TaggedTemplate { tag: expr, template }, span);
            }
            _ => break,
        }
    }
    p.exit_expr();
    expr
}

fn parse_call_args(p: &mut Parser<'_, '_>) -> zena_ast::NodeList {
    p.bump(); // '('
    let mut args = smallvec![];
    while !p.at(SyntaxKind::CloseParen) && !p.at_eof() {
        args.push(parse_assignment_expr(p));
        if !p.eat(SyntaxKind::Comma) {
            break;
        }
    }
    p.expect(SyntaxKind::CloseParen);
    args
}

fn parse_primary_expr(p: &mut Parser<'_, '_>) -> NodeId {
    let start = p.span().start;
    match p.kind() {
        SyntaxKind::NumericLiteral | SyntaxKind::StringLiteral | SyntaxKind::TrueKw | SyntaxKind::FalseKw | SyntaxKind::NullKw => {
            parse_literal_expr(p)
        }
        SyntaxKind::Hole => {
            p.bump();
            p.alloc(NodeKind::HoleExpr, Span::new(start, p.span().start))
        }
        SyntaxKind::ThisKw => {
            p.bump();
            p.alloc(NodeKind::ThisExpr, Span::new(start, p.span().start))
        }
        SyntaxKind::SuperKw => {
            p.bump();
            p.alloc(NodeKind::SuperExpr, Span::new(start, p.span().start))
        }
        SyntaxKind::Identifier => {
            let name = p.intern_current();
            p.bump();
            p.alloc(NodeKind::Identifier(name), Span::new(start, p.span().start))
        }
        SyntaxKind::NewKw => parse_new_expr(p),
        SyntaxKind::OpenBrace => parse_record_lit(p),
        SyntaxKind::Hash => parse_unboxed_tuple_lit(p),
        SyntaxKind::OpenParen => parse_paren_or_tuple_or_arrow(p),
        SyntaxKind::MatchKw => parse_match_expr(p),
        SyntaxKind::NoSubstitutionTemplate | SyntaxKind::TemplateHead => parse_template_literal(p),
        SyntaxKind::FunctionKw => parse_function_expr(p),
        _ => {
            p.error_unexpected();
            p.bump();
            p.alloc(NodeKind::HoleExpr, Span::new(start, p.span().start))
        }
    }
}

pub(crate) fn parse_literal_expr(p: &mut Parser<'_, '_>) -> NodeId {
    let start = p.span().start;
    match p.kind() {
        SyntaxKind::NumericLiteral => {
            let value = match &p.current.value {
                TokenValue::Number(n) => *n,
                _ => 0.0,
            };
            p.bump();
            p.alloc(NodeKind::NumberLit(value), Span::new(start, p.span().start))
        }
        SyntaxKind::StringLiteral => {
            let cooked = match &p.current.value {
                TokenValue::String(s) => s.clone(),
                _ => String::new(),
            };
            let atom = p.intern(&cooked);
            p.bump();
            p.alloc(NodeKind::StringLit(atom), Span::new(start, p.span().start))
        }
        SyntaxKind::TrueKw => {
            p.bump();
            p.alloc(NodeKind::BoolLit(true), Span::new(start, p.span().start))
        }
        SyntaxKind::FalseKw => {
            p.bump();
            p.alloc(NodeKind::BoolLit(false), Span::new(start, p.span().start))
        }
        SyntaxKind::NullKw => {
            p.bump();
            p.alloc(NodeKind::NullLit, Span::new(start, p.span().start))
        }
        _ => {
            p.error_unexpected();
            p.bump();
            p.alloc(NodeKind::NullLit, Span::new(start, p.span().start))
        }
    }
}

/// `new Callee<TypeArgs>(args)`
fn parse_new_expr(p: &mut Parser<'_, '_>) -> NodeId {
    let start = p.span().start;
    p.bump(); // 'new'
    let callee_name = p.expect_identifier_name();
    let callee = p.alloc(NodeKind::Identifier(callee_name), p.span());
    let mut type_args = smallvec![];
    if p.eat(SyntaxKind::Lt) {
        loop {
            type_args.push(crate::type_ann::parse_type_ann(p));
            if !p.eat(SyntaxKind::Comma) {
                break;
            }
        }
        p.expect(SyntaxKind::Gt);
    }
    let args = if p.at(SyntaxKind::OpenParen) {
        parse_call_args(p)
    } else {
        smallvec![]
    };
    p.alloc(NodeKind::New { callee, type_args, args }, Span::new(start, p.span().start))
}

/// Record literal: `{ key: value, ...spread, shorthand }`. A key may be a
/// plain identifier or a computed `[expr]` key; a field with no `: value`
/// is shorthand for `{ key: key }`.
fn parse_record_lit(p: &mut Parser<'_, '_>) -> NodeId {
    let start = p.span().start;
    p.bump(); // '{'
    let mut fields = smallvec![];
    while !p.at(SyntaxKind::CloseBrace) && !p.at_eof() {
        let field_start = p.span().start;
        if p.eat(SyntaxKind::DotDotDot) {
            let value = parse_assignment_expr(p);
            let key = RecordKey::Named(p.intern("..."));
            let span = Span::new(field_start, p.span().start);
            fields.push(p.alloc(NodeKind::RecordField { key, value: Some(value), is_spread: true }, span));
        } else if p.eat(SyntaxKind::OpenBracket) {
            let key_expr = parse_assignment_expr(p);
            p.expect(SyntaxKind::CloseBracket);
            p.expect(SyntaxKind::Colon);
            let value = parse_assignment_expr(p);
            let key = RecordKey::Computed(key_expr);
            let span = Span::new(field_start, p.span().start);
            fields.push(p.alloc(NodeKind::RecordField { key, value: Some(value), is_spread: false }, span));
        } else {
            let name = p.expect_identifier_name();
            let key = RecordKey::Named(name);
            let value = if p.eat(SyntaxKind::Colon) {
                Some(parse_assignment_expr(p))
            } else {
                None
            };
            let span = Span::new(field_start, p.span().start);
            fields.push(p.alloc(NodeKind::RecordField { key, value, is_spread: false }, span));
        }
        if !p.eat(SyntaxKind::Comma) {
            break;
        }
    }
    p.expect(SyntaxKind::CloseBrace);
    p.alloc(NodeKind::RecordLit { fields }, Span::new(start, p.span().start))
}

/// `#(expr, expr, ...)` — unboxed tuple literal.
fn parse_unboxed_tuple_lit(p: &mut Parser<'_, '_>) -> NodeId {
    let start = p.span().start;
    p.bump(); // '#'
    p.expect(SyntaxKind::OpenParen);
    let mut elements = smallvec![];
    while !p.at(SyntaxKind::CloseParen) && !p.at_eof() {
        elements.push(parse_assignment_expr(p));
        if !p.eat(SyntaxKind::Comma) {
            break;
        }
    }
    p.expect(SyntaxKind::CloseParen);
    p.alloc(NodeKind::UnboxedTupleLit { elements }, Span::new(start, p.span().start))
}

/// Disambiguates, inside `( ... )`:
///   - `()` or `() -> ...` or `(a, b) =>` — arrow function
///   - `(expr)` — a parenthesized (grouping) expression
///   - `(expr,)` or `(expr, expr)` — a boxed tuple literal
///
/// Implemented by a speculative parse over a cloned lexer position: since
/// arrow-function params and tuple elements look identical up to the
/// closing `)`, we scan ahead for `=>` immediately following the matching
/// `)` before committing to a parse strategy. Grouping a single element
/// with no trailing comma always wins over a one-element tuple, matching
/// the "no bare 1-tuples" rule.
fn parse_paren_or_tuple_or_arrow(p: &mut Parser<'_, '_>) -> NodeId {
    let start = p.span().start;
    if looks_like_arrow_function(p) {
        return parse_arrow_function(p);
    }
    p.bump(); // '('
    let mut elements = smallvec![];
    let mut trailing_comma = false;
    while !p.at(SyntaxKind::CloseParen) && !p.at_eof() {
        elements.push(parse_assignment_expr(p));
        if p.eat(SyntaxKind::Comma) {
            trailing_comma = true;
        } else {
            trailing_comma = false;
            break;
        }
    }
    p.expect(SyntaxKind::CloseParen);
    if elements.len() == 1 && !trailing_comma {
        elements.into_iter().next().unwrap()
    } else {
        p.alloc(NodeKind::TupleLit { elements }, Span::new(start, p.span().start))
    }
}

/// Scans forward from `(` to its matching `)` using a throwaway lexer
/// clone, then checks whether `->`/`=>` follows. Never mutates the real
/// parser cursor.
fn looks_like_arrow_function(p: &Parser<'_, '_>) -> bool {
    let mut lookahead = p.fork_lexer();
    let mut depth = 0i32;
    loop {
        let tok = lookahead.next_token();
        match tok.kind {
            SyntaxKind::Eof => return false,
            SyntaxKind::OpenParen => depth += 1,
            SyntaxKind::CloseParen => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            _ => {}
        }
    }
    lookahead.next_token().kind == SyntaxKind::Arrow
}

fn parse_arrow_function(p: &mut Parser<'_, '_>) -> NodeId {
    let start = p.span().start;
    p.expect(SyntaxKind::OpenParen);
    let mut params = smallvec![];
    while !p.at(SyntaxKind::CloseParen) && !p.at_eof() {
        params.push(parse_param(p));
        if !p.eat(SyntaxKind::Comma) {
            break;
        }
    }
    p.expect(SyntaxKind::CloseParen);
    let return_type = if p.eat(SyntaxKind::Colon) {
        Some(crate::type_ann::parse_type_ann(p))
    } else {
        None
    };
    p.expect(SyntaxKind::Arrow);
    let is_body_block = p.at(SyntaxKind::OpenBrace);
    let body = if is_body_block {
        crate::stmt::parse_block(p)
    } else {
        parse_assignment_expr(p)
    };
    p.alloc(
        NodeKind::FunctionExpr { type_params: smallvec![], params, return_type, body, is_body_block },
        Span::new(start, p.span().start),
    )
}

pub(crate) fn parse_param(p: &mut Parser<'_, '_>) -> NodeId {
    let start = p.span().start;
    let is_rest = p.eat(SyntaxKind::DotDotDot);
    let pattern = crate::pattern::parse_pattern(p);
    let type_ann = if p.eat(SyntaxKind::Colon) {
        Some(crate::type_ann::parse_type_ann(p))
    } else {
        None
    };
    let default = if p.eat(SyntaxKind::Eq) {
        Some(parse_assignment_expr(p))
    } else {
        None
    };
    p.alloc(
        NodeKind::Param { pattern, type_ann, default, is_rest },
        Span::new(start, p.span().start),
    )
}

fn parse_function_expr(p: &mut Parser<'_, '_>) -> NodeId {
    let start = p.span().start;
    p.bump(); // 'function'
    p.expect(SyntaxKind::OpenParen);
    let mut params = smallvec![];
    while !p.at(SyntaxKind::CloseParen) && !p.at_eof() {
        params.push(parse_param(p));
        if !p.eat(SyntaxKind::Comma) {
            break;
        }
    }
    p.expect(SyntaxKind::CloseParen);
    let return_type = if p.eat(SyntaxKind::Colon) {
        Some(crate::type_ann::parse_type_ann(p))
    } else {
        None
    };
    let body = crate::stmt::parse_block(p);
    p.alloc(
        NodeKind::FunctionExpr { type_params: smallvec![], params, return_type, body, is_body_block: true },
        Span::new(start, p.span().start),
    )
}

/// `match scrutinee { pattern (if guard)? -> body, ... }`
fn parse_match_expr(p: &mut Parser<'_, '_>) -> NodeId {
    let start = p.span().start;
    p.bump(); // 'match'
    let scrutinee = parse_expr(p);
    p.expect(SyntaxKind::OpenBrace);
    let mut arms = smallvec![];
    while !p.at(SyntaxKind::CloseBrace) && !p.at_eof() {
        let arm_start = p.span().start;
        let pattern = crate::pattern::parse_pattern(p);
        let guard = if p.eat(SyntaxKind::IfKw) { Some(parse_expr(p)) } else { None };
        p.expect(SyntaxKind::Arrow);
        let body = parse_assignment_expr(p);
        let span = Span::new(arm_start, p.span().start);
        arms.push(p.alloc(NodeKind::MatchArm { pattern, guard, body }, span));
        if !p.eat(SyntaxKind::Comma) {
            break;
        }
    }
    p.expect(SyntaxKind::CloseBrace);
    p.alloc(NodeKind::Match { scrutinee, arms }, Span::new(start, p.span().start))
}

/// Template literal, with substitution expressions parsed between the
/// lexer's head/middle/tail parts. After each substitution expression we
/// re-enter the lexer at the closing `}` via `rescan_template_part`, which
/// resumes lexing the template body rather than tokenizing `}` as
/// ordinary punctuation — this is the parser-driven brace-balance
/// re-entrance the lexer exposes precisely for this purpose.
fn parse_template_literal(p: &mut Parser<'_, '_>) -> NodeId {
    let start = p.span().start;
    let mut quasis = Vec::new();
    let mut substitutions = smallvec![];

    let (cooked, raw) = match &p.current.value {
        TokenValue::Template { cooked, raw } => (cooked.clone(), raw.clone()),
        _ => (String::new(), String::new()),
    };
    let is_whole = p.at(SyntaxKind::NoSubstitutionTemplate);
    quasis.push(TemplateQuasi { cooked, raw });
    p.bump();

    if is_whole {
        return p.alloc(NodeKind::TemplateLiteral { quasis, substitutions }, Span::new(start, p.span().start));
    }

    loop {
        substitutions.push(parse_expr(p));
        // `current` should be sitting on '}'; hand the lexer back to the
        // scanner's re-entrant template rescan starting at that position.
        let brace_pos = p.span().start;
        let (cooked, raw, is_tail) = p.rescan_template_continuation(brace_pos);
        quasis.push(TemplateQuasi { cooked, raw });
        if is_tail {
            break;
        }
    }

    p.alloc(NodeKind::TemplateLiteral { quasis, substitutions }, Span::new(start, p.span().start))
}
