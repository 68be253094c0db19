//! Statement parsing.

use smallvec::smallvec;
use zena_ast::{NodeId, NodeKind};
use zena_common::Span;
use zena_scanner::SyntaxKind;

use crate::parser::Parser;

pub(crate) fn parse_stmt(p: &mut Parser<'_, '_>) -> NodeId {
    match p.kind() {
        SyntaxKind::OpenBrace => parse_block(p),
        SyntaxKind::IfKw => parse_if(p),
        SyntaxKind::WhileKw => parse_while(p),
        SyntaxKind::ForKw => parse_for(p),
        SyntaxKind::ReturnKw => parse_return(p),
        SyntaxKind::BreakKw => parse_break(p),
        SyntaxKind::ContinueKw => parse_continue(p),
        SyntaxKind::ThrowKw => parse_throw(p),
        SyntaxKind::TryKw => parse_try(p),
        SyntaxKind::LetKw | SyntaxKind::VarKw => crate::decl::parse_variable_decl(p, false),
        _ => parse_expr_stmt(p),
    }
}

pub(crate) fn parse_block(p: &mut Parser<'_, '_>) -> NodeId {
    let start = p.span().start;
    p.expect(SyntaxKind::OpenBrace);
    let mut statements = smallvec![];
    while !p.at(SyntaxKind::CloseBrace) && !p.at_eof() {
        let before = p.span().start;
        statements.push(parse_stmt(p));
        if p.span().start == before {
            // Parsing made no progress (malformed input); force it.
            p.recover_to_statement_boundary();
        }
    }
    p.expect(SyntaxKind::CloseBrace);
    p.alloc(NodeKind::Block { statements }, Span::new(start, p.span().start))
}

fn parse_if(p: &mut Parser<'_, '_>) -> NodeId {
    let start = p.span().start;
    p.bump(); // 'if'
    p.expect(SyntaxKind::OpenParen);
    let cond = crate::expr::parse_expr(p);
    p.expect(SyntaxKind::CloseParen);
    let then_branch = parse_stmt(p);
    let else_branch = if p.eat(SyntaxKind::ElseKw) { Some(parse_stmt(p)) } else { None };
    p.alloc(
        NodeKind::If { cond, then_branch, else_branch },
        Span::new(start, p.span().start),
    )
}

fn parse_while(p: &mut Parser<'_, '_>) -> NodeId {
    let start = p.span().start;
    p.bump(); // 'while'
    p.expect(SyntaxKind::OpenParen);
    let cond = crate::expr::parse_expr(p);
    p.expect(SyntaxKind::CloseParen);
    let body = parse_stmt(p);
    p.alloc(NodeKind::While { cond, body }, Span::new(start, p.span().start))
}

/// `for (init?; cond?; update?) body`
fn parse_for(p: &mut Parser<'_, '_>) -> NodeId {
    let start = p.span().start;
    p.bump(); // 'for'
    p.expect(SyntaxKind::OpenParen);
    let init = if p.at(SyntaxKind::Semicolon) {
        None
    } else if p.at(SyntaxKind::LetKw) || p.at(SyntaxKind::VarKw) {
        Some(crate::decl::parse_variable_decl(p, true))
    } else {
        let e = crate::expr::parse_expr(p);
        let span = p.span();
        p.expect(SyntaxKind::Semicolon);
        Some(p.alloc(NodeKind::ExprStmt { expr: e }, span))
    };
    if init.is_none() {
        p.expect(SyntaxKind::Semicolon);
    }
    let cond = if p.at(SyntaxKind::Semicolon) { None } else { Some(crate::expr::parse_expr(p)) };
    p.expect(SyntaxKind::Semicolon);
    let update = if p.at(SyntaxKind::CloseParen) { None } else { Some(crate::expr::parse_expr(p)) };
    p.expect(SyntaxKind::CloseParen);
    let body = parse_stmt(p);
    p.alloc(NodeKind::For { init, cond, update, body }, Span::new(start, p.span().start))
}

fn parse_return(p: &mut Parser<'_, '_>) -> NodeId {
    let start = p.span().start;
    p.bump(); // 'return'
    let value = if p.at(SyntaxKind::Semicolon) || p.at(SyntaxKind::CloseBrace) {
        None
    } else {
        Some(crate::expr::parse_expr(p))
    };
    p.eat(SyntaxKind::Semicolon);
    p.alloc(NodeKind::Return { value }, Span::new(start, p.span().start))
}

fn parse_break(p: &mut Parser<'_, '_>) -> NodeId {
    let start = p.span().start;
    p.bump();
    p.eat(SyntaxKind::Semicolon);
    p.alloc(NodeKind::Break, Span::new(start, p.span().start))
}

fn parse_continue(p: &mut Parser<'_, '_>) -> NodeId {
    let start = p.span().start;
    p.bump();
    p.eat(SyntaxKind::Semicolon);
    p.alloc(NodeKind::Continue, Span::new(start, p.span().start))
}

fn parse_throw(p: &mut Parser<'_, '_>) -> NodeId {
    let start = p.span().start;
    p.bump(); // 'throw'
    let value = crate::expr::parse_expr(p);
    p.eat(SyntaxKind::Semicolon);
    p.alloc(NodeKind::Throw { value }, Span::new(start, p.span().start))
}

/// `try block (catch (pattern)? block)? (finally block)?`
fn parse_try(p: &mut Parser<'_, '_>) -> NodeId {
    let start = p.span().start;
    p.bump(); // 'try'
    let block = parse_block(p);
    let mut catch_param = None;
    let mut catch_body = None;
    if p.eat(SyntaxKind::CatchKw) {
        if p.eat(SyntaxKind::OpenParen) {
            catch_param = Some(crate::pattern::parse_pattern(p));
            p.expect(SyntaxKind::CloseParen);
        }
        catch_body = Some(parse_block(p));
    }
    let finally_body = if p.eat(SyntaxKind::FinallyKw) { Some(parse_block(p)) } else { None };
    p.alloc(
        NodeKind::Try { block, catch_param, catch_body, finally_body },
        Span::new(start, p.span().start),
    )
}

fn parse_expr_stmt(p: &mut Parser<'_, '_>) -> NodeId {
    let start = p.span().start;
    let expr = crate::expr::parse_expr(p);
    p.eat(SyntaxKind::Semicolon);
    p.alloc(NodeKind::ExprStmt { expr }, Span::new(start, p.span().start))
}
