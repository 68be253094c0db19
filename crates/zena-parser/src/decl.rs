//! Declaration parsing: the program's top level and class member lists.

use smallvec::smallvec;
use zena_ast::{NodeId, NodeKind};
use zena_common::Span;
use zena_scanner::SyntaxKind;

use crate::parser::Parser;

pub(crate) fn parse_program(p: &mut Parser<'_, '_>) -> NodeId {
    let start = p.span().start;
    let mut statements = smallvec![];
    while !p.at_eof() {
        let before = p.span().start;
        statements.push(parse_top_level(p));
        if p.span().start == before {
            p.recover_to_statement_boundary();
        }
    }
    p.alloc(NodeKind::Program { statements }, Span::new(start, p.span().start))
}

fn parse_top_level(p: &mut Parser<'_, '_>) -> NodeId {
    let decorators = parse_decorators(p);
    let is_exported = p.eat(SyntaxKind::ExportKw);
    let is_declare = p.eat(SyntaxKind::DeclareKw);
    match p.kind() {
        SyntaxKind::LetKw | SyntaxKind::VarKw => parse_variable_decl_exported(p, is_exported),
        SyntaxKind::FunctionKw if is_declare => parse_declare_function(p, decorators, is_exported),
        SyntaxKind::FunctionKw => parse_function_decl(p, decorators, is_exported),
        SyntaxKind::ClassKw => parse_class_decl(p, is_exported, false, false, false),
        SyntaxKind::FinalKw => {
            p.bump();
            parse_class_decl(p, is_exported, true, false, false)
        }
        SyntaxKind::AbstractKw => {
            p.bump();
            parse_class_decl(p, is_exported, false, true, false)
        }
        SyntaxKind::ExtensionKw => {
            p.bump();
            parse_class_decl(p, is_exported, false, false, true)
        }
        SyntaxKind::InterfaceKw => parse_interface_decl(p, is_exported),
        SyntaxKind::MixinKw => parse_mixin_decl(p, is_exported),
        SyntaxKind::TypeKw => parse_type_alias_decl(p, is_exported),
        SyntaxKind::SymbolKw => parse_symbol_decl(p, is_exported),
        SyntaxKind::ImportKw => parse_import_decl(p),
        _ => crate::stmt::parse_stmt(p),
    }
}

fn parse_decorators(p: &mut Parser<'_, '_>) -> zena_ast::NodeList {
    let mut decorators = smallvec![];
    while p.at(SyntaxKind::At) {
        let start = p.span().start;
        p.bump(); // '@'
        let name = p.expect_identifier_name();
        let args = if p.at(SyntaxKind::OpenParen) {
            parse_decorator_args(p)
        } else {
            smallvec![]
        };
        let span = Span::new(start, p.span().start);
        decorators.push(p.alloc(NodeKind::Decorator { name, args }, span));
    }
    decorators
}

fn parse_decorator_args(p: &mut Parser<'_, '_>) -> zena_ast::NodeList {
    p.bump(); // '('
    let mut args = smallvec![];
    while !p.at(SyntaxKind::CloseParen) && !p.at_eof() {
        args.push(crate::expr::parse_assignment_expr(p));
        if !p.eat(SyntaxKind::Comma) {
            break;
        }
    }
    p.expect(SyntaxKind::CloseParen);
    args
}

/// `(let | var) pattern (: type)? (= init)? ;`
pub(crate) fn parse_variable_decl(p: &mut Parser<'_, '_>, omit_semicolon_check: bool) -> NodeId {
    parse_variable_decl_impl(p, false, omit_semicolon_check)
}

fn parse_variable_decl_exported(p: &mut Parser<'_, '_>, is_exported: bool) -> NodeId {
    parse_variable_decl_impl(p, is_exported, false)
}

fn parse_variable_decl_impl(p: &mut Parser<'_, '_>, is_exported: bool, in_for_head: bool) -> NodeId {
    let start = p.span().start;
    let is_var = p.at(SyntaxKind::VarKw);
    p.bump(); // 'let' | 'var'
    let pattern = crate::pattern::parse_pattern(p);
    let type_ann = if p.eat(SyntaxKind::Colon) {
        Some(crate::type_ann::parse_type_ann(p))
    } else {
        None
    };
    let init = if p.eat(SyntaxKind::Eq) {
        Some(crate::expr::parse_assignment_expr(p))
    } else {
        None
    };
    if !in_for_head {
        p.eat(SyntaxKind::Semicolon);
    }
    p.alloc(
        NodeKind::VariableDecl { pattern, is_var, type_ann, init, is_exported },
        Span::new(start, p.span().start),
    )
}

fn parse_type_params(p: &mut Parser<'_, '_>) -> zena_ast::NodeList {
    let mut params = smallvec![];
    if p.eat(SyntaxKind::Lt) {
        while !p.at(SyntaxKind::Gt) && !p.at_eof() {
            let start = p.span().start;
            let name = p.expect_identifier_name();
            let constraint = if p.eat(SyntaxKind::ExtendsKw) {
                Some(crate::type_ann::parse_type_ann(p))
            } else {
                None
            };
            let default = if p.eat(SyntaxKind::Eq) {
                Some(crate::type_ann::parse_type_ann(p))
            } else {
                None
            };
            let span = Span::new(start, p.span().start);
            params.push(p.alloc(NodeKind::TypeParamDecl { name, constraint, default }, span));
            if !p.eat(SyntaxKind::Comma) {
                break;
            }
        }
        p.expect(SyntaxKind::Gt);
    }
    params
}

fn parse_function_decl(p: &mut Parser<'_, '_>, decorators: zena_ast::NodeList, is_exported: bool) -> NodeId {
    let start = p.span().start;
    p.bump(); // 'function'
    let name = p.expect_identifier_name();
    let type_params = parse_type_params(p);
    p.expect(SyntaxKind::OpenParen);
    let mut params = smallvec![];
    while !p.at(SyntaxKind::CloseParen) && !p.at_eof() {
        params.push(crate::expr::parse_param(p));
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
    let body = Some(crate::stmt::parse_block(p));
    p.alloc(
        NodeKind::FunctionDecl {
            name,
            type_params,
            params,
            return_type,
            body,
            is_body_block: true,
            decorators,
            is_exported,
        },
        Span::new(start, p.span().start),
    )
}

/// `declare function name<T>(params): ReturnType;` — no body; intrinsic
/// functions are declared this way and annotated with `@intrinsic("name")`.
fn parse_declare_function(p: &mut Parser<'_, '_>, decorators: zena_ast::NodeList, is_exported: bool) -> NodeId {
    let start = p.span().start;
    p.bump(); // 'function'
    let name = p.expect_identifier_name();
    let type_params = parse_type_params(p);
    p.expect(SyntaxKind::OpenParen);
    let mut params = smallvec![];
    while !p.at(SyntaxKind::CloseParen) && !p.at_eof() {
        params.push(crate::expr::parse_param(p));
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
    p.eat(SyntaxKind::Semicolon);
    p.alloc(
        NodeKind::DeclareFunctionDecl { name, type_params, params, return_type, decorators, is_exported },
        Span::new(start, p.span().start),
    )
}

#[allow(clippy::too_many_arguments)]
fn parse_class_decl(p: &mut Parser<'_, '_>, is_exported: bool, is_final: bool, is_abstract: bool, is_extension: bool) -> NodeId {
    let start = p.span().start;
    p.expect(SyntaxKind::ClassKw);
    let name = p.expect_identifier_name();
    let type_params = parse_type_params(p);
    let on_type = if is_extension && p.eat(SyntaxKind::OnKw) {
        Some(crate::type_ann::parse_type_ann(p))
    } else {
        None
    };
    let superclass = if p.eat(SyntaxKind::ExtendsKw) {
        Some(crate::type_ann::parse_type_ann(p))
    } else {
        None
    };
    let mut implements = smallvec![];
    if p.eat(SyntaxKind::ImplementsKw) {
        loop {
            implements.push(crate::type_ann::parse_type_ann(p));
            if !p.eat(SyntaxKind::Comma) {
                break;
            }
        }
    }
    let mut mixins = smallvec![];
    if p.eat(SyntaxKind::WithKw) {
        loop {
            mixins.push(crate::type_ann::parse_type_ann(p));
            if !p.eat(SyntaxKind::Comma) {
                break;
            }
        }
    }
    let members = parse_class_body(p);
    p.alloc(
        NodeKind::ClassDecl {
            name,
            type_params,
            superclass,
            implements,
            mixins,
            members,
            is_final,
            is_abstract,
            is_extension,
            on_type,
            is_exported,
        },
        Span::new(start, p.span().start),
    )
}

fn parse_class_body(p: &mut Parser<'_, '_>) -> zena_ast::NodeList {
    p.expect(SyntaxKind::OpenBrace);
    let mut members = smallvec![];
    while !p.at(SyntaxKind::CloseBrace) && !p.at_eof() {
        let before = p.span().start;
        members.push(parse_class_member(p));
        if p.span().start == before {
            p.recover_to_statement_boundary();
        }
    }
    p.expect(SyntaxKind::CloseBrace);
    members
}

fn parse_class_member(p: &mut Parser<'_, '_>) -> NodeId {
    let start = p.span().start;
    let is_static = p.eat(SyntaxKind::StaticKw);
    // `final` only has meaning on an accessor (a cached/immutable getter);
    // plain fields don't carry an is_final slot in the AST.
    let is_final = p.eat(SyntaxKind::FinalKw);
    let is_private = p.eat(SyntaxKind::Hash);

    if p.at(SyntaxKind::GetKw) && p.peek_next_kind() != SyntaxKind::OpenParen {
        return parse_accessor_member(p, start, is_static, is_final, true);
    }
    if p.at(SyntaxKind::SetKw) && p.peek_next_kind() != SyntaxKind::OpenParen {
        return parse_accessor_member(p, start, is_static, is_final, false);
    }

    // `new(...)` is the constructor; any other identifier followed by `(`
    // is a method, otherwise it's a field.
    let is_constructor = p.at(SyntaxKind::NewKw);
    if is_constructor {
        p.bump();
        return parse_method_tail(p, start, p.intern("new"), is_static, is_private, true, false);
    }
    if p.at(SyntaxKind::AbstractKw) {
        p.bump();
        let name = p.expect_identifier_name();
        return parse_method_tail(p, start, name, is_static, is_private, false, true);
    }

    let name = p.expect_identifier_name();
    if p.at(SyntaxKind::OpenParen) || p.at(SyntaxKind::Lt) {
        return parse_method_tail(p, start, name, is_static, is_private, false, false);
    }

    // field
    let type_ann = if p.eat(SyntaxKind::Colon) {
        Some(crate::type_ann::parse_type_ann(p))
    } else {
        None
    };
    let init = if p.eat(SyntaxKind::Eq) {
        Some(crate::expr::parse_assignment_expr(p))
    } else {
        None
    };
    p.eat(SyntaxKind::Semicolon);
    p.alloc(
        NodeKind::FieldMember { name, type_ann, init, is_static, is_private },
        Span::new(start, p.span().start),
    )
}

#[allow(clippy::too_many_arguments)]
fn parse_method_tail(
    p: &mut Parser<'_, '_>,
    start: u32,
    name: zena_common::Atom,
    is_static: bool,
    is_private: bool,
    is_constructor: bool,
    is_abstract: bool,
) -> NodeId {
    let type_params = parse_type_params(p);
    p.expect(SyntaxKind::OpenParen);
    let mut params = smallvec![];
    while !p.at(SyntaxKind::CloseParen) && !p.at_eof() {
        params.push(crate::expr::parse_param(p));
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
    let body = if is_abstract {
        p.eat(SyntaxKind::Semicolon);
        None
    } else {
        Some(crate::stmt::parse_block(p))
    };
    p.alloc(
        NodeKind::MethodMember {
            name,
            type_params,
            params,
            return_type,
            body,
            is_static,
            is_private,
            is_constructor,
            is_abstract,
        },
        Span::new(start, p.span().start),
    )
}

fn parse_accessor_member(p: &mut Parser<'_, '_>, start: u32, is_static: bool, is_final: bool, is_getter: bool) -> NodeId {
    p.bump(); // 'get' | 'set'
    let name = p.expect_identifier_name();
    if is_getter {
        p.expect(SyntaxKind::OpenParen);
        p.expect(SyntaxKind::CloseParen);
        let type_ann = if p.eat(SyntaxKind::Colon) {
            Some(crate::type_ann::parse_type_ann(p))
        } else {
            None
        };
        let getter_body = Some(crate::stmt::parse_block(p));
        p.alloc(
            NodeKind::AccessorMember {
                name,
                type_ann,
                getter_body,
                setter_param: None,
                setter_body: None,
                is_static,
                is_final,
            },
            Span::new(start, p.span().start),
        )
    } else {
        p.expect(SyntaxKind::OpenParen);
        let setter_param = Some(crate::expr::parse_param(p));
        p.expect(SyntaxKind::CloseParen);
        let setter_body = Some(crate::stmt::parse_block(p));
        p.alloc(
            NodeKind::AccessorMember {
                name,
                type_ann: None,
                getter_body: None,
                setter_param,
                setter_body,
                is_static,
                is_final,
            },
            Span::new(start, p.span().start),
        )
    }
}

fn parse_interface_decl(p: &mut Parser<'_, '_>, is_exported: bool) -> NodeId {
    let start = p.span().start;
    p.bump(); // 'interface'
    let name = p.expect_identifier_name();
    let type_params = parse_type_params(p);
    let mut extends = smallvec![];
    if p.eat(SyntaxKind::ExtendsKw) {
        loop {
            extends.push(crate::type_ann::parse_type_ann(p));
            if !p.eat(SyntaxKind::Comma) {
                break;
            }
        }
    }
    let members = parse_interface_body(p);
    p.alloc(
        NodeKind::InterfaceDecl { name, type_params, extends, members, is_exported },
        Span::new(start, p.span().start),
    )
}

fn parse_interface_body(p: &mut Parser<'_, '_>) -> zena_ast::NodeList {
    p.expect(SyntaxKind::OpenBrace);
    let mut members = smallvec![];
    while !p.at(SyntaxKind::CloseBrace) && !p.at_eof() {
        let start = p.span().start;
        let name = p.expect_identifier_name();
        if p.at(SyntaxKind::OpenParen) || p.at(SyntaxKind::Lt) {
            members.push(parse_method_tail(p, start, name, false, false, false, true));
        } else {
            let type_ann = if p.eat(SyntaxKind::Colon) {
                Some(crate::type_ann::parse_type_ann(p))
            } else {
                None
            };
            p.eat(SyntaxKind::Semicolon);
            members.push(p.alloc(
                NodeKind::FieldMember { name, type_ann, init: None, is_static: false, is_private: false },
                Span::new(start, p.span().start),
            ));
        }
    }
    p.expect(SyntaxKind::CloseBrace);
    members
}

fn parse_mixin_decl(p: &mut Parser<'_, '_>, is_exported: bool) -> NodeId {
    let start = p.span().start;
    p.bump(); // 'mixin'
    let name = p.expect_identifier_name();
    let type_params = parse_type_params(p);
    let on_constraint = if p.eat(SyntaxKind::OnKw) {
        Some(crate::type_ann::parse_type_ann(p))
    } else {
        None
    };
    let members = parse_class_body(p);
    p.alloc(
        NodeKind::MixinDecl { name, type_params, on_constraint, members, is_exported },
        Span::new(start, p.span().start),
    )
}

fn parse_type_alias_decl(p: &mut Parser<'_, '_>, is_exported: bool) -> NodeId {
    let start = p.span().start;
    p.bump(); // 'type'
    let name = p.expect_identifier_name();
    let type_params = parse_type_params(p);
    p.expect(SyntaxKind::Eq);
    let type_ann = crate::type_ann::parse_type_ann(p);
    p.eat(SyntaxKind::Semicolon);
    p.alloc(
        NodeKind::TypeAliasDecl { name, type_params, type_ann, is_exported },
        Span::new(start, p.span().start),
    )
}

fn parse_symbol_decl(p: &mut Parser<'_, '_>, is_exported: bool) -> NodeId {
    let start = p.span().start;
    p.bump(); // 'symbol'
    let name = p.expect_identifier_name();
    p.eat(SyntaxKind::Semicolon);
    p.alloc(NodeKind::SymbolDecl { name, is_exported }, Span::new(start, p.span().start))
}

/// `import { a, b as c } from "specifier";`
fn parse_import_decl(p: &mut Parser<'_, '_>) -> NodeId {
    let start = p.span().start;
    p.bump(); // 'import'
    p.expect(SyntaxKind::OpenBrace);
    let mut clauses = smallvec![];
    while !p.at(SyntaxKind::CloseBrace) && !p.at_eof() {
        let clause_start = p.span().start;
        let imported = p.expect_identifier_name();
        let local = if p.eat(SyntaxKind::AsKw) {
            p.expect_identifier_name()
        } else {
            imported
        };
        clauses.push(p.alloc(
            NodeKind::ImportSpecifier { imported, local },
            Span::new(clause_start, p.span().start),
        ));
        if !p.eat(SyntaxKind::Comma) {
            break;
        }
    }
    p.expect(SyntaxKind::CloseBrace);
    p.expect(SyntaxKind::FromKw);
    let specifier_text = match &p.current.value {
        zena_scanner::TokenValue::String(s) => s.clone(),
        _ => String::new(),
    };
    let specifier = p.intern(&specifier_text);
    if p.at(SyntaxKind::StringLiteral) {
        p.bump();
    } else {
        p.error_unexpected();
    }
    p.eat(SyntaxKind::Semicolon);
    p.alloc(NodeKind::ImportDecl { specifier, clauses }, Span::new(start, p.span().start))
}
