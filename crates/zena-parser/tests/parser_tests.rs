//! Integration tests for the zena parser: end-to-end source text to AST.

use zena_ast::{NodeArena, NodeId, NodeKind};
use zena_common::{DiagnosticBag, Interner};
use zena_parser::parse_module;

fn parse_source(source: &str) -> (NodeArena, NodeId, DiagnosticBag, Interner) {
    let mut interner = Interner::new();
    let (arena, root, diagnostics) = parse_module(source, &mut interner);
    (arena, root, diagnostics, interner)
}

fn program_statements(arena: &NodeArena, root: NodeId) -> usize {
    match &arena.get(root).kind {
        NodeKind::Program { statements } => statements.len(),
        _ => panic!("expected Program node"),
    }
}

#[test]
fn parses_variable_and_function_declarations() {
    let (arena, root, diagnostics, _interner) = parse_source(
        "let x: i32 = 1;\nfunction add(a: i32, b: i32): i32 { return a + b; }\n",
    );
    assert!(diagnostics.is_empty());
    assert_eq!(program_statements(&arena, root), 2);
}

#[test]
fn parses_class_with_constructor_and_fields() {
    let (arena, root, diagnostics, _interner) = parse_source(
        "class Point {\n  x: i32;\n  y: i32;\n  new(x: i32, y: i32) { this.x = x; this.y = y; }\n}\n",
    );
    assert!(diagnostics.is_empty());
    let NodeKind::Program { statements } = &arena.get(root).kind else { panic!() };
    assert_eq!(statements.len(), 1);
    let NodeKind::ClassDecl { members, .. } = &arena.get(statements[0]).kind else {
        panic!("expected ClassDecl")
    };
    assert_eq!(members.len(), 3);
}

#[test]
fn disambiguates_grouping_from_one_element_tuple() {
    let (arena, root, diagnostics, _interner) = parse_source("let x = (1);\nlet y = (1,);\n");
    assert!(diagnostics.is_empty());
    let NodeKind::Program { statements } = &arena.get(root).kind else { panic!() };
    let NodeKind::VariableDecl { init: Some(x_init), .. } = &arena.get(statements[0]).kind else {
        panic!()
    };
    assert!(matches!(arena.get(*x_init).kind, NodeKind::NumberLit(_)));
    let NodeKind::VariableDecl { init: Some(y_init), .. } = &arena.get(statements[1]).kind else {
        panic!()
    };
    assert!(matches!(arena.get(*y_init).kind, NodeKind::TupleLit { .. }));
}

#[test]
fn disambiguates_arrow_function_from_tuple() {
    let (arena, root, diagnostics, _interner) = parse_source("let f = (a: i32, b: i32) -> a + b;\n");
    assert!(diagnostics.is_empty());
    let NodeKind::Program { statements } = &arena.get(root).kind else { panic!() };
    let NodeKind::VariableDecl { init: Some(init), .. } = &arena.get(statements[0]).kind else {
        panic!()
    };
    assert!(matches!(arena.get(*init).kind, NodeKind::FunctionExpr { .. }));
}

#[test]
fn parses_record_literal_with_shorthand_spread_and_computed_key() {
    let (arena, root, diagnostics, _interner) =
        parse_source("let r = { a, b: 2, [key]: 3, ...rest };\n");
    assert!(diagnostics.is_empty());
    let NodeKind::Program { statements } = &arena.get(root).kind else { panic!() };
    let NodeKind::VariableDecl { init: Some(init), .. } = &arena.get(statements[0]).kind else {
        panic!()
    };
    let NodeKind::RecordLit { fields } = &arena.get(*init).kind else {
        panic!("expected RecordLit")
    };
    assert_eq!(fields.len(), 4);
}

#[test]
fn parses_template_literal_with_substitution() {
    let (arena, root, diagnostics, _interner) = parse_source("let s = `hello ${name}!`;\n");
    assert!(diagnostics.is_empty());
    let NodeKind::Program { statements } = &arena.get(root).kind else { panic!() };
    let NodeKind::VariableDecl { init: Some(init), .. } = &arena.get(statements[0]).kind else {
        panic!()
    };
    let NodeKind::TemplateLiteral { quasis, substitutions } = &arena.get(*init).kind else {
        panic!("expected TemplateLiteral")
    };
    assert_eq!(quasis.len(), 2);
    assert_eq!(substitutions.len(), 1);
}

#[test]
fn parses_template_literal_with_multiple_substitutions() {
    let (arena, root, diagnostics, _interner) = parse_source("let s = `a${1}b${2}c`;\n");
    assert!(diagnostics.is_empty());
    let NodeKind::Program { statements } = &arena.get(root).kind else { panic!() };
    let NodeKind::VariableDecl { init: Some(init), .. } = &arena.get(statements[0]).kind else {
        panic!()
    };
    let NodeKind::TemplateLiteral { quasis, substitutions } = &arena.get(*init).kind else {
        panic!("expected TemplateLiteral")
    };
    assert_eq!(quasis.len(), 3);
    assert_eq!(substitutions.len(), 2);
}

#[test]
fn parses_match_expression_with_class_and_record_patterns() {
    let (arena, root, diagnostics, _interner) = parse_source(
        "function describe(p: Point) {\n  return match p {\n    Point(x: px, y: py) -> px,\n    { x, y } -> x,\n  };\n}\n",
    );
    assert!(diagnostics.is_empty());
    assert_eq!(program_statements(&arena, root), 1);
}

#[test]
fn parses_union_and_array_type_annotations() {
    let (arena, root, diagnostics, _interner) =
        parse_source("function f(x: i32 | null, y: i32[]): void | null {}\n");
    assert!(diagnostics.is_empty());
    let NodeKind::Program { statements } = &arena.get(root).kind else { panic!() };
    let NodeKind::FunctionDecl { params, return_type, .. } = &arena.get(statements[0]).kind else {
        panic!("expected FunctionDecl")
    };
    let NodeKind::Param { type_ann: Some(t0), .. } = &arena.get(params[0]).kind else { panic!() };
    assert!(matches!(arena.get(*t0).kind, NodeKind::UnionType { .. }));
    let NodeKind::Param { type_ann: Some(t1), .. } = &arena.get(params[1]).kind else { panic!() };
    assert!(matches!(arena.get(*t1).kind, NodeKind::ArrayType { .. }));
    assert!(matches!(
        arena.get(return_type.unwrap()).kind,
        NodeKind::UnionType { .. }
    ));
}

#[test]
fn parses_extension_class_with_on_clause_and_decorator() {
    let (arena, root, diagnostics, _interner) = parse_source(
        "extension class StringHelpers on string {\n  @intrinsic(\"string.len\")\n  declare function len(): i32;\n}\n",
    );
    assert!(diagnostics.is_empty());
    let NodeKind::Program { statements } = &arena.get(root).kind else { panic!() };
    let NodeKind::ClassDecl { is_extension, on_type, .. } = &arena.get(statements[0]).kind else {
        panic!("expected ClassDecl")
    };
    assert!(is_extension);
    assert!(on_type.is_some());
}

#[test]
fn parses_import_declaration_with_rename() {
    let (arena, root, diagnostics, _interner) =
        parse_source("import { Foo as Bar, Baz } from \"zena:collections\";\n");
    assert!(diagnostics.is_empty());
    let NodeKind::Program { statements } = &arena.get(root).kind else { panic!() };
    let NodeKind::ImportDecl { clauses, .. } = &arena.get(statements[0]).kind else {
        panic!("expected ImportDecl")
    };
    assert_eq!(clauses.len(), 2);
}

#[test]
fn recovers_from_unexpected_token_and_keeps_parsing() {
    let (arena, root, diagnostics, _interner) =
        parse_source("let x = ;\nfunction ok(): i32 { return 1; }\n");
    assert!(!diagnostics.is_empty());
    // Recovery should still surface the well-formed function declaration.
    assert_eq!(program_statements(&arena, root), 2);
}

#[test]
fn parses_try_catch_finally() {
    let (arena, root, diagnostics, _interner) = parse_source(
        "function risky() {\n  try {\n    throw 1;\n  } catch (e) {\n    return 0;\n  } finally {\n    return 1;\n  }\n}\n",
    );
    assert!(diagnostics.is_empty());
    assert_eq!(program_statements(&arena, root), 1);
}
