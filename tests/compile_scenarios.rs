//! End-to-end scenarios: source text in, expected diagnostics or
//! Program/type properties out, driven through the real `Compiler`
//! facade against an in-memory `Host`.

use std::collections::HashSet;

use zena::{CompileOutput, Compiler, NodeKind};
use zena_common::{CompilerOptions, diagnostics::codes};
use zena_loader::testing::MemoryHost;

fn no_prelude() -> CompilerOptions {
    CompilerOptions { prelude_modules: Vec::new(), ..CompilerOptions::default() }
}

fn compile_one(source: &str) -> CompileOutput {
    let host = MemoryHost::new().with_file("main.zena", source);
    let compiler = Compiler::new(no_prelude());
    compiler.compile(&host, "main.zena")
}

#[test]
fn scenario_1_unbound_identifier_is_symbol_not_found() {
    let output = compile_one("let x = y;");
    let main = &output.modules["main.zena"];
    let errors: Vec<_> = main.diagnostics.iter().filter(|d| d.code == codes::SYMBOL_NOT_FOUND).collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains('y'));
}

#[test]
fn scenario_2_three_way_union_with_null_is_well_typed_and_interned() {
    let output = compile_one("class A {}\nclass B {}\nlet x: A | B | null = null;\n");
    let main = &output.modules["main.zena"];
    assert!(!main.diagnostics.has_errors());

    let NodeKind::Program { statements } = main.arena.kind(main.program) else { panic!("expected Program") };
    let var_decl = statements[2];
    let NodeKind::VariableDecl { type_ann: Some(ann), .. } = main.arena.kind(var_decl) else {
        panic!("expected the third statement to be the annotated `let x`")
    };
    let semantics = &output.semantics["main.zena"];
    let ann_ty = semantics.node_types[ann];
    let members = output.shared.interner.union_members(ann_ty).expect("annotation resolves to a union");
    assert_eq!(members.len(), 3);
}

#[test]
fn scenario_3_extension_class_with_instance_field_is_rejected() {
    let output = compile_one("extension class IntArray on i32[] {\n  x: i32;\n}\n");
    let main = &output.modules["main.zena"];
    let errors: Vec<_> = main.diagnostics.iter().filter(|d| d.code == codes::EXTENSION_CLASS_FIELD).collect();
    assert_eq!(errors.len(), 1);
}

#[test]
fn scenario_4_bundling_two_same_named_classes_keeps_them_distinct() {
    let host = MemoryHost::new()
        .with_file(
            "a.zena",
            "export class Data {\n  v: i32;\n  new(v: i32) { this.v = v; }\n  fromA(): i32 { return this.v; }\n}\n",
        )
        .with_file(
            "b.zena",
            "export class Data {\n  v: i32;\n  new(v: i32) { this.v = v; }\n  fromB(): i32 { return this.v; }\n}\n",
        )
        .with_file(
            "main.zena",
            "import { Data as DataA } from \"./a\";\nimport { Data as DataB } from \"./b\";\nlet total = new DataA(1).fromA() + new DataB(2).fromB();\n",
        );
    let compiler = Compiler::new(no_prelude());
    let output = compiler.compile(&host, "main.zena");
    for path in ["a.zena", "b.zena", "main.zena"] {
        assert!(!output.modules[path].diagnostics.has_errors(), "{path} had diagnostics");
    }

    let (program, diagnostics) = compiler.bundle(&host, "main.zena");
    assert!(!diagnostics.has_errors());

    let mut class_names = HashSet::new();
    for &stmt in &program.statements {
        if let NodeKind::ClassDecl { name, .. } = program.arena.kind(stmt) {
            class_names.insert(*name);
        }
    }
    // `Data` from a.zena and `Data` from b.zena must have been renamed to
    // two distinct top-level identifiers, not collapsed into one.
    assert_eq!(class_names.len(), 2);
}

#[test]
fn scenario_5_interface_forward_references_a_later_class() {
    let output = compile_one(
        "interface Logger {\n  log(m: Message): void;\n}\nclass Message {}\nclass ConsoleLogger implements Logger {\n  log(m: Message): void {}\n}\n",
    );
    let main = &output.modules["main.zena"];
    assert!(!main.diagnostics.has_errors());
}

#[test]
fn scenario_6_mutable_capture_is_recorded_on_the_closure() {
    let output = compile_one("var x = 0;\nlet f = () => { x = 1; };\n");
    let main = &output.modules["main.zena"];
    assert!(!main.diagnostics.has_errors());

    let NodeKind::Program { statements } = main.arena.kind(main.program) else { panic!("expected Program") };
    let NodeKind::VariableDecl { init: Some(arrow), .. } = main.arena.kind(statements[1]) else {
        panic!("expected `let f = ...`")
    };
    let semantics = &output.semantics["main.zena"];
    let NodeKind::FunctionExpr { body: Some(body), .. } = main.arena.kind(*arrow) else { panic!("expected an arrow function") };
    let capture_info = semantics.captures.get(body).expect("arrow body should have recorded captures");
    assert!(!capture_info.captures.is_empty());
    assert!(!capture_info.mutable_captures.is_empty());
}

#[test]
fn union_of_primitive_and_null_without_reference_type_is_allowed_but_bare_primitive_union_is_not() {
    let output = compile_one("let x: i32 | null = null;\nlet y: i32 | bool = 1;\n");
    let main = &output.modules["main.zena"];
    let errors: Vec<_> = main.diagnostics.iter().filter(|d| d.code == codes::TYPE_MISMATCH).collect();
    assert!(!errors.is_empty(), "a primitive union without null should be rejected");
}

#[test]
fn prelude_injection_is_local_to_modules_that_actually_use_it() {
    let host = MemoryHost::new()
        .with_file("zena:prelude", "export class String {}\n")
        .with_file("uses_string.zena", "let s: String = \"hi\";\n")
        .with_file("no_prelude.zena", "let x: i32 = 1;\n");

    let compiler = Compiler::new(CompilerOptions::default());

    let used = compiler.compile(&host, "uses_string.zena");
    let uses_module = &used.modules["uses_string.zena"];
    let NodeKind::Program { statements } = uses_module.arena.kind(uses_module.program) else { panic!() };
    let has_synthesized_import = statements.iter().any(|&s| matches!(uses_module.arena.kind(s), NodeKind::ImportDecl { .. }));
    assert!(has_synthesized_import, "a module referencing `String` should gain a synthesized prelude import");

    let unused = compiler.compile(&host, "no_prelude.zena");
    let no_prelude_module = &unused.modules["no_prelude.zena"];
    let NodeKind::Program { statements } = no_prelude_module.arena.kind(no_prelude_module.program) else { panic!() };
    let has_any_import = statements.iter().any(|&s| matches!(no_prelude_module.arena.kind(s), NodeKind::ImportDecl { .. }));
    assert!(!has_any_import, "a module that never touches the prelude should gain no synthesized import");
}
