//! Bundler/monomorphizer behavior: export fidelity,
//! well-known-type resolution, and the top-level-destructuring rejection
//! that's enforced in the bundler rather than the type checker.
//!
//! These call `zena_bundler::bundle` directly against the same `Compiler`
//! output it was produced from, rather than going through
//! `Compiler::bundle` (which re-runs `compile` internally and hands back
//! only the `Program`) — `Program`'s `Atom` keys are only meaningful
//! against the `Interner` that produced them.

use zena::{Compiler, NodeKind};
use zena_common::{CompilerOptions, diagnostics::codes};
use zena_loader::testing::MemoryHost;

fn no_prelude() -> CompilerOptions {
    CompilerOptions { prelude_modules: Vec::new(), ..CompilerOptions::default() }
}

#[test]
fn only_the_entry_modules_exports_are_published() {
    let host = MemoryHost::new()
        .with_file("a.zena", "export class Helper {\n  v: i32;\n  new(v: i32) { this.v = v; }\n}\n")
        .with_file(
            "main.zena",
            "import { Helper } from \"./a\";\nexport class Main {\n  h: Helper;\n  new(h: Helper) { this.h = h; }\n}\n",
        );
    let compiler = Compiler::new(no_prelude());
    let mut output = compiler.compile(&host, "main.zena");
    for path in ["a.zena", "main.zena"] {
        assert!(!output.modules[path].diagnostics.has_errors(), "{path} had diagnostics");
    }

    let (program, diagnostics) = zena_bundler::bundle(&output.modules, &output.check_order, "main.zena", &mut output.shared.atoms);
    assert!(!diagnostics.has_errors());

    let exported_names: Vec<&str> = program.exports.keys().map(|&a| output.shared.atoms.resolve(a)).collect();
    assert!(exported_names.contains(&"Main"), "the entry module's own export should be published");
    assert!(!exported_names.contains(&"Helper"), "a dependency module's export must not leak into the bundle's exports");
}

#[test]
fn well_known_stdlib_types_are_resolvable_by_their_mangled_name() {
    let host = MemoryHost::new()
        .with_file("zena:prelude", "export class String {}\n")
        .with_file("main.zena", "let s: String = \"hi\";\n");
    let compiler = Compiler::new(CompilerOptions::default());
    let mut output = compiler.compile(&host, "main.zena");
    assert!(!output.modules["main.zena"].diagnostics.has_errors());

    let (program, diagnostics) = zena_bundler::bundle(&output.modules, &output.check_order, "main.zena", &mut output.shared.atoms);
    assert!(!diagnostics.has_errors());

    let (&string_key, &renamed) =
        program.well_known_types.iter().find(|(&k, _)| output.shared.atoms.resolve(k) == "String").expect("String should be recorded as well-known");
    assert_eq!(output.shared.atoms.resolve(string_key), "String");

    let declared_somewhere = program.statements.iter().any(|&stmt| match program.arena.kind(stmt) {
        NodeKind::ClassDecl { name, .. } => *name == renamed,
        _ => false,
    });
    assert!(declared_somewhere, "the mangled name the well-known-types table points at should actually be declared in the bundle");
}

#[test]
fn top_level_destructuring_pattern_is_rejected_by_the_bundler_not_the_checker() {
    let host = MemoryHost::new().with_file("main.zena", "let { x } = { x: 1 };\n");
    let compiler = Compiler::new(no_prelude());
    let mut output = compiler.compile(&host, "main.zena");
    assert!(!output.modules["main.zena"].diagnostics.has_errors(), "destructuring a record is fine at the type-checking stage");

    let (program, diagnostics) = zena_bundler::bundle(&output.modules, &output.check_order, "main.zena", &mut output.shared.atoms);
    let bundler_codes: Vec<u32> = diagnostics.iter().map(|d| d.code).collect();
    assert!(bundler_codes.contains(&codes::TOP_LEVEL_DESTRUCTURING_UNSUPPORTED));
    assert!(program.statements.is_empty(), "bundling should bail out with an empty program once collection reported an error");
}

#[test]
fn bundled_output_drops_import_declarations_but_keeps_every_other_top_level_statement() {
    let host = MemoryHost::new()
        .with_file("a.zena", "export class Helper {}\n")
        .with_file("main.zena", "import { Helper } from \"./a\";\nlet h = new Helper();\n");
    let compiler = Compiler::new(no_prelude());
    let mut output = compiler.compile(&host, "main.zena");
    let (program, diagnostics) = zena_bundler::bundle(&output.modules, &output.check_order, "main.zena", &mut output.shared.atoms);
    assert!(!diagnostics.has_errors());

    let has_import = program.statements.iter().any(|&s| matches!(program.arena.kind(s), NodeKind::ImportDecl { .. }));
    assert!(!has_import, "the bundler's output should never contain an import declaration");

    let has_class = program.statements.iter().any(|&s| matches!(program.arena.kind(s), NodeKind::ClassDecl { .. }));
    let has_let = program.statements.iter().any(|&s| matches!(program.arena.kind(s), NodeKind::VariableDecl { .. }));
    assert!(has_class && has_let, "both modules' non-import statements should survive into the bundle");
}
