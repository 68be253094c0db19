//! Bundler / monomorphizer: combines every checked module reachable from
//! the entry point into one self-contained [`Program`], renaming each
//! module's top-level bindings to a globally unique name so the emitter
//! never has to re-resolve an import.
//!
//! The natural shape hands this stage a `Compiler`, but `zena-bundler`
//! sitting below the root `zena` crate in the dependency graph makes that
//! impossible without a cycle — `bundle` instead takes exactly the pieces
//! of a `Compiler` it needs: the loader's module map, its check order, and
//! the entry path (see DESIGN.md).
//!
//! Bundling breaks into five steps, mapped onto this crate as:
//! 1–2. [`collect::collect_global_symbols`] — prefix assignment + symbol collection.
//! 3–4. [`rewrite::rewrite_top_level`] — export rewriting and the AST clone+rename,
//!      folded into one pass since a top-level declaration's own rename and its
//!      entry-module export both fall out of the same `resolve_ident` lookup.
//! 5. [`bundle`] below — assembly into one [`Program`].

mod collect;
mod program;
mod rewrite;

use rustc_hash::FxHashMap;
use zena_ast::{NodeArena, NodeKind};
use zena_common::{Atom, DiagnosticBag, Interner};
use zena_loader::ModuleMap;

pub use program::Program;

const WELL_KNOWN_TYPE_NAMES: [&str; 3] = ["String", "FixedArray", "TemplateStringsArray"];

/// Runs the bundler over every module the loader reached, in `check_order`
/// (the same topological order the checker used), and returns the one
/// monomorphized [`Program`] the emitter consumes.
pub fn bundle(modules: &ModuleMap, check_order: &[String], entry: &str, atoms: &mut Interner) -> (Program, DiagnosticBag) {
    let _span = tracing::debug_span!("bundle", entry).entered();
    let mut diagnostics = DiagnosticBag::new();
    let global_symbols = collect::collect_global_symbols(modules, check_order, atoms, &mut diagnostics);

    // A rejected top-level pattern (`TOP_LEVEL_DESTRUCTURING_UNSUPPORTED`)
    // left no entry in `global_symbols` for that declaration; the rewrite
    // pass below assumes every top-level `let`/`var` it sees does, so it
    // can't run safely once collection has already reported an error.
    if diagnostics.has_errors() {
        return (
            Program { arena: NodeArena::new(), statements: zena_ast::NodeList::new(), exports: FxHashMap::default(), well_known_types: FxHashMap::default() },
            diagnostics,
        );
    }

    let mut new_arena = NodeArena::new();
    let mut statements = zena_ast::NodeList::new();
    let mut exports = FxHashMap::default();

    for path in check_order {
        let Some(module) = modules.get(path) else { continue };
        let is_entry = path == entry;
        let import_map = build_import_map(module, &global_symbols, atoms);
        let mut ctx = rewrite::RewriteCtx::new(path, is_entry, &global_symbols, import_map);

        let NodeKind::Program { statements: top_level } = module.arena.kind(module.program) else {
            continue;
        };
        for &stmt_id in top_level {
            if matches!(module.arena.kind(stmt_id), NodeKind::ImportDecl { .. }) {
                continue;
            }
            let rewritten = rewrite::rewrite_top_level(&mut ctx, &module.arena, stmt_id, &mut new_arena);
            statements.push(rewritten);
        }
        exports.extend(ctx.exports);
    }

    let well_known_types = collect_well_known_types(modules, check_order, &global_symbols, atoms);

    (Program { arena: new_arena, statements, exports, well_known_types }, diagnostics)
}

/// `local import alias → that name's globally unique renamed atom`, built
/// from a module's `import { a, b as c } from "specifier"` declarations
/// before rewriting its body (the rewrite pass's "import map" resolution
/// tier).
fn build_import_map(module: &zena_loader::ModuleRecord, global_symbols: &collect::GlobalSymbols, atoms: &Interner) -> FxHashMap<Atom, Atom> {
    let mut map = FxHashMap::default();
    let NodeKind::Program { statements } = module.arena.kind(module.program) else {
        return map;
    };
    for &stmt_id in statements {
        let NodeKind::ImportDecl { specifier, clauses } = module.arena.kind(stmt_id).clone() else {
            continue;
        };
        let specifier_text = atoms.resolve(specifier);
        let Some(resolved_path) = module.resolved_import(specifier_text) else {
            continue;
        };
        for &clause_id in &clauses {
            let NodeKind::ImportSpecifier { imported, local } = *module.arena.kind(clause_id) else {
                continue;
            };
            if let Some(&renamed) = global_symbols.get(&(resolved_path.to_string(), imported)) {
                map.insert(local, renamed);
            }
        }
    }
    map
}

/// Best-effort lookup of the stdlib's well-known type declarations
/// (`String`, `FixedArray`, `TemplateStringsArray`) across every loaded
/// module, so the emitter can find them under their mangled names
/// regardless of which module happened to declare them. The checker
/// doesn't yet track which well-known types a program actually uses (see
/// DESIGN.md), so this records every one that's declared anywhere in the
/// graph rather than only the ones referenced.
fn collect_well_known_types(modules: &ModuleMap, check_order: &[String], global_symbols: &collect::GlobalSymbols, atoms: &Interner) -> FxHashMap<Atom, Atom> {
    let mut found = FxHashMap::default();
    for path in check_order {
        let Some(module) = modules.get(path) else { continue };
        let NodeKind::Program { statements } = module.arena.kind(module.program) else {
            continue;
        };
        for &stmt_id in statements {
            let name = match module.arena.kind(stmt_id) {
                NodeKind::ClassDecl { name, .. } | NodeKind::InterfaceDecl { name, .. } => *name,
                _ => continue,
            };
            let text = atoms.resolve(name);
            if !WELL_KNOWN_TYPE_NAMES.contains(&text) {
                continue;
            }
            if let Some(&renamed) = global_symbols.get(&(path.clone(), name)) {
                found.entry(name).or_insert(renamed);
            }
        }
    }
    found
}
