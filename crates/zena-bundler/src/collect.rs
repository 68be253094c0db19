//! Prefix assignment and symbol collection.

use rustc_hash::FxHashMap;
use zena_ast::NodeKind;
use zena_common::{Atom, Interner, DiagnosticBag, diagnostics::codes};
use zena_loader::ModuleMap;

/// `(module path, original top-level name) → globally unique renamed atom`.
/// Built once before the rewrite pass so every module's identifier
/// references can be resolved without re-walking sibling modules.
pub(crate) type GlobalSymbols = FxHashMap<(String, Atom), Atom>;

/// Assigns each module its deterministic `m<k>_` prefix (`k` = ordinal in
/// `check_order`, i.e. loader order) and collects every top-level binding
/// it introduces into the global symbol map. A top-level `let`/`var` whose
/// pattern isn't a single identifier is rejected here — the bundler is the
/// sole place this is checked, not the type checker (see DESIGN.md).
pub(crate) fn collect_global_symbols(
    modules: &ModuleMap,
    check_order: &[String],
    atoms: &mut Interner,
    diagnostics: &mut DiagnosticBag,
) -> GlobalSymbols {
    let mut symbols = GlobalSymbols::default();
    for (ordinal, path) in check_order.iter().enumerate() {
        let Some(module) = modules.get(path) else { continue };
        let prefix = format!("m{ordinal}_");
        let NodeKind::Program { statements } = module.arena.kind(module.program) else {
            continue;
        };
        for &stmt_id in statements {
            let name = match module.arena.kind(stmt_id).clone() {
                NodeKind::VariableDecl { pattern, .. } => match module.arena.kind(pattern) {
                    NodeKind::IdentPattern(name) => Some(*name),
                    _ => {
                        diagnostics.error(
                            codes::TOP_LEVEL_DESTRUCTURING_UNSUPPORTED,
                            "top-level let/var must bind a single identifier, not a destructuring pattern",
                            module.arena.span(stmt_id),
                        );
                        None
                    }
                },
                NodeKind::FunctionDecl { name, .. }
                | NodeKind::DeclareFunctionDecl { name, .. }
                | NodeKind::ClassDecl { name, .. }
                | NodeKind::InterfaceDecl { name, .. }
                | NodeKind::MixinDecl { name, .. }
                | NodeKind::TypeAliasDecl { name, .. }
                | NodeKind::SymbolDecl { name, .. } => Some(name),
                _ => None,
            };
            let Some(name) = name else { continue };
            let original = atoms.resolve(name).to_string();
            let renamed = atoms.intern(&format!("{prefix}{original}"));
            symbols.insert((path.clone(), name), renamed);
        }
    }
    symbols
}
