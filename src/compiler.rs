//! `Compiler` — sequences the whole pipeline given nothing but a [`Host`]
//! and an entry path. Holds no file handles and no process-wide state:
//! every interner and side-table it produces is owned by the
//! [`CompileOutput`] it returns, so a fresh `Compiler` value is a fresh
//! compile.

use rustc_hash::FxHashMap;
use zena_ast::{NodeId, NodeKind, NodeList};
use zena_bundler::Program;
use zena_checker::{CaptureInfo, Checker, CheckerShared, Resolution};
use zena_common::{Atom, CompilerOptions, Interner};
use zena_loader::{Host, ModuleMap, load_graph};
use zena_types::TypeId;

/// The per-module semantic side-tables a `Checker` pass produced, kept
/// alive past the `Checker` value itself: semantic side-tables have the
/// same lifetime as the Program they describe.
#[derive(Default)]
pub struct CheckedModule {
    pub node_types: FxHashMap<NodeId, TypeId>,
    pub resolutions: FxHashMap<NodeId, Resolution>,
    pub captures: FxHashMap<NodeId, CaptureInfo>,
}

/// Every module reachable from the entry point (plus the prelude modules
/// checked ahead of it), fully parsed and checked, with diagnostics
/// attached to each `ModuleRecord` and semantic side-tables available per
/// module path. This is what `Compiler::compile` returns;
/// `Compiler::bundle` consumes one of these to produce the single-program
/// IR.
pub struct CompileOutput {
    pub modules: ModuleMap,
    /// Topological check order: prelude modules' own transitive
    /// dependencies and the prelude modules themselves, followed by the
    /// entry module's graph — the same order the checker actually ran in.
    pub check_order: Vec<String>,
    pub entry: String,
    pub shared: CheckerShared,
    pub semantics: FxHashMap<String, CheckedModule>,
}

#[derive(Default)]
pub struct Compiler {
    pub options: CompilerOptions,
}

impl Compiler {
    pub fn new(options: CompilerOptions) -> Self {
        Compiler { options }
    }

    /// Resolves and parses the entry module and everything it
    /// transitively imports, loads and checks the prelude ahead of it,
    /// then checks every module in topological order, synthesizing
    /// prelude imports for whichever modules ended up using one.
    pub fn compile(&self, host: &dyn Host, entry: &str) -> CompileOutput {
        let _span = tracing::debug_span!("Compiler::compile", entry).entered();
        let mut atoms = Interner::new();

        let (mut modules, mut check_order) = self.load_prelude_and_entry(host, entry, &mut atoms);

        let mut shared = CheckerShared::new();
        shared.atoms = atoms;

        let prelude_set: std::collections::HashSet<&str> =
            self.options.prelude_modules.iter().map(String::as_str).collect();

        let mut semantics: FxHashMap<String, CheckedModule> = FxHashMap::default();
        // `used_prelude_symbols` per module, kept around until every module
        // has been checked so prelude injection (below) can run once the
        // full `shared.prelude` map (and its origin table) is final.
        let mut used_prelude: FxHashMap<String, std::collections::HashSet<Atom>> = FxHashMap::default();
        let mut prelude_origin: FxHashMap<Atom, String> = FxHashMap::default();

        for path in &check_order {
            let Some(module) = modules.get(path) else { continue };
            let is_prelude = prelude_set.contains(path.as_str());
            let mut checker =
                if is_prelude { Checker::for_prelude_module(module, &mut shared) } else { Checker::for_module(module, &mut shared) };
            checker.run(module);

            // Snapshot everything this pass produced into owned values
            // before touching `shared` directly again — `checker` holds
            // `shared` by exclusive borrow for as long as it's alive.
            let new_prelude_exports = if is_prelude { Some(checker.exports.clone()) } else { None };
            let used: std::collections::HashSet<Atom> = checker.used_prelude_symbols.iter().copied().collect();
            let checked = CheckedModule {
                node_types: checker.node_types.clone(),
                resolutions: checker.resolutions.clone(),
                captures: checker.captures.clone(),
            };
            let diags = checker.diagnostics.clone();

            if let Some(exports) = new_prelude_exports {
                for (name, binding) in exports {
                    shared.prelude.entry(name).or_insert(binding);
                    prelude_origin.entry(name).or_insert_with(|| path.clone());
                }
            }
            used_prelude.insert(path.clone(), used);
            semantics.insert(path.clone(), checked);
            if let Some(record) = modules.get_mut(path) {
                record.diagnostics.extend(diags);
            }
        }

        self.inject_prelude_imports(&mut modules, &check_order, &used_prelude, &prelude_origin, &mut shared.atoms);

        CompileOutput { modules, check_order, entry: entry.to_string(), shared, semantics }
    }

    /// `compile`, then hand the result to the bundler/monomorphizer.
    pub fn bundle(&self, host: &dyn Host, entry: &str) -> (Program, zena_common::DiagnosticBag) {
        let mut output = self.compile(host, entry);
        zena_bundler::bundle(&output.modules, &output.check_order, entry, &mut output.shared.atoms)
    }

    /// Loads the entry module's graph, plus one graph per configured
    /// prelude module (each prelude module may itself import other stdlib
    /// modules, so it gets the same breadth-first treatment as the entry
    /// point). Merges everything into one `ModuleMap` and one check order
    /// with every prelude graph's modules ahead of the entry graph's,
    /// since a prelude module must be fully checked before any module
    /// that might use it.
    fn load_prelude_and_entry(&self, host: &dyn Host, entry: &str, atoms: &mut Interner) -> (ModuleMap, Vec<String>) {
        let mut modules: ModuleMap = FxHashMap::default();
        let mut check_order: Vec<String> = Vec::new();
        let mut seen: std::collections::HashSet<String> = std::collections::HashSet::new();

        for prelude_path in &self.options.prelude_modules {
            let (graph, _diagnostics) = load_graph(host, prelude_path, &self.options, atoms);
            let mut graph_modules = graph.modules;
            for path in graph.check_order {
                if seen.insert(path.clone()) {
                    if let Some(record) = graph_modules.remove(&path) {
                        modules.insert(path.clone(), record);
                    }
                    check_order.push(path);
                }
            }
        }

        // The entry graph is authoritative for any module it also
        // discovered (its diagnostics reflect following it as an ordinary
        // dependency); it overwrites a prelude graph's copy of the same
        // path, and contributes the rest of its own check order after it.
        let (graph, _diagnostics) = load_graph(host, entry, &self.options, atoms);
        let mut entry_modules = graph.modules;
        for path in graph.check_order {
            if seen.insert(path.clone()) {
                check_order.push(path.clone());
            }
            if let Some(record) = entry_modules.remove(&path) {
                modules.insert(path, record);
            }
        }

        (modules, check_order)
    }

    /// The pipeline's "inject-prelude-imports" step: for every module
    /// that resolved at least one identifier against the prelude,
    /// synthesize `ImportDecl` nodes at the top of its Program naming the
    /// real prelude module that declared each symbol, grouped by origin
    /// module so one module contributes at most one synthesized import.
    /// A module that never touched the prelude (its `used_prelude_symbols`
    /// set stayed empty) gets no synthesized import at all.
    fn inject_prelude_imports(
        &self,
        modules: &mut ModuleMap,
        check_order: &[String],
        used_prelude: &FxHashMap<String, std::collections::HashSet<Atom>>,
        prelude_origin: &FxHashMap<Atom, String>,
        atoms: &mut Interner,
    ) {
        for path in check_order {
            let Some(used) = used_prelude.get(path) else { continue };
            if used.is_empty() {
                continue;
            }
            let mut by_origin: FxHashMap<String, Vec<Atom>> = FxHashMap::default();
            for &symbol in used {
                if let Some(origin) = prelude_origin.get(&symbol) {
                    by_origin.entry(origin.clone()).or_default().push(symbol);
                }
            }
            if by_origin.is_empty() {
                continue;
            }
            let Some(module) = modules.get_mut(path) else { continue };
            let mut origins: Vec<String> = by_origin.keys().cloned().collect();
            origins.sort();
            let mut synthesized = NodeList::new();
            for origin in origins {
                let mut symbols = by_origin.remove(&origin).unwrap_or_default();
                symbols.sort_by_key(|a| a.index());
                let specifier = atoms.intern(&origin);
                let mut clauses = NodeList::new();
                for symbol in symbols {
                    let clause = module.arena.alloc(NodeKind::ImportSpecifier { imported: symbol, local: symbol }, zena_common::Span::dummy());
                    clauses.push(clause);
                }
                let import_decl = module.arena.alloc(NodeKind::ImportDecl { specifier, clauses }, zena_common::Span::dummy());
                synthesized.push(import_decl);
                module.imports.push((origin.clone(), origin));
            }

            let NodeKind::Program { statements } = module.arena.kind(module.program).clone() else {
                continue;
            };
            let mut new_statements = synthesized;
            new_statements.extend(statements);
            let program_span = module.arena.span(module.program);
            let new_program = module.arena.alloc(NodeKind::Program { statements: new_statements }, program_span);
            module.program = new_program;
        }
    }
}
