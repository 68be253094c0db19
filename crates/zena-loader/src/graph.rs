//! Builds a module's dependency graph by BFS from an entry path, then
//! orders it for checking.

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};
use zena_ast::NodeKind;
use zena_common::{CompilerOptions, DiagnosticBag, Interner, Span, diagnostics::codes};

use crate::host::Host;
use crate::module::{ModuleMap, ModuleRecord};

pub struct ModuleGraph {
    pub modules: ModuleMap,
    /// Every discovered module's path, in a checking-safe order: a
    /// module's dependencies precede it whenever the import graph is
    /// acyclic (Kahn's algorithm); any module left over because it's part
    /// of a true cycle is appended in first-discovery order, which is the
    /// only ordering a cyclic graph admits but still gives the checker a
    /// deterministic sequence to consume forward-reference placeholders in.
    pub check_order: Vec<String>,
    pub entry: String,
}

/// Loads `entry` and every module it transitively imports, via `host`.
/// `entry` is taken as an already-resolved path — unlike imports discovered
/// along the way, the entry point has no `referrer` to resolve it against.
pub fn load_graph(host: &dyn Host, entry: &str, options: &CompilerOptions, atoms: &mut Interner) -> (ModuleGraph, DiagnosticBag) {
    let _span = tracing::debug_span!("ModuleGraph::load", entry).entered();
    let mut diagnostics = DiagnosticBag::new();
    let mut modules: ModuleMap = FxHashMap::default();
    let mut discovery_order: Vec<String> = Vec::new();
    let mut seen: FxHashSet<String> = FxHashSet::default();
    let mut queue: VecDeque<String> = VecDeque::new();

    seen.insert(entry.to_string());
    queue.push_back(entry.to_string());

    while let Some(path) = queue.pop_front() {
        if discovery_order.len() >= zena_common::limits::MAX_MODULES {
            diagnostics.error(
                codes::INTERNAL_ERROR,
                format!("module graph exceeded {} modules", zena_common::limits::MAX_MODULES),
                Span::dummy(),
            );
            break;
        }

        let source = match host.load(&path) {
            Ok(source) => source,
            Err(err) => {
                diagnostics.error(codes::MODULE_NOT_FOUND, format!("cannot load module '{path}': {err}"), Span::dummy());
                continue;
            }
        };

        let (arena, program, mut module_diagnostics) = zena_parser::parse_module(&source, atoms);
        let is_stdlib = options.is_stdlib_path(&path);

        let mut imports = Vec::new();
        if let NodeKind::Program { statements } = arena.kind(program) {
            for &stmt_id in statements {
                let NodeKind::ImportDecl { specifier, .. } = arena.kind(stmt_id) else {
                    continue;
                };
                let specifier_text = atoms.resolve(*specifier).to_string();
                match host.resolve(&specifier_text, &path) {
                    Ok(resolved) => {
                        if seen.insert(resolved.clone()) {
                            queue.push_back(resolved.clone());
                        }
                        imports.push((specifier_text, resolved));
                    }
                    Err(err) => {
                        module_diagnostics.error(
                            codes::MODULE_NOT_FOUND,
                            format!("cannot resolve '{specifier_text}' from '{path}': {err}"),
                            arena.span(stmt_id),
                        );
                    }
                }
            }
        }

        discovery_order.push(path.clone());
        modules.insert(
            path.clone(),
            ModuleRecord { path, source, arena, program, is_stdlib, imports, diagnostics: module_diagnostics },
        );
    }

    let check_order = topological_order(&modules, &discovery_order);
    (ModuleGraph { modules, check_order, entry: entry.to_string() }, diagnostics)
}

/// Kahn's algorithm over the import graph (edges point from a dependency
/// to the modules that depend on it). A module whose dependencies all
/// precede it is ready to check; residual members of a true cycle — which
/// has no topological order — are appended in discovery order, which is
/// at least deterministic.
fn topological_order(modules: &ModuleMap, discovery_order: &[String]) -> Vec<String> {
    let mut in_degree: FxHashMap<&str, u32> = FxHashMap::default();
    let mut dependents: FxHashMap<&str, Vec<&str>> = FxHashMap::default();

    for path in discovery_order {
        in_degree.entry(path.as_str()).or_insert(0);
    }
    for path in discovery_order {
        let module = &modules[path];
        for (_, dep_path) in &module.imports {
            if let Some(dep) = modules.get(dep_path) {
                if dep.path != *path {
                    *in_degree.entry(path.as_str()).or_insert(0) += 1;
                    dependents.entry(dep.path.as_str()).or_default().push(path.as_str());
                }
            }
        }
    }

    let mut queue: VecDeque<&str> =
        discovery_order.iter().map(String::as_str).filter(|p| in_degree[p] == 0).collect();
    let mut visited: FxHashSet<&str> = FxHashSet::default();
    let mut result = Vec::with_capacity(discovery_order.len());

    while let Some(path) = queue.pop_front() {
        if !visited.insert(path) {
            continue;
        }
        result.push(path.to_string());
        if let Some(deps) = dependents.get(path) {
            for &dependent in deps {
                let remaining = in_degree.get_mut(dependent).expect("dependent tracked in in_degree");
                *remaining -= 1;
                if *remaining == 0 {
                    queue.push_back(dependent);
                }
            }
        }
    }

    for path in discovery_order {
        if !visited.contains(path.as_str()) {
            result.push(path.clone());
        }
    }
    result
}
