//! `Checker` — the per-module type checker. `Checker::for_module` is the
//! one canonical entry point (see DESIGN.md): there is no whole-program
//! constructor, only a module-scoped one, called once per module in the
//! loader's topological order by the orchestrating `Compiler::compile`.

use rustc_hash::{FxHashMap, FxHashSet};
use zena_ast::NodeId;
use zena_common::{Atom, DiagnosticBag, diagnostics::codes};
use zena_loader::ModuleRecord;
use zena_types::{ClassId, InterfaceId, MixinId, TypeId};

use crate::context::{Binding, Resolution, Scope, ScopeKind};
use crate::shared::CheckerShared;

#[derive(Clone, Debug, Default)]
pub struct CaptureInfo {
    pub captures: FxHashSet<Atom>,
    pub mutable_captures: FxHashSet<Atom>,
}

/// One active function/arrow body's capture bookkeeping. `entry_depth`
/// is the scope-stack index of the
/// function's own top-level scope: a name resolved at an index strictly
/// less than this was free in the function, hence captured.
pub(crate) struct FunctionCaptureCtx {
    pub entry_depth: usize,
    pub captures: FxHashSet<Atom>,
    pub mutable_captures: FxHashSet<Atom>,
}

pub struct Checker<'a> {
    pub shared: &'a mut CheckerShared,
    pub module_path: String,
    pub is_stdlib: bool,
    pub is_prelude: bool,
    pub scopes: Vec<Scope>,
    pub node_types: FxHashMap<NodeId, TypeId>,
    pub resolutions: FxHashMap<NodeId, Resolution>,
    pub used_prelude_symbols: FxHashSet<Atom>,
    pub diagnostics: DiagnosticBag,
    pub exports: FxHashMap<Atom, Binding>,
    /// Keyed by the function/arrow body's own node, not the declaration —
    /// a capture is a property of the closure body, computed in one
    /// post-order walk once the body has been checked.
    pub captures: FxHashMap<NodeId, CaptureInfo>,
    /// Active function/arrow bodies, innermost last. Populated by
    /// `crate::capture::push_capture_ctx`/`finish_capture_ctx` around every
    /// function-like body the checker descends into.
    pub(crate) function_ctx_stack: Vec<FunctionCaptureCtx>,
    pub class_ids: FxHashMap<Atom, ClassId>,
    pub interface_ids: FxHashMap<Atom, InterfaceId>,
    pub mixin_ids: FxHashMap<Atom, MixinId>,
    pub(crate) imported_names: FxHashSet<Atom>,
    pub(crate) current_class: Vec<TypeId>,
    pub(crate) loop_depth: u32,
    pub(crate) function_depth: u32,
}

impl<'a> Checker<'a> {
    /// Builds a checker for one module, binding its `import` clauses
    /// against whatever dependencies have already been fully checked.
    pub fn for_module(module: &ModuleRecord, shared: &'a mut CheckerShared) -> Self {
        let mut checker = Checker {
            shared,
            module_path: module.path.clone(),
            is_stdlib: module.is_stdlib,
            is_prelude: false,
            scopes: vec![Scope::new(ScopeKind::Module)],
            node_types: FxHashMap::default(),
            resolutions: FxHashMap::default(),
            used_prelude_symbols: FxHashSet::default(),
            diagnostics: DiagnosticBag::new(),
            exports: FxHashMap::default(),
            captures: FxHashMap::default(),
            function_ctx_stack: Vec::new(),
            class_ids: FxHashMap::default(),
            interface_ids: FxHashMap::default(),
            mixin_ids: FxHashMap::default(),
            imported_names: FxHashSet::default(),
            current_class: Vec::new(),
            loop_depth: 0,
            function_depth: 0,
        };
        checker.install_imports(module);
        checker
    }

    /// Like [`Self::for_module`], but marks the module as a prelude module:
    /// its own `resolve` never falls back to `shared.prelude`, since a
    /// prelude module only ever sees the prelude declared before it (which
    /// the orchestrator supplies by having already merged earlier prelude
    /// modules' exports into `shared.prelude` before calling this).
    pub fn for_prelude_module(module: &ModuleRecord, shared: &'a mut CheckerShared) -> Self {
        let mut checker = Checker::for_module(module, shared);
        checker.is_prelude = true;
        checker
    }

    /// Runs both checking passes for `module` in order, then publishes its
    /// exports into `shared.module_exports` for later modules to import.
    pub fn run(&mut self, module: &ModuleRecord) {
        let _span = tracing::debug_span!("Checker::check_module", module = %self.module_path).entered();
        self.predeclare(module.program, &module.arena);
        self.check(module.program, &module.arena);
        self.shared.module_exports.insert(self.module_path.clone(), self.exports.clone());
    }

    fn install_imports(&mut self, module: &ModuleRecord) {
        use zena_ast::NodeKind;
        let arena = &module.arena;
        let NodeKind::Program { statements } = arena.kind(module.program) else {
            return;
        };
        for &stmt_id in statements {
            let NodeKind::ImportDecl { specifier, clauses } = arena.kind(stmt_id) else {
                continue;
            };
            let specifier_text = self.shared.atoms.resolve(*specifier).to_string();
            let Some(dep_path) = module.resolved_import(&specifier_text) else {
                continue;
            };
            let dep_path = dep_path.to_string();
            for &clause_id in clauses {
                let NodeKind::ImportSpecifier { imported, local } = arena.kind(clause_id) else {
                    continue;
                };
                let (imported, local) = (*imported, *local);
                let binding = self
                    .shared
                    .module_exports
                    .get(&dep_path)
                    .and_then(|exports| exports.get(&imported))
                    .cloned();
                match binding {
                    Some(binding) => {
                        self.declare(local, binding, arena.span(clause_id));
                        self.imported_names.insert(local);
                    }
                    None => {
                        let name = self.shared.atoms.resolve(imported).to_string();
                        self.diagnostics.error(
                            codes::SYMBOL_NOT_FOUND,
                            format!("module '{dep_path}' has no export '{name}'"),
                            arena.span(clause_id),
                        );
                    }
                }
            }
        }
    }

    // ── Scope management ────────────────────────────────────────────

    pub fn push_scope(&mut self, kind: ScopeKind) {
        self.scopes.push(Scope::new(kind));
    }

    pub fn pop_scope(&mut self) -> Scope {
        self.scopes.pop().expect("scope stack never empties below the module scope")
    }

    /// Binds `name` in the innermost scope. A duplicate non-function
    /// declaration in the same scope is `DuplicateDeclaration`; a second
    /// function declaration with the same name is treated as an overload
    /// instead and never reaches this path — see
    /// `crate::decl::predeclare_function`.
    pub fn declare(&mut self, name: Atom, binding: Binding, span: zena_common::Span) {
        let scope = self.scopes.last_mut().expect("module scope always present");
        if scope.bindings.contains_key(&name) {
            let text = self.shared.atoms.resolve(name).to_string();
            self.diagnostics.error(codes::DUPLICATE_DECLARATION, format!("'{text}' is already declared"), span);
            return;
        }
        scope.bindings.insert(name, binding);
    }

    /// Overwrites (or inserts) a binding without the duplicate check —
    /// used to replace a pre-declaration placeholder with its final type.
    pub fn redeclare(&mut self, name: Atom, binding: Binding) {
        let scope = self.scopes.last_mut().expect("module scope always present");
        scope.bindings.insert(name, binding);
    }

    pub fn resolve(&mut self, name: Atom) -> Option<(Binding, Resolution)> {
        self.resolve_with_depth(name, false).map(|(binding, resolution, _)| (binding, resolution))
    }

    /// Like [`Self::resolve`], but also feeds the scope-stack index the
    /// name was found at into capture analysis (`is_write` marks an
    /// assignment target, which additionally records a *mutable* capture).
    pub(crate) fn resolve_with_depth(&mut self, name: Atom, is_write: bool) -> Option<(Binding, Resolution, Option<usize>)> {
        for idx in (0..self.scopes.len()).rev() {
            if let Some(binding) = self.scopes[idx].bindings.get(&name) {
                let kind = if self.imported_names.contains(&name) { Resolution::Import } else { Resolution::Local };
                let binding = binding.clone();
                self.record_capture(name, idx, is_write);
                return Some((binding, kind, Some(idx)));
            }
        }
        if !self.is_prelude {
            if let Some(binding) = self.shared.prelude.get(&name) {
                self.used_prelude_symbols.insert(name);
                return Some((binding.clone(), Resolution::Prelude, None));
            }
        }
        None
    }

    /// Look up a class-like binding (class, interface or mixin) purely by
    /// name, without recording a prelude-usage hit — used for literal
    /// typing (e.g. string/template literals resolving the prelude's
    /// `String` class) where absence is expected and not an error.
    pub fn try_resolve_quietly(&self, name: Atom) -> Option<TypeId> {
        for scope in self.scopes.iter().rev() {
            if let Some(binding) = scope.bindings.get(&name) {
                return Some(binding.ty);
            }
        }
        self.shared.prelude.get(&name).map(|b| b.ty)
    }

    pub fn record_type(&mut self, node: NodeId, ty: TypeId) -> TypeId {
        self.node_types.insert(node, ty);
        ty
    }

    pub fn current_class(&self) -> Option<TypeId> {
        self.current_class.last().copied()
    }
}
