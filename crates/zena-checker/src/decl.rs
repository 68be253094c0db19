//! Declarations: the pre-declaration pass (placeholders for forward
//! references) and the main pass that fills classes/interfaces/mixins in
//! and checks function bodies.
//!
//! `predeclare`/`check` are written against a statement *list* rather than
//! hard-coded to a module's top-level `Program`, so [`crate::stmt`] can
//! reuse the exact same two-tier logic for a nested block that locally
//! declares a class or function (pre-declaration is normally described as
//! a top-level-only pass; zena extends the same forward-reference
//! convenience to block scopes, which costs nothing extra to support here).

use rustc_hash::FxHashMap;
use zena_ast::{NodeArena, NodeId, NodeKind, NodeList};
use zena_common::diagnostics::codes;
use zena_types::{ClassData, FieldInfo, FunctionKey, InterfaceData, MixinData, TypeId, TypeKey};

use crate::checker::Checker;
use crate::context::{Binding, BindingKind, ScopeKind};

impl<'a> Checker<'a> {
    pub fn predeclare(&mut self, program: NodeId, arena: &NodeArena) {
        let NodeKind::Program { statements } = arena.kind(program) else {
            return;
        };
        let statements = statements.clone();
        self.predeclare_statements(&statements, arena);
    }

    pub(crate) fn predeclare_statements(&mut self, statements: &NodeList, arena: &NodeArena) {
        for &stmt in statements {
            self.reserve_type_introducing(stmt, arena);
        }
        for &stmt in statements {
            self.predeclare_function_like(stmt, arena);
        }
    }

    fn reserve_type_introducing(&mut self, stmt: NodeId, arena: &NodeArena) {
        match arena.kind(stmt).clone() {
            NodeKind::ClassDecl { name, .. } => {
                let (class_id, ty) = self.shared.interner.reserve_class(name);
                self.class_ids.insert(name, class_id);
                self.declare(name, Binding { ty, kind: BindingKind::Type, declared_at: stmt }, arena.span(stmt));
            }
            NodeKind::InterfaceDecl { name, .. } => {
                let (interface_id, ty) = self.shared.interner.reserve_interface(name);
                self.interface_ids.insert(name, interface_id);
                self.declare(name, Binding { ty, kind: BindingKind::Type, declared_at: stmt }, arena.span(stmt));
            }
            NodeKind::MixinDecl { name, .. } => {
                let (mixin_id, ty) = self.shared.interner.reserve_mixin(name);
                self.mixin_ids.insert(name, mixin_id);
                self.declare(name, Binding { ty, kind: BindingKind::Type, declared_at: stmt }, arena.span(stmt));
            }
            NodeKind::TypeAliasDecl { name, .. } => {
                self.declare(name, Binding { ty: TypeId::ANY, kind: BindingKind::Type, declared_at: stmt }, arena.span(stmt));
            }
            NodeKind::SymbolDecl { name, .. } => {
                let ty = self.shared.interner.fresh_symbol(name);
                self.declare(name, Binding { ty, kind: BindingKind::Type, declared_at: stmt }, arena.span(stmt));
            }
            _ => {}
        }
    }

    fn predeclare_function_like(&mut self, stmt: NodeId, arena: &NodeArena) {
        match arena.kind(stmt).clone() {
            NodeKind::FunctionDecl { name, type_params, params, return_type, .. } => {
                let ty = self.resolve_signature(&type_params, &params, return_type, arena);
                self.declare_or_overload(name, ty, stmt, arena);
            }
            NodeKind::DeclareFunctionDecl { name, type_params, params, return_type, .. } => {
                let ty = self.resolve_signature(&type_params, &params, return_type, arena);
                self.declare_or_overload(name, ty, stmt, arena);
            }
            _ => {}
        }
    }

    /// Resolves a function-like declaration's signature into a `Function`
    /// `TypeId`, in a scope holding its own type parameters.
    fn resolve_signature(&mut self, type_params: &NodeList, params: &NodeList, return_type: Option<NodeId>, arena: &NodeArena) -> TypeId {
        self.push_scope(ScopeKind::Function);
        let type_param_tys: Vec<TypeId> = type_params.iter().map(|&tp| self.declare_type_param(tp, arena)).collect();
        let param_tys: Vec<TypeId> = params
            .iter()
            .map(|&p| match arena.kind(p) {
                NodeKind::Param { type_ann: Some(t), .. } => self.resolve_type_ann(*t, arena),
                _ => TypeId::ANY,
            })
            .collect();
        let return_ty = return_type.map(|t| self.resolve_type_ann(t, arena)).unwrap_or(TypeId::VOID);
        self.pop_scope();
        self.shared.interner.intern_function(type_param_tys, param_tys, return_ty)
    }

    /// A function name seen a second time in the same scope becomes an
    /// overload rather than a `DuplicateDeclaration`.
    fn declare_or_overload(&mut self, name: zena_common::Atom, ty: TypeId, stmt: NodeId, arena: &NodeArena) {
        let scope = self.scopes.last_mut().expect("module scope always present");
        if let Some(existing) = scope.bindings.get(&name) {
            if matches!(self.shared.interner.key(existing.ty), TypeKey::Function(_)) {
                scope.overloads.entry(name).or_default().push(ty);
                return;
            }
        }
        self.declare(name, Binding { ty, kind: BindingKind::ValueLet, declared_at: stmt }, arena.span(stmt));
    }

    pub fn check(&mut self, program: NodeId, arena: &NodeArena) {
        let NodeKind::Program { statements } = arena.kind(program) else {
            return;
        };
        let statements = statements.clone();
        let mut unused = Vec::new();
        self.check_statements(&statements, None, &mut unused, arena);
    }

    pub(crate) fn check_statements(&mut self, statements: &NodeList, expected_return: Option<TypeId>, collected: &mut Vec<TypeId>, arena: &NodeArena) {
        for &stmt in statements {
            self.check_any_stmt(stmt, expected_return, collected, arena);
        }
    }

    pub(crate) fn check_any_stmt(&mut self, stmt: NodeId, expected_return: Option<TypeId>, collected: &mut Vec<TypeId>, arena: &NodeArena) {
        match arena.kind(stmt).clone() {
            NodeKind::ClassDecl { .. } => self.check_class_decl(stmt, arena),
            NodeKind::InterfaceDecl { .. } => self.check_interface_decl(stmt, arena),
            NodeKind::MixinDecl { .. } => self.check_mixin_decl(stmt, arena),
            NodeKind::TypeAliasDecl { name, type_params, type_ann, is_exported } => {
                self.push_scope(ScopeKind::Block);
                for &tp in &type_params {
                    self.declare_type_param(tp, arena);
                }
                let resolved = self.resolve_type_ann(type_ann, arena);
                self.pop_scope();
                self.redeclare(name, Binding { ty: resolved, kind: BindingKind::Type, declared_at: stmt });
                if is_exported {
                    self.export(name, Binding { ty: resolved, kind: BindingKind::Type, declared_at: stmt });
                }
            }
            NodeKind::SymbolDecl { name, is_exported } => {
                if is_exported {
                    if let Some((binding, _)) = self.resolve(name) {
                        self.export(name, binding);
                    }
                }
            }
            NodeKind::FunctionDecl { name, params, body, decorators, is_exported, .. } => {
                self.check_decorators(&decorators, false, arena.span(stmt), arena);
                self.check_function_decl(stmt, name, &params, body, arena);
                if is_exported {
                    if let Some((binding, _)) = self.resolve(name) {
                        self.export(name, binding);
                    }
                }
            }
            NodeKind::DeclareFunctionDecl { name, decorators, is_exported, .. } => {
                self.check_decorators(&decorators, true, arena.span(stmt), arena);
                if is_exported {
                    if let Some((binding, _)) = self.resolve(name) {
                        self.export(name, binding);
                    }
                }
            }
            NodeKind::ImportDecl { .. } | NodeKind::ImportSpecifier { .. } => {}
            _ => self.check_plain_stmt(stmt, expected_return, collected, arena),
        }
    }

    pub(crate) fn export(&mut self, name: zena_common::Atom, binding: Binding) {
        self.exports.insert(name, binding);
    }

    fn check_class_decl(&mut self, stmt: NodeId, arena: &NodeArena) {
        let NodeKind::ClassDecl {
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
        } = arena.kind(stmt).clone()
        else {
            return;
        };
        let class_id = *self.class_ids.get(&name).expect("class reserved during predeclare");

        self.push_scope(ScopeKind::Class);
        let type_param_tys: Vec<TypeId> = type_params.iter().map(|&tp| self.declare_type_param(tp, arena)).collect();
        let superclass_ty = superclass.map(|s| self.resolve_type_ann(s, arena));
        let implements_tys: Vec<TypeId> = implements.iter().map(|&i| self.resolve_type_ann(i, arena)).collect();
        let mixins_tys: Vec<TypeId> = mixins.iter().map(|&m| self.resolve_type_ann(m, arena)).collect();
        let on_type_ty = on_type.map(|t| self.resolve_type_ann(t, arena));

        let self_ty = self.shared.interner.instantiate_class(class_id, type_param_tys.clone());
        self.current_class.push(on_type_ty.unwrap_or(self_ty));

        let mut fields = Vec::new();
        let mut methods = Vec::new();
        let mut statics = Vec::new();
        let mut abstract_methods = Vec::new();
        for &member_id in &members {
            match arena.kind(member_id).clone() {
                NodeKind::FieldMember { name, type_ann, init, is_static, .. } => {
                    if is_extension {
                        self.diagnostics.error(codes::EXTENSION_CLASS_FIELD, "extension classes cannot declare fields", arena.span(member_id));
                    }
                    let declared = type_ann.map(|t| self.resolve_type_ann(t, arena));
                    let init_ty = init.map(|i| self.check_expr(i, arena));
                    let field_ty = declared.or(init_ty).unwrap_or(TypeId::ANY);
                    if let (Some(d), Some(i)) = (declared, init_ty) {
                        if !zena_types::is_assignable(&self.shared.interner, i, d) {
                            self.diagnostics.error(codes::TYPE_MISMATCH, "field initializer is not assignable to its declared type", arena.span(member_id));
                        }
                    }
                    let optional = declared.is_none() && init.is_none();
                    let info = FieldInfo { ty: field_ty, optional };
                    if is_static {
                        statics.push((name, field_ty));
                    } else {
                        fields.push((name, info));
                    }
                }
                NodeKind::MethodMember { name, type_params, params, return_type, body, is_static, is_constructor, is_abstract: is_abstract_method, .. } => {
                    self.push_scope(ScopeKind::Function);
                    let method_type_params: Vec<TypeId> = type_params.iter().map(|&tp| self.declare_type_param(tp, arena)).collect();
                    let mut param_tys = Vec::with_capacity(params.len());
                    for &param_id in &params {
                        if let NodeKind::Param { pattern, type_ann, .. } = arena.kind(param_id).clone() {
                            let param_ty = type_ann.map(|t| self.resolve_type_ann(t, arena)).unwrap_or(TypeId::ANY);
                            self.bind_pattern(pattern, param_ty, BindingKind::ValueLet, arena);
                            param_tys.push(param_ty);
                        }
                    }
                    let declared_return = return_type.map(|t| self.resolve_type_ann(t, arena));
                    let mut collected_returns = Vec::new();
                    if let Some(body_id) = body {
                        self.function_depth += 1;
                        self.check_any_stmt(body_id, declared_return, &mut collected_returns, arena);
                        self.function_depth -= 1;
                    }
                    let return_ty = declared_return.unwrap_or_else(|| self.shared.interner.union(collected_returns).unwrap_or(TypeId::VOID));
                    self.pop_scope();
                    let method_ty = self.shared.interner.intern_function(method_type_params, param_tys, return_ty);
                    if is_constructor {
                        if let Some(body_id) = body {
                            self.check_constructor_assignment(body_id, &fields, arena);
                        }
                    }
                    if is_static {
                        statics.push((name, method_ty));
                    } else {
                        methods.push((name, method_ty));
                        if is_abstract_method {
                            abstract_methods.push(name);
                        }
                    }
                }
                NodeKind::AccessorMember { name, type_ann, getter_body, setter_param, setter_body, is_static, .. } => {
                    let declared = type_ann.map(|t| self.resolve_type_ann(t, arena)).unwrap_or(TypeId::ANY);
                    if let Some(body_id) = getter_body {
                        self.function_depth += 1;
                        self.check_any_stmt(body_id, Some(declared), &mut Vec::new(), arena);
                        self.function_depth -= 1;
                    }
                    if let Some(param_id) = setter_param {
                        self.push_scope(ScopeKind::Function);
                        if let NodeKind::Param { pattern, .. } = arena.kind(param_id).clone() {
                            self.bind_pattern(pattern, declared, BindingKind::ValueLet, arena);
                        }
                        if let Some(body_id) = setter_body {
                            self.function_depth += 1;
                            self.check_any_stmt(body_id, Some(TypeId::VOID), &mut Vec::new(), arena);
                            self.function_depth -= 1;
                        }
                        self.pop_scope();
                    }
                    if is_static {
                        statics.push((name, declared));
                    } else {
                        fields.push((name, FieldInfo { ty: declared, optional: false }));
                    }
                }
                _ => {}
            }
        }
        self.current_class.pop();
        self.pop_scope();

        self.shared.interner.fill_class(
            class_id,
            ClassData {
                name,
                type_params: type_param_tys,
                superclass: superclass_ty,
                implements: implements_tys,
                mixins: mixins_tys,
                fields,
                methods,
                statics,
                is_final,
                is_abstract,
                is_extension,
                on_type: on_type_ty,
                overloads: FxHashMap::default(),
                abstract_methods,
            },
        );

        if !is_abstract {
            let unimplemented = self.abstract_surface(self_ty);
            if !unimplemented.is_empty() {
                let mut names: Vec<String> = unimplemented.iter().map(|n| self.shared.atoms.resolve(*n).to_string()).collect();
                names.sort();
                self.diagnostics.error(
                    codes::ABSTRACT_METHOD_NOT_IMPLEMENTED,
                    format!("class does not implement abstract method(s): {}", names.join(", ")),
                    arena.span(stmt),
                );
            }
        }

        if is_exported {
            if let Some((binding, _)) = self.resolve(name) {
                self.export(name, binding);
            }
        }
    }

    /// Collects the set of abstract method names a class still owes an
    /// implementation for: every abstract method declared by the class
    /// itself or inherited from its superclass chain or implemented
    /// interfaces, minus whatever the class's own concrete `methods`
    /// already name.
    fn abstract_surface(&self, class_ty: TypeId) -> std::collections::HashSet<zena_common::Atom> {
        let TypeKey::Class(class_id, _) = self.shared.interner.key(class_ty).clone() else {
            return Default::default();
        };
        let data = self.shared.interner.class_data(class_id);
        let mut surface: std::collections::HashSet<zena_common::Atom> = data.abstract_methods.iter().copied().collect();
        if let Some(superclass) = data.superclass {
            surface.extend(self.abstract_surface(superclass));
        }
        for &implemented in &data.implements {
            if let TypeKey::Interface(interface_id, _) = self.shared.interner.key(implemented).clone() {
                let iface = self.shared.interner.interface_data(interface_id);
                surface.extend(iface.methods.iter().map(|(name, _)| *name));
            }
        }
        let abstract_here: std::collections::HashSet<zena_common::Atom> = data.abstract_methods.iter().copied().collect();
        let concrete: std::collections::HashSet<zena_common::Atom> =
            data.methods.iter().map(|(name, _)| *name).filter(|name| !abstract_here.contains(name)).collect();
        surface.retain(|name| !concrete.contains(name));
        surface
    }

    /// Approximates the definite-assignment check: walks the
    /// constructor body's *top-level* statements for `this.field = ...`
    /// assignments (a full control-flow merge across every branch is not
    /// attempted), flagging any non-optional field that neither a
    /// top-level assignment nor its own declaration initializes.
    fn check_constructor_assignment(&mut self, body: NodeId, fields: &[(zena_common::Atom, FieldInfo)], arena: &NodeArena) {
        let NodeKind::Block { statements } = arena.kind(body) else {
            return;
        };
        let statements = statements.clone();
        let mut assigned: std::collections::HashSet<zena_common::Atom> = std::collections::HashSet::new();
        for &stmt in &statements {
            if let NodeKind::ExprStmt { expr } = arena.kind(stmt) {
                if let NodeKind::Assign { target, .. } = arena.kind(*expr) {
                    if let NodeKind::Member { object, name, .. } = arena.kind(*target) {
                        if matches!(arena.kind(*object), NodeKind::ThisExpr) {
                            assigned.insert(*name);
                        }
                    }
                }
            }
        }
        for (name, info) in fields {
            if info.optional || assigned.contains(name) {
                continue;
            }
            let text = self.shared.atoms.resolve(*name).to_string();
            self.diagnostics.error(codes::UNASSIGNED_FIELD, format!("field '{text}' is not assigned in every constructor path"), arena.span(body));
        }
    }

    fn check_interface_decl(&mut self, stmt: NodeId, arena: &NodeArena) {
        let NodeKind::InterfaceDecl { name, type_params, extends, members, is_exported } = arena.kind(stmt).clone() else {
            return;
        };
        let interface_id = *self.interface_ids.get(&name).expect("interface reserved during predeclare");
        self.push_scope(ScopeKind::Class);
        let type_param_tys: Vec<TypeId> = type_params.iter().map(|&tp| self.declare_type_param(tp, arena)).collect();
        let extends_tys: Vec<TypeId> = extends.iter().map(|&e| self.resolve_type_ann(e, arena)).collect();
        let mut fields = Vec::new();
        let mut methods = Vec::new();
        for &member_id in &members {
            match arena.kind(member_id).clone() {
                NodeKind::FieldMember { name, type_ann, .. } => {
                    let ty = type_ann.map(|t| self.resolve_type_ann(t, arena)).unwrap_or(TypeId::ANY);
                    fields.push((name, FieldInfo { ty, optional: false }));
                }
                NodeKind::MethodMember { name, type_params, params, return_type, .. } => {
                    self.push_scope(ScopeKind::Function);
                    let method_type_params: Vec<TypeId> = type_params.iter().map(|&tp| self.declare_type_param(tp, arena)).collect();
                    let param_tys: Vec<TypeId> = params
                        .iter()
                        .map(|&p| match arena.kind(p) {
                            NodeKind::Param { type_ann: Some(t), .. } => self.resolve_type_ann(*t, arena),
                            _ => TypeId::ANY,
                        })
                        .collect();
                    let return_ty = return_type.map(|t| self.resolve_type_ann(t, arena)).unwrap_or(TypeId::VOID);
                    self.pop_scope();
                    let method_ty = self.shared.interner.intern_function(method_type_params, param_tys, return_ty);
                    methods.push((name, method_ty));
                }
                _ => {}
            }
        }
        self.pop_scope();
        self.shared.interner.fill_interface(interface_id, InterfaceData { name, type_params: type_param_tys, extends: extends_tys, fields, methods });
        if is_exported {
            if let Some((binding, _)) = self.resolve(name) {
                self.export(name, binding);
            }
        }
    }

    fn check_mixin_decl(&mut self, stmt: NodeId, arena: &NodeArena) {
        let NodeKind::MixinDecl { name, type_params, on_constraint, members, is_exported } = arena.kind(stmt).clone() else {
            return;
        };
        let mixin_id = *self.mixin_ids.get(&name).expect("mixin reserved during predeclare");
        self.push_scope(ScopeKind::Class);
        let type_param_tys: Vec<TypeId> = type_params.iter().map(|&tp| self.declare_type_param(tp, arena)).collect();
        let on_constraint_ty = on_constraint.map(|c| self.resolve_type_ann(c, arena));
        let mut fields = Vec::new();
        let mut methods = Vec::new();
        for &member_id in &members {
            match arena.kind(member_id).clone() {
                NodeKind::FieldMember { name, type_ann, .. } => {
                    let ty = type_ann.map(|t| self.resolve_type_ann(t, arena)).unwrap_or(TypeId::ANY);
                    fields.push((name, FieldInfo { ty, optional: false }));
                }
                NodeKind::MethodMember { name, type_params, params, return_type, body, is_constructor, .. } => {
                    if is_constructor {
                        self.diagnostics.error(codes::CONSTRUCTOR_IN_MIXIN, "mixins cannot declare a constructor", arena.span(member_id));
                    }
                    self.push_scope(ScopeKind::Function);
                    let method_type_params: Vec<TypeId> = type_params.iter().map(|&tp| self.declare_type_param(tp, arena)).collect();
                    let mut param_tys = Vec::with_capacity(params.len());
                    for &param_id in &params {
                        if let NodeKind::Param { pattern, type_ann, .. } = arena.kind(param_id).clone() {
                            let param_ty = type_ann.map(|t| self.resolve_type_ann(t, arena)).unwrap_or(TypeId::ANY);
                            self.bind_pattern(pattern, param_ty, BindingKind::ValueLet, arena);
                            param_tys.push(param_ty);
                        }
                    }
                    let declared_return = return_type.map(|t| self.resolve_type_ann(t, arena));
                    let mut collected = Vec::new();
                    if let Some(body_id) = body {
                        self.function_depth += 1;
                        self.check_any_stmt(body_id, declared_return, &mut collected, arena);
                        self.function_depth -= 1;
                    }
                    let return_ty = declared_return.unwrap_or_else(|| self.shared.interner.union(collected).unwrap_or(TypeId::VOID));
                    self.pop_scope();
                    let method_ty = self.shared.interner.intern_function(method_type_params, param_tys, return_ty);
                    methods.push((name, method_ty));
                }
                _ => {}
            }
        }
        self.pop_scope();
        self.shared.interner.fill_mixin(mixin_id, MixinData { name, type_params: type_param_tys, on_constraint: on_constraint_ty, fields, methods });
        if is_exported {
            if let Some((binding, _)) = self.resolve(name) {
                self.export(name, binding);
            }
        }
    }

    /// Validates `@external`/`@intrinsic` decorators: a `declare function`
    /// needs exactly one of the two to be emittable; a plain `function`
    /// accepts neither. `@intrinsic`'s sole
    /// argument must name a `wasm.`-prefixed opcode.
    fn check_decorators(&mut self, decorators: &NodeList, is_declare: bool, span: zena_common::Span, arena: &NodeArena) {
        let mut has_external_or_intrinsic = false;
        for &decorator_id in decorators {
            let NodeKind::Decorator { name, args } = arena.kind(decorator_id).clone() else {
                continue;
            };
            let text = self.shared.atoms.resolve(name).to_string();
            match text.as_str() {
                "external" | "intrinsic" => {
                    if !is_declare {
                        self.diagnostics.error(
                            codes::DECORATOR_NOT_ALLOWED,
                            format!("@{text} is only allowed on a 'declare function'"),
                            arena.span(decorator_id),
                        );
                        continue;
                    }
                    has_external_or_intrinsic = true;
                    if text == "intrinsic" {
                        let opcode = args.first().and_then(|&a| match arena.kind(a) {
                            NodeKind::StringLit(s) => Some(self.shared.atoms.resolve(*s).to_string()),
                            _ => None,
                        });
                        match opcode {
                            Some(opcode) if opcode.starts_with("wasm.") => {}
                            _ => {
                                self.diagnostics.error(
                                    codes::UNKNOWN_INTRINSIC,
                                    "@intrinsic requires a single string argument naming a 'wasm.' opcode",
                                    arena.span(decorator_id),
                                );
                            }
                        }
                    }
                }
                _ => {
                    self.diagnostics.error(codes::DECORATOR_NOT_ALLOWED, format!("unknown decorator '@{text}'"), arena.span(decorator_id));
                }
            }
        }
        if is_declare && !has_external_or_intrinsic {
            self.diagnostics.error(codes::MISSING_EXTERNAL, "'declare function' requires an @external or @intrinsic decorator", span);
        }
    }

    fn check_function_decl(&mut self, stmt: NodeId, name: zena_common::Atom, params: &NodeList, body: Option<NodeId>, arena: &NodeArena) {
        let Some((binding, _)) = self.resolve(name) else {
            return;
        };
        let TypeKey::Function(func) = self.shared.interner.key(binding.ty).clone() else {
            return;
        };
        let FunctionKey { type_params, params: param_tys, return_type } = func;
        let Some(body_id) = body else {
            return;
        };
        self.push_scope(ScopeKind::Function);
        self.push_capture_ctx();
        for &tp in &type_params {
            if let Some(info) = self.shared.interner.type_param_info(tp) {
                self.declare(info.name, Binding { ty: tp, kind: BindingKind::Type, declared_at: stmt }, arena.span(stmt));
            }
        }
        for (&param_id, &param_ty) in params.iter().zip(param_tys.iter()) {
            if let NodeKind::Param { pattern, .. } = arena.kind(param_id).clone() {
                self.bind_pattern(pattern, param_ty, BindingKind::ValueLet, arena);
            }
        }
        let mut collected = Vec::new();
        self.function_depth += 1;
        self.check_any_stmt(body_id, Some(return_type), &mut collected, arena);
        self.function_depth -= 1;
        self.pop_scope();
        self.finish_capture_ctx(body_id);
    }
}
