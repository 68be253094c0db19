//! Expression typing. `Checker::check_expr` dispatches on every expression
//! `NodeKind`, records the result into `self.node_types`, and always
//! returns a `TypeId` — falling back to `any` alongside a diagnostic
//! rather than aborting the pass, per the diagnostics-as-values model.

use zena_ast::{BinaryOp, NodeArena, NodeId, NodeKind, RecordKey, UnaryOp};
use zena_common::diagnostics::codes;
use zena_types::{FieldInfo, FunctionKey, TypeId, TypeKey};

use crate::checker::Checker;
use crate::context::{BindingKind, Resolution};

impl<'a> Checker<'a> {
    pub fn check_expr(&mut self, node: NodeId, arena: &NodeArena) -> TypeId {
        let ty = self.check_expr_inner(node, arena);
        self.record_type(node, ty)
    }

    fn check_expr_inner(&mut self, node: NodeId, arena: &NodeArena) -> TypeId {
        match arena.kind(node).clone() {
            NodeKind::NumberLit(value) => {
                if value.fract() == 0.0 && value.abs() < i32::MAX as f64 {
                    TypeId::I32
                } else {
                    TypeId::F64
                }
            }
            NodeKind::StringLit(_) => self.string_class_type(),
            NodeKind::BoolLit(_) => TypeId::BOOL,
            NodeKind::NullLit => TypeId::NULL,
            NodeKind::Identifier(name) => self.check_identifier(name, node, arena),
            NodeKind::ThisExpr => self.current_class().unwrap_or_else(|| {
                self.diagnostics.error(codes::TYPE_MISMATCH, "'this' used outside a class or extension body", arena.span(node));
                TypeId::ANY
            }),
            NodeKind::SuperExpr => self.superclass_type(arena.span(node)),
            NodeKind::Binary { op, left, right } => self.check_binary(op, left, right, arena),
            NodeKind::Unary { op, operand } => self.check_unary(op, operand, arena),
            NodeKind::Assign { op, target, value } => self.check_assign(op, target, value, arena),
            NodeKind::Call { callee, type_args, args } => self.check_call(callee, &type_args, &args, arena),
            NodeKind::New { callee, type_args, args } => self.check_new(callee, &type_args, &args, arena),
            NodeKind::Member { object, name, is_optional, .. } => self.check_member(object, name, is_optional, node, arena),
            NodeKind::Index { object, index, is_optional } => self.check_index(object, index, is_optional, arena),
            NodeKind::FunctionExpr { type_params, params, return_type, body, is_body_block } => {
                self.check_function_expr(node, &type_params, &params, return_type, body, is_body_block, arena)
            }
            NodeKind::Match { scrutinee, arms } => self.check_match(scrutinee, &arms, arena),
            NodeKind::TemplateLiteral { substitutions, .. } => {
                for sub in substitutions {
                    self.check_expr(sub, arena);
                }
                self.string_class_type()
            }
            NodeKind::TaggedTemplate { tag, template } => {
                self.check_expr(template, arena);
                let tag_ty = self.check_expr(tag, arena);
                match self.shared.interner.key(tag_ty).clone() {
                    TypeKey::Function(func) => func.return_type,
                    TypeKey::Primitive(zena_ast::PrimitiveKind::Any) => TypeId::ANY,
                    _ => {
                        self.diagnostics.error(codes::NOT_CALLABLE, "tagged template requires a callable tag", arena.span(tag));
                        TypeId::ANY
                    }
                }
            }
            NodeKind::Cast { expr, type_ann } => {
                self.check_expr(expr, arena);
                self.resolve_type_ann(type_ann, arena)
            }
            NodeKind::IsCheck { expr, type_ann } => {
                self.check_expr(expr, arena);
                self.resolve_type_ann(type_ann, arena);
                TypeId::BOOL
            }
            NodeKind::RecordLit { fields } => self.check_record_lit(&fields, arena),
            NodeKind::TupleLit { elements } => {
                let elems: Vec<TypeId> = elements.iter().map(|&e| self.check_expr(e, arena)).collect();
                self.shared.interner.intern_tuple(elems)
            }
            NodeKind::UnboxedTupleLit { elements } => {
                let elems: Vec<TypeId> = elements.iter().map(|&e| self.check_expr(e, arena)).collect();
                self.shared.interner.intern_unboxed_tuple(elems)
            }
            NodeKind::HoleExpr => TypeId::ANY,
            _ => {
                self.diagnostics.error(codes::INTERNAL_ERROR, "expected an expression node", arena.span(node));
                TypeId::ANY
            }
        }
    }

    pub(crate) fn string_class_type(&mut self) -> TypeId {
        let name = self.shared.atoms.intern("String");
        self.try_resolve_quietly(name).unwrap_or(TypeId::ANY)
    }

    fn superclass_type(&mut self, span: zena_common::Span) -> TypeId {
        let Some(current) = self.current_class() else {
            self.diagnostics.error(codes::TYPE_MISMATCH, "'super' used outside a class body", span);
            return TypeId::ANY;
        };
        match self.shared.interner.key(current).clone() {
            TypeKey::Class(id, _) => self.shared.interner.class_data(id).superclass.unwrap_or(TypeId::ANY),
            _ => TypeId::ANY,
        }
    }

    fn check_identifier(&mut self, name: zena_common::Atom, node: NodeId, arena: &NodeArena) -> TypeId {
        match self.resolve(name) {
            Some((binding, resolution)) => {
                self.resolutions.insert(node, resolution);
                binding.ty
            }
            None => {
                self.resolutions.insert(node, Resolution::Unresolved);
                let text = self.shared.atoms.resolve(name).to_string();
                self.diagnostics.error(codes::SYMBOL_NOT_FOUND, format!("'{text}' not found"), arena.span(node));
                TypeId::ANY
            }
        }
    }

    fn check_binary(&mut self, op: BinaryOp, left: NodeId, right: NodeId, arena: &NodeArena) -> TypeId {
        let left_ty = self.check_expr(left, arena);
        let right_ty = self.check_expr(right, arena);
        use BinaryOp::*;
        match op {
            Eq | NotEq | Lt | Gt | LtEq | GtEq => TypeId::BOOL,
            And | Or => TypeId::BOOL,
            Add => {
                let string_ty = self.string_class_type();
                if left_ty == string_ty || right_ty == string_ty {
                    return string_ty;
                }
                self.numeric_result(left_ty, right_ty, arena.span(left))
            }
            Sub | Mul | Div | Mod | BitAnd | BitOr | BitXor | Shl | Shr | Ushr => {
                self.numeric_result(left_ty, right_ty, arena.span(left))
            }
        }
    }

    fn numeric_result(&mut self, left_ty: TypeId, right_ty: TypeId, span: zena_common::Span) -> TypeId {
        if left_ty == TypeId::ANY || right_ty == TypeId::ANY {
            return TypeId::ANY;
        }
        if zena_types::is_assignable(&self.shared.interner, left_ty, right_ty) {
            return right_ty;
        }
        if zena_types::is_assignable(&self.shared.interner, right_ty, left_ty) {
            return left_ty;
        }
        self.diagnostics.error(codes::TYPE_MISMATCH, "operands are not numerically compatible", span);
        TypeId::ANY
    }

    fn check_unary(&mut self, op: UnaryOp, operand: NodeId, arena: &NodeArena) -> TypeId {
        let operand_ty = self.check_expr(operand, arena);
        match op {
            UnaryOp::Not => TypeId::BOOL,
            UnaryOp::Neg | UnaryOp::BitNot => operand_ty,
        }
    }

    fn check_assign(&mut self, op: zena_ast::AssignOp, target: NodeId, value: NodeId, arena: &NodeArena) -> TypeId {
        let target_ty = self.check_assign_target(target, arena);
        let value_ty = self.check_expr(value, arena);
        if op == zena_ast::AssignOp::Assign {
            if !zena_types::is_assignable(&self.shared.interner, value_ty, target_ty) {
                self.diagnostics.error(codes::TYPE_MISMATCH, "value is not assignable to the target's type", arena.span(value));
            }
        } else {
            self.numeric_result(target_ty, value_ty, arena.span(value));
        }
        target_ty
    }

    fn check_assign_target(&mut self, target: NodeId, arena: &NodeArena) -> TypeId {
        if let NodeKind::Identifier(name) = arena.kind(target).clone() {
            match self.resolve_with_depth(name, true) {
                Some((binding, resolution, _)) => {
                    self.resolutions.insert(target, resolution);
                    if binding.kind == BindingKind::ValueLet {
                        let text = self.shared.atoms.resolve(name).to_string();
                        self.diagnostics.error(codes::TYPE_MISMATCH, format!("cannot assign to '{text}': declared with 'let'"), arena.span(target));
                    }
                    binding.ty
                }
                None => {
                    let text = self.shared.atoms.resolve(name).to_string();
                    self.diagnostics.error(codes::SYMBOL_NOT_FOUND, format!("'{text}' not found"), arena.span(target));
                    TypeId::ANY
                }
            }
        } else {
            self.check_expr(target, arena)
        }
    }

    fn check_call(&mut self, callee: NodeId, type_args: &zena_ast::NodeList, args: &zena_ast::NodeList, arena: &NodeArena) -> TypeId {
        let arg_tys: Vec<TypeId> = args.iter().map(|&a| self.check_expr(a, arena)).collect();
        let explicit_type_args: Vec<TypeId> = type_args.iter().map(|&t| self.resolve_type_ann(t, arena)).collect();

        if let NodeKind::Identifier(name) = arena.kind(callee).clone() {
            let candidates = self.overload_candidates(name);
            if candidates.is_empty() {
                self.check_identifier(name, callee, arena);
                return TypeId::ANY;
            }
            self.resolutions.insert(callee, Resolution::Local);
            return self.resolve_overload(&candidates, &arg_tys, &explicit_type_args, arena.span(callee));
        }

        let callee_ty = self.check_expr(callee, arena);
        self.call_function_type(callee_ty, &arg_tys, &explicit_type_args, arena.span(callee))
    }

    /// All signatures a name could resolve to at a call site: the binding
    /// itself plus any overloads recorded in whichever scope bound it —
    /// a second function declared with the same name is appended to the
    /// first's overload list rather than rejected.
    fn overload_candidates(&mut self, name: zena_common::Atom) -> Vec<TypeId> {
        for idx in (0..self.scopes.len()).rev() {
            if let Some(binding) = self.scopes[idx].bindings.get(&name) {
                let mut candidates = vec![binding.ty];
                if let Some(overloads) = self.scopes[idx].overloads.get(&name) {
                    candidates.extend(overloads.iter().copied());
                }
                self.record_capture(name, idx, false);
                return candidates;
            }
        }
        if !self.is_prelude {
            if let Some(binding) = self.shared.prelude.get(&name) {
                self.used_prelude_symbols.insert(name);
                return vec![binding.ty];
            }
        }
        Vec::new()
    }

    fn resolve_overload(&mut self, candidates: &[TypeId], arg_tys: &[TypeId], explicit_type_args: &[TypeId], span: zena_common::Span) -> TypeId {
        for &candidate in candidates {
            if let TypeKey::Function(func) = self.shared.interner.key(candidate).clone() {
                if func.params.len() == arg_tys.len()
                    && arg_tys.iter().zip(func.params.iter()).all(|(&a, &p)| zena_types::is_assignable(&self.shared.interner, a, p))
                {
                    return self.instantiate_call_return(&func, explicit_type_args);
                }
            }
        }
        self.diagnostics.error(codes::ARGUMENT_COUNT_MISMATCH, "no overload matches these arguments", span);
        TypeId::ANY
    }

    fn call_function_type(&mut self, callee_ty: TypeId, arg_tys: &[TypeId], explicit_type_args: &[TypeId], span: zena_common::Span) -> TypeId {
        match self.shared.interner.key(callee_ty).clone() {
            TypeKey::Function(func) => {
                if func.params.len() != arg_tys.len() {
                    self.diagnostics.error(codes::ARGUMENT_COUNT_MISMATCH, format!("expected {} argument(s), found {}", func.params.len(), arg_tys.len()), span);
                    return TypeId::ANY;
                }
                for (&arg, &param) in arg_tys.iter().zip(func.params.iter()) {
                    if !zena_types::is_assignable(&self.shared.interner, arg, param) {
                        self.diagnostics.error(codes::TYPE_MISMATCH, "argument is not assignable to the parameter's type", span);
                    }
                }
                self.instantiate_call_return(&func, explicit_type_args)
            }
            TypeKey::Primitive(zena_ast::PrimitiveKind::Any) => TypeId::ANY,
            _ => {
                self.diagnostics.error(codes::NOT_CALLABLE, "this expression is not callable", span);
                TypeId::ANY
            }
        }
    }

    fn instantiate_call_return(&mut self, func: &FunctionKey, explicit_type_args: &[TypeId]) -> TypeId {
        if func.type_params.is_empty() || explicit_type_args.len() != func.type_params.len() {
            return func.return_type;
        }
        let mut subst = rustc_hash::FxHashMap::default();
        for (&tp, &arg) in func.type_params.iter().zip(explicit_type_args.iter()) {
            if let Some(info) = self.shared.interner.type_param_info(tp) {
                subst.insert(info.name, arg);
            }
        }
        match zena_types::substitute(&mut self.shared.interner, func.return_type, &subst) {
            Ok(ty) => ty,
            Err(_) => func.return_type,
        }
    }

    fn check_new(&mut self, callee: NodeId, type_args: &zena_ast::NodeList, args: &zena_ast::NodeList, arena: &NodeArena) -> TypeId {
        let NodeKind::Identifier(name) = arena.kind(callee).clone() else {
            self.diagnostics.error(codes::INTERNAL_ERROR, "'new' callee must be an identifier", arena.span(callee));
            return TypeId::ANY;
        };
        let arg_tys: Vec<TypeId> = args.iter().map(|&a| self.check_expr(a, arena)).collect();
        let explicit_type_args: Vec<TypeId> = type_args.iter().map(|&t| self.resolve_type_ann(t, arena)).collect();

        let Some((binding, _)) = self.resolve(name) else {
            let text = self.shared.atoms.resolve(name).to_string();
            self.diagnostics.error(codes::SYMBOL_NOT_FOUND, format!("class '{text}' not found"), arena.span(callee));
            return TypeId::ANY;
        };
        let TypeKey::Class(class_id, _) = self.shared.interner.key(binding.ty).clone() else {
            let text = self.shared.atoms.resolve(name).to_string();
            self.diagnostics.error(codes::NOT_CALLABLE, format!("'{text}' is not a class"), arena.span(callee));
            return TypeId::ANY;
        };
        let data = self.shared.interner.class_data(class_id).clone();
        if data.is_abstract {
            let text = self.shared.atoms.resolve(name).to_string();
            self.diagnostics.error(codes::CANNOT_INSTANTIATE_ABSTRACT_CLASS, format!("cannot instantiate abstract class '{text}'"), arena.span(callee));
        }
        let new_name = self.shared.atoms.intern("new");
        let ctor = data.methods.iter().find(|(n, _)| *n == new_name).map(|(_, ty)| *ty);
        let instance_args = if !explicit_type_args.is_empty() && explicit_type_args.len() == data.type_params.len() {
            explicit_type_args
        } else {
            Vec::new()
        };
        let result_ty = if instance_args.is_empty() { binding.ty } else { self.shared.interner.instantiate_class(class_id, instance_args.clone()) };
        let ctor_subst = self.type_param_substitution(&data.type_params, &instance_args);
        let ctor = ctor.map(|ty| self.apply_substitution(ty, &ctor_subst));
        match ctor {
            Some(ctor_ty) => {
                if let TypeKey::Function(func) = self.shared.interner.key(ctor_ty).clone() {
                    if func.params.len() != arg_tys.len() {
                        self.diagnostics.error(
                            codes::ARGUMENT_COUNT_MISMATCH,
                            format!("expected {} argument(s), found {}", func.params.len(), arg_tys.len()),
                            arena.span(callee),
                        );
                    } else {
                        for (&arg, &param) in arg_tys.iter().zip(func.params.iter()) {
                            if !zena_types::is_assignable(&self.shared.interner, arg, param) {
                                self.diagnostics.error(codes::TYPE_MISMATCH, "argument is not assignable to the constructor parameter's type", arena.span(callee));
                            }
                        }
                    }
                }
            }
            None if !args.is_empty() => {
                self.diagnostics.error(codes::ARGUMENT_COUNT_MISMATCH, "class has no constructor but arguments were given", arena.span(callee));
            }
            None => {}
        }
        result_ty
    }

    fn check_member(&mut self, object: NodeId, name: zena_common::Atom, is_optional: bool, node: NodeId, arena: &NodeArena) -> TypeId {
        let object_ty = self.check_expr(object, arena);
        let found = self.lookup_member(object_ty, name);
        match found {
            Some(ty) => {
                if is_optional {
                    match self.shared.interner.union(vec![ty, TypeId::NULL]) {
                        Ok(u) => u,
                        Err(_) => ty,
                    }
                } else {
                    ty
                }
            }
            None if object_ty == TypeId::ANY => TypeId::ANY,
            None => {
                let text = self.shared.atoms.resolve(name).to_string();
                self.diagnostics.error(codes::PROPERTY_NOT_FOUND, format!("property '{text}' not found"), arena.span(node));
                TypeId::ANY
            }
        }
    }

    fn lookup_member(&mut self, object_ty: TypeId, name: zena_common::Atom) -> Option<TypeId> {
        match self.shared.interner.key(object_ty).clone() {
            TypeKey::Class(class_id, args) => {
                let subst = self.type_param_substitution(&self.shared.interner.class_data(class_id).type_params.clone(), &args);
                let data = self.shared.interner.class_data(class_id).clone();
                let found = data
                    .fields
                    .iter()
                    .find(|(n, _)| *n == name)
                    .map(|(_, info)| info.ty)
                    .or_else(|| data.methods.iter().find(|(n, _)| *n == name).map(|(_, ty)| *ty))
                    .or_else(|| data.statics.iter().find(|(n, _)| *n == name).map(|(_, ty)| *ty));
                match found {
                    Some(ty) => Some(self.apply_substitution(ty, &subst)),
                    None => data.superclass.and_then(|sup| {
                        let sup = self.apply_substitution(sup, &subst);
                        self.lookup_member(sup, name)
                    }),
                }
            }
            TypeKey::Interface(iface_id, args) => {
                let subst = self.type_param_substitution(&self.shared.interner.interface_data(iface_id).type_params.clone(), &args);
                let data = self.shared.interner.interface_data(iface_id).clone();
                data.fields
                    .iter()
                    .find(|(n, _)| *n == name)
                    .map(|(_, info)| info.ty)
                    .or_else(|| data.methods.iter().find(|(n, _)| *n == name).map(|(_, ty)| *ty))
                    .map(|ty| self.apply_substitution(ty, &subst))
            }
            TypeKey::Record(fields) => fields.iter().find(|(n, _)| *n == name).map(|(_, info)| info.ty),
            TypeKey::Primitive(zena_ast::PrimitiveKind::Any) => Some(TypeId::ANY),
            _ => None,
        }
    }

    /// Builds a type-parameter-name → argument substitution map for one
    /// generic instantiation site (substitution keyed by
    /// declared parameter name per `zena_types::substitute`'s own doc
    /// comment). Empty whenever the declaration takes no parameters or the
    /// reference to it is unparameterized (the raw generic declaration,
    /// still seen during the declaration's own body-checking).
    fn type_param_substitution(&self, type_params: &[TypeId], args: &[TypeId]) -> rustc_hash::FxHashMap<zena_common::Atom, TypeId> {
        let mut subst = rustc_hash::FxHashMap::default();
        if args.len() != type_params.len() {
            return subst;
        }
        for (&param, &arg) in type_params.iter().zip(args.iter()) {
            if let Some(info) = self.shared.interner.type_param_info(param) {
                subst.insert(info.name, arg);
            }
        }
        subst
    }

    /// Applies a type-parameter substitution, falling back to the
    /// unsubstituted type on a union-primitive violation — a generic
    /// declaration that would only go wrong for a specific argument is
    /// caught earlier, at the annotation/instantiation site that supplied
    /// that argument (`type_ann.rs`'s `resolve_named_type`).
    fn apply_substitution(&mut self, ty: TypeId, subst: &rustc_hash::FxHashMap<zena_common::Atom, TypeId>) -> TypeId {
        if subst.is_empty() {
            return ty;
        }
        zena_types::substitute(&mut self.shared.interner, ty, subst).unwrap_or(ty)
    }

    fn check_index(&mut self, object: NodeId, index: NodeId, is_optional: bool, arena: &NodeArena) -> TypeId {
        let object_ty = self.check_expr(object, arena);
        self.check_expr(index, arena);
        let result = match self.shared.interner.key(object_ty).clone() {
            TypeKey::Array(elem) => Some(elem),
            TypeKey::ByteArray => Some(TypeId::U32),
            TypeKey::Tuple(elems) | TypeKey::UnboxedTuple(elems) => match arena.kind(index) {
                NodeKind::NumberLit(n) if *n >= 0.0 => elems.get(*n as usize).copied(),
                _ => None,
            },
            TypeKey::Primitive(zena_ast::PrimitiveKind::Any) => Some(TypeId::ANY),
            _ => None,
        };
        match result {
            Some(ty) => {
                if is_optional {
                    self.shared.interner.union(vec![ty, TypeId::NULL]).unwrap_or(ty)
                } else {
                    ty
                }
            }
            None if object_ty == TypeId::ANY => TypeId::ANY,
            None => {
                self.diagnostics.error(codes::NOT_INDEXABLE, "this expression cannot be indexed", arena.span(object));
                TypeId::ANY
            }
        }
    }

    fn check_function_expr(
        &mut self,
        _node: NodeId,
        type_params: &zena_ast::NodeList,
        params: &zena_ast::NodeList,
        return_type: Option<NodeId>,
        body: NodeId,
        is_body_block: bool,
        arena: &NodeArena,
    ) -> TypeId {
        self.push_scope(crate::context::ScopeKind::Function);
        self.push_capture_ctx();
        let type_param_tys: Vec<TypeId> = type_params.iter().map(|&tp| self.declare_type_param(tp, arena)).collect();
        let mut param_tys = Vec::with_capacity(params.len());
        for &param_id in params {
            let NodeKind::Param { pattern, type_ann, default, .. } = arena.kind(param_id).clone() else {
                continue;
            };
            let param_ty = type_ann.map(|t| self.resolve_type_ann(t, arena)).unwrap_or(TypeId::ANY);
            if let Some(default_expr) = default {
                let default_ty = self.check_expr(default_expr, arena);
                if !zena_types::is_assignable(&self.shared.interner, default_ty, param_ty) {
                    self.diagnostics.error(codes::TYPE_MISMATCH, "default value is not assignable to the parameter's type", arena.span(default_expr));
                }
            }
            self.bind_pattern(pattern, param_ty, BindingKind::ValueLet, arena);
            param_tys.push(param_ty);
        }

        let declared_return = return_type.map(|t| self.resolve_type_ann(t, arena));
        let return_ty = if is_body_block {
            let expected = declared_return;
            let mut collected = Vec::new();
            self.check_block_collecting_returns(body, expected, &mut collected, arena);
            match declared_return {
                Some(declared) => declared,
                None => self.shared.interner.union(collected).unwrap_or(TypeId::ANY),
            }
        } else {
            let actual = self.check_expr(body, arena);
            if let Some(declared) = declared_return {
                if !zena_types::is_assignable(&self.shared.interner, actual, declared) {
                    self.diagnostics.error(codes::TYPE_MISMATCH, "arrow body is not assignable to the declared return type", arena.span(body));
                }
                declared
            } else {
                actual
            }
        };

        self.pop_scope();
        self.finish_capture_ctx(body);
        self.shared.interner.intern_function(type_param_tys, param_tys, return_ty)
    }

    fn check_match(&mut self, scrutinee: NodeId, arms: &zena_ast::NodeList, arena: &NodeArena) -> TypeId {
        let scrutinee_ty = self.check_expr(scrutinee, arena);
        let mut arm_tys = Vec::with_capacity(arms.len());
        for &arm_id in arms {
            let NodeKind::MatchArm { pattern, guard, body } = arena.kind(arm_id).clone() else {
                continue;
            };
            self.push_scope(crate::context::ScopeKind::Block);
            self.bind_pattern(pattern, scrutinee_ty, BindingKind::ValueLet, arena);
            if let Some(guard_expr) = guard {
                let guard_ty = self.check_expr(guard_expr, arena);
                if !zena_types::is_assignable(&self.shared.interner, guard_ty, TypeId::BOOL) {
                    self.diagnostics.error(codes::TYPE_MISMATCH, "match guard must be a bool", arena.span(guard_expr));
                }
            }
            let body_ty = self.check_expr(body, arena);
            self.pop_scope();
            arm_tys.push(body_ty);
        }
        match self.shared.interner.union(arm_tys) {
            Ok(ty) => ty,
            Err(violation) => {
                let text = self.describe(violation.0);
                self.diagnostics.error(codes::TYPE_MISMATCH, format!("union types cannot contain primitive type '{text}'"), arena.span(scrutinee));
                TypeId::ANY
            }
        }
    }

    fn check_record_lit(&mut self, fields: &zena_ast::NodeList, arena: &NodeArena) -> TypeId {
        let mut has_computed_or_spread = false;
        let mut out_fields = Vec::with_capacity(fields.len());
        for &field_id in fields {
            let NodeKind::RecordField { key, value, is_spread } = arena.kind(field_id).clone() else {
                continue;
            };
            if is_spread {
                has_computed_or_spread = true;
                if let Some(value_id) = value {
                    self.check_expr(value_id, arena);
                }
                continue;
            }
            let name = match key {
                RecordKey::Named(name) => name,
                RecordKey::Computed(key_expr) => {
                    self.check_expr(key_expr, arena);
                    has_computed_or_spread = true;
                    continue;
                }
            };
            let value_ty = match value {
                Some(value_id) => self.check_expr(value_id, arena),
                None => self.check_identifier(name, field_id, arena),
            };
            out_fields.push((name, FieldInfo { ty: value_ty, optional: false }));
        }
        if has_computed_or_spread {
            return TypeId::ANY;
        }
        self.shared.interner.intern_record(out_fields)
    }

    /// Walks a function body block collecting every `return`'s expression
    /// type into `collected`, type-checking along the way. Mirrors
    /// `check_stmt`'s own block handling but additionally threads the
    /// return-collection set through nested control flow.
    fn check_block_collecting_returns(&mut self, body: NodeId, expected: Option<TypeId>, collected: &mut Vec<TypeId>, arena: &NodeArena) {
        self.function_depth += 1;
        self.check_stmt_with_returns(body, expected, collected, arena);
        self.function_depth -= 1;
    }
}
