//! Resolving a `type_ann` AST subtree into an interned [`TypeId`].
//!
//! Runs after the pre-declaration pass has reserved placeholders for every
//! class/interface/mixin/type-alias/symbol in the module, so a named type
//! referencing any of them — including forward references — always finds
//! a binding.

use zena_ast::{NodeArena, NodeId, NodeKind};
use zena_common::diagnostics::codes;
use zena_types::{TypeId, TypeKey};

use crate::checker::Checker;
use crate::context::BindingKind;

impl<'a> Checker<'a> {
    pub fn resolve_type_ann(&mut self, node: NodeId, arena: &NodeArena) -> TypeId {
        match arena.kind(node) {
            NodeKind::PrimitiveType(prim) => primitive_type_id(*prim),
            NodeKind::ThisType => self.current_class().unwrap_or_else(|| {
                self.diagnostics.error(codes::TYPE_MISMATCH, "'this' type used outside a class or extension body", arena.span(node));
                TypeId::ANY
            }),
            NodeKind::ArrayType { element } => {
                let elem = self.resolve_type_ann(*element, arena);
                self.shared.interner.intern_array(elem)
            }
            NodeKind::NamedType { name, type_args } => self.resolve_named_type(*name, type_args, node, arena),
            NodeKind::UnionType { members } => {
                let member_tys: Vec<TypeId> = members.iter().map(|&m| self.resolve_type_ann(m, arena)).collect();
                match self.shared.interner.union(member_tys) {
                    Ok(ty) => ty,
                    Err(violation) => {
                        let text = self.describe(violation.0);
                        self.diagnostics.error(
                            codes::TYPE_MISMATCH,
                            format!("union types cannot contain primitive type '{text}'"),
                            arena.span(node),
                        );
                        TypeId::ANY
                    }
                }
            }
            NodeKind::RecordType { fields } => {
                let mut field_infos = Vec::with_capacity(fields.len());
                for &field_id in fields {
                    let NodeKind::RecordTypeField { name, type_ann, optional } = arena.kind(field_id) else {
                        continue;
                    };
                    let ty = self.resolve_type_ann(*type_ann, arena);
                    field_infos.push((*name, zena_types::FieldInfo { ty, optional: *optional }));
                }
                self.shared.interner.intern_record(field_infos)
            }
            NodeKind::TupleType { elements } => {
                let elems: Vec<TypeId> = elements.iter().map(|&e| self.resolve_type_ann(e, arena)).collect();
                self.shared.interner.intern_tuple(elems)
            }
            NodeKind::UnboxedTupleType { elements } => {
                let elems: Vec<TypeId> = elements.iter().map(|&e| self.resolve_type_ann(e, arena)).collect();
                self.shared.interner.intern_unboxed_tuple(elems)
            }
            NodeKind::FunctionType { type_params, params, return_type } => {
                self.push_scope(crate::context::ScopeKind::Function);
                let type_param_tys: Vec<TypeId> = type_params
                    .iter()
                    .map(|&tp| self.declare_type_param(tp, arena))
                    .collect();
                let param_tys: Vec<TypeId> = params.iter().map(|&p| self.resolve_type_ann(p, arena)).collect();
                let return_ty = self.resolve_type_ann(*return_type, arena);
                self.pop_scope();
                self.shared.interner.intern_function(type_param_tys, param_tys, return_ty)
            }
            _ => {
                self.diagnostics.error(codes::INTERNAL_ERROR, "expected a type annotation node", arena.span(node));
                TypeId::ANY
            }
        }
    }

    /// Declares a `TypeParamDecl` as a fresh type parameter in the current
    /// scope, so later type annotations in the same declaration resolve it
    /// by name through `resolve_named_type`.
    pub fn declare_type_param(&mut self, node: NodeId, arena: &NodeArena) -> TypeId {
        let NodeKind::TypeParamDecl { name, constraint, default } = arena.kind(node) else {
            unreachable!("declare_type_param called on a non-TypeParamDecl node");
        };
        let (name, constraint, default) = (*name, *constraint, *default);
        let constraint_ty = constraint.map(|c| self.resolve_type_ann(c, arena));
        let default_ty = default.map(|d| self.resolve_type_ann(d, arena));
        let ty = self.shared.interner.fresh_type_parameter(name, constraint_ty, default_ty);
        self.declare(name, crate::context::Binding { ty, kind: BindingKind::Type, declared_at: node }, arena.span(node));
        ty
    }

    fn resolve_named_type(
        &mut self,
        name: zena_common::Atom,
        type_args: &zena_ast::NodeList,
        node: NodeId,
        arena: &NodeArena,
    ) -> TypeId {
        let Some((binding, _)) = self.resolve(name) else {
            let text = self.shared.atoms.resolve(name).to_string();
            self.diagnostics.error(codes::SYMBOL_NOT_FOUND, format!("type '{text}' not found"), arena.span(node));
            return TypeId::ANY;
        };
        if binding.kind != BindingKind::Type {
            let text = self.shared.atoms.resolve(name).to_string();
            self.diagnostics.error(codes::TYPE_MISMATCH, format!("'{text}' is a value, not a type"), arena.span(node));
            return TypeId::ANY;
        }
        if type_args.is_empty() {
            return binding.ty;
        }
        let args: Vec<TypeId> = type_args.iter().map(|&a| self.resolve_type_ann(a, arena)).collect();
        match self.shared.interner.key(binding.ty).clone() {
            TypeKey::Class(class_id, _) => {
                let expected = self.shared.interner.class_data(class_id).type_params.len();
                if expected != args.len() {
                    self.diagnostics.error(
                        codes::GENERIC_TYPE_ARGUMENT_MISMATCH,
                        format!("expected {expected} type argument(s), found {}", args.len()),
                        arena.span(node),
                    );
                    return TypeId::ANY;
                }
                self.shared.interner.instantiate_class(class_id, args)
            }
            TypeKey::Interface(iface_id, _) => {
                let expected = self.shared.interner.interface_data(iface_id).type_params.len();
                if expected != args.len() {
                    self.diagnostics.error(
                        codes::GENERIC_TYPE_ARGUMENT_MISMATCH,
                        format!("expected {expected} type argument(s), found {}", args.len()),
                        arena.span(node),
                    );
                    return TypeId::ANY;
                }
                self.shared.interner.instantiate_interface(iface_id, args)
            }
            TypeKey::Mixin(mixin_id, _) => {
                let expected = self.shared.interner.mixin_data(mixin_id).type_params.len();
                if expected != args.len() {
                    self.diagnostics.error(
                        codes::GENERIC_TYPE_ARGUMENT_MISMATCH,
                        format!("expected {expected} type argument(s), found {}", args.len()),
                        arena.span(node),
                    );
                    return TypeId::ANY;
                }
                self.shared.interner.instantiate_mixin(mixin_id, args)
            }
            _ => {
                let text = self.shared.atoms.resolve(name).to_string();
                self.diagnostics.error(
                    codes::GENERIC_TYPE_ARGUMENT_MISMATCH,
                    format!("'{text}' does not accept type arguments"),
                    arena.span(node),
                );
                TypeId::ANY
            }
        }
    }

    /// A short, best-effort description of a type for diagnostic messages.
    pub fn describe(&self, ty: TypeId) -> String {
        match self.shared.interner.key(ty) {
            TypeKey::Primitive(prim) => format!("{prim:?}").to_lowercase(),
            TypeKey::ByteArray => "byte_array".to_string(),
            TypeKey::Class(id, _) => self.shared.atoms.resolve(self.shared.interner.class_data(*id).name).to_string(),
            TypeKey::Interface(id, _) => {
                self.shared.atoms.resolve(self.shared.interner.interface_data(*id).name).to_string()
            }
            TypeKey::Mixin(id, _) => self.shared.atoms.resolve(self.shared.interner.mixin_data(*id).name).to_string(),
            TypeKey::Symbol(_) => self.shared.interner.symbol_name(ty).map_or("symbol".to_string(), |a| {
                self.shared.atoms.resolve(a).to_string()
            }),
            _ => "<type>".to_string(),
        }
    }
}

fn primitive_type_id(prim: zena_ast::PrimitiveKind) -> TypeId {
    use zena_ast::PrimitiveKind::*;
    match prim {
        I32 => TypeId::I32,
        I64 => TypeId::I64,
        U32 => TypeId::U32,
        U64 => TypeId::U64,
        F32 => TypeId::F32,
        F64 => TypeId::F64,
        Bool => TypeId::BOOL,
        Void => TypeId::VOID,
        Never => TypeId::NEVER,
        Null => TypeId::NULL,
        Any => TypeId::ANY,
    }
}
