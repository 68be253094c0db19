//! Binding patterns: `let`/`var` targets, function parameters, and `match`
//! arm patterns all funnel through [`Checker::bind_pattern`].
//!
//! Destructuring an optional record field without a default is an error
//! (`OptionalFieldRequiresDefault`), enforced here once so every call site
//! (let, params, match) gets it for free.

use zena_ast::{NodeArena, NodeId, NodeKind};
use zena_common::diagnostics::codes;
use zena_types::{FieldInfo, TypeId, TypeKey};

use crate::checker::Checker;
use crate::context::{Binding, BindingKind};

impl<'a> Checker<'a> {
    /// Binds every name a pattern introduces, at type `ty`, into the
    /// current scope. `kind` distinguishes `let` (immutable) from `var`
    /// (mutable) bindings and function parameters (always `ValueLet`).
    pub fn bind_pattern(&mut self, pattern: NodeId, ty: TypeId, kind: BindingKind, arena: &NodeArena) {
        match arena.kind(pattern).clone() {
            NodeKind::IdentPattern(name) => {
                self.declare(name, Binding { ty, kind, declared_at: pattern }, arena.span(pattern));
            }
            NodeKind::WildcardPattern => {}
            NodeKind::LiteralPattern(lit) => {
                self.check_expr(lit, arena);
            }
            NodeKind::AsPattern { pattern: inner, name } => {
                self.bind_pattern(inner, ty, kind, arena);
                self.declare(name, Binding { ty, kind, declared_at: pattern }, arena.span(pattern));
            }
            NodeKind::RecordPattern { fields, .. } => self.bind_record_pattern(&fields, ty, kind, arena),
            NodeKind::TuplePattern { elements } | NodeKind::UnboxedTuplePattern { elements } => {
                let elem_tys = match self.shared.interner.key(ty) {
                    TypeKey::Tuple(elems) | TypeKey::UnboxedTuple(elems) => elems.clone(),
                    _ => Vec::new(),
                };
                for (i, &element) in elements.iter().enumerate() {
                    let elem_ty = elem_tys.get(i).copied().unwrap_or(TypeId::ANY);
                    self.bind_pattern(element, elem_ty, kind, arena);
                }
            }
            NodeKind::ClassPattern { class_name, fields } => {
                self.bind_class_pattern(class_name, &fields, ty, kind, arena.span(pattern), arena)
            }
            _ => {
                self.diagnostics.error(codes::INTERNAL_ERROR, "expected a pattern node", arena.span(pattern));
            }
        }
    }

    fn bind_record_pattern(&mut self, fields: &zena_ast::NodeList, record_ty: TypeId, kind: BindingKind, arena: &NodeArena) {
        let record_fields: Vec<(zena_common::Atom, FieldInfo)> =
            self.shared.interner.record_fields(record_ty).map(|f| f.to_vec()).unwrap_or_default();
        for &field_id in fields {
            let NodeKind::RecordPatternField { key, pattern: sub, default } = arena.kind(field_id) else {
                continue;
            };
            let (key, sub, default) = (*key, *sub, *default);
            let found = record_fields.iter().find(|(name, _)| *name == key).map(|(_, info)| *info);
            if found.is_none() && record_ty != TypeId::ANY {
                let text = self.shared.atoms.resolve(key).to_string();
                self.diagnostics.error(codes::PROPERTY_NOT_FOUND, format!("no field '{text}' on this record type"), arena.span(field_id));
            }
            let field_info = found.unwrap_or(FieldInfo { ty: TypeId::ANY, optional: false });
            if field_info.optional && default.is_none() {
                let text = self.shared.atoms.resolve(key).to_string();
                self.diagnostics.error(
                    codes::OPTIONAL_FIELD_REQUIRES_DEFAULT,
                    format!("optional field '{text}' must be destructured with a default value"),
                    arena.span(field_id),
                );
            }
            if let Some(default_expr) = default {
                let default_ty = self.check_expr(default_expr, arena);
                if !zena_types::is_assignable(&self.shared.interner, default_ty, field_info.ty) {
                    self.diagnostics.error(codes::TYPE_MISMATCH, "default value is not assignable to the field's type", arena.span(default_expr));
                }
            }
            match sub {
                Some(sub_pattern) => self.bind_pattern(sub_pattern, field_info.ty, kind, arena),
                None => self.declare(key, Binding { ty: field_info.ty, kind, declared_at: field_id }, arena.span(field_id)),
            }
        }
    }

    fn bind_class_pattern(
        &mut self,
        class_name: zena_common::Atom,
        fields: &zena_ast::NodeList,
        scrutinee_ty: TypeId,
        kind: BindingKind,
        span: zena_common::Span,
        arena: &NodeArena,
    ) {
        let Some((binding, _)) = self.resolve(class_name) else {
            let text = self.shared.atoms.resolve(class_name).to_string();
            self.diagnostics.error(codes::SYMBOL_NOT_FOUND, format!("class '{text}' not found"), span);
            for &field_id in fields {
                if let NodeKind::ClassPatternField { local, .. } = arena.kind(field_id) {
                    self.declare(*local, Binding { ty: TypeId::ANY, kind, declared_at: field_id }, arena.span(field_id));
                }
            }
            return;
        };
        let class_fields: Vec<(zena_common::Atom, FieldInfo)> = match self.shared.interner.key(binding.ty) {
            TypeKey::Class(class_id, _) => self.shared.interner.class_data(*class_id).fields.clone(),
            _ => Vec::new(),
        };
        let _ = scrutinee_ty;
        for &field_id in fields {
            let NodeKind::ClassPatternField { field, local } = arena.kind(field_id) else {
                continue;
            };
            let (field, local) = (*field, *local);
            let field_ty = class_fields.iter().find(|(name, _)| *name == field).map(|(_, info)| info.ty).unwrap_or(TypeId::ANY);
            self.declare(local, Binding { ty: field_ty, kind, declared_at: field_id }, arena.span(field_id));
        }
    }
}
