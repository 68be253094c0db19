//! `is_assignable` — the single recursive function implementing every
//! assignability rule the language defines: numeric widening, nominal class
//! subtyping, structural interface satisfaction, record width subtyping,
//! tuple/unboxed-tuple exact-length assignability, union assignability,
//! and function contravariant-params/covariant-return.

use zena_ast::PrimitiveKind;

use crate::class_data::{ClassId, InterfaceId};
use crate::interner::TypeInterner;
use crate::type_id::TypeId;
use crate::type_key::{FunctionKey, TypeKey};

pub fn is_assignable(interner: &TypeInterner, source: TypeId, target: TypeId) -> bool {
    if source == target {
        return true;
    }
    if target == TypeId::ANY || source == TypeId::ANY {
        return true;
    }
    if source == TypeId::NEVER {
        return true;
    }

    match (interner.key(source).clone(), interner.key(target).clone()) {
        (_, TypeKey::Union(t_members)) => t_members.iter().any(|&t| is_assignable(interner, source, t)),
        (TypeKey::Union(s_members), _) => s_members.iter().all(|&s| is_assignable(interner, s, target)),

        (TypeKey::Primitive(s), TypeKey::Primitive(t)) => s == t || numeric_widens(s, t),

        (TypeKey::ByteArray, TypeKey::ByteArray) => true,

        (TypeKey::Array(s_elem), TypeKey::Array(t_elem)) => s_elem == t_elem,

        (TypeKey::Class(s_id, s_args), TypeKey::Class(t_id, t_args)) => {
            if s_id == t_id {
                s_args == t_args
            } else {
                class_extends(interner, s_id, t_id)
            }
        }
        (TypeKey::Class(s_id, _), TypeKey::Interface(t_id, _)) => class_implements(interner, s_id, t_id),

        (TypeKey::Interface(s_id, s_args), TypeKey::Interface(t_id, t_args)) => {
            s_id == t_id && s_args == t_args || interface_extends(interner, s_id, t_id)
        }

        (TypeKey::Record(s_fields), TypeKey::Record(t_fields)) => t_fields.iter().all(|(name, t_field)| {
            match s_fields.iter().find(|(n, _)| n == name) {
                Some((_, s_field)) => is_assignable(interner, s_field.ty, t_field.ty),
                None => t_field.optional,
            }
        }),

        (TypeKey::Tuple(s_elems), TypeKey::Tuple(t_elems)) => {
            s_elems.len() == t_elems.len()
                && s_elems.iter().zip(t_elems.iter()).all(|(&s, &t)| is_assignable(interner, s, t))
        }
        (TypeKey::UnboxedTuple(s_elems), TypeKey::UnboxedTuple(t_elems)) => {
            s_elems.len() == t_elems.len()
                && s_elems.iter().zip(t_elems.iter()).all(|(&s, &t)| is_assignable(interner, s, t))
        }

        (TypeKey::Function(s_func), TypeKey::Function(t_func)) => function_assignable(interner, &s_func, &t_func),

        _ => false,
    }
}

fn numeric_widens(source: PrimitiveKind, target: PrimitiveKind) -> bool {
    use PrimitiveKind::*;
    matches!(
        (source, target),
        (I32, I64)
            | (I32, F32)
            | (I32, F64)
            | (I64, F64)
            | (U32, U64)
            | (U32, F32)
            | (U32, F64)
            | (U64, F64)
            | (F32, F64)
    )
}

fn function_assignable(interner: &TypeInterner, source: &FunctionKey, target: &FunctionKey) -> bool {
    if source.params.len() != target.params.len() {
        return false;
    }
    let params_ok = source
        .params
        .iter()
        .zip(target.params.iter())
        .all(|(&sp, &tp)| is_assignable(interner, tp, sp));
    params_ok && is_assignable(interner, source.return_type, target.return_type)
}

fn class_extends(interner: &TypeInterner, mut class_id: ClassId, target: ClassId) -> bool {
    loop {
        let data = interner.class_data(class_id);
        match data.superclass.map(|sup| interner.key(sup).clone()) {
            Some(TypeKey::Class(super_id, _)) => {
                if super_id == target {
                    return true;
                }
                class_id = super_id;
            }
            _ => return false,
        }
    }
}

fn class_implements(interner: &TypeInterner, class_id: ClassId, target: InterfaceId) -> bool {
    let mut current = Some(class_id);
    while let Some(id) = current {
        let data = interner.class_data(id);
        for &implemented in &data.implements {
            if let TypeKey::Interface(iface_id, _) = interner.key(implemented) {
                if *iface_id == target || interface_extends(interner, *iface_id, target) {
                    return true;
                }
            }
        }
        current = data.superclass.and_then(|sup| match interner.key(sup) {
            TypeKey::Class(super_id, _) => Some(*super_id),
            _ => None,
        });
    }
    false
}

fn interface_extends(interner: &TypeInterner, interface_id: InterfaceId, target: InterfaceId) -> bool {
    if interface_id == target {
        return true;
    }
    let data = interner.interface_data(interface_id);
    data.extends.iter().any(|&extended| match interner.key(extended) {
        TypeKey::Interface(id, _) => interface_extends(interner, *id, target),
        _ => false,
    })
}
