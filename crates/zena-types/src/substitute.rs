//! Generic substitution: replacing `TypeParameter` leaves with concrete
//! type arguments and re-interning the composites that contained them.
//!
//! Substitution is keyed by the type parameter's declared name rather than
//! its fresh `TypeId`: a substitution
//! map built at one generic instantiation site (e.g. `{T: i32}` for
//! `Box<i32>`) only ever needs to name the type parameters the
//! instantiated declaration itself introduced, since a declaration's field
//! and method types only reference its own type parameters.

use rustc_hash::FxHashMap;
use zena_common::Atom;

use crate::class_data::FieldInfo;
use crate::interner::{TypeInterner, UnionPrimitiveViolation};
use crate::type_id::TypeId;
use crate::type_key::TypeKey;

/// Substitutes every `TypeParameter` in `ty` named by a key in `subst` with
/// its mapped `TypeId`, re-interning every composite type that contains a
/// substituted leaf. Returns unchanged (`Ok(ty)`) for anything `subst`
/// doesn't mention, including primitives, symbols, and classes/interfaces
/// instantiated with no matching parameters.
///
/// Re-runs the union-primitive invariant on any union that substitution
/// touches: instantiating `Container<i32>` where a field's
/// declared type is `T | null` must fail the same way constructing that
/// union directly would.
pub fn substitute(
    interner: &mut TypeInterner,
    ty: TypeId,
    subst: &FxHashMap<Atom, TypeId>,
) -> Result<TypeId, UnionPrimitiveViolation> {
    if subst.is_empty() {
        return Ok(ty);
    }
    match interner.key(ty).clone() {
        TypeKey::TypeParameter(_) => {
            let Some(info) = interner.type_param_info(ty) else {
                return Ok(ty);
            };
            Ok(subst.get(&info.name).copied().unwrap_or(ty))
        }
        TypeKey::Array(elem) => {
            let new_elem = substitute(interner, elem, subst)?;
            Ok(if new_elem == elem { ty } else { interner.intern_array(new_elem) })
        }
        TypeKey::Class(class_id, args) => {
            let new_args = substitute_all(interner, &args, subst)?;
            Ok(if new_args == args { ty } else { interner.instantiate_class(class_id, new_args) })
        }
        TypeKey::Interface(iface_id, args) => {
            let new_args = substitute_all(interner, &args, subst)?;
            Ok(if new_args == args { ty } else { interner.instantiate_interface(iface_id, new_args) })
        }
        TypeKey::Mixin(mixin_id, args) => {
            let new_args = substitute_all(interner, &args, subst)?;
            Ok(if new_args == args { ty } else { interner.instantiate_mixin(mixin_id, new_args) })
        }
        TypeKey::Record(fields) => {
            let mut changed = false;
            let mut new_fields = Vec::with_capacity(fields.len());
            for (name, field) in &fields {
                let new_ty = substitute(interner, field.ty, subst)?;
                changed |= new_ty != field.ty;
                new_fields.push((*name, FieldInfo { ty: new_ty, optional: field.optional }));
            }
            Ok(if changed { interner.intern_record(new_fields) } else { ty })
        }
        TypeKey::Tuple(elements) => {
            let new_elements = substitute_all(interner, &elements, subst)?;
            Ok(if new_elements == elements { ty } else { interner.intern_tuple(new_elements) })
        }
        TypeKey::UnboxedTuple(elements) => {
            let new_elements = substitute_all(interner, &elements, subst)?;
            Ok(if new_elements == elements { ty } else { interner.intern_unboxed_tuple(new_elements) })
        }
        TypeKey::Union(members) => {
            let new_members = substitute_all(interner, &members, subst)?;
            if new_members == members {
                Ok(ty)
            } else {
                interner.union(new_members)
            }
        }
        TypeKey::Function(func) => {
            let new_params = substitute_all(interner, &func.params, subst)?;
            let new_return = substitute(interner, func.return_type, subst)?;
            if new_params == func.params && new_return == func.return_type {
                Ok(ty)
            } else {
                Ok(interner.intern_function(func.type_params, new_params, new_return))
            }
        }
        TypeKey::Primitive(_) | TypeKey::ByteArray | TypeKey::Symbol(_) => Ok(ty),
    }
}

fn substitute_all(
    interner: &mut TypeInterner,
    items: &[TypeId],
    subst: &FxHashMap<Atom, TypeId>,
) -> Result<Vec<TypeId>, UnionPrimitiveViolation> {
    items.iter().map(|&item| substitute(interner, item, subst)).collect()
}
