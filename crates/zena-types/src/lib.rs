//! Hash-consed type representation for the zena checker and bundler.
//!
//! Every type the checker ever constructs goes through a [`TypeInterner`],
//! which guarantees structural equality is identity: two requests to
//! build `{ x: i32, y: i32 }` — whatever order the fields were declared in
//! — hand back the same [`TypeId`]. Class, interface and mixin
//! *declarations* are the one exception: they are nominal, so their
//! member data is filled in after a placeholder `TypeId` is reserved (see
//! [`TypeInterner::reserve_class`]) rather than hash-consed by structure.

mod assignability;
mod class_data;
mod interner;
mod substitute;
mod type_id;
mod type_key;

pub use assignability::is_assignable;
pub use class_data::{ClassData, ClassId, FieldInfo, InterfaceData, InterfaceId, MixinData, MixinId};
pub use interner::{TypeInterner, TypeParamInfo, UnionPrimitiveViolation};
pub use substitute::substitute;
pub use type_id::TypeId;
pub use type_key::{FunctionKey, TypeKey};

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap;
    use zena_common::Interner;

    #[test]
    fn equal_records_regardless_of_field_order_intern_to_the_same_id() {
        let mut interner = TypeInterner::new();
        let mut atoms = Interner::new();
        let x = atoms.intern("x");
        let y = atoms.intern("y");
        let a = interner.intern_record(vec![
            (x, FieldInfo { ty: TypeId::I32, optional: false }),
            (y, FieldInfo { ty: TypeId::BOOL, optional: false }),
        ]);
        let b = interner.intern_record(vec![
            (y, FieldInfo { ty: TypeId::BOOL, optional: false }),
            (x, FieldInfo { ty: TypeId::I32, optional: false }),
        ]);
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_records_intern_to_distinct_ids() {
        let mut interner = TypeInterner::new();
        let mut atoms = Interner::new();
        let x = atoms.intern("x");
        let a = interner.intern_record(vec![(x, FieldInfo { ty: TypeId::I32, optional: false })]);
        let b = interner.intern_record(vec![(x, FieldInfo { ty: TypeId::BOOL, optional: false })]);
        assert_ne!(a, b);
    }

    #[test]
    fn each_symbol_declaration_is_fresh_even_with_the_same_debug_name() {
        let mut interner = TypeInterner::new();
        let mut atoms = Interner::new();
        let name = atoms.intern("Color");
        let a = interner.fresh_symbol(name);
        let b = interner.fresh_symbol(name);
        assert_ne!(a, b);
    }

    #[test]
    fn union_flattens_dedups_and_sorts() {
        let mut interner = TypeInterner::new();
        let a = interner.union(vec![TypeId::I32, TypeId::NULL]).unwrap();
        let b = interner.union(vec![TypeId::NULL, TypeId::I32, TypeId::I32]).unwrap();
        assert_eq!(a, b);
        assert_eq!(interner.union_members(a).map(|m| m.len()), Some(2));
    }

    #[test]
    fn union_absorbs_never_and_collapses_single_member() {
        let mut interner = TypeInterner::new();
        let collapsed = interner.union(vec![TypeId::I32, TypeId::NEVER]).unwrap();
        assert_eq!(collapsed, TypeId::I32);
    }

    #[test]
    fn any_dominates_a_union() {
        let mut interner = TypeInterner::new();
        let collapsed = interner.union(vec![TypeId::I32, TypeId::ANY, TypeId::BOOL]).unwrap();
        assert_eq!(collapsed, TypeId::ANY);
    }

    #[test]
    fn non_reference_primitive_other_than_null_is_rejected_in_a_union() {
        let mut interner = TypeInterner::new();
        let err = interner.union(vec![TypeId::I32, TypeId::BOOL]).unwrap_err();
        assert!(err.0 == TypeId::I32 || err.0 == TypeId::BOOL);
    }

    #[test]
    fn nested_unions_flatten_before_validation() {
        let mut interner = TypeInterner::new();
        let inner = interner.union(vec![TypeId::I32, TypeId::NULL]).unwrap();
        let outer = interner.union(vec![inner, TypeId::I64]).unwrap();
        assert_eq!(interner.union_members(outer).map(|m| m.len()), Some(3));
    }

    #[test]
    fn widening_conversions_are_assignable_but_not_reverse() {
        let interner = TypeInterner::new();
        assert!(is_assignable(&interner, TypeId::I32, TypeId::I64));
        assert!(!is_assignable(&interner, TypeId::I64, TypeId::I32));
    }

    #[test]
    fn any_is_assignable_to_and_from_anything() {
        let interner = TypeInterner::new();
        assert!(is_assignable(&interner, TypeId::I32, TypeId::ANY));
        assert!(is_assignable(&interner, TypeId::ANY, TypeId::I32));
    }

    #[test]
    fn never_is_assignable_to_anything() {
        let interner = TypeInterner::new();
        assert!(is_assignable(&interner, TypeId::NEVER, TypeId::BOOL));
    }

    #[test]
    fn wider_record_is_assignable_to_narrower_record() {
        let mut interner = TypeInterner::new();
        let mut atoms = Interner::new();
        let x = atoms.intern("x");
        let y = atoms.intern("y");
        let wide = interner.intern_record(vec![
            (x, FieldInfo { ty: TypeId::I32, optional: false }),
            (y, FieldInfo { ty: TypeId::BOOL, optional: false }),
        ]);
        let narrow = interner.intern_record(vec![(x, FieldInfo { ty: TypeId::I32, optional: false })]);
        assert!(is_assignable(&interner, wide, narrow));
        assert!(!is_assignable(&interner, narrow, wide));
    }

    #[test]
    fn missing_optional_field_is_still_assignable() {
        let mut interner = TypeInterner::new();
        let mut atoms = Interner::new();
        let x = atoms.intern("x");
        let y = atoms.intern("y");
        let source = interner.intern_record(vec![(x, FieldInfo { ty: TypeId::I32, optional: false })]);
        let target = interner.intern_record(vec![
            (x, FieldInfo { ty: TypeId::I32, optional: false }),
            (y, FieldInfo { ty: TypeId::BOOL, optional: true }),
        ]);
        assert!(is_assignable(&interner, source, target));
    }

    #[test]
    fn subclass_is_assignable_to_superclass() {
        let mut interner = TypeInterner::new();
        let mut atoms = Interner::new();
        let animal_name = atoms.intern("Animal");
        let dog_name = atoms.intern("Dog");
        let (_, animal_ty) = interner.reserve_class(animal_name);
        let (dog_id, dog_ty) = interner.reserve_class(dog_name);
        interner.fill_class(dog_id, ClassData { name: dog_name, superclass: Some(animal_ty), ..ClassData::default() });
        assert!(is_assignable(&interner, dog_ty, animal_ty));
        assert!(!is_assignable(&interner, animal_ty, dog_ty));
    }

    #[test]
    fn class_implementing_interface_satisfies_it_structurally() {
        let mut interner = TypeInterner::new();
        let mut atoms = Interner::new();
        let shape_name = atoms.intern("Shape");
        let circle_name = atoms.intern("Circle");
        let (_, shape_ty) = interner.reserve_interface(shape_name);
        let (circle_id, circle_ty) = interner.reserve_class(circle_name);
        interner.fill_class(
            circle_id,
            ClassData { name: circle_name, implements: vec![shape_ty], ..ClassData::default() },
        );
        assert!(is_assignable(&interner, circle_ty, shape_ty));
    }

    #[test]
    fn substitution_replaces_matching_type_parameter_leaves() {
        let mut interner = TypeInterner::new();
        let mut atoms = Interner::new();
        let t_name = atoms.intern("T");
        let type_param = interner.fresh_type_parameter(t_name, None, None);
        let array_of_t = interner.intern_array(type_param);
        let mut subst = FxHashMap::default();
        subst.insert(t_name, TypeId::I32);
        let result = substitute(&mut interner, array_of_t, &subst).unwrap();
        assert_eq!(result, interner.intern_array(TypeId::I32));
    }

    #[test]
    fn substitution_rejects_a_union_primitive_violation_on_instantiation() {
        let mut interner = TypeInterner::new();
        let mut atoms = Interner::new();
        let t_name = atoms.intern("T");
        let type_param = interner.fresh_type_parameter(t_name, None, None);
        let field_ty = interner.union(vec![type_param, TypeId::NULL]).unwrap();
        let mut subst = FxHashMap::default();
        subst.insert(t_name, TypeId::I32);
        let result = substitute(&mut interner, field_ty, &subst);
        assert!(result.is_err());
    }
}
