//! The nominal, declaration-side data for classes, interfaces and mixins.
//!
//! A class's *identity* as a type is structural (`TypeKey::Class(ClassId,
//! type_args)` hash-conses generic instantiations the same way any other
//! composite type does), but its *members* are nominal, declared once and
//! filled in over two passes: the checker reserves a `ClassId` (and the
//! `TypeId` naming the unapplied class) while it is still pre-declaring
//! forward references, then fills in `ClassData` once it reaches the
//! declaration in source order. Everything that refers to the class in the
//! meantime holds the `TypeId` returned by `reserve`, which stays valid
//! across the fill — only the side table the `TypeId` points into changes.

use rustc_hash::FxHashMap;
use zena_common::Atom;

use crate::type_id::TypeId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InterfaceId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MixinId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FieldInfo {
    pub ty: TypeId,
    pub optional: bool,
}

#[derive(Clone, Debug, Default)]
pub struct ClassData {
    pub name: Atom,
    /// Fresh `TypeParameter` ids scoped to this declaration.
    pub type_params: Vec<TypeId>,
    pub superclass: Option<TypeId>,
    pub implements: Vec<TypeId>,
    pub mixins: Vec<TypeId>,
    pub fields: Vec<(Atom, FieldInfo)>,
    pub methods: Vec<(Atom, TypeId)>,
    pub statics: Vec<(Atom, TypeId)>,
    pub is_final: bool,
    pub is_abstract: bool,
    pub is_extension: bool,
    pub on_type: Option<TypeId>,
    /// Functions that have more than one declared overload carry their
    /// other signatures here, keyed by method name, rather than folding
    /// them into the single `TypeId` a `methods` entry names.
    pub overloads: FxHashMap<Atom, Vec<TypeId>>,
    /// Methods declared `abstract` on this class — a
    /// non-abstract class must concretely implement every abstract method
    /// it inherits or declares, across its superclass chain and the
    /// interfaces it implements).
    pub abstract_methods: Vec<Atom>,
}

#[derive(Clone, Debug, Default)]
pub struct InterfaceData {
    pub name: Atom,
    pub type_params: Vec<TypeId>,
    pub extends: Vec<TypeId>,
    pub fields: Vec<(Atom, FieldInfo)>,
    pub methods: Vec<(Atom, TypeId)>,
}

#[derive(Clone, Debug, Default)]
pub struct MixinData {
    pub name: Atom,
    pub type_params: Vec<TypeId>,
    pub on_constraint: Option<TypeId>,
    pub fields: Vec<(Atom, FieldInfo)>,
    pub methods: Vec<(Atom, TypeId)>,
}
