//! `TypeKey` — the structural hash-cons key behind a [`crate::TypeId`].
//!
//! One variant per type case the checker needs. `TypeParameter` and `Symbol`
//! are the two exceptions to structural hash-consing: a type parameter is
//! scoped to the declaration that introduced it and a `symbol` literal is
//! fresh by object identity, so both carry a monotonic id rather than a
//! name — two declarations spelled the same way never collide.

use zena_ast::PrimitiveKind;

use crate::class_data::{ClassId, FieldInfo, InterfaceId, MixinId};
use crate::type_id::TypeId;
use zena_common::Atom;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FunctionKey {
    /// Fresh `TypeParameter` ids scoped to this function signature.
    pub type_params: Vec<TypeId>,
    pub params: Vec<TypeId>,
    pub return_type: TypeId,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKey {
    Primitive(PrimitiveKind),
    ByteArray,
    Array(TypeId),
    /// A class, parameterized by its declared type arguments. The
    /// unparameterized class itself is `Class(id, vec![])`.
    Class(ClassId, Vec<TypeId>),
    Interface(InterfaceId, Vec<TypeId>),
    Mixin(MixinId, Vec<TypeId>),
    /// Canonicalized to a single order (by `Atom` index) before interning,
    /// so that declaration order never affects identity.
    Record(Vec<(Atom, FieldInfo)>),
    Tuple(Vec<TypeId>),
    UnboxedTuple(Vec<TypeId>),
    /// Flattened, deduplicated, sorted by `TypeId` before interning.
    Union(Vec<TypeId>),
    Function(FunctionKey),
    /// A fresh id, not compared structurally — see module docs.
    TypeParameter(u32),
    /// A fresh id, not compared structurally — see module docs.
    Symbol(u32),
}
