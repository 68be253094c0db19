//! `TypeId` — a stable handle into a [`crate::interner::TypeInterner`]'s
//! arena. Two `TypeId`s compare equal iff the types they name are
//! structurally identical (the interner's "equality ⇔ identity" rule) —
//! callers never compare [`crate::type_key::TypeKey`]s directly once a type
//! has been interned.

/// The handful of primitive types every `TypeInterner` pre-registers at
/// construction, so callers never have to intern `i32` themselves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

impl TypeId {
    pub const I32: TypeId = TypeId(0);
    pub const I64: TypeId = TypeId(1);
    pub const U32: TypeId = TypeId(2);
    pub const U64: TypeId = TypeId(3);
    pub const F32: TypeId = TypeId(4);
    pub const F64: TypeId = TypeId(5);
    pub const BOOL: TypeId = TypeId(6);
    pub const VOID: TypeId = TypeId(7);
    pub const NEVER: TypeId = TypeId(8);
    pub const NULL: TypeId = TypeId(9);
    pub const ANY: TypeId = TypeId(10);
    pub const BYTE_ARRAY: TypeId = TypeId(11);

    /// Number of well-known ids a fresh interner pre-registers; every
    /// user-interned type gets an id at or above this.
    pub const WELL_KNOWN_COUNT: u32 = 12;
}
