//! `TypeInterner` — the hash-consing arena behind every [`TypeId`].
//!
//! One interner is owned by the `Compiler` for the whole lifetime of a
//! `compile`/`bundle` call (mirrors `zena_common::Interner`'s lifetime
//! contract for names) and shared by every module's [`crate::TypeId`]
//! so that two modules naming the same structural type get the same id.

use rustc_hash::FxHashMap;
use zena_common::Atom;

use crate::class_data::{ClassData, ClassId, FieldInfo, InterfaceData, InterfaceId, MixinData, MixinId};
use crate::type_id::TypeId;
use crate::type_key::{FunctionKey, TypeKey};
use zena_ast::PrimitiveKind;

pub struct TypeInterner {
    keys: Vec<TypeKey>,
    lookup: FxHashMap<TypeKey, TypeId>,
    classes: Vec<ClassData>,
    interfaces: Vec<InterfaceData>,
    mixins: Vec<MixinData>,
    next_fresh: u32,
    /// Debug names and constraints for fresh `TypeParameter`/`Symbol` ids,
    /// keyed by the fresh counter value embedded in their `TypeKey`.
    type_param_info: FxHashMap<u32, TypeParamInfo>,
    symbol_names: FxHashMap<u32, Atom>,
}

#[derive(Clone, Copy, Debug)]
pub struct TypeParamInfo {
    pub name: Atom,
    pub constraint: Option<TypeId>,
    pub default: Option<TypeId>,
}

impl Default for TypeInterner {
    fn default() -> Self {
        TypeInterner::new()
    }
}

impl TypeInterner {
    pub fn new() -> Self {
        let mut interner = TypeInterner {
            keys: Vec::new(),
            lookup: FxHashMap::default(),
            classes: Vec::new(),
            interfaces: Vec::new(),
            mixins: Vec::new(),
            next_fresh: 0,
            type_param_info: FxHashMap::default(),
            symbol_names: FxHashMap::default(),
        };
        // Pre-register the well-known primitives in exactly the order
        // `TypeId`'s associated constants expect.
        for prim in [
            PrimitiveKind::I32,
            PrimitiveKind::I64,
            PrimitiveKind::U32,
            PrimitiveKind::U64,
            PrimitiveKind::F32,
            PrimitiveKind::F64,
            PrimitiveKind::Bool,
            PrimitiveKind::Void,
            PrimitiveKind::Never,
            PrimitiveKind::Null,
            PrimitiveKind::Any,
        ] {
            interner.intern_key(TypeKey::Primitive(prim));
        }
        interner.intern_key(TypeKey::ByteArray);
        debug_assert_eq!(interner.keys.len() as u32, TypeId::WELL_KNOWN_COUNT);
        interner
    }

    fn intern_key(&mut self, key: TypeKey) -> TypeId {
        if let Some(&id) = self.lookup.get(&key) {
            return id;
        }
        let id = TypeId(self.keys.len() as u32);
        self.lookup.insert(key.clone(), id);
        self.keys.push(key);
        id
    }

    pub fn key(&self, id: TypeId) -> &TypeKey {
        &self.keys[id.0 as usize]
    }

    pub fn primitive_kind(&self, id: TypeId) -> Option<PrimitiveKind> {
        match self.key(id) {
            TypeKey::Primitive(k) => Some(*k),
            _ => None,
        }
    }

    fn fresh(&mut self) -> u32 {
        let id = self.next_fresh;
        self.next_fresh += 1;
        id
    }

    // ── Composite interning ─────────────────────────────────────────

    pub fn intern_array(&mut self, element: TypeId) -> TypeId {
        self.intern_key(TypeKey::Array(element))
    }

    pub fn intern_tuple(&mut self, elements: Vec<TypeId>) -> TypeId {
        self.intern_key(TypeKey::Tuple(elements))
    }

    pub fn intern_unboxed_tuple(&mut self, elements: Vec<TypeId>) -> TypeId {
        self.intern_key(TypeKey::UnboxedTuple(elements))
    }

    pub fn intern_function(&mut self, type_params: Vec<TypeId>, params: Vec<TypeId>, return_type: TypeId) -> TypeId {
        self.intern_key(TypeKey::Function(FunctionKey { type_params, params, return_type }))
    }

    /// Canonicalizes `fields` into a single declaration-order-independent
    /// order (by `Atom` index) before interning, so two records with the
    /// same field set but different source order intern to the same id.
    pub fn intern_record(&mut self, mut fields: Vec<(Atom, FieldInfo)>) -> TypeId {
        fields.sort_by_key(|(name, _)| name.index());
        fields.dedup_by_key(|(name, _)| *name);
        self.intern_key(TypeKey::Record(fields))
    }

    /// A reference-friendly, insertion-ordered view of a record type's
    /// fields, in the canonical order it was interned under.
    pub fn record_fields(&self, id: TypeId) -> Option<&[(Atom, FieldInfo)]> {
        match self.key(id) {
            TypeKey::Record(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn fresh_type_parameter(&mut self, name: Atom, constraint: Option<TypeId>, default: Option<TypeId>) -> TypeId {
        let fresh_id = self.fresh();
        self.type_param_info.insert(fresh_id, TypeParamInfo { name, constraint, default });
        let id = TypeId(self.keys.len() as u32);
        self.keys.push(TypeKey::TypeParameter(fresh_id));
        id
    }

    pub fn type_param_info(&self, id: TypeId) -> Option<&TypeParamInfo> {
        match self.key(id) {
            TypeKey::TypeParameter(fresh_id) => self.type_param_info.get(fresh_id),
            _ => None,
        }
    }

    /// Every `symbol` declaration allocates a new `TypeId`, even when two
    /// declarations share a debug name — symbol types are fresh by object
    /// identity, never hash-consed by name.
    pub fn fresh_symbol(&mut self, debug_name: Atom) -> TypeId {
        let fresh_id = self.fresh();
        self.symbol_names.insert(fresh_id, debug_name);
        let id = TypeId(self.keys.len() as u32);
        self.keys.push(TypeKey::Symbol(fresh_id));
        id
    }

    pub fn symbol_name(&self, id: TypeId) -> Option<Atom> {
        match self.key(id) {
            TypeKey::Symbol(fresh_id) => self.symbol_names.get(fresh_id).copied(),
            _ => None,
        }
    }

    // ── Class / interface / mixin declarations ─────────────────────

    /// Reserves a `ClassId` and returns the `TypeId` naming the
    /// unparameterized class, before any of its members are known. Callers
    /// in the checker's pre-declaration pass stash this `TypeId` so forward
    /// references resolve immediately; [`Self::fill_class`] later mutates
    /// the `ClassData` this id points to without changing the id itself.
    pub fn reserve_class(&mut self, name: Atom) -> (ClassId, TypeId) {
        let class_id = ClassId(self.classes.len() as u32);
        self.classes.push(ClassData { name, ..ClassData::default() });
        let type_id = self.intern_key(TypeKey::Class(class_id, Vec::new()));
        (class_id, type_id)
    }

    pub fn fill_class(&mut self, id: ClassId, data: ClassData) {
        self.classes[id.0 as usize] = data;
    }

    pub fn class_data(&self, id: ClassId) -> &ClassData {
        &self.classes[id.0 as usize]
    }

    /// Applies type arguments to a (possibly generic) class declaration.
    /// Distinct argument lists intern to distinct ids; an empty list always
    /// names the same id `reserve_class` returned.
    pub fn instantiate_class(&mut self, id: ClassId, args: Vec<TypeId>) -> TypeId {
        self.intern_key(TypeKey::Class(id, args))
    }

    pub fn reserve_interface(&mut self, name: Atom) -> (InterfaceId, TypeId) {
        let interface_id = InterfaceId(self.interfaces.len() as u32);
        self.interfaces.push(InterfaceData { name, ..InterfaceData::default() });
        let type_id = self.intern_key(TypeKey::Interface(interface_id, Vec::new()));
        (interface_id, type_id)
    }

    pub fn fill_interface(&mut self, id: InterfaceId, data: InterfaceData) {
        self.interfaces[id.0 as usize] = data;
    }

    pub fn interface_data(&self, id: InterfaceId) -> &InterfaceData {
        &self.interfaces[id.0 as usize]
    }

    pub fn instantiate_interface(&mut self, id: InterfaceId, args: Vec<TypeId>) -> TypeId {
        self.intern_key(TypeKey::Interface(id, args))
    }

    pub fn reserve_mixin(&mut self, name: Atom) -> (MixinId, TypeId) {
        let mixin_id = MixinId(self.mixins.len() as u32);
        self.mixins.push(MixinData { name, ..MixinData::default() });
        let type_id = self.intern_key(TypeKey::Mixin(mixin_id, Vec::new()));
        (mixin_id, type_id)
    }

    pub fn fill_mixin(&mut self, id: MixinId, data: MixinData) {
        self.mixins[id.0 as usize] = data;
    }

    pub fn mixin_data(&self, id: MixinId) -> &MixinData {
        &self.mixins[id.0 as usize]
    }

    pub fn instantiate_mixin(&mut self, id: MixinId, args: Vec<TypeId>) -> TypeId {
        self.intern_key(TypeKey::Mixin(id, args))
    }

    // ── Union construction ──────────────────────────────────────────

    /// Flattens nested unions, drops `never` members, collapses to `any`
    /// if any member is `any`, dedups and sorts for a canonical order, then
    /// validates the union-primitive invariant: no non-reference
    /// primitive other than `null` may appear in a union.
    pub fn union(&mut self, members: Vec<TypeId>) -> Result<TypeId, UnionPrimitiveViolation> {
        let mut flat = Vec::new();
        self.flatten_union(&members, &mut flat);
        if flat.iter().any(|&m| m == TypeId::ANY) {
            return Ok(TypeId::ANY);
        }
        flat.retain(|&m| m != TypeId::NEVER);
        flat.sort_unstable();
        flat.dedup();
        if flat.is_empty() {
            return Ok(TypeId::NEVER);
        }
        for &member in &flat {
            if let TypeKey::Primitive(kind) = self.key(member) {
                if *kind != PrimitiveKind::Null {
                    return Err(UnionPrimitiveViolation(member));
                }
            }
        }
        if flat.len() == 1 {
            return Ok(flat[0]);
        }
        Ok(self.intern_key(TypeKey::Union(flat)))
    }

    fn flatten_union(&self, members: &[TypeId], out: &mut Vec<TypeId>) {
        for &member in members {
            if let TypeKey::Union(inner) = self.key(member) {
                let inner = inner.clone();
                self.flatten_union(&inner, out);
            } else {
                out.push(member);
            }
        }
    }

    pub fn union_members(&self, id: TypeId) -> Option<&[TypeId]> {
        match self.key(id) {
            TypeKey::Union(members) => Some(members),
            _ => None,
        }
    }
}

/// A union was constructed (or re-validated after substitution) with a
/// non-reference primitive other than `null` as one of its members, e.g.
/// `i32 | bool` or a generic `Container<i32>` whose field type is `T | null`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnionPrimitiveViolation(pub TypeId);
