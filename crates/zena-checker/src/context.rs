//! Bindings and scopes: the per-module name-resolution state a [`crate::Checker`]
//! threads through a checking pass.

use rustc_hash::FxHashMap;
use zena_ast::NodeId;
use zena_common::Atom;
use zena_types::TypeId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BindingKind {
    ValueLet,
    ValueVar,
    Type,
}

#[derive(Clone, Debug)]
pub struct Binding {
    pub ty: TypeId,
    pub kind: BindingKind,
    pub declared_at: NodeId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScopeKind {
    Module,
    Function,
    Block,
    Class,
}

/// One lexical scope. `overloads` holds every signature after the first
/// for a function name declared more than once in the same scope — the
/// overload list is attached as a sibling of the binding itself rather
/// than folded into a single function type.
#[derive(Default)]
pub struct Scope {
    pub kind: Option<ScopeKind>,
    pub bindings: FxHashMap<Atom, Binding>,
    pub overloads: FxHashMap<Atom, Vec<TypeId>>,
}

impl Scope {
    pub fn new(kind: ScopeKind) -> Self {
        Scope { kind: Some(kind), ..Scope::default() }
    }
}

/// What an identifier or member-access node resolved to, recorded for the
/// bundler's rename pass and for anything downstream that needs to know
/// whether a reference crossed a module boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Local,
    Prelude,
    /// Resolved through an `import` clause; the bundler must rewrite this
    /// reference to the imported module's prefixed name.
    Import,
    Unresolved,
}
