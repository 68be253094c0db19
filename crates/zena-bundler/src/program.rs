//! The bundler's output: one self-contained AST the emitter can lower
//! without ever consulting the module map again.

use rustc_hash::FxHashMap;
use zena_ast::{NodeArena, NodeList};
use zena_common::Atom;

pub struct Program {
    pub arena: NodeArena,
    /// Every module's rewritten top-level statements, concatenated in
    /// load order (import declarations are dropped — their effect is
    /// already baked into the renamed identifier references).
    pub statements: NodeList,
    /// `originalName → uniqueName`, populated only from the entry
    /// module's exported top-level declarations — the entry module is the
    /// sole source of external exports.
    pub exports: FxHashMap<Atom, Atom>,
    /// `wellKnownName → uniqueName` (e.g. `String`, `FixedArray`,
    /// `TemplateStringsArray`) so the emitter can locate stdlib types
    /// regardless of their mangled names.
    pub well_known_types: FxHashMap<Atom, Atom>,
}
