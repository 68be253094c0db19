//! `CheckerShared` — the resources a whole compile shares across every
//! per-module [`crate::Checker`]: the type interner, the name interner,
//! and the growing table of already-checked modules' exports.

use rustc_hash::FxHashMap;
use zena_common::{Atom, Interner};
use zena_types::TypeInterner;

use crate::context::Binding;

pub struct CheckerShared {
    pub interner: TypeInterner,
    pub atoms: Interner,
    /// Filled in as each module finishes its `Checker::run`; a module's
    /// entry only exists once that module has been fully checked, so a
    /// module participating in a true import cycle sees nothing here for
    /// whichever of its cyclic dependencies hasn't been checked yet (it
    /// still sees that dependency's pre-declared classes/interfaces, via
    /// placeholder `TypeId`s reserved during that dependency's own
    /// `predeclare`, once that dependency *has* run).
    pub module_exports: FxHashMap<String, FxHashMap<Atom, Binding>>,
    /// The flat, accumulated prelude scope: every symbol declared by a
    /// prelude module processed so far. Prelude modules see only the
    /// prelude declared before them, so the orchestrator
    /// grows this map incrementally rather than handing every prelude
    /// module the final, complete prelude.
    pub prelude: FxHashMap<Atom, Binding>,
}

impl CheckerShared {
    pub fn new() -> Self {
        CheckerShared {
            interner: TypeInterner::new(),
            atoms: Interner::new(),
            module_exports: FxHashMap::default(),
            prelude: FxHashMap::default(),
        }
    }
}

impl Default for CheckerShared {
    fn default() -> Self {
        CheckerShared::new()
    }
}
