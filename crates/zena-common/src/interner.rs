//! String interning for identifier and field-name deduplication.
//!
//! Every identifier the scanner produces, and every record/field name the
//! type system hash-conses, goes through an `Interner` so that equality
//! checks on names are a `u32` comparison rather than a string compare.

use rustc_hash::FxHashMap;
use std::sync::Arc;

/// An interned string handle. Cheap to copy, compare, and hash.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Atom(u32);

impl Atom {
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}

/// A simple, non-thread-safe string interner.
///
/// One `Interner` is owned by the `Compiler` for the lifetime of a single
/// `compile`/`bundle` call; a fresh `Compiler` means a fresh interner
/// (no process-wide singleton — see the "global singletons" redesign note).
#[derive(Default)]
pub struct Interner {
    strings: Vec<Arc<str>>,
    lookup: FxHashMap<Arc<str>, Atom>,
}

impl Interner {
    pub fn new() -> Self {
        Interner::default()
    }

    pub fn intern(&mut self, s: &str) -> Atom {
        if let Some(&atom) = self.lookup.get(s) {
            return atom;
        }
        let arc: Arc<str> = Arc::from(s);
        let atom = Atom(self.strings.len() as u32);
        self.strings.push(arc.clone());
        self.lookup.insert(arc, atom);
        atom
    }

    pub fn resolve(&self, atom: Atom) -> &str {
        &self.strings[atom.0 as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_string_interns_to_same_atom() {
        let mut interner = Interner::new();
        let a = interner.intern("foo");
        let b = interner.intern("foo");
        let c = interner.intern("bar");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn resolve_round_trips() {
        let mut interner = Interner::new();
        let a = interner.intern("hello");
        assert_eq!(interner.resolve(a), "hello");
    }
}
