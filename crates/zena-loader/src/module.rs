//! `ModuleRecord` — one parsed module plus the bookkeeping the loader
//! needs to resolve its imports and order it for checking.

use rustc_hash::FxHashMap;
use zena_ast::{NodeArena, NodeId};
use zena_common::DiagnosticBag;

#[derive(Debug)]
pub struct ModuleRecord {
    /// The normalized, host-resolved path this module was loaded from.
    pub path: String,
    pub source: String,
    pub arena: NodeArena,
    pub program: NodeId,
    /// True for modules under the `zena:` scheme or a configured stdlib
    /// prefix; the checker relaxes `@intrinsic` visibility for these.
    pub is_stdlib: bool,
    /// Import specifier text (as written in source) to the resolved path
    /// it names, in source order of first appearance.
    pub imports: Vec<(String, String)>,
    pub diagnostics: DiagnosticBag,
}

impl ModuleRecord {
    pub fn resolved_import(&self, specifier: &str) -> Option<&str> {
        self.imports.iter().find(|(spec, _)| spec == specifier).map(|(_, path)| path.as_str())
    }
}

pub type ModuleMap = FxHashMap<String, ModuleRecord>;
