//! Shared harness for the checker's own integration tests: parses one
//! module's source directly (skipping the loader, since these tests never
//! need multi-module resolution) and runs it through `Checker::for_module`.

use zena_checker::{CheckerShared, Checker};
use zena_common::{DiagnosticBag, Interner};
use zena_loader::ModuleRecord;

pub struct Checked {
    pub diagnostics: DiagnosticBag,
}

impl Checked {
    pub fn codes(&self) -> Vec<u32> {
        self.diagnostics.iter().map(|d| d.code).collect()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }
}

pub fn check(source: &str) -> Checked {
    let mut atoms = Interner::new();
    let (arena, program, parse_diagnostics) = zena_parser::parse_module(source, &mut atoms);
    assert!(parse_diagnostics.is_empty(), "unexpected parse diagnostics: {parse_diagnostics:?}");
    let module = ModuleRecord {
        path: "main.zena".to_string(),
        source: source.to_string(),
        arena,
        program,
        is_stdlib: false,
        imports: Vec::new(),
        diagnostics: DiagnosticBag::new(),
    };
    let mut shared = CheckerShared::new();
    let mut checker = Checker::for_module(&module, &mut shared);
    checker.run(&module);
    Checked { diagnostics: checker.diagnostics }
}
