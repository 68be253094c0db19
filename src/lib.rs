//! The `zena` root crate: a thin `Compiler` facade wiring the pipeline —
//! `load* → parse* → prelude-load → check(topologically) →
//! inject-prelude-imports → bundle → IR` — out of the lower crates'
//! pieces. It owns nothing the lower crates don't already own; it only
//! sequences them (see DESIGN.md).

mod compiler;

pub use compiler::{CheckedModule, CompileOutput, Compiler};

pub use zena_ast::{NodeArena, NodeId, NodeKind};
pub use zena_bundler::Program;
pub use zena_checker::{Binding, BindingKind, CaptureInfo, Checker, Resolution};
pub use zena_common::diagnostics::codes;
pub use zena_common::{CompilerOptions, Diagnostic, DiagnosticBag, Severity};
pub use zena_loader::{Host, HostError, ModuleMap, ModuleRecord};
pub use zena_types::{TypeId, TypeInterner};
