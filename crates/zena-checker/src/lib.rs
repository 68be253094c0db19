//! Per-module type checker for the zena compiler.
//!
//! `Checker::for_module` is the one canonical entry point — see
//! `checker.rs`'s module doc and DESIGN.md for the design decision this
//! reflects. A whole-program check is `Checker::for_module` called once
//! per module, in the loader's topological order, by the orchestrating
//! `Compiler::compile` (in the root `zena` crate).

mod capture;
mod checker;
mod context;
mod decl;
mod expr;
mod pattern;
mod shared;
mod stmt;
mod type_ann;

pub use checker::{CaptureInfo, Checker};
pub use context::{Binding, BindingKind, Resolution, Scope, ScopeKind};
pub use shared::CheckerShared;
