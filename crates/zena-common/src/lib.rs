//! Common types shared by every crate in the zena compiler core:
//! string interning, source spans and positions, diagnostics, compiler
//! limits and options.

pub mod diagnostics;
pub mod interner;
pub mod limits;
pub mod options;
pub mod position;
pub mod span;

pub use diagnostics::{Diagnostic, DiagnosticBag, Severity};
pub use interner::{Atom, Interner};
pub use options::CompilerOptions;
pub use position::{LineMap, Position, Range, SourceLocation};
pub use span::{Span, SpanBuilder, Spanned};
