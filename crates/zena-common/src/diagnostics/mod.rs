//! The diagnostic bag: every phase reports errors and warnings as values,
//! never by throwing. A `DiagnosticBag` collects them per module; the
//! pipeline always produces the best partial output it can alongside them.

pub mod codes;

use crate::position::{LineMap, SourceLocation};
use crate::span::Span;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Severity {
    Warning,
    Error,
}

/// One diagnostic message with a stable numeric code and an optional
/// resolved source location (unresolved until a `LineMap` is available,
/// e.g. for diagnostics raised on synthesized nodes with no source span).
#[derive(Clone, Debug, Serialize)]
pub struct Diagnostic {
    pub code: u32,
    pub severity: Severity,
    pub message: String,
    pub span: Span,
    pub location: Option<SourceLocation>,
}

impl Diagnostic {
    pub fn error(code: u32, message: impl Into<String>, span: Span) -> Self {
        Diagnostic {
            code,
            severity: Severity::Error,
            message: message.into(),
            span,
            location: None,
        }
    }

    pub fn warning(code: u32, message: impl Into<String>, span: Span) -> Self {
        Diagnostic {
            code,
            severity: Severity::Warning,
            message: message.into(),
            span,
            location: None,
        }
    }

    /// Resolve `span` into a human-facing location using `map`.
    #[must_use]
    pub fn with_location(mut self, file: &str, map: &LineMap) -> Self {
        if !self.span.is_dummy() {
            self.location = Some(map.location(file, self.span));
        }
        self
    }
}

/// A per-module bag of diagnostics. Append-only during a phase; never
/// causes the phase to abort.
#[derive(Default, Clone, Debug)]
pub struct DiagnosticBag {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticBag {
    pub fn new() -> Self {
        DiagnosticBag::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn error(&mut self, code: u32, message: impl Into<String>, span: Span) {
        self.push(Diagnostic::error(code, message, span));
    }

    pub fn warning(&mut self, code: u32, message: impl Into<String>, span: Span) {
        self.push(Diagnostic::warning(code, message, span));
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn extend(&mut self, other: DiagnosticBag) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// Resolve every diagnostic's span into a `SourceLocation` for `file`.
    pub fn resolve_locations(&mut self, file: &str, map: &LineMap) {
        for d in &mut self.diagnostics {
            if d.location.is_none() && !d.span.is_dummy() {
                d.location = Some(map.location(file, d.span));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_errors_ignores_warnings() {
        let mut bag = DiagnosticBag::new();
        bag.warning(codes::UNREACHABLE_CODE, "unreachable", Span::new(0, 1));
        assert!(!bag.has_errors());
        bag.error(codes::SYMBOL_NOT_FOUND, "not found", Span::new(0, 1));
        assert!(bag.has_errors());
    }

    #[test]
    fn resolve_locations_fills_in_line_column() {
        let mut bag = DiagnosticBag::new();
        bag.error(codes::SYMBOL_NOT_FOUND, "'y' not found", Span::new(8, 9));
        let map = LineMap::new("let x = y;");
        bag.resolve_locations("main.zena", &map);
        let d = bag.iter().next().unwrap();
        let loc = d.location.as_ref().unwrap();
        assert_eq!(loc.file, "main.zena");
        assert_eq!(loc.line, 1);
    }

    #[test]
    fn dummy_span_is_never_resolved() {
        let mut bag = DiagnosticBag::new();
        bag.error(codes::INTERNAL_ERROR, "synthetic", Span::dummy());
        let map = LineMap::new("");
        bag.resolve_locations("main.zena", &map);
        assert!(bag.iter().next().unwrap().location.is_none());
    }
}
