//! `Host` — the module loader's one fallible boundary.
//!
//! Everything else in the compiler core reports failure as a value in a
//! `DiagnosticBag`; resolving a specifier to a path and reading that path's
//! contents are the two operations that genuinely depend on the outside
//! world (a filesystem, a bundler's virtual file map, a browser's fetch),
//! so they are the only ones modeled as a `Result`-returning trait.

use std::fmt;

/// Implemented by the embedder: a CLI backed by the filesystem, a
/// language-server backed by open editor buffers, a test harness backed by
/// an in-memory map (see [`crate::testing::MemoryHost`]).
pub trait Host {
    /// Resolves an import `specifier` written in `referrer` to a concrete,
    /// normalized module path. Relative specifiers are resolved against
    /// `referrer`'s own path; a `zena:`-scheme specifier is returned
    /// unchanged, since the standard library is addressed by name, not by
    /// filesystem location.
    fn resolve(&self, specifier: &str, referrer: &str) -> Result<String, HostError>;

    /// Reads the source text at an already-resolved module path.
    fn load(&self, path: &str) -> Result<String, HostError>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostError(pub String);

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for HostError {}
