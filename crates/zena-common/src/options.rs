//! Compiler-wide options, threaded through the loader and checker.
//!
//! Kept in `zena-common` (rather than in `zena-checker`) so the loader can
//! consult `stdlib_prefixes`/`stdlib_scheme` without creating a dependency
//! cycle between the loader and checker crates.

/// The reserved specifier scheme that marks a standard-library import,
/// e.g. `zena:string`. Fixed by the language, but kept as data rather
/// than a literal scattered through the loader and checker.
pub const STDLIB_SCHEME: &str = "zena:";

#[derive(Debug, Clone)]
pub struct CompilerOptions {
    /// Additional path prefixes (beyond the `zena:` scheme) that mark a
    /// resolved path as part of the standard library.
    pub stdlib_prefixes: Vec<String>,
    /// When true, `UnreachableCode` is recorded only as a warning, never
    /// promoted to an error by a caller-side `--strict` policy. The core
    /// always reports it as a warning; this flag exists so a
    /// host can suppress it outright, matching `tsc`'s
    /// `allowUnreachableCode`.
    pub allow_unreachable_code: bool,
    /// Already-resolved module paths to check, in order, as prelude
    /// modules before the entry module's own graph. Each is
    /// loaded exactly like an entry point (its own imports are followed
    /// through `Host`), then checked with `Checker::for_prelude_module` so
    /// it only sees prelude declared before it. Defaults to the single
    /// reserved `zena:prelude` module; a host with no such module should
    /// pass an empty list instead of leaving a dangling `ModuleNotFound`.
    pub prelude_modules: Vec<String>,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        CompilerOptions {
            stdlib_prefixes: Vec::new(),
            allow_unreachable_code: false,
            prelude_modules: vec!["zena:prelude".to_string()],
        }
    }
}

impl CompilerOptions {
    pub fn is_stdlib_path(&self, path: &str) -> bool {
        path.starts_with(STDLIB_SCHEME) || self.stdlib_prefixes.iter().any(|p| path.starts_with(p.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zena_scheme_is_always_stdlib() {
        let opts = CompilerOptions::default();
        assert!(opts.is_stdlib_path("zena:string"));
        assert!(!opts.is_stdlib_path("./app.zena"));
    }

    #[test]
    fn configured_prefix_is_stdlib() {
        let opts = CompilerOptions {
            stdlib_prefixes: vec!["/usr/lib/zena/".to_string()],
            ..Default::default()
        };
        assert!(opts.is_stdlib_path("/usr/lib/zena/collections.zena"));
    }
}
