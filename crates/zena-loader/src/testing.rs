//! An in-memory [`Host`] for the loader's own tests and for other crates'
//! integration tests that need to drive a small multi-module program
//! without touching the filesystem.

use rustc_hash::FxHashMap;
use zena_common::options::STDLIB_SCHEME;

use crate::host::{Host, HostError};

#[derive(Default)]
pub struct MemoryHost {
    files: FxHashMap<String, String>,
}

impl MemoryHost {
    pub fn new() -> Self {
        MemoryHost::default()
    }

    #[must_use]
    pub fn with_file(mut self, path: &str, source: &str) -> Self {
        self.files.insert(path.to_string(), source.to_string());
        self
    }
}

impl Host for MemoryHost {
    fn resolve(&self, specifier: &str, referrer: &str) -> Result<String, HostError> {
        if specifier.starts_with(STDLIB_SCHEME) {
            return Ok(specifier.to_string());
        }
        let resolved = join_relative(referrer, specifier);
        if self.files.contains_key(&resolved) {
            Ok(resolved)
        } else {
            Err(HostError(format!("no such module: {resolved}")))
        }
    }

    fn load(&self, path: &str) -> Result<String, HostError> {
        self.files.get(path).cloned().ok_or_else(|| HostError(format!("no such module: {path}")))
    }
}

/// A minimal, '/'-only relative path join: enough for test fixtures, which
/// never need `..` or drive letters. Bare specifiers (no extension) are
/// assumed to name a `.zena` source file, mirroring a real host's
/// extension-inference step.
fn join_relative(referrer: &str, specifier: &str) -> String {
    let joined = if let Some(rest) = specifier.strip_prefix("./") {
        let dir = referrer.rsplit_once('/').map_or("", |(dir, _)| dir);
        if dir.is_empty() { rest.to_string() } else { format!("{dir}/{rest}") }
    } else {
        specifier.to_string()
    };
    if joined.ends_with(".zena") { joined } else { format!("{joined}.zena") }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_relative_specifier_against_referrer_directory() {
        let host = MemoryHost::new().with_file("src/util.zena", "");
        let resolved = host.resolve("./util", "src/main.zena").unwrap();
        assert_eq!(resolved, "src/util.zena");
    }

    #[test]
    fn stdlib_specifier_is_returned_unchanged() {
        let host = MemoryHost::new();
        let resolved = host.resolve("zena:string", "src/main.zena").unwrap();
        assert_eq!(resolved, "zena:string");
    }

    #[test]
    fn missing_specifier_is_a_host_error() {
        let host = MemoryHost::new();
        assert!(host.resolve("./missing", "src/main.zena").is_err());
    }
}
