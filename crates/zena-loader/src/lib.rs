//! Module graph loading for the zena compiler: resolves and parses an
//! entry module and everything it transitively imports, via a host-
//! provided [`Host`] implementation, and orders the result for checking.

mod graph;
mod host;
mod module;
pub mod testing;

pub use graph::{ModuleGraph, load_graph};
pub use host::{Host, HostError};
pub use module::{ModuleMap, ModuleRecord};

#[cfg(test)]
mod tests {
    use super::*;
    use testing::MemoryHost;
    use zena_common::{CompilerOptions, Interner};

    #[test]
    fn loads_entry_and_its_transitive_import() {
        let host = MemoryHost::new()
            .with_file("main.zena", "import {} from \"./util\";\nlet x = 1;")
            .with_file("util.zena", "let y = 2;");
        let mut atoms = Interner::new();
        let (graph, diagnostics) = load_graph(&host, "main.zena", &CompilerOptions::default(), &mut atoms);
        assert!(diagnostics.is_empty());
        assert_eq!(graph.modules.len(), 2);
        assert!(graph.modules.contains_key("util.zena"));
    }

    #[test]
    fn unresolvable_import_is_a_diagnostic_not_a_panic() {
        let host = MemoryHost::new().with_file("main.zena", "import {} from \"./missing\";");
        let mut atoms = Interner::new();
        let (graph, _) = load_graph(&host, "main.zena", &CompilerOptions::default(), &mut atoms);
        let main = &graph.modules["main.zena"];
        assert!(main.diagnostics.has_errors());
    }

    #[test]
    fn check_order_places_dependency_before_dependent() {
        let host = MemoryHost::new()
            .with_file("main.zena", "import {} from \"./util\";")
            .with_file("util.zena", "");
        let mut atoms = Interner::new();
        let (graph, _) = load_graph(&host, "main.zena", &CompilerOptions::default(), &mut atoms);
        let util_pos = graph.check_order.iter().position(|p| p == "util.zena").unwrap();
        let main_pos = graph.check_order.iter().position(|p| p == "main.zena").unwrap();
        assert!(util_pos < main_pos);
    }

    #[test]
    fn a_cycle_is_permitted_and_still_produces_a_deterministic_order() {
        let host = MemoryHost::new()
            .with_file("a.zena", "import {} from \"./b\";")
            .with_file("b.zena", "import {} from \"./a\";");
        let mut atoms = Interner::new();
        let (graph, diagnostics) = load_graph(&host, "a.zena", &CompilerOptions::default(), &mut atoms);
        assert!(diagnostics.is_empty());
        assert_eq!(graph.check_order.len(), 2);
    }

    #[test]
    fn stdlib_modules_are_flagged() {
        let host = MemoryHost::new().with_file("main.zena", "import {} from \"zena:string\";");
        let mut atoms = Interner::new();
        let (graph, _) = load_graph(&host, "main.zena", &CompilerOptions::default(), &mut atoms);
        // The stdlib module itself was never loaded (no file registered for
        // it), but the entry's own flag reflects its own path.
        assert!(!graph.modules["main.zena"].is_stdlib);
    }
}
