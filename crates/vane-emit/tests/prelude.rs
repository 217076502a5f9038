use super::*;
use vane_ir::{CoreImport, CoreModule, CoreModuleGraph};

fn module_importing(path: &str, specifier: &str) -> CoreModule {
    let mut module = CoreModule::new(path);
    module.imports.push(CoreImport { specifier: specifier.to_string(), bindings: Vec::new() });
    module
}

#[test]
fn no_prelude_means_no_injection() {
    let mut graph = CoreModuleGraph::new("main.vn");
    graph.insert_module(CoreModule::new("main.vn"));
    let deps = prelude_transitive_deps(&graph);
    assert!(!should_inject_prelude(&graph, "main.vn", false, &deps));
}

#[test]
fn prelude_itself_is_excluded() {
    let mut graph = CoreModuleGraph::new("main.vn");
    graph.prelude = Some("prelude.vn".to_string());
    graph.insert_module(CoreModule::new("prelude.vn"));
    let deps = prelude_transitive_deps(&graph);
    assert!(!should_inject_prelude(&graph, "prelude.vn", false, &deps));
}

#[test]
fn core_modules_are_excluded() {
    let mut graph = CoreModuleGraph::new("main.vn");
    graph.prelude = Some("prelude.vn".to_string());
    graph.insert_module(CoreModule::new("prelude.vn"));
    graph.insert_module(CoreModule::new("core_mod.vn"));
    let deps = prelude_transitive_deps(&graph);
    assert!(!should_inject_prelude(&graph, "core_mod.vn", true, &deps));
}

#[test]
fn transitive_dependency_of_prelude_is_excluded() {
    let mut graph = CoreModuleGraph::new("main.vn");
    graph.prelude = Some("prelude.vn".to_string());
    graph.insert_module(module_importing("prelude.vn", "dep.vn"));
    graph.insert_module(CoreModule::new("dep.vn"));
    let deps = prelude_transitive_deps(&graph);
    assert!(deps.contains("dep.vn"));
    assert!(!should_inject_prelude(&graph, "dep.vn", false, &deps));
}

#[test]
fn ordinary_module_receives_prelude() {
    let mut graph = CoreModuleGraph::new("main.vn");
    graph.prelude = Some("prelude.vn".to_string());
    graph.insert_module(CoreModule::new("prelude.vn"));
    graph.insert_module(CoreModule::new("main.vn"));
    let deps = prelude_transitive_deps(&graph);
    assert!(should_inject_prelude(&graph, "main.vn", false, &deps));
}
