use super::*;
use vane_ir::{CoreImport, CoreModule, CoreModuleGraph};

fn graph_with_sibling() -> (CoreModuleGraph, indexmap::IndexMap<String, ModuleLayout>) {
    let mut graph = CoreModuleGraph::new("a.vn");
    graph.insert_module(CoreModule::new("a.vn"));
    graph.insert_module(CoreModule::new("b.vn"));
    let layouts = crate::layout::layout_graph(&graph, "js");
    (graph, layouts)
}

#[test]
fn sibling_import_is_redirected_to_relative_specifier() {
    let (graph, layouts) = graph_with_sibling();
    let import = CoreImport { specifier: "b.vn".to_string(), bindings: Vec::new() };
    let rewritten = rewrite_import(&import, "a.js", &graph, &layouts, "js");
    assert_eq!(rewritten, RewrittenImport::Sibling { specifier: "./b".to_string() });
}

#[test]
fn native_file_import_is_copied() {
    let (graph, layouts) = graph_with_sibling();
    let import = CoreImport { specifier: "./vendor.json".to_string(), bindings: Vec::new() };
    let rewritten = rewrite_import(&import, "a.js", &graph, &layouts, "js");
    match rewritten {
        RewrittenImport::NativeCopy { dest_relpath, .. } => {
            assert!(dest_relpath.starts_with(".wm-cache/native/"));
        }
        other => panic!("expected native copy, got {other:?}"),
    }
}

#[test]
fn unresolvable_import_is_left_unchanged() {
    let (graph, layouts) = graph_with_sibling();
    let import = CoreImport { specifier: "some_package".to_string(), bindings: Vec::new() };
    let rewritten = rewrite_import(&import, "a.js", &graph, &layouts, "js");
    assert_eq!(rewritten, RewrittenImport::Unchanged { specifier: "some_package".to_string() });
}

#[test]
fn native_copies_are_deduplicated_by_source_path() {
    let mut graph = CoreModuleGraph::new("a.vn");
    let mut a = CoreModule::new("a.vn");
    a.imports.push(CoreImport { specifier: "./shared.json".to_string(), bindings: Vec::new() });
    let mut b = CoreModule::new("b.vn");
    b.imports.push(CoreImport { specifier: "./shared.json".to_string(), bindings: Vec::new() });
    graph.insert_module(a);
    graph.insert_module(b);
    let layouts = crate::layout::layout_graph(&graph, "js");
    let copies = collect_native_copies(&graph, &layouts, "js");
    assert_eq!(copies.len(), 1);
}
