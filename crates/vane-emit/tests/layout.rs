use super::*;
use vane_ir::{CoreModule, CoreModuleGraph};

fn graph_with(paths: &[&str]) -> CoreModuleGraph {
    let mut graph = CoreModuleGraph::new(paths[0]);
    for p in paths {
        graph.insert_module(CoreModule::new(*p));
    }
    graph
}

#[test]
fn common_root_is_shared_prefix_of_directories() {
    let graph = graph_with(&["src/a/one.vn", "src/a/b/two.vn", "src/a/three.vn"]);
    assert_eq!(compute_common_root(&graph), vec!["src".to_string(), "a".to_string()]);
}

#[test]
fn common_root_ignores_absolute_paths() {
    let graph = graph_with(&["src/one.vn", "/etc/other.vn"]);
    assert_eq!(compute_common_root(&graph), vec!["src".to_string()]);
}

#[test]
fn absolute_path_is_always_outside_root() {
    let root = vec!["src".to_string()];
    assert!(is_outside_root("/abs/path.vn", &root));
    assert!(!is_outside_root("src/a.vn", &root));
    assert!(is_outside_root("other/a.vn", &root));
}

#[test]
fn sanitize_absolute_replaces_unsafe_characters() {
    assert_eq!(sanitize_absolute("/usr/local/lib.vn"), "_usr_local_lib_vn");
}

#[test]
fn relative_stem_strips_root_and_extension() {
    let root = vec!["src".to_string()];
    assert_eq!(relative_stem("src/a/one.vn", &root), "a/one");
}

#[test]
fn layout_graph_rebases_outside_root_modules_under_wm_cache() {
    let graph = graph_with(&["src/one.vn", "/abs/two.vn"]);
    let layouts = layout_graph(&graph, "js");
    assert_eq!(layouts["src/one.vn"].output_relpath, "one.js");
    assert!(!layouts["src/one.vn"].rebased);
    assert!(layouts["/abs/two.vn"].rebased);
    assert!(layouts["/abs/two.vn"].output_relpath.starts_with(".wm-cache/"));
}

#[test]
fn relative_specifier_uses_dot_slash_for_siblings() {
    assert_eq!(relative_specifier("a.js", "b.js"), "./b");
}

#[test]
fn relative_specifier_walks_up_for_nested_modules() {
    assert_eq!(relative_specifier("a/b/one.js", "a/two.js"), "../two");
}
