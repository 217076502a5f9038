use super::*;
use std::fs;

use vane_common::Atom;
use vane_ir::{CoreExpr, CoreLiteral, CoreModuleGraph, CoreModule, CoreNode, CoreValueBinding};
use vane_types::Type;

use crate::args::CliBackend;

fn sample_graph() -> CoreModuleGraph {
    let mut graph = CoreModuleGraph::new("src/entry.vn");
    let mut module = CoreModule::new("src/entry.vn");
    module.exports.push(Atom::from("answer"));
    module.values.push(CoreValueBinding {
        name: Atom::from("answer"),
        value: CoreNode::new(CoreExpr::Literal(CoreLiteral::Int(42)), Type::Int),
        exported: true,
        origin: None,
    });
    graph.insert_module(module);
    graph
}

fn write_graph(dir: &tempfile::TempDir, graph: &CoreModuleGraph) -> std::path::PathBuf {
    let path = dir.path().join("graph.json");
    fs::write(&path, serde_json::to_string_pretty(graph).unwrap()).unwrap();
    path
}

#[test]
fn load_graph_round_trips_through_json() {
    let dir = tempfile::tempdir().unwrap();
    let graph = sample_graph();
    let path = write_graph(&dir, &graph);

    let loaded = load_graph(&path).unwrap();
    assert_eq!(loaded.entry, graph.entry);
    assert_eq!(loaded.modules.len(), graph.modules.len());
}

#[test]
fn load_graph_reports_missing_file() {
    let err = load_graph("/no/such/file.json").unwrap_err();
    assert!(err.to_string().contains("failed to read entry file"));
}

#[test]
fn compile_writes_entry_module_and_root_main() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("out");
    let graph_path = write_graph(&dir, &sample_graph());

    let args = CompileArgs {
        entry_file: graph_path,
        out_dir: out_dir.clone(),
        backend: CliBackend::Runtime,
        target_ext: "js".to_string(),
        runtime_file: "vane_runtime.js".to_string(),
        runtime_source: dir.path().join("missing_runtime.js"),
        no_emit_runtime: true,
        no_emit_root_main: false,
        no_invoke_entrypoint: false,
    };

    let summary = compile(&args).unwrap();
    assert!(summary.written_files.iter().any(|p| p.ends_with("entry.js")));
    assert!(summary.written_files.iter().any(|p| p.ends_with("main.js")));
    assert!(out_dir.join("entry.js").exists());
    assert!(out_dir.join("main.js").exists());
}

#[test]
fn apply_default_backend_leaves_explicit_mode_untouched() {
    let mut graph = sample_graph();
    graph.modules.get_mut("src/entry.vn").unwrap().mode = Some(vane_common::Backend::Raw);
    let graph = apply_default_backend(graph, vane_common::Backend::Runtime);
    assert_eq!(graph.modules["src/entry.vn"].mode, Some(vane_common::Backend::Raw));
}

#[test]
fn apply_default_backend_fills_unset_mode() {
    let graph = apply_default_backend(sample_graph(), vane_common::Backend::Raw);
    assert_eq!(graph.modules["src/entry.vn"].mode, Some(vane_common::Backend::Raw));
}
