use super::*;
use std::fs;

use vane_common::Atom;
use vane_ir::{CoreExpr, CoreExprNode, CoreImport, CoreModule, CoreModuleGraph, CoreValueBinding};
use vane_types::Type;

fn answer_binding(name: &str, value: i64) -> CoreValueBinding {
    CoreValueBinding {
        name: name.into(),
        value: CoreExprNode::new(CoreExpr::Literal(vane_ir::CoreLiteral::Int(value)), Type::Int),
        exported: true,
        origin: None,
    }
}

fn options_in(out_dir: &std::path::Path) -> EmitOptions {
    let mut options = EmitOptions::new(out_dir, "js");
    options.runtime_source_path = std::path::PathBuf::from("../../runtime/vane_runtime.js");
    options
}

#[test]
fn single_module_writes_one_output_and_root_main() {
    let dir = tempfile::tempdir().unwrap();
    let mut graph = CoreModuleGraph::new("src/app.vn");
    let mut module = CoreModule::new("src/app.vn");
    module.exports.push(Atom::from("main"));
    module.values.push(answer_binding("main", 42));
    graph.insert_module(module);

    let options = options_in(dir.path());
    let summary = emit_graph(&graph, &options).unwrap();

    assert!(summary.written_files.iter().any(|p| p.ends_with("app.js")));
    assert!(summary.written_files.iter().any(|p| p.ends_with("main.js")));
    assert!(dir.path().join("main.js").exists());
    assert!(summary.written_files.iter().any(|p| p.ends_with("vane_runtime.js")));
}

#[test]
fn multi_module_graph_rewrites_sibling_imports() {
    let dir = tempfile::tempdir().unwrap();
    let mut graph = CoreModuleGraph::new("src/entry.vn");

    let mut helper = CoreModule::new("src/helper.vn");
    helper.exports.push(Atom::from("helper_value"));
    helper.values.push(answer_binding("helper_value", 7));
    graph.insert_module(helper);

    let mut entry = CoreModule::new("src/entry.vn");
    entry.imports.push(CoreImport { specifier: "src/helper.vn".to_string(), bindings: vec![Atom::from("helper_value")] });
    entry.exports.push(Atom::from("main"));
    entry.values.push(answer_binding("main", 1));
    graph.insert_module(entry);

    let options = options_in(dir.path());
    let summary = emit_graph(&graph, &options).unwrap();

    assert!(summary.written_files.iter().any(|p| p.ends_with("entry.js")));
    assert!(summary.written_files.iter().any(|p| p.ends_with("helper.js")));
    let entry_contents = fs::read_to_string(dir.path().join("entry.js")).unwrap();
    assert!(entry_contents.contains("./helper"));
}

#[test]
fn missing_entry_module_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let graph = CoreModuleGraph::new("src/entry.vn");
    let options = options_in(dir.path());
    let err = emit_graph(&graph, &options).unwrap_err();
    assert!(matches!(err, EmitError::MissingEntry { .. }));
}

#[test]
fn runtime_is_not_copied_when_every_module_is_raw() {
    let dir = tempfile::tempdir().unwrap();
    let mut graph = CoreModuleGraph::new("src/entry.vn");
    let mut module = CoreModule::new("src/entry.vn");
    module.mode = Some(vane_common::Backend::Raw);
    module.exports.push(Atom::from("main"));
    module.values.push(answer_binding("main", 1));
    graph.insert_module(module);

    let mut options = options_in(dir.path());
    options.target_ext = "zig".to_string();
    let summary = emit_graph(&graph, &options).unwrap();

    assert!(!summary.written_files.iter().any(|p| p.ends_with("vane_runtime.js")));
}

#[test]
fn disabling_root_main_skips_the_wrapper_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut graph = CoreModuleGraph::new("src/entry.vn");
    let mut module = CoreModule::new("src/entry.vn");
    module.exports.push(Atom::from("main"));
    module.values.push(answer_binding("main", 1));
    graph.insert_module(module);

    let mut options = options_in(dir.path());
    options.emit_root_main = false;
    let summary = emit_graph(&graph, &options).unwrap();

    assert!(!dir.path().join("main.js").exists());
    assert!(summary.written_files.iter().any(|p| p.ends_with("entry.js")));
}
