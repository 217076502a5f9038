//! Orchestrates the in-scope pipeline stages over an already-assembled
//! Core IR graph: carrier-op elaboration, monomorphization, raw-type
//! lowering (spec.md §2 step 4, via `vane_passes::run_passes`), then
//! backend emission (spec.md §4.8, via `vane_emit::emit_graph`).
//!
//! Reading the entry file and building the `CoreModuleGraph` itself is the
//! one step this crate performs that isn't owned by any C1–C4 component:
//! the surface parser, module loader, and inference/lowering front end are
//! external collaborators (spec.md §1 "Deliberately out of scope"), so the
//! graph they would hand off is accepted here as JSON.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use vane_common::Backend;
use vane_emit::{emit_graph, EmitSummary};
use vane_ir::CoreModuleGraph;

use crate::args::CompileArgs;

/// Reads the JSON-encoded `CoreModuleGraph` at `path`.
#[tracing::instrument(level = "debug", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_graph(path: impl AsRef<Path>) -> Result<CoreModuleGraph> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read entry file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse Core IR graph from {}", path.display()))
}

/// Fills in `CoreModule::mode` for any module that doesn't already carry
/// an explicit backend, using the CLI's `--backend` default. A module's
/// own `mode` (set by the upstream front end) always wins.
fn apply_default_backend(mut graph: CoreModuleGraph, default_backend: Backend) -> CoreModuleGraph {
    for module in graph.modules.values_mut() {
        if module.mode.is_none() {
            module.mode = Some(default_backend);
        }
    }
    graph
}

/// Runs the full `compile` pipeline: load, pass, emit.
#[tracing::instrument(level = "info", skip(args), fields(entry_file = %args.entry_file.display()))]
pub fn compile(args: &CompileArgs) -> Result<EmitSummary> {
    let graph = load_graph(&args.entry_file)?;
    let graph = apply_default_backend(graph, args.backend.into());

    let passed = vane_passes::run_passes(&graph);

    let options = args.emit_options();
    emit_graph(&passed, &options).with_context(|| {
        format!("failed to emit module graph to {}", options.out_dir.display())
    })
}

#[cfg(test)]
#[path = "../tests/driver.rs"]
mod tests;
