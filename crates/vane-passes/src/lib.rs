//! Core IR passes (spec.md §4.5–§4.7): carrier-op elaboration (C3b),
//! monomorphization (C3c), and raw-type lowering (C3d). Run in that order
//! over a `CoreModuleGraph` (spec.md §2 step 4, §4.11): monomorphization and
//! raw-type lowering apply only to `raw`-mode modules.

pub mod binder_scan;
pub use binder_scan::FreshNames;

pub mod type_walk;
pub use type_walk::{map_expr_types, map_pattern_types};

pub mod carrier_elaboration;
pub use carrier_elaboration::elaborate_module;

pub mod monomorphize;
pub use monomorphize::{monomorphize_graph, Instantiation, MonomorphizationResult};

pub mod raw_type_lowering;
pub use raw_type_lowering::{lower_raw_types_graph, lower_raw_types_module};

use vane_ir::CoreModuleGraph;

/// Runs C3b, then (raw modules only) C3c and C3d, over an entire graph —
/// the fixed pass order from spec.md §2/§4.11.
#[must_use]
#[tracing::instrument(level = "info", skip_all, fields(modules = graph.modules.len()))]
pub fn run_passes(graph: &CoreModuleGraph) -> CoreModuleGraph {
    let elaborated = tracing::info_span!("elaborate_carriers").in_scope(|| {
        let mut elaborated = graph.clone();
        for (path, module) in elaborated.modules.iter_mut() {
            let original = &graph.modules[path];
            *module = elaborate_module(original);
        }
        elaborated
    });
    let monomorphized =
        tracing::info_span!("monomorphize").in_scope(|| monomorphize_graph(&elaborated).graph);
    tracing::info_span!("lower_raw_types").in_scope(|| lower_raw_types_graph(&monomorphized))
}

#[cfg(test)]
#[path = "../tests/run_passes.rs"]
mod tests;
