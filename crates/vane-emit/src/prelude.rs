//! Prelude injection (spec.md §4.8 item 4, §8 invariant 8).
//!
//! A module receives an automatic prelude import iff: a prelude exists, the
//! module isn't the prelude itself, the module isn't marked `core`, and the
//! module isn't a transitive dependency of the prelude — computed once via
//! BFS over the graph's import edges so the decision is cycle-free.

use rustc_hash::FxHashSet;
use vane_ir::CoreModuleGraph;

/// Every module reachable from the prelude by following import edges
/// (spec.md §4.8 item 4 "computed by BFS from the prelude over its import
/// edges").
#[must_use]
pub fn prelude_transitive_deps(graph: &CoreModuleGraph) -> FxHashSet<String> {
    let Some(prelude) = &graph.prelude else { return FxHashSet::default() };
    let edges = graph.import_edges();
    let mut seen: FxHashSet<String> = FxHashSet::default();
    let mut queue = std::collections::VecDeque::new();
    if let Some(targets) = edges.get(prelude) {
        for t in targets {
            if seen.insert(t.clone()) {
                queue.push_back(t.clone());
            }
        }
    }
    while let Some(path) = queue.pop_front() {
        if let Some(targets) = edges.get(&path) {
            for t in targets {
                if seen.insert(t.clone()) {
                    queue.push_back(t.clone());
                }
            }
        }
    }
    seen
}

/// Whether `module_path` should receive the automatic prelude import
/// (spec.md §4.8 item 4).
#[must_use]
pub fn should_inject_prelude(
    graph: &CoreModuleGraph,
    module_path: &str,
    is_core: bool,
    transitive_deps: &FxHashSet<String>,
) -> bool {
    let Some(prelude) = &graph.prelude else { return false };
    if module_path == prelude {
        return false;
    }
    if is_core {
        return false;
    }
    !transitive_deps.contains(module_path)
}

#[cfg(test)]
#[path = "../tests/prelude.rs"]
mod tests;
