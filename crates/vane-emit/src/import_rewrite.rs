//! Import rewriting (spec.md §4.8 item 3): before emitting, imports that
//! point at a sibling module in the graph are redirected to that sibling's
//! emitted path; imports of native target-language files are copied into
//! the output tree at their rebased path, deduplicated by absolute source
//! path (spec.md §5 "Shared-resource policy").

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use std::path::PathBuf;
use vane_ir::{CoreImport, CoreModuleGraph};

use crate::layout::{relative_specifier, sanitize_absolute, ModuleLayout};

/// A rewritten import: either a sibling-module specifier, or a native file
/// to copy verbatim into the output tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RewrittenImport {
    Sibling { specifier: String },
    NativeCopy { source_path: PathBuf, dest_relpath: String },
    /// Not resolvable against the graph or a native file; left as-is (e.g.
    /// a reference to an external package the emitter doesn't own).
    Unchanged { specifier: String },
}

/// A specifier names a native target-language file when it carries a file
/// extension at all — whatever that extension is, it isn't a source-module
/// path (those are looked up in the graph first and never reach here).
fn is_native_target_file(specifier: &str, _target_ext: &str) -> bool {
    specifier.rsplit_once('.').is_some_and(|(_, ext)| !ext.is_empty())
}

/// Rewrites one import against the graph's layout (spec.md §4.8 item 3).
#[must_use]
pub fn rewrite_import(
    import: &CoreImport,
    from_relpath: &str,
    graph: &CoreModuleGraph,
    layouts: &IndexMap<String, ModuleLayout>,
    target_ext: &str,
) -> RewrittenImport {
    if graph.modules.contains_key(&import.specifier) {
        let to_relpath = &layouts[&import.specifier].output_relpath;
        return RewrittenImport::Sibling { specifier: relative_specifier(from_relpath, to_relpath) };
    }
    if import.specifier.starts_with('.') && is_native_target_file(&import.specifier, target_ext) {
        let source_path = PathBuf::from(&import.specifier);
        let dest_relpath = format!(".wm-cache/native/{}", sanitize_absolute(&import.specifier));
        return RewrittenImport::NativeCopy { source_path, dest_relpath };
    }
    RewrittenImport::Unchanged { specifier: import.specifier.clone() }
}

/// Collects the distinct native files to copy across an entire graph,
/// deduplicated by their (string) source path (spec.md §5).
#[must_use]
pub fn collect_native_copies(
    graph: &CoreModuleGraph,
    layouts: &IndexMap<String, ModuleLayout>,
    target_ext: &str,
) -> Vec<(PathBuf, String)> {
    let mut seen = FxHashSet::default();
    let mut out = Vec::new();
    for (path, module) in &graph.modules {
        let from_relpath = &layouts[path].output_relpath;
        for import in &module.imports {
            if let RewrittenImport::NativeCopy { source_path, dest_relpath } =
                rewrite_import(import, from_relpath, graph, layouts, target_ext)
            {
                let key = source_path.to_string_lossy().to_string();
                if seen.insert(key) {
                    out.push((source_path, dest_relpath));
                }
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "../tests/import_rewrite.rs"]
mod tests;
