//! Per-module output path and import-specifier layout (spec.md §4.8 items
//! 1–2, §6 outbound "One target file per module", §8 invariant 7).

use indexmap::IndexMap;
use vane_ir::CoreModuleGraph;

const CACHE_DIR: &str = ".wm-cache";

fn components(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty() && *s != ".").collect()
}

/// A module path is "absolute" (and therefore always outside any computed
/// root) if it starts with `/` or a Windows drive letter (`C:`).
fn is_absolute(path: &str) -> bool {
    path.starts_with('/')
        || path.get(1..2) == Some(":")
            && path.as_bytes().first().is_some_and(u8::is_ascii_alphabetic)
}

/// Computes the longest shared leading-directory prefix of every relative
/// module path in the graph (spec.md §4.8 item 1 "Compute a common root").
/// Absolute paths are ignored when computing the root — they are always
/// "outside" it.
#[must_use]
pub fn compute_common_root(graph: &CoreModuleGraph) -> Vec<String> {
    let relative: Vec<Vec<&str>> = graph
        .modules
        .keys()
        .filter(|p| !is_absolute(p))
        .map(|p| {
            let mut c = components(p);
            c.pop(); // drop the file component itself; root is a directory
            c
        })
        .collect();

    let Some(first) = relative.first() else { return Vec::new() };
    let mut root: Vec<String> = first.iter().map(|s| (*s).to_string()).collect();
    for candidate in &relative[1..] {
        let shared = root.iter().zip(candidate.iter()).take_while(|(a, b)| a.as_str() == **b).count();
        root.truncate(shared);
    }
    root
}

/// Sanitizes an absolute path into a safe relative segment for the cache
/// directory (spec.md §4.8 item 1, §6 `.wm-cache/<sanitized-absolute>`).
#[must_use]
pub fn sanitize_absolute(path: &str) -> String {
    path.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
        .collect()
}

/// Whether `module_path` lies under `root` (and is not itself absolute).
#[must_use]
pub fn is_outside_root(module_path: &str, root: &[String]) -> bool {
    if is_absolute(module_path) {
        return true;
    }
    let comps = components(module_path);
    if comps.len() <= root.len() {
        return true;
    }
    comps.iter().zip(root.iter()).any(|(a, b)| *a != b.as_str())
}

/// The relative-to-root path used to build a module's output file, with its
/// own (source-language) extension stripped.
#[must_use]
pub fn relative_stem(module_path: &str, root: &[String]) -> String {
    let comps = components(module_path);
    let rest = &comps[root.len().min(comps.len())..];
    let mut stemmed: Vec<String> = rest.iter().map(|s| (*s).to_string()).collect();
    if let Some(last) = stemmed.last_mut() {
        if let Some(dot) = last.rfind('.') {
            last.truncate(dot);
        }
    }
    stemmed.join("/")
}

/// Per-module layout: the emitted file's path (relative to `out_dir`,
/// `/`-joined, no leading slash) and the specifier siblings use to import
/// it (same path, used verbatim as a relative specifier root).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleLayout {
    pub output_relpath: String,
    pub rebased: bool,
}

/// Computes `ModuleLayout` for every module in the graph (spec.md §4.8 item
/// 2, §6 "rebased under `.wm-cache`").
#[must_use]
pub fn layout_graph(graph: &CoreModuleGraph, target_ext: &str) -> IndexMap<String, ModuleLayout> {
    let root = compute_common_root(graph);
    let mut layouts = IndexMap::new();
    for path in graph.modules.keys() {
        let (stem, rebased) = if is_outside_root(path, &root) {
            (format!("{CACHE_DIR}/{}", sanitize_absolute(path)), true)
        } else {
            (relative_stem(path, &root), false)
        };
        layouts.insert(path.clone(), ModuleLayout { output_relpath: format!("{stem}.{target_ext}"), rebased });
    }
    layouts
}

/// A POSIX-style relative import specifier from `from`'s directory to `to`'s
/// output path, without the target extension (matching ESM-style relative
/// specifiers the runtime-assisted backend emits).
#[must_use]
pub fn relative_specifier(from_relpath: &str, to_relpath: &str) -> String {
    let from_dir: Vec<&str> = {
        let mut c: Vec<&str> = from_relpath.split('/').collect();
        c.pop();
        c
    };
    let to_no_ext = to_relpath.rsplit_once('.').map_or(to_relpath, |(stem, _)| stem);
    let to_comps: Vec<&str> = to_no_ext.split('/').collect();

    let shared = from_dir.iter().zip(to_comps.iter()).take_while(|(a, b)| a == b).count();
    let ups = from_dir.len() - shared;
    let mut parts: Vec<String> = Vec::new();
    for _ in 0..ups {
        parts.push("..".to_string());
    }
    parts.extend(to_comps[shared..].iter().map(|s| (*s).to_string()));
    let joined = parts.join("/");
    if ups == 0 { format!("./{joined}") } else { joined }
}

#[cfg(test)]
#[path = "../tests/layout.rs"]
mod tests;
