//! Graph-level emission (C4a, spec.md §4.8): computes layout, resolves
//! imports and the prelude, dispatches each module to its backend, and
//! writes every output file plus the runtime and any native copies.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use rustc_hash::FxHashSet;
use vane_common::{source_map::SourceMapFile, Atom, Backend};
use vane_ir::CoreModuleGraph;

use crate::context::{ModuleEmitContext, ResolvedImport};
use crate::error::{EmitError, EmitResult};
use crate::import_rewrite::{collect_native_copies, rewrite_import, RewrittenImport};
use crate::layout::layout_graph;
use crate::options::EmitOptions;
use crate::prelude::{prelude_transitive_deps, should_inject_prelude};
use crate::{raw_backend, runtime_backend};

/// Source-language string-literal extension rewritten by the raw backend
/// (spec.md §6 `"build.vn"` → `"build.zig"`).
const SOURCE_EXT: &str = "vn";

/// What `emit_graph` wrote, for the driver to report or assert against in
/// tests (spec.md §8 invariant 7 "one output file per module").
#[derive(Debug, Default)]
pub struct EmitSummary {
    pub written_files: Vec<PathBuf>,
    pub source_maps: Vec<PathBuf>,
}

/// One module's rendered output, computed off the main thread so file I/O
/// for the whole graph stays on the caller (mirrors the per-file parallel
/// checking pattern: rendering is independent per module, writing is not).
struct RenderedModule {
    out_relpath: String,
    rendered: String,
    source_map: Option<SourceMapFile>,
}

#[tracing::instrument(level = "info", skip_all, fields(modules = graph.modules.len(), out_dir = %options.out_dir.display()))]
pub fn emit_graph(graph: &CoreModuleGraph, options: &EmitOptions) -> EmitResult<EmitSummary> {
    if !graph.modules.contains_key(&graph.entry) {
        return Err(EmitError::MissingEntry { entry: graph.entry.clone() });
    }

    let layouts = layout_graph(graph, &options.target_ext);
    let transitive_prelude_deps = prelude_transitive_deps(graph);
    let mut summary = EmitSummary::default();

    let runtime_specifier_for = |from_relpath: &str, backend: Backend| -> Option<String> {
        if backend.is_raw() || !options.emit_runtime {
            return None;
        }
        Some(crate::layout::relative_specifier(from_relpath, &options.runtime_file_name))
    };

    // Each module renders independently of the others; only the writes below
    // need to happen on the caller. Mirrors the teacher's per-file parallel
    // checking: fan the CPU-bound work out over rayon, keep I/O sequential.
    let module_entries: Vec<_> = graph.modules.iter().collect();
    let rendered_modules: Vec<RenderedModule> = module_entries
        .into_par_iter()
        .map(|(path, module)| -> EmitResult<RenderedModule> {
            let layout = &layouts[path];
            let backend = module.mode.unwrap_or(Backend::Runtime);

            let mut imports = Vec::new();
            for import in &module.imports {
                match rewrite_import(import, &layout.output_relpath, graph, &layouts, &options.target_ext) {
                    RewrittenImport::Sibling { specifier } => {
                        imports.push(ResolvedImport { specifier, bindings: import.bindings.clone() });
                    }
                    RewrittenImport::NativeCopy { dest_relpath, .. } => {
                        let specifier = crate::layout::relative_specifier(&layout.output_relpath, &dest_relpath);
                        imports.push(ResolvedImport { specifier, bindings: import.bindings.clone() });
                    }
                    RewrittenImport::Unchanged { specifier } => {
                        imports.push(ResolvedImport { specifier, bindings: import.bindings.clone() });
                    }
                }
            }

            let prelude_specifier = if should_inject_prelude(graph, path, module.core, &transitive_prelude_deps) {
                graph.prelude.as_ref().map(|prelude_path| {
                    crate::layout::relative_specifier(&layout.output_relpath, &layouts[prelude_path].output_relpath)
                })
            } else {
                None
            };

            let is_entry = path == &graph.entry;
            let forced_exports =
                if is_entry && options.invoke_entrypoint { vec![Atom::from("main")] } else { Vec::new() };

            let ctx = ModuleEmitContext {
                imports,
                prelude_specifier,
                runtime_specifier: runtime_specifier_for(&layout.output_relpath, backend),
                forced_exports,
            };

            let rendered = match backend {
                Backend::Runtime => runtime_backend::emit_module(module, &ctx)?,
                Backend::Raw => raw_backend::emit_module(module, &ctx)?,
            };

            let (rendered, source_map) = if backend.is_raw() {
                rewrite_source_literals(&rendered, &options.target_ext, &layout.output_relpath)
            } else {
                (rendered, None)
            };

            Ok(RenderedModule { out_relpath: layout.output_relpath.clone(), rendered, source_map })
        })
        .collect::<EmitResult<Vec<_>>>()?;

    for module in rendered_modules {
        let out_path = options.out_dir.join(&module.out_relpath);
        write_file(&out_path, &module.rendered)?;
        summary.written_files.push(out_path.clone());

        if let Some(map) = module.source_map {
            if !map.is_empty() {
                let map_path = sibling_with_suffix(&out_path, ".wmmap.json");
                let json = map.to_json().map_err(|source| EmitError::SourceMapSerialize { path: map_path.clone(), source })?;
                write_file(&map_path, &json)?;
                summary.source_maps.push(map_path);
            }
        }
    }

    if options.emit_runtime && graph.modules.values().any(|m| m.mode.unwrap_or(Backend::Runtime) == Backend::Runtime) {
        let runtime_source = fs::read_to_string(&options.runtime_source_path)
            .map_err(|source| EmitError::Io { path: options.runtime_source_path.clone(), source })?;
        let runtime_out = options.out_dir.join(&options.runtime_file_name);
        write_file(&runtime_out, &runtime_source)?;
        summary.written_files.push(runtime_out);
    }

    let mut copied: FxHashSet<String> = FxHashSet::default();
    for (source_path, dest_relpath) in collect_native_copies(graph, &layouts, &options.target_ext) {
        if !copied.insert(dest_relpath.clone()) {
            continue;
        }
        let contents = fs::read(&source_path).map_err(|source| EmitError::Io { path: source_path.clone(), source })?;
        let out_path = options.out_dir.join(&dest_relpath);
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent).map_err(|source| EmitError::Io { path: parent.to_path_buf(), source })?;
        }
        fs::write(&out_path, contents).map_err(|source| EmitError::Io { path: out_path.clone(), source })?;
        summary.written_files.push(out_path);
    }

    if options.emit_root_main {
        if let Some(root_main) = emit_root_main(graph, &layouts, options) {
            let out_path = options.out_dir.join(format!("main.{}", options.target_ext));
            write_file(&out_path, &root_main)?;
            summary.written_files.push(out_path);
        }
    }

    Ok(summary)
}

fn write_file(path: &Path, contents: &str) -> EmitResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| EmitError::Io { path: parent.to_path_buf(), source })?;
    }
    fs::write(path, contents).map_err(|source| EmitError::Io { path: path.to_path_buf(), source })
}

fn sibling_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut s = path.as_os_str().to_os_string();
    s.push(suffix);
    PathBuf::from(s)
}

/// A root re-export/entry file so the project can be run from a single
/// known path regardless of where the entry module landed (spec.md §4.8
/// item 6).
fn emit_root_main(graph: &CoreModuleGraph, layouts: &indexmap::IndexMap<String, crate::layout::ModuleLayout>, options: &EmitOptions) -> Option<String> {
    let entry_layout = layouts.get(&graph.entry)?;
    let specifier = crate::layout::relative_specifier(&format!("main.{}", options.target_ext), &entry_layout.output_relpath);
    let entry_mode = graph.entry_module()?.mode.unwrap_or(Backend::Runtime);
    Some(match entry_mode {
        Backend::Runtime => format!("export * from {specifier:?};\n"),
        Backend::Raw => format!("const entry = @import({specifier:?});\npub usingnamespace entry;\n"),
    })
}

/// Rewrites `"<name>.vn"`-shaped string literals in raw-mode output to the
/// target extension, recording each site in a `.wmmap.json` sidecar
/// (spec.md §6).
fn rewrite_source_literals(rendered: &str, target_ext: &str, gen_file: &str) -> (String, Option<SourceMapFile>) {
    let needle = format!(".{SOURCE_EXT}\"");
    if !rendered.contains(&needle) {
        return (rendered.to_string(), None);
    }

    let mut map = SourceMapFile::new(gen_file);
    let mut out = String::with_capacity(rendered.len());
    let mut gen_line = 0u32;
    let mut gen_col = 0u32;
    let mut chars = rendered.char_indices().peekable();
    let bytes = rendered.as_bytes();

    while let Some((i, c)) = chars.next() {
        if c == '\n' {
            gen_line += 1;
            gen_col = 0;
            out.push(c);
            continue;
        }
        if c == '.' && bytes[i..].starts_with(needle.as_bytes()) {
            let quote_start = rendered[..i].rfind('"').map_or(i, |q| q + 1);
            let src_file = &rendered[quote_start..i + 1 + SOURCE_EXT.len()];
            out.push_str(&format!(".{target_ext}\""));
            map.push(vane_common::source_map::SourceMapping {
                gen_line,
                gen_col,
                src_file: src_file.to_string(),
                src_line: 0,
                src_col: 0,
                src_line_text: None,
            });
            for _ in 0..SOURCE_EXT.len() {
                chars.next();
            }
            chars.next();
            gen_col += u32::try_from(target_ext.len() + 2).unwrap_or(0);
            continue;
        }
        out.push(c);
        gen_col += 1;
    }

    (out, Some(map))
}

#[cfg(test)]
#[path = "../tests/graph.rs"]
mod tests;
