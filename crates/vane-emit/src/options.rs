//! Inputs to the graph emitter (spec.md §4.8 "Inputs").

use std::path::PathBuf;

/// The bundle of emission-affecting configuration the CLI assembles from
/// its `clap` arguments (SPEC_FULL.md "Configuration": only `vane-cli`
/// knows about `clap`; everything downstream takes a plain struct).
#[derive(Clone, Debug)]
pub struct EmitOptions {
    pub out_dir: PathBuf,
    /// Target file extension, without the leading dot (e.g. `"js"`, `"zig"`).
    pub target_ext: String,
    pub runtime_file_name: String,
    pub runtime_source_path: PathBuf,
    /// Whether the root entry file should invoke `main` if the entry module
    /// exports one (spec.md §4.8 item 6).
    pub invoke_entrypoint: bool,
    /// An explicit common root overriding the computed one, when the driver
    /// already knows the project root.
    pub common_root: Option<PathBuf>,
    pub emit_runtime: bool,
    pub emit_root_main: bool,
}

impl EmitOptions {
    #[must_use]
    pub fn new(out_dir: impl Into<PathBuf>, target_ext: impl Into<String>) -> Self {
        Self {
            out_dir: out_dir.into(),
            target_ext: target_ext.into(),
            runtime_file_name: "vane_runtime.js".to_string(),
            runtime_source_path: PathBuf::from("runtime/vane_runtime.js"),
            invoke_entrypoint: true,
            common_root: None,
            emit_runtime: true,
            emit_root_main: true,
        }
    }
}
