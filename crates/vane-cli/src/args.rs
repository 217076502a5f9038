//! `vanec compile` command-line surface (SPEC_FULL.md "Configuration"):
//! the only place in the workspace that knows about `clap`. Everything
//! that affects emission is translated into a plain `vane_emit::EmitOptions`
//! so the rest of the pipeline stays CLI-agnostic.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use vane_common::Backend;
use vane_emit::EmitOptions;

#[derive(Parser, Debug)]
#[command(name = "vanec", version, about = "The Vane compiler")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose (debug-level) tracing output.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile a Core IR module graph into target-language source.
    ///
    /// `entry_file` is a JSON-encoded `vane_ir::CoreModuleGraph` — the
    /// artifact the (out-of-scope) surface parser, module loader, and
    /// inference/lowering front end produce. `vanec compile` runs only the
    /// in-scope stages: carrier-op elaboration, monomorphization, raw-type
    /// lowering, and backend emission.
    Compile(CompileArgs),
}

#[derive(Parser, Debug)]
pub struct CompileArgs {
    /// Path to the JSON-encoded Core IR module graph to compile.
    pub entry_file: PathBuf,

    /// Output directory for emitted target-language files.
    #[arg(long = "out-dir", default_value = "out")]
    pub out_dir: PathBuf,

    /// Which backend to emit modules that don't already carry an explicit
    /// `mode` with (spec.md §3.4 `CoreModule.mode`, default `runtime`).
    #[arg(long, value_enum, default_value = "runtime")]
    pub backend: CliBackend,

    /// Target file extension, without the leading dot (e.g. `js`, `zig`).
    #[arg(long = "target-ext", default_value = "js")]
    pub target_ext: String,

    /// File name the runtime is copied to inside `--out-dir`.
    #[arg(long = "runtime-file", default_value = "vane_runtime.js")]
    pub runtime_file: String,

    /// Path to the runtime source to byte-copy (spec.md §4.8 item 6).
    #[arg(long = "runtime-source", default_value = "runtime/vane_runtime.js")]
    pub runtime_source: PathBuf,

    /// Skip copying the runtime file into the output directory.
    #[arg(long = "no-emit-runtime")]
    pub no_emit_runtime: bool,

    /// Skip emitting the root `main.<ext>` entry file.
    #[arg(long = "no-emit-root-main")]
    pub no_emit_root_main: bool,

    /// Do not invoke the entry module's `main` export from the root file.
    #[arg(long = "no-invoke-entrypoint")]
    pub no_invoke_entrypoint: bool,
}

/// Mirrors `vane_common::Backend` so `vane-common` doesn't need to depend
/// on `clap` just to be selectable from the command line.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CliBackend {
    Runtime,
    Raw,
}

impl From<CliBackend> for Backend {
    fn from(value: CliBackend) -> Self {
        match value {
            CliBackend::Runtime => Backend::Runtime,
            CliBackend::Raw => Backend::Raw,
        }
    }
}

impl CompileArgs {
    #[must_use]
    pub fn emit_options(&self) -> EmitOptions {
        let mut options = EmitOptions::new(self.out_dir.clone(), self.target_ext.clone());
        options.runtime_file_name = self.runtime_file.clone();
        options.runtime_source_path = self.runtime_source.clone();
        options.emit_runtime = !self.no_emit_runtime;
        options.emit_root_main = !self.no_emit_root_main;
        options.invoke_entrypoint = !self.no_invoke_entrypoint;
        options
    }
}

#[cfg(test)]
#[path = "../tests/args.rs"]
mod tests;
