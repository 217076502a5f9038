use super::*;

#[test]
fn compile_args_default_backend_is_runtime() {
    let args = CliArgs::parse_from(["vanec", "compile", "graph.json"]);
    let Command::Compile(compile) = &args.command;
    assert_eq!(compile.backend, CliBackend::Runtime);
    assert_eq!(compile.target_ext, "js");
    assert_eq!(compile.runtime_file, "vane_runtime.js");
}

#[test]
fn compile_args_accepts_raw_backend_and_out_dir() {
    let args = CliArgs::parse_from([
        "vanec",
        "compile",
        "graph.json",
        "--backend",
        "raw",
        "--out-dir",
        "build",
        "--target-ext",
        "zig",
    ]);
    let Command::Compile(compile) = &args.command;
    assert_eq!(compile.backend, CliBackend::Raw);
    assert_eq!(compile.out_dir, std::path::PathBuf::from("build"));
    assert_eq!(compile.target_ext, "zig");
}

#[test]
fn emit_options_mirrors_compile_flags() {
    let args = CliArgs::parse_from([
        "vanec",
        "compile",
        "graph.json",
        "--no-emit-runtime",
        "--no-emit-root-main",
        "--no-invoke-entrypoint",
    ]);
    let Command::Compile(compile) = &args.command;
    let options = compile.emit_options();
    assert!(!options.emit_runtime);
    assert!(!options.emit_root_main);
    assert!(!options.invoke_entrypoint);
}

#[test]
fn verbose_flag_is_global() {
    let args = CliArgs::parse_from(["vanec", "-v", "compile", "graph.json"]);
    assert!(args.verbose);
    let args = CliArgs::parse_from(["vanec", "compile", "graph.json", "-v"]);
    assert!(args.verbose);
}
