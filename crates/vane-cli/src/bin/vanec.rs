use std::process::ExitCode;

use clap::Parser;
use vane_cli::args::{CliArgs, Command};
use vane_cli::{driver, trace};

fn main() -> ExitCode {
    let args = CliArgs::parse();
    trace::init(args.verbose);

    let result = match &args.command {
        Command::Compile(compile_args) => driver::compile(compile_args),
    };

    match result {
        Ok(summary) => {
            for path in &summary.written_files {
                tracing::info!(path = %path.display(), "wrote");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(1)
        }
    }
}
