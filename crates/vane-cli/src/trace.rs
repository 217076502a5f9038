//! Tracing setup for the `vanec` binary (SPEC_FULL.md "Logging"): the only
//! place in the workspace that installs a `tracing-subscriber` subscriber.
//! Library crates (`vane-ir`, `vane-passes`, `vane-emit`) only emit spans
//! and events via `tracing::instrument`/`tracing::info_span!`.

use tracing_subscriber::EnvFilter;

/// Installs a global subscriber. `verbose` lowers the default filter from
/// `info` to `debug`; `RUST_LOG` always takes precedence when set.
pub fn init(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
