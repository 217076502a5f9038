//! Multi-backend emission (C4, spec.md §4.8–§4.11): turns a
//! post-pass-pipeline `CoreModuleGraph` into one output file per module,
//! against either the runtime-assisted backend or the raw systems backend.

pub mod context;
pub mod error;
pub mod graph;
pub mod import_rewrite;
pub mod layout;
pub mod name_state;
pub mod options;
pub mod prelude;
pub mod printer;
pub mod raw_backend;
pub mod runtime_backend;

pub use error::{EmitError, EmitResult};
pub use graph::{emit_graph, EmitSummary};
pub use options::EmitOptions;
