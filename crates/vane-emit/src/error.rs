//! Emission failures (spec.md §7 "Emission failures"): unsupported
//! expression kinds for a backend, and I/O failures writing outputs. Both
//! abort the run; partial output is not cleaned up (spec.md §7).

use std::path::PathBuf;
use vane_common::NodeId;

#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("module {module}: backend does not support this expression ({detail}, at {origin:?})")]
    UnsupportedExpr { module: String, detail: String, origin: Option<NodeId> },

    #[error("module {module}: import {specifier:?} does not resolve to any module in the graph")]
    UnresolvedImport { module: String, specifier: String },

    #[error("graph has no entry module {entry:?}")]
    MissingEntry { entry: String },

    #[error("failed to write {path}: {source}", path = path.display())]
    Io { path: PathBuf, #[source] source: std::io::Error },

    #[error("failed to serialize source map for {path}: {source}", path = path.display())]
    SourceMapSerialize { path: PathBuf, #[source] source: serde_json::Error },
}

pub type EmitResult<T> = Result<T, EmitError>;
