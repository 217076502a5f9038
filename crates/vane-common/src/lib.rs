//! Foundational types shared across all vane compiler crates.
//!
//! - String interning (`Atom`, `Interner`, `ShardedInterner`)
//! - Node identity (`NodeId`, `IdAllocator`)
//! - Source spans (`Span`, `Spanned`, `SpanBuilder`, `ByteSpan`)
//! - Constraint diagnostics and rendering
//! - Compiler limits and thresholds
//! - Position/Range types for source locations
//! - Source maps for raw-mode string-literal rewrites
//! - Backend selection (`Backend`)

pub mod interner;
pub use interner::{Atom, Interner, ShardedInterner};

pub mod node_id;
pub use node_id::{IdAllocator, NodeId};

pub mod common;
pub use common::Backend;

pub mod span;
pub use span::{ByteSpan, Span, SpanBuilder, Spanned};

pub mod diagnostics;
pub use diagnostics::{ConstraintDiagnostic, ConstraintReason};

pub mod limits;

pub mod position;
pub use position::{LineMap, Location, Position, Range, SourceLocation};

pub mod source_map;
pub use source_map::{SourceMapFile, SourceMapping};
