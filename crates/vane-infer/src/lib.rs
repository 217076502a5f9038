//! The marked inference boundary (spec.md §4.3): data shapes produced by
//! the (external) inference stage and consumed by `vane-ir`'s lowering.
//!
//! Nothing in this crate performs unification or constraint solving — it
//! only defines the contract `lowerProgramToValues` relies on:
//! `resolvedNodeTypes`, a closed set of `ConstraintDiagnostic` reasons
//! (reused from `vane-common`), and a marked AST where locally-failed nodes
//! are replaced by a `Mark` variant that preserves their sub-expressions.

pub mod expr;
pub use expr::{BlockStmt, Mark, MarkedExpr, MarkedExprNode, MarkedMatchArm};

pub mod literal;
pub use literal::Literal;

pub mod pattern;
pub use pattern::{MarkedPattern, MarkedPatternNode};

pub mod program;
pub use program::{
    InferenceOutput, InfectiousMetadata, MarkedLet, MarkedProgram, MarkedTypeDecl,
    RecordDefaultExprs, ResolvedNodeTypes,
};
