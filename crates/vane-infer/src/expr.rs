//! Marked expressions (spec.md §4.3, §4.4).
//!
//! This is the shape `lowerProgramToValues` consumes, not an inference
//! engine: the external inference stage is responsible for producing these
//! values (and the companion `resolvedNodeTypes`/`ConstraintDiagnostic`
//! list) from a surface parse. Nothing here performs unification.

use crate::literal::Literal;
use crate::pattern::MarkedPatternNode;
use vane_common::{Atom, ConstraintReason, NodeId, Span};

#[derive(Clone, Debug, PartialEq)]
pub struct MarkedExprNode {
    pub id: NodeId,
    pub span: Option<Span>,
    pub expr: MarkedExpr,
}

impl MarkedExprNode {
    #[must_use]
    pub fn new(id: NodeId, expr: MarkedExpr) -> Self {
        Self { id, span: None, expr }
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    #[must_use]
    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum BlockStmt {
    /// An expression statement, lowered under a fresh `__stmt_N` name.
    Expr(MarkedExprNode),
    /// A pattern-let statement; lowering introduces a single-case match
    /// over a fresh temporary (spec.md §4.4).
    PatternLet { pattern: MarkedPatternNode, value: MarkedExprNode },
}

#[derive(Clone, Debug, PartialEq)]
pub struct MarkedMatchArm {
    pub pattern: MarkedPatternNode,
    pub guard: Option<MarkedExprNode>,
    pub body: MarkedExprNode,
}

/// A mark: the local-failure variant that replaces a node inference could
/// not resolve, naming the reason and preserving the sub-expression(s) it
/// replaced (spec.md §4.3).
#[derive(Clone, Debug, PartialEq)]
pub enum Mark {
    FreeVar { name: Atom },
    NotFunction { callee: Box<MarkedExprNode> },
    Inconsistent { subject: Box<MarkedExprNode> },
    OccursCheck { subject: Box<MarkedExprNode> },
    Pattern { reason: ConstraintReason },
    /// A type-level hole (`type_expr_unknown` and friends).
    Hole,
}

#[derive(Clone, Debug, PartialEq)]
pub enum MarkedExpr {
    Literal(Literal),
    Var(Atom),
    Tuple(Vec<MarkedExprNode>),
    RecordLiteral {
        explicit: Vec<(Atom, MarkedExprNode)>,
        spreads: Vec<MarkedExprNode>,
    },
    Block(Vec<BlockStmt>, Option<Box<MarkedExprNode>>),
    Lambda {
        params: Vec<Atom>,
        body: Box<MarkedExprNode>,
    },
    Call {
        callee: Box<MarkedExprNode>,
        args: Vec<MarkedExprNode>,
    },
    BinaryOp {
        op: Atom,
        left: Box<MarkedExprNode>,
        right: Box<MarkedExprNode>,
    },
    PrefixOp {
        op: Atom,
        operand: Box<MarkedExprNode>,
    },
    If {
        cond: Box<MarkedExprNode>,
        then_branch: Box<MarkedExprNode>,
        else_branch: Box<MarkedExprNode>,
    },
    Match {
        scrutinee: Box<MarkedExprNode>,
        arms: Vec<MarkedMatchArm>,
        /// Carrier domain this match declares it pattern-matches directly
        /// rather than through elaboration (spec.md §4.5).
        carrier_match: Option<Atom>,
        /// Carrier domain this match declares it discharges.
        discharged_carrier: Option<Atom>,
    },
    /// An anonymous bundle assigned at block scope; lowering expands it to
    /// `lambda(tmp) { match tmp { ... } }` (spec.md §4.4).
    MatchBundleLiteral {
        arms: Vec<MarkedMatchArm>,
    },
    ConstructorApp {
        type_name: Atom,
        ctor: Atom,
        args: Vec<MarkedExprNode>,
    },
    Mark(Mark),
}

#[cfg(test)]
#[path = "../tests/expr.rs"]
mod tests;
