//! The Core IR expression and pattern shapes (spec.md §3.4).

use indexmap::IndexMap;
use vane_common::{Atom, NodeId, Span};
use vane_types::Type;

/// Every Core IR node carries its resolved type plus optional provenance.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CoreNode<T> {
    pub node: T,
    pub ty: Type,
    pub origin: Option<NodeId>,
    pub span: Option<Span>,
}

impl<T> CoreNode<T> {
    #[must_use]
    pub fn new(node: T, ty: Type) -> Self {
        Self { node, ty, origin: None, span: None }
    }

    #[must_use]
    pub fn with_origin(mut self, origin: NodeId) -> Self {
        self.origin = Some(origin);
        self
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

    /// Builds a node carrying its marked-AST origin and span in one call;
    /// every lowering site ends with this (spec.md §4.4).
    #[must_use]
    pub fn finish(origin: NodeId, span: Option<Span>, ty: Type, node: T) -> Self {
        let mut result = Self::new(node, ty).with_origin(origin);
        if let Some(span) = span {
            result = result.with_span(span);
        }
        result
    }
}

pub type CoreExprNode = CoreNode<CoreExpr>;
pub type CorePatternNode = CoreNode<CorePattern>;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum CoreLiteral {
    Int(i64),
    Bool(bool),
    Char(char),
    Str(String),
    Unit,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CoreBinding {
    pub name: Atom,
    pub value: Box<CoreExprNode>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CoreMatchCase {
    pub pattern: CorePatternNode,
    pub body: CoreExprNode,
}

/// Per-match bookkeeping: the full effect row, which constructors are
/// covered, whether the tail is covered, what's missing, and whether the
/// match claims to discharge its carrier (spec.md §3.4).
#[derive(Clone, Debug, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct CoreMatchCoverage {
    pub effect_row: Option<Type>,
    pub covered_constructors: Vec<Atom>,
    pub tail_covered: bool,
    pub missing_constructors: Vec<Atom>,
    pub discharges_carrier: Option<Atom>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum CoreExpr {
    Literal(CoreLiteral),
    Var(Atom),
    Tuple(Vec<CoreExprNode>),
    Record(IndexMap<Atom, CoreExprNode>),
    TupleGet { target: Box<CoreExprNode>, index: usize },
    Data { type_name: Atom, ctor: Atom, fields: Vec<CoreExprNode> },
    Lambda { params: Vec<Atom>, body: Box<CoreExprNode> },
    Call { callee: Box<CoreExprNode>, args: Vec<CoreExprNode> },
    Let { binding: CoreBinding, body: Box<CoreExprNode> },
    LetRec { bindings: Vec<CoreBinding>, body: Box<CoreExprNode> },
    If { cond: Box<CoreExprNode>, then_branch: Box<CoreExprNode>, else_branch: Box<CoreExprNode> },
    /// `op` names the primitive: integer/bool/char arithmetic and
    /// comparisons, `record_get:<field>` for field projection (the target
    /// is the sole argument), address-of, and similar single-instruction
    /// forms (spec.md §4.4, §4.5).
    Prim { op: Atom, args: Vec<CoreExprNode> },
    Match {
        scrutinee: Box<CoreExprNode>,
        cases: Vec<CoreMatchCase>,
        fallback: Option<Box<CoreExprNode>>,
        coverage: Option<CoreMatchCoverage>,
    },
    CarrierWrap { domain: Atom, value: Box<CoreExprNode> },
    CarrierUnwrap { domain: Atom, value: Box<CoreExprNode> },
    CarrierMatch {
        carrier_type: Atom,
        scrutinee: Box<CoreExprNode>,
        cases: Vec<CoreMatchCase>,
        fallback: Option<Box<CoreExprNode>>,
    },
    Coerce { from_type: Type, to_type: Type, expr: Box<CoreExprNode> },
    EnumLiteral { type_name: Atom, variant: Atom },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum CorePattern {
    Wildcard,
    Binding(Atom),
    Literal(CoreLiteral),
    Tuple(Vec<CorePatternNode>),
    Constructor { type_name: Atom, ctor: Atom, fields: Vec<CorePatternNode> },
    /// Matches every remaining effect-row case of a carrier at once
    /// (spec.md §4.4 "Constructor applications ... `all_errors` pattern").
    AllErrors { result_type_name: Atom },
    /// A name re-bound to a value already bound elsewhere in the same
    /// pattern (linear pattern matching against a prior binding).
    Pinned(Atom),
}

impl CoreExpr {
    /// `record_get` is encoded as a primitive rather than its own variant
    /// (spec.md §3.4 lists only `prim(op,args)`, and §4.5 treats
    /// `record_get` as the one primitive whose target is its sole operand).
    #[must_use]
    pub fn record_get(target: CoreExprNode, field: &Atom) -> Self {
        Self::Prim { op: Atom::from(format!("record_get:{field}")), args: vec![target] }
    }

    #[must_use]
    pub fn record_get_field(op: &Atom) -> Option<Atom> {
        op.as_str().strip_prefix("record_get:").map(Atom::from)
    }
}

#[cfg(test)]
#[path = "../tests/core_expr.rs"]
mod tests;
