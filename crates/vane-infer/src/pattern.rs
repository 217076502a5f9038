//! Marked patterns (spec.md §4.3, §4.4).

use crate::literal::Literal;
use vane_common::{Atom, ConstraintReason, NodeId, Span};

#[derive(Clone, Debug, PartialEq)]
pub enum MarkedPattern {
    Wildcard,
    Binding(Atom),
    Literal(Literal),
    Tuple(Vec<MarkedPatternNode>),
    Constructor { type_name: Atom, ctor: Atom, fields: Vec<MarkedPatternNode> },
    /// `AllErrors` on a `Result` scrutinee; carries the result type's name.
    AllErrors { result_type_name: Atom },
    /// A pattern that failed to elaborate locally. Lowering turns this into
    /// a wildcard (spec.md §4.4 "mark_pattern -> a wildcard pattern").
    Mark(ConstraintReason),
}

#[derive(Clone, Debug, PartialEq)]
pub struct MarkedPatternNode {
    pub id: NodeId,
    pub span: Option<Span>,
    pub pattern: MarkedPattern,
}

impl MarkedPatternNode {
    #[must_use]
    pub fn new(id: NodeId, pattern: MarkedPattern) -> Self {
        Self { id, span: None, pattern }
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }
}

#[cfg(test)]
#[path = "../tests/pattern.rs"]
mod tests;
