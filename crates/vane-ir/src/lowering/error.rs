//! Lowering failures (spec.md §7 kind 2): always carry the offending node.

use vane_common::NodeId;

#[derive(Debug, Clone, thiserror::Error)]
pub enum LoweringError {
    #[error("node {0} has no resolved type")]
    MissingResolvedType(NodeId),

    #[error("recursive binding at node {0} is not a lambda")]
    RecursiveBindingNotLambda(NodeId),

    #[error("unresolvable constructor pattern `{ctor}` on type `{type_name}` at node {node}")]
    UnresolvableConstructorPattern { node: NodeId, type_name: String, ctor: String },

    #[error("unsupported marked form at node {0}")]
    UnsupportedMarkedForm(NodeId),
}

#[cfg(test)]
#[path = "../../tests/lowering_error.rs"]
mod tests;
