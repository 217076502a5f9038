//! The `markedProgram` / `resolvedTypes` / `recordDefaultExprs` inputs to
//! `lowerProgramToValues` (spec.md §4.4), plus the diagnostics list that
//! accompanies them across the boundary (spec.md §4.3).

use crate::expr::MarkedExprNode;
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use vane_common::{Atom, ConstraintDiagnostic, NodeId};
use vane_types::{Type, TypeInfo};

#[derive(Clone, Debug, PartialEq)]
pub struct MarkedLet {
    pub name: Atom,
    pub params: Vec<Atom>,
    pub value: MarkedExprNode,
    pub exported: bool,
    /// Lets sharing a `Some(id)` form one mutually-recursive `let_rec`
    /// group; every member must lower to a lambda (spec.md §4.4).
    pub recursive_group: Option<u32>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct InfectiousMetadata {
    pub value_constructor: Option<Atom>,
    pub effect_constructors: Vec<Atom>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct MarkedTypeDecl {
    pub name: Atom,
    pub info: TypeInfo,
    /// `Some` iff this declaration's `infectious` metadata is non-null
    /// (spec.md §4.5 "carrier type names").
    pub infectious: Option<InfectiousMetadata>,
}

impl MarkedTypeDecl {
    #[must_use]
    pub fn is_carrier(&self) -> bool {
        self.infectious.is_some()
    }
}

#[derive(Clone, Debug, Default)]
pub struct MarkedProgram {
    pub lets: Vec<MarkedLet>,
    pub type_declarations: Vec<MarkedTypeDecl>,
    pub imports: Vec<Atom>,
}

impl MarkedProgram {
    #[must_use]
    pub fn carrier_type_names(&self) -> Vec<&Atom> {
        self.type_declarations.iter().filter(|d| d.is_carrier()).map(|d| &d.name).collect()
    }
}

pub type ResolvedNodeTypes = FxHashMap<NodeId, Type>;

/// `typeName -> fieldName -> default expression`, evaluated in an ambient
/// scope that binds each already-provided field (spec.md §4.4).
pub type RecordDefaultExprs = FxHashMap<Atom, IndexMap<Atom, MarkedExprNode>>;

#[derive(Clone, Debug, Default)]
pub struct InferenceOutput {
    pub resolved_types: ResolvedNodeTypes,
    pub diagnostics: Vec<ConstraintDiagnostic>,
    pub program: MarkedProgram,
}

#[cfg(test)]
#[path = "../tests/program.rs"]
mod tests;
