//! Per-nominal-name declaration metadata (spec.md §3.2).

use crate::scheme::TypeScheme;
use crate::type_repr::VarId;
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use vane_common::Atom;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ConstructorInfo {
    pub name: Atom,
    pub arity: usize,
    pub scheme: TypeScheme,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct TypeInfo {
    pub parameters: Vec<VarId>,
    pub constructors: Vec<ConstructorInfo>,
    pub alias: Option<crate::type_repr::Type>,
    pub record_fields: Option<IndexMap<Atom, usize>>,
    pub record_defaults: Option<FxHashSet<Atom>>,
}

impl TypeInfo {
    #[must_use]
    pub fn new(parameters: Vec<VarId>) -> Self {
        Self { parameters, ..Self::default() }
    }

    #[must_use]
    pub fn find_constructor(&self, name: &str) -> Option<&ConstructorInfo> {
        self.constructors.iter().find(|c| c.name.as_str() == name)
    }

    #[must_use]
    pub fn is_alias(&self) -> bool {
        self.alias.is_some()
    }
}

#[cfg(test)]
#[path = "../tests/type_info.rs"]
mod tests;
