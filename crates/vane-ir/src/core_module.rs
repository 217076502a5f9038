//! `CoreModule` and `CoreModuleGraph` (spec.md §3.4).

use crate::core_expr::CoreExprNode;
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use vane_common::{Atom, Backend, NodeId};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CoreValueBinding {
    pub name: Atom,
    pub value: CoreExprNode,
    pub exported: bool,
    pub origin: Option<NodeId>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CoreImport {
    pub specifier: String,
    pub bindings: Vec<Atom>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct CoreModule {
    pub path: String,
    pub mode: Option<Backend>,
    pub imports: Vec<CoreImport>,
    pub type_declarations: Vec<vane_infer::MarkedTypeDecl>,
    pub values: Vec<CoreValueBinding>,
    pub exports: Vec<Atom>,
    /// Whether this module is part of the always-available "core" set that
    /// skips prelude injection (spec.md §4.8).
    pub core: bool,
}

impl CoreModule {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into(), ..Self::default() }
    }

    #[must_use]
    pub fn find_value(&self, name: &str) -> Option<&CoreValueBinding> {
        self.values.iter().find(|v| v.name.as_str() == name)
    }
}

/// `order` is a leaves-first topological order over `modules`.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct CoreModuleGraph {
    pub entry: String,
    pub order: Vec<String>,
    pub modules: IndexMap<String, CoreModule>,
    pub prelude: Option<String>,
}

impl CoreModuleGraph {
    #[must_use]
    pub fn new(entry: impl Into<String>) -> Self {
        Self { entry: entry.into(), ..Self::default() }
    }

    pub fn insert_module(&mut self, module: CoreModule) {
        if !self.order.contains(&module.path) {
            self.order.push(module.path.clone());
        }
        self.modules.insert(module.path.clone(), module);
    }

    #[must_use]
    pub fn entry_module(&self) -> Option<&CoreModule> {
        self.modules.get(&self.entry)
    }

    /// Direct import specifiers that resolve to another module in this
    /// graph, keyed by module path.
    #[must_use]
    pub fn import_edges(&self) -> FxHashMap<String, Vec<String>> {
        let mut edges = FxHashMap::default();
        for (path, module) in &self.modules {
            let targets: Vec<String> = module
                .imports
                .iter()
                .map(|i| i.specifier.clone())
                .filter(|s| self.modules.contains_key(s))
                .collect();
            edges.insert(path.clone(), targets);
        }
        edges
    }
}

#[cfg(test)]
#[path = "../tests/core_module.rs"]
mod tests;
