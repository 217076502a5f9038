//! The per-module context a backend emits against: its already-rewritten
//! imports (spec.md §4.8 item 3) and the names it must force-export
//! (spec.md §4.8 item 5 "force-export `main` if present").

use vane_common::Atom;

#[derive(Clone, Debug)]
pub struct ResolvedImport {
    pub specifier: String,
    pub bindings: Vec<Atom>,
}

#[derive(Clone, Debug, Default)]
pub struct ModuleEmitContext {
    pub imports: Vec<ResolvedImport>,
    pub prelude_specifier: Option<String>,
    pub runtime_specifier: Option<String>,
    pub forced_exports: Vec<Atom>,
}

impl ModuleEmitContext {
    #[must_use]
    pub fn is_exported(&self, name: &Atom, declared_exported: bool) -> bool {
        declared_exported || self.forced_exports.contains(name)
    }
}
