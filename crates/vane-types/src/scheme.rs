//! Type schemes, environments, and generalize/instantiate (spec.md §3.2, §4.1).

use crate::subst::{apply_substitution, free_type_vars, Substitution};
use crate::type_repr::{Type, VarId};
use rustc_hash::FxHashMap;
use std::collections::BTreeSet;
use vane_common::Atom;

/// A generalized type: `quantifiers` are the variable ids that `instantiate`
/// refreshes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TypeScheme {
    pub quantifiers: Vec<VarId>,
    pub ty: Type,
}

impl TypeScheme {
    #[must_use]
    pub fn monomorphic(ty: Type) -> Self {
        Self { quantifiers: Vec::new(), ty }
    }
}

#[must_use]
pub fn free_type_vars_scheme(scheme: &TypeScheme) -> BTreeSet<VarId> {
    let mut ftv = free_type_vars(&scheme.ty);
    for q in &scheme.quantifiers {
        ftv.remove(q);
    }
    ftv
}

/// `name -> TypeScheme`. Keys are unique; insertion order is irrelevant
/// (spec.md §3.2), so an `FxHashMap` is the right shape rather than an
/// `IndexMap`.
#[derive(Clone, Debug, Default)]
pub struct TypeEnv {
    bindings: FxHashMap<Atom, TypeScheme>,
}

impl TypeEnv {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: Atom, scheme: TypeScheme) {
        self.bindings.insert(name, scheme);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TypeScheme> {
        self.bindings.get(name)
    }

    #[must_use]
    pub fn free_type_vars(&self) -> BTreeSet<VarId> {
        let mut ftv = BTreeSet::new();
        for scheme in self.bindings.values() {
            ftv.extend(free_type_vars_scheme(scheme));
        }
        ftv
    }
}

/// Allocates fresh type variable ids. Reset per inference run (spec.md §3.4).
#[derive(Debug, Default)]
pub struct TypeVarGen {
    next: VarId,
}

impl TypeVarGen {
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    pub fn fresh(&mut self) -> VarId {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Ensures subsequently allocated ids cannot collide with `floor`
    /// (used by `instantiate` so fresh vars never shadow quantified ones).
    pub fn bump_past(&mut self, floor: VarId) {
        if self.next <= floor {
            self.next = floor + 1;
        }
    }
}

/// `generalize(type, env, extras)`: quantifiers are `ftv(type) \ ftv(env) ∪ extras`,
/// in ascending order for determinism.
#[must_use]
pub fn generalize(ty: &Type, env: &TypeEnv, extras: &[VarId]) -> TypeScheme {
    let mut quantifiers: BTreeSet<VarId> = free_type_vars(ty);
    for bound in env.free_type_vars() {
        quantifiers.remove(&bound);
    }
    quantifiers.extend(extras.iter().copied());
    TypeScheme { quantifiers: quantifiers.into_iter().collect(), ty: ty.clone() }
}

/// `instantiate(scheme)`: refreshes every quantifier with a fresh variable,
/// bumping the generator past any quantifier id.
#[must_use]
pub fn instantiate(scheme: &TypeScheme, gen: &mut TypeVarGen) -> Type {
    for &q in &scheme.quantifiers {
        gen.bump_past(q);
    }
    let mut subst = Substitution::empty();
    for &q in &scheme.quantifiers {
        subst.insert(q, Type::Variable(gen.fresh()));
    }
    apply_substitution(&scheme.ty, &subst)
}

#[cfg(test)]
#[path = "../tests/scheme.rs"]
mod tests;
