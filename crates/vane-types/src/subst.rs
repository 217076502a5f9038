//! Substitution and free-variable analysis (spec.md §4.1).

use crate::type_repr::{Type, VarId};
use indexmap::IndexMap;
use std::collections::BTreeSet;
use vane_common::limits::{MAX_SUBSTITUTION_CHASE_STEPS, MAX_TYPE_RECURSION_DEPTH};

/// `v -> Type` mapping. Insertion order matters for `compose_substitution`.
#[derive(Clone, Debug, Default)]
pub struct Substitution {
    map: IndexMap<VarId, Type>,
}

impl Substitution {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Inserts `var -> ty`, skipping the identity mapping `v -> v`.
    pub fn insert(&mut self, var: VarId, ty: Type) {
        if matches!(&ty, Type::Variable(v) if *v == var) {
            return;
        }
        self.map.insert(var, ty);
    }

    #[must_use]
    pub fn get(&self, var: VarId) -> Option<&Type> {
        self.map.get(&var)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (VarId, Type)>) -> Self {
        let mut subst = Self::empty();
        for (v, t) in pairs {
            subst.insert(v, t);
        }
        subst
    }
}

/// Chases `v -> v' -> ...` iteratively, stopping after
/// [`MAX_SUBSTITUTION_CHASE_STEPS`] hops rather than looping on a cycle.
fn chase_variable(start: VarId, subst: &Substitution) -> Type {
    let mut current = start;
    for _ in 0..MAX_SUBSTITUTION_CHASE_STEPS {
        match subst.get(current) {
            Some(Type::Variable(next)) => current = *next,
            Some(other) => return other.clone(),
            None => return Type::Variable(current),
        }
    }
    Type::Variable(current)
}

/// Replaces variables in `ty` by their images under `subst`.
#[must_use]
pub fn apply_substitution(ty: &Type, subst: &Substitution) -> Type {
    apply_substitution_depth(ty, subst, 0)
}

fn apply_substitution_depth(ty: &Type, subst: &Substitution, depth: u32) -> Type {
    if depth >= MAX_TYPE_RECURSION_DEPTH {
        return ty.clone();
    }
    let rec = |t: &Type| apply_substitution_depth(t, subst, depth + 1);
    match ty {
        Type::Variable(v) => chase_variable(*v, subst),
        Type::Function { from, to } => Type::function(rec(from), rec(to)),
        Type::Constructor { name, args } => {
            Type::constructor(name.clone(), args.iter().map(rec).collect())
        }
        Type::Tuple(elems) => Type::Tuple(elems.iter().map(rec).collect()),
        Type::Array(elem) => Type::array(rec(elem)),
        Type::Record(fields) => {
            Type::Record(fields.iter().map(|(k, v)| (k.clone(), rec(v))).collect())
        }
        Type::EffectRow { cases, tail } => {
            let cases = cases
                .iter()
                .map(|(label, payload)| (label.clone(), payload.as_ref().map(rec)))
                .collect();
            let tail = tail.as_deref().map(rec);
            Type::row(cases, tail)
        }
        Type::Int | Type::Bool | Type::Char | Type::String | Type::Unit => ty.clone(),
    }
}

/// `compose_substitution(a, b) = λx. a(b(x))`. Preserves insertion order
/// from `b` then `a`; skips identity mappings produced by either input.
#[must_use]
pub fn compose_substitution(a: &Substitution, b: &Substitution) -> Substitution {
    let mut result = Substitution::empty();
    for (&var, ty) in &b.map {
        result.insert(var, apply_substitution(ty, a));
    }
    for (&var, ty) in &a.map {
        if result.get(var).is_none() {
            result.insert(var, ty.clone());
        }
    }
    result
}

#[must_use]
pub fn occurs_in_type(id: VarId, ty: &Type) -> bool {
    occurs_in_type_depth(id, ty, 0)
}

fn occurs_in_type_depth(id: VarId, ty: &Type, depth: u32) -> bool {
    if depth >= MAX_TYPE_RECURSION_DEPTH {
        return false;
    }
    match ty {
        Type::Variable(v) => *v == id,
        Type::Function { from, to } => {
            occurs_in_type_depth(id, from, depth + 1) || occurs_in_type_depth(id, to, depth + 1)
        }
        Type::Constructor { args, .. } => args.iter().any(|a| occurs_in_type_depth(id, a, depth + 1)),
        Type::Tuple(elems) => elems.iter().any(|e| occurs_in_type_depth(id, e, depth + 1)),
        Type::Array(elem) => occurs_in_type_depth(id, elem, depth + 1),
        Type::Record(fields) => fields.values().any(|v| occurs_in_type_depth(id, v, depth + 1)),
        Type::EffectRow { cases, tail } => {
            cases.values().any(|p| p.as_ref().is_some_and(|t| occurs_in_type_depth(id, t, depth + 1)))
                || tail.as_deref().is_some_and(|t| occurs_in_type_depth(id, t, depth + 1))
        }
        Type::Int | Type::Bool | Type::Char | Type::String | Type::Unit => false,
    }
}

#[must_use]
pub fn free_type_vars(ty: &Type) -> BTreeSet<VarId> {
    let mut out = BTreeSet::new();
    collect_free_vars(ty, &mut out, 0);
    out
}

fn collect_free_vars(ty: &Type, out: &mut BTreeSet<VarId>, depth: u32) {
    if depth >= MAX_TYPE_RECURSION_DEPTH {
        return;
    }
    match ty {
        Type::Variable(v) => {
            out.insert(*v);
        }
        Type::Function { from, to } => {
            collect_free_vars(from, out, depth + 1);
            collect_free_vars(to, out, depth + 1);
        }
        Type::Constructor { args, .. } => {
            for a in args {
                collect_free_vars(a, out, depth + 1);
            }
        }
        Type::Tuple(elems) => {
            for e in elems {
                collect_free_vars(e, out, depth + 1);
            }
        }
        Type::Array(elem) => collect_free_vars(elem, out, depth + 1),
        Type::Record(fields) => {
            for v in fields.values() {
                collect_free_vars(v, out, depth + 1);
            }
        }
        Type::EffectRow { cases, tail } => {
            for payload in cases.values().flatten() {
                collect_free_vars(payload, out, depth + 1);
            }
            if let Some(t) = tail.as_deref() {
                collect_free_vars(t, out, depth + 1);
            }
        }
        Type::Int | Type::Bool | Type::Char | Type::String | Type::Unit => {}
    }
}

#[cfg(test)]
#[path = "../tests/subst.rs"]
mod tests;
