//! The row-union algorithm shared by the error, taint, and `Hole` domains
//! (spec.md §4.2, §9 "Order-sensitive row union").

use indexmap::IndexMap;
use vane_types::Type;

/// Step 1: types that aren't rows become the tail of an otherwise-empty row.
fn ensure_row(ty: Type) -> (IndexMap<vane_common::Atom, Option<Type>>, Option<Type>) {
    match ty {
        Type::EffectRow { cases, tail } => (cases, tail.map(|t| *t)),
        other => (IndexMap::new(), Some(other)),
    }
}

/// Step 2: a row whose tail is itself a row has its cases hoisted so there
/// is at most one level of nesting.
fn flatten(cases: IndexMap<vane_common::Atom, Option<Type>>, tail: Option<Type>) -> (IndexMap<vane_common::Atom, Option<Type>>, Option<Type>) {
    match tail {
        Some(Type::EffectRow { cases: inner_cases, tail: inner_tail }) => {
            let mut merged = cases;
            for (label, payload) in inner_cases {
                merged.entry(label).or_insert(payload);
            }
            (merged, inner_tail.map(|t| *t))
        }
        other => (cases, other),
    }
}

/// Unions two row-like types. Preferring the existing (left) non-null
/// payload on a label collision; tails merge by keeping whichever side is
/// concrete when the other is a variable, otherwise keeping the left.
#[must_use]
pub fn union_rows(left: Type, right: Type) -> Type {
    let (left_cases, left_tail) = flatten_ensure(left);
    let (right_cases, right_tail) = flatten_ensure(right);

    let mut cases = left_cases;
    for (label, payload) in right_cases {
        match cases.get(&label) {
            Some(Some(_)) => {} // left already has a non-null payload, keep it
            Some(None) => {
                if payload.is_some() {
                    cases.insert(label, payload);
                }
            }
            None => {
                cases.insert(label, payload);
            }
        }
    }

    let tail = merge_tails(left_tail, right_tail);
    Type::row(cases, tail)
}

fn flatten_ensure(ty: Type) -> (IndexMap<vane_common::Atom, Option<Type>>, Option<Type>) {
    let (cases, tail) = ensure_row(ty);
    flatten(cases, tail)
}

/// Step 4: if exactly one tail is a type variable, keep the concrete one;
/// otherwise keep the left.
fn merge_tails(left: Option<Type>, right: Option<Type>) -> Option<Type> {
    match (left, right) {
        (Some(Type::Variable(_)), Some(r)) if !matches!(r, Type::Variable(_)) => Some(r),
        (l, _) => l,
    }
}

/// `union(r, r) = r` (spec.md §8 "Round-trip and idempotence").
#[must_use]
pub fn is_idempotent(ty: &Type) -> bool {
    union_rows(ty.clone(), ty.clone()) == *ty
}

#[cfg(test)]
#[path = "../tests/row.rs"]
mod tests;
