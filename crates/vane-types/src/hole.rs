//! The `Hole<T, row>` representation of "unknown" (spec.md §4.1, §4.2, §9).
//!
//! `unknown_type` is the *only* way to construct an unknown type: no
//! `kind: "unknown"` variant exists on [`crate::type_repr::Type`] at all.
//! Provenance is stored as a JSON-encoded string in the row label rather
//! than a structured sum (spec.md §9 flags the structured form as the
//! cleaner choice; this crate keeps the string encoding so provenance stays
//! representable as plain row labels without a separate side table).

use crate::scheme::TypeVarGen;
use crate::type_repr::Type;
use indexmap::IndexMap;
use serde::Serialize;
use vane_common::Atom;

pub const HOLE_CONSTRUCTOR_NAME: &str = "Hole";

/// Builds `Hole<v, row>` where `v` is fresh and `row` has exactly one
/// `hole:<json>` label with a null payload.
#[must_use]
pub fn unknown_type(provenance: &impl Serialize, gen: &mut TypeVarGen) -> Type {
    let var = Type::Variable(gen.fresh());
    let label = hole_label(provenance);
    let mut cases = IndexMap::new();
    cases.insert(Atom::from(label), None);
    let row = Type::row(cases, None);
    Type::constructor(HOLE_CONSTRUCTOR_NAME, vec![var, row])
}

/// Appends an additional reason to an existing hole's row under a
/// `hole_effect:N` label with a non-null payload (spec.md §4.2).
#[must_use]
pub fn add_hole_effect(hole: Type, index: u32, payload: Type) -> Type {
    let Type::Constructor { name, mut args } = hole else { return hole };
    if name.as_str() != HOLE_CONSTRUCTOR_NAME || args.len() != 2 {
        return Type::Constructor { name, args };
    }
    let row = args.pop().expect("hole row");
    let value = args.pop().expect("hole value var");
    let Type::EffectRow { mut cases, tail } = row else {
        return Type::constructor(HOLE_CONSTRUCTOR_NAME, vec![value, row]);
    };
    cases.insert(Atom::from(format!("hole_effect:{index}")), Some(payload));
    Type::constructor(HOLE_CONSTRUCTOR_NAME, vec![value, Type::row(cases, tail.map(|t| *t))])
}

fn hole_label(provenance: &impl Serialize) -> String {
    let json = serde_json::to_string(provenance).unwrap_or_else(|_| "null".to_string());
    format!("hole:{json}")
}

#[must_use]
pub fn is_hole(ty: &Type) -> bool {
    matches!(ty, Type::Constructor { name, args } if name.as_str() == HOLE_CONSTRUCTOR_NAME && args.len() == 2)
}

#[cfg(test)]
#[path = "../tests/hole.rs"]
mod tests;
