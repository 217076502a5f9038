//! The `Type` representation (spec.md §3.1).
//!
//! A `Type` is a tagged variant. Nominal types — ADTs, carriers such as
//! `Result<T, R>`, pointer-like shapes (`Ptr<T, R>`, `ManyPtr<T, R>`), and
//! `Hole<T, R>` (the representation of "unknown") — all share the
//! `Constructor` shape; only `Tuple`, `Array`, `Record`, and `EffectRow` get
//! their own variants because their structural recursion differs from a
//! plain constructor application.

use indexmap::IndexMap;
use vane_common::Atom;

/// A type variable id, allocated from a monotonically increasing counter
/// that resets per inference run (spec.md §3.4 "Lifecycle").
pub type VarId = u32;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Type {
    Variable(VarId),
    Function {
        from: Box<Type>,
        to: Box<Type>,
    },
    /// Nominal application: `name<args...>`. Zero-arity names (`Int`-like
    /// user ADTs, `List<>__Int` after monomorphization) just have an empty
    /// `args`.
    Constructor {
        name: Atom,
        args: Vec<Type>,
    },
    Tuple(Vec<Type>),
    Array(Box<Type>),
    /// Record fields keep stable iteration order (spec.md §3.1).
    Record(IndexMap<Atom, Type>),
    /// The state component of carriers. `tail` is `None` once flattened rows
    /// no longer carry an unresolved "rest" component.
    EffectRow {
        cases: IndexMap<Atom, Option<Type>>,
        tail: Option<Box<Type>>,
    },
    Int,
    Bool,
    Char,
    String,
    Unit,
}

impl Type {
    #[must_use]
    pub fn function(from: Type, to: Type) -> Self {
        Self::Function { from: Box::new(from), to: Box::new(to) }
    }

    #[must_use]
    pub fn constructor(name: impl Into<Atom>, args: Vec<Type>) -> Self {
        Self::Constructor { name: name.into(), args }
    }

    #[must_use]
    pub fn array(elem: Type) -> Self {
        Self::Array(Box::new(elem))
    }

    #[must_use]
    pub fn empty_row() -> Self {
        Self::EffectRow { cases: IndexMap::new(), tail: None }
    }

    /// Build an effect row, inlining a tail that is itself a row so there is
    /// at most one level of row nesting (spec.md §3.1).
    #[must_use]
    pub fn row(mut cases: IndexMap<Atom, Option<Type>>, tail: Option<Type>) -> Self {
        let tail = match tail {
            Some(Self::EffectRow { cases: inner_cases, tail: inner_tail }) => {
                for (label, payload) in inner_cases {
                    cases.entry(label).or_insert(payload);
                }
                inner_tail.map(|t| *t)
            }
            other => other,
        };
        Self::EffectRow { cases, tail: tail.map(Box::new) }
    }

    /// `true` for an effect row with no cases and no tail.
    #[must_use]
    pub fn is_empty_row(&self) -> bool {
        matches!(self, Self::EffectRow { cases, tail } if cases.is_empty() && tail.is_none())
    }

    #[must_use]
    pub fn as_constructor(&self) -> Option<(&Atom, &[Type])> {
        match self {
            Self::Constructor { name, args } => Some((name, args.as_slice())),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_row(&self) -> Option<(&IndexMap<Atom, Option<Type>>, Option<&Type>)> {
        match self {
            Self::EffectRow { cases, tail } => Some((cases, tail.as_deref())),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../tests/type_repr.rs"]
mod tests;
