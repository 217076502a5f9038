//! The process-wide carrier registry (spec.md §3.3, §4.2, §9 "Carrier
//! registry as open dispatch").
//!
//! Registration is append-only during process initialization; lookups try
//! all carriers for a domain in insertion order and the first matching
//! `is` wins. There's no reflection here — just a table of trait objects
//! behind a domain name, which is the systems-language analogue of the
//! source system's vector of function-pointer records.

use rustc_hash::FxHashMap;
use std::sync::{Arc, OnceLock, RwLock};
use vane_common::Atom;
use vane_types::Type;

/// Optional metadata the emitter uses to recognize a carrier's wire shape
/// (spec.md §3.3).
#[derive(Clone, Debug, Default)]
pub struct RuntimeMetadata {
    pub value_constructor: Option<Atom>,
    pub effect_constructors: Vec<Atom>,
}

/// The five required operations for one carrier shape within a domain.
pub trait CarrierOps: Send + Sync {
    /// Whether `ty` is this carrier.
    fn is(&self, ty: &Type) -> bool;
    /// Decomposes `ty` into its clean value type and state type.
    fn split(&self, ty: &Type) -> Option<(Type, Type)>;
    /// Composes a value and state type back into the carrier.
    fn join(&self, value: Type, state: Type) -> Type;
    /// Removes nested carrier wrappers, preserving the combined state.
    fn collapse(&self, ty: &Type) -> Type;
    /// Domain-specific merge of two state types.
    fn union_states(&self, a: Type, b: Type) -> Type;

    fn runtime_metadata(&self) -> Option<&RuntimeMetadata> {
        None
    }
}

type Registry = FxHashMap<Atom, Vec<Arc<dyn CarrierOps>>>;

static REGISTRY: OnceLock<RwLock<Registry>> = OnceLock::new();

fn registry() -> &'static RwLock<Registry> {
    REGISTRY.get_or_init(|| RwLock::new(Registry::default()))
}

/// Appends `ops` to `domain`'s list. Registration is append-only: existing
/// entries for the domain are never removed or reordered.
pub fn register_carrier(domain: impl Into<Atom>, ops: Arc<dyn CarrierOps>) {
    let mut guard = registry().write().unwrap_or_else(std::sync::PoisonError::into_inner);
    guard.entry(domain.into()).or_default().push(ops);
}

fn find_ops(ty: &Type) -> Option<(Atom, Arc<dyn CarrierOps>)> {
    let guard = registry().read().unwrap_or_else(std::sync::PoisonError::into_inner);
    for (domain, candidates) in guard.iter() {
        for ops in candidates {
            if ops.is(ty) {
                return Some((domain.clone(), ops.clone()));
            }
        }
    }
    None
}

fn ops_for_domain(domain: &str) -> Option<Arc<dyn CarrierOps>> {
    let guard = registry().read().unwrap_or_else(std::sync::PoisonError::into_inner);
    guard.get(domain).and_then(|v| v.first().cloned())
}

#[must_use]
pub fn is_carrier_type(ty: &Type) -> bool {
    find_ops(ty).is_some()
}

#[must_use]
pub fn find_carrier_domain(ty: &Type) -> Option<Atom> {
    find_ops(ty).map(|(domain, _)| domain)
}

#[must_use]
pub fn split_carrier(ty: &Type) -> Option<(Type, Type)> {
    let (_, ops) = find_ops(ty)?;
    ops.split(ty)
}

/// Looks up the first-registered ops for `domain` and joins `value`/`state`.
/// Returns `None` if the domain has no registered carrier.
#[must_use]
pub fn join_carrier(domain: &str, value: Type, state: Type) -> Option<Type> {
    ops_for_domain(domain).map(|ops| ops.join(value, state))
}

#[must_use]
pub fn collapse_carrier(ty: &Type) -> Type {
    match find_ops(ty) {
        Some((_, ops)) => ops.collapse(ty),
        None => ty.clone(),
    }
}

#[must_use]
pub fn union_carrier_states(domain: &str, a: Type, b: Type) -> Option<Type> {
    ops_for_domain(domain).map(|ops| ops.union_states(a, b))
}

/// The registered wire-shape metadata for `ty`'s carrier, if any (spec.md
/// §3.3 "Optional runtime metadata"). Used by the runtime-assisted emitter
/// to call `registerInfectiousType` with the right constructor names.
#[must_use]
pub fn runtime_metadata_for(ty: &Type) -> Option<RuntimeMetadata> {
    let (_, ops) = find_ops(ty)?;
    ops.runtime_metadata().cloned()
}

#[cfg(test)]
#[path = "../tests/registry.rs"]
mod tests;
