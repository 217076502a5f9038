//! Shared lowering state: resolved types, record defaults, and the fresh
//! name counter used for statement temporaries (spec.md §4.4).

use crate::lowering::error::LoweringError;
use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use vane_common::{Atom, NodeId};
use vane_infer::{MarkedProgram, RecordDefaultExprs, ResolvedNodeTypes};
use vane_types::{Type, TypeInfo};

pub struct LoweringContext<'a> {
    pub resolved_types: &'a ResolvedNodeTypes,
    pub record_defaults: &'a RecordDefaultExprs,
    pub carrier_type_names: FxHashSet<Atom>,
    /// Per-nominal-name declaration info, used to resolve record field sets
    /// for spreads/defaults and to validate constructor patterns.
    pub type_infos: FxHashMap<Atom, TypeInfo>,
    stmt_counter: u32,
}

impl<'a> LoweringContext<'a> {
    #[must_use]
    pub fn new(
        program: &MarkedProgram,
        resolved_types: &'a ResolvedNodeTypes,
        record_defaults: &'a RecordDefaultExprs,
    ) -> Self {
        let carrier_type_names = program.carrier_type_names().into_iter().cloned().collect();
        let type_infos =
            program.type_declarations.iter().map(|d| (d.name.clone(), d.info.clone())).collect();
        Self { resolved_types, record_defaults, carrier_type_names, type_infos, stmt_counter: 0 }
    }

    pub fn resolved_type(&self, id: NodeId) -> Result<Type, LoweringError> {
        self.resolved_types.get(&id).cloned().ok_or(LoweringError::MissingResolvedType(id))
    }

    /// `__stmt_N` for an expression statement inside a block, or the fresh
    /// temporary a pattern-let/match/bundle-literal binds its scrutinee to.
    pub fn fresh_stmt_name(&mut self) -> Atom {
        let name = Atom::from(format!("__stmt_{}", self.stmt_counter));
        self.stmt_counter += 1;
        name
    }

    pub fn is_carrier_type_name(&self, name: &str) -> bool {
        self.carrier_type_names.contains(name)
    }

    /// Resolves `ty`'s record field map: directly for a structural
    /// `Type::Record`, or by chasing a nominal type's `alias` chain (bounded
    /// to guard against a cyclic declaration).
    #[must_use]
    pub fn record_fields(&self, ty: &Type) -> Option<&IndexMap<Atom, Type>> {
        match ty {
            Type::Record(fields) => Some(fields),
            Type::Constructor { name, .. } => {
                let mut current = self.type_infos.get(name)?;
                for _ in 0..64 {
                    match current.alias.as_ref()? {
                        Type::Record(fields) => return Some(fields),
                        Type::Constructor { name: inner, .. } => {
                            current = self.type_infos.get(inner)?;
                        }
                        _ => return None,
                    }
                }
                None
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn record_field_names(&self, ty: &Type) -> Vec<Atom> {
        self.record_fields(ty).map(|f| f.keys().cloned().collect()).unwrap_or_default()
    }

    #[must_use]
    pub fn record_field_type(&self, ty: &Type, field: &Atom) -> Option<Type> {
        self.record_fields(ty).and_then(|f| f.get(field).cloned())
    }
}

#[cfg(test)]
#[path = "../../tests/lowering_context.rs"]
mod tests;
