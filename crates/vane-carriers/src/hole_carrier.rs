//! The built-in `Hole` carrier, registered under domain `hole` (spec.md
//! §4.2).

use crate::registry::{register_carrier, CarrierOps, RuntimeMetadata};
use crate::row::union_rows;
use std::sync::{Arc, Once};
use vane_types::{is_hole, Type};

pub const HOLE_DOMAIN: &str = "hole";

struct HoleCarrierOps;

impl CarrierOps for HoleCarrierOps {
    fn is(&self, ty: &Type) -> bool {
        is_hole(ty)
    }

    fn split(&self, ty: &Type) -> Option<(Type, Type)> {
        match ty {
            Type::Constructor { args, .. } if is_hole(ty) => {
                Some((args[0].clone(), args[1].clone()))
            }
            _ => None,
        }
    }

    fn join(&self, value: Type, state: Type) -> Type {
        Type::constructor(vane_types::hole::HOLE_CONSTRUCTOR_NAME, vec![value, state])
    }

    fn collapse(&self, ty: &Type) -> Type {
        let Some((value, state)) = self.split(ty) else { return ty.clone() };
        if is_hole(&value) {
            let Some((inner_value, inner_state)) = self.split(&value) else {
                return self.join(value, state);
            };
            let merged_state = union_rows(state, inner_state);
            self.collapse(&self.join(inner_value, merged_state))
        } else {
            self.join(value, state)
        }
    }

    fn union_states(&self, a: Type, b: Type) -> Type {
        union_rows(a, b)
    }

    fn runtime_metadata(&self) -> Option<&RuntimeMetadata> {
        None
    }
}

static INIT: Once = Once::new();

/// Registers the built-in `Hole` carrier exactly once per process.
pub fn ensure_registered() {
    INIT.call_once(|| {
        register_carrier(HOLE_DOMAIN, Arc::new(HoleCarrierOps));
    });
}

#[cfg(test)]
#[path = "../tests/hole_carrier.rs"]
mod tests;
