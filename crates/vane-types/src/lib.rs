//! Type representation, substitution, schemes, and the `Hole` carrier's
//! type shape for the vane compiler (spec.md §3.1–3.2, §4.1).
//!
//! Carrier *registration and dispatch* (the process-wide registry, row
//! union, `splitCarrier`/`joinCarrier`/…) lives in `vane-carriers`, which
//! depends on the `Type` shape defined here.

pub mod hole;
pub use hole::{add_hole_effect, is_hole, unknown_type};

pub mod scheme;
pub use scheme::{free_type_vars_scheme, generalize, instantiate, TypeEnv, TypeScheme, TypeVarGen};

pub mod subst;
pub use subst::{apply_substitution, compose_substitution, free_type_vars, occurs_in_type, Substitution};

pub mod type_info;
pub use type_info::{ConstructorInfo, TypeInfo};

pub mod type_repr;
pub use type_repr::{Type, VarId};
