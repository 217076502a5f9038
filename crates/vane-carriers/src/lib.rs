//! Process-wide carrier registry and effect-row union algebra (spec.md §3.3,
//! §4.2).
//!
//! The registry itself is domain-agnostic: `vane-infer` and `vane-passes`
//! register the error/taint/etc. domains relevant to a given program's
//! declared carriers, while the `hole` domain here is always present.

pub mod hole_carrier;
pub use hole_carrier::{ensure_registered, HOLE_DOMAIN};

pub mod registry;
pub use registry::{
    collapse_carrier, find_carrier_domain, is_carrier_type, join_carrier, register_carrier,
    split_carrier, union_carrier_states, CarrierOps, RuntimeMetadata,
};

pub mod row;
pub use row::union_rows;
