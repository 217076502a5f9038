//! `vanec` — the Vane compiler CLI (SPEC_FULL.md §"vane-cli").
//!
//! Owns the ambient engineering surface the core compiler (`vane-types`,
//! `vane-carriers`, `vane-infer`, `vane-ir`, `vane-passes`, `vane-emit`)
//! deliberately stays agnostic of: argument parsing, tracing setup, and
//! driving the pipeline end to end.

pub mod args;
pub mod driver;
pub mod trace;
