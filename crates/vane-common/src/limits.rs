//! Centralized limits and thresholds for the vane compiler.
//!
//! Centralizing these values documents the rationale for each and prevents
//! duplicate, inconsistent constants scattered across the passes that need
//! them.

/// Maximum number of `v -> v'` hops `applySubstitution` will chase before
/// concluding a cycle exists (spec.md §4.1: "breaks on detected cycle by
/// returning the last fresh variable rather than looping").
pub const MAX_SUBSTITUTION_CHASE_STEPS: usize = 10_000;

/// Maximum recursion depth for `occursInType` / `freeTypeVars` structural
/// walks. Pathological recursive type declarations should hit this rather
/// than overflow the stack.
pub const MAX_TYPE_RECURSION_DEPTH: u32 = 2_000;

/// Maximum number of scope-walk iterations when resolving a name through
/// nested `let`/`let_rec` bindings during lowering.
pub const MAX_SCOPE_WALK_ITERATIONS: usize = 10_000;

/// Maximum number of distinct ADT instantiations `monomorphize` will collect
/// before concluding the module graph contains a runaway generic expansion
/// (e.g. a type parameter applied to itself with no base case).
pub const MAX_MONOMORPHIZATION_INSTANTIATIONS: usize = 50_000;
