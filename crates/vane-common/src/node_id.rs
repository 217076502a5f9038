//! Identity for AST/IR nodes across the inference boundary.
//!
//! `NodeId` is allocated by the (external) parser/inference stage and flows
//! unchanged through `resolvedNodeTypes`, diagnostics, and Core IR `origin`
//! fields so that an emitted runtime error can point back to the original
//! surface expression.

use std::fmt;

/// An opaque node identifier. Stable for the lifetime of one compilation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for NodeId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Monotonically increasing allocator for `NodeId`s and type-variable ids.
///
/// Reset once per compilation run (spec.md §3.4 "Lifecycle"); never shared
/// across runs.
#[derive(Debug, Default)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Allocate the next id, bumping the counter.
    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Bump the counter so it is strictly past `floor`, without allocating.
    ///
    /// Used by `instantiate` to guarantee fresh type variables never collide
    /// with a scheme's quantifiers (spec.md §4.1).
    pub fn bump_past(&mut self, floor: u32) {
        if self.next <= floor {
            self.next = floor + 1;
        }
    }

    #[must_use]
    pub const fn peek(&self) -> u32 {
        self.next
    }
}

#[cfg(test)]
#[path = "../tests/node_id.rs"]
mod tests;
