//! `NameState` for the raw systems backend (spec.md §4.10 "Every
//! module-level name is pre-allocated into a name table so hoisted lambdas
//! cannot shadow imports or bindings. Reserved target-language keywords are
//! escaped via a per-language quoting convention.").
//!
//! One `NameState` per module emission; never shared across modules
//! (spec.md §5 "Emitter-internal mutable `NameState`s... not shared").

use rustc_hash::FxHashSet;
use vane_common::Atom;

/// Reserved identifiers in the raw target (a Zig-like systems language, per
/// spec.md §4.10's `@cImport`/`ManyPtr`/allocator vocabulary).
const RESERVED: &[&str] = &[
    "const", "var", "fn", "pub", "if", "else", "while", "for", "switch", "struct", "union",
    "enum", "return", "break", "continue", "comptime", "defer", "errdefer", "try", "catch",
    "async", "await", "null", "undefined", "true", "false", "type", "anytype", "export",
    "extern", "inline", "noinline", "packed", "align", "test", "usingnamespace", "and", "or",
    "orelse", "unreachable", "opaque", "threadlocal", "volatile", "allowzero", "noalias",
    "linksection", "callconv", "anyframe", "suspend", "resume", "nosuspend", "c_void",
];

/// Escapes a reserved-keyword identifier using the raw target's actual raw
/// identifier syntax (`@"name"`), rather than a synthetic suffix — this is
/// the target language's own escape hatch, not a workaround.
#[must_use]
pub fn escape_identifier(name: &str) -> String {
    if RESERVED.contains(&name) { format!("@\"{name}\"") } else { name.to_string() }
}

pub struct NameState {
    taken: FxHashSet<Atom>,
    counter: u32,
}

impl NameState {
    /// Pre-allocates every module-level name: imports' bindings, top-level
    /// value names, and type declaration names (spec.md §4.10).
    #[must_use]
    pub fn new(preexisting: impl IntoIterator<Item = Atom>) -> Self {
        Self { taken: preexisting.into_iter().collect(), counter: 0 }
    }

    pub fn reserve(&mut self, name: &Atom) -> bool {
        self.taken.insert(name.clone())
    }

    /// A fresh module-level name for a hoisted anonymous lambda, guaranteed
    /// not to shadow any pre-allocated name (spec.md §4.10).
    pub fn fresh_lambda_name(&mut self) -> Atom {
        loop {
            let candidate = Atom::from(format!("__lambda_{}", self.counter));
            self.counter += 1;
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
        }
    }

    pub fn fresh_label(&mut self) -> String {
        let label = format!("blk_{}", self.counter);
        self.counter += 1;
        label
    }
}

#[cfg(test)]
#[path = "../tests/name_state.rs"]
mod tests;
