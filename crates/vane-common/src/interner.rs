//! String interning for identifier and label deduplication.
//!
//! Type constructor names, record field names, and row labels are compared
//! for equality far more often than they are created; interning turns those
//! comparisons into pointer/index comparisons and de-duplicates storage
//! across a whole module graph.

use rustc_hash::FxHashMap;
use std::sync::Arc;

/// An interned string. Cheap to copy and compare.
#[derive(Clone, Debug, Eq)]
pub struct Atom(Arc<str>);

impl serde::Serialize for Atom {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Atom {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(|s| Self(Arc::from(s)))
    }
}

impl Atom {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for Atom {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
    }
}

impl std::hash::Hash for Atom {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl std::fmt::Display for Atom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::borrow::Borrow<str> for Atom {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::ops::Deref for Atom {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

/// Ad hoc construction outside of an `Interner`, for call sites (tests,
/// constant names) where pool deduplication doesn't matter.
impl From<&str> for Atom {
    fn from(s: &str) -> Self {
        Self(Arc::from(s))
    }
}

impl From<String> for Atom {
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

/// A single-threaded string interner.
#[derive(Debug, Default)]
pub struct Interner {
    strings: FxHashMap<Arc<str>, ()>,
}

impl Interner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `s`, returning an `Atom` that shares storage with any prior
    /// interning of the same text.
    pub fn intern(&mut self, s: &str) -> Atom {
        if let Some((existing, _)) = self.strings.get_key_value(s) {
            return Atom(existing.clone());
        }
        let arc: Arc<str> = Arc::from(s);
        self.strings.insert(arc.clone(), ());
        Atom(arc)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

/// A sharded interner usable from multiple threads without a single global
/// lock; each shard is chosen by a cheap hash of the string being interned.
#[derive(Debug)]
pub struct ShardedInterner {
    shards: Vec<std::sync::Mutex<Interner>>,
}

impl ShardedInterner {
    #[must_use]
    pub fn new(shard_count: usize) -> Self {
        let shard_count = shard_count.max(1);
        Self {
            shards: (0..shard_count).map(|_| std::sync::Mutex::new(Interner::new())).collect(),
        }
    }

    pub fn intern(&self, s: &str) -> Atom {
        let shard_index = (fxhash_str(s) as usize) % self.shards.len();
        let mut shard = self.shards[shard_index]
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        shard.intern(s)
    }
}

fn fxhash_str(s: &str) -> u64 {
    use std::hash::{Hash, Hasher};
    let mut hasher = rustc_hash::FxHasher::default();
    s.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
#[path = "../tests/interner.rs"]
mod tests;
