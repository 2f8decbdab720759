//! Provides the `LineSet` structure, the set of comparison keys seen so far.
use fxhash::FxBuildHasher;
use indexmap::IndexSet;
use std::borrow::Cow;

type KeySet = IndexSet<Vec<u8>, FxBuildHasher>;

/// A `LineSet` holds the normalized keys of every line seen so far, first the
/// lines of the reference file and then the new lines of standard input.
/// * Keys are only ever added, never removed, so the first occurrence of a key
///   wins and every later occurrence is a duplicate.
/// * Keys are kept in the order they were first seen.
#[derive(Default)]
pub struct LineSet {
    keys: KeySet,
}

impl LineSet {
    /// An empty `LineSet`
    #[must_use]
    pub fn new() -> Self {
        LineSet::default()
    }

    /// Does the set already contain `key`?
    #[must_use]
    pub fn contains(&self, key: &[u8]) -> bool {
        self.keys.contains(key)
    }

    /// Adds `key` unless it's already present. Returns `true` if `key` is new.
    /// A borrowed key is copied only when it's actually inserted.
    pub fn insert(&mut self, key: Cow<'_, [u8]>) -> bool {
        if self.keys.contains(key.as_ref()) {
            return false;
        }
        self.keys.insert(key.into_owned())
    }

    /// The number of distinct keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Is the set empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The keys in the order they were first inserted
    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        self.keys.iter().map(Vec::as_slice)
    }
}
