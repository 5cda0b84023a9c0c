use indexmap::{Equivalent, IndexMap, map::Entry};
use rustc_hash::FxBuildHasher;
use std::{hash::Hash, ops::Deref};

/// An insertion-ordered map keyed by product or location.
///
/// Plans list decisions in the order requests were submitted and catalogs
/// answer in file order, so iteration order is part of the output. Reads go
/// through [`Deref`] to the underlying `IndexMap`; the write methods below
/// never move a key that is already present.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Map<K: Eq + Hash, V>(IndexMap<K, V, FxBuildHasher>);

impl<K: Eq + Hash, V> Default for Map<K, V> {
    fn default() -> Self {
        Self(IndexMap::default())
    }
}

impl<K: Eq + Hash, V> Deref for Map<K, V> {
    type Target = IndexMap<K, V, FxBuildHasher>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<K: Eq + Hash, V> Map<K, V> {
    /// Insert or replace a value, returning the one replaced.
    ///
    /// A replaced key keeps its original position.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.0.insert(key, value)
    }

    /// Insert a value only if the key is new.
    ///
    /// Returns the value already held for the key, which is left untouched.
    pub fn claim(&mut self, key: K, value: V) -> Option<&V> {
        match self.0.entry(key) {
            Entry::Occupied(entry) => Some(entry.into_mut()),
            Entry::Vacant(entry) => {
                entry.insert(value);
                None
            }
        }
    }

    /// Mutable access to the value for a key
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.0.get_mut(key)
    }
}
