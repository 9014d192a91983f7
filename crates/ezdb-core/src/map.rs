//! OrderedIndexedMap - insertion-ordered string map with a positional hash index
//!
//! Entries live in a dense `Vec` that defines iteration order. A hash index
//! maps every key to its position in that vector, so lookups are O(1) while
//! iteration stays in insertion (or explicit sort) order.
//!
//! The index always mirrors the vector: for every entry at position `i`,
//! `index[key] == i`, and removed keys have no index entry.

use crate::sort::SortOrder;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

/// A single key-value pair.
pub type Entry = (String, String);

/// Ordered string-to-string map with O(1) keyed lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedIndexedMap {
    /// Entries in iteration order
    pairs: Vec<Entry>,
    /// Key to position in `pairs`
    index: HashMap<String, usize>,
}

impl OrderedIndexedMap {
    /// Creates a new empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new empty map with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pairs: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Returns the value stored under `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .map(|&pos| self.pairs[pos].1.as_str())
    }

    /// Returns true if `key` is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the iteration position of `key`
    pub fn position(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    /// Inserts or overwrites a value.
    ///
    /// An existing key keeps its position; a new key is appended.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        if let Some(&pos) = self.index.get(&key) {
            self.pairs[pos].1 = value;
            return;
        }

        self.index.insert(key.clone(), self.pairs.len());
        self.pairs.push((key, value));
    }

    /// Removes `key`, returning whether it was present.
    ///
    /// Entries after the removed one shift down by one and are re-indexed.
    pub fn delete(&mut self, key: &str) -> bool {
        let pos = match self.index.remove(key) {
            Some(pos) => pos,
            None => return false,
        };

        self.pairs.remove(pos);
        self.reindex_from(pos);
        true
    }

    /// Renames `old` to `new`, keeping the value.
    ///
    /// The entry is removed and re-inserted, so a fresh `new` key lands at the
    /// end of iteration order. If `new` already exists its value is
    /// overwritten in place. Returns false (and does nothing) when `old` is
    /// absent.
    pub fn rename_key(&mut self, old: &str, new: impl Into<String>) -> bool {
        let pos = match self.index.get(old) {
            Some(&pos) => pos,
            None => return false,
        };

        let value = self.pairs[pos].1.clone();
        self.delete(old);
        self.set(new, value);
        true
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if the map has no entries
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Removes all entries
    pub fn clear(&mut self) {
        self.pairs.clear();
        self.index.clear();
    }

    /// Snapshot of all keys in iteration order
    pub fn keys(&self) -> Vec<String> {
        self.pairs.iter().map(|(k, _)| k.clone()).collect()
    }

    /// Snapshot of all values in iteration order
    pub fn values(&self) -> Vec<String> {
        self.pairs.iter().map(|(_, v)| v.clone()).collect()
    }

    /// Snapshot of all entries in iteration order
    pub fn entries(&self) -> Vec<Entry> {
        self.pairs.clone()
    }

    /// Snapshot of the entries whose key starts with `prefix`
    pub fn entries_with_prefix(&self, prefix: &str) -> Vec<Entry> {
        self.pairs
            .iter()
            .filter(|(k, _)| k.starts_with(prefix))
            .cloned()
            .collect()
    }

    /// Borrowing iterator over entries in iteration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Reorders entries (stable) and rebuilds the whole index.
    pub fn sort(&mut self, order: SortOrder) {
        self.sort_by(|a, b| order.compare(a, b));
    }

    /// Reorders entries (stable) with a custom comparator over `(key, value)`.
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut((&str, &str), (&str, &str)) -> std::cmp::Ordering,
    {
        self.pairs.sort_by(|(ak, av), (bk, bv)| {
            compare((ak.as_str(), av.as_str()), (bk.as_str(), bv.as_str()))
        });
        self.reindex_from(0);
    }

    fn reindex_from(&mut self, start: usize) {
        for (pos, (key, _)) in self.pairs.iter().enumerate().skip(start) {
            if let Some(slot) = self.index.get_mut(key) {
                *slot = pos;
            }
        }
    }

    /// Checks that the index mirrors entry positions exactly.
    #[cfg(test)]
    pub(crate) fn index_is_consistent(&self) -> bool {
        self.index.len() == self.pairs.len()
            && self
                .pairs
                .iter()
                .enumerate()
                .all(|(pos, (key, _))| self.index.get(key) == Some(&pos))
    }
}

impl FromIterator<Entry> for OrderedIndexedMap {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut map = Self::with_capacity(iter.size_hint().0);
        for (key, value) in iter {
            map.set(key, value);
        }
        map
    }
}

impl Serialize for OrderedIndexedMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut out = serializer.serialize_map(Some(self.pairs.len()))?;
        for (key, value) in &self.pairs {
            out.serialize_entry(key, value)?;
        }
        out.end()
    }
}
