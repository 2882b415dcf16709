//! Insertion-ordered, deduplicated set of key paths.

use std::collections::HashSet;

use serde::{Serialize, Serializer};

/// The paths discovered in one column, in first-seen order.
///
/// Backed by a `Vec` for order and a `HashSet` for membership, so inserting an
/// already-known path costs one hash lookup and no allocation.
#[derive(Debug, Clone, Default)]
pub struct KeySet {
    paths: Vec<String>,
    seen: HashSet<String>,
}

impl KeySet {
    /// Creates an empty key set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `path` if it is new. Returns true when the path was added.
    pub fn insert(&mut self, path: &str) -> bool {
        if self.seen.contains(path) {
            return false;
        }
        self.seen.insert(path.to_string());
        self.paths.push(path.to_string());
        true
    }

    /// Returns true if `path` has been discovered.
    pub fn contains(&self, path: &str) -> bool {
        self.seen.contains(path)
    }

    /// Number of distinct paths.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns true if no path has been discovered.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Iterates paths in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    /// Paths in first-seen order.
    pub fn as_slice(&self) -> &[String] {
        &self.paths
    }

    /// Consumes the set, returning paths in first-seen order.
    pub fn into_vec(self) -> Vec<String> {
        self.paths
    }

    /// Inserts every path of `other` that is not yet present, keeping `other`'s order.
    pub fn extend_from(&mut self, other: &KeySet) {
        for path in other.iter() {
            self.insert(path);
        }
    }
}

impl PartialEq for KeySet {
    fn eq(&self, other: &Self) -> bool {
        self.paths == other.paths
    }
}

impl Eq for KeySet {}

impl<'a> FromIterator<&'a str> for KeySet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = Self::new();
        for path in iter {
            set.insert(path);
        }
        set
    }
}

impl IntoIterator for KeySet {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.into_iter()
    }
}

impl<'a> IntoIterator for &'a KeySet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

impl Serialize for KeySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.paths.serialize(serializer)
    }
}
