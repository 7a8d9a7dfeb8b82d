//! Name-keyed index over an append-only list.
//!
//! The lookup table and the ordered list are never exposed separately, so
//! they cannot disagree on membership. Only the list is serialized; the
//! lookup is derived from entry names on load.

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use std::collections::HashMap;

/// Entries that carry their own unique key.
pub trait Named {
    fn name(&self) -> &str;
}

/// Entries keyed by a unique name, enumerated in insertion order.
#[derive(Clone, Debug)]
pub struct NameIndex<V> {
    entries: Vec<V>,
    /// Name -> position in `entries`
    lookup: HashMap<String, usize>,
}

impl<V> NameIndex<V> {
    /// Create an empty index
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            lookup: HashMap::new(),
        }
    }

    /// Check whether `name` is present
    pub fn exists(&self, name: &str) -> bool {
        self.lookup.contains_key(name)
    }

    /// Get the entry stored under `name`
    pub fn get(&self, name: &str) -> Option<&V> {
        self.lookup.get(name).and_then(|&idx| self.entries.get(idx))
    }

    /// All entries in insertion order
    pub fn list(&self) -> &[V] {
        &self.entries
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, V> {
        self.entries.iter()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Mutable access for test fixtures. Callers must not change the name.
    #[cfg(test)]
    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut V> {
        let idx = *self.lookup.get(name)?;
        self.entries.get_mut(idx)
    }
}

impl<V: Named> NameIndex<V> {
    /// Append `value` under its own name.
    ///
    /// Returns the value back untouched if the name is already present.
    pub fn insert(&mut self, value: V) -> Result<&V, V> {
        if self.lookup.contains_key(value.name()) {
            return Err(value);
        }
        let position = self.entries.len();
        self.lookup.insert(value.name().to_string(), position);
        self.entries.push(value);
        Ok(&self.entries[position])
    }

    /// Build an index from ordered entries.
    ///
    /// Fails with the first repeated name.
    pub fn from_entries(entries: Vec<V>) -> Result<Self, String> {
        let mut index = Self::new();
        for entry in entries {
            if let Err(rejected) = index.insert(entry) {
                return Err(rejected.name().to_string());
            }
        }
        Ok(index)
    }
}

impl<V> Default for NameIndex<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Serialize> Serialize for NameIndex<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

impl<'de, V: Named + Deserialize<'de>> Deserialize<'de> for NameIndex<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<V>::deserialize(deserializer)?;
        Self::from_entries(entries)
            .map_err(|name| de::Error::custom(format!("duplicate name in index: {name}")))
    }
}
