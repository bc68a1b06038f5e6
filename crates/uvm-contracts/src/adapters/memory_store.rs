//! In-memory [`KvStore`] for tests and local runs.

use crate::errors::StoreError;
use crate::ports::KvStore;
use std::collections::BTreeMap;

/// `(field, key) -> value` held in a sorted map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InMemoryKvStore {
    entries: BTreeMap<(String, String), String>,
}

impl InMemoryKvStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries across all fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entry is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries of one field, ordered by key.
    pub fn field_entries<'a>(&'a self, field: &'a str) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.entries
            .iter()
            .filter(move |((f, _), _)| f == field)
            .map(|((_, k), v)| (k.as_str(), v.as_str()))
    }
}

impl KvStore for InMemoryKvStore {
    fn fast_map_get(&self, field: &str, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .entries
            .get(&(field.to_owned(), key.to_owned()))
            .cloned())
    }

    fn fast_map_set(&mut self, field: &str, key: &str, value: Option<&str>) -> Result<(), StoreError> {
        let slot = (field.to_owned(), key.to_owned());
        match value {
            Some(v) => {
                self.entries.insert(slot, v.to_owned());
            }
            None => {
                self.entries.remove(&slot);
            }
        }
        Ok(())
    }
}
