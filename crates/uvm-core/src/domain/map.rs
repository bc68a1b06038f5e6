//! # Map View
//!
//! String-keyed associative access over a table's sparse store.
//!
//! `set(key, None)` removes the key. A key that was never written and a key
//! that was cleared read back identically as `None`; the table cannot hold
//! an explicit nil.
//!
//! No size operation is defined here; callers that need a count iterate.

use crate::domain::iter::Pairs;
use crate::domain::table::Table;
use crate::domain::value::{TableKey, Value};
use std::borrow::{Borrow, BorrowMut};

/// Map view over any borrow of a table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MapView<T> {
    table: T,
}

/// A map view that owns its table.
pub type Map = MapView<Table>;

impl<T> From<T> for MapView<T> {
    fn from(table: T) -> Self {
        Self { table }
    }
}

impl MapView<Table> {
    /// Creates an empty owned map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Unwraps into the underlying table.
    #[must_use]
    pub fn into_table(self) -> Table {
        self.table
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for MapView<Table> {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.set(key, Some(value));
        }
        map
    }
}

impl<T: Borrow<Table>> MapView<T> {
    /// The underlying table.
    #[must_use]
    pub fn table(&self) -> &Table {
        self.table.borrow()
    }

    /// Value stored under `key`, or `None`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.table().sparse_get(&TableKey::Str(key.to_owned()))
    }

    /// String value stored under `key`, if it is a string.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// True if `key` holds a value.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Stateless traversal in the store's enumeration order.
    #[must_use]
    pub fn iterate(&self) -> Pairs<'_, Self> {
        Pairs::new(self)
    }

    /// Same as [`Self::iterate`], named after the VM builtin.
    #[must_use]
    pub fn pairs(&self) -> Pairs<'_, Self> {
        self.iterate()
    }
}

impl<T: BorrowMut<Table>> MapView<T> {
    /// Stores `value` under `key`, or removes `key` when `value` is `None`.
    pub fn set(&mut self, key: impl Into<String>, value: Option<Value>) {
        self.table
            .borrow_mut()
            .sparse_put(TableKey::Str(key.into()), value);
    }

    /// Mutable access to the value under `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.table
            .borrow_mut()
            .sparse_get_mut(&TableKey::Str(key.to_owned()))
    }
}

// =============================================================================
// TESTS
// =============================================================================
