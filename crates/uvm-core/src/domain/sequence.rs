//! # Sequence View
//!
//! 1-based ordinal access over a [`Table`].
//!
//! ## Write Rules
//!
//! | Index | Value | Effect |
//! |-------|-------|--------|
//! | `1..size` | some | overwrite dense slot |
//! | `1..size-1` | none | leave a hole, `size` unchanged |
//! | `size` | none | drop last dense slot, `size - 1` |
//! | `size + 1` | some | append, `size + 1` |
//! | `size + 1` | none | no-op |
//! | anything else (0 and negatives included) | some / none | sparse insert / remove |
//!
//! Reads return the dense slot for `1..=size` (a hole reads as absent and does
//! not fall through to the sparse store), otherwise the sparse entry.

use crate::domain::iter::Pairs;
use crate::domain::table::Table;
use crate::domain::value::{TableKey, Value};
use std::borrow::{Borrow, BorrowMut};

/// Sequence view over any borrow of a table.
///
/// `Sequence<&Table>` reads, `Sequence<&mut Table>` writes, and
/// `Sequence<Table>` (aliased as [`Array`]) owns its storage.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sequence<T> {
    table: T,
}

/// A sequence view that owns its table.
pub type Array = Sequence<Table>;

impl<T> From<T> for Sequence<T> {
    fn from(table: T) -> Self {
        Self { table }
    }
}

impl Sequence<Table> {
    /// Creates an empty owned sequence.
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

impl FromIterator<Value> for Sequence<Table> {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        let mut seq = Self::new();
        for value in iter {
            seq.append(value);
        }
        seq
    }
}

impl<T: Borrow<Table>> Sequence<T> {
    /// The underlying table.
    #[must_use]
    pub fn table(&self) -> &Table {
        self.table.borrow()
    }

    /// Number of dense slots. Sparse entries are never counted.
    #[must_use]
    pub fn size(&self) -> usize {
        self.table().dense_len()
    }

    /// True when the dense run is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Value at `index`, or `None` when absent.
    #[must_use]
    pub fn get(&self, index: i64) -> Option<&Value> {
        let table = self.table();
        match dense_pos(index, table.dense_len()) {
            Some(pos) => table.dense_slot(pos).flatten(),
            None => table.sparse_get(&TableKey::Int(index)),
        }
    }

    /// Stateless traversal of `1..=size` in ascending order.
    #[must_use]
    pub fn iterate(&self) -> Pairs<'_, Self> {
        Pairs::new(self)
    }

    /// Same as [`Self::iterate`], named after the VM builtin.
    #[must_use]
    pub fn ipairs(&self) -> Pairs<'_, Self> {
        self.iterate()
    }

    /// True if some dense slot equals `item`.
    #[must_use]
    pub fn contains(&self, item: &Value) -> bool {
        self.iterate().any(|(_, value)| value == Some(item))
    }
}

impl<T: BorrowMut<Table>> Sequence<T> {
    /// Mutable access to the value at `index`.
    pub fn get_mut(&mut self, index: i64) -> Option<&mut Value> {
        let table = self.table.borrow_mut();
        match dense_pos(index, table.dense_len()) {
            Some(pos) => table.dense_slot_mut(pos),
            None => table.sparse_get_mut(&TableKey::Int(index)),
        }
    }

    /// Writes `value` at `index` following the table layout rules.
    pub fn set(&mut self, index: i64, value: Option<Value>) {
        let table = self.table.borrow_mut();
        let size = table.dense_len();

        if let Some(pos) = dense_pos(index, size) {
            if value.is_none() && pos + 1 == size {
                table.dense_pop();
            } else {
                table.dense_write(pos, value);
            }
        } else if usize::try_from(index).ok() == size.checked_add(1) {
            if let Some(v) = value {
                table.dense_push(Some(v));
            }
        } else {
            table.sparse_put(TableKey::Int(index), value);
        }
    }

    /// Appends to the dense run. Equivalent to `set(size + 1, value)`.
    pub fn append(&mut self, value: Value) {
        let next = i64::try_from(self.size()).map_or(i64::MAX, |n| n.saturating_add(1));
        self.set(next, Some(value));
    }

    /// Drops the last dense slot; no-op when empty.
    pub fn remove_last(&mut self) {
        self.table.borrow_mut().dense_pop();
    }
}

/// Zero-based dense position of a 1-based index, if inside `1..=len`.
fn dense_pos(index: i64, len: usize) -> Option<usize> {
    let index = usize::try_from(index).ok()?;
    (1..=len).contains(&index).then(|| index - 1)
}

// =============================================================================
// TESTS
// =============================================================================
