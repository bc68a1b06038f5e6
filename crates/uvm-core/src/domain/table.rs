//! # Dynamic Table Substrate
//!
//! Common storage behind both views: a dense ordered run of values indexed
//! `1..=N`, and a sparse key→value overflow store.
//!
//! ## Layout Invariants
//!
//! | Part | Holds | Absence |
//! |------|-------|---------|
//! | `dense` | indices `1..=len` | a hole (`None`) only where a non-tail slot was cleared |
//! | `sparse` | out-of-range integer keys, string keys | key removed, never stored |
//!
//! Sparse integer keys are never promoted into `dense`, even when later
//! appends make their index contiguous. The UVM table layout behaves this way
//! and contracts observe it.
//!
//! The substrate has no public mutation surface; callers go through
//! [`Sequence`] or [`MapView`].

use crate::domain::map::MapView;
use crate::domain::sequence::Sequence;
use crate::domain::value::{TableKey, Value};
use indexmap::IndexMap;

/// Hybrid dense/sparse table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    dense: Vec<Option<Value>>,
    sparse: IndexMap<TableKey, Value>,
}

impl Table {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when neither part holds anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dense.is_empty() && self.sparse.is_empty()
    }

    /// Read-only sequence view.
    #[must_use]
    pub fn as_seq(&self) -> Sequence<&Table> {
        Sequence::from(self)
    }

    /// Mutable sequence view.
    pub fn as_seq_mut(&mut self) -> Sequence<&mut Table> {
        Sequence::from(self)
    }

    /// Read-only map view.
    #[must_use]
    pub fn as_map(&self) -> MapView<&Table> {
        MapView::from(self)
    }

    /// Mutable map view.
    pub fn as_map_mut(&mut self) -> MapView<&mut Table> {
        MapView::from(self)
    }

    // -------------------------------------------------------------------------
    // Dense part (crate-internal)
    // -------------------------------------------------------------------------

    pub(crate) fn dense_len(&self) -> usize {
        self.dense.len()
    }

    /// Slot at zero-based `pos`. Outer `None` means out of range.
    pub(crate) fn dense_slot(&self, pos: usize) -> Option<Option<&Value>> {
        self.dense.get(pos).map(Option::as_ref)
    }

    pub(crate) fn dense_slot_mut(&mut self, pos: usize) -> Option<&mut Value> {
        self.dense.get_mut(pos).and_then(Option::as_mut)
    }

    pub(crate) fn dense_write(&mut self, pos: usize, value: Option<Value>) {
        if let Some(slot) = self.dense.get_mut(pos) {
            *slot = value;
        }
    }

    /// Pushes a slot, hole included. Only the JSON decoder pushes holes.
    pub(crate) fn dense_push(&mut self, value: Option<Value>) {
        self.dense.push(value);
    }

    pub(crate) fn dense_pop(&mut self) -> Option<Option<Value>> {
        self.dense.pop()
    }

    pub(crate) fn dense_slots(&self) -> impl Iterator<Item = Option<&Value>> {
        self.dense.iter().map(Option::as_ref)
    }

    // -------------------------------------------------------------------------
    // Sparse part (crate-internal)
    // -------------------------------------------------------------------------

    pub(crate) fn sparse_len(&self) -> usize {
        self.sparse.len()
    }

    pub(crate) fn sparse_get(&self, key: &TableKey) -> Option<&Value> {
        self.sparse.get(key)
    }

    pub(crate) fn sparse_get_mut(&mut self, key: &TableKey) -> Option<&mut Value> {
        self.sparse.get_mut(key)
    }

    /// Stores or removes `key`. Removal keeps the order of remaining keys.
    pub(crate) fn sparse_put(&mut self, key: TableKey, value: Option<Value>) {
        match value {
            Some(v) => {
                self.sparse.insert(key, v);
            }
            None => {
                self.sparse.shift_remove(&key);
            }
        }
    }

    pub(crate) fn sparse_index_of(&self, key: &TableKey) -> Option<usize> {
        self.sparse.get_index_of(key)
    }

    pub(crate) fn sparse_entry_at(&self, index: usize) -> Option<(&TableKey, &Value)> {
        self.sparse.get_index(index)
    }

    pub(crate) fn sparse_entries(&self) -> impl Iterator<Item = (&TableKey, &Value)> {
        self.sparse.iter()
    }
}

// =============================================================================
// TESTS
// =============================================================================
