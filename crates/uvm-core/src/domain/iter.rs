//! # Iterator Protocol
//!
//! Stateless keyed traversal: given `(container, previous key)` produce the
//! next `(key, value)`, where a missing previous key starts the traversal and
//! a `None` result ends it. No cursor lives inside the container, so any
//! number of traversals over the same table can run side by side and any of
//! them can be resumed from a saved key.
//!
//! ## Order
//!
//! | View | Order |
//! |------|-------|
//! | Sequence | ascending `1..=size`; holes yield `(k, None)`; sparse integer keys skipped |
//! | Map | insertion order of string keys; integer keys skipped |
//!
//! Relocating the previous key is O(1) (index arithmetic for sequences,
//! `IndexMap` position lookup for maps). For an unmodified table the result
//! is the same as rescanning from the start on every step.
//!
//! Mutating a table mid-traversal is unsupported. It never panics: a previous
//! key that no longer exists simply ends the traversal.

use crate::domain::map::MapView;
use crate::domain::sequence::Sequence;
use crate::domain::table::Table;
use crate::domain::value::{TableKey, Value};
use std::borrow::Borrow;

/// A container that can be walked by the stateless protocol.
pub trait KeyedTraversal {
    /// Key type handed back to the caller between steps.
    type Key: Clone;

    /// Entry following `prev`, or the first entry when `prev` is `None`.
    fn next_after(&self, prev: Option<&Self::Key>) -> Option<(Self::Key, Option<&Value>)>;
}

/// Function form of the protocol: `(container, prev) -> (next key, next value)`.
pub fn next<'a, C: KeyedTraversal>(
    container: &'a C,
    prev: Option<&C::Key>,
) -> Option<(C::Key, Option<&'a Value>)> {
    container.next_after(prev)
}

impl<T: Borrow<Table>> KeyedTraversal for Sequence<T> {
    type Key = i64;

    fn next_after(&self, prev: Option<&i64>) -> Option<(i64, Option<&Value>)> {
        let size = i64::try_from(self.size()).unwrap_or(i64::MAX);
        let index = match prev {
            None => 1,
            Some(&k) if (1..size).contains(&k) => k + 1,
            Some(_) => return None,
        };
        (index <= size).then(|| (index, self.get(index)))
    }
}

impl<T: Borrow<Table>> KeyedTraversal for MapView<T> {
    type Key = String;

    fn next_after(&self, prev: Option<&String>) -> Option<(String, Option<&Value>)> {
        let table = self.table();
        let start = match prev {
            None => 0,
            Some(key) => table.sparse_index_of(&TableKey::Str(key.clone()))? + 1,
        };
        (start..table.sparse_len()).find_map(|i| match table.sparse_entry_at(i) {
            Some((TableKey::Str(key), value)) => Some((key.clone(), Some(value))),
            _ => None,
        })
    }
}

// =============================================================================
// PAIRS ADAPTER
// =============================================================================

/// A std iterator that drives [`KeyedTraversal`] with a caller-held key.
pub struct Pairs<'a, C: KeyedTraversal> {
    container: &'a C,
    prev: Option<C::Key>,
    done: bool,
}

impl<'a, C: KeyedTraversal> Pairs<'a, C> {
    /// Starts at the beginning of `container`.
    #[must_use]
    pub fn new(container: &'a C) -> Self {
        Self {
            container,
            prev: None,
            done: false,
        }
    }

    /// Resumes a traversal right after `prev`.
    #[must_use]
    pub fn resume_after(container: &'a C, prev: C::Key) -> Self {
        Self {
            container,
            prev: Some(prev),
            done: false,
        }
    }

    /// The last key handed out, usable with [`Self::resume_after`].
    #[must_use]
    pub fn position(&self) -> Option<&C::Key> {
        self.prev.as_ref()
    }
}

impl<'a, C: KeyedTraversal> Iterator for Pairs<'a, C> {
    type Item = (C::Key, Option<&'a Value>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.container.next_after(self.prev.as_ref()) {
            Some((key, value)) => {
                self.prev = Some(key.clone());
                Some((key, value))
            }
            None => {
                self.done = true;
                None
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
