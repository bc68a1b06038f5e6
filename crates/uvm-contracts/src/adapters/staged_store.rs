//! Write-buffering overlay over a [`KvStore`].
//!
//! Reads see staged writes first, then the base store. Nothing reaches the
//! base store until the buffered writes are drained with
//! [`StagedStore::into_writes`] and applied by the caller, so dropping the
//! overlay discards the invocation's effects.

use crate::errors::StoreError;
use crate::events::StoreWrite;
use crate::ports::KvStore;
use std::collections::BTreeMap;
use tracing::warn;

/// Buffered writes over a read-only base store.
pub struct StagedStore<'a, S: KvStore + ?Sized> {
    base: &'a S,
    pending: BTreeMap<(String, String), Option<String>>,
}

impl<'a, S: KvStore + ?Sized> StagedStore<'a, S> {
    /// Overlay with no staged writes.
    pub fn new(base: &'a S) -> Self {
        Self {
            base,
            pending: BTreeMap::new(),
        }
    }

    /// Number of distinct entries written so far.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Consumes the overlay, returning its writes ordered by field then key.
    pub fn into_writes(self) -> Vec<StoreWrite> {
        self.pending
            .into_iter()
            .map(|((field, key), value)| StoreWrite { field, key, value })
            .collect()
    }
}

impl<S: KvStore + ?Sized> KvStore for StagedStore<'_, S> {
    fn fast_map_get(&self, field: &str, key: &str) -> Result<Option<String>, StoreError> {
        match self.pending.get(&(field.to_owned(), key.to_owned())) {
            Some(staged) => Ok(staged.clone()),
            None => self.base.fast_map_get(field, key),
        }
    }

    fn fast_map_set(&mut self, field: &str, key: &str, value: Option<&str>) -> Result<(), StoreError> {
        self.pending
            .insert((field.to_owned(), key.to_owned()), value.map(str::to_owned));
        Ok(())
    }
}

/// Applies drained writes to `store` in order, all or nothing.
///
/// Prior values are read before anything is written. If the store rejects a
/// write, the writes already applied are reverted in reverse order.
///
/// # Errors
///
/// The first read or write error from the store.
pub fn apply_writes<S: KvStore + ?Sized>(store: &mut S, writes: &[StoreWrite]) -> Result<(), StoreError> {
    let prior = writes
        .iter()
        .map(|write| store.fast_map_get(&write.field, &write.key))
        .collect::<Result<Vec<_>, _>>()?;

    for (applied, write) in writes.iter().enumerate() {
        if let Err(err) = store.fast_map_set(&write.field, &write.key, write.value.as_deref()) {
            revert(store, &writes[..applied], &prior[..applied]);
            return Err(err);
        }
    }
    Ok(())
}

fn revert<S: KvStore + ?Sized>(store: &mut S, writes: &[StoreWrite], prior: &[Option<String>]) {
    for (write, value) in writes.iter().zip(prior).rev() {
        if let Err(err) = store.fast_map_set(&write.field, &write.key, value.as_deref()) {
            warn!(field = %write.field, key = %write.key, error = %err, "failed to revert store entry");
        }
    }
}
