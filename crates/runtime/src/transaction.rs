//! Buffered transaction against a ledger store.
//!
//! All writes of a logical unit of work are staged in memory and reach the
//! store only on [`Transaction::commit`], as one ordered group. A
//! transaction that is dropped instead of committed discards its staged
//! writes, so a failed operation never leaves partial index writes behind.
//! Reads observe staged writes first (read-your-writes), then fall through
//! to the store.

use crate::ledger::{LedgerKey, LedgerStore, StoreError};

pub struct Transaction<'a, S: LedgerStore + ?Sized> {
    store: &'a S,
    staged: Vec<(LedgerKey, Vec<u8>)>,
}

impl<'a, S: LedgerStore + ?Sized> Transaction<'a, S> {
    /// Opens a transaction over `store` with an empty write set.
    pub fn begin(store: &'a S) -> Self {
        Self {
            store,
            staged: Vec::new(),
        }
    }

    /// Reads `key` from the transaction's view: the staged write if one
    /// exists, otherwise the store's current value.
    pub fn get(&self, key: LedgerKey) -> Result<Option<Vec<u8>>, StoreError> {
        if let Some((_, bytes)) = self.staged.iter().rev().find(|(staged, _)| *staged == key) {
            return Ok(Some(bytes.clone()));
        }
        self.store.get(key)
    }

    /// Stages `bytes` under `key`. A later write to the same key replaces
    /// the earlier one.
    pub fn put(&mut self, key: LedgerKey, bytes: Vec<u8>) {
        if let Some(entry) = self.staged.iter_mut().find(|(staged, _)| *staged == key) {
            entry.1 = bytes;
        } else {
            self.staged.push((key, bytes));
        }
    }

    /// Number of staged writes.
    pub fn pending_writes(&self) -> usize {
        self.staged.len()
    }

    /// Flushes the staged writes to the store in staging order.
    ///
    /// The first store failure aborts the flush and propagates; applying
    /// the group atomically across failures is the store's contract.
    pub fn commit(self) -> Result<(), StoreError> {
        for (key, bytes) in self.staged {
            self.store.put(key, bytes)?;
        }
        Ok(())
    }
}
