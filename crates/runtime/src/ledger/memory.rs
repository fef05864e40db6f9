//! In-memory LedgerStore implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use super::{LedgerKey, LedgerStore, StoreError};

/// Stores the record blobs in a map behind a lock. Useful wherever a
/// durable backend is overkill: unit tests, demos, replay harnesses.
#[derive(Default)]
pub struct InMemoryLedger {
    records: RwLock<HashMap<LedgerKey, Vec<u8>>>,
}

impl InMemoryLedger {
    /// Creates a new empty in-memory ledger.
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedgerStore for InMemoryLedger {
    fn get(&self, key: LedgerKey) -> Result<Option<Vec<u8>>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(records.get(&key).cloned())
    }

    fn put(&self, key: LedgerKey, bytes: Vec<u8>) -> Result<(), StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::LockPoisoned)?;
        records.insert(key, bytes);
        Ok(())
    }
}
