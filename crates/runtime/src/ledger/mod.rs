//! Ledger store contracts for persisting registry records.
//!
//! The core never talks to a store directly; it mutates an in-memory
//! [`kitty_core::Registry`] that the runtime loads from and persists to one
//! of these stores inside a transaction boundary. Cross-transaction
//! isolation and conflict resolution are the store's responsibility.

mod codec;
mod file;
mod memory;

use std::fmt;

pub use codec::{load_registry, save_registry};
pub use file::FileLedger;
pub use memory::InMemoryLedger;

/// Backing persistence failure. Always propagated unmodified, never
/// swallowed.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("ledger I/O failed")]
    Io(#[from] std::io::Error),

    #[error("ledger lock poisoned")]
    LockPoisoned,
}

/// The four top-level logical records, each an ordered sequence indexed by
/// kitty ID with slot 0 reserved.
///
/// The string forms are the historical wire keys and must not change under
/// existing stores.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LedgerKey {
    /// The kitty record collection.
    Kitties,
    /// Kitty ID → owning identity.
    Owners,
    /// Kitty ID → identity approved to receive a transfer.
    Approved,
    /// Kitty ID → identity approved to borrow the kitty as a sire.
    SireApproved,
}

impl LedgerKey {
    pub const ALL: [LedgerKey; 4] = [
        LedgerKey::Kitties,
        LedgerKey::Owners,
        LedgerKey::Approved,
        LedgerKey::SireApproved,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            LedgerKey::Kitties => "kitties",
            LedgerKey::Owners => "kittyIndexToOwner",
            LedgerKey::Approved => "kittyIndexToApproved",
            LedgerKey::SireApproved => "kittyIndexToAddress",
        }
    }
}

impl fmt::Display for LedgerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Durable key-value persistence with read/write-your-writes semantics
/// inside a transaction boundary.
pub trait LedgerStore: Send + Sync {
    /// Reads the current bytes under `key`, or `None` if never written.
    fn get(&self, key: LedgerKey) -> Result<Option<Vec<u8>>, StoreError>;

    /// Writes `bytes` under `key`.
    fn put(&self, key: LedgerKey, bytes: Vec<u8>) -> Result<(), StoreError>;
}

impl<T: LedgerStore + ?Sized> LedgerStore for &T {
    fn get(&self, key: LedgerKey) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key)
    }

    fn put(&self, key: LedgerKey, bytes: Vec<u8>) -> Result<(), StoreError> {
        (**self).put(key, bytes)
    }
}

impl<T: LedgerStore + ?Sized> LedgerStore for std::sync::Arc<T> {
    fn get(&self, key: LedgerKey) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key)
    }

    fn put(&self, key: LedgerKey, bytes: Vec<u8>) -> Result<(), StoreError> {
        (**self).put(key, bytes)
    }
}
