//! Runtime orchestration for the breeding ledger.
//!
//! This crate wires the pure rules of `kitty-core` to the outside world:
//! the ledger store abstraction and its implementations, the buffered
//! transaction that commits record writes as one group, the collaborator
//! traits for transaction time and caller identity, and the topic-based
//! event bus. Consumers embed [`KittyContract`] to invoke operations and
//! subscribe to committed events.
//!
//! Modules are organized by responsibility:
//! - [`contract`] hosts the public operation surface
//! - [`ledger`] provides store contracts, codecs, and implementations
//! - [`transaction`] scopes reads and staged writes to one unit of work
//! - [`context`] and [`identity`] resolve per-transaction collaborators
//! - [`events`] routes committed events to subscribers
pub mod context;
pub mod contract;
pub mod error;
pub mod events;
pub mod identity;
pub mod ledger;
pub mod transaction;

pub use context::{CallerResolver, FixedClock, StaticCaller, SystemClock, TransactionClock};
pub use contract::KittyContract;
pub use error::{Result, RuntimeError};
pub use events::{EventBus, Topic};
pub use identity::{IdentityError, decode_client_id};
pub use ledger::{FileLedger, InMemoryLedger, LedgerKey, LedgerStore, StoreError};
pub use transaction::Transaction;
