//! Deterministic breeding-ledger rules shared across runtimes.
//!
//! `kitty-core` defines the canonical rules of the collectible registry:
//! kitty records, ownership and approval indices, genetic mixing, cooldown
//! progression, and the mating state machine. All state mutation flows
//! through [`transition::execute`], and the crate performs no I/O — the
//! runtime supplies persistence, clock, and caller identity and persists
//! the [`Registry`] per transaction.
pub mod breeding;
pub mod cooldown;
pub mod error;
pub mod events;
pub mod genetics;
pub mod ownership;
pub mod registry;
pub mod state;
pub mod transition;

pub use breeding::{
    BreedWithAuto, BreedingStatus, GiveBirth, is_siring_permitted, is_valid_mating_pair, status,
};
pub use cooldown::{COOLDOWNS, MAX_COOLDOWN_INDEX, duration_for_index, index_for_generation};
pub use error::{DomainError, ErrorSeverity, RulesError};
pub use events::LedgerEvent;
pub use genetics::mix_genes;
pub use ownership::{Approve, ApproveSiring, TransferKitty};
pub use registry::CreateKitty;
pub use state::{Genes, Identity, Kitty, KittyId, RecordsError, Registry, Timestamp};
pub use transition::{EventLog, Transition, TxContext};
