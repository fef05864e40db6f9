//! Unified error types surfaced by the contract API.
//!
//! Rule violations, persistence failures, and record corruption stay
//! distinguishable so callers can tell a retryable cooldown from a store
//! that needs operator attention.

use kitty_core::{RecordsError, RulesError};

use crate::ledger::{LedgerKey, StoreError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// A domain rule rejected the operation before any write happened.
    #[error(transparent)]
    Rules(#[from] RulesError),

    /// The backing store failed; propagated unmodified.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A persisted record could not be encoded or decoded.
    #[error("failed to encode or decode record {key}")]
    Codec {
        key: LedgerKey,
        #[source]
        source: serde_json::Error,
    },

    /// The persisted record sequences are mutually inconsistent.
    #[error(transparent)]
    Records(#[from] RecordsError),

    /// Some records exist while `key` is absent; the store is corrupt.
    #[error("record {key} is missing while sibling records exist")]
    MissingRecord { key: LedgerKey },
}

impl RuntimeError {
    /// Extracts the rule violation, if this is one.
    pub fn as_rules(&self) -> Option<&RulesError> {
        match self {
            RuntimeError::Rules(rules) => Some(rules),
            _ => None,
        }
    }
}
