//! Common error infrastructure for kitty-core.
//!
//! Every public operation returns either a success value or a typed
//! failure; there is no silent failure path. Rule violations are detected
//! before any mutation, so a failed transition leaves the registry exactly
//! as it was loaded.

use crate::state::{Identity, KittyId, Timestamp};

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// Temporary condition; the same request may succeed later.
    ///
    /// Example: a cooldown that has not elapsed yet.
    Recoverable,

    /// Invalid input; should not be retried without changes.
    ///
    /// Examples: unknown kitty ID, forbidden mating pair.
    Validation,

    /// Unexpected state inconsistency. Indicates a bug or corrupt records.
    Internal,

    /// Unrecoverable; the persisted state cannot be trusted.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Classification shared by all domain error types.
pub trait DomainError {
    fn severity(&self) -> ErrorSeverity;
    fn error_code(&self) -> &'static str;
}

/// Rule violations raised by registry, ownership, and breeding operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    /// The kitty ID is 0 or out of the valid range.
    #[error("kitty {id} does not exist")]
    NotFound { id: KittyId },

    /// Cooldown or pregnancy state forbids the operation right now.
    #[error("kitty {id} is not ready until {until}")]
    NotReady { id: KittyId, until: Timestamp },

    /// The genetic/parentage rules reject this pairing.
    #[error("kitties {matron} (matron) and {sire} (sire) are not a valid mating pair")]
    InvalidPair { matron: KittyId, sire: KittyId },

    /// The caller is not the required owner or approved party.
    #[error("{caller} is not authorized to act on kitty {id}")]
    Unauthorized { caller: Identity, id: KittyId },

    /// The empty identity cannot receive a kitty.
    #[error("the empty identity cannot receive a kitty")]
    InvalidRecipient,
}

impl DomainError for RulesError {
    fn severity(&self) -> ErrorSeverity {
        use RulesError::*;
        match self {
            // Time will cure a cooldown; nothing else will.
            NotReady { .. } => ErrorSeverity::Recoverable,
            NotFound { .. } | InvalidPair { .. } | Unauthorized { .. } | InvalidRecipient => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        use RulesError::*;
        match self {
            NotFound { .. } => "RULES_NOT_FOUND",
            NotReady { .. } => "RULES_NOT_READY",
            InvalidPair { .. } => "RULES_INVALID_PAIR",
            Unauthorized { .. } => "RULES_UNAUTHORIZED",
            InvalidRecipient => "RULES_INVALID_RECIPIENT",
        }
    }
}

impl DomainError for crate::state::RecordsError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use crate::state::RecordsError::*;
        match self {
            LengthMismatch { .. } => "RECORDS_LENGTH_MISMATCH",
            MissingSentinel => "RECORDS_MISSING_SENTINEL",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_ready_is_the_only_recoverable_rule_error() {
        let not_ready = RulesError::NotReady {
            id: KittyId(3),
            until: Timestamp(60),
        };
        assert!(not_ready.severity().is_recoverable());

        let unauthorized = RulesError::Unauthorized {
            caller: Identity::from("mallory"),
            id: KittyId(3),
        };
        assert_eq!(unauthorized.severity(), ErrorSeverity::Validation);
        assert_eq!(unauthorized.error_code(), "RULES_UNAUTHORIZED");
    }
}
