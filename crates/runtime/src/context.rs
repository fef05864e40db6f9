//! Transaction collaborator traits.
//!
//! The contract resolves the caller identity and the transaction time
//! through these narrow interfaces, never from ambient process state, so a
//! replayed transaction sees exactly the inputs of the original run.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use kitty_core::{Identity, Timestamp};

/// Deterministic per-transaction clock.
pub trait TransactionClock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Resolves the identity invoking the current transaction.
pub trait CallerResolver: Send + Sync {
    fn caller(&self) -> Identity;
}

/// Manually advanced clock, shared between the contract and the test or
/// replay harness driving it. Clones observe the same instant.
#[derive(Clone, Debug, Default)]
pub struct FixedClock {
    now: Arc<AtomicU64>,
}

impl FixedClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start.0)),
        }
    }

    pub fn set(&self, now: Timestamp) {
        self.now.store(now.0, Ordering::SeqCst);
    }

    /// Moves the clock forward by `seconds`.
    pub fn advance(&self, seconds: u64) {
        self.now.fetch_add(seconds, Ordering::SeqCst);
    }
}

impl TransactionClock for FixedClock {
    fn now(&self) -> Timestamp {
        Timestamp(self.now.load(Ordering::SeqCst))
    }
}

/// Wall-clock seconds since the Unix epoch.
///
/// Only suitable where a transport does not already stamp transactions
/// with a logical time; replays against this clock are not deterministic.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl TransactionClock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp(chrono::Utc::now().timestamp().max(0) as u64)
    }
}

/// Resolver that always answers with one fixed identity.
#[derive(Clone, Debug)]
pub struct StaticCaller(Identity);

impl StaticCaller {
    pub fn new(identity: impl Into<Identity>) -> Self {
        Self(identity.into())
    }
}

impl CallerResolver for StaticCaller {
    fn caller(&self) -> Identity {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_clones_share_the_same_instant() {
        let clock = FixedClock::new(Timestamp(10));
        let handle = clock.clone();
        handle.advance(5);
        assert_eq!(clock.now(), Timestamp(15));
        clock.set(Timestamp(100));
        assert_eq!(handle.now(), Timestamp(100));
    }
}
