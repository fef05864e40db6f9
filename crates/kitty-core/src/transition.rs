//! Transition dispatch and execution.
//!
//! Every mutating operation is a transition value executed in two phases:
//! `pre_validate` inspects the registry before any mutation, then `apply`
//! performs the mutation and records events. The driver runs validation
//! first, so a rule violation leaves the registry untouched and the
//! transaction performs zero writes.

use crate::error::RulesError;
use crate::events::LedgerEvent;
use crate::state::{Identity, Registry, Timestamp};

/// Per-transaction facts supplied by the runtime collaborators: the
/// resolved caller identity and the transaction's logical clock reading.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxContext {
    pub caller: Identity,
    pub now: Timestamp,
}

impl TxContext {
    pub fn new(caller: Identity, now: Timestamp) -> Self {
        Self { caller, now }
    }
}

/// Ordered accumulator for events produced while a transition applies.
#[derive(Debug, Default)]
pub struct EventLog(Vec<LedgerEvent>);

impl EventLog {
    pub fn record(&mut self, event: LedgerEvent) {
        self.0.push(event);
    }

    pub fn events(&self) -> &[LedgerEvent] {
        &self.0
    }

    pub fn into_events(self) -> Vec<LedgerEvent> {
        self.0
    }
}

/// Defines how a concrete operation mutates registry state.
pub trait Transition {
    type Output;

    /// Validates preconditions against the state **before** mutation.
    fn pre_validate(&self, _registry: &Registry, _ctx: &TxContext) -> Result<(), RulesError> {
        Ok(())
    }

    /// Applies the operation, mutating the registry and recording events.
    fn apply(
        &self,
        registry: &mut Registry,
        ctx: &TxContext,
        events: &mut EventLog,
    ) -> Result<Self::Output, RulesError>;
}

/// Executes a transition through both phases and returns its output
/// together with the events it produced.
pub fn execute<T: Transition>(
    transition: &T,
    registry: &mut Registry,
    ctx: &TxContext,
) -> Result<(T::Output, Vec<LedgerEvent>), RulesError> {
    transition.pre_validate(registry, ctx)?;
    let mut events = EventLog::default();
    let output = transition.apply(registry, ctx, &mut events)?;
    Ok((output, events.into_events()))
}
