//! Ownership and approval transitions.
//!
//! Transfers mutate the owner index and clear both approval indices;
//! approvals grant a single identity the right to receive the kitty or to
//! borrow it as a sire. Authorization is enforced here, inside the engine,
//! not left to callers.

use crate::error::RulesError;
use crate::events::LedgerEvent;
use crate::state::{Identity, KittyId, Registry};
use crate::transition::{EventLog, Transition, TxContext};

/// Reassigns ownership without any authorization check.
///
/// Callers must have validated the transfer already; the birth transfer
/// reaches this directly with the empty `from` sentinel. A non-empty `from`
/// clears any outstanding transfer and siring approvals.
pub(crate) fn transfer_unchecked(
    registry: &mut Registry,
    from: Identity,
    to: Identity,
    kitty_id: KittyId,
    events: &mut EventLog,
) {
    registry.set_owner(kitty_id, to.clone());
    if !from.is_empty() {
        registry.set_approved(kitty_id, Identity::empty());
        registry.set_sire_approved(kitty_id, Identity::empty());
    }
    events.record(LedgerEvent::Transfer { from, to, kitty_id });
}

/// Transfers a kitty from its current owner to another identity.
///
/// `from` must match the current owner, and the caller must be either that
/// owner or the identity named in the transfer-approval index.
#[derive(Clone, Debug)]
pub struct TransferKitty {
    pub from: Identity,
    pub to: Identity,
    pub kitty_id: KittyId,
}

impl Transition for TransferKitty {
    type Output = ();

    fn pre_validate(&self, registry: &Registry, ctx: &TxContext) -> Result<(), RulesError> {
        let owner = registry.owner_of(self.kitty_id)?;
        if self.to.is_empty() {
            return Err(RulesError::InvalidRecipient);
        }
        if *owner != self.from {
            return Err(RulesError::Unauthorized {
                caller: self.from.clone(),
                id: self.kitty_id,
            });
        }
        if ctx.caller != self.from && !registry.is_approved_for(self.kitty_id, &ctx.caller) {
            return Err(RulesError::Unauthorized {
                caller: ctx.caller.clone(),
                id: self.kitty_id,
            });
        }
        Ok(())
    }

    fn apply(
        &self,
        registry: &mut Registry,
        _ctx: &TxContext,
        events: &mut EventLog,
    ) -> Result<(), RulesError> {
        transfer_unchecked(
            registry,
            self.from.clone(),
            self.to.clone(),
            self.kitty_id,
            events,
        );
        Ok(())
    }
}

/// Grants `approved` the right to receive a transfer of the kitty.
///
/// Only the current owner may grant it.
#[derive(Clone, Debug)]
pub struct Approve {
    pub kitty_id: KittyId,
    pub approved: Identity,
}

impl Transition for Approve {
    type Output = ();

    fn pre_validate(&self, registry: &Registry, ctx: &TxContext) -> Result<(), RulesError> {
        let owner = registry.owner_of(self.kitty_id)?;
        if *owner != ctx.caller {
            return Err(RulesError::Unauthorized {
                caller: ctx.caller.clone(),
                id: self.kitty_id,
            });
        }
        Ok(())
    }

    fn apply(
        &self,
        registry: &mut Registry,
        ctx: &TxContext,
        events: &mut EventLog,
    ) -> Result<(), RulesError> {
        registry.set_approved(self.kitty_id, self.approved.clone());
        events.record(LedgerEvent::Approval {
            owner: ctx.caller.clone(),
            approved: self.approved.clone(),
            kitty_id: self.kitty_id,
        });
        Ok(())
    }
}

/// Grants `approved` the right to use the kitty as a sire.
#[derive(Clone, Debug)]
pub struct ApproveSiring {
    pub kitty_id: KittyId,
    pub approved: Identity,
}

impl Transition for ApproveSiring {
    type Output = ();

    fn pre_validate(&self, registry: &Registry, ctx: &TxContext) -> Result<(), RulesError> {
        let owner = registry.owner_of(self.kitty_id)?;
        if *owner != ctx.caller {
            return Err(RulesError::Unauthorized {
                caller: ctx.caller.clone(),
                id: self.kitty_id,
            });
        }
        Ok(())
    }

    fn apply(
        &self,
        registry: &mut Registry,
        ctx: &TxContext,
        events: &mut EventLog,
    ) -> Result<(), RulesError> {
        registry.set_sire_approved(self.kitty_id, self.approved.clone());
        events.record(LedgerEvent::SiringApproval {
            owner: ctx.caller.clone(),
            approved: self.approved.clone(),
            kitty_id: self.kitty_id,
        });
        Ok(())
    }
}
