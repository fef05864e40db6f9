//! Public contract surface over the breeding ledger.
//!
//! Every operation is one logical unit of work: load the registry through
//! a fresh transaction, run the pure transition, stage the records, commit
//! them as a group, and only then publish the produced events. A failure
//! at any step discards the transaction, so the store never observes a
//! partially applied operation.

use kitty_core::{
    Approve, ApproveSiring, BreedWithAuto, CreateKitty, Genes, GiveBirth, Identity, Kitty,
    KittyId, LedgerEvent, Registry, Transition, TransferKitty, TxContext, transition,
};
use tokio::sync::broadcast;

use crate::context::{CallerResolver, TransactionClock};
use crate::error::Result;
use crate::events::{EventBus, Topic};
use crate::ledger::{self, LedgerStore};
use crate::transaction::Transaction;

pub struct KittyContract<S, C, R>
where
    S: LedgerStore,
    C: TransactionClock,
    R: CallerResolver,
{
    store: S,
    clock: C,
    resolver: R,
    events: EventBus,
}

impl<S, C, R> KittyContract<S, C, R>
where
    S: LedgerStore,
    C: TransactionClock,
    R: CallerResolver,
{
    pub fn new(store: S, clock: C, resolver: R) -> Self {
        Self::with_event_bus(store, clock, resolver, EventBus::new())
    }

    pub fn with_event_bus(store: S, clock: C, resolver: R, events: EventBus) -> Self {
        Self {
            store,
            clock,
            resolver,
            events,
        }
    }

    /// Subscribes to committed events on `topic`.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<LedgerEvent> {
        self.events.subscribe(topic)
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.events
    }

    // ------------------------------------------------------------------
    // Mutating operations
    // ------------------------------------------------------------------

    /// Seeds a kitty with explicit parentage, generation, and genes.
    pub fn create_kitty(
        &self,
        matron_id: KittyId,
        sire_id: KittyId,
        generation: u64,
        genes: Genes,
        owner: Identity,
    ) -> Result<KittyId> {
        self.run(&CreateKitty {
            matron_id,
            sire_id,
            generation,
            genes,
            owner,
        })
    }

    /// Transfers a kitty; `from` must be the current owner and the caller
    /// must be that owner or the approved party.
    pub fn transfer(&self, from: Identity, to: Identity, kitty_id: KittyId) -> Result<()> {
        self.run(&TransferKitty { from, to, kitty_id })
    }

    /// Approves `approved` to receive a transfer of the kitty.
    pub fn approve(&self, kitty_id: KittyId, approved: Identity) -> Result<()> {
        self.run(&Approve { kitty_id, approved })
    }

    /// Approves `approved` to use the kitty as a sire.
    pub fn approve_siring(&self, kitty_id: KittyId, approved: Identity) -> Result<()> {
        self.run(&ApproveSiring { kitty_id, approved })
    }

    /// Mates the caller's matron with the sire.
    pub fn breed_with_auto(&self, sire_id: KittyId, matron_id: KittyId) -> Result<()> {
        self.run(&BreedWithAuto { sire_id, matron_id })
    }

    /// Delivers a pregnant matron's kitten and returns its ID.
    pub fn give_birth(&self, matron_id: KittyId) -> Result<KittyId> {
        self.run(&GiveBirth { matron_id })
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn kitty(&self, id: KittyId) -> Result<Kitty> {
        Ok(self.view()?.kitty(id)?.clone())
    }

    pub fn owner_of(&self, id: KittyId) -> Result<Identity> {
        Ok(self.view()?.owner_of(id)?.clone())
    }

    pub fn approved_for(&self, id: KittyId) -> Result<Identity> {
        Ok(self.view()?.approved_for(id)?.clone())
    }

    pub fn sire_approved_for(&self, id: KittyId) -> Result<Identity> {
        Ok(self.view()?.sire_approved_for(id)?.clone())
    }

    pub fn total_supply(&self) -> Result<u64> {
        Ok(self.view()?.total_supply())
    }

    /// IDs of every kitty owned by `owner`, in ascending order.
    pub fn tokens_of_owner(&self, owner: &Identity) -> Result<Vec<KittyId>> {
        Ok(self.view()?.tokens_of_owner(owner).collect())
    }

    pub fn is_pregnant(&self, id: KittyId) -> Result<bool> {
        Ok(self.view()?.kitty(id)?.is_pregnant())
    }

    pub fn is_ready_to_breed(&self, id: KittyId) -> Result<bool> {
        Ok(self.view()?.kitty(id)?.is_ready(self.clock.now()))
    }

    pub fn is_valid_mating_pair(&self, matron_id: KittyId, sire_id: KittyId) -> Result<bool> {
        Ok(kitty_core::is_valid_mating_pair(
            &self.view()?,
            matron_id,
            sire_id,
        )?)
    }

    pub fn is_siring_permitted(&self, matron_id: KittyId, sire_id: KittyId) -> Result<bool> {
        Ok(kitty_core::is_siring_permitted(
            &self.view()?,
            matron_id,
            sire_id,
        )?)
    }

    // ------------------------------------------------------------------

    /// Runs one transition as a full transaction.
    fn run<T: Transition>(&self, op: &T) -> Result<T::Output> {
        let ctx = TxContext::new(self.resolver.caller(), self.clock.now());

        let mut tx = Transaction::begin(&self.store);
        let mut registry = ledger::load_registry(&tx)?;
        let (output, events) = transition::execute(op, &mut registry, &ctx)?;
        ledger::save_registry(&mut tx, &registry)?;
        tx.commit()?;

        tracing::debug!(caller = %ctx.caller, events = events.len(), "transaction committed");
        for event in events {
            tracing::trace!(name = event.name(), "publishing event");
            self.events.publish(event);
        }
        Ok(output)
    }

    /// Loads a read-only snapshot of the registry.
    fn view(&self) -> Result<Registry> {
        let tx = Transaction::begin(&self.store);
        ledger::load_registry(&tx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{FixedClock, StaticCaller};
    use crate::ledger::InMemoryLedger;
    use kitty_core::{RulesError, Timestamp};

    fn contract(caller: &str) -> KittyContract<InMemoryLedger, FixedClock, StaticCaller> {
        KittyContract::new(
            InMemoryLedger::new(),
            FixedClock::new(Timestamp(1_000)),
            StaticCaller::new(caller),
        )
    }

    #[test]
    fn create_then_query_round_trips_through_the_store() {
        let contract = contract("alice");
        let id = contract
            .create_kitty(
                KittyId::NONE,
                KittyId::NONE,
                0,
                Genes(0xabcd),
                Identity::from("alice"),
            )
            .unwrap();

        assert_eq!(contract.owner_of(id).unwrap(), Identity::from("alice"));
        assert_eq!(contract.total_supply().unwrap(), 1);
        assert_eq!(contract.kitty(id).unwrap().birth_time, Timestamp(1_000));
        assert_eq!(contract.tokens_of_owner(&Identity::from("alice")).unwrap(), vec![id]);
    }

    #[test]
    fn failed_operations_leave_the_store_untouched() {
        let contract = contract("alice");
        contract
            .create_kitty(
                KittyId::NONE,
                KittyId::NONE,
                0,
                Genes(1),
                Identity::from("bob"),
            )
            .unwrap();

        // alice does not own kitty 1, so this must fail...
        let err = contract
            .transfer(Identity::from("alice"), Identity::from("carol"), KittyId(1))
            .unwrap_err();
        assert!(matches!(
            err.as_rules(),
            Some(RulesError::Unauthorized { .. })
        ));

        // ...and bob must still own it.
        assert_eq!(contract.owner_of(KittyId(1)).unwrap(), Identity::from("bob"));
    }

    #[test]
    fn queries_fail_loudly_for_the_sentinel_id() {
        let contract = contract("alice");
        let err = contract.owner_of(KittyId::NONE).unwrap_err();
        assert!(matches!(
            err.as_rules(),
            Some(RulesError::NotFound { id: KittyId(0) })
        ));
    }
}
