//! Kitty creation.
//!
//! One creation path serves both genesis seeding (explicit generation and
//! genes) and births (driven by the breeding engine). Creation appends a
//! record plus default index entries in lockstep, announces the birth, and
//! hands the newborn to its owner through the birth transfer.

use crate::cooldown::{duration_for_index, index_for_generation};
use crate::error::RulesError;
use crate::events::LedgerEvent;
use crate::ownership::transfer_unchecked;
use crate::state::{Genes, Identity, Kitty, KittyId, Registry};
use crate::transition::{EventLog, Transition, TxContext};

/// Allocates the next sequential kitty ID and writes the new record.
///
/// Stamps `birth_time` from the transaction clock and derives the initial
/// cooldown from the generation. Emits `Birth`, then the birth transfer
/// (`from` = empty sentinel, so no approvals are cleared).
pub(crate) fn create_kitty(
    registry: &mut Registry,
    ctx: &TxContext,
    matron_id: KittyId,
    sire_id: KittyId,
    generation: u64,
    genes: Genes,
    owner: &Identity,
    events: &mut EventLog,
) -> Result<KittyId, RulesError> {
    if owner.is_empty() {
        return Err(RulesError::InvalidRecipient);
    }

    let cooldown_index = index_for_generation(generation);
    let birth_time = ctx.now;
    let kitty = Kitty {
        genes,
        birth_time,
        cooldown_end: birth_time.saturating_add(duration_for_index(cooldown_index)),
        matron_id,
        sire_id,
        siring_with_id: KittyId::NONE,
        cooldown_index,
        generation,
    };

    let kitty_id = registry.append_kitty(kitty);
    events.record(LedgerEvent::Birth {
        owner: owner.clone(),
        kitty_id,
        matron_id,
        sire_id,
        genes,
    });
    transfer_unchecked(registry, Identity::empty(), owner.clone(), kitty_id, events);

    Ok(kitty_id)
}

/// Administrative creation of a kitty with explicit parentage, generation,
/// and genes — the genesis seeding path.
///
/// Parent IDs and generation are trusted as given; the genetic rules only
/// constrain records produced through breeding.
#[derive(Clone, Debug)]
pub struct CreateKitty {
    pub matron_id: KittyId,
    pub sire_id: KittyId,
    pub generation: u64,
    pub genes: Genes,
    pub owner: Identity,
}

impl Transition for CreateKitty {
    type Output = KittyId;

    fn pre_validate(&self, _registry: &Registry, _ctx: &TxContext) -> Result<(), RulesError> {
        if self.owner.is_empty() {
            return Err(RulesError::InvalidRecipient);
        }
        Ok(())
    }

    fn apply(
        &self,
        registry: &mut Registry,
        ctx: &TxContext,
        events: &mut EventLog,
    ) -> Result<KittyId, RulesError> {
        create_kitty(
            registry,
            ctx,
            self.matron_id,
            self.sire_id,
            self.generation,
            self.genes,
            &self.owner,
            events,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cooldown::MAX_COOLDOWN_INDEX;
    use crate::state::Timestamp;
    use crate::transition::execute;

    fn genesis_transition(owner: &Identity, genes: u64) -> CreateKitty {
        CreateKitty {
            matron_id: KittyId::NONE,
            sire_id: KittyId::NONE,
            generation: 0,
            genes: Genes(genes),
            owner: owner.clone(),
        }
    }

    #[test]
    fn created_kitty_belongs_to_the_requested_owner() {
        let alice = Identity::from("alice");
        let mut registry = Registry::genesis();
        let ctx = TxContext::new(alice.clone(), Timestamp(500));

        let (id, events) =
            execute(&genesis_transition(&alice, 0xfeed), &mut registry, &ctx).unwrap();

        assert_eq!(id, KittyId(1));
        assert_eq!(registry.owner_of(id).unwrap(), &alice);
        assert!(registry.approved_for(id).unwrap().is_empty());
        assert!(registry.sire_approved_for(id).unwrap().is_empty());

        // Birth first, then the handover transfer from the empty sentinel.
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].name(), "Birth");
        assert_eq!(
            events[1],
            LedgerEvent::Transfer {
                from: Identity::empty(),
                to: alice,
                kitty_id: id,
            }
        );
    }

    #[test]
    fn birth_time_and_cooldown_derive_from_transaction_clock() {
        let alice = Identity::from("alice");
        let mut registry = Registry::genesis();
        let ctx = TxContext::new(alice.clone(), Timestamp(10_000));

        let transition = CreateKitty {
            matron_id: KittyId::NONE,
            sire_id: KittyId::NONE,
            generation: 8,
            genes: Genes(1),
            owner: alice,
        };
        let (id, _) = execute(&transition, &mut registry, &ctx).unwrap();
        let kitty = registry.kitty(id).unwrap();

        assert_eq!(kitty.birth_time, Timestamp(10_000));
        assert_eq!(kitty.cooldown_index, 4);
        // Index 4 in the table is 30 seconds.
        assert_eq!(kitty.cooldown_end, Timestamp(10_030));
    }

    #[test]
    fn cooldown_index_clamps_for_deep_generations() {
        let alice = Identity::from("alice");
        let mut registry = Registry::genesis();
        let ctx = TxContext::new(alice.clone(), Timestamp(0));

        let transition = CreateKitty {
            matron_id: KittyId::NONE,
            sire_id: KittyId::NONE,
            generation: 1_000,
            genes: Genes(1),
            owner: alice,
        };
        let (id, _) = execute(&transition, &mut registry, &ctx).unwrap();
        assert_eq!(registry.kitty(id).unwrap().cooldown_index, MAX_COOLDOWN_INDEX);
    }

    #[test]
    fn ids_are_sequential_and_one_based() {
        let alice = Identity::from("alice");
        let mut registry = Registry::genesis();
        let ctx = TxContext::new(alice.clone(), Timestamp(0));

        for expected in 1..=4u64 {
            let (id, _) =
                execute(&genesis_transition(&alice, expected), &mut registry, &ctx).unwrap();
            assert_eq!(id, KittyId(expected));
        }
        assert_eq!(registry.total_supply(), 4);
    }

    #[test]
    fn empty_owner_is_rejected_without_allocation() {
        let mut registry = Registry::genesis();
        let ctx = TxContext::new(Identity::from("alice"), Timestamp(0));

        let err = execute(
            &genesis_transition(&Identity::empty(), 1),
            &mut registry,
            &ctx,
        )
        .unwrap_err();
        assert_eq!(err, RulesError::InvalidRecipient);
        assert_eq!(registry.total_supply(), 0);
    }
}
