//! Breeding engine: mating-pair validation, cooldown progression, and
//! offspring creation.
//!
//! Per kitty the engine drives a three-state machine over `siring_with_id`
//! and `cooldown_end`:
//!
//! - **Idle** — not pregnant, past cooldown; ready to breed.
//! - **Cooling down** — not pregnant, cooldown still running.
//! - **Pregnant** — a sire is committed; only `GiveBirth` may proceed.

use crate::error::RulesError;
use crate::events::LedgerEvent;
use crate::genetics::mix_genes;
use crate::registry::create_kitty;
use crate::state::{Identity, Kitty, KittyId, Registry, Timestamp};
use crate::transition::{EventLog, Transition, TxContext};

/// Position of a kitty in the breeding state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BreedingStatus {
    Idle,
    CoolingDown,
    Pregnant,
}

/// Classifies `kitty` at instant `now`.
pub fn status(kitty: &Kitty, now: Timestamp) -> BreedingStatus {
    if kitty.is_pregnant() {
        BreedingStatus::Pregnant
    } else if now < kitty.cooldown_end {
        BreedingStatus::CoolingDown
    } else {
        BreedingStatus::Idle
    }
}

/// Checks the genetic/parentage rules for a prospective pairing.
///
/// Rejects self-pairing, parent↔child pairing, and full/half-sibling
/// pairing. A party of generation 0 has no recorded ancestry, so once the
/// direct parent/child checks pass, such a pairing is automatically valid.
///
/// Fails with `NotFound` if either ID is out of the valid range.
pub fn is_valid_mating_pair(
    registry: &Registry,
    matron_id: KittyId,
    sire_id: KittyId,
) -> Result<bool, RulesError> {
    let matron = registry.kitty(matron_id)?;
    let sire = registry.kitty(sire_id)?;

    if matron_id == sire_id {
        return Ok(false);
    }

    // No mating with own parents, in either role.
    if matron.matron_id == sire_id || matron.sire_id == sire_id {
        return Ok(false);
    }
    if sire.matron_id == matron_id || sire.sire_id == matron_id {
        return Ok(false);
    }

    // Generation 0 carries no shared ancestry to check.
    if matron.generation == 0 || sire.generation == 0 {
        return Ok(true);
    }

    // Full or half siblings: any shared parent across the four combinations.
    if matron.matron_id == sire.matron_id || matron.matron_id == sire.sire_id {
        return Ok(false);
    }
    if matron.sire_id == sire.matron_id || matron.sire_id == sire.sire_id {
        return Ok(false);
    }

    Ok(true)
}

/// Whether the matron's owner may use this sire.
///
/// Permitted when the matron's owner also owns the sire, or when the
/// sire's siring approval names the matron's owner.
pub fn is_siring_permitted(
    registry: &Registry,
    matron_id: KittyId,
    sire_id: KittyId,
) -> Result<bool, RulesError> {
    let matron_owner = registry.owner_of(matron_id)?;
    let sire_owner = registry.owner_of(sire_id)?;
    Ok(matron_owner == sire_owner || registry.sire_approved_for(sire_id)? == matron_owner)
}

fn ensure_ready(kitty: &Kitty, id: KittyId, now: Timestamp) -> Result<(), RulesError> {
    if !kitty.is_ready(now) {
        return Err(RulesError::NotReady {
            id,
            until: kitty.cooldown_end,
        });
    }
    Ok(())
}

/// Commits a mating: the matron becomes pregnant by the sire and both
/// parties re-enter their cooldown with an advanced index.
#[derive(Clone, Debug)]
pub struct BreedWithAuto {
    pub sire_id: KittyId,
    pub matron_id: KittyId,
}

impl Transition for BreedWithAuto {
    type Output = ();

    fn pre_validate(&self, registry: &Registry, ctx: &TxContext) -> Result<(), RulesError> {
        let matron = registry.kitty(self.matron_id)?;
        let sire = registry.kitty(self.sire_id)?;

        if !registry.is_owned_by(self.matron_id, &ctx.caller) {
            return Err(RulesError::Unauthorized {
                caller: ctx.caller.clone(),
                id: self.matron_id,
            });
        }
        if !is_siring_permitted(registry, self.matron_id, self.sire_id)? {
            return Err(RulesError::Unauthorized {
                caller: ctx.caller.clone(),
                id: self.sire_id,
            });
        }

        ensure_ready(matron, self.matron_id, ctx.now)?;
        ensure_ready(sire, self.sire_id, ctx.now)?;

        if !is_valid_mating_pair(registry, self.matron_id, self.sire_id)? {
            return Err(RulesError::InvalidPair {
                matron: self.matron_id,
                sire: self.sire_id,
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
        let owner = registry.owner_of(self.matron_id)?.clone();

        let matron = registry.kitty_mut(self.matron_id)?;
        matron.siring_with_id = self.sire_id;
        matron.trigger_cooldown(ctx.now);
        let matron_cooldown_end = matron.cooldown_end;

        registry.kitty_mut(self.sire_id)?.trigger_cooldown(ctx.now);

        // Consumed on use: a delegated siring consent is single-shot.
        registry.set_sire_approved(self.matron_id, Identity::empty());
        registry.set_sire_approved(self.sire_id, Identity::empty());

        events.record(LedgerEvent::Pregnant {
            owner,
            matron_id: self.matron_id,
            sire_id: self.sire_id,
            matron_cooldown_end,
        });
        Ok(())
    }
}

/// Delivers a pregnant matron's kitten once her gestation cooldown has
/// elapsed. The newborn belongs to the matron's current owner.
#[derive(Clone, Debug)]
pub struct GiveBirth {
    pub matron_id: KittyId,
}

impl Transition for GiveBirth {
    type Output = KittyId;

    fn pre_validate(&self, registry: &Registry, ctx: &TxContext) -> Result<(), RulesError> {
        let matron = registry.kitty(self.matron_id)?;
        if !matron.is_pregnant() || ctx.now < matron.cooldown_end {
            return Err(RulesError::NotReady {
                id: self.matron_id,
                until: matron.cooldown_end,
            });
        }
        registry.kitty(matron.siring_with_id)?;
        Ok(())
    }

    fn apply(
        &self,
        registry: &mut Registry,
        ctx: &TxContext,
        events: &mut EventLog,
    ) -> Result<KittyId, RulesError> {
        let matron = registry.kitty(self.matron_id)?.clone();
        let sire_id = matron.siring_with_id;
        let sire = registry.kitty(sire_id)?.clone();

        let child_genes = mix_genes(matron.genes, sire.genes);
        let child_generation = matron.generation.max(sire.generation) + 1;
        let owner = registry.owner_of(self.matron_id)?.clone();

        let child_id = create_kitty(
            registry,
            ctx,
            self.matron_id,
            sire_id,
            child_generation,
            child_genes,
            &owner,
            events,
        )?;

        registry.kitty_mut(self.matron_id)?.siring_with_id = KittyId::NONE;

        Ok(child_id)
    }
}
