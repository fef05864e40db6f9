//! Authoritative registry state.
//!
//! This module owns the kitty records and the three parallel index
//! structures (owner, transfer approval, sire approval) keyed by kitty ID.
//! Runtime layers load and persist this state per transaction but mutate it
//! exclusively through the transitions in [`crate::ownership`],
//! [`crate::registry`], and [`crate::breeding`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RulesError;

/// Identifier of a kitty record.
///
/// IDs are 1-based and sequential. ID 0 is the reserved sentinel meaning
/// "no kitty" (genesis parentage, not pregnant).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KittyId(pub u64);

impl KittyId {
    /// The "no kitty" sentinel.
    pub const NONE: KittyId = KittyId(0);

    /// Returns true if this is the sentinel ID.
    #[inline]
    pub fn is_none(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for KittyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque 64-bit genome bit pattern.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Genes(pub u64);

impl fmt::Display for Genes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

/// Transaction-time instant, in whole seconds.
///
/// Always derived from the transaction clock, never from a local wall
/// clock, so replays of the same transaction are deterministic.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(pub u64);

impl Timestamp {
    /// Offsets this instant forward by `seconds`, saturating at the maximum.
    #[inline]
    pub fn saturating_add(self, seconds: u64) -> Timestamp {
        Timestamp(self.0.saturating_add(seconds))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An account identity as resolved by the transaction context.
///
/// The empty string is the sentinel for "no owner / no approval"; every
/// cleared index entry holds it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    /// The empty "no identity" sentinel.
    pub const fn empty() -> Self {
        Identity(String::new())
    }

    pub fn new(name: impl Into<String>) -> Self {
        Identity(name.into())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Identity {
    fn from(name: &str) -> Self {
        Identity(name.to_owned())
    }
}

impl From<String> for Identity {
    fn from(name: String) -> Self {
        Identity(name)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "<none>")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// A single bred collectible record.
///
/// `genes`, parentage, and `generation` are immutable after creation; only
/// `siring_with_id`, `cooldown_end`, and `cooldown_index` change, and only
/// through the breeding transitions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kitty {
    pub genes: Genes,
    pub birth_time: Timestamp,
    pub cooldown_end: Timestamp,
    pub matron_id: KittyId,
    pub sire_id: KittyId,
    pub siring_with_id: KittyId,
    pub cooldown_index: u8,
    pub generation: u64,
}

impl Kitty {
    /// True while the kitty is gestating (a sire has been committed).
    #[inline]
    pub fn is_pregnant(&self) -> bool {
        !self.siring_with_id.is_none()
    }

    /// True when the kitty may enter a new mating: not pregnant and past
    /// its cooldown.
    #[inline]
    pub fn is_ready(&self, now: Timestamp) -> bool {
        !self.is_pregnant() && now >= self.cooldown_end
    }

    /// Re-enters the cooling-down state: stamps a new `cooldown_end` from
    /// the current index, then advances the index one step (clamped to the
    /// table maximum, never reset).
    pub(crate) fn trigger_cooldown(&mut self, now: Timestamp) {
        self.cooldown_end = now.saturating_add(crate::cooldown::duration_for_index(self.cooldown_index));
        if self.cooldown_index < crate::cooldown::MAX_COOLDOWN_INDEX {
            self.cooldown_index += 1;
        }
    }
}

/// Reassembly failure for persisted registry records.
///
/// These indicate corrupt persisted state rather than a rule violation, so
/// they are kept apart from [`RulesError`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RecordsError {
    /// The four parallel sequences no longer grow in lockstep.
    #[error(
        "parallel records out of lockstep (kitties: {kitties}, owners: {owners}, \
         approved: {approved}, sire-approved: {sire_approved})"
    )]
    LengthMismatch {
        kitties: usize,
        owners: usize,
        approved: usize,
        sire_approved: usize,
    },

    /// Slot 0 of the kitty sequence is missing entirely.
    #[error("kitty records are empty; slot 0 must hold the reserved sentinel")]
    MissingSentinel,
}

/// The authoritative collection of kitties plus the three parallel indices.
///
/// Slot 0 of every sequence is the reserved sentinel entry; real kitties
/// start at ID 1. Growth happens only through [`Registry::append_kitty`],
/// which pushes to all four sequences at once, so the lockstep invariant
/// cannot be broken by a partial append.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registry {
    kitties: Vec<Kitty>,
    owners: Vec<Identity>,
    approved: Vec<Identity>,
    sire_approved: Vec<Identity>,
}

impl Registry {
    /// Creates a fresh registry holding only the slot-0 sentinels.
    pub fn genesis() -> Self {
        Self {
            kitties: vec![Kitty::default()],
            owners: vec![Identity::empty()],
            approved: vec![Identity::empty()],
            sire_approved: vec![Identity::empty()],
        }
    }

    /// Reassembles a registry from persisted record sequences.
    pub fn from_records(
        kitties: Vec<Kitty>,
        owners: Vec<Identity>,
        approved: Vec<Identity>,
        sire_approved: Vec<Identity>,
    ) -> Result<Self, RecordsError> {
        if kitties.is_empty() {
            return Err(RecordsError::MissingSentinel);
        }
        if owners.len() != kitties.len()
            || approved.len() != kitties.len()
            || sire_approved.len() != kitties.len()
        {
            return Err(RecordsError::LengthMismatch {
                kitties: kitties.len(),
                owners: owners.len(),
                approved: approved.len(),
                sire_approved: sire_approved.len(),
            });
        }
        Ok(Self {
            kitties,
            owners,
            approved,
            sire_approved,
        })
    }

    /// Number of real kitties (the slot-0 sentinel is not counted).
    pub fn total_supply(&self) -> u64 {
        (self.kitties.len() - 1) as u64
    }

    /// True if `id` addresses a real record (never the sentinel slot).
    pub fn contains(&self, id: KittyId) -> bool {
        !id.is_none() && (id.0 as usize) < self.kitties.len()
    }

    /// Returns the kitty record, or `NotFound` for ID 0 / out of range.
    pub fn kitty(&self, id: KittyId) -> Result<&Kitty, RulesError> {
        if !self.contains(id) {
            return Err(RulesError::NotFound { id });
        }
        Ok(&self.kitties[id.0 as usize])
    }

    pub(crate) fn kitty_mut(&mut self, id: KittyId) -> Result<&mut Kitty, RulesError> {
        if !self.contains(id) {
            return Err(RulesError::NotFound { id });
        }
        Ok(&mut self.kitties[id.0 as usize])
    }

    /// Current owner of `id`, or `NotFound`.
    pub fn owner_of(&self, id: KittyId) -> Result<&Identity, RulesError> {
        if !self.contains(id) {
            return Err(RulesError::NotFound { id });
        }
        Ok(&self.owners[id.0 as usize])
    }

    /// Identity approved to receive a transfer of `id`, or `NotFound`.
    pub fn approved_for(&self, id: KittyId) -> Result<&Identity, RulesError> {
        if !self.contains(id) {
            return Err(RulesError::NotFound { id });
        }
        Ok(&self.approved[id.0 as usize])
    }

    /// Identity approved to use `id` as a sire, or `NotFound`.
    pub fn sire_approved_for(&self, id: KittyId) -> Result<&Identity, RulesError> {
        if !self.contains(id) {
            return Err(RulesError::NotFound { id });
        }
        Ok(&self.sire_approved[id.0 as usize])
    }

    /// Boolean ownership check; false for unknown IDs.
    pub fn is_owned_by(&self, id: KittyId, who: &Identity) -> bool {
        self.owner_of(id).map(|owner| owner == who).unwrap_or(false)
    }

    /// Boolean transfer-approval check; false for unknown IDs.
    pub fn is_approved_for(&self, id: KittyId, who: &Identity) -> bool {
        self.approved_for(id)
            .map(|approved| approved == who)
            .unwrap_or(false)
    }

    /// Lazy, restartable scan over all kitty IDs owned by `owner`.
    pub fn tokens_of_owner<'a>(
        &'a self,
        owner: &'a Identity,
    ) -> impl Iterator<Item = KittyId> + 'a {
        self.owners
            .iter()
            .enumerate()
            .skip(1)
            .filter(move |(_, entry)| *entry == owner)
            .map(|(index, _)| KittyId(index as u64))
    }

    /// Appends a new kitty with default index entries to all four sequences
    /// and returns its allocated ID.
    ///
    /// This is the only growth path; IDs are sequential and never reused.
    pub(crate) fn append_kitty(&mut self, kitty: Kitty) -> KittyId {
        let id = KittyId(self.kitties.len() as u64);
        self.kitties.push(kitty);
        self.owners.push(Identity::empty());
        self.approved.push(Identity::empty());
        self.sire_approved.push(Identity::empty());
        debug_assert!(self.in_lockstep());
        id
    }

    pub(crate) fn set_owner(&mut self, id: KittyId, who: Identity) {
        self.owners[id.0 as usize] = who;
    }

    pub(crate) fn set_approved(&mut self, id: KittyId, who: Identity) {
        self.approved[id.0 as usize] = who;
    }

    pub(crate) fn set_sire_approved(&mut self, id: KittyId, who: Identity) {
        self.sire_approved[id.0 as usize] = who;
    }

    fn in_lockstep(&self) -> bool {
        self.owners.len() == self.kitties.len()
            && self.approved.len() == self.kitties.len()
            && self.sire_approved.len() == self.kitties.len()
    }

    // Record accessors used by the persistence layer.

    pub fn kitty_records(&self) -> &[Kitty] {
        &self.kitties
    }

    pub fn owner_records(&self) -> &[Identity] {
        &self.owners
    }

    pub fn approved_records(&self) -> &[Identity] {
        &self.approved
    }

    pub fn sire_approved_records(&self) -> &[Identity] {
        &self.sire_approved
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::genesis()
    }
}
