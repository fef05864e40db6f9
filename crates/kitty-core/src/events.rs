//! Domain event payloads.
//!
//! Transitions record these while they run; the runtime publishes them
//! out-of-band only after the whole transaction has committed. Serialized
//! field names keep the historical wire shapes (`kittyID`, `newKittyID`, …)
//! that external consumers already subscribe to.

use serde::{Deserialize, Serialize};

use crate::state::{Genes, Identity, KittyId, Timestamp};

/// A structured notification produced by a committed transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    /// Ownership of a kitty changed hands. Emitted exactly once per
    /// transfer, including the birth transfer (where `from` is empty).
    Transfer {
        from: Identity,
        to: Identity,
        #[serde(rename = "kittyID")]
        kitty_id: KittyId,
    },

    /// A new kitty record was created (genesis seeding or birth).
    Birth {
        owner: Identity,
        #[serde(rename = "newKittyID")]
        kitty_id: KittyId,
        #[serde(rename = "matronID")]
        matron_id: KittyId,
        #[serde(rename = "sireID")]
        sire_id: KittyId,
        genes: Genes,
    },

    /// A mating was committed; the matron is now gestating.
    Pregnant {
        owner: Identity,
        #[serde(rename = "matronID")]
        matron_id: KittyId,
        #[serde(rename = "sireID")]
        sire_id: KittyId,
        #[serde(rename = "matronCooldownEnd")]
        matron_cooldown_end: Timestamp,
    },

    /// An identity was approved to receive a transfer.
    Approval {
        owner: Identity,
        approved: Identity,
        #[serde(rename = "kittyID")]
        kitty_id: KittyId,
    },

    /// An identity was approved to use the kitty as a sire.
    SiringApproval {
        owner: Identity,
        approved: Identity,
        #[serde(rename = "kittyID")]
        kitty_id: KittyId,
    },
}

impl LedgerEvent {
    /// Stable event name used by the emitter collaborator.
    pub fn name(&self) -> &'static str {
        match self {
            LedgerEvent::Transfer { .. } => "Transfer",
            LedgerEvent::Birth { .. } => "Birth",
            LedgerEvent::Pregnant { .. } => "Pregnant",
            LedgerEvent::Approval { .. } => "Approval",
            LedgerEvent::SiringApproval { .. } => "SiringApproval",
        }
    }
}
