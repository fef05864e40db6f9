//! Record (de)serialization between the registry aggregate and the store.
//!
//! Each of the four logical records persists as a self-describing JSON
//! array. Loading goes through the transaction so staged writes are
//! observed (read-your-writes); a registry assembled from a partially
//! present record set is refused rather than silently defaulted.

use serde::Serialize;
use serde::de::DeserializeOwned;

use kitty_core::{Identity, Kitty, Registry};

use crate::error::{Result, RuntimeError};
use crate::ledger::{LedgerKey, LedgerStore};
use crate::transaction::Transaction;

fn read_record<T, S>(tx: &Transaction<'_, S>, key: LedgerKey) -> Result<Option<T>>
where
    T: DeserializeOwned,
    S: LedgerStore + ?Sized,
{
    let Some(bytes) = tx.get(key)? else {
        return Ok(None);
    };
    let value =
        serde_json::from_slice(&bytes).map_err(|source| RuntimeError::Codec { key, source })?;
    Ok(Some(value))
}

fn write_record<T, S>(tx: &mut Transaction<'_, S>, key: LedgerKey, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    S: LedgerStore + ?Sized,
{
    let bytes =
        serde_json::to_vec(value).map_err(|source| RuntimeError::Codec { key, source })?;
    tx.put(key, bytes);
    Ok(())
}

/// Loads the registry aggregate from the transaction's view of the store.
///
/// A store that holds none of the four records yields the genesis registry
/// (sentinel slots only). A store that holds some but not all of them is
/// corrupt and fails loudly.
pub fn load_registry<S>(tx: &Transaction<'_, S>) -> Result<Registry>
where
    S: LedgerStore + ?Sized,
{
    let kitties: Option<Vec<Kitty>> = read_record(tx, LedgerKey::Kitties)?;
    let owners: Option<Vec<Identity>> = read_record(tx, LedgerKey::Owners)?;
    let approved: Option<Vec<Identity>> = read_record(tx, LedgerKey::Approved)?;
    let sire_approved: Option<Vec<Identity>> = read_record(tx, LedgerKey::SireApproved)?;

    match (kitties, owners, approved, sire_approved) {
        (None, None, None, None) => Ok(Registry::genesis()),
        (Some(kitties), Some(owners), Some(approved), Some(sire_approved)) => {
            Ok(Registry::from_records(kitties, owners, approved, sire_approved)?)
        }
        (kitties, owners, approved, _) => {
            let key = if kitties.is_none() {
                LedgerKey::Kitties
            } else if owners.is_none() {
                LedgerKey::Owners
            } else if approved.is_none() {
                LedgerKey::Approved
            } else {
                LedgerKey::SireApproved
            };
            Err(RuntimeError::MissingRecord { key })
        }
    }
}

/// Stages all four registry records into the transaction.
///
/// The records always travel together: they grow in lockstep and commit as
/// one atomic group, so rewriting an untouched record is a no-op.
pub fn save_registry<S>(tx: &mut Transaction<'_, S>, registry: &Registry) -> Result<()>
where
    S: LedgerStore + ?Sized,
{
    write_record(tx, LedgerKey::Kitties, registry.kitty_records())?;
    write_record(tx, LedgerKey::Owners, registry.owner_records())?;
    write_record(tx, LedgerKey::Approved, registry.approved_records())?;
    write_record(tx, LedgerKey::SireApproved, registry.sire_approved_records())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::InMemoryLedger;

    #[test]
    fn empty_store_loads_the_genesis_registry() {
        let store = InMemoryLedger::new();
        let tx = Transaction::begin(&store);
        let registry = load_registry(&tx).unwrap();
        assert_eq!(registry, Registry::genesis());
    }

    #[test]
    fn saved_registry_round_trips_through_commit() {
        let store = InMemoryLedger::new();

        let mut tx = Transaction::begin(&store);
        let registry = Registry::genesis();
        save_registry(&mut tx, &registry).unwrap();
        tx.commit().unwrap();

        let tx = Transaction::begin(&store);
        assert_eq!(load_registry(&tx).unwrap(), registry);
    }

    #[test]
    fn partially_present_records_are_refused() {
        let store = InMemoryLedger::new();
        store
            .put(LedgerKey::Kitties, serde_json::to_vec(&[Kitty::default()]).unwrap())
            .unwrap();

        let tx = Transaction::begin(&store);
        let err = load_registry(&tx).unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::MissingRecord {
                key: LedgerKey::Owners,
            }
        ));
    }

    #[test]
    fn undecodable_record_reports_its_key() {
        let store = InMemoryLedger::new();
        for key in LedgerKey::ALL {
            store.put(key, b"not json".to_vec()).unwrap();
        }

        let tx = Transaction::begin(&store);
        let err = load_registry(&tx).unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::Codec {
                key: LedgerKey::Kitties,
                ..
            }
        ));
    }
}
