//! File-based LedgerStore implementation.
//!
//! Stores each logical record as one JSON file under a base directory.
//! Writes go to a temp file first and land with an atomic rename, so a
//! crashed write never leaves a half-written record behind.

use std::fs;
use std::path::{Path, PathBuf};

use super::{LedgerKey, LedgerStore, StoreError};

pub struct FileLedger {
    base_dir: PathBuf,
}

impl FileLedger {
    /// Creates a file ledger rooted at `base_dir`, creating it if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn record_path(&self, key: LedgerKey) -> PathBuf {
        self.base_dir.join(format!("{}.json", key))
    }
}

impl LedgerStore for FileLedger {
    fn get(&self, key: LedgerKey) -> Result<Option<Vec<u8>>, StoreError> {
        let path = self.record_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&path)?;
        Ok(Some(bytes))
    }

    fn put(&self, key: LedgerKey, bytes: Vec<u8>) -> Result<(), StoreError> {
        let path = self.record_path(key);
        let temp_path = path.with_extension("json.tmp");

        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!("wrote record {} to {}", key, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_survive_reopening_the_ledger() {
        let dir = tempfile::tempdir().unwrap();
        {
            let ledger = FileLedger::new(dir.path()).unwrap();
            ledger.put(LedgerKey::Kitties, b"[{}]".to_vec()).unwrap();
        }
        let reopened = FileLedger::new(dir.path()).unwrap();
        assert_eq!(
            reopened.get(LedgerKey::Kitties).unwrap(),
            Some(b"[{}]".to_vec())
        );
    }

    #[test]
    fn missing_records_read_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = FileLedger::new(dir.path()).unwrap();
        assert!(ledger.get(LedgerKey::SireApproved).unwrap().is_none());
    }

    #[test]
    fn puts_overwrite_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = FileLedger::new(dir.path()).unwrap();
        ledger.put(LedgerKey::Owners, b"[\"\"]".to_vec()).unwrap();
        ledger
            .put(LedgerKey::Owners, b"[\"\",\"alice\"]".to_vec())
            .unwrap();
        assert_eq!(
            ledger.get(LedgerKey::Owners).unwrap(),
            Some(b"[\"\",\"alice\"]".to_vec())
        );
    }
}
