//! JSON file store - the governance dataset as one pretty-printed document.

use crate::{GovernanceStore, StorageError};
use parking_lot::RwLock;
use std::fs;
use std::path::{Path, PathBuf};
use tourism_types::GovernanceDataset;

/// Default file name inside the data directory.
pub const DEFAULT_FILE_NAME: &str = "governance.json";

/// Simple JSON file-based storage.
///
/// Every `load` reads the file from disk and every `save` rewrites it, so the
/// file stays the single source of truth. The lock keeps readers from
/// observing a write in progress within this process.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl JsonFileStore {
    /// Open the store at `path`, seeding an empty dataset if the file is missing.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();

        if path.is_dir() {
            return Err(StorageError::InvalidPath(format!(
                "{} is a directory",
                path.display()
            )));
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let store = Self {
            path,
            lock: RwLock::new(()),
        };

        if !store.path.exists() {
            store.persist(&GovernanceDataset::new())?;
            tracing::info!(path = %store.path.display(), "Created empty governance dataset");
        }

        Ok(store)
    }

    /// Open `<dir>/governance.json`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        Self::open(dir.as_ref().join(DEFAULT_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, data: &GovernanceDataset) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(data)?;

        // Write next to the target and rename over it so the file is never half-written.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl GovernanceStore for JsonFileStore {
    fn load(&self) -> Result<GovernanceDataset, StorageError> {
        let _guard = self.lock.read();
        let content = fs::read_to_string(&self.path)?;
        let data = serde_json::from_str(&content)?;
        Ok(data)
    }

    fn save(&self, data: &GovernanceDataset) -> Result<(), StorageError> {
        let _guard = self.lock.write();
        self.persist(data)?;
        tracing::debug!(
            proposals = data.proposals.len(),
            votes = data.votes.len(),
            "Governance dataset persisted"
        );
        Ok(())
    }
}
