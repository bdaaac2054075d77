//! In-memory governance store.

use crate::{GovernanceStore, StorageError};
use parking_lot::RwLock;
use tourism_types::GovernanceDataset;

/// Store that keeps the dataset in process memory. Contents are lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<GovernanceDataset>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing dataset.
    pub fn with_data(data: GovernanceDataset) -> Self {
        Self {
            data: RwLock::new(data),
        }
    }
}

impl GovernanceStore for MemoryStore {
    fn load(&self) -> Result<GovernanceDataset, StorageError> {
        Ok(self.data.read().clone())
    }

    fn save(&self, data: &GovernanceDataset) -> Result<(), StorageError> {
        *self.data.write() = data.clone();
        Ok(())
    }
}
