//! Tourism Storage - Persistence for the governance dataset.
//!
//! The ledger only ever reads the whole dataset and writes the whole dataset
//! back, so a store exposes exactly those two operations.

pub mod error;
pub mod json_store;
pub mod memory_store;

pub use error::StorageError;
pub use json_store::JsonFileStore;
pub use memory_store::MemoryStore;

use std::sync::Arc;
use tourism_types::GovernanceDataset;

/// Durable home of the governance dataset.
pub trait GovernanceStore: Send + Sync {
    /// Read the entire dataset.
    fn load(&self) -> Result<GovernanceDataset, StorageError>;

    /// Replace the entire dataset.
    fn save(&self, data: &GovernanceDataset) -> Result<(), StorageError>;
}

impl<S: GovernanceStore + ?Sized> GovernanceStore for Arc<S> {
    fn load(&self) -> Result<GovernanceDataset, StorageError> {
        (**self).load()
    }

    fn save(&self, data: &GovernanceDataset) -> Result<(), StorageError> {
        (**self).save(data)
    }
}

impl<S: GovernanceStore + ?Sized> GovernanceStore for Box<S> {
    fn load(&self) -> Result<GovernanceDataset, StorageError> {
        (**self).load()
    }

    fn save(&self, data: &GovernanceDataset) -> Result<(), StorageError> {
        (**self).save(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tourism_types::{NewProposal, Proposal};

    #[test]
    fn test_shared_store_sees_writes() {
        let store: Arc<dyn GovernanceStore> = Arc::new(MemoryStore::new());
        let other = store.clone();

        let mut data = store.load().unwrap();
        data.proposals.push(Proposal::new(
            data.next_proposal_id(),
            NewProposal::new("Ropeway", "Ropeway survey", "infrastructure", "u-1"),
            chrono::Utc::now(),
        ));
        store.save(&data).unwrap();

        assert_eq!(other.load().unwrap().proposals.len(), 1);
    }

    #[test]
    fn test_boxed_store() {
        let store: Box<dyn GovernanceStore> = Box::new(MemoryStore::new());
        assert!(store.load().unwrap().proposals.is_empty());
    }
}
