use thiserror::Error;
use tourism_storage::StorageError;

/// Errors that can occur in governance operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GovernanceError {
    #[error("Proposal with ID {0} not found")]
    ProposalNotFound(String),

    #[error("{0}")]
    InvalidState(String),

    #[error("Voter {voter_id} has already voted on proposal {proposal_id}")]
    DuplicateVote {
        proposal_id: String,
        voter_id: String,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl GovernanceError {
    /// The error returned when voting on a proposal that is no longer active.
    pub fn not_active() -> Self {
        GovernanceError::InvalidState("Proposal is not active for voting".to_string())
    }
}
