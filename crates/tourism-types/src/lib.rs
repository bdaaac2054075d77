//! Tourism Types - Core type definitions for the governance ledger.
//!
//! This crate provides the records shared by the store, the ledger and the API:
//! - Proposals and their lifecycle status
//! - Votes and vote types
//! - The persisted governance dataset
//! - The aggregate governance summary

pub mod proposal;
pub mod vote;
pub mod dataset;
pub mod error;

pub use proposal::{NewProposal, Proposal, ProposalStatus};
pub use vote::{NewVote, Vote, VoteType};
pub use dataset::{GovernanceDataset, GovernanceSummary};
pub use error::TypesError;

/// Timestamp type used for every record.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        GovernanceDataset, GovernanceSummary, NewProposal, NewVote, Proposal,
        ProposalStatus, Timestamp, TypesError, Vote, VoteType,
    };
}
