//! Tourism Governance - Proposal voting for the tourism platform.
//!
//! This crate provides:
//! - The governance ledger (create, vote, finalize, summarize)
//! - Quorum and majority rules
//! - The governance error taxonomy

pub mod error;
pub mod ledger;
pub mod rules;

pub use error::GovernanceError;
pub use ledger::GovernanceLedger;
pub use rules::{VotingRules, DEFAULT_ELIGIBLE_VOTERS};

pub use tourism_types::{
    GovernanceDataset, GovernanceSummary, NewProposal, NewVote, Proposal, ProposalStatus, Vote,
    VoteType,
};
