//! The persisted governance dataset and the aggregate summary.

use crate::proposal::{Proposal, ProposalStatus};
use crate::vote::Vote;
use serde::{Deserialize, Serialize};

/// Everything the governance ledger persists, read and written as one unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GovernanceDataset {
    #[serde(default)]
    pub proposals: Vec<Proposal>,
    #[serde(default)]
    pub votes: Vec<Vote>,
}

impl GovernanceDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next sequential proposal ID.
    pub fn next_proposal_id(&self) -> String {
        (self.proposals.len() + 1).to_string()
    }

    /// Next sequential vote ID.
    pub fn next_vote_id(&self) -> String {
        (self.votes.len() + 1).to_string()
    }

    pub fn proposal(&self, id: &str) -> Option<&Proposal> {
        self.proposals.iter().find(|p| p.id == id)
    }

    pub fn proposal_mut(&mut self, id: &str) -> Option<&mut Proposal> {
        self.proposals.iter_mut().find(|p| p.id == id)
    }

    /// Votes for one proposal, in cast order.
    pub fn votes_for_proposal<'a>(&'a self, proposal_id: &'a str) -> impl Iterator<Item = &'a Vote> + 'a {
        self.votes.iter().filter(move |v| v.proposal_id == proposal_id)
    }

    /// Count proposals in a given status.
    pub fn count_by_status(&self, status: ProposalStatus) -> usize {
        self.proposals.iter().filter(|p| p.status == status).count()
    }

    /// Sum of `total_votes` across all proposals.
    pub fn total_votes(&self) -> u64 {
        self.proposals.iter().map(|p| p.total_votes).sum()
    }
}

/// Overall governance data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GovernanceSummary {
    pub proposals: Vec<Proposal>,
    pub total_proposals: usize,
    pub active_proposals: usize,
    /// Percent of eligible voters, two decimals
    pub voter_turnout: f64,
}
