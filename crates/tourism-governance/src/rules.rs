//! Quorum and majority rules.
//!
//! Quorum is measured against a fixed eligible-voter count, not a registry of
//! actual voters. Approval is a simple majority of `for` over `against`;
//! abstentions count toward quorum only.

use serde::{Deserialize, Serialize};
use tourism_types::{Proposal, ProposalStatus};

/// Eligible-voter denominator used when none is configured.
pub const DEFAULT_ELIGIBLE_VOTERS: u64 = 100;

/// Rules applied by the ledger when counting and finalizing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VotingRules {
    /// Fixed denominator for quorum and turnout
    pub eligible_voters: u64,
    /// Reject proposals at finalization unless `quorum_met`
    pub quorum_gates_approval: bool,
    /// Reject a second vote by the same voter on the same proposal
    pub one_vote_per_voter: bool,
}

impl Default for VotingRules {
    fn default() -> Self {
        Self {
            eligible_voters: DEFAULT_ELIGIBLE_VOTERS,
            quorum_gates_approval: false,
            one_vote_per_voter: false,
        }
    }
}

impl VotingRules {
    /// Rules where quorum must be met for approval.
    pub fn quorum_gated() -> Self {
        Self {
            quorum_gates_approval: true,
            ..Self::default()
        }
    }

    /// Quorum-gated rules that also allow one vote per voter per proposal.
    pub fn strict() -> Self {
        Self {
            quorum_gates_approval: true,
            one_vote_per_voter: true,
            ..Self::default()
        }
    }

    /// Whether `total_votes` meets `quorum_percentage` of the eligible voters.
    ///
    /// Cross-multiplied so integer thresholds are exact: with 100 eligible
    /// voters and a 29% quorum, 29 votes are enough.
    pub fn quorum_reached(&self, total_votes: u64, quorum_percentage: f64) -> bool {
        if self.eligible_voters == 0 {
            return false;
        }
        total_votes as f64 * 100.0 >= quorum_percentage * self.eligible_voters as f64
    }

    /// Participation as a percentage of eligible voters, rounded to two decimals.
    pub fn turnout(&self, total_votes: u64) -> f64 {
        if self.eligible_voters == 0 {
            return 0.0;
        }
        let pct = total_votes as f64 / self.eligible_voters as f64 * 100.0;
        (pct * 100.0).round() / 100.0
    }

    /// Outcome of finalizing `proposal` under these rules. Ties reject.
    pub fn decide(&self, proposal: &Proposal) -> ProposalStatus {
        if self.quorum_gates_approval && !proposal.quorum_met {
            return ProposalStatus::Rejected;
        }
        if proposal.votes_for > proposal.votes_against {
            ProposalStatus::Approved
        } else {
            ProposalStatus::Rejected
        }
    }
}
