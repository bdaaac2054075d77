//! Governance proposals.
//!
//! Proposals go through states: Active -> Approved/Rejected.
//! `Expired` is part of the wire format but no transition produces it.

use crate::error::TypesError;
use crate::vote::VoteType;
use crate::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default voting window in days.
pub const DEFAULT_DURATION_DAYS: i64 = 30;

/// Default quorum threshold (percent of eligible voters).
pub const DEFAULT_QUORUM_PERCENTAGE: f64 = 50.0;

/// Proposal status in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    /// Open for voting
    Active,
    /// Finalized with a majority in favor
    Approved,
    /// Finalized without a majority in favor
    Rejected,
    /// Voting window elapsed
    Expired,
}

impl ProposalStatus {
    /// Check if voting is still possible.
    pub fn is_active(&self) -> bool {
        matches!(self, ProposalStatus::Active)
    }

    /// Check if the proposal has reached an outcome.
    pub fn is_terminal(&self) -> bool {
        !self.is_active()
    }

    /// Wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProposalStatus::Active => "active",
            ProposalStatus::Approved => "approved",
            ProposalStatus::Rejected => "rejected",
            ProposalStatus::Expired => "expired",
        }
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProposalStatus {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(ProposalStatus::Active),
            "approved" => Ok(ProposalStatus::Approved),
            "rejected" => Ok(ProposalStatus::Rejected),
            "expired" => Ok(ProposalStatus::Expired),
            other => Err(TypesError::UnknownStatus(other.to_string())),
        }
    }
}

fn default_duration_days() -> i64 {
    DEFAULT_DURATION_DAYS
}

fn default_quorum_percentage() -> f64 {
    DEFAULT_QUORUM_PERCENTAGE
}

/// Author-supplied fields for a new proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProposal {
    pub title: String,
    pub description: String,
    /// e.g. "funding", "policy", "infrastructure"
    pub category: String,
    #[serde(default = "default_duration_days")]
    pub duration_days: i64,
    #[serde(default = "default_quorum_percentage")]
    pub quorum_percentage: f64,
    pub creator_id: String,
    /// Accepted for compatibility; tallies always start at zero.
    #[serde(default)]
    pub initial_votes: u64,
}

impl NewProposal {
    /// Create a proposal input with default duration and quorum.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        creator_id: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            category: category.into(),
            duration_days: DEFAULT_DURATION_DAYS,
            quorum_percentage: DEFAULT_QUORUM_PERCENTAGE,
            creator_id: creator_id.into(),
            initial_votes: 0,
        }
    }

    /// Override the quorum threshold.
    pub fn with_quorum(mut self, quorum_percentage: f64) -> Self {
        self.quorum_percentage = quorum_percentage;
        self
    }

    /// Override the voting window.
    pub fn with_duration(mut self, duration_days: i64) -> Self {
        self.duration_days = duration_days;
        self
    }
}

/// A governance proposal as persisted and served.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    /// Unique proposal ID
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    /// Intended voting window; stored, not enforced
    pub duration_days: i64,
    /// Threshold (0-100) for `quorum_met`
    pub quorum_percentage: f64,
    /// Who created the proposal
    #[serde(default)]
    pub creator_id: String,
    /// Current status
    pub status: ProposalStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(default)]
    pub votes_for: u64,
    #[serde(default)]
    pub votes_against: u64,
    #[serde(default)]
    pub votes_abstain: u64,
    #[serde(default)]
    pub total_votes: u64,
    #[serde(default)]
    pub quorum_met: bool,
}

impl Proposal {
    /// Create a new active proposal with empty tallies.
    pub fn new(id: impl Into<String>, input: NewProposal, now: Timestamp) -> Self {
        Self {
            id: id.into(),
            title: input.title,
            description: input.description,
            category: input.category,
            duration_days: input.duration_days,
            quorum_percentage: input.quorum_percentage,
            creator_id: input.creator_id,
            status: ProposalStatus::Active,
            created_at: now,
            updated_at: now,
            votes_for: 0,
            votes_against: 0,
            votes_abstain: 0,
            total_votes: 0,
            quorum_met: false,
        }
    }

    /// Add one vote to the tallies.
    ///
    /// Callers must check `status` first; this only counts.
    pub fn tally(&mut self, vote_type: VoteType, now: Timestamp) {
        match vote_type {
            VoteType::For => self.votes_for += 1,
            VoteType::Against => self.votes_against += 1,
            VoteType::Abstain => self.votes_abstain += 1,
        }
        self.total_votes += 1;
        self.updated_at = now;
    }

    /// Check that `total_votes` matches the per-type counters.
    pub fn tallies_consistent(&self) -> bool {
        self.votes_for + self.votes_against + self.votes_abstain == self.total_votes
    }
}
