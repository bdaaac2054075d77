//! Votes cast on proposals.

use crate::error::TypesError;
use crate::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Vote support options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    /// Vote in favor
    For,
    /// Vote against
    Against,
    /// Abstain (counts toward quorum but not the majority)
    Abstain,
}

impl VoteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteType::For => "for",
            VoteType::Against => "against",
            VoteType::Abstain => "abstain",
        }
    }
}

impl fmt::Display for VoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoteType {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "for" => Ok(VoteType::For),
            "against" => Ok(VoteType::Against),
            "abstain" => Ok(VoteType::Abstain),
            other => Err(TypesError::UnknownVoteType(other.to_string())),
        }
    }
}

/// A request to cast a vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVote {
    pub proposal_id: String,
    pub voter_id: String,
    pub vote_type: VoteType,
}

impl NewVote {
    pub fn new(
        proposal_id: impl Into<String>,
        voter_id: impl Into<String>,
        vote_type: VoteType,
    ) -> Self {
        Self {
            proposal_id: proposal_id.into(),
            voter_id: voter_id.into(),
            vote_type,
        }
    }
}

/// A recorded vote. Never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub id: String,
    pub proposal_id: String,
    pub voter_id: String,
    pub vote_type: VoteType,
    pub created_at: Timestamp,
}

impl Vote {
    pub fn new(id: impl Into<String>, cast: NewVote, now: Timestamp) -> Self {
        Self {
            id: id.into(),
            proposal_id: cast.proposal_id,
            voter_id: cast.voter_id,
            vote_type: cast.vote_type,
            created_at: now,
        }
    }
}
