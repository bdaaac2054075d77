//! Request and response bodies that are not plain ledger records.

use serde::{Deserialize, Serialize};
use tourism_types::{NewVote, Timestamp, VoteType};

/// Body of `POST /proposals/:id/vote`.
///
/// `proposal_id` may be omitted; the path segment always takes precedence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastVoteRequest {
    #[serde(default)]
    pub proposal_id: Option<String>,
    pub voter_id: String,
    pub vote_type: VoteType,
}

impl CastVoteRequest {
    pub fn into_vote(self, proposal_id: String) -> NewVote {
        if let Some(body_id) = self.proposal_id.as_deref() {
            if body_id != proposal_id {
                tracing::debug!(path_id = %proposal_id, body_id, "Ignoring proposal_id in vote body");
            }
        }
        NewVote::new(proposal_id, self.voter_id, self.vote_type)
    }
}

/// Liveness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: Timestamp,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_id_wins() {
        let req: CastVoteRequest = serde_json::from_str(
            r#"{"proposal_id": "9", "voter_id": "v-1", "vote_type": "against"}"#,
        )
        .unwrap();
        let vote = req.into_vote("2".to_string());
        assert_eq!(vote.proposal_id, "2");
        assert_eq!(vote.voter_id, "v-1");
        assert_eq!(vote.vote_type, VoteType::Against);
    }

    #[test]
    fn test_body_without_proposal_id() {
        let req: CastVoteRequest =
            serde_json::from_str(r#"{"voter_id": "v-1", "vote_type": "abstain"}"#).unwrap();
        assert!(req.proposal_id.is_none());
    }

    #[test]
    fn test_unknown_vote_type_rejected() {
        let res: Result<CastVoteRequest, _> =
            serde_json::from_str(r#"{"voter_id": "v-1", "vote_type": "maybe"}"#);
        assert!(res.is_err());
    }
}
