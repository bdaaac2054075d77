//! Integration tests for the tourism governance ledger
//!
//! End-to-end tests that verify the store, ledger and API work together.

#[cfg(test)]
mod e2e_tests {
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tempfile::TempDir;
    use tourism_api::{create_router, AppState, Metrics, DEFAULT_MAX_BODY_SIZE};
    use tourism_governance::{
        GovernanceError, GovernanceLedger, NewProposal, NewVote, ProposalStatus, VoteType,
        VotingRules,
    };
    use tourism_storage::{GovernanceStore, JsonFileStore, StorageError};
    use tower::ServiceExt;

    /// Setup test environment with a fresh JSON dataset
    fn setup_test_env(rules: VotingRules) -> (TempDir, GovernanceLedger<JsonFileStore>) {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::in_dir(temp_dir.path()).unwrap();
        (temp_dir, GovernanceLedger::with_rules(store, rules))
    }

    fn router_over(dir: &TempDir) -> axum::Router {
        let store: Box<dyn GovernanceStore> = Box::new(JsonFileStore::in_dir(dir.path()).unwrap());
        let state = AppState::new(GovernanceLedger::new(store), Metrics::new().unwrap());
        create_router(state, DEFAULT_MAX_BODY_SIZE)
    }

    async fn call(app: &axum::Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[test]
    fn test_end_to_end_proposal_lifecycle() {
        let (temp, ledger) = setup_test_env(VotingRules::default());

        let proposal = ledger
            .create_proposal(NewProposal::new(
                "Hundru Falls walkway",
                "Fund a safer walkway to the falls",
                "infrastructure",
                "official-9",
            ))
            .unwrap();

        for i in 0..6 {
            ledger
                .vote_on_proposal(NewVote::new(&proposal.id, format!("resident-{i}"), VoteType::For))
                .unwrap();
        }
        for i in 0..4 {
            ledger
                .vote_on_proposal(NewVote::new(&proposal.id, format!("guide-{i}"), VoteType::Against))
                .unwrap();
        }

        let finalized = ledger.finalize_proposal(&proposal.id).unwrap();
        assert_eq!(finalized.status, ProposalStatus::Approved);
        assert_eq!(finalized.total_votes, 10);

        // A fresh ledger over the same file sees everything.
        let reopened = GovernanceLedger::new(JsonFileStore::in_dir(temp.path()).unwrap());
        let summary = reopened.governance_summary().unwrap();
        assert_eq!(summary.total_proposals, 1);
        assert_eq!(summary.active_proposals, 0);
        assert_eq!(summary.voter_turnout, 10.0);
        assert_eq!(reopened.list_votes(&proposal.id).unwrap().len(), 10);

        let err = reopened
            .vote_on_proposal(NewVote::new(&proposal.id, "late", VoteType::For))
            .unwrap_err();
        assert_eq!(err, GovernanceError::not_active());
    }

    #[test]
    fn test_quorum_gated_lifecycle() {
        let (_temp, ledger) = setup_test_env(VotingRules::quorum_gated());

        let low = ledger
            .create_proposal(NewProposal::new("Night market", "Weekend stalls in Ranchi", "events", "u-1"))
            .unwrap();
        let met = ledger
            .create_proposal(
                NewProposal::new("Trail signage", "Bilingual signs at Parasnath", "infrastructure", "u-2")
                    .with_quorum(3.0),
            )
            .unwrap();

        for proposal in [&low, &met] {
            for voter in ["a", "b"] {
                ledger
                    .vote_on_proposal(NewVote::new(&proposal.id, voter, VoteType::For))
                    .unwrap();
            }
            ledger
                .vote_on_proposal(NewVote::new(&proposal.id, "c", VoteType::Against))
                .unwrap();
        }

        assert_eq!(ledger.finalize_proposal(&low.id).unwrap().status, ProposalStatus::Rejected);
        assert_eq!(ledger.finalize_proposal(&met.id).unwrap().status, ProposalStatus::Approved);
    }

    #[test]
    fn test_concurrent_votes_on_file_store() {
        let (_temp, ledger) = setup_test_env(VotingRules::default());
        let ledger = Arc::new(ledger);
        let id = ledger
            .create_proposal(NewProposal::new("t", "d", "policy", "c"))
            .unwrap()
            .id;

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let ledger = ledger.clone();
                let id = id.clone();
                std::thread::spawn(move || {
                    for i in 0..10 {
                        ledger
                            .vote_on_proposal(NewVote::new(&id, format!("{t}-{i}"), VoteType::Abstain))
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let proposal = ledger.get_proposal(&id).unwrap();
        assert_eq!(proposal.total_votes, 40);
        assert_eq!(proposal.votes_abstain, 40);
        assert_eq!(ledger.list_votes(&id).unwrap().len(), 40);
    }

    #[test]
    fn test_corrupt_file_surfaces_storage_error() {
        let (temp, ledger) = setup_test_env(VotingRules::default());
        std::fs::write(temp.path().join("governance.json"), "not json").unwrap();

        let err = ledger.list_proposals().unwrap_err();
        assert!(matches!(err, GovernanceError::Storage(StorageError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_http_flow_over_file_store() {
        let temp = TempDir::new().unwrap();
        let app = router_over(&temp);

        let (status, created) = call(
            &app,
            Method::POST,
            "/api/governance/proposals",
            Some(json!({
                "title": "Sarhul festival budget",
                "description": "Allocate funds for the spring festival",
                "category": "culture",
                "creator_id": "council-2",
                "quorum_percentage": 2.0,
                "initial_votes": 99,
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["total_votes"], 0);
        assert_eq!(created["status"], "active");

        for (voter, vote_type) in [("x", "for"), ("y", "against"), ("z", "for")] {
            let (status, vote) = call(
                &app,
                Method::POST,
                "/api/governance/proposals/1/vote",
                Some(json!({ "voter_id": voter, "vote_type": vote_type })),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(vote["proposal_id"], "1");
        }

        let (_, proposal) = call(&app, Method::GET, "/api/governance/proposals/1", None).await;
        assert_eq!(proposal["quorum_met"], true);

        let (status, finalized) =
            call(&app, Method::POST, "/api/governance/proposals/1/finalize", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(finalized["status"], "approved");

        // Data outlives the router.
        let app = router_over(&temp);
        let (_, summary) = call(&app, Method::GET, "/api/governance", None).await;
        assert_eq!(summary["total_proposals"], 1);
        assert_eq!(summary["active_proposals"], 0);
        assert_eq!(summary["voter_turnout"], 3.0);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_generic_500() {
        let temp = TempDir::new().unwrap();
        let app = router_over(&temp);
        std::fs::write(temp.path().join("governance.json"), "{ broken").unwrap();

        let (status, body) = call(&app, Method::GET, "/api/governance/proposals", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "INTERNAL_ERROR");
        assert!(!body["message"].as_str().unwrap().contains("broken"));
    }
}
