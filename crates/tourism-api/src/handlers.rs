//! Request handlers.
//!
//! The ledger does synchronous file I/O, so every call is moved onto the
//! blocking pool.

use crate::dto::{CastVoteRequest, HealthResponse};
use crate::error::{ApiError, ApiResult};
use crate::state::{AppState, Ledger};
use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use tourism_governance::GovernanceError;
use tourism_types::{GovernanceSummary, NewProposal, Proposal, Vote};

async fn with_ledger<T, F>(state: &AppState, f: F) -> ApiResult<T>
where
    F: FnOnce(&Ledger) -> Result<T, GovernanceError> + Send + 'static,
    T: Send + 'static,
{
    let ledger = state.ledger.clone();
    let result = tokio::task::spawn_blocking(move || f(&ledger)).await?;
    Ok(result?)
}

/// `GET /api/governance`
pub async fn governance_summary(State(state): State<AppState>) -> ApiResult<Json<GovernanceSummary>> {
    let summary = with_ledger(&state, |ledger| ledger.governance_summary()).await?;
    Ok(Json(summary))
}

/// `GET /api/governance/proposals`
pub async fn list_proposals(State(state): State<AppState>) -> ApiResult<Json<Vec<Proposal>>> {
    let proposals = with_ledger(&state, |ledger| ledger.list_proposals()).await?;
    Ok(Json(proposals))
}

/// `POST /api/governance/proposals`
pub async fn create_proposal(
    State(state): State<AppState>,
    Json(input): Json<NewProposal>,
) -> ApiResult<Json<Proposal>> {
    let proposal = with_ledger(&state, move |ledger| ledger.create_proposal(input)).await?;
    state.metrics.proposals_created.inc();
    Ok(Json(proposal))
}

/// `GET /api/governance/proposals/:id`
pub async fn get_proposal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Proposal>> {
    let proposal = with_ledger(&state, move |ledger| ledger.get_proposal(&id)).await?;
    Ok(Json(proposal))
}

/// `POST /api/governance/proposals/:id/vote`
pub async fn vote_on_proposal(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<CastVoteRequest>,
) -> ApiResult<Json<Vote>> {
    let cast = body.into_vote(id);
    let vote = with_ledger(&state, move |ledger| ledger.vote_on_proposal(cast)).await?;
    state.metrics.votes_cast.inc();
    Ok(Json(vote))
}

/// `GET /api/governance/proposals/:id/votes`
pub async fn list_votes(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<Vote>>> {
    let votes = with_ledger(&state, move |ledger| ledger.list_votes(&id)).await?;
    Ok(Json(votes))
}

/// `POST /api/governance/proposals/:id/finalize`
pub async fn finalize_proposal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Proposal>> {
    let proposal = with_ledger(&state, move |ledger| ledger.finalize_proposal(&id)).await?;
    state.metrics.proposals_finalized.inc();
    Ok(Json(proposal))
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// `GET /metrics`
pub async fn metrics(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let output = state
        .metrics
        .export()
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], output))
}
