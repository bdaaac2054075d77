//! Router construction and request middleware.

use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::{DefaultBodyLimit, Request, State},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use std::time::Instant;
use tower_http::trace::TraceLayer;

/// Request body limit used when none is configured (1 MiB).
pub const DEFAULT_MAX_BODY_SIZE: usize = 1024 * 1024;

/// Build the full application router.
pub fn create_router(state: AppState, max_body_size: usize) -> Router {
    let governance = Router::new()
        .route("/", get(handlers::governance_summary))
        .route(
            "/proposals",
            get(handlers::list_proposals).post(handlers::create_proposal),
        )
        .route("/proposals/:id", get(handlers::get_proposal))
        .route("/proposals/:id/vote", post(handlers::vote_on_proposal))
        .route("/proposals/:id/votes", get(handlers::list_votes))
        .route("/proposals/:id/finalize", post(handlers::finalize_proposal));

    Router::new()
        .nest("/api/governance", governance)
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .layer(middleware::from_fn_with_state(state.clone(), track_metrics))
        .layer(DefaultBodyLimit::max(max_body_size))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn track_metrics(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let start = Instant::now();

    let response = next.run(req).await;

    state
        .metrics
        .record_request(method.as_str(), response.status().as_u16(), start.elapsed());
    response
}
