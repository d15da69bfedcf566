//! Router assembly: HTTP endpoints, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;

/// Build the application router with:
/// - REST-ish API under `/api/v1/...`
/// - CORS (allow any origin/method/headers) – adjust for production if needed
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health
        .route("/health", get(http::http_health))
        // Problem catalog
        .route("/api/v1/problems", get(http::http_list_problems))
        .route("/api/v1/problems/generate", get(http::http_generate_problem))
        .route("/api/v1/problems/:problem_id", get(http::http_get_problem))
        .route(
            "/api/v1/problems/difficulty/:difficulty",
            get(http::http_problems_by_difficulty),
        )
        .route("/api/v1/problems/:problem_id/hints", get(http::http_problem_hints))
        // Verification
        .route(
            "/api/v1/solutions/verify/:problem_id",
            post(http::http_verify_solution),
        )
        // Interactive design sessions
        .route("/api/v1/design/submit", post(http::http_submit_design))
        .route(
            "/api/v1/design/:design_id/feedback",
            post(http::http_design_feedback),
        )
        // Study assistant
        .route("/api/v1/assistant/ask", post(http::http_assistant_ask))
        .route("/api/v1/assistant/status", get(http::http_assistant_status))
        // State + CORS + HTTP tracing
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}
