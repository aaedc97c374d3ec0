//! HTTP handlers for the engine API
//!
//! Each handler translates between the wire and the engine's structured
//! request/response types, then maps engine errors onto HTTP statuses.

use crate::api::server::ApiState;
use crate::error::RankingError;
use crate::types::{CommentRequest, RatingRequest, VoteRequest};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, warn};

/// Query parameters carrying an optional category filter
#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    pub category: Option<String>,
    pub search: Option<String>,
}

/// Query parameters for paginated leaderboard views
#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    pub category: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// Root endpoint handler - shows service information
pub async fn root_handler() -> impl IntoResponse {
    let info = json!({
        "service": "podium",
        "version": crate::VERSION,
        "endpoints": [
            "/health",
            "/metrics",
            "/api/stats",
            "/api/categories",
            "/api/companies",
            "/api/vote/matchup",
            "/api/leaderboard"
        ]
    });

    Json(info)
}

/// Health check endpoint handler
pub async fn health_handler(State(state): State<ApiState>) -> Response {
    match state.engine.get_stats() {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "store": "connected",
                "version": crate::VERSION
            })),
        )
            .into_response(),
        Err(e) => {
            error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unhealthy",
                    "store": "disconnected"
                })),
            )
                .into_response()
        }
    }
}

/// Prometheus metrics endpoint handler
pub async fn metrics_handler(State(state): State<ApiState>) -> Response {
    match state.metrics.gather() {
        Ok(body) => (StatusCode::OK, body).into_response(),
        Err(e) => {
            error!("Failed to gather metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to gather metrics",
            )
                .into_response()
        }
    }
}

/// Platform stats
pub async fn stats_handler(State(state): State<ApiState>) -> Response {
    respond(state.engine.get_stats(), StatusCode::OK)
}

/// Distinct categories with member counts
pub async fn categories_handler(State(state): State<ApiState>) -> Response {
    respond(state.engine.list_categories(), StatusCode::OK)
}

/// Full company listing with optional filtering
pub async fn list_companies_handler(
    State(state): State<ApiState>,
    Query(query): Query<CategoryQuery>,
) -> Response {
    respond(
        state
            .engine
            .list_companies(query.category.as_deref(), query.search.as_deref()),
        StatusCode::OK,
    )
}

/// Single company by slug
pub async fn company_handler(
    State(state): State<ApiState>,
    Path(slug): Path<String>,
) -> Response {
    respond(state.engine.get_company(&slug), StatusCode::OK)
}

/// Aggregated criterion ratings for a company
pub async fn company_ratings_handler(
    State(state): State<ApiState>,
    Path(slug): Path<String>,
) -> Response {
    respond(state.engine.get_company_ratings(&slug), StatusCode::OK)
}

/// Comments for a company, most recent first
pub async fn company_comments_handler(
    State(state): State<ApiState>,
    Path(slug): Path<String>,
) -> Response {
    respond(state.engine.get_company_comments(&slug), StatusCode::OK)
}

/// Random matchup pair
pub async fn matchup_handler(
    State(state): State<ApiState>,
    Query(query): Query<CategoryQuery>,
) -> Response {
    respond(
        state.engine.get_matchup(query.category.as_deref()),
        StatusCode::OK,
    )
}

/// Submit a vote
pub async fn vote_handler(
    State(state): State<ApiState>,
    Json(request): Json<VoteRequest>,
) -> Response {
    respond(state.engine.submit_vote(request), StatusCode::OK)
}

/// Company leaderboard page
pub async fn leaderboard_handler(
    State(state): State<ApiState>,
    Query(query): Query<LeaderboardQuery>,
) -> Response {
    respond(
        state.engine.get_leaderboard(
            query.category.as_deref(),
            query.page.unwrap_or(0),
            query.page_size.unwrap_or(0),
        ),
        StatusCode::OK,
    )
}

/// Voter leaderboard page
pub async fn user_leaderboard_handler(
    State(state): State<ApiState>,
    Query(query): Query<LeaderboardQuery>,
) -> Response {
    respond(
        state
            .engine
            .get_user_leaderboard(query.page.unwrap_or(0), query.page_size.unwrap_or(0)),
        StatusCode::OK,
    )
}

/// Submit a criterion rating
pub async fn rating_handler(
    State(state): State<ApiState>,
    Json(request): Json<RatingRequest>,
) -> Response {
    respond(state.engine.submit_rating(request), StatusCode::CREATED)
}

/// Submit a comment
pub async fn comment_handler(
    State(state): State<ApiState>,
    Json(request): Json<CommentRequest>,
) -> Response {
    respond(state.engine.submit_comment(request), StatusCode::CREATED)
}

/// Upvote a comment
pub async fn upvote_comment_handler(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Response {
    respond(state.engine.upvote_comment(id), StatusCode::OK)
}

/// Serialize a successful engine result, or map its error to a status code
fn respond<T: serde::Serialize>(
    result: crate::error::Result<T>,
    success_status: StatusCode,
) -> Response {
    match result {
        Ok(value) => (success_status, Json(value)).into_response(),
        Err(err) => error_response(err),
    }
}

/// Map an engine error onto an HTTP status with a JSON error body
fn error_response(err: anyhow::Error) -> Response {
    let status = match err.downcast_ref::<RankingError>() {
        Some(RankingError::CompanyNotFound { .. })
        | Some(RankingError::CommentNotFound { .. })
        | Some(RankingError::InsufficientCompanies { .. }) => StatusCode::NOT_FOUND,
        Some(RankingError::InvalidArgument { .. }) => StatusCode::BAD_REQUEST,
        Some(RankingError::Conflict { .. }) => StatusCode::CONFLICT,
        Some(RankingError::Unavailable { .. }) => StatusCode::SERVICE_UNAVAILABLE,
        Some(RankingError::ConfigurationError { .. }) | None => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        error!("Request failed: {}", err);
    } else {
        warn!("Request rejected: {}", err);
    }

    (status, Json(json!({ "error": err.to_string() }))).into_response()
}
