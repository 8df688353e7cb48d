//! Like endpoints.

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use lectureboard_common::AppResult;
use lectureboard_core::ToggleOutcome;
use serde::{Deserialize, Serialize};

use crate::{middleware::AppState, response::ApiResponse};

/// Toggle like request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleLikeRequest {
    pub post_id: String,
    /// Opaque per-browser token; toggle idempotence only, not identity.
    pub user_identifier: String,
}

/// Toggle a like on a post.
async fn toggle(
    State(state): State<AppState>,
    Json(req): Json<ToggleLikeRequest>,
) -> AppResult<ApiResponse<ToggleOutcome>> {
    let outcome = state
        .like_service
        .toggle(&req.post_id, &req.user_identifier)
        .await?;
    Ok(ApiResponse::ok(outcome))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LikedQuery {
    post_id: String,
    user_identifier: String,
}

#[derive(Debug, Serialize)]
struct LikedResponse {
    liked: bool,
}

/// Whether the identifier has liked a post.
async fn liked(
    State(state): State<AppState>,
    Query(query): Query<LikedQuery>,
) -> AppResult<ApiResponse<LikedResponse>> {
    let liked = state
        .like_service
        .liked(&query.post_id, &query.user_identifier)
        .await?;
    Ok(ApiResponse::ok(LikedResponse { liked }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(toggle).get(liked))
}
