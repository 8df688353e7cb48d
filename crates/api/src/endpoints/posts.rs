//! Post endpoints.

use axum::{
    extract::{Path, Query, State},
    routing::{delete as del, get, post},
    Json, Router,
};
use chrono::Utc;
use lectureboard_common::AppResult;
use lectureboard_db::{entities::post, repositories::PostOrder};
use serde::{Deserialize, Serialize};

use crate::{extractors::AdminAuth, middleware::AppState, response::ApiResponse};

/// Create post request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub lecture_id: String,
    pub content: String,
}

/// Post response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub lecture_id: String,
    pub content: String,
    pub like_count: i32,
    pub created_at: String,
}

impl From<post::Model> for PostResponse {
    fn from(p: post::Model) -> Self {
        Self {
            id: p.id,
            lecture_id: p.lecture_id,
            content: p.content,
            like_count: p.like_count,
            created_at: p.created_at.to_rfc3339(),
        }
    }
}

/// Create an anonymous post.
async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreatePostRequest>,
) -> AppResult<ApiResponse<PostResponse>> {
    let created = state
        .post_service
        .create(&req.lecture_id, &req.content, Utc::now())
        .await?;
    Ok(ApiResponse::ok(created.into()))
}

/// Post sort order.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Sort {
    #[default]
    Newest,
    Popular,
}

impl From<Sort> for PostOrder {
    fn from(sort: Sort) -> Self {
        match sort {
            Sort::Newest => Self::Newest,
            Sort::Popular => Self::Popular,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    #[serde(default)]
    sort: Sort,
}

/// Get a lecture's posts.
async fn list(
    State(state): State<AppState>,
    Path(lecture_id): Path<String>,
    Query(query): Query<ListQuery>,
) -> AppResult<ApiResponse<Vec<PostResponse>>> {
    let posts = state.post_service.list(&lecture_id, query.sort.into()).await?;
    Ok(ApiResponse::ok(posts.into_iter().map(Into::into).collect()))
}

/// Soft-delete a post (moderation).
async fn delete(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    state.post_service.delete(&id).await?;
    Ok(ApiResponse::ok(()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create))
        .route("/{lecture_id}", get(list))
}

pub fn admin_router() -> Router<AppState> {
    Router::new().route("/{id}", del(delete))
}
