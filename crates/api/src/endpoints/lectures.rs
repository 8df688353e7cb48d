//! Lecture endpoints.
//!
//! Public routes serve the student board (course-code search, active
//! lectures, window state, summaries); the admin router carries the
//! lifecycle and purge actions.

use axum::{
    extract::{Path, Query, State},
    routing::{delete as del, get, post},
    Json, Router,
};
use chrono::Utc;
use lectureboard_common::AppResult;
use lectureboard_core::{CreateLectureInput, LectureOpenState, SummarizedVia, UpdateLectureInput};
use lectureboard_db::entities::{lecture, summary};
use serde::{Deserialize, Serialize};

use crate::{extractors::AdminAuth, middleware::AppState, response::ApiResponse};

/// Lecture response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LectureResponse {
    pub id: String,
    pub course_id: String,
    pub session_number: i32,
    pub status: lecture::Status,
    pub scheduled_start_time: Option<String>,
    pub scheduled_end_time: Option<String>,
    pub is_rescheduled: bool,
    pub created_at: String,
    pub updated_at: String,
    /// How the lecture reached `summarized`, when it has.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summarized_via: Option<SummarizedVia>,
}

impl From<lecture::Model> for LectureResponse {
    fn from(l: lecture::Model) -> Self {
        Self {
            id: l.id,
            course_id: l.course_id,
            session_number: l.session_number,
            status: l.status,
            scheduled_start_time: l.scheduled_start_time.map(|t| t.to_rfc3339()),
            scheduled_end_time: l.scheduled_end_time.map(|t| t.to_rfc3339()),
            is_rescheduled: l.is_rescheduled,
            created_at: l.created_at.to_rfc3339(),
            updated_at: l.updated_at.to_rfc3339(),
            summarized_via: None,
        }
    }
}

/// Summary response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub id: String,
    pub lecture_id: String,
    pub summary_text: String,
    pub total_posts_count: i32,
    pub total_likes_count: i32,
    pub created_at: String,
}

impl From<summary::Model> for SummaryResponse {
    fn from(s: summary::Model) -> Self {
        Self {
            id: s.id,
            lecture_id: s.lecture_id,
            summary_text: s.summary_text,
            total_posts_count: s.total_posts_count,
            total_likes_count: s.total_likes_count,
            created_at: s.created_at.to_rfc3339(),
        }
    }
}

/// Search query.
#[derive(Debug, Deserialize)]
struct SearchQuery {
    code: String,
}

/// Course fields returned alongside a search hit.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CourseSummary {
    id: String,
    code: String,
    title: String,
}

/// Search response: the course plus its latest active lecture.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    course: CourseSummary,
    lecture: LectureResponse,
}

/// Find a course's latest active lecture by course code.
async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<ApiResponse<SearchResponse>> {
    let (course, lecture) = state
        .lecture_service
        .search_by_course_code(&query.code)
        .await?;

    Ok(ApiResponse::ok(SearchResponse {
        course: CourseSummary {
            id: course.id,
            code: course.code,
            title: course.title,
        },
        lecture: lecture.into(),
    }))
}

/// List currently active lectures.
async fn list_active(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<LectureResponse>>> {
    let lectures = state.lecture_service.list_active().await?;
    Ok(ApiResponse::ok(
        lectures.into_iter().map(Into::into).collect(),
    ))
}

/// Get one lecture, annotated with how it was summarized (if it was).
async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<LectureResponse>> {
    let lecture = state.lecture_service.get(&id).await?;
    let summarized_via = state.lecture_service.summarized_via(&lecture).await?;

    let mut response = LectureResponse::from(lecture);
    response.summarized_via = summarized_via;
    Ok(ApiResponse::ok(response))
}

/// Get a lecture's submission window state.
async fn open_state(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<LectureOpenState>> {
    let open_state = state.lecture_service.open_state(&id, Utc::now()).await?;
    Ok(ApiResponse::ok(open_state))
}

/// Get a lecture's summary.
async fn get_summary(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<SummaryResponse>> {
    let summary = state.summary_service.get(&id).await?;
    Ok(ApiResponse::ok(summary.into()))
}

/// Lecture list filter.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListQuery {
    course_id: Option<String>,
    status: Option<lecture::Status>,
}

/// List lectures (admin view).
async fn list(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<ApiResponse<Vec<LectureResponse>>> {
    let lectures = state
        .lecture_service
        .list(query.course_id.as_deref(), query.status)
        .await?;
    Ok(ApiResponse::ok(
        lectures.into_iter().map(Into::into).collect(),
    ))
}

/// Create a lecture.
async fn create(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Json(input): Json<CreateLectureInput>,
) -> AppResult<ApiResponse<LectureResponse>> {
    let lecture = state.lecture_service.create(input).await?;
    Ok(ApiResponse::ok(lecture.into()))
}

/// Update a lecture.
async fn update(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateLectureInput>,
) -> AppResult<ApiResponse<LectureResponse>> {
    let lecture = state.lecture_service.update(&id, input).await?;
    Ok(ApiResponse::ok(lecture.into()))
}

/// Delete a lecture.
async fn delete(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    state.lecture_service.delete(&id).await?;
    Ok(ApiResponse::ok(()))
}

/// Start a lecture, opening the submission window.
async fn start(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<LectureResponse>> {
    let lecture = state.lecture_service.start(&id).await?;
    Ok(ApiResponse::ok(lecture.into()))
}

/// End a lecture.
async fn end(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<LectureResponse>> {
    let lecture = state.lecture_service.end(&id).await?;
    Ok(ApiResponse::ok(lecture.into()))
}

/// Summarize an ended lecture now (without waiting for the job).
async fn summarize(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<SummaryResponse>> {
    let summary = state.summary_service.summarize(&id).await?;
    Ok(ApiResponse::ok(summary.into()))
}

/// Purge counts response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PurgeResponse {
    deleted_posts_count: u64,
    deleted_likes_count: u64,
}

/// Purge a lecture's raw posts and likes.
async fn purge(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<PurgeResponse>> {
    let outcome = state.lecture_service.purge_raw_data(&id).await?;
    Ok(ApiResponse::ok(PurgeResponse {
        deleted_posts_count: outcome.deleted_posts,
        deleted_likes_count: outcome.deleted_likes,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/active", get(list_active))
        .route("/search", get(search))
        .route("/{id}", get(get_one))
        .route("/{id}/status", get(open_state))
        .route("/{id}/summary", get(get_summary))
}

pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(get_one).put(update).delete(delete))
        .route("/{id}/start", post(start))
        .route("/{id}/end", post(end))
        .route("/{id}/summarize", post(summarize))
        .route("/{id}/data", del(purge))
}
