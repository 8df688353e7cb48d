//! Course admin endpoints.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use lectureboard_common::AppResult;
use lectureboard_core::{CreateCourseInput, UpdateCourseInput};
use lectureboard_db::entities::course;
use serde::Serialize;

use crate::{extractors::AdminAuth, middleware::AppState, response::ApiResponse};

/// Course response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub id: String,
    pub code: String,
    pub title: String,
    pub total_sessions: i32,
    pub regular_day_of_week: Option<i16>,
    pub regular_start_time: Option<String>,
    pub regular_end_time: Option<String>,
    pub first_session_date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<course::Model> for CourseResponse {
    fn from(c: course::Model) -> Self {
        Self {
            id: c.id,
            code: c.code,
            title: c.title,
            total_sessions: c.total_sessions,
            regular_day_of_week: c.regular_day_of_week,
            regular_start_time: c.regular_start_time,
            regular_end_time: c.regular_end_time,
            first_session_date: c.first_session_date.map(|d| d.to_string()),
            created_at: c.created_at.to_rfc3339(),
            updated_at: c.updated_at.to_rfc3339(),
        }
    }
}

/// List all courses.
async fn list(
    _admin: AdminAuth,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<CourseResponse>>> {
    let courses = state.course_service.list().await?;
    Ok(ApiResponse::ok(courses.into_iter().map(Into::into).collect()))
}

/// Create a course.
async fn create(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Json(input): Json<CreateCourseInput>,
) -> AppResult<ApiResponse<CourseResponse>> {
    let course = state.course_service.create(input).await?;
    Ok(ApiResponse::ok(course.into()))
}

/// Get a course.
async fn get_one(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<CourseResponse>> {
    let course = state.course_service.get(&id).await?;
    Ok(ApiResponse::ok(course.into()))
}

/// Update a course.
async fn update(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateCourseInput>,
) -> AppResult<ApiResponse<CourseResponse>> {
    let course = state.course_service.update(&id, input).await?;
    Ok(ApiResponse::ok(course.into()))
}

/// Delete a course.
async fn delete(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    state.course_service.delete(&id).await?;
    Ok(ApiResponse::ok(()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(get_one).put(update).delete(delete))
}
