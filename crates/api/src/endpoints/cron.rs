//! Cron trigger endpoints.
//!
//! The maintenance jobs also run on the in-process scheduler; these
//! routes exist for deployments that prefer an external timer (platform
//! cron hitting the API on a cadence). Both jobs are idempotent, so
//! double-triggering is harmless.

use axum::{extract::State, routing::get, Router};
use chrono::Utc;
use lectureboard_common::AppResult;
use lectureboard_core::{AutoEndReport, AutoSummarizeReport};

use crate::{extractors::CronAuth, middleware::AppState, response::ApiResponse};

/// End overdue active lectures.
async fn check_lecture_end(
    _cron: CronAuth,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<AutoEndReport>> {
    let report = state.maintenance_service.run_auto_end(Utc::now()).await?;
    Ok(ApiResponse::ok(report))
}

/// Summarize lectures that have been ended long enough.
async fn summarize_lectures(
    _cron: CronAuth,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<AutoSummarizeReport>> {
    let report = state
        .maintenance_service
        .run_auto_summarize(Utc::now())
        .await?;
    Ok(ApiResponse::ok(report))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/check-lecture-end",
            get(check_lecture_end).post(check_lecture_end),
        )
        .route(
            "/summarize-lectures",
            get(summarize_lectures).post(summarize_lectures),
        )
}
