//! Maintenance jobs.
//!
//! Two stateless batch jobs, safe to re-run and to overlap: every
//! per-lecture transition is a conditional update, so a concurrent run
//! (or an admin racing the job) degrades to a no-op, never a double
//! transition. They are invoked by the interval scheduler and by the
//! cron HTTP endpoints; neither entry point holds any state between runs.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use lectureboard_common::{AppError, AppResult};
use lectureboard_db::{
    entities::lecture,
    repositories::{LectureRepository, SummaryRepository},
};
use serde::Serialize;

use super::summary::SummaryService;

/// Hours a lecture must have been ended before auto-summarize picks it up.
pub const SUMMARIZE_DELAY_HOURS: i64 = 1;

/// Outcome of one auto-end run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoEndReport {
    pub checked_at: DateTime<Utc>,
    /// Active lectures scanned.
    pub active_count: usize,
    /// Lectures this run transitioned to `ended`.
    pub processed_count: usize,
}

/// Per-lecture outcome within an auto-summarize run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LectureJobResult {
    pub lecture_id: String,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Outcome of one auto-summarize run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoSummarizeReport {
    pub checked_at: DateTime<Utc>,
    /// Ended lectures scanned.
    pub ended_count: usize,
    /// Lectures that were due for summarization this run.
    pub processed_count: usize,
    pub success_count: usize,
    pub error_count: usize,
    pub results: Vec<LectureJobResult>,
}

/// Maintenance job runner.
#[derive(Clone)]
pub struct MaintenanceService {
    lecture_repo: LectureRepository,
    summary_repo: SummaryRepository,
    summary_service: SummaryService,
}

impl MaintenanceService {
    /// Create a new maintenance service.
    #[must_use]
    pub fn new(
        lecture_repo: LectureRepository,
        summary_repo: SummaryRepository,
        summary_service: SummaryService,
    ) -> Self {
        Self {
            lecture_repo,
            summary_repo,
            summary_service,
        }
    }

    /// End every active lecture whose scheduled end time has passed.
    ///
    /// Lectures without an end time are never auto-ended.
    pub async fn run_auto_end(&self, now: DateTime<Utc>) -> AppResult<AutoEndReport> {
        let active = self
            .lecture_repo
            .find_by_status(lecture::Status::Active)
            .await?;
        let active_count = active.len();

        let mut processed_count = 0;
        for l in active {
            let Some(end) = l.scheduled_end_time else {
                continue;
            };
            if now < end.with_timezone(&Utc) {
                continue;
            }

            match self
                .lecture_repo
                .transition(&l.id, lecture::Status::Active, lecture::Status::Ended)
                .await
            {
                Ok(true) => {
                    processed_count += 1;
                    tracing::info!(lecture_id = %l.id, "Lecture auto-ended");
                }
                // Someone else ended it between the scan and the update.
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!(lecture_id = %l.id, error = %e, "Auto-end failed");
                }
            }
        }

        Ok(AutoEndReport {
            checked_at: now,
            active_count,
            processed_count,
        })
    }

    /// Summarize every ended lecture whose end time is at least
    /// [`SUMMARIZE_DELAY_HOURS`] in the past and that has no summary yet.
    ///
    /// One lecture's failure never aborts the run; per-lecture outcomes
    /// are collected into the report and the failing lecture stays
    /// `ended` for retry on the next run.
    pub async fn run_auto_summarize(&self, now: DateTime<Utc>) -> AppResult<AutoSummarizeReport> {
        let ended = self
            .lecture_repo
            .find_by_status(lecture::Status::Ended)
            .await?;
        let ended_count = ended.len();

        let summarized: HashSet<String> = self
            .summary_repo
            .summarized_lecture_ids()
            .await?
            .into_iter()
            .collect();

        let delay = Duration::hours(SUMMARIZE_DELAY_HOURS);
        let due: Vec<lecture::Model> = ended
            .into_iter()
            .filter(|l| !summarized.contains(&l.id))
            .filter(|l| {
                // Nominal end time, falling back to the moment the lecture
                // actually transitioned when no end time was scheduled.
                let end = l
                    .scheduled_end_time
                    .unwrap_or(l.updated_at)
                    .with_timezone(&Utc);
                now.signed_duration_since(end) >= delay
            })
            .collect();

        let mut results = Vec::with_capacity(due.len());
        for l in &due {
            let result = match self.summary_service.summarize(&l.id).await {
                Ok(summary) => LectureJobResult {
                    lecture_id: l.id.clone(),
                    status: "success",
                    summary_id: Some(summary.id),
                    error: None,
                },
                // A concurrent run got there first; the summary exists,
                // which is all this job is after.
                Err(AppError::AlreadyExists(_)) => LectureJobResult {
                    lecture_id: l.id.clone(),
                    status: "success",
                    summary_id: None,
                    error: None,
                },
                Err(e) => {
                    tracing::warn!(lecture_id = %l.id, error = %e, "Auto-summarize failed");
                    LectureJobResult {
                        lecture_id: l.id.clone(),
                        status: "error",
                        summary_id: None,
                        error: Some(e.to_string()),
                    }
                }
            };
            results.push(result);
        }

        let success_count = results.iter().filter(|r| r.status == "success").count();
        let error_count = results.len() - success_count;

        Ok(AutoSummarizeReport {
            checked_at: now,
            ended_count,
            processed_count: due.len(),
            success_count,
            error_count,
            results,
        })
    }
}
