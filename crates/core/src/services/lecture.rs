//! Lecture service.
//!
//! Owns the lifecycle state machine. Status only moves forward
//! (scheduled → active → ended → summarized); every transition is issued
//! as a conditional update so concurrent triggers resolve to one winner.

use chrono::{DateTime, Utc};
use lectureboard_common::{AppError, AppResult, IdGenerator};
use lectureboard_db::{
    entities::{course, lecture},
    repositories::{CourseRepository, LectureRepository, PurgeOutcome, SummaryRepository},
};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::window;

/// Input for creating a lecture.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLectureInput {
    pub course_id: String,
    /// Session number within the course (1..=total_sessions).
    #[validate(range(min = 1))]
    pub session_number: i32,
    pub scheduled_start_time: Option<DateTime<Utc>>,
    pub scheduled_end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_rescheduled: bool,
}

/// Input for updating a lecture. Absent fields are left unchanged.
///
/// This is the admin edit path; unlike the transition operations it may
/// set any status directly (e.g. reopening an accidentally ended lecture).
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLectureInput {
    #[validate(range(min = 1))]
    pub session_number: Option<i32>,
    pub status: Option<lecture::Status>,
    pub scheduled_start_time: Option<DateTime<Utc>>,
    pub scheduled_end_time: Option<DateTime<Utc>>,
    pub is_rescheduled: Option<bool>,
}

/// Snapshot of a lecture's submission window at a point in time.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LectureOpenState {
    pub lecture_id: String,
    pub status: lecture::Status,
    pub is_open: bool,
    /// Minutes until the window closes; `None` for open-ended windows.
    pub remaining_minutes: Option<i64>,
    pub scheduled_end_time: Option<DateTime<Utc>>,
    pub grace_period_end_time: Option<DateTime<Utc>>,
}

/// How a summarized lecture got there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SummarizedVia {
    /// A summary row exists for the lecture.
    Summary,
    /// Raw data was purged without a summary being generated.
    Purge,
}

/// Lecture service for business logic.
#[derive(Clone)]
pub struct LectureService {
    lecture_repo: LectureRepository,
    course_repo: CourseRepository,
    summary_repo: SummaryRepository,
    id_gen: IdGenerator,
}

impl LectureService {
    /// Create a new lecture service.
    #[must_use]
    pub fn new(
        lecture_repo: LectureRepository,
        course_repo: CourseRepository,
        summary_repo: SummaryRepository,
    ) -> Self {
        Self {
            lecture_repo,
            course_repo,
            summary_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a lecture in `scheduled` status.
    ///
    /// The session number must fall within the course's session range; a
    /// duplicate `(course, session_number)` surfaces as `AlreadyExists`.
    pub async fn create(&self, input: CreateLectureInput) -> AppResult<lecture::Model> {
        input.validate()?;

        let course = self.course_repo.get_by_id(&input.course_id).await?;
        if input.session_number > course.total_sessions {
            return Err(AppError::Validation(format!(
                "session number {} exceeds course total of {}",
                input.session_number, course.total_sessions
            )));
        }

        let now = Utc::now();
        let model = lecture::ActiveModel {
            id: Set(self.id_gen.generate()),
            course_id: Set(input.course_id),
            session_number: Set(input.session_number),
            status: Set(lecture::Status::Scheduled),
            scheduled_start_time: Set(input.scheduled_start_time.map(Into::into)),
            scheduled_end_time: Set(input.scheduled_end_time.map(Into::into)),
            is_rescheduled: Set(input.is_rescheduled),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let created = self.lecture_repo.create(model).await?;
        tracing::info!(
            lecture_id = %created.id,
            course_id = %created.course_id,
            session = created.session_number,
            "Lecture created"
        );
        Ok(created)
    }

    /// Update a lecture (admin edit path).
    pub async fn update(&self, id: &str, input: UpdateLectureInput) -> AppResult<lecture::Model> {
        input.validate()?;

        let existing = self.lecture_repo.get_by_id(id).await?;
        let mut model: lecture::ActiveModel = existing.into();

        if let Some(session_number) = input.session_number {
            model.session_number = Set(session_number);
        }
        if let Some(status) = input.status {
            model.status = Set(status);
        }
        if let Some(start) = input.scheduled_start_time {
            model.scheduled_start_time = Set(Some(start.into()));
        }
        if let Some(end) = input.scheduled_end_time {
            model.scheduled_end_time = Set(Some(end.into()));
        }
        if let Some(is_rescheduled) = input.is_rescheduled {
            model.is_rescheduled = Set(is_rescheduled);
        }
        model.updated_at = Set(Utc::now().into());

        self.lecture_repo.update(model).await
    }

    /// Start a lecture (`scheduled` → `active`), opening the submission
    /// window.
    pub async fn start(&self, id: &str) -> AppResult<lecture::Model> {
        self.transition(id, lecture::Status::Scheduled, lecture::Status::Active)
            .await
    }

    /// End a lecture (`active` → `ended`).
    ///
    /// The grace period does not apply here: the window gate requires
    /// `active` status, so an explicit end closes submissions immediately.
    pub async fn end(&self, id: &str) -> AppResult<lecture::Model> {
        self.transition(id, lecture::Status::Active, lecture::Status::Ended)
            .await
    }

    async fn transition(
        &self,
        id: &str,
        from: lecture::Status,
        to: lecture::Status,
    ) -> AppResult<lecture::Model> {
        let moved = self.lecture_repo.transition(id, from, to).await?;
        let lecture = self.lecture_repo.get_by_id(id).await?;

        if !moved {
            return Err(AppError::InvalidTransition(format!(
                "lecture {id} is {:?}, not {from:?}",
                lecture.status
            )));
        }

        tracing::info!(lecture_id = %id, from = ?from, to = ?to, "Lecture transitioned");
        Ok(lecture)
    }

    /// Get a lecture by ID.
    pub async fn get(&self, id: &str) -> AppResult<lecture::Model> {
        self.lecture_repo.get_by_id(id).await
    }

    /// List lectures, optionally filtered by course and status.
    pub async fn list(
        &self,
        course_id: Option<&str>,
        status: Option<lecture::Status>,
    ) -> AppResult<Vec<lecture::Model>> {
        self.lecture_repo.list(course_id, status).await
    }

    /// List currently active lectures (the student landing view).
    pub async fn list_active(&self) -> AppResult<Vec<lecture::Model>> {
        self.lecture_repo
            .find_by_status(lecture::Status::Active)
            .await
    }

    /// Find a course by code together with its latest active lecture (the
    /// student search entry point).
    ///
    /// Codes are stored uppercased, so the lookup uppercases its input.
    pub async fn search_by_course_code(
        &self,
        code: &str,
    ) -> AppResult<(course::Model, lecture::Model)> {
        let code = code.trim().to_uppercase();
        if code.is_empty() {
            return Err(AppError::Validation("course code is required".to_string()));
        }

        let course = self
            .course_repo
            .find_by_code(&code)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Course not found: {code}")))?;

        let lecture = self
            .lecture_repo
            .find_latest_active_by_course(&course.id)
            .await?
            .ok_or_else(|| {
                AppError::LectureNotFound(format!("no active lecture for course {code}"))
            })?;

        Ok((course, lecture))
    }

    /// Delete a lecture and everything under it.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.lecture_repo.get_by_id(id).await?;
        self.lecture_repo.delete(id).await?;
        tracing::info!(lecture_id = %id, "Lecture deleted");
        Ok(())
    }

    /// Compute the submission window state at `now`.
    pub async fn open_state(&self, id: &str, now: DateTime<Utc>) -> AppResult<LectureOpenState> {
        let lecture = self.lecture_repo.get_by_id(id).await?;

        Ok(LectureOpenState {
            lecture_id: lecture.id.clone(),
            status: lecture.status,
            is_open: window::is_open(&lecture, now),
            remaining_minutes: window::remaining_minutes(&lecture, now),
            scheduled_end_time: lecture.scheduled_end_time.map(|t| t.with_timezone(&Utc)),
            grace_period_end_time: window::grace_period_end(&lecture),
        })
    }

    /// Physically delete a lecture's posts and likes and mark it
    /// `summarized`.
    ///
    /// Calling this on an already summarized lecture is a no-op (zero
    /// counts); any other non-`ended` status is refused.
    pub async fn purge_raw_data(&self, id: &str) -> AppResult<PurgeOutcome> {
        let lecture = self.lecture_repo.get_by_id(id).await?;

        match lecture.status {
            lecture::Status::Summarized => Ok(PurgeOutcome::default()),
            lecture::Status::Ended => {
                let outcome = self.lecture_repo.purge_raw_data(id).await?;
                tracing::info!(
                    lecture_id = %id,
                    deleted_posts = outcome.deleted_posts,
                    deleted_likes = outcome.deleted_likes,
                    "Raw data purged"
                );
                Ok(outcome)
            }
            other => Err(AppError::InvalidTransition(format!(
                "lecture {id} is {other:?}; only ended lectures can be purged"
            ))),
        }
    }

    /// How a lecture reached `summarized`, if it has.
    pub async fn summarized_via(&self, lecture: &lecture::Model) -> AppResult<Option<SummarizedVia>> {
        if lecture.status != lecture::Status::Summarized {
            return Ok(None);
        }

        let has_summary = self.summary_repo.exists(&lecture.id).await?;
        Ok(Some(if has_summary {
            SummarizedVia::Summary
        } else {
            SummarizedVia::Purge
        }))
    }
}
