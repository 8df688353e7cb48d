//! Course service.

use chrono::NaiveDate;
use lectureboard_common::{AppResult, IdGenerator};
use lectureboard_db::{entities::course, repositories::CourseRepository};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Input for creating a course.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseInput {
    /// Unique human-facing course code (e.g., "CS101").
    #[validate(length(min = 1, max = 32))]
    pub code: String,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    /// Number of sessions the course runs for.
    #[validate(range(min = 1, max = 50))]
    pub total_sessions: i32,
    /// Weekly meeting day (0 = Sunday .. 6 = Saturday).
    #[validate(range(min = 0, max = 6))]
    pub regular_day_of_week: Option<i16>,
    pub regular_start_time: Option<String>,
    pub regular_end_time: Option<String>,
    pub first_session_date: Option<NaiveDate>,
}

/// Input for updating a course. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseInput {
    #[validate(length(min = 1, max = 32))]
    pub code: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(range(min = 1, max = 50))]
    pub total_sessions: Option<i32>,
    #[validate(range(min = 0, max = 6))]
    pub regular_day_of_week: Option<i16>,
    pub regular_start_time: Option<String>,
    pub regular_end_time: Option<String>,
    pub first_session_date: Option<NaiveDate>,
}

/// Course service for business logic.
#[derive(Clone)]
pub struct CourseService {
    course_repo: CourseRepository,
    id_gen: IdGenerator,
}

impl CourseService {
    /// Create a new course service.
    #[must_use]
    pub fn new(course_repo: CourseRepository) -> Self {
        Self {
            course_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a course.
    ///
    /// A duplicate code surfaces as `AlreadyExists`.
    pub async fn create(&self, input: CreateCourseInput) -> AppResult<course::Model> {
        input.validate()?;

        let now = chrono::Utc::now();
        let model = course::ActiveModel {
            id: Set(self.id_gen.generate()),
            code: Set(input.code),
            title: Set(input.title),
            total_sessions: Set(input.total_sessions),
            regular_day_of_week: Set(input.regular_day_of_week),
            regular_start_time: Set(input.regular_start_time),
            regular_end_time: Set(input.regular_end_time),
            first_session_date: Set(input.first_session_date),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let created = self.course_repo.create(model).await?;
        tracing::info!(course_id = %created.id, code = %created.code, "Course created");
        Ok(created)
    }

    /// Update a course.
    pub async fn update(&self, id: &str, input: UpdateCourseInput) -> AppResult<course::Model> {
        input.validate()?;

        let existing = self.course_repo.get_by_id(id).await?;
        let mut model: course::ActiveModel = existing.into();

        if let Some(code) = input.code {
            model.code = Set(code);
        }
        if let Some(title) = input.title {
            model.title = Set(title);
        }
        if let Some(total_sessions) = input.total_sessions {
            model.total_sessions = Set(total_sessions);
        }
        if let Some(day) = input.regular_day_of_week {
            model.regular_day_of_week = Set(Some(day));
        }
        if let Some(start) = input.regular_start_time {
            model.regular_start_time = Set(Some(start));
        }
        if let Some(end) = input.regular_end_time {
            model.regular_end_time = Set(Some(end));
        }
        if let Some(date) = input.first_session_date {
            model.first_session_date = Set(Some(date));
        }
        model.updated_at = Set(chrono::Utc::now().into());

        self.course_repo.update(model).await
    }

    /// Get a course by ID.
    pub async fn get(&self, id: &str) -> AppResult<course::Model> {
        self.course_repo.get_by_id(id).await
    }

    /// List all courses.
    pub async fn list(&self) -> AppResult<Vec<course::Model>> {
        self.course_repo.list().await
    }

    /// Delete a course and everything under it.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        // Verify existence so the caller gets a 404 rather than silence.
        self.course_repo.get_by_id(id).await?;
        self.course_repo.delete(id).await?;
        tracing::info!(course_id = %id, "Course deleted");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use lectureboard_common::AppError;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn valid_input() -> CreateCourseInput {
        CreateCourseInput {
            code: "CS101".to_string(),
            title: "Intro to Systems".to_string(),
            total_sessions: 15,
            regular_day_of_week: Some(2),
            regular_start_time: Some("10:30".to_string()),
            regular_end_time: Some("12:00".to_string()),
            first_session_date: None,
        }
    }

    #[tokio::test]
    async fn test_create_rejects_empty_code() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = CourseService::new(CourseRepository::new(db));

        let mut input = valid_input();
        input.code = String::new();

        let result = service.create(input).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_day_of_week_out_of_range() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = CourseService::new(CourseRepository::new(db));

        let mut input = valid_input();
        input.regular_day_of_week = Some(7);

        let result = service.create(input).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<course::Model>::new()])
                .into_connection(),
        );
        let service = CourseService::new(CourseRepository::new(db));

        let result = service
            .update("nonexistent", UpdateCourseInput::default())
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<course::Model>::new()])
                .into_connection(),
        );
        let service = CourseService::new(CourseRepository::new(db));

        let result = service.delete("nonexistent").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
