//! Course repository.

use std::sync::Arc;

use crate::entities::{course, Course};
use lectureboard_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder,
};

/// Course repository for database operations.
#[derive(Clone)]
pub struct CourseRepository {
    db: Arc<DatabaseConnection>,
}

impl CourseRepository {
    /// Create a new course repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a course by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<course::Model>> {
        Course::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a course by ID, failing if absent.
    pub async fn get_by_id(&self, id: &str) -> AppResult<course::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Course not found: {id}")))
    }

    /// Find a course by its human-facing code (the student search entry).
    pub async fn find_by_code(&self, code: &str) -> AppResult<Option<course::Model>> {
        Course::find()
            .filter(course::Column::Code.eq(code))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List all courses ordered by code.
    pub async fn list(&self) -> AppResult<Vec<course::Model>> {
        Course::find()
            .order_by_asc(course::Column::Code)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new course.
    ///
    /// A duplicate code surfaces as `AlreadyExists`.
    pub async fn create(&self, model: course::ActiveModel) -> AppResult<course::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| super::map_insert_err(&e, "course code"))
    }

    /// Update a course.
    pub async fn update(&self, model: course::ActiveModel) -> AppResult<course::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| super::map_insert_err(&e, "course code"))
    }

    /// Delete a course (cascades to lectures, posts, likes, summaries).
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let course = self.find_by_id(id).await?;
        if let Some(c) = course {
            c.delete(self.db.as_ref())
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_course(id: &str, code: &str) -> course::Model {
        course::Model {
            id: id.to_string(),
            code: code.to_string(),
            title: "Intro to Systems".to_string(),
            total_sessions: 15,
            regular_day_of_week: Some(2),
            regular_start_time: Some("10:30".to_string()),
            regular_end_time: Some("12:00".to_string()),
            first_session_date: None,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_by_id_found() {
        let course = create_test_course("c1", "CS101");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[course.clone()]])
                .into_connection(),
        );

        let repo = CourseRepository::new(db);
        let result = repo.find_by_id("c1").await.unwrap();

        assert!(result.is_some());
        assert_eq!(result.unwrap().code, "CS101");
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<course::Model>::new()])
                .into_connection(),
        );

        let repo = CourseRepository::new(db);
        let result = repo.get_by_id("nonexistent").await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_find_by_code_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<course::Model>::new()])
                .into_connection(),
        );

        let repo = CourseRepository::new(db);
        let result = repo.find_by_code("NOPE").await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_list() {
        let c1 = create_test_course("c1", "CS101");
        let c2 = create_test_course("c2", "CS201");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[c1, c2]])
                .into_connection(),
        );

        let repo = CourseRepository::new(db);
        let result = repo.list().await.unwrap();

        assert_eq!(result.len(), 2);
    }
}
