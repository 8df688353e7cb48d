//! Summary repository.

use std::sync::Arc;

use crate::entities::{summary, Summary};
use lectureboard_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect,
};

/// Summary repository for database operations.
#[derive(Clone)]
pub struct SummaryRepository {
    db: Arc<DatabaseConnection>,
}

impl SummaryRepository {
    /// Create a new summary repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a lecture's summary.
    pub async fn find_by_lecture(&self, lecture_id: &str) -> AppResult<Option<summary::Model>> {
        Summary::find()
            .filter(summary::Column::LectureId.eq(lecture_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Check whether a lecture already has a summary.
    pub async fn exists(&self, lecture_id: &str) -> AppResult<bool> {
        Ok(self.find_by_lecture(lecture_id).await?.is_some())
    }

    /// Create a summary.
    ///
    /// One atomic insert; the unique `lecture_id` constraint rejects a
    /// racing duplicate, surfaced as `AlreadyExists`.
    pub async fn create(&self, model: summary::ActiveModel) -> AppResult<summary::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| super::map_insert_err(&e, "summary"))
    }

    /// Lecture IDs that already have a summary (auto-summarize exclusion).
    pub async fn summarized_lecture_ids(&self) -> AppResult<Vec<String>> {
        Summary::find()
            .select_only()
            .column(summary::Column::LectureId)
            .into_tuple::<String>()
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
