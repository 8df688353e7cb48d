//! Lecture repository.
//!
//! Status transitions are issued as conditional updates
//! (`UPDATE ... WHERE id = ? AND status = ?`) so that concurrent triggers
//! (admin action racing the auto-end job, overlapping batch runs) resolve to
//! exactly one winner; the loser observes zero affected rows.

use std::sync::Arc;

use crate::entities::{lecture, like, post, Lecture, Like, Post};
use lectureboard_common::{AppError, AppResult};
use sea_orm::sea_query::{Expr, Query};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};

/// Counts reported by a raw-data purge.
#[derive(Debug, Clone, Copy, Default)]
pub struct PurgeOutcome {
    /// Number of physically deleted posts.
    pub deleted_posts: u64,
    /// Number of physically deleted likes.
    pub deleted_likes: u64,
}

/// Lecture repository for database operations.
#[derive(Clone)]
pub struct LectureRepository {
    db: Arc<DatabaseConnection>,
}

impl LectureRepository {
    /// Create a new lecture repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a lecture by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<lecture::Model>> {
        Lecture::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a lecture by ID, failing if absent.
    pub async fn get_by_id(&self, id: &str) -> AppResult<lecture::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::LectureNotFound(id.to_string()))
    }

    /// List lectures, optionally filtered by course and status.
    pub async fn list(
        &self,
        course_id: Option<&str>,
        status: Option<lecture::Status>,
    ) -> AppResult<Vec<lecture::Model>> {
        let mut query = Lecture::find().order_by_desc(lecture::Column::CreatedAt);

        if let Some(course_id) = course_id {
            query = query.filter(lecture::Column::CourseId.eq(course_id));
        }
        if let Some(status) = status {
            query = query.filter(lecture::Column::Status.eq(status));
        }

        query
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a course's latest active lecture (highest session number).
    pub async fn find_latest_active_by_course(
        &self,
        course_id: &str,
    ) -> AppResult<Option<lecture::Model>> {
        Lecture::find()
            .filter(lecture::Column::CourseId.eq(course_id))
            .filter(lecture::Column::Status.eq(lecture::Status::Active))
            .order_by_desc(lecture::Column::SessionNumber)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find all lectures in a given status (the maintenance jobs' scan).
    pub async fn find_by_status(&self, status: lecture::Status) -> AppResult<Vec<lecture::Model>> {
        Lecture::find()
            .filter(lecture::Column::Status.eq(status))
            .order_by_asc(lecture::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new lecture.
    ///
    /// A duplicate `(course_id, session_number)` surfaces as `AlreadyExists`.
    pub async fn create(&self, model: lecture::ActiveModel) -> AppResult<lecture::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| super::map_insert_err(&e, "session number"))
    }

    /// Update a lecture (admin edit path).
    pub async fn update(&self, model: lecture::ActiveModel) -> AppResult<lecture::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Conditionally move a lecture from `from` to `to`.
    ///
    /// Returns `true` if this call performed the transition, `false` if the
    /// lecture was not in `from` (already transitioned, or never there).
    pub async fn transition(
        &self,
        id: &str,
        from: lecture::Status,
        to: lecture::Status,
    ) -> AppResult<bool> {
        let result = Lecture::update_many()
            .col_expr(lecture::Column::Status, Expr::value(to))
            .col_expr(lecture::Column::UpdatedAt, Expr::current_timestamp().into())
            .filter(lecture::Column::Id.eq(id))
            .filter(lecture::Column::Status.eq(from))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }

    /// Delete a lecture (cascades to posts, likes, summary).
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let lecture = self.find_by_id(id).await?;
        if let Some(l) = lecture {
            l.delete(self.db.as_ref())
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
        }
        Ok(())
    }

    /// Physically delete a lecture's likes and posts and move it from
    /// `ended` to `summarized`, all in one transaction.
    ///
    /// Likes go first (they hang off posts), then posts, then the status.
    /// The conditional status update arbitrates races: if the lecture left
    /// `ended` underneath us the transaction rolls back and nothing is lost.
    pub async fn purge_raw_data(&self, id: &str) -> AppResult<PurgeOutcome> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let deleted_likes = Like::delete_many()
            .filter(
                like::Column::PostId.in_subquery(
                    Query::select()
                        .column(post::Column::Id)
                        .from(Post)
                        .and_where(post::Column::LectureId.eq(id))
                        .to_owned(),
                ),
            )
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .rows_affected;

        let deleted_posts = Post::delete_many()
            .filter(post::Column::LectureId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .rows_affected;

        let transitioned = Lecture::update_many()
            .col_expr(
                lecture::Column::Status,
                Expr::value(lecture::Status::Summarized),
            )
            .col_expr(lecture::Column::UpdatedAt, Expr::current_timestamp().into())
            .filter(lecture::Column::Id.eq(id))
            .filter(lecture::Column::Status.eq(lecture::Status::Ended))
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .rows_affected;

        if transitioned == 0 {
            // Lost the race; dropping the transaction rolls the deletes back.
            return Err(AppError::InvalidTransition(format!(
                "lecture {id} is no longer ended"
            )));
        }

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(PurgeOutcome {
            deleted_posts,
            deleted_likes,
        })
    }
}
