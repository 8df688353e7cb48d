//! Like repository.

use std::sync::Arc;

use crate::entities::{like, post, Like, Post};
use lectureboard_common::{AppError, AppResult};
use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
};

/// Like repository for database operations.
#[derive(Clone)]
pub struct LikeRepository {
    db: Arc<DatabaseConnection>,
}

impl LikeRepository {
    /// Create a new like repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a like by post and user identifier.
    pub async fn find_by_post_and_identifier(
        &self,
        post_id: &str,
        user_identifier: &str,
    ) -> AppResult<Option<like::Model>> {
        Like::find()
            .filter(like::Column::PostId.eq(post_id))
            .filter(like::Column::UserIdentifier.eq(user_identifier))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Check if an identifier has liked a post.
    pub async fn has_liked(&self, post_id: &str, user_identifier: &str) -> AppResult<bool> {
        Ok(self
            .find_by_post_and_identifier(post_id, user_identifier)
            .await?
            .is_some())
    }

    /// Create a new like.
    ///
    /// A concurrent duplicate insert trips the `(post_id, user_identifier)`
    /// uniqueness constraint and surfaces as `AlreadyExists`; the toggle
    /// reinterprets that as "the like is there".
    pub async fn create(&self, model: like::ActiveModel) -> AppResult<like::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| super::map_insert_err(&e, "like"))
    }

    /// Delete a like.
    ///
    /// Returns whether a row was actually removed. A concurrent toggle may
    /// have deleted it first; the caller must skip the counter decrement
    /// in that case.
    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        let result = Like::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected > 0)
    }

    /// Count likes across all of a lecture's non-deleted posts (the
    /// summary's `total_likes_count` snapshot).
    pub async fn count_by_lecture(&self, lecture_id: &str) -> AppResult<u64> {
        Like::find()
            .filter(
                like::Column::PostId.in_subquery(
                    Query::select()
                        .column(post::Column::Id)
                        .from(Post)
                        .and_where(post::Column::LectureId.eq(lecture_id))
                        .and_where(post::Column::DeletedAt.is_null())
                        .to_owned(),
                ),
            )
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn create_test_like(id: &str, post_id: &str, user_identifier: &str) -> like::Model {
        like::Model {
            id: id.to_string(),
            post_id: post_id.to_string(),
            user_identifier: user_identifier.to_string(),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_by_post_and_identifier_found() {
        let like = create_test_like("l1", "p1", "browser-abc");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[like]])
                .into_connection(),
        );

        let repo = LikeRepository::new(db);
        let result = repo
            .find_by_post_and_identifier("p1", "browser-abc")
            .await
            .unwrap();

        assert!(result.is_some());
    }

    #[tokio::test]
    async fn test_has_liked_false() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<like::Model>::new()])
                .into_connection(),
        );

        let repo = LikeRepository::new(db);
        let result = repo.has_liked("p1", "browser-abc").await.unwrap();

        assert!(!result);
    }

    #[tokio::test]
    async fn test_delete_removes_row() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = LikeRepository::new(db);
        assert!(repo.delete("l1").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_reports_already_gone_row() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                }])
                .into_connection(),
        );

        let repo = LikeRepository::new(db);
        assert!(!repo.delete("l1").await.unwrap());
    }

    #[tokio::test]
    async fn test_count_by_lecture() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[maplit_count(3)]])
                .into_connection(),
        );

        let repo = LikeRepository::new(db);
        let count = repo.count_by_lecture("lec1").await.unwrap();

        assert_eq!(count, 3);
    }

    fn maplit_count(n: i64) -> std::collections::BTreeMap<&'static str, sea_orm::Value> {
        let mut row = std::collections::BTreeMap::new();
        row.insert("num_items", sea_orm::Value::BigInt(Some(n)));
        row
    }
}
