//! Like service.
//!
//! The toggle is idempotent per `(post, user_identifier)`: liking twice
//! converges to the liked state, unliking twice to the unliked state. A
//! racing duplicate insert trips the uniqueness constraint and is
//! reinterpreted as "the like is there", without touching the counter a
//! second time. The unlike side mirrors this: the counter is decremented
//! only when this toggle's delete removed the row.

use lectureboard_common::{AppError, AppResult, IdGenerator};
use lectureboard_db::{
    entities::like,
    repositories::{LikeRepository, PostRepository},
};
use sea_orm::Set;
use serde::Serialize;

/// Result of a like toggle.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ToggleOutcome {
    /// Whether the identifier holds a like on the post after the toggle.
    pub liked: bool,
}

/// Like service for business logic.
#[derive(Clone)]
pub struct LikeService {
    like_repo: LikeRepository,
    post_repo: PostRepository,
    id_gen: IdGenerator,
}

impl LikeService {
    /// Create a new like service.
    #[must_use]
    pub fn new(like_repo: LikeRepository, post_repo: PostRepository) -> Self {
        Self {
            like_repo,
            post_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Toggle the identifier's like on a post.
    pub async fn toggle(&self, post_id: &str, user_identifier: &str) -> AppResult<ToggleOutcome> {
        // Soft-deleted posts are not found, so likes on them are refused.
        self.post_repo.get_by_id(post_id).await?;

        if let Some(existing) = self
            .like_repo
            .find_by_post_and_identifier(post_id, user_identifier)
            .await?
        {
            // Only the toggle that actually removed the row decrements; a
            // racing unlike that won the delete already adjusted the counter.
            if self.like_repo.delete(&existing.id).await? {
                self.post_repo.decrement_like_count(post_id).await?;
            }
            return Ok(ToggleOutcome { liked: false });
        }

        let model = like::ActiveModel {
            id: Set(self.id_gen.generate()),
            post_id: Set(post_id.to_string()),
            user_identifier: Set(user_identifier.to_string()),
            created_at: Set(chrono::Utc::now().into()),
        };

        match self.like_repo.create(model).await {
            Ok(_) => {
                self.post_repo.increment_like_count(post_id).await?;
                Ok(ToggleOutcome { liked: true })
            }
            // Lost a race against an identical toggle; the like exists and
            // the winner already incremented the counter.
            Err(AppError::AlreadyExists(_)) => Ok(ToggleOutcome { liked: true }),
            Err(e) => Err(e),
        }
    }

    /// Whether the identifier has liked a post.
    pub async fn liked(&self, post_id: &str, user_identifier: &str) -> AppResult<bool> {
        self.like_repo.has_liked(post_id, user_identifier).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use lectureboard_db::entities::post;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn test_post(id: &str, like_count: i32) -> post::Model {
        post::Model {
            id: id.to_string(),
            lecture_id: "lec1".to_string(),
            content: "Can you repeat the last slide?".to_string(),
            like_count,
            created_at: Utc::now().into(),
            deleted_at: None,
        }
    }

    fn test_like(id: &str, post_id: &str, user_identifier: &str) -> like::Model {
        like::Model {
            id: id.to_string(),
            post_id: post_id.to_string(),
            user_identifier: user_identifier.to_string(),
            created_at: Utc::now().into(),
        }
    }

    fn exec_ok() -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }
    }

    #[tokio::test]
    async fn test_toggle_unknown_post() {
        let like_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let post_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<post::Model>::new()])
                .into_connection(),
        );

        let service = LikeService::new(LikeRepository::new(like_db), PostRepository::new(post_db));

        let result = service.toggle("nope", "browser-abc").await;
        assert!(matches!(result, Err(AppError::PostNotFound(_))));
    }

    #[tokio::test]
    async fn test_toggle_adds_like_when_absent() {
        let created = test_like("l1", "p1", "browser-abc");
        let like_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                // No existing like, then the insert returning the new row.
                .append_query_results([Vec::<like::Model>::new()])
                .append_query_results([[created]])
                .into_connection(),
        );
        let post_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_post("p1", 0)]])
                .append_exec_results([exec_ok()])
                .into_connection(),
        );

        let service = LikeService::new(LikeRepository::new(like_db), PostRepository::new(post_db));

        let outcome = service.toggle("p1", "browser-abc").await.unwrap();
        assert!(outcome.liked);
    }

    #[tokio::test]
    async fn test_toggle_removes_like_when_present() {
        let existing = test_like("l1", "p1", "browser-abc");
        let like_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                // Lookup for the toggle, then the single-statement delete.
                .append_query_results([[existing]])
                .append_exec_results([exec_ok()])
                .into_connection(),
        );
        let post_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_post("p1", 1)]])
                .append_exec_results([exec_ok()])
                .into_connection(),
        );

        let service = LikeService::new(LikeRepository::new(like_db), PostRepository::new(post_db));

        let outcome = service.toggle("p1", "browser-abc").await.unwrap();
        assert!(!outcome.liked);
    }

    #[tokio::test]
    async fn test_toggle_skips_decrement_when_delete_lost_race() {
        let existing = test_like("l1", "p1", "browser-abc");
        let like_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                // The lookup still sees the like, but a concurrent unlike
                // deletes it before this toggle's delete lands.
                .append_query_results([[existing]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                }])
                .into_connection(),
        );
        let post_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_post("p1", 1)]])
                .into_connection(),
        );

        let service = LikeService::new(
            LikeRepository::new(like_db),
            PostRepository::new(Arc::clone(&post_db)),
        );

        let outcome = service.toggle("p1", "browser-abc").await.unwrap();
        assert!(!outcome.liked);

        // The winner already decremented; only the post lookup may hit the
        // database on this side, never a second decrement.
        drop(service);
        let log = Arc::try_unwrap(post_db).unwrap().into_transaction_log();
        assert_eq!(log.len(), 1);
    }

    #[tokio::test]
    async fn test_liked_false_when_no_like() {
        let like_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<like::Model>::new()])
                .into_connection(),
        );
        let post_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = LikeService::new(LikeRepository::new(like_db), PostRepository::new(post_db));

        assert!(!service.liked("p1", "browser-abc").await.unwrap());
    }
}
