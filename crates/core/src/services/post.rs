//! Post service.
//!
//! Posting runs through the submission window gate: content is accepted
//! only while the lecture is `active` and inside the grace period. The
//! gate is re-checked here on every write so a stale client view cannot
//! slip a post past a closed window.

use chrono::{DateTime, Utc};
use lectureboard_common::{AppError, AppResult, IdGenerator};
use lectureboard_db::{
    entities::post,
    repositories::{LectureRepository, PostOrder, PostRepository},
};
use sea_orm::Set;

use super::window;

/// Maximum post body length in characters, after trimming.
pub const MAX_CONTENT_CHARS: usize = 200;

/// Post service for business logic.
#[derive(Clone)]
pub struct PostService {
    post_repo: PostRepository,
    lecture_repo: LectureRepository,
    id_gen: IdGenerator,
}

impl PostService {
    /// Create a new post service.
    #[must_use]
    pub fn new(post_repo: PostRepository, lecture_repo: LectureRepository) -> Self {
        Self {
            post_repo,
            lecture_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create an anonymous post against a lecture.
    ///
    /// Content is trimmed; empty or over-long bodies are rejected before
    /// the lecture is even looked up. A closed window surfaces as
    /// `WindowClosed` and nothing is written.
    pub async fn create(
        &self,
        lecture_id: &str,
        content: &str,
        now: DateTime<Utc>,
    ) -> AppResult<post::Model> {
        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::Validation("post content is empty".to_string()));
        }
        if content.chars().count() > MAX_CONTENT_CHARS {
            return Err(AppError::Validation(format!(
                "post content exceeds {MAX_CONTENT_CHARS} characters"
            )));
        }

        let lecture = self.lecture_repo.get_by_id(lecture_id).await?;
        if !window::is_open(&lecture, now) {
            return Err(AppError::WindowClosed(lecture_id.to_string()));
        }

        let model = post::ActiveModel {
            id: Set(self.id_gen.generate()),
            lecture_id: Set(lecture_id.to_string()),
            content: Set(content.to_string()),
            like_count: Set(0),
            created_at: Set(now.into()),
            deleted_at: Set(None),
        };

        let created = self.post_repo.create(model).await?;
        tracing::debug!(post_id = %created.id, lecture_id = %lecture_id, "Post created");
        Ok(created)
    }

    /// Get a lecture's posts in the requested order.
    ///
    /// Reading stays available after the window closes; only writes are
    /// gated.
    pub async fn list(&self, lecture_id: &str, order: PostOrder) -> AppResult<Vec<post::Model>> {
        // Distinguish "no posts" from "no lecture".
        self.lecture_repo.get_by_id(lecture_id).await?;
        self.post_repo.find_by_lecture(lecture_id, order).await
    }

    /// Get a single post.
    pub async fn get(&self, id: &str) -> AppResult<post::Model> {
        self.post_repo.get_by_id(id).await
    }

    /// Soft-delete a post (admin moderation).
    ///
    /// The row stays for the summary/purge counts but disappears from all
    /// reads. Deleting an already deleted or unknown post is `PostNotFound`.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let deleted = self.post_repo.soft_delete(id).await?;
        if !deleted {
            return Err(AppError::PostNotFound(id.to_string()));
        }
        tracing::info!(post_id = %id, "Post soft-deleted");
        Ok(())
    }
}
