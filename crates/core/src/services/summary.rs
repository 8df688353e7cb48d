//! Summary service.
//!
//! Drives the summarization pipeline for an ended lecture: snapshot the
//! posts, call the generation backend, persist the summary, then move the
//! lecture to `summarized`. Nothing is persisted if generation fails, so
//! the operation is safe to retry.

use std::sync::Arc;

use lectureboard_common::{AppError, AppResult, IdGenerator};
use lectureboard_db::{
    entities::{lecture, summary},
    repositories::{LectureRepository, LikeRepository, PostOrder, PostRepository, SummaryRepository},
};
use sea_orm::Set;

use super::summarizer::{self, SummaryGenerator};

/// Summary service for business logic.
#[derive(Clone)]
pub struct SummaryService {
    summary_repo: SummaryRepository,
    post_repo: PostRepository,
    like_repo: LikeRepository,
    lecture_repo: LectureRepository,
    generator: Arc<dyn SummaryGenerator>,
    id_gen: IdGenerator,
}

impl SummaryService {
    /// Create a new summary service.
    #[must_use]
    pub fn new(
        summary_repo: SummaryRepository,
        post_repo: PostRepository,
        like_repo: LikeRepository,
        lecture_repo: LectureRepository,
        generator: Arc<dyn SummaryGenerator>,
    ) -> Self {
        Self {
            summary_repo,
            post_repo,
            like_repo,
            lecture_repo,
            generator,
            id_gen: IdGenerator::new(),
        }
    }

    /// Summarize an ended lecture.
    ///
    /// Only `ended` lectures are eligible; a second summary attempt is
    /// `AlreadyExists`, a lecture without any posts is `NoContent`. A
    /// generation failure surfaces as `Upstream` with no writes performed.
    pub async fn summarize(&self, lecture_id: &str) -> AppResult<summary::Model> {
        let lecture = self.lecture_repo.get_by_id(lecture_id).await?;
        if lecture.status != lecture::Status::Ended {
            return Err(AppError::InvalidTransition(format!(
                "lecture {lecture_id} is {:?}; only ended lectures can be summarized",
                lecture.status
            )));
        }

        if self.summary_repo.exists(lecture_id).await? {
            return Err(AppError::AlreadyExists(format!(
                "summary for lecture {lecture_id}"
            )));
        }

        let posts = self
            .post_repo
            .find_by_lecture(lecture_id, PostOrder::Popular)
            .await?;
        if posts.is_empty() {
            return Err(AppError::NoContent(format!(
                "lecture {lecture_id} has no posts to summarize"
            )));
        }

        let total_posts = posts.len() as u64;
        let total_likes = self.like_repo.count_by_lecture(lecture_id).await?;

        let prompt = summarizer::build_prompt(&posts, total_posts, total_likes);
        let text = self.generator.generate(&prompt).await?;

        let model = summary::ActiveModel {
            id: Set(self.id_gen.generate()),
            lecture_id: Set(lecture_id.to_string()),
            summary_text: Set(text),
            total_posts_count: Set(i32::try_from(total_posts).unwrap_or(i32::MAX)),
            total_likes_count: Set(i32::try_from(total_likes).unwrap_or(i32::MAX)),
            created_at: Set(chrono::Utc::now().into()),
        };

        // A racing summarize attempt loses on the unique lecture_id here.
        let created = self.summary_repo.create(model).await?;

        let moved = self
            .lecture_repo
            .transition(lecture_id, lecture::Status::Ended, lecture::Status::Summarized)
            .await?;
        if !moved {
            // The lecture left `ended` between the insert and the flip
            // (e.g. a concurrent purge). The summary stays valid either way.
            tracing::warn!(
                lecture_id = %lecture_id,
                "Summary stored but lecture was no longer ended"
            );
        }

        tracing::info!(
            lecture_id = %lecture_id,
            posts = total_posts,
            likes = total_likes,
            "Lecture summarized"
        );
        Ok(created)
    }

    /// Get a lecture's summary.
    pub async fn get(&self, lecture_id: &str) -> AppResult<summary::Model> {
        self.lecture_repo.get_by_id(lecture_id).await?;
        self.summary_repo
            .find_by_lecture(lecture_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("no summary for lecture {lecture_id}")))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use lectureboard_db::entities::post;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};
    use std::collections::BTreeMap;

    struct StubGenerator {
        result: Result<String, String>,
    }

    #[async_trait]
    impl SummaryGenerator for StubGenerator {
        async fn generate(&self, _prompt: &summarizer::SummaryPrompt) -> AppResult<String> {
            self.result
                .clone()
                .map_err(AppError::Upstream)
        }
    }

    fn test_lecture(id: &str, status: lecture::Status) -> lecture::Model {
        lecture::Model {
            id: id.to_string(),
            course_id: "c1".to_string(),
            session_number: 1,
            status,
            scheduled_start_time: None,
            scheduled_end_time: None,
            is_rescheduled: false,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    fn test_post(id: &str, like_count: i32) -> post::Model {
        post::Model {
            id: id.to_string(),
            lecture_id: "lec1".to_string(),
            content: "More examples please".to_string(),
            like_count,
            created_at: Utc::now().into(),
            deleted_at: None,
        }
    }

    fn test_summary(id: &str, lecture_id: &str) -> summary::Model {
        summary::Model {
            id: id.to_string(),
            lecture_id: lecture_id.to_string(),
            summary_text: "Students asked for more examples.".to_string(),
            total_posts_count: 1,
            total_likes_count: 3,
            created_at: Utc::now().into(),
        }
    }

    fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
        let mut row = BTreeMap::new();
        row.insert("num_items", Value::BigInt(Some(n)));
        row
    }

    fn empty_db() -> sea_orm::DatabaseConnection {
        MockDatabase::new(DatabaseBackend::Postgres).into_connection()
    }

    fn service_with(
        summary_db: sea_orm::DatabaseConnection,
        post_db: sea_orm::DatabaseConnection,
        like_db: sea_orm::DatabaseConnection,
        lecture_db: sea_orm::DatabaseConnection,
        generator: StubGenerator,
    ) -> SummaryService {
        SummaryService::new(
            SummaryRepository::new(Arc::new(summary_db)),
            PostRepository::new(Arc::new(post_db)),
            LikeRepository::new(Arc::new(like_db)),
            LectureRepository::new(Arc::new(lecture_db)),
            Arc::new(generator),
        )
    }

    fn ok_generator() -> StubGenerator {
        StubGenerator {
            result: Ok("Students asked for more examples.".to_string()),
        }
    }

    #[tokio::test]
    async fn test_summarize_rejects_active_lecture() {
        let lecture_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_lecture("lec1", lecture::Status::Active)]])
            .into_connection();

        let service = service_with(empty_db(), empty_db(), empty_db(), lecture_db, ok_generator());

        let result = service.summarize("lec1").await;
        assert!(matches!(result, Err(AppError::InvalidTransition(_))));
    }

    #[tokio::test]
    async fn test_summarize_rejects_second_attempt() {
        let lecture_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_lecture("lec1", lecture::Status::Ended)]])
            .into_connection();
        let summary_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_summary("s1", "lec1")]])
            .into_connection();

        let service = service_with(summary_db, empty_db(), empty_db(), lecture_db, ok_generator());

        let result = service.summarize("lec1").await;
        assert!(matches!(result, Err(AppError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_summarize_no_posts_is_no_content() {
        let lecture_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_lecture("lec1", lecture::Status::Ended)]])
            .into_connection();
        let summary_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<summary::Model>::new()])
            .into_connection();
        let post_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<post::Model>::new()])
            .into_connection();

        let service = service_with(summary_db, post_db, empty_db(), lecture_db, ok_generator());

        let result = service.summarize("lec1").await;
        assert!(matches!(result, Err(AppError::NoContent(_))));
    }

    #[tokio::test]
    async fn test_summarize_upstream_failure_persists_nothing() {
        let lecture_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_lecture("lec1", lecture::Status::Ended)]])
            .into_connection();
        let summary_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<summary::Model>::new()])
            .into_connection();
        let post_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_post("p1", 3)]])
            .into_connection();
        let like_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[count_row(3)]])
            .into_connection();

        let generator = StubGenerator {
            result: Err("model unavailable".to_string()),
        };
        let service = service_with(summary_db, post_db, like_db, lecture_db, generator);

        let result = service.summarize("lec1").await;
        // No insert or transition was queued on the mocks; reaching either
        // would have errored differently.
        assert!(matches!(result, Err(AppError::Upstream(_))));
    }

    #[tokio::test]
    async fn test_summarize_success() {
        let lecture_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_lecture("lec1", lecture::Status::Ended)]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        let summary_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<summary::Model>::new()])
            .append_query_results([[test_summary("s1", "lec1")]])
            .into_connection();
        let post_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_post("p1", 3)]])
            .into_connection();
        let like_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[count_row(3)]])
            .into_connection();

        let service = service_with(summary_db, post_db, like_db, lecture_db, ok_generator());

        let created = service.summarize("lec1").await.unwrap();
        assert_eq!(created.lecture_id, "lec1");
    }

    #[tokio::test]
    async fn test_get_without_summary_is_not_found() {
        let lecture_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_lecture("lec1", lecture::Status::Ended)]])
            .into_connection();
        let summary_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<summary::Model>::new()])
            .into_connection();

        let service = service_with(summary_db, empty_db(), empty_db(), lecture_db, ok_generator());

        let result = service.get("lec1").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
