//! Database integration tests.
//!
//! These tests require a running `PostgreSQL` instance.
//! Run with: `cargo test --test db_integration -- --ignored`
//!
//! Environment variables:
//!   `TEST_DB_HOST` (default: localhost)
//!   `TEST_DB_PORT` (default: 5433)
//!   `TEST_DB_USER` (default: `lectureboard_test`)
//!   `TEST_DB_PASSWORD` (default: `lectureboard_test`)
//!   `TEST_DB_NAME` (default: `lectureboard_test`)

#![allow(clippy::unwrap_used)]

use chrono::Utc;
use lectureboard_common::IdGenerator;
use lectureboard_db::entities::{course, lecture, like, post};
use lectureboard_db::repositories::{
    CourseRepository, LectureRepository, LikeRepository, PostRepository,
};
use lectureboard_db::test_utils::{TestDatabase, TestDbConfig};
use sea_orm::Set;

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_database_connection() {
    let config = TestDbConfig::default();
    let result = TestDatabase::with_config(config).await;
    assert!(result.is_ok(), "Failed to connect: {:?}", result.err());
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_lecture_lifecycle_round_trip() {
    let db = TestDatabase::create_unique()
        .await
        .expect("Failed to create test database");
    lectureboard_db::migrate(&db.connection())
        .await
        .expect("Migrations failed");

    let conn = db.connection();
    let id_gen = IdGenerator::new();
    let now = Utc::now();

    let course_repo = CourseRepository::new(conn.clone());
    let course = course_repo
        .create(course::ActiveModel {
            id: Set(id_gen.generate()),
            code: Set("CS101".to_string()),
            title: Set("Intro to Systems".to_string()),
            total_sessions: Set(15),
            regular_day_of_week: Set(Some(2)),
            regular_start_time: Set(None),
            regular_end_time: Set(None),
            first_session_date: Set(None),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        })
        .await
        .unwrap();

    let lecture_repo = LectureRepository::new(conn.clone());
    let lec = lecture_repo
        .create(lecture::ActiveModel {
            id: Set(id_gen.generate()),
            course_id: Set(course.id.clone()),
            session_number: Set(1),
            status: Set(lecture::Status::Scheduled),
            scheduled_start_time: Set(None),
            scheduled_end_time: Set(None),
            is_rescheduled: Set(false),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        })
        .await
        .unwrap();

    // Walk the state machine forward; a wrong-precondition update is a no-op.
    assert!(lecture_repo
        .transition(&lec.id, lecture::Status::Scheduled, lecture::Status::Active)
        .await
        .unwrap());
    assert!(!lecture_repo
        .transition(&lec.id, lecture::Status::Scheduled, lecture::Status::Active)
        .await
        .unwrap());

    let post_repo = PostRepository::new(conn.clone());
    let p = post_repo
        .create(post::ActiveModel {
            id: Set(id_gen.generate()),
            lecture_id: Set(lec.id.clone()),
            content: Set("What is a lifetime?".to_string()),
            like_count: Set(0),
            created_at: Set(now.into()),
            deleted_at: Set(None),
        })
        .await
        .unwrap();

    let like_repo = LikeRepository::new(conn.clone());
    like_repo
        .create(like::ActiveModel {
            id: Set(id_gen.generate()),
            post_id: Set(p.id.clone()),
            user_identifier: Set("browser-abc".to_string()),
            created_at: Set(now.into()),
        })
        .await
        .unwrap();
    post_repo.increment_like_count(&p.id).await.unwrap();

    let fetched = post_repo.get_by_id(&p.id).await.unwrap();
    assert_eq!(fetched.like_count, 1);
    assert_eq!(like_repo.count_by_lecture(&lec.id).await.unwrap(), 1);

    // End the lecture, then purge; posts and likes are physically gone and
    // the lecture lands in summarized.
    assert!(lecture_repo
        .transition(&lec.id, lecture::Status::Active, lecture::Status::Ended)
        .await
        .unwrap());
    let outcome = lecture_repo.purge_raw_data(&lec.id).await.unwrap();
    assert_eq!(outcome.deleted_posts, 1);
    assert_eq!(outcome.deleted_likes, 1);

    let purged = lecture_repo.get_by_id(&lec.id).await.unwrap();
    assert_eq!(purged.status, lecture::Status::Summarized);
    assert!(post_repo.find_by_id(&p.id).await.unwrap().is_none());

    db.drop_database().await.unwrap();
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_duplicate_like_hits_unique_constraint() {
    let db = TestDatabase::create_unique()
        .await
        .expect("Failed to create test database");
    lectureboard_db::migrate(&db.connection())
        .await
        .expect("Migrations failed");

    let conn = db.connection();
    let id_gen = IdGenerator::new();
    let now = Utc::now();

    let course = CourseRepository::new(conn.clone())
        .create(course::ActiveModel {
            id: Set(id_gen.generate()),
            code: Set("CS101".to_string()),
            title: Set("Intro to Systems".to_string()),
            total_sessions: Set(15),
            regular_day_of_week: Set(None),
            regular_start_time: Set(None),
            regular_end_time: Set(None),
            first_session_date: Set(None),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        })
        .await
        .unwrap();
    let lec = LectureRepository::new(conn.clone())
        .create(lecture::ActiveModel {
            id: Set(id_gen.generate()),
            course_id: Set(course.id),
            session_number: Set(1),
            status: Set(lecture::Status::Active),
            scheduled_start_time: Set(None),
            scheduled_end_time: Set(None),
            is_rescheduled: Set(false),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        })
        .await
        .unwrap();
    let p = PostRepository::new(conn.clone())
        .create(post::ActiveModel {
            id: Set(id_gen.generate()),
            lecture_id: Set(lec.id),
            content: Set("More examples please".to_string()),
            like_count: Set(0),
            created_at: Set(now.into()),
            deleted_at: Set(None),
        })
        .await
        .unwrap();

    let like_repo = LikeRepository::new(conn);
    let make_like = || like::ActiveModel {
        id: Set(id_gen.generate()),
        post_id: Set(p.id.clone()),
        user_identifier: Set("browser-abc".to_string()),
        created_at: Set(now.into()),
    };

    like_repo.create(make_like()).await.unwrap();
    let second = like_repo.create(make_like()).await;
    assert!(matches!(
        second,
        Err(lectureboard_common::AppError::AlreadyExists(_))
    ));

    db.drop_database().await.unwrap();
}

#[test]
fn test_database_url_format() {
    let config = TestDbConfig {
        host: "testhost".to_string(),
        port: 5432,
        username: "testuser".to_string(),
        password: "testpass".to_string(),
        database: "testdb".to_string(),
    };

    let url = config.database_url();
    assert!(url.starts_with("postgres://"));
    assert!(url.contains("testhost"));
    assert!(url.contains("testdb"));
}

#[test]
fn test_postgres_url_format() {
    let config = TestDbConfig::default();
    let url = config.postgres_url();
    assert!(url.ends_with("/postgres"));
}
