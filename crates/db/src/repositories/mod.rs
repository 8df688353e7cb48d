//! Database repositories.

pub mod course;
pub mod lecture;
pub mod like;
pub mod post;
pub mod summary;

pub use course::CourseRepository;
pub use lecture::{LectureRepository, PurgeOutcome};
pub use like::LikeRepository;
pub use post::{PostOrder, PostRepository};
pub use summary::SummaryRepository;

use lectureboard_common::AppError;
use sea_orm::{DbErr, SqlErr};

/// Map an insert error, reinterpreting a uniqueness violation as a domain
/// condition instead of a raw storage error.
pub(crate) fn map_insert_err(e: &DbErr, what: &str) -> AppError {
    if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        AppError::AlreadyExists(what.to_string())
    } else {
        AppError::Database(e.to_string())
    }
}
