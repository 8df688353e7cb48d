//! Database entities.

pub mod course;
pub mod lecture;
pub mod like;
pub mod post;
pub mod summary;

pub use course::Entity as Course;
pub use lecture::Entity as Lecture;
pub use like::Entity as Like;
pub use post::Entity as Post;
pub use summary::Entity as Summary;
