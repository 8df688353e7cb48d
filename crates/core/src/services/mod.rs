//! Business logic services.

#![allow(missing_docs)]

pub mod course;
pub mod jobs;
pub mod lecture;
pub mod like;
pub mod post;
pub mod summarizer;
pub mod summary;
pub mod window;

pub use course::{CourseService, CreateCourseInput, UpdateCourseInput};
pub use jobs::{AutoEndReport, AutoSummarizeReport, LectureJobResult, MaintenanceService};
pub use lecture::{
    CreateLectureInput, LectureOpenState, LectureService, SummarizedVia, UpdateLectureInput,
};
pub use like::{LikeService, ToggleOutcome};
pub use post::PostService;
pub use summarizer::{OpenAiSummarizer, SummaryGenerator, SummaryPrompt};
pub use summary::SummaryService;
