//! API middleware and shared state.

#![allow(missing_docs)]

use lectureboard_common::AdminConfig;
use lectureboard_core::{
    CourseService, LectureService, LikeService, MaintenanceService, PostService, SummaryService,
};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub course_service: CourseService,
    pub lecture_service: LectureService,
    pub post_service: PostService,
    pub like_service: LikeService,
    pub summary_service: SummaryService,
    pub maintenance_service: MaintenanceService,
    pub admin: AdminConfig,
}
