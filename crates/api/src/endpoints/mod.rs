//! API endpoints.

mod courses;
mod cron;
mod lectures;
mod likes;
mod posts;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/api/lectures", lectures::router())
        .nest("/api/posts", posts::router())
        .nest("/api/likes", likes::router())
        .nest("/api/cron", cron::router())
        .nest("/api/admin/courses", courses::router())
        .nest("/api/admin/lectures", lectures::admin_router())
        .nest("/api/admin/posts", posts::admin_router())
}
