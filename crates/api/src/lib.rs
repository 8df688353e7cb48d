//! HTTP API layer for lectureboard.
//!
//! This crate provides the REST API:
//!
//! - **Endpoints**: student-facing board routes, admin routes, cron triggers
//! - **Extractors**: admin bearer auth, cron secret auth
//! - **Middleware**: application state shared by all handlers
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
pub use middleware::AppState;
