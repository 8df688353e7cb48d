//! Request extractors.

use axum::{extract::FromRequestParts, http::request::Parts};
use lectureboard_common::AppError;

use crate::middleware::AppState;

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Admin request guard.
///
/// Authentication is an opaque "caller is admin" predicate: the request
/// is admin iff it presents the configured bearer token.
#[derive(Debug, Clone, Copy)]
pub struct AdminAuth;

impl FromRequestParts<AppState> for AdminAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match bearer_token(parts) {
            Some(token) if token == state.admin.token => Ok(Self),
            _ => Err(AppError::Unauthorized),
        }
    }
}

/// Cron trigger guard.
///
/// When no cron secret is configured the endpoints are open (development
/// setups); with one configured, the matching bearer token is required.
#[derive(Debug, Clone, Copy)]
pub struct CronAuth;

impl FromRequestParts<AppState> for CronAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match &state.admin.cron_secret {
            None => Ok(Self),
            Some(secret) => match bearer_token(parts) {
                Some(token) if token == secret => Ok(Self),
                _ => Err(AppError::Unauthorized),
            },
        }
    }
}
