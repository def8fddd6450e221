use axum::{extract::State, Json};
use axum_extra::extract::cookie::CookieJar;
use serde_json::{json, Value};

use crate::auth::{read_session, Role, Session};
use crate::error::ApiError;
use crate::AppState;

pub mod dashboard;
pub mod login;
pub mod pages;
pub mod surat;
pub mod users;

/// API handlers never redirect; a missing or invalid session is a 401.
pub(crate) fn require_session(jar: &CookieJar) -> Result<Session, ApiError> {
    read_session(jar).ok_or_else(|| ApiError::unauthorized("authentication required"))
}

pub(crate) fn require_super_admin(jar: &CookieJar) -> Result<Session, ApiError> {
    let session = require_session(jar)?;
    if session.role != Role::SuperAdmin {
        return Err(ApiError::forbidden("account management requires super admin"));
    }
    Ok(session)
}

/// GET /api/health - liveness probe with a typed database ping
pub async fn health(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    state.db.health_check().await?;
    Ok(Json(json!({ "status": "ok" })))
}
