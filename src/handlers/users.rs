// /api/users - operator account management, super admin only.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::auth::Role;
use crate::database::repository::{self, NewOperator};
use crate::error::ApiError;
use crate::AppState;

use super::login::password_digest;
use super::require_super_admin;

#[derive(Debug, Default, Deserialize)]
pub struct UsersQuery {
    #[serde(default)]
    pub include_deleted: bool,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub nama: String,
    pub role: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: String,
}

fn parse_role(role: &str) -> Result<Role, ApiError> {
    role.parse()
        .map_err(|_| ApiError::bad_request(format!("unknown role: {}", role)))
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<UsersQuery>,
    jar: CookieJar,
) -> Result<Json<Value>, ApiError> {
    require_super_admin(&jar)?;
    let operators = repository::list_operators(state.db.pool(), query.include_deleted).await?;
    Ok(Json(json!({ "success": true, "data": operators })))
}

pub async fn create(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    require_super_admin(&jar)?;

    if req.username.is_empty() || req.password.is_empty() {
        return Err(ApiError::bad_request("username and password are required"));
    }
    let role = parse_role(&req.role)?;

    if repository::find_active_operator_by_username(state.db.pool(), &req.username)
        .await?
        .is_some()
    {
        return Err(ApiError::conflict(format!(
            "username already taken: {}",
            req.username
        )));
    }

    let digest = password_digest(&req.username, &req.password);
    let operator = repository::create_operator(
        state.db.pool(),
        NewOperator {
            username: req.username,
            nama: req.nama,
            role: role.as_str().to_string(),
            password_digest: digest,
        },
    )
    .await?;

    info!(username = %operator.username, role = %operator.role, "operator created");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": operator })),
    ))
}

pub async fn update_role(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    jar: CookieJar,
    Json(req): Json<UpdateRoleRequest>,
) -> Result<Json<Value>, ApiError> {
    let session = require_super_admin(&jar)?;
    let role = parse_role(&req.role)?;

    // Demoting yourself would lock the last super admin out of this page
    if session.operator_id == id.to_string() && role != Role::SuperAdmin {
        return Err(ApiError::bad_request("cannot change your own role"));
    }

    let operator = repository::update_operator_role(state.db.pool(), id, role.as_str()).await?;
    info!(username = %operator.username, role = %operator.role, "role updated");
    Ok(Json(json!({ "success": true, "data": operator })))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    jar: CookieJar,
) -> Result<Json<Value>, ApiError> {
    let session = require_super_admin(&jar)?;
    if session.operator_id == id.to_string() {
        return Err(ApiError::bad_request("cannot delete your own account"));
    }

    repository::soft_delete_operator(state.db.pool(), id).await?;
    info!(%id, "operator soft-deleted");
    Ok(Json(json!({ "success": true })))
}

pub async fn restore(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    jar: CookieJar,
) -> Result<Json<Value>, ApiError> {
    require_super_admin(&jar)?;
    let operator = repository::restore_operator(state.db.pool(), id).await?;
    info!(username = %operator.username, "operator restored");
    Ok(Json(json!({ "success": true, "data": operator })))
}
