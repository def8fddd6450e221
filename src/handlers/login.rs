// POST /api/login and /api/logout - session issuance and teardown.
//
// The login page itself is public; these endpoints live under /api/ so the
// route guard leaves them alone.

use axum::{extract::State, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::auth::{issue_token, Claims, Role};
use crate::config;
use crate::database::repository;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Salted digest stored on the operator row. The username acts as the salt so
/// identical passwords do not share a digest.
pub fn password_digest(username: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(username.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<Value>), ApiError> {
    if req.username.is_empty() || req.password.is_empty() {
        return Err(ApiError::bad_request("username and password are required"));
    }

    // Soft-deleted accounts are filtered in the query, so they fail exactly
    // like unknown usernames.
    let operator = repository::find_active_operator_by_username(state.db.pool(), &req.username)
        .await?
        .ok_or_else(|| ApiError::unauthorized("invalid username or password"))?;

    if operator.password_digest != password_digest(&req.username, &req.password) {
        warn!(username = %req.username, "failed login attempt");
        return Err(ApiError::unauthorized("invalid username or password"));
    }

    let role: Role = operator
        .role
        .parse()
        .map_err(|_| ApiError::internal("account has an unknown role"))?;

    let claims = Claims::new(
        operator.id.to_string(),
        role,
        operator.username.clone(),
        operator.nama.clone(),
    );
    let token = issue_token(&claims).map_err(|e| {
        tracing::error!("token issuance failed: {}", e);
        ApiError::internal("could not establish session")
    })?;

    let cookie = Cookie::build((config::config().security.cookie_name.clone(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    info!(username = %operator.username, role = %operator.role, "login");

    Ok((
        jar.add(cookie),
        Json(json!({
            "success": true,
            "data": {
                "operator": {
                    "id": operator.id,
                    "username": operator.username,
                    "nama": operator.nama,
                    "role": operator.role,
                },
                "expires_in": config::config().security.jwt_expiry_hours * 3600,
            }
        })),
    ))
}

pub async fn logout(jar: CookieJar) -> (CookieJar, Json<Value>) {
    let removal = Cookie::build((config::config().security.cookie_name.clone(), ""))
        .path("/")
        .build();
    (jar.remove(removal), Json(json!({ "success": true })))
}
