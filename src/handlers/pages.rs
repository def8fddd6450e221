// Page-data endpoints behind the route guard. Role gating happened in the
// guard; handlers only personalize with the session.

use axum::{
    extract::{Query, State},
    Json,
};
use serde_json::{json, Value};

use crate::auth::Session;
use crate::database::repository;
use crate::error::ApiError;
use crate::sort::sort_surat;
use crate::AppState;

use super::dashboard::ListQuery;

/// GET /login - public page
pub async fn login_page() -> Json<Value> {
    Json(json!({ "page": "login" }))
}

/// GET /surat - sortable correspondence listing
pub async fn surat_page(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
    session: Session,
) -> Result<Json<Value>, ApiError> {
    let mut records = repository::list_surat(state.db.pool()).await?;
    sort_surat(&mut records, query.sort_state());
    Ok(Json(json!({
        "page": "surat",
        "operator": { "nama": session.nama, "role": session.role },
        "surat": records,
    })))
}

/// GET /admin - admin area landing page (guard requires an elevated role)
pub async fn admin_page(session: Session) -> Json<Value> {
    Json(json!({
        "page": "admin",
        "operator": { "nama": session.nama, "role": session.role },
    }))
}

/// GET /admin/users - account management (guard requires super admin)
pub async fn admin_users_page(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Value>, ApiError> {
    let operators = repository::list_operators(state.db.pool(), true).await?;
    Ok(Json(json!({
        "page": "admin/users",
        "operator": { "nama": session.nama, "role": session.role },
        "accounts": operators,
    })))
}
