// GET /dashboard - the personalized landing page behind the guard.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::auth::Session;
use crate::database::repository;
use crate::error::ApiError;
use crate::sort::{sort_surat, summarize, SortField, SortOrder, SortState};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub sort: Option<SortField>,
    pub order: Option<SortOrder>,
}

impl ListQuery {
    pub(crate) fn sort_state(&self) -> SortState {
        SortState {
            field: self.sort.unwrap_or_default(),
            order: self.order.unwrap_or_default(),
        }
    }
}

/// The guard already vetted the token; this handler additionally re-checks
/// the account row so a soft-deleted operator with a still-valid token is
/// treated as unauthenticated.
pub async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
    session: Session,
) -> Response {
    let Ok(operator_id) = Uuid::parse_str(&session.operator_id) else {
        return Redirect::to("/login").into_response();
    };

    let operator = match repository::find_active_operator(state.db.pool(), operator_id).await {
        Ok(operator) => operator,
        Err(e) => return ApiError::from(e).into_response(),
    };
    if operator.is_none() {
        return Redirect::to("/login").into_response();
    }

    let mut records = match repository::list_surat(state.db.pool()).await {
        Ok(records) => records,
        Err(e) => return ApiError::from(e).into_response(),
    };
    sort_surat(&mut records, query.sort_state());
    let stats = summarize(&records, Utc::now());

    Json(json!({
        "operator": {
            "id": session.operator_id,
            "username": session.username,
            "nama": session.nama,
            "role": session.role,
        },
        "stats": stats,
        "surat": records,
    }))
    .into_response()
}
