// /api/surat - correspondence records and their attachments.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::database::models::{JENIS_KELUAR, JENIS_MASUK};
use crate::database::repository::{self, NewSurat};
use crate::error::ApiError;
use crate::AppState;

use super::dashboard::ListQuery;
use super::require_session;
use crate::sort::sort_surat;

#[derive(Debug, Deserialize)]
pub struct CreateSuratRequest {
    pub nomor_surat: String,
    pub jenis: String,
    pub perihal: String,
    pub pengirim: String,
    pub penerima: String,
    pub tanggal_surat: DateTime<Utc>,
    pub diterima_at: Option<DateTime<Utc>>,
    pub isi_disposisi: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddLampiranRequest {
    pub nama_file: String,
    pub path: String,
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
    jar: CookieJar,
) -> Result<Json<Value>, ApiError> {
    require_session(&jar)?;
    let mut records = repository::list_surat(state.db.pool()).await?;
    sort_surat(&mut records, query.sort_state());
    Ok(Json(json!({ "success": true, "data": records })))
}

pub async fn create(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<CreateSuratRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    require_session(&jar)?;

    if req.jenis != JENIS_MASUK && req.jenis != JENIS_KELUAR {
        return Err(ApiError::bad_request(format!(
            "jenis must be {} or {}",
            JENIS_MASUK, JENIS_KELUAR
        )));
    }
    if req.nomor_surat.is_empty() || req.perihal.is_empty() {
        return Err(ApiError::bad_request("nomor_surat and perihal are required"));
    }

    let surat = repository::create_surat(
        state.db.pool(),
        NewSurat {
            nomor_surat: req.nomor_surat,
            jenis: req.jenis,
            perihal: req.perihal,
            pengirim: req.pengirim,
            penerima: req.penerima,
            tanggal_surat: req.tanggal_surat,
            diterima_at: req.diterima_at,
            isi_disposisi: req.isi_disposisi,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": surat })),
    ))
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    jar: CookieJar,
) -> Result<Json<Value>, ApiError> {
    require_session(&jar)?;
    let surat = repository::get_surat(state.db.pool(), id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("surat {}", id)))?;
    let lampiran = repository::list_lampiran(state.db.pool(), id).await?;
    Ok(Json(json!({
        "success": true,
        "data": { "surat": surat, "lampiran": lampiran }
    })))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    jar: CookieJar,
) -> Result<Json<Value>, ApiError> {
    require_session(&jar)?;
    repository::soft_delete_surat(state.db.pool(), id).await?;
    Ok(Json(json!({ "success": true })))
}

pub async fn lampiran_list(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    jar: CookieJar,
) -> Result<Json<Value>, ApiError> {
    require_session(&jar)?;
    let lampiran = repository::list_lampiran(state.db.pool(), id).await?;
    Ok(Json(json!({ "success": true, "data": lampiran })))
}

pub async fn lampiran_add(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    jar: CookieJar,
    Json(req): Json<AddLampiranRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    require_session(&jar)?;

    if req.nama_file.is_empty() {
        return Err(ApiError::bad_request("nama_file is required"));
    }
    // Attachments hang off an existing, live surat only
    repository::get_surat(state.db.pool(), id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("surat {}", id)))?;

    let lampiran =
        repository::add_lampiran(state.db.pool(), id, &req.nama_file, &req.path).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": lampiran })),
    ))
}
