use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::models::{Lampiran, Operator, Surat};
use super::DatabaseError;

// ---------------------------------------------------------------------------
// Operators
// ---------------------------------------------------------------------------

pub struct NewOperator {
    pub username: String,
    pub nama: String,
    pub role: String,
    pub password_digest: String,
}

/// Look up an operator that can still log in. Soft-deleted rows are filtered
/// at the query level so "not found" and "soft-deleted" look identical.
pub async fn find_active_operator_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<Operator>, DatabaseError> {
    let operator = sqlx::query_as::<_, Operator>(
        "SELECT * FROM operators WHERE username = $1 AND deleted_at IS NULL",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(operator)
}

pub async fn find_active_operator(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<Operator>, DatabaseError> {
    let operator = sqlx::query_as::<_, Operator>(
        "SELECT * FROM operators WHERE id = $1 AND deleted_at IS NULL",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(operator)
}

pub async fn list_operators(
    pool: &PgPool,
    include_deleted: bool,
) -> Result<Vec<Operator>, DatabaseError> {
    let query = if include_deleted {
        "SELECT * FROM operators ORDER BY created_at"
    } else {
        "SELECT * FROM operators WHERE deleted_at IS NULL ORDER BY created_at"
    };
    let operators = sqlx::query_as::<_, Operator>(query).fetch_all(pool).await?;
    Ok(operators)
}

pub async fn create_operator(
    pool: &PgPool,
    new: NewOperator,
) -> Result<Operator, DatabaseError> {
    let operator = sqlx::query_as::<_, Operator>(
        "INSERT INTO operators (id, username, nama, role, password_digest, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $6) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(&new.username)
    .bind(&new.nama)
    .bind(&new.role)
    .bind(&new.password_digest)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;
    Ok(operator)
}

pub async fn update_operator_role(
    pool: &PgPool,
    id: Uuid,
    role: &str,
) -> Result<Operator, DatabaseError> {
    sqlx::query_as::<_, Operator>(
        "UPDATE operators SET role = $2, updated_at = $3 \
         WHERE id = $1 AND deleted_at IS NULL RETURNING *",
    )
    .bind(id)
    .bind(role)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound(format!("operator {}", id)))
}

pub async fn soft_delete_operator(pool: &PgPool, id: Uuid) -> Result<(), DatabaseError> {
    let result = sqlx::query(
        "UPDATE operators SET deleted_at = $2, updated_at = $2 \
         WHERE id = $1 AND deleted_at IS NULL",
    )
    .bind(id)
    .bind(Utc::now())
    .execute(pool)
    .await?;
    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound(format!("operator {}", id)));
    }
    Ok(())
}

pub async fn restore_operator(pool: &PgPool, id: Uuid) -> Result<Operator, DatabaseError> {
    sqlx::query_as::<_, Operator>(
        "UPDATE operators SET deleted_at = NULL, updated_at = $2 \
         WHERE id = $1 AND deleted_at IS NOT NULL RETURNING *",
    )
    .bind(id)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound(format!("operator {}", id)))
}

// ---------------------------------------------------------------------------
// Surat
// ---------------------------------------------------------------------------

pub struct NewSurat {
    pub nomor_surat: String,
    pub jenis: String,
    pub perihal: String,
    pub pengirim: String,
    pub penerima: String,
    pub tanggal_surat: DateTime<Utc>,
    pub diterima_at: Option<DateTime<Utc>>,
    pub isi_disposisi: Option<String>,
}

pub async fn list_surat(pool: &PgPool) -> Result<Vec<Surat>, DatabaseError> {
    let surat = sqlx::query_as::<_, Surat>(
        "SELECT * FROM surat WHERE deleted_at IS NULL ORDER BY created_at",
    )
    .fetch_all(pool)
    .await?;
    Ok(surat)
}

pub async fn get_surat(pool: &PgPool, id: Uuid) -> Result<Option<Surat>, DatabaseError> {
    let surat = sqlx::query_as::<_, Surat>(
        "SELECT * FROM surat WHERE id = $1 AND deleted_at IS NULL",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(surat)
}

pub async fn create_surat(pool: &PgPool, new: NewSurat) -> Result<Surat, DatabaseError> {
    let surat = sqlx::query_as::<_, Surat>(
        "INSERT INTO surat \
         (id, nomor_surat, jenis, perihal, pengirim, penerima, tanggal_surat, \
          diterima_at, isi_disposisi, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(&new.nomor_surat)
    .bind(&new.jenis)
    .bind(&new.perihal)
    .bind(&new.pengirim)
    .bind(&new.penerima)
    .bind(new.tanggal_surat)
    .bind(new.diterima_at)
    .bind(&new.isi_disposisi)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;
    Ok(surat)
}

pub async fn soft_delete_surat(pool: &PgPool, id: Uuid) -> Result<(), DatabaseError> {
    let result = sqlx::query(
        "UPDATE surat SET deleted_at = $2, updated_at = $2 \
         WHERE id = $1 AND deleted_at IS NULL",
    )
    .bind(id)
    .bind(Utc::now())
    .execute(pool)
    .await?;
    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound(format!("surat {}", id)));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Lampiran
// ---------------------------------------------------------------------------

pub async fn add_lampiran(
    pool: &PgPool,
    surat_id: Uuid,
    nama_file: &str,
    path: &str,
) -> Result<Lampiran, DatabaseError> {
    let lampiran = sqlx::query_as::<_, Lampiran>(
        "INSERT INTO lampiran (id, surat_id, nama_file, path, created_at) \
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(surat_id)
    .bind(nama_file)
    .bind(path)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;
    Ok(lampiran)
}

pub async fn list_lampiran(pool: &PgPool, surat_id: Uuid) -> Result<Vec<Lampiran>, DatabaseError> {
    let lampiran = sqlx::query_as::<_, Lampiran>(
        "SELECT * FROM lampiran WHERE surat_id = $1 ORDER BY created_at",
    )
    .bind(surat_id)
    .fetch_all(pool)
    .await?;
    Ok(lampiran)
}
