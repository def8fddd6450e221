use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const JENIS_MASUK: &str = "MASUK";
pub const JENIS_KELUAR: &str = "KELUAR";

/// A correspondence record (incoming or outgoing letter) being archived.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Surat {
    pub id: Uuid,
    pub nomor_surat: String,
    /// `MASUK` or `KELUAR`
    pub jenis: String,
    pub perihal: String,
    pub pengirim: String,
    pub penerima: String,
    pub tanggal_surat: DateTime<Utc>,
    pub diterima_at: Option<DateTime<Utc>>,
    pub isi_disposisi: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Attachment file associated with a surat.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Lampiran {
    pub id: Uuid,
    pub surat_id: Uuid,
    pub nama_file: String,
    pub path: String,
    pub created_at: DateTime<Utc>,
}
