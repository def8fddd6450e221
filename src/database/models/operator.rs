use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Staff account. Roles are stored as their wire form (e.g. `SUPER_ADMIN`);
/// parse with [`crate::auth::Role`] when gating behavior on them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Operator {
    pub id: Uuid,
    pub username: String,
    pub nama: String,
    pub role: String,
    #[serde(skip_serializing)]
    pub password_digest: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Operator {
    /// Soft-deleted accounts are non-authenticatable even if their token is
    /// otherwise valid.
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }
}
