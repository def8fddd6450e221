use sqlx::{postgres::PgPoolOptions, FromRow, PgPool};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config;

pub mod models;
pub mod repository;

/// Errors from the data-access layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Single process-wide connection handle. Built once at startup, handed to
/// request handlers through router state, closed explicitly on shutdown.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn connect() -> Result<Self, DatabaseError> {
        let url = std::env::var("DATABASE_URL")
            .map_err(|_| DatabaseError::ConfigMissing("DATABASE_URL"))?;
        let db_config = &config::config().database;

        let pool = PgPoolOptions::new()
            .max_connections(db_config.max_connections)
            .acquire_timeout(Duration::from_secs(db_config.connect_timeout_secs))
            .connect(&url)
            .await?;

        info!("database pool ready (max_connections={})", db_config.max_connections);
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("database pool closed");
    }

    /// Pings the pool with a typed probe row.
    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        let row: HealthRow = sqlx::query_as("SELECT 1 AS ok")
            .fetch_one(&self.pool)
            .await?;
        if row.ok == 1 {
            Ok(())
        } else {
            Err(DatabaseError::NotFound("health probe".to_string()))
        }
    }
}

#[derive(FromRow)]
struct HealthRow {
    ok: i32,
}
